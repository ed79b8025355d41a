pub mod orders;
pub mod settings;
pub mod summary;
