pub mod draft;
pub mod orders;
pub mod state;
pub mod storage;
pub mod summary;
