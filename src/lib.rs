pub mod commands;
pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod services;
pub mod utils;
