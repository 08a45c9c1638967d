pub mod config;
pub mod errors;
pub mod managers;
pub mod models;
pub mod platform;
pub mod session;
pub mod types;
pub mod validation;
