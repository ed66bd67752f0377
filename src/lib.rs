pub mod auth;
pub mod core;
pub mod handlers;
pub mod models;
pub mod stores;
pub mod utils;
pub mod validation;
