pub mod client;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod sample;
pub mod service;
pub mod store;
pub mod validation;
