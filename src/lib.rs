pub mod encoding;
pub mod errors;
pub mod models;
pub mod orchestrator;
pub mod services;
