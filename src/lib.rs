pub mod clients;
pub mod config;
pub mod error;
pub mod extract;
pub mod http;
pub mod prompts;
pub mod transcript;
