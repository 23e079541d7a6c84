pub mod cli;
pub mod config;
pub mod message;
pub mod sink;
