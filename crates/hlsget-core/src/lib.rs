pub mod config;
pub mod logging;

pub mod assembler;
pub mod coordinator;
pub mod fetcher;
pub mod manifest;
pub mod progress;
pub mod retry;
pub mod session;
