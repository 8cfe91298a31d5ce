pub mod chips;
pub mod config;
pub mod error;
pub mod event;
pub mod wire;
