pub mod handlers;
pub mod processor;
pub mod queries;
pub mod ranking;
pub mod stats;
