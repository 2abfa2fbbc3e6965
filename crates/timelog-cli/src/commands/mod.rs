pub mod config;
pub mod log;
pub mod stats;
pub mod timer;
