pub mod config;
pub mod resize;
