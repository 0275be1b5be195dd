//! Data models for embedded images, resize requests, and configuration.

pub mod config;
pub mod embedded;
pub mod request;
