pub mod catalog;
pub mod config;
pub mod downloader;
pub mod error;
pub mod logging;
pub mod utils;
