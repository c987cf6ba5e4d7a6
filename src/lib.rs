// File: src/lib.rs
pub mod app;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod paths;
pub mod runtime;
pub mod session;
#[cfg(feature = "tui")]
pub mod tui;
