pub mod cache;
pub mod client;
pub mod commands;
pub mod config;
pub mod dashboard;
pub mod data_provider;
pub mod fixtures;
pub mod formatting;
pub mod tui;
pub mod types;
pub mod widgets;

#[cfg(any(test, feature = "development"))]
pub mod dev;
