//! # journey
//!
//! Terminal front-end, CLI and file-backed feedback store for the birthday
//! journey. The stage machine itself lives in `journey-core`.

pub mod admin;
pub mod cli;
pub mod clock;
pub mod config;
pub mod store;
pub mod terminal;

pub use config::JourneyConfig;
pub use store::JsonFileStore;
