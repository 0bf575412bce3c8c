//! # Roster Config
//!
//! Layered configuration for the Roster user service: TOML files,
//! a `.env` file, and `ROSTER__*` environment variables, with runtime reload.

mod app_config;
mod loader;

pub use app_config::*;
pub use loader::*;
