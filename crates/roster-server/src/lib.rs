//! # Roster Server Library
//!
//! Wiring and startup for the Roster user service: builds the store,
//! cache, and service from configuration and serves the REST API.

pub mod app;
pub mod di;
pub mod startup;
