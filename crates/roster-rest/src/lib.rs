//! # Roster REST
//!
//! HTTP adapter for the user service: `/api/users` CRUD endpoints,
//! health checks, and the OpenAPI document.

pub mod controllers;
pub mod middleware;
pub mod openapi;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;
