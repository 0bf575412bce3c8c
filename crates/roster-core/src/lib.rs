//! # Roster Core
//!
//! Core types, error definitions, and validation helpers shared by every
//! layer of the Roster user service.

pub mod error;
pub mod id;
pub mod result;
pub mod telemetry;
pub mod validation;

pub use error::*;
pub use id::*;
pub use result::*;
pub use validation::*;

// Re-export shaku for the trait seams
pub use shaku::Interface;
