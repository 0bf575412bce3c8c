//! # Roster Service
//!
//! User CRUD orchestration: validation, email uniqueness, persistence
//! through [`roster_repository::UserRepository`], and a best-effort
//! cache-aside layer in front of reads.

pub mod cache;
pub mod dto;
pub mod r#impl;
pub mod mappers;
pub mod user_service;
pub mod user_validation;

pub use cache::*;
pub use dto::*;
pub use r#impl::{CachePolicy, UserServiceImpl};
pub use user_service::*;
pub use user_validation::validate_user;
