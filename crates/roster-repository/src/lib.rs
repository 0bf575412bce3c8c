//! # Roster Repository
//!
//! Persistence for user records.
//!
//! ```text
//! UserService
//!   ↓  Arc<dyn UserRepository>
//! MySqlUserRepository           InMemoryUserRepository
//!   ↓  Arc<dyn DatabasePoolInterface>
//! MySQL
//! ```
//!
//! The `users` table is provisioned outside this crate; see the
//! integration tests for the expected shape.

pub mod entity;
pub mod memory;
pub mod mysql;
pub mod pool;
pub mod traits;

pub use entity::*;
pub use memory::*;
pub use mysql::*;
pub use pool::*;
pub use traits::*;
