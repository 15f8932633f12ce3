//! Repository layer - typed CRUD against the users table.

pub mod entities;
pub mod user_repository;

pub use user_repository::{UserRepository, UserStore};

#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
