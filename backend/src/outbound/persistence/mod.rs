//! Persistence adapters implementing the domain repository ports.

mod error_map;
pub mod memory;
pub mod migrations;
mod models;
pub mod pool;
mod recipe_repository;
mod schema;
mod todo_repository;
mod user_repository;

pub use memory::{InMemoryRecipeRepository, InMemoryTodoRepository, InMemoryUserRepository};
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
pub use recipe_repository::DieselRecipeRepository;
pub use todo_repository::DieselTodoRepository;
pub use user_repository::DieselUserRepository;
