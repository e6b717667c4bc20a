//! # estore-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the repository port traits defined in `estore-app::ports`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain types and database rows
//! - Keep the category tree's parent links and subtree deletes in the schema
//! - Apply default-address swaps and promotions inside a single transaction
//!
//! ## Dependency rule
//! Depends on `estore-app` (for port traits) and `estore-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod address_repo;
mod category_repo;
mod city_repo;
mod decode;
mod error;
mod locality_repo;
mod pool;
mod state_repo;
mod user_repo;

pub use address_repo::SqliteAddressRepository;
pub use category_repo::SqliteCategoryRepository;
pub use city_repo::SqliteCityRepository;
pub use error::StorageError;
pub use locality_repo::SqliteLocalityRepository;
pub use pool::{Config, Database};
pub use state_repo::SqliteStateRepository;
pub use user_repo::SqliteUserRepository;
