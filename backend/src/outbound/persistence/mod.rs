//! User persistence adapters.
//!
//! - [`DieselUserRepository`]: PostgreSQL via Diesel with `diesel-async` and
//!   `bb8` pooling. Row structs and schema stay private to this module.
//! - [`InMemoryUserRepository`]: mock mode store used when no database URL is
//!   configured.
//!
//! ```ignore
//! use geodir_backend::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/geodir")).await?;
//! let repo = DieselUserRepository::new(pool);
//! ```

mod diesel_user_repository;
mod memory_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_user_repository::DieselUserRepository;
pub use memory_user_repository::InMemoryUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
