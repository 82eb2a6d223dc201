//! Carnet DB - Database abstractions
//!
//! SQLx-based database layer for the Carnet contact platform.
//!
//! # Example
//!
//! ```rust,ignore
//! use carnet_db::{create_pool, Repositories};
//!
//! let pool = create_pool("postgres://localhost/carnet").await?;
//! let repos = Repositories::new(pool);
//!
//! let user = repos.users.find_by_email("user@example.com").await?;
//! ```

pub mod error;
pub mod models;
pub mod pg;
pub mod pool;
pub mod repo;

pub use error::{DbError, DbResult};
pub use models::*;
pub use pg::Repositories;
pub use pool::{create_pool, run_migrations, DbPool};
pub use repo::*;
