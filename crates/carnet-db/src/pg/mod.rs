//! PostgreSQL repository implementations

mod contact;
mod user;

pub use contact::PgContactRepository;
pub use user::PgUserRepository;

use crate::DbPool;

/// All repositories bundled together
#[derive(Clone)]
pub struct Repositories {
    pub users: PgUserRepository,
    pub contacts: PgContactRepository,
}

impl Repositories {
    /// Create all repositories from a database pool
    pub fn new(pool: DbPool) -> Self {
        Self {
            users: PgUserRepository::new(pool.clone()),
            contacts: PgContactRepository::new(pool),
        }
    }
}
