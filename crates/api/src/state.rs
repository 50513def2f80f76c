use std::sync::Arc;

use todo_core::auth::jwt::{JwtTokenService, TokenService};
use todo_core::clock::{Clock, SystemClock};
use todo_core::ids::{IdGenerator, UuidV4Generator};
use todo_core::memory::MemoryStore;
use todo_core::usecases::{Collaborators, UseCases};
use todo_db::{DbPool, PgCategoryRepo, PgTagRepo, PgTodoRepo, PgUserRepo};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Wired use cases; the only path handlers take to storage.
    pub use_cases: Arc<UseCases>,
    /// Session token verifier used by the auth extractor.
    pub tokens: Arc<dyn TokenService>,
    pub config: Arc<ServerConfig>,
    /// Present when running on Postgres; used by the health check.
    pub pool: Option<DbPool>,
}

impl AppState {
    /// Wire production collaborators: Postgres when `pool` is given,
    /// otherwise a fresh in-memory store.
    pub fn new(config: ServerConfig, pool: Option<DbPool>) -> Self {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let ids: Arc<dyn IdGenerator> = Arc::new(UuidV4Generator);
        let tokens: Arc<dyn TokenService> =
            Arc::new(JwtTokenService::new(&config.jwt, clock.clone()));
        let policy = config.account_policy();

        let collaborators = match &pool {
            Some(pool) => Collaborators {
                users: Arc::new(PgUserRepo::new(pool.clone())),
                todos: Arc::new(PgTodoRepo::new(pool.clone())),
                categories: Arc::new(PgCategoryRepo::new(pool.clone())),
                tags: Arc::new(PgTagRepo::new(pool.clone())),
                tokens,
                clock,
                ids,
                policy,
            },
            None => Collaborators::with_store(
                Arc::new(MemoryStore::new()),
                tokens,
                clock,
                ids,
                policy,
            ),
        };

        Self::with_collaborators(config, collaborators, pool)
    }

    /// Build state around an explicit set of collaborators.
    pub fn with_collaborators(
        config: ServerConfig,
        collaborators: Collaborators,
        pool: Option<DbPool>,
    ) -> Self {
        Self {
            tokens: collaborators.tokens.clone(),
            use_cases: Arc::new(UseCases::new(collaborators)),
            config: Arc::new(config),
            pool,
        }
    }
}
