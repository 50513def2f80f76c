#![allow(dead_code)]

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use todo_core::auth::jwt::{JwtConfig, JwtTokenService};
use todo_core::clock::FixedClock;
use todo_core::entities::User;
use todo_core::ids::UuidV4Generator;
use todo_core::memory::MemoryStore;
use todo_core::types::Timestamp;
use todo_core::usecases::{AccountPolicy, Collaborators, RegisterUserInput, UseCases};

pub const TEST_SECRET: &str = "core-test-secret-at-least-32-bytes!!";

/// Use cases wired to a fresh in-memory store and a pinned clock.
pub struct Harness {
    pub store: Arc<MemoryStore>,
    pub clock: Arc<FixedClock>,
    pub tokens: Arc<JwtTokenService>,
    pub use_cases: UseCases,
}

pub fn start() -> Timestamp {
    Utc.with_ymd_and_hms(2030, 3, 14, 9, 30, 0).unwrap()
}

pub fn harness() -> Harness {
    harness_with(AccountPolicy::default())
}

pub fn harness_with(policy: AccountPolicy) -> Harness {
    let store = Arc::new(MemoryStore::new());
    let clock = Arc::new(FixedClock::new(start()));
    let tokens = Arc::new(JwtTokenService::new(
        &JwtConfig {
            secret: TEST_SECRET.to_string(),
        },
        clock.clone(),
    ));

    let use_cases = UseCases::new(Collaborators::with_store(
        store.clone(),
        tokens.clone(),
        clock.clone(),
        Arc::new(UuidV4Generator),
        policy,
    ));

    Harness {
        store,
        clock,
        tokens,
        use_cases,
    }
}

pub fn registration(email: &str, password: &str) -> RegisterUserInput {
    RegisterUserInput {
        email: email.to_string(),
        password: password.to_string(),
        name: Some("Test User".to_string()),
        timezone: "Europe/Berlin".to_string(),
        avatar_url: None,
    }
}

pub async fn register(h: &Harness, email: &str, password: &str) -> User {
    h.use_cases
        .register_user
        .execute(registration(email, password))
        .await
        .expect("registration should succeed")
}
