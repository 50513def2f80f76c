mod common;

use std::time::Instant;

use assert_matches::assert_matches;
use chrono::Duration;
use todo_core::auth::jwt::TokenService;
use todo_core::error::CoreError;
use todo_core::usecases::AccountPolicy;
use uuid::Uuid;

use common::{harness, harness_with, register, registration};

#[tokio::test]
async fn register_stores_only_a_hash() {
    let h = harness();
    let user = register(&h, "ada@example.com", "hunter22").await;

    assert_eq!(user.email, "ada@example.com");
    assert_ne!(user.password_hash, "hunter22");
    assert!(user.password().verify("hunter22"));
    assert_eq!(user.created_at, user.updated_at);
    assert!(!format!("{user:?}").contains(&user.password_hash));
}

#[tokio::test]
async fn register_rejects_bad_input() {
    let h = harness();
    let register = &h.use_cases.register_user;

    assert_matches!(
        register.execute(registration("not-an-email", "hunter22")).await,
        Err(CoreError::Validation(_))
    );
    assert_matches!(
        register.execute(registration("ada@example.com", "123")).await,
        Err(CoreError::Validation(_))
    );

    let mut input = registration("ada@example.com", "hunter22");
    input.timezone = "  ".into();
    assert_matches!(
        register.execute(input).await,
        Err(CoreError::MissingField("timezone"))
    );
}

#[tokio::test]
async fn duplicate_email_conflicts_regardless_of_case() {
    let h = harness();
    register(&h, "Ada@Example.com", "hunter22").await;

    let register = &h.use_cases.register_user;
    assert_matches!(
        register.execute(registration("ada@example.com", "hunter22")).await,
        Err(CoreError::Conflict(_))
    );
    assert_matches!(
        register.execute(registration("ADA@EXAMPLE.COM", "hunter22")).await,
        Err(CoreError::Conflict(_))
    );
}

#[tokio::test]
async fn case_sensitive_policy_keeps_addresses_distinct() {
    let h = harness_with(AccountPolicy {
        normalize_email: false,
        ..AccountPolicy::default()
    });
    let first = register(&h, "Ada@Example.com", "hunter22").await;
    let second = register(&h, "ada@example.com", "hunter22").await;

    assert_eq!(first.email, "Ada@Example.com");
    assert_ne!(first.id, second.id);
}

#[tokio::test]
async fn login_issues_a_session_for_the_user() {
    let h = harness();
    let user = register(&h, "grace@example.com", "s3cret!").await;

    let session = h
        .use_cases
        .login_user
        .execute("GRACE@example.com", "s3cret!")
        .await
        .unwrap();

    assert_eq!(session.user_id, user.id);
    assert_eq!(session.expires_at, common::start() + Duration::hours(24));
    let claims = h.tokens.validate_token(&session.token).unwrap();
    assert_eq!(claims.sub, user.id);
}

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let h = harness();
    register(&h, "grace@example.com", "s3cret!").await;
    let login = &h.use_cases.login_user;

    let wrong_password = login.execute("grace@example.com", "wrong!!").await.unwrap_err();
    let unknown_email = login.execute("nobody@example.com", "s3cret!").await.unwrap_err();
    let malformed = login.execute("grace", "s3cret!").await.unwrap_err();

    assert_matches!(wrong_password, CoreError::InvalidCredentials);
    assert_matches!(unknown_email, CoreError::InvalidCredentials);
    assert_matches!(malformed, CoreError::InvalidCredentials);
    assert_eq!(wrong_password.to_string(), unknown_email.to_string());
}

#[tokio::test]
async fn unknown_email_costs_a_password_check() {
    let h = harness();
    register(&h, "barbara@example.com", "liskov87").await;
    let login = &h.use_cases.login_user;

    // First unknown-email login also builds the decoy hash.
    let _ = login.execute("warmup@example.com", "liskov87").await;

    let started = Instant::now();
    let _ = login.execute("barbara@example.com", "wrong!!").await;
    let wrong_password = started.elapsed();

    let started = Instant::now();
    let _ = login.execute("nobody@example.com", "liskov87").await;
    let unknown_email = started.elapsed();

    assert!(
        unknown_email * 4 >= wrong_password,
        "unknown email took {unknown_email:?}, wrong password took {wrong_password:?}"
    );
}

#[tokio::test]
async fn out_of_range_session_ttl_fails_without_panicking() {
    let h = harness_with(AccountPolicy {
        session_ttl: Duration::days(365 * 1_000_000),
        ..AccountPolicy::default()
    });
    register(&h, "edsger@example.com", "goto-harmful").await;

    assert_matches!(
        h.use_cases
            .login_user
            .execute("edsger@example.com", "goto-harmful")
            .await,
        Err(CoreError::Validation(_))
    );
}

#[tokio::test]
async fn session_token_expires_after_its_ttl() {
    let h = harness();
    let user = register(&h, "linus@example.com", "penguin").await;
    let token = h.tokens.generate_token(user.id, Duration::hours(1)).unwrap();

    assert_eq!(h.tokens.validate_token(&token).unwrap().sub, user.id);

    h.clock.advance(Duration::hours(1) + Duration::seconds(1));
    assert_matches!(
        h.tokens.validate_token(&token),
        Err(CoreError::InvalidToken(_))
    );
}

#[tokio::test]
async fn find_user_by_id() {
    let h = harness();
    let user = register(&h, "ken@example.com", "unix1969").await;

    let found = h.use_cases.find_user_by_id.execute(user.id).await.unwrap();
    assert_eq!(found, user);

    assert_matches!(
        h.use_cases.find_user_by_id.execute(Uuid::new_v4()).await,
        Err(CoreError::NotFound { entity: "User", .. })
    );
}
