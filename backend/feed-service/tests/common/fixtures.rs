//! Shared fixtures for integration tests.
//!
//! Tests are driven against a real PostgreSQL instance named by
//! `TEST_DATABASE_URL`; when it is unset every test returns early so the
//! suite stays green on machines without a database. All fixture data is
//! scoped to freshly created users so parallel tests do not interfere.

use feed_service::config::S3Config;
use feed_service::models::{Post, User};
use feed_service::services::ObjectStorage;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

/// Connect to the test database and apply migrations. `None` when
/// `TEST_DATABASE_URL` is not configured.
pub async fn test_pool() -> Option<PgPool> {
    let url = std::env::var("TEST_DATABASE_URL").ok()?;
    let pool = PgPool::connect(&url)
        .await
        .expect("failed to connect to TEST_DATABASE_URL");
    feed_service::MIGRATOR
        .run(&pool)
        .await
        .expect("failed to run migrations");
    Some(pool)
}

/// Object storage wired at an unroutable endpoint with a short timeout:
/// presigning works (it is local signing), while real calls fail fast,
/// which exercises the best-effort delete path.
pub async fn test_storage() -> Arc<ObjectStorage> {
    let config = S3Config {
        region: "us-east-1".to_string(),
        bucket_name: "glimpse-test".to_string(),
        aws_access_key_id: "test-access-key".to_string(),
        aws_secret_access_key: "test-secret-key".to_string(),
        endpoint: Some("http://127.0.0.1:9".to_string()),
        public_base_url: "http://127.0.0.1:9/glimpse-test".to_string(),
        request_timeout_ms: 250,
        presign_expiry_secs: 900,
    };
    Arc::new(
        ObjectStorage::from_config(&config)
            .await
            .expect("failed to build test storage client"),
    )
}

/// Insert a user the way the identity-sync worker would.
pub async fn create_user(pool: &PgPool, username: &str) -> User {
    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (external_id, username)
        VALUES ($1, $2)
        RETURNING id, external_id, username, created_at
        "#,
    )
    .bind(format!("ext-{}", Uuid::new_v4()))
    .bind(username)
    .fetch_one(pool)
    .await
    .expect("failed to insert test user")
}

/// Insert a post directly, bypassing the service layer.
pub async fn create_post(pool: &PgPool, user_id: Uuid, caption: Option<&str>) -> Post {
    sqlx::query_as::<_, Post>(
        r#"
        INSERT INTO posts (user_id, image_key, caption)
        VALUES ($1, $2, $3)
        RETURNING id, user_id, image_key, caption, created_at, updated_at
        "#,
    )
    .bind(user_id)
    .bind(format!("posts/{}.jpg", Uuid::new_v4()))
    .bind(caption)
    .fetch_one(pool)
    .await
    .expect("failed to insert test post")
}

/// Remove a user and (via cascades) everything they created.
pub async fn delete_user(pool: &PgPool, user_id: Uuid) {
    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user_id)
        .execute(pool)
        .await
        .expect("failed to delete test user");
}
