use crate::models::User;
use sqlx::PgPool;
use uuid::Uuid;

/// Find a user by the identity provider's subject id.
///
/// Users are written by the identity-sync worker; this service never
/// creates them. A valid session with no row here means sync lag and is
/// surfaced to the caller, not treated as anonymous.
pub async fn find_by_external_id(
    pool: &PgPool,
    external_id: &str,
) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, external_id, username, created_at
        FROM users
        WHERE external_id = $1
        "#,
    )
    .bind(external_id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Find a user by internal id.
pub async fn find_by_id(pool: &PgPool, user_id: Uuid) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, external_id, username, created_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Check that a user row exists.
pub async fn exists(pool: &PgPool, user_id: Uuid) -> Result<bool, sqlx::Error> {
    let row: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
        .bind(user_id)
        .fetch_one(pool)
        .await?;

    Ok(row.0)
}
