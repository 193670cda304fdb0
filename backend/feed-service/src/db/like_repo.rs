use crate::models::Like;
use sqlx::PgPool;
use std::collections::HashSet;
use uuid::Uuid;

/// Insert a like edge. The unique (post_id, user_id) constraint is the
/// arbiter for duplicates: a conflicting insert affects zero rows and
/// returns `None`, which the service surfaces as a 409.
pub async fn insert_like(
    pool: &PgPool,
    post_id: Uuid,
    user_id: Uuid,
) -> Result<Option<Like>, sqlx::Error> {
    let like = sqlx::query_as::<_, Like>(
        r#"
        INSERT INTO likes (post_id, user_id)
        VALUES ($1, $2)
        ON CONFLICT (post_id, user_id) DO NOTHING
        RETURNING id, post_id, user_id, created_at
        "#,
    )
    .bind(post_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(like)
}

/// Delete a like edge. Removing a non-existent edge is a no-op.
pub async fn delete_like(pool: &PgPool, post_id: Uuid, user_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM likes WHERE post_id = $1 AND user_id = $2")
        .bind(post_id)
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// Which of the given posts has this user liked?
pub async fn liked_post_ids(
    pool: &PgPool,
    user_id: Uuid,
    post_ids: &[Uuid],
) -> Result<HashSet<Uuid>, sqlx::Error> {
    if post_ids.is_empty() {
        return Ok(HashSet::new());
    }

    let rows = sqlx::query_as::<_, (Uuid,)>(
        r#"
        SELECT post_id
        FROM likes
        WHERE user_id = $1 AND post_id = ANY($2)
        "#,
    )
    .bind(user_id)
    .bind(post_ids)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|(id,)| id).collect())
}
