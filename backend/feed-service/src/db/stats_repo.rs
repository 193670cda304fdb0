/// Engagement aggregation, read from the `post_stats` and `user_stats`
/// views. Nothing here is cached: every call recomputes from the source
/// tables, so a toggle followed by a stats read always reflects the toggle.
use crate::models::{PostStats, UserStats};
use sqlx::PgPool;
use uuid::Uuid;

/// Like/comment counts for a set of posts.
pub async fn post_stats_batch(
    pool: &PgPool,
    post_ids: &[Uuid],
) -> Result<Vec<PostStats>, sqlx::Error> {
    if post_ids.is_empty() {
        return Ok(Vec::new());
    }

    let stats = sqlx::query_as::<_, PostStats>(
        r#"
        SELECT post_id, like_count, comment_count
        FROM post_stats
        WHERE post_id = ANY($1)
        "#,
    )
    .bind(post_ids)
    .fetch_all(pool)
    .await?;

    Ok(stats)
}

/// Post/follower/following counts for one user.
pub async fn user_stats(pool: &PgPool, user_id: Uuid) -> Result<Option<UserStats>, sqlx::Error> {
    let stats = sqlx::query_as::<_, UserStats>(
        r#"
        SELECT user_id, post_count, followers_count, following_count
        FROM user_stats
        WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(stats)
}
