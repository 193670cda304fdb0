use crate::models::{Comment, CommentWithAuthor};
use sqlx::PgPool;
use uuid::Uuid;

/// Create a new comment. Post existence is verified by the service first,
/// so a foreign-key failure here is a genuine internal error.
pub async fn insert_comment(
    pool: &PgPool,
    post_id: Uuid,
    user_id: Uuid,
    content: &str,
) -> Result<Comment, sqlx::Error> {
    let comment = sqlx::query_as::<_, Comment>(
        r#"
        INSERT INTO comments (post_id, user_id, content)
        VALUES ($1, $2, $3)
        RETURNING id, post_id, user_id, content, created_at, updated_at
        "#,
    )
    .bind(post_id)
    .bind(user_id)
    .bind(content)
    .fetch_one(pool)
    .await?;

    Ok(comment)
}

/// Comments for a post, newest first, authors joined in.
///
/// The same query serves the two-comment preview under a post and the full
/// thread view; only the limit differs.
pub async fn list_by_post(
    pool: &PgPool,
    post_id: Uuid,
    limit: i64,
) -> Result<Vec<CommentWithAuthor>, sqlx::Error> {
    let comments = sqlx::query_as::<_, CommentWithAuthor>(
        r#"
        SELECT c.id, c.post_id, c.user_id, u.username, c.content, c.created_at
        FROM comments c
        JOIN users u ON u.id = c.user_id
        WHERE c.post_id = $1
        ORDER BY c.created_at DESC, c.id DESC
        LIMIT $2
        "#,
    )
    .bind(post_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(comments)
}

/// Delete a comment, scoped to its author in a single statement so there is
/// no read-then-write race. Zero rows means absent or not yours.
pub async fn delete_owned(
    pool: &PgPool,
    comment_id: Uuid,
    user_id: Uuid,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM comments WHERE id = $1 AND user_id = $2")
        .bind(comment_id)
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
