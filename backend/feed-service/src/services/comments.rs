/// Comment service - creation, listing, author-scoped deletion
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{comment_repo, post_repo};
use crate::error::{is_foreign_key_violation, AppError, Result};
use crate::models::{CommentListResponse, CommentResponse, User, UserSummary};
use crate::validators;

pub struct CommentService {
    pool: PgPool,
}

impl CommentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Add a comment to an existing post.
    ///
    /// Post existence is verified up front so a missing post is a clean
    /// 404; the residual race (post deleted mid-flight) is caught by the
    /// foreign key and mapped to the same 404.
    pub async fn add_comment(
        &self,
        post_id: Uuid,
        author: &User,
        content: &str,
    ) -> Result<CommentResponse> {
        let content = validators::normalize_comment(content)?;

        if !post_repo::exists(&self.pool, post_id).await? {
            return Err(AppError::NotFound("post not found".to_string()));
        }

        let comment = comment_repo::insert_comment(&self.pool, post_id, author.id, &content)
            .await
            .map_err(|err| {
                if is_foreign_key_violation(&err) {
                    AppError::NotFound("post not found".to_string())
                } else {
                    AppError::from(err)
                }
            })?;

        tracing::info!(comment_id = %comment.id, post_id = %post_id, "comment created");

        Ok(CommentResponse {
            id: comment.id.to_string(),
            post_id: comment.post_id.to_string(),
            user: UserSummary::from(author),
            content: comment.content,
            created_at: comment.created_at.to_rfc3339(),
        })
    }

    /// Comments for a post, newest first. Serves both the inline preview
    /// (limit 2) and the full thread (limit up to 100); a deleted or
    /// unknown post yields an empty list.
    pub async fn list_comments(
        &self,
        post_id: Uuid,
        limit: Option<i64>,
    ) -> Result<CommentListResponse> {
        let (limit, _) =
            validators::clamp_page(limit, None, validators::DEFAULT_COMMENT_LIMIT);

        let comments = comment_repo::list_by_post(&self.pool, post_id, limit)
            .await?
            .into_iter()
            .map(|row| CommentResponse {
                id: row.id.to_string(),
                post_id: row.post_id.to_string(),
                user: UserSummary {
                    id: row.user_id.to_string(),
                    username: row.username,
                },
                content: row.content,
                created_at: row.created_at.to_rfc3339(),
            })
            .collect();

        Ok(CommentListResponse { comments })
    }

    /// Delete a comment. The delete is scoped to the author in one
    /// statement; zero rows means absent-or-not-yours and reads as 404.
    pub async fn delete_comment(&self, comment_id: Uuid, caller: Uuid) -> Result<()> {
        let deleted = comment_repo::delete_owned(&self.pool, comment_id, caller).await?;
        if deleted == 0 {
            return Err(AppError::NotFound("comment not found".to_string()));
        }

        tracing::info!(comment_id = %comment_id, user_id = %caller, "comment deleted");
        Ok(())
    }
}
