/// Engagement edges: likes and follows.
///
/// Both toggles share the same shape: an existence check for a clean 404,
/// then a single conflict-tolerant insert or a scoped delete. The unique
/// constraints in the store arbitrate every race; zero affected rows on
/// insert is the duplicate signal and maps to 409 for the optimistic UI to
/// reconcile against.
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{follow_repo, like_repo, post_repo, user_repo};
use crate::error::{is_foreign_key_violation, AppError, Result};
use crate::models::{FollowStatusResponse, LikeResponse, UserListResponse};
use crate::validators;

pub struct EngagementService {
    pool: PgPool,
}

impl EngagementService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ============================================
    // Likes
    // ============================================

    /// Like a post. Duplicate likes surface as Conflict, not errors.
    pub async fn like(&self, caller: Uuid, post_id: Uuid) -> Result<LikeResponse> {
        if !post_repo::exists(&self.pool, post_id).await? {
            return Err(AppError::NotFound("post not found".to_string()));
        }

        let like = like_repo::insert_like(&self.pool, post_id, caller)
            .await
            .map_err(|err| {
                if is_foreign_key_violation(&err) {
                    AppError::NotFound("post not found".to_string())
                } else {
                    AppError::from(err)
                }
            })?
            .ok_or_else(|| AppError::Conflict("post already liked".to_string()))?;

        Ok(LikeResponse {
            id: like.id.to_string(),
            post_id: like.post_id.to_string(),
            user_id: like.user_id.to_string(),
            created_at: like.created_at.to_rfc3339(),
        })
    }

    /// Unlike a post. Removing an absent edge is a silent no-op.
    pub async fn unlike(&self, caller: Uuid, post_id: Uuid) -> Result<()> {
        like_repo::delete_like(&self.pool, post_id, caller).await?;
        Ok(())
    }

    // ============================================
    // Follows
    // ============================================

    /// Follow a user. Self-follows are rejected before any mutation; the
    /// database check constraint backs the same rule authoritatively.
    pub async fn follow(&self, follower: Uuid, following_id: Uuid) -> Result<()> {
        if follower == following_id {
            return Err(AppError::Validation(
                "cannot follow yourself".to_string(),
            ));
        }

        if !user_repo::exists(&self.pool, following_id).await? {
            return Err(AppError::NotFound("user not found".to_string()));
        }

        let inserted = follow_repo::insert_follow(&self.pool, follower, following_id)
            .await
            .map_err(|err| {
                if is_foreign_key_violation(&err) {
                    AppError::NotFound("user not found".to_string())
                } else {
                    AppError::from(err)
                }
            })?;

        if !inserted {
            return Err(AppError::Conflict("already following".to_string()));
        }

        tracing::info!(follower = %follower, following = %following_id, "follow created");
        Ok(())
    }

    /// Unfollow a user; removing a non-edge reads as 404.
    pub async fn unfollow(&self, follower: Uuid, following_id: Uuid) -> Result<()> {
        let removed = follow_repo::delete_follow(&self.pool, follower, following_id).await?;
        if removed == 0 {
            return Err(AppError::NotFound("follow relationship not found".to_string()));
        }

        tracing::info!(follower = %follower, following = %following_id, "follow removed");
        Ok(())
    }

    /// Current follow state, used standalone and embedded in profiles.
    pub async fn follow_status(
        &self,
        follower: Uuid,
        following_id: Uuid,
    ) -> Result<FollowStatusResponse> {
        if !user_repo::exists(&self.pool, following_id).await? {
            return Err(AppError::NotFound("user not found".to_string()));
        }

        let is_following = follow_repo::is_following(&self.pool, follower, following_id).await?;

        Ok(FollowStatusResponse {
            following_id: following_id.to_string(),
            is_following,
        })
    }

    /// Paginated followers of a user.
    pub async fn followers(
        &self,
        user_id: Uuid,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<UserListResponse> {
        if !user_repo::exists(&self.pool, user_id).await? {
            return Err(AppError::NotFound("user not found".to_string()));
        }

        let (limit, offset) =
            validators::clamp_page(limit, offset, validators::DEFAULT_COMMENT_LIMIT);
        let users = follow_repo::list_followers(&self.pool, user_id, limit, offset).await?;

        Ok(UserListResponse {
            users,
            limit,
            offset,
        })
    }

    /// Paginated accounts a user follows.
    pub async fn following(
        &self,
        user_id: Uuid,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<UserListResponse> {
        if !user_repo::exists(&self.pool, user_id).await? {
            return Err(AppError::NotFound("user not found".to_string()));
        }

        let (limit, offset) =
            validators::clamp_page(limit, offset, validators::DEFAULT_COMMENT_LIMIT);
        let users = follow_repo::list_following(&self.pool, user_id, limit, offset).await?;

        Ok(UserListResponse {
            users,
            limit,
            offset,
        })
    }
}
