/// Post service - creation, retrieval, feed pages, deletion
use std::collections::HashMap;
use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{like_repo, post_repo, stats_repo, user_repo};
use crate::error::{AppError, Result};
use crate::models::{FeedResponse, PostResponse, PostWithAuthor, User, UserSummary};
use crate::services::storage::ObjectStorage;
use crate::validators;

pub struct PostService {
    pool: PgPool,
    storage: Arc<ObjectStorage>,
}

impl PostService {
    pub fn new(pool: PgPool, storage: Arc<ObjectStorage>) -> Self {
        Self { pool, storage }
    }

    /// Create a post for an uploaded image.
    pub async fn create_post(
        &self,
        owner: &User,
        image_key: &str,
        caption: Option<&str>,
    ) -> Result<PostResponse> {
        validators::validate_image_key(image_key)?;
        let caption = validators::normalize_caption(caption)?;

        let post = post_repo::create_post(&self.pool, owner.id, image_key, caption.as_deref())
            .await?;

        tracing::info!(post_id = %post.id, user_id = %owner.id, "post created");

        Ok(PostResponse {
            id: post.id.to_string(),
            user: UserSummary::from(owner),
            image_url: self.storage.public_url(&post.image_key),
            caption: post.caption,
            like_count: 0,
            comment_count: 0,
            is_liked: Some(false),
            created_at: post.created_at.to_rfc3339(),
        })
    }

    /// Fetch one post with author, engagement counts, and the viewer's
    /// like state when a viewer is present.
    pub async fn get_post(&self, post_id: Uuid, viewer: Option<Uuid>) -> Result<PostResponse> {
        let post = post_repo::find_post_with_author(&self.pool, post_id)
            .await?
            .ok_or_else(|| AppError::NotFound("post not found".to_string()))?;

        let mut annotated = self.annotate(vec![post], viewer).await?;
        Ok(annotated.remove(0))
    }

    /// The global feed: newest first with an exact has_more boundary.
    pub async fn feed(
        &self,
        limit: Option<i64>,
        offset: Option<i64>,
        viewer: Option<Uuid>,
    ) -> Result<FeedResponse> {
        let (limit, offset) =
            validators::clamp_page(limit, offset, validators::DEFAULT_FEED_LIMIT);

        let rows = post_repo::list_posts(&self.pool, limit, offset).await?;
        let total_count = post_repo::count_posts(&self.pool).await?;
        let has_more = offset + (rows.len() as i64) < total_count;

        let posts = self.annotate(rows, viewer).await?;

        Ok(FeedResponse {
            posts,
            total_count,
            has_more,
        })
    }

    /// One user's posts, same page contract as the feed.
    pub async fn user_posts(
        &self,
        user_id: Uuid,
        limit: Option<i64>,
        offset: Option<i64>,
        viewer: Option<Uuid>,
    ) -> Result<FeedResponse> {
        if !user_repo::exists(&self.pool, user_id).await? {
            return Err(AppError::NotFound("user not found".to_string()));
        }

        let (limit, offset) =
            validators::clamp_page(limit, offset, validators::DEFAULT_FEED_LIMIT);

        let rows = post_repo::list_posts_by_user(&self.pool, user_id, limit, offset).await?;
        let total_count = post_repo::count_posts_by_user(&self.pool, user_id).await?;
        let has_more = offset + (rows.len() as i64) < total_count;

        let posts = self.annotate(rows, viewer).await?;

        Ok(FeedResponse {
            posts,
            total_count,
            has_more,
        })
    }

    /// Delete a post: owner only. The stored image is removed best-effort
    /// before the row; a storage failure is logged and never blocks the
    /// delete. The row delete stays scoped to the owner so a racing second
    /// delete resolves to NotFound instead of removing twice.
    pub async fn delete_post(&self, post_id: Uuid, caller: Uuid) -> Result<()> {
        let post = post_repo::find_post_by_id(&self.pool, post_id)
            .await?
            .ok_or_else(|| AppError::NotFound("post not found".to_string()))?;

        if post.user_id != caller {
            return Err(AppError::Authorization(
                "only the author can delete this post".to_string(),
            ));
        }

        if let Err(err) = self.storage.delete_object(&post.image_key).await {
            tracing::warn!(post_id = %post_id, image_key = %post.image_key, "image delete failed: {}", err);
        }

        let deleted = post_repo::delete_post_owned(&self.pool, post_id, caller).await?;
        if deleted == 0 {
            return Err(AppError::NotFound("post not found".to_string()));
        }

        tracing::info!(post_id = %post_id, user_id = %caller, "post deleted");
        Ok(())
    }

    /// Join a page of posts with engagement counts and the viewer's likes.
    async fn annotate(
        &self,
        rows: Vec<PostWithAuthor>,
        viewer: Option<Uuid>,
    ) -> Result<Vec<PostResponse>> {
        let post_ids: Vec<Uuid> = rows.iter().map(|p| p.id).collect();

        let stats: HashMap<Uuid, (i64, i64)> =
            stats_repo::post_stats_batch(&self.pool, &post_ids)
                .await?
                .into_iter()
                .map(|s| (s.post_id, (s.like_count, s.comment_count)))
                .collect();

        let liked = match viewer {
            Some(viewer_id) => {
                Some(like_repo::liked_post_ids(&self.pool, viewer_id, &post_ids).await?)
            }
            None => None,
        };

        Ok(rows
            .into_iter()
            .map(|row| {
                let (like_count, comment_count) =
                    stats.get(&row.id).copied().unwrap_or((0, 0));
                PostResponse {
                    id: row.id.to_string(),
                    user: UserSummary {
                        id: row.user_id.to_string(),
                        username: row.username,
                    },
                    image_url: self.storage.public_url(&row.image_key),
                    caption: row.caption,
                    like_count,
                    comment_count,
                    is_liked: liked.as_ref().map(|set| set.contains(&row.id)),
                    created_at: row.created_at.to_rfc3339(),
                }
            })
            .collect())
    }
}
