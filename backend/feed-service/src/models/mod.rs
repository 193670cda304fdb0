//! Entities and response shapes for the feed service.
//!
//! Database rows derive `sqlx::FromRow`; the API structs below them are
//! what handlers serialize. Timestamps cross the wire as RFC 3339 strings
//! and all identifiers as UUID strings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// ============================================
// Database entities
// ============================================

/// A user row. Provisioned by the external identity sync; `external_id`
/// is the provider subject, `id` is the join key for everything else.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub external_id: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub user_id: Uuid,
    pub image_key: String,
    pub caption: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Like {
    pub id: Uuid,
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Per-post engagement counts, read from the `post_stats` view.
#[derive(Debug, Clone, FromRow)]
pub struct PostStats {
    pub post_id: Uuid,
    pub like_count: i64,
    pub comment_count: i64,
}

/// Per-user aggregate counts, read from the `user_stats` view.
#[derive(Debug, Clone, FromRow)]
pub struct UserStats {
    pub user_id: Uuid,
    pub post_count: i64,
    pub followers_count: i64,
    pub following_count: i64,
}

/// A post row joined with its author's username.
#[derive(Debug, Clone, FromRow)]
pub struct PostWithAuthor {
    pub id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub image_key: String,
    pub caption: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A comment row joined with its author's username.
#[derive(Debug, Clone, FromRow)]
pub struct CommentWithAuthor {
    pub id: Uuid,
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

// ============================================
// API responses
// ============================================

#[derive(Debug, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: String,
    pub username: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: String,
    pub user: UserSummary,
    pub image_url: String,
    pub caption: Option<String>,
    pub like_count: i64,
    pub comment_count: i64,
    /// Present only when the request carried a session
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_liked: Option<bool>,
    pub created_at: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FeedResponse {
    pub posts: Vec<PostResponse>,
    pub total_count: i64,
    pub has_more: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: String,
    pub post_id: String,
    pub user: UserSummary,
    pub content: String,
    pub created_at: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CommentListResponse {
    pub comments: Vec<CommentResponse>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LikeResponse {
    pub id: String,
    pub post_id: String,
    pub user_id: String,
    pub created_at: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub id: String,
    pub username: String,
    pub post_count: i64,
    pub followers_count: i64,
    pub following_count: i64,
    /// Present only when the request carried a session
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_following: Option<bool>,
    pub created_at: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FollowStatusResponse {
    pub following_id: String,
    pub is_following: bool,
}

/// Generic acknowledgement for toggle-style mutations
#[derive(Debug, Serialize, Deserialize)]
pub struct ActionResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserListResponse {
    pub users: Vec<UserSummary>,
    pub limit: i64,
    pub offset: i64,
}

/// Ticket for a client-side presigned upload; the client PUTs the bytes to
/// `upload_url`, then creates the post with `image_key`.
#[derive(Debug, Serialize, Deserialize)]
pub struct UploadTicketResponse {
    pub upload_url: String,
    pub image_key: String,
    pub expires_in_secs: u64,
}
