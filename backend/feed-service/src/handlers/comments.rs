/// Comment handlers - HTTP endpoints for comment operations
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::middleware::SessionIdentity;
use crate::models::ActionResponse;
use crate::services::{identity, CommentService};

#[derive(Debug, Deserialize)]
pub struct CommentListQuery {
    pub post_id: Uuid,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub post_id: Uuid,
    pub content: String,
}

/// List comments for a post, newest first
/// GET /api/v1/comments?post_id=...&limit=20
pub async fn list_comments(
    pool: web::Data<PgPool>,
    query: web::Query<CommentListQuery>,
) -> Result<HttpResponse> {
    let service = CommentService::new((**pool).clone());
    let comments = service.list_comments(query.post_id, query.limit).await?;

    Ok(HttpResponse::Ok().json(comments))
}

/// Create a new comment
/// POST /api/v1/comments
pub async fn create_comment(
    pool: web::Data<PgPool>,
    session: SessionIdentity,
    req: web::Json<CreateCommentRequest>,
) -> Result<HttpResponse> {
    let caller = identity::resolve_caller(&pool, &session).await?;

    let service = CommentService::new((**pool).clone());
    let comment = service.add_comment(req.post_id, &caller, &req.content).await?;

    Ok(HttpResponse::Created().json(comment))
}

/// Delete a comment (author only)
/// DELETE /api/v1/comments/{comment_id}
pub async fn delete_comment(
    pool: web::Data<PgPool>,
    session: SessionIdentity,
    comment_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let caller = identity::resolve_caller(&pool, &session).await?;

    let service = CommentService::new((**pool).clone());
    service.delete_comment(*comment_id, caller.id).await?;

    Ok(HttpResponse::Ok().json(ActionResponse {
        success: true,
        message: "comment deleted".to_string(),
    }))
}
