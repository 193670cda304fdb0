/// Follow handlers - directed edges between users
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::middleware::SessionIdentity;
use crate::models::ActionResponse;
use crate::services::{identity, EngagementService};

#[derive(Debug, Deserialize)]
pub struct FollowRequest {
    pub following_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct FollowQuery {
    pub following_id: Uuid,
}

/// Follow a user
/// POST /api/v1/follows
pub async fn follow_user(
    pool: web::Data<PgPool>,
    session: SessionIdentity,
    req: web::Json<FollowRequest>,
) -> Result<HttpResponse> {
    let caller = identity::resolve_caller(&pool, &session).await?;

    let service = EngagementService::new((**pool).clone());
    service.follow(caller.id, req.following_id).await?;

    Ok(HttpResponse::Created().json(ActionResponse {
        success: true,
        message: format!("now following {}", req.following_id),
    }))
}

/// Unfollow a user
/// DELETE /api/v1/follows?following_id=...
pub async fn unfollow_user(
    pool: web::Data<PgPool>,
    session: SessionIdentity,
    query: web::Query<FollowQuery>,
) -> Result<HttpResponse> {
    let caller = identity::resolve_caller(&pool, &session).await?;

    let service = EngagementService::new((**pool).clone());
    service.unfollow(caller.id, query.following_id).await?;

    Ok(HttpResponse::Ok().json(ActionResponse {
        success: true,
        message: format!("unfollowed {}", query.following_id),
    }))
}

/// Check whether the caller follows a user
/// GET /api/v1/follows?following_id=...
pub async fn follow_status(
    pool: web::Data<PgPool>,
    session: SessionIdentity,
    query: web::Query<FollowQuery>,
) -> Result<HttpResponse> {
    let caller = identity::resolve_caller(&pool, &session).await?;

    let service = EngagementService::new((**pool).clone());
    let status = service.follow_status(caller.id, query.following_id).await?;

    Ok(HttpResponse::Ok().json(status))
}
