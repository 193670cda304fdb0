/// Like handlers - the two-state toggle over (user, post)
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::middleware::SessionIdentity;
use crate::models::ActionResponse;
use crate::services::{identity, EngagementService};

#[derive(Debug, Deserialize)]
pub struct LikeRequest {
    pub post_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct UnlikeQuery {
    pub post_id: Uuid,
}

/// Like a post. A duplicate like is a 409; the optimistic client treats it
/// as already-applied.
/// POST /api/v1/likes
pub async fn like_post(
    pool: web::Data<PgPool>,
    session: SessionIdentity,
    req: web::Json<LikeRequest>,
) -> Result<HttpResponse> {
    let caller = identity::resolve_caller(&pool, &session).await?;

    let service = EngagementService::new((**pool).clone());
    let like = service.like(caller.id, req.post_id).await?;

    Ok(HttpResponse::Created().json(like))
}

/// Unlike a post; removing an absent like still succeeds.
/// DELETE /api/v1/likes?post_id=...
pub async fn unlike_post(
    pool: web::Data<PgPool>,
    session: SessionIdentity,
    query: web::Query<UnlikeQuery>,
) -> Result<HttpResponse> {
    let caller = identity::resolve_caller(&pool, &session).await?;

    let service = EngagementService::new((**pool).clone());
    service.unlike(caller.id, query.post_id).await?;

    Ok(HttpResponse::Ok().json(ActionResponse {
        success: true,
        message: "post unliked".to_string(),
    }))
}
