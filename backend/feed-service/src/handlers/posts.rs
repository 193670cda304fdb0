/// Post handlers - HTTP endpoints for the feed and single posts
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::Result;
use crate::handlers::PageParams;
use crate::middleware::{MaybeSession, SessionIdentity};
use crate::models::ActionResponse;
use crate::services::{identity, ObjectStorage, PostService};

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub image_key: String,
    pub caption: Option<String>,
}

/// List the feed, newest first
/// GET /api/v1/posts?limit=10&offset=0
pub async fn list_feed(
    pool: web::Data<PgPool>,
    storage: web::Data<Arc<ObjectStorage>>,
    session: MaybeSession,
    query: web::Query<PageParams>,
) -> Result<HttpResponse> {
    let viewer = identity::resolve_viewer(&pool, &session).await?.map(|u| u.id);

    let service = PostService::new((**pool).clone(), storage.get_ref().clone());
    let feed = service.feed(query.limit, query.offset, viewer).await?;

    Ok(HttpResponse::Ok().json(feed))
}

/// Get a post by ID
/// GET /api/v1/posts/{post_id}
pub async fn get_post(
    pool: web::Data<PgPool>,
    storage: web::Data<Arc<ObjectStorage>>,
    session: MaybeSession,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let viewer = identity::resolve_viewer(&pool, &session).await?.map(|u| u.id);

    let service = PostService::new((**pool).clone(), storage.get_ref().clone());
    let post = service.get_post(*post_id, viewer).await?;

    Ok(HttpResponse::Ok().json(post))
}

/// Create a post for a previously uploaded image
/// POST /api/v1/posts
pub async fn create_post(
    pool: web::Data<PgPool>,
    storage: web::Data<Arc<ObjectStorage>>,
    session: SessionIdentity,
    req: web::Json<CreatePostRequest>,
) -> Result<HttpResponse> {
    let caller = identity::resolve_caller(&pool, &session).await?;

    let service = PostService::new((**pool).clone(), storage.get_ref().clone());
    let post = service
        .create_post(&caller, &req.image_key, req.caption.as_deref())
        .await?;

    Ok(HttpResponse::Created().json(post))
}

/// Delete a post (owner only)
/// DELETE /api/v1/posts/{post_id}
pub async fn delete_post(
    pool: web::Data<PgPool>,
    storage: web::Data<Arc<ObjectStorage>>,
    session: SessionIdentity,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let caller = identity::resolve_caller(&pool, &session).await?;

    let service = PostService::new((**pool).clone(), storage.get_ref().clone());
    service.delete_post(*post_id, caller.id).await?;

    Ok(HttpResponse::Ok().json(ActionResponse {
        success: true,
        message: "post deleted".to_string(),
    }))
}
