/// User handlers - profiles, profile grids, follower lists
use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::db::{follow_repo, stats_repo, user_repo};
use crate::error::{AppError, Result};
use crate::handlers::PageParams;
use crate::middleware::{MaybeSession, SessionIdentity};
use crate::models::{ProfileResponse, User};
use crate::services::{identity, EngagementService, ObjectStorage, PostService};

/// Get a user's profile with aggregate counts
/// GET /api/v1/users/{user_id}
pub async fn get_profile(
    pool: web::Data<PgPool>,
    session: MaybeSession,
    user_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let viewer = identity::resolve_viewer(&pool, &session).await?;

    let user = user_repo::find_by_id(&pool, *user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("user not found".to_string()))?;

    let profile = build_profile(&pool, &user, viewer.as_ref()).await?;
    Ok(HttpResponse::Ok().json(profile))
}

/// Get the caller's own profile
/// GET /api/v1/users/me
pub async fn current_user(
    pool: web::Data<PgPool>,
    session: SessionIdentity,
) -> Result<HttpResponse> {
    let caller = identity::resolve_caller(&pool, &session).await?;

    let profile = build_profile(&pool, &caller, None).await?;
    Ok(HttpResponse::Ok().json(profile))
}

/// Get a user's posts, newest first
/// GET /api/v1/users/{user_id}/posts?limit=10&offset=0
pub async fn user_posts(
    pool: web::Data<PgPool>,
    storage: web::Data<Arc<ObjectStorage>>,
    session: MaybeSession,
    user_id: web::Path<Uuid>,
    query: web::Query<PageParams>,
) -> Result<HttpResponse> {
    let viewer = identity::resolve_viewer(&pool, &session).await?.map(|u| u.id);

    let service = PostService::new((**pool).clone(), storage.get_ref().clone());
    let page = service
        .user_posts(*user_id, query.limit, query.offset, viewer)
        .await?;

    Ok(HttpResponse::Ok().json(page))
}

/// Get a user's followers
/// GET /api/v1/users/{user_id}/followers?limit=20&offset=0
pub async fn followers(
    pool: web::Data<PgPool>,
    user_id: web::Path<Uuid>,
    query: web::Query<PageParams>,
) -> Result<HttpResponse> {
    let service = EngagementService::new((**pool).clone());
    let page = service.followers(*user_id, query.limit, query.offset).await?;

    Ok(HttpResponse::Ok().json(page))
}

/// Get the users a user follows
/// GET /api/v1/users/{user_id}/following?limit=20&offset=0
pub async fn following(
    pool: web::Data<PgPool>,
    user_id: web::Path<Uuid>,
    query: web::Query<PageParams>,
) -> Result<HttpResponse> {
    let service = EngagementService::new((**pool).clone());
    let page = service.following(*user_id, query.limit, query.offset).await?;

    Ok(HttpResponse::Ok().json(page))
}

/// Assemble a profile from the user row, the user_stats view, and (when a
/// viewer is present) the viewer's follow edge.
async fn build_profile(
    pool: &PgPool,
    user: &User,
    viewer: Option<&User>,
) -> Result<ProfileResponse> {
    let stats = stats_repo::user_stats(pool, user.id).await?;
    let (post_count, followers_count, following_count) = stats
        .map(|s| (s.post_count, s.followers_count, s.following_count))
        .unwrap_or((0, 0, 0));

    let is_following = match viewer {
        Some(viewer) => Some(follow_repo::is_following(pool, viewer.id, user.id).await?),
        None => None,
    };

    Ok(ProfileResponse {
        id: user.id.to_string(),
        username: user.username.clone(),
        post_count,
        followers_count,
        following_count,
        is_following,
        created_at: user.created_at.to_rfc3339(),
    })
}
