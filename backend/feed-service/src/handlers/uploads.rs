/// Upload handlers - presigned tickets for direct-to-storage image uploads
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use std::sync::Arc;

use crate::error::Result;
use crate::middleware::SessionIdentity;
use crate::services::{identity, ObjectStorage};

#[derive(Debug, Deserialize)]
pub struct CreateUploadRequest {
    pub content_type: String,
}

/// Issue a presigned PUT URL for an image upload. The client uploads the
/// bytes directly to the store, then creates the post with the returned
/// image_key.
/// POST /api/v1/uploads
pub async fn create_upload(
    pool: web::Data<PgPool>,
    storage: web::Data<Arc<ObjectStorage>>,
    session: SessionIdentity,
    req: web::Json<CreateUploadRequest>,
) -> Result<HttpResponse> {
    // Only provisioned users get upload tickets.
    identity::resolve_caller(&pool, &session).await?;

    let ticket = storage.presign_upload(&req.content_type).await?;

    Ok(HttpResponse::Created().json(ticket))
}
