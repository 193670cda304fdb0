//! Object storage integration.
//!
//! Image bytes never pass through this service: clients upload directly to
//! the store with a presigned URL and hand back the object key. The only
//! write this service performs against the store is the best-effort delete
//! when a post is removed. Every outbound call carries a timeout so a slow
//! store surfaces as a distinct `Timeout` error instead of a hung request.

use std::time::Duration;

use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::Client;
use uuid::Uuid;

use crate::config::S3Config;
use crate::error::AppError;
use crate::models::UploadTicketResponse;

pub struct ObjectStorage {
    client: Client,
    bucket: String,
    public_base_url: String,
    presign_expiry: Duration,
    request_timeout: Duration,
}

impl ObjectStorage {
    /// Build an S3 client from the provided configuration.
    pub async fn from_config(config: &S3Config) -> Result<Self, AppError> {
        let credentials = Credentials::new(
            &config.aws_access_key_id,
            &config.aws_secret_access_key,
            None,
            None,
            "feed-service",
        );

        let shared_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials)
            .load()
            .await;

        let mut builder = aws_sdk_s3::config::Builder::from(&shared_config);
        if let Some(endpoint) = &config.endpoint {
            if !endpoint.trim().is_empty() {
                builder = builder.endpoint_url(endpoint);
            }
        }

        Ok(Self {
            client: Client::from_conf(builder.build()),
            bucket: config.bucket_name.clone(),
            public_base_url: config.public_base_url.clone(),
            presign_expiry: Duration::from_secs(config.presign_expiry_secs),
            request_timeout: Duration::from_millis(config.request_timeout_ms),
        })
    }

    /// Generate a presigned PUT URL for a new image object.
    pub async fn presign_upload(
        &self,
        content_type: &str,
    ) -> Result<UploadTicketResponse, AppError> {
        let image_key = new_object_key(content_type)?;

        let presign_cfg = PresigningConfig::builder()
            .expires_in(self.presign_expiry)
            .build()
            .map_err(|e| AppError::Internal(format!("failed to create presign config: {e}")))?;

        let request = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(&image_key)
            .content_type(content_type)
            .presigned(presign_cfg);

        let presigned = tokio::time::timeout(self.request_timeout, request)
            .await
            .map_err(|_| AppError::Timeout("object storage presign timed out".to_string()))?
            .map_err(|e| AppError::Internal(format!("failed to generate presigned URL: {e}")))?;

        Ok(UploadTicketResponse {
            upload_url: presigned.uri().to_string(),
            image_key,
            expires_in_secs: self.presign_expiry.as_secs(),
        })
    }

    /// Public URL that serves the given object key.
    pub fn public_url(&self, image_key: &str) -> String {
        join_public_url(&self.public_base_url, image_key)
    }

    /// Delete an object. Callers treat failures as best-effort: the error
    /// is returned for logging but must not abort the surrounding
    /// operation.
    pub async fn delete_object(&self, image_key: &str) -> Result<(), AppError> {
        let request = self
            .client
            .delete_object()
            .bucket(&self.bucket)
            .key(image_key)
            .send();

        tokio::time::timeout(self.request_timeout, request)
            .await
            .map_err(|_| AppError::Timeout("object storage delete timed out".to_string()))?
            .map_err(|e| AppError::Internal(format!("failed to delete object: {e}")))?;

        Ok(())
    }
}

/// Derive a fresh object key for an upload, keyed off the image type.
fn new_object_key(content_type: &str) -> Result<String, AppError> {
    let parsed: mime::Mime = content_type
        .parse()
        .map_err(|_| AppError::Validation(format!("invalid content type: {content_type}")))?;

    if parsed.type_() != mime::IMAGE {
        return Err(AppError::Validation(format!(
            "unsupported content type: {content_type}"
        )));
    }

    let ext = match parsed.subtype().as_str() {
        "jpeg" => "jpg",
        "png" => "png",
        "webp" => "webp",
        "gif" => "gif",
        other => {
            return Err(AppError::Validation(format!(
                "unsupported image format: {other}"
            )))
        }
    };

    Ok(format!("posts/{}.{}", Uuid::new_v4(), ext))
}

fn join_public_url(base: &str, key: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), key.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_keys_are_namespaced_and_typed() {
        let key = new_object_key("image/png").unwrap();
        assert!(key.starts_with("posts/"));
        assert!(key.ends_with(".png"));

        assert!(new_object_key("video/mp4").is_err());
        assert!(new_object_key("text/html").is_err());
    }

    #[test]
    fn public_url_joins_without_double_slashes() {
        assert_eq!(
            join_public_url("https://cdn.example/media/", "posts/a.jpg"),
            "https://cdn.example/media/posts/a.jpg"
        );
        assert_eq!(
            join_public_url("https://cdn.example/media", "/posts/a.jpg"),
            "https://cdn.example/media/posts/a.jpg"
        );
    }
}
