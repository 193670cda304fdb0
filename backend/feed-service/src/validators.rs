//! Boundary validation helpers.
//!
//! Every request body is normalized here before it reaches a repository;
//! handlers never probe loose JSON for optional fields.

use crate::error::AppError;

/// Instagram-compatible caption ceiling.
pub const MAX_CAPTION_LEN: usize = 2200;
/// Hard cap on any page size a client can request.
pub const MAX_PAGE_LIMIT: i64 = 100;
/// Feed page size when the client does not ask for one.
pub const DEFAULT_FEED_LIMIT: i64 = 10;
/// Comment page size when the client does not ask for one.
pub const DEFAULT_COMMENT_LIMIT: i64 = 20;

/// Trim a caption; empty becomes `None`, oversized is rejected.
///
/// The database carries the same length check, but enforcing it here keeps
/// the client-visible error a 400 instead of a mapped store failure.
pub fn normalize_caption(caption: Option<&str>) -> Result<Option<String>, AppError> {
    match caption {
        None => Ok(None),
        Some(raw) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            if trimmed.chars().count() > MAX_CAPTION_LEN {
                return Err(AppError::Validation(format!(
                    "caption exceeds {} characters",
                    MAX_CAPTION_LEN
                )));
            }
            Ok(Some(trimmed.to_string()))
        }
    }
}

/// Trim comment content; empty after trimming is rejected.
pub fn normalize_comment(content: &str) -> Result<String, AppError> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(
            "comment content must not be empty".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

/// Clamp pagination parameters to [1, MAX_PAGE_LIMIT] and offset >= 0.
pub fn clamp_page(limit: Option<i64>, offset: Option<i64>, default_limit: i64) -> (i64, i64) {
    let limit = limit.unwrap_or(default_limit).clamp(1, MAX_PAGE_LIMIT);
    let offset = offset.unwrap_or(0).max(0);
    (limit, offset)
}

/// An image key must be a plain object key: non-empty, bounded, no path
/// escapes and no whitespace.
pub fn validate_image_key(key: &str) -> Result<(), AppError> {
    if key.is_empty() || key.len() > 512 {
        return Err(AppError::Validation(
            "image_key must be between 1 and 512 characters".to_string(),
        ));
    }
    if key.contains("..") || key.starts_with('/') || key.chars().any(char::is_whitespace) {
        return Err(AppError::Validation(
            "image_key contains invalid characters".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caption_trims_and_nullifies_empty() {
        assert_eq!(normalize_caption(None).unwrap(), None);
        assert_eq!(normalize_caption(Some("   ")).unwrap(), None);
        assert_eq!(
            normalize_caption(Some("  hello ")).unwrap(),
            Some("hello".to_string())
        );
    }

    #[test]
    fn caption_rejects_oversized() {
        let big = "a".repeat(MAX_CAPTION_LEN + 1);
        assert!(normalize_caption(Some(&big)).is_err());
        let max = "a".repeat(MAX_CAPTION_LEN);
        assert!(normalize_caption(Some(&max)).is_ok());
    }

    #[test]
    fn comment_rejects_whitespace_only() {
        assert!(normalize_comment("\n\t  ").is_err());
        assert_eq!(normalize_comment(" nice ").unwrap(), "nice");
    }

    #[test]
    fn page_clamping() {
        assert_eq!(clamp_page(None, None, DEFAULT_FEED_LIMIT), (10, 0));
        assert_eq!(clamp_page(Some(0), Some(-5), 10), (1, 0));
        assert_eq!(clamp_page(Some(5000), Some(30), 10), (MAX_PAGE_LIMIT, 30));
        assert_eq!(clamp_page(Some(2), None, 20), (2, 0));
    }

    #[test]
    fn image_key_shapes() {
        assert!(validate_image_key("posts/abc.jpg").is_ok());
        assert!(validate_image_key("").is_err());
        assert!(validate_image_key("/etc/passwd").is_err());
        assert!(validate_image_key("a/../b").is_err());
        assert!(validate_image_key("has space").is_err());
        assert!(validate_image_key(&"k".repeat(513)).is_err());
    }
}
