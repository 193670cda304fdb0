//! Maps verified sessions to internal user rows.
//!
//! The middleware has already verified the bearer token by the time these
//! run; what's left is the external-id -> internal-id lookup. A session
//! whose subject has no row yet (identity sync lag) is reported as 404,
//! never silently downgraded to an anonymous request.

use sqlx::PgPool;

use crate::db::user_repo;
use crate::error::{AppError, Result};
use crate::middleware::{MaybeSession, SessionIdentity};
use crate::models::User;

/// Resolve a required session to its internal user.
pub async fn resolve_caller(pool: &PgPool, session: &SessionIdentity) -> Result<User> {
    user_repo::find_by_external_id(pool, &session.external_id)
        .await?
        .ok_or_else(|| {
            tracing::warn!(external_id = %session.external_id, "session has no provisioned user row");
            AppError::NotFound("user record not provisioned for this session".to_string())
        })
}

/// Resolve an optional session. `None` stays `None`; a present session is
/// resolved with the same sync-lag semantics as `resolve_caller`.
pub async fn resolve_viewer(pool: &PgPool, session: &MaybeSession) -> Result<Option<User>> {
    match &session.0 {
        None => Ok(None),
        Some(identity) => resolve_caller(pool, identity).await.map(Some),
    }
}
