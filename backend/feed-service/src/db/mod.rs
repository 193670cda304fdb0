//! Data access layer: one module per table, plus the aggregation views.
//!
//! Functions here speak `sqlx::Error`; the service layer maps store
//! failures onto the API error taxonomy.

pub mod comment_repo;
pub mod follow_repo;
pub mod like_repo;
pub mod post_repo;
pub mod stats_repo;
pub mod user_repo;
