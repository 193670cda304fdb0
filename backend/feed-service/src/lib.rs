/// Feed Service Library
///
/// The Glimpse feed backend: posts, likes, comments, follows, and profiles
/// as thin handlers over PostgreSQL. Sessions are verified against the
/// external identity provider's public key; image bytes live in object
/// storage and are uploaded directly by clients with presigned URLs.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers and the route table
/// - `models`: row types and API response shapes
/// - `services`: business logic layer
/// - `db`: repositories over the tables and aggregation views
/// - `middleware`: session verification and request metrics
/// - `error`: error taxonomy and HTTP mapping
/// - `config`: environment-driven configuration
/// - `metrics`: Prometheus collectors and the /metrics endpoint
/// - `validators`: boundary validation helpers
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod services;
pub mod validators;

pub use config::Config;
pub use error::{AppError, Result};

/// Embedded migrations, applied at startup.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
