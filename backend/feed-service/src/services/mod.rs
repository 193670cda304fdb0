//! Business logic layer between HTTP handlers and the repositories.

pub mod comments;
pub mod engagement;
pub mod identity;
pub mod posts;
pub mod storage;

pub use comments::CommentService;
pub use engagement::EngagementService;
pub use posts::PostService;
pub use storage::ObjectStorage;
