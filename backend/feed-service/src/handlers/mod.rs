//! HTTP request handlers and route table.

pub mod comments;
pub mod follows;
pub mod health;
pub mod likes;
pub mod posts;
pub mod uploads;
pub mod users;

use actix_web::web;
use serde::Deserialize;

/// Pagination query parameters shared by every paged endpoint.
#[derive(Debug, Deserialize)]
pub struct PageParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Mount the full `/api/v1` route tree. Shared between `main` and the
/// integration tests so both exercise the same table.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            // Health check endpoints
            .route("/health", web::get().to(health::health_summary))
            .route("/health/ready", web::get().to(health::readiness_summary))
            .route("/health/live", web::get().to(health::liveness_check))
            .service(
                web::scope("/posts")
                    .service(
                        web::resource("")
                            .route(web::get().to(posts::list_feed))
                            .route(web::post().to(posts::create_post)),
                    )
                    .service(
                        web::resource("/{post_id}")
                            .route(web::get().to(posts::get_post))
                            .route(web::delete().to(posts::delete_post)),
                    ),
            )
            .service(
                web::scope("/comments")
                    .service(
                        web::resource("")
                            .route(web::get().to(comments::list_comments))
                            .route(web::post().to(comments::create_comment)),
                    )
                    .service(
                        web::resource("/{comment_id}")
                            .route(web::delete().to(comments::delete_comment)),
                    ),
            )
            .service(
                web::scope("/likes").service(
                    web::resource("")
                        .route(web::post().to(likes::like_post))
                        .route(web::delete().to(likes::unlike_post)),
                ),
            )
            .service(
                web::scope("/follows").service(
                    web::resource("")
                        .route(web::get().to(follows::follow_status))
                        .route(web::post().to(follows::follow_user))
                        .route(web::delete().to(follows::unfollow_user)),
                ),
            )
            .service(
                web::scope("/uploads")
                    .service(web::resource("").route(web::post().to(uploads::create_upload))),
            )
            .service(
                web::scope("/users")
                    .route("/me", web::get().to(users::current_user))
                    .route("/{user_id}", web::get().to(users::get_profile))
                    .route("/{user_id}/posts", web::get().to(users::user_posts))
                    .route("/{user_id}/followers", web::get().to(users::followers))
                    .route("/{user_id}/following", web::get().to(users::following)),
            ),
    );
}
