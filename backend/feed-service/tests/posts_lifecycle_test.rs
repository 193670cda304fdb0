/// Post lifecycle: creation rules, pagination contract, ownership-gated
/// deletion and its cascades.
mod common;

use common::fixtures;
use feed_service::error::AppError;
use feed_service::services::{CommentService, EngagementService, PostService};
use std::collections::HashSet;

#[actix_web::test]
async fn create_post_enforces_boundaries() {
    let Some(pool) = fixtures::test_pool().await else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    };
    let storage = fixtures::test_storage().await;

    let user = fixtures::create_user(&pool, "creator").await;
    let posts = PostService::new(pool.clone(), storage);

    let created = posts
        .create_post(&user, "posts/abc.jpg", Some("  first light  "))
        .await
        .unwrap();
    assert_eq!(created.caption.as_deref(), Some("first light"));
    assert_eq!(created.like_count, 0);
    assert_eq!(created.is_liked, Some(false));

    // Whitespace-only captions collapse to none.
    let uncaptioned = posts
        .create_post(&user, "posts/def.jpg", Some("   "))
        .await
        .unwrap();
    assert!(uncaptioned.caption.is_none());

    let oversized = "a".repeat(2201);
    assert!(matches!(
        posts.create_post(&user, "posts/ghi.jpg", Some(&oversized)).await,
        Err(AppError::Validation(_))
    ));

    assert!(matches!(
        posts.create_post(&user, "", None).await,
        Err(AppError::Validation(_))
    ));
    assert!(matches!(
        posts.create_post(&user, "../escape.jpg", None).await,
        Err(AppError::Validation(_))
    ));

    fixtures::delete_user(&pool, user.id).await;
}

#[actix_web::test]
async fn user_pages_are_disjoint_ordered_and_bounded() {
    let Some(pool) = fixtures::test_pool().await else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    };
    let storage = fixtures::test_storage().await;

    let user = fixtures::create_user(&pool, "paginator").await;
    for i in 0..25 {
        fixtures::create_post(&pool, user.id, Some(&format!("post {}", i))).await;
    }

    let posts = PostService::new(pool.clone(), storage);

    let first = posts.user_posts(user.id, Some(10), Some(0), None).await.unwrap();
    let second = posts.user_posts(user.id, Some(10), Some(10), None).await.unwrap();
    let third = posts.user_posts(user.id, Some(10), Some(20), None).await.unwrap();

    assert_eq!(first.posts.len(), 10);
    assert_eq!(second.posts.len(), 10);
    assert_eq!(third.posts.len(), 5);
    assert_eq!(first.total_count, 25);

    assert!(first.has_more);
    assert!(second.has_more);
    assert!(!third.has_more);

    // Disjoint slices.
    let mut seen = HashSet::new();
    for post in first.posts.iter().chain(&second.posts).chain(&third.posts) {
        assert!(seen.insert(post.id.clone()), "duplicate post across pages");
    }
    assert_eq!(seen.len(), 25);

    // Newest-first within and across pages.
    let all: Vec<chrono::DateTime<chrono::FixedOffset>> = first
        .posts
        .iter()
        .chain(&second.posts)
        .chain(&third.posts)
        .map(|p| chrono::DateTime::parse_from_rfc3339(&p.created_at).unwrap())
        .collect();
    assert!(all.windows(2).all(|w| w[0] >= w[1]));

    // Requested limits above the cap are clamped rather than honored.
    let clamped = posts.user_posts(user.id, Some(5000), Some(0), None).await.unwrap();
    assert!(clamped.posts.len() <= 100);

    fixtures::delete_user(&pool, user.id).await;
}

#[actix_web::test]
async fn delete_is_owner_scoped_and_cascades() {
    let Some(pool) = fixtures::test_pool().await else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    };
    let storage = fixtures::test_storage().await;

    let author = fixtures::create_user(&pool, "owner").await;
    let other = fixtures::create_user(&pool, "not_owner").await;
    let post = fixtures::create_post(&pool, author.id, Some("hello")).await;

    let posts = PostService::new(pool.clone(), storage);
    let comments = CommentService::new(pool.clone());
    let engagement = EngagementService::new(pool.clone());

    // Scenario: B engages with A's post.
    engagement.like(other.id, post.id).await.unwrap();
    comments.add_comment(post.id, &other, "nice").await.unwrap();

    let view = posts.get_post(post.id, Some(other.id)).await.unwrap();
    assert_eq!(view.like_count, 1);
    assert_eq!(view.comment_count, 1);
    assert_eq!(view.is_liked, Some(true));

    // A non-owner cannot delete.
    assert!(matches!(
        posts.delete_post(post.id, other.id).await,
        Err(AppError::Authorization(_))
    ));

    // Owner delete succeeds even though the storage endpoint is dead
    // (image removal is best-effort).
    posts.delete_post(post.id, author.id).await.expect("owner delete");

    // Gone, together with its engagement.
    assert!(matches!(
        posts.get_post(post.id, None).await,
        Err(AppError::NotFound(_))
    ));
    let listed = comments.list_comments(post.id, Some(10)).await.unwrap();
    assert!(listed.comments.is_empty());

    // A second delete resolves to NotFound, not a crash.
    assert!(matches!(
        posts.delete_post(post.id, author.id).await,
        Err(AppError::NotFound(_))
    ));

    fixtures::delete_user(&pool, author.id).await;
    fixtures::delete_user(&pool, other.id).await;
}
