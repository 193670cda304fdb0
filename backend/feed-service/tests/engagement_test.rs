/// Like and follow toggle properties, driven through the service layer.
mod common;

use common::fixtures;
use feed_service::error::AppError;
use feed_service::services::{EngagementService, PostService};

#[actix_web::test]
async fn double_like_yields_conflict_and_one_edge() {
    let Some(pool) = fixtures::test_pool().await else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    };
    let storage = fixtures::test_storage().await;

    let author = fixtures::create_user(&pool, "like_author").await;
    let fan = fixtures::create_user(&pool, "like_fan").await;
    let post = fixtures::create_post(&pool, author.id, None).await;

    let engagement = EngagementService::new(pool.clone());
    let posts = PostService::new(pool.clone(), storage);

    engagement.like(fan.id, post.id).await.expect("first like");
    let second = engagement.like(fan.id, post.id).await;
    assert!(matches!(second, Err(AppError::Conflict(_))));

    // Read-after-write: exactly one edge is visible immediately.
    let view = posts.get_post(post.id, Some(fan.id)).await.unwrap();
    assert_eq!(view.like_count, 1);
    assert_eq!(view.is_liked, Some(true));

    // The author sees the count but not someone else's like state as theirs.
    let author_view = posts.get_post(post.id, Some(author.id)).await.unwrap();
    assert_eq!(author_view.like_count, 1);
    assert_eq!(author_view.is_liked, Some(false));

    fixtures::delete_user(&pool, author.id).await;
    fixtures::delete_user(&pool, fan.id).await;
}

#[actix_web::test]
async fn unlike_is_idempotent() {
    let Some(pool) = fixtures::test_pool().await else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    };
    let storage = fixtures::test_storage().await;

    let author = fixtures::create_user(&pool, "unlike_author").await;
    let fan = fixtures::create_user(&pool, "unlike_fan").await;
    let post = fixtures::create_post(&pool, author.id, None).await;

    let engagement = EngagementService::new(pool.clone());
    let posts = PostService::new(pool.clone(), storage);

    engagement.like(fan.id, post.id).await.unwrap();
    engagement.unlike(fan.id, post.id).await.unwrap();
    // Removing an edge that is already gone still succeeds.
    engagement.unlike(fan.id, post.id).await.unwrap();

    let view = posts.get_post(post.id, Some(fan.id)).await.unwrap();
    assert_eq!(view.like_count, 0);
    assert_eq!(view.is_liked, Some(false));

    fixtures::delete_user(&pool, author.id).await;
    fixtures::delete_user(&pool, fan.id).await;
}

#[actix_web::test]
async fn like_of_missing_post_is_not_found() {
    let Some(pool) = fixtures::test_pool().await else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    };

    let fan = fixtures::create_user(&pool, "lost_fan").await;
    let engagement = EngagementService::new(pool.clone());

    let result = engagement.like(fan.id, uuid::Uuid::new_v4()).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    fixtures::delete_user(&pool, fan.id).await;
}

#[actix_web::test]
async fn follow_toggle_round_trip() {
    let Some(pool) = fixtures::test_pool().await else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    };

    let a = fixtures::create_user(&pool, "follower_a").await;
    let b = fixtures::create_user(&pool, "followee_b").await;

    let engagement = EngagementService::new(pool.clone());

    engagement.follow(a.id, b.id).await.expect("follow");
    assert!(engagement.follow_status(a.id, b.id).await.unwrap().is_following);
    // Direction matters: B does not follow A.
    assert!(!engagement.follow_status(b.id, a.id).await.unwrap().is_following);

    // Duplicate follow is a conflict, not a second edge.
    assert!(matches!(
        engagement.follow(a.id, b.id).await,
        Err(AppError::Conflict(_))
    ));

    engagement.unfollow(a.id, b.id).await.expect("unfollow");
    assert!(!engagement.follow_status(a.id, b.id).await.unwrap().is_following);

    // Unfollowing a non-edge reads as not found.
    assert!(matches!(
        engagement.unfollow(a.id, b.id).await,
        Err(AppError::NotFound(_))
    ));

    fixtures::delete_user(&pool, a.id).await;
    fixtures::delete_user(&pool, b.id).await;
}

#[actix_web::test]
async fn self_follow_is_always_rejected() {
    let Some(pool) = fixtures::test_pool().await else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    };

    let user = fixtures::create_user(&pool, "narcissus").await;
    let engagement = EngagementService::new(pool.clone());

    assert!(matches!(
        engagement.follow(user.id, user.id).await,
        Err(AppError::Validation(_))
    ));

    fixtures::delete_user(&pool, user.id).await;
}

#[actix_web::test]
async fn follow_moves_both_counters() {
    let Some(pool) = fixtures::test_pool().await else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    };

    let a = fixtures::create_user(&pool, "counter_a").await;
    let b = fixtures::create_user(&pool, "counter_b").await;

    let engagement = EngagementService::new(pool.clone());

    engagement.follow(a.id, b.id).await.unwrap();

    let a_stats = feed_service::db::stats_repo::user_stats(&pool, a.id)
        .await
        .unwrap()
        .unwrap();
    let b_stats = feed_service::db::stats_repo::user_stats(&pool, b.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(a_stats.following_count, 1);
    assert_eq!(a_stats.followers_count, 0);
    assert_eq!(b_stats.followers_count, 1);
    assert_eq!(b_stats.following_count, 0);

    engagement.unfollow(a.id, b.id).await.unwrap();

    let a_after = feed_service::db::stats_repo::user_stats(&pool, a.id)
        .await
        .unwrap()
        .unwrap();
    let b_after = feed_service::db::stats_repo::user_stats(&pool, b.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(a_after.following_count, 0);
    assert_eq!(b_after.followers_count, 0);

    // The edge shows up in both directed lists while it exists.
    engagement.follow(a.id, b.id).await.unwrap();
    let followers = engagement.followers(b.id, None, None).await.unwrap();
    assert!(followers.users.iter().any(|u| u.id == a.id.to_string()));
    let following = engagement.following(a.id, None, None).await.unwrap();
    assert!(following.users.iter().any(|u| u.id == b.id.to_string()));

    fixtures::delete_user(&pool, a.id).await;
    fixtures::delete_user(&pool, b.id).await;
}
