//! Local cache behaviour as the session store relies on it

use std::time::Duration;

use bookstore::middlewares::auth::SessionUser;
use bookstore::{Cache, CacheKey, LocalCache};
use chrono::Utc;
use uuid::Uuid;

fn session_user() -> SessionUser {
    SessionUser {
        session_id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        username: "reader".to_string(),
        is_staff: false,
        expired_at: Utc::now().naive_utc() + chrono::Duration::hours(1),
    }
}

#[tokio::test]
async fn test_session_user_round_trips_through_cache() {
    let cache = LocalCache::new();
    let user = session_user();
    let key = CacheKey::session(user.session_id);

    cache.set(&key, &user, Duration::from_secs(60)).await.unwrap();

    let cached: Option<SessionUser> = cache.get(&key).await.unwrap();
    assert_eq!(cached, Some(user));
}

#[tokio::test]
async fn test_deleted_session_is_gone() {
    let cache = LocalCache::new();
    let user = session_user();
    let key = CacheKey::session(user.session_id);

    cache.set(&key, &user, Duration::from_secs(60)).await.unwrap();
    cache.delete(&key).await.unwrap();

    let cached: Option<SessionUser> = cache.get(&key).await.unwrap();
    assert!(cached.is_none());
}

#[tokio::test]
async fn test_short_ttl_expires() {
    let cache = LocalCache::new();
    let user = session_user();
    let key = CacheKey::session(user.session_id);

    cache.set(&key, &user, Duration::from_millis(50)).await.unwrap();
    tokio::time::sleep(Duration::from_millis(120)).await;

    let cached: Option<SessionUser> = cache.get(&key).await.unwrap();
    assert!(cached.is_none());
}
