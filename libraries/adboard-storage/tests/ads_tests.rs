//! Integration tests for the ads vertical slice

mod test_helpers;

use adboard_core::{AdboardError, UpdateAd};
use adboard_storage::ads;
use test_helpers::*;

#[tokio::test]
async fn update_is_partial_and_owner_scoped() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let owner = create_test_user(pool, "u1@example.com").await;
    let other = create_test_user(pool, "u2@example.com").await;
    let ad_id = create_test_ad(pool, "Promo", 10, &owner).await;

    let updated = ads::update(
        pool,
        &ad_id,
        &owner,
        UpdateAd {
            duration_seconds: Some(30),
            ..UpdateAd::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.title, "Promo");
    assert_eq!(updated.duration_seconds, 30);
    assert!(updated.updated_at >= updated.created_at);

    let err = ads::update(pool, &ad_id, &other, UpdateAd::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AdboardError::PermissionDenied));
}

#[tokio::test]
async fn delete_is_owner_scoped_and_returns_record() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let owner = create_test_user(pool, "u1@example.com").await;
    let other = create_test_user(pool, "u2@example.com").await;
    let ad_id = create_test_ad(pool, "Promo", 10, &owner).await;

    let err = ads::delete(pool, &ad_id, &other).await.unwrap_err();
    assert!(matches!(err, AdboardError::PermissionDenied));

    let deleted = ads::delete(pool, &ad_id, &owner).await.unwrap();
    assert_eq!(deleted.id, ad_id);
    assert!(ads::get(pool, &ad_id).await.unwrap().is_none());

    let err = ads::delete(pool, &ad_id, &owner).await.unwrap_err();
    assert!(matches!(err, AdboardError::AdNotFound(_)));
}

#[tokio::test]
async fn concurrent_updates_do_not_lose_writes() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let owner = create_test_user(pool, "u1@example.com").await;

    // Two writers each patch a different field of the same ad at the same
    // time. A writer may serialize behind the other or fail on lock
    // contention, but a write that reported success must never be
    // overwritten by the other writer's stale copy of the row.
    for i in 0..20 {
        let ad_id = create_test_ad(pool, &format!("orig-{i}"), 10, &owner).await;

        let title_update = ads::update(
            pool,
            &ad_id,
            &owner,
            UpdateAd {
                title: Some("retitled".to_string()),
                ..UpdateAd::default()
            },
        );
        let duration_update = ads::update(
            pool,
            &ad_id,
            &owner,
            UpdateAd {
                duration_seconds: Some(99),
                ..UpdateAd::default()
            },
        );
        let (title_result, duration_result) = tokio::join!(title_update, duration_update);

        let stored = ads::get(pool, &ad_id).await.unwrap().unwrap();
        if title_result.is_ok() {
            assert_eq!(stored.title, "retitled");
        }
        if duration_result.is_ok() {
            assert_eq!(stored.duration_seconds, 99);
        }
        assert!(title_result.is_ok() || duration_result.is_ok());
    }
}

#[tokio::test]
async fn listing_by_owner() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let u1 = create_test_user(pool, "u1@example.com").await;
    let u2 = create_test_user(pool, "u2@example.com").await;

    create_test_ad(pool, "A", 10, &u1).await;
    create_test_ad(pool, "B", 10, &u1).await;
    create_test_ad(pool, "C", 10, &u2).await;

    let mine = ads::get_by_owner(pool, &u1).await.unwrap();
    assert_eq!(mine.len(), 2);
    assert!(mine.iter().all(|a| a.owner == u1));
}

#[tokio::test]
async fn duplicate_email_rejected() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    create_test_user(pool, "u1@example.com").await;

    let err = adboard_storage::users::create(pool, "u1@example.com", "Again", "hash")
        .await
        .unwrap_err();
    assert!(matches!(err, AdboardError::Duplicate(_)));
}
