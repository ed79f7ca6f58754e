//! Integration tests for the displays vertical slice

mod test_helpers;

use adboard_core::{AdboardError, CreateDisplay, DisplayId, DisplayKind, UpdateDisplay};
use adboard_storage::displays;
use test_helpers::*;

#[tokio::test]
async fn ids_allocated_as_next_available_integer() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user = create_test_user(pool, "u1@example.com").await;

    let d1 = create_test_display(pool, "One", &user).await;
    let d2 = create_test_display(pool, "Two", &user).await;
    assert_eq!(d1, DisplayId::new(1));
    assert_eq!(d2, DisplayId::new(2));

    // Deleting the highest id makes it available again
    displays::delete(pool, d2).await.unwrap();
    let d3 = create_test_display(pool, "Three", &user).await;
    assert_eq!(d3, DisplayId::new(2));
}

#[tokio::test]
async fn kind_is_case_normalized_on_create_and_update() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user = create_test_user(pool, "u1@example.com").await;

    let display = displays::create(
        pool,
        CreateDisplay {
            name: "Station".to_string(),
            location: "Platform 2".to_string(),
            kind: "lEd".to_string(),
            owner: user.clone(),
        },
    )
    .await
    .unwrap();
    assert_eq!(display.kind, DisplayKind::Led);

    let updated = displays::update(
        pool,
        display.id,
        UpdateDisplay {
            kind: Some("PROJECTOR".to_string()),
            ..UpdateDisplay::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.kind, DisplayKind::Projector);

    let err = displays::create(
        pool,
        CreateDisplay {
            name: "Bad".to_string(),
            location: "Nowhere".to_string(),
            kind: "plasma".to_string(),
            owner: user,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AdboardError::InvalidInput(_)));
}

#[tokio::test]
async fn delete_cascades_links_and_overrides() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user = create_test_user(pool, "u1@example.com").await;
    let display = create_test_display(pool, "Doomed", &user).await;
    let ad = create_test_ad(pool, "Promo", 10, &user).await;

    adboard_storage::playlist::link(pool, display, &ad)
        .await
        .unwrap();

    displays::delete(pool, display).await.unwrap();

    assert!(displays::get(pool, display).await.unwrap().is_none());
    assert!(adboard_storage::playlist::displays_linking(pool, &ad)
        .await
        .unwrap()
        .is_empty());

    let err = displays::delete(pool, display).await.unwrap_err();
    assert!(matches!(err, AdboardError::DisplayNotFound(_)));
}

#[tokio::test]
async fn owner_filtering() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let u1 = create_test_user(pool, "u1@example.com").await;
    let u2 = create_test_user(pool, "u2@example.com").await;

    create_test_display(pool, "Mine", &u1).await;
    create_test_display(pool, "Also mine", &u1).await;
    create_test_display(pool, "Theirs", &u2).await;

    let mine = displays::get_by_owner(pool, &u1).await.unwrap();
    assert_eq!(mine.len(), 2);
    assert!(mine.iter().all(|d| d.owner == u1));

    assert_eq!(displays::get_all(pool).await.unwrap().len(), 3);
}
