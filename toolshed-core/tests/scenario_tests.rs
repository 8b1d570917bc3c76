/// End-to-end walkthrough of the lending workflow
///
/// Requires a running PostgreSQL database (see tests/common/mod.rs).
mod common;

use toolshed_core::models::category::Category;
use toolshed_core::models::tool::{SortDirection, SortKey, Tool};

/// alice registers and claims a barcode; bob cannot take it, but sees it
/// once it is shareable; filing it into a category and deleting the
/// category never touches ownership.
#[tokio::test]
async fn test_lending_walkthrough() {
    let pool = common::test_pool().await;

    let alice = common::register_and_login(&pool, &common::unique("alice")).await;
    let bob = common::register_and_login(&pool, &common::unique("bob")).await;

    let b100 = common::unique("B100");
    common::seed_catalog(&pool, &b100, "Hammer Drill").await;

    // alice claims the pre-existing, unowned barcode
    assert!(Tool::claim(&pool, &alice, &b100).await.unwrap());

    // bob's claim on the same barcode is rejected
    assert!(!Tool::claim(&pool, &bob, &b100).await.unwrap());

    // alice marks it shareable; now bob's listing includes it
    assert!(Tool::set_shareable(&pool, &alice, &b100, true).await.unwrap());
    let bobs_view = Tool::list_visible(&pool, &bob, SortKey::Name, SortDirection::Ascending)
        .await
        .unwrap();
    assert!(bobs_view.iter().any(|t| t.barcode == b100));

    // alice files it under "drills"
    assert!(Category::create(&pool, &alice, "drills").await.unwrap());
    assert!(Category::add_tool(&pool, &alice, "drills", &b100).await.unwrap());

    // deleting the category removes the association but not the tool
    assert!(Category::delete(&pool, &alice, "drills").await.unwrap());
    assert!(Category::list(&pool, &alice).await.unwrap().is_empty());

    let alices_view = Tool::list_visible(&pool, &alice, SortKey::Name, SortDirection::Ascending)
        .await
        .unwrap();
    let tool = alices_view.iter().find(|t| t.barcode == b100).unwrap();
    assert_eq!(tool.owner, alice.username());
}
