/// Integration tests for the tool registry
///
/// Requires a running PostgreSQL database (see tests/common/mod.rs).
mod common;

use toolshed_core::models::catalog::CatalogEntry;
use toolshed_core::models::category::Category;
use toolshed_core::models::tool::{SortDirection, SortKey, Tool};

#[tokio::test]
async fn test_claim_catalogued_unowned_barcode() {
    let pool = common::test_pool().await;
    let alice = common::register_and_login(&pool, &common::unique("alice")).await;
    let barcode = common::unique("B");
    common::seed_catalog(&pool, &barcode, "Cordless Drill").await;

    assert!(Tool::claim(&pool, &alice, &barcode).await.unwrap());

    let tools = Tool::list_visible(&pool, &alice, SortKey::Name, SortDirection::Ascending)
        .await
        .unwrap();
    let tool = tools.iter().find(|t| t.barcode == barcode).unwrap();
    assert_eq!(tool.owner, alice.username());
    assert_eq!(tool.name, "Cordless Drill");
    assert!(!tool.shareable, "new claims start private");
}

#[tokio::test]
async fn test_claim_already_owned_barcode_is_rejected() {
    let pool = common::test_pool().await;
    let alice = common::register_and_login(&pool, &common::unique("alice")).await;
    let bob = common::register_and_login(&pool, &common::unique("bob")).await;
    let barcode = common::unique("B");
    common::seed_catalog(&pool, &barcode, "Hammer").await;

    assert!(Tool::claim(&pool, &alice, &barcode).await.unwrap());
    assert!(!Tool::claim(&pool, &bob, &barcode).await.unwrap());
    // The owner cannot double-claim either
    assert!(!Tool::claim(&pool, &alice, &barcode).await.unwrap());
}

#[tokio::test]
async fn test_claim_uncatalogued_barcode_is_rejected() {
    let pool = common::test_pool().await;
    let alice = common::register_and_login(&pool, &common::unique("alice")).await;

    // Never seeded, so not in the catalog
    let barcode = common::unique("NOPE");
    assert!(!Tool::claim(&pool, &alice, &barcode).await.unwrap());
}

#[tokio::test]
async fn test_set_shareable_owner_only() {
    let pool = common::test_pool().await;
    let alice = common::register_and_login(&pool, &common::unique("alice")).await;
    let bob = common::register_and_login(&pool, &common::unique("bob")).await;
    let barcode = common::unique("B");
    common::seed_catalog(&pool, &barcode, "Sander").await;
    Tool::claim(&pool, &alice, &barcode).await.unwrap();

    assert!(!Tool::set_shareable(&pool, &bob, &barcode, true).await.unwrap());
    assert!(Tool::set_shareable(&pool, &alice, &barcode, true).await.unwrap());
}

#[tokio::test]
async fn test_shareable_tool_appears_in_other_users_listing() {
    let pool = common::test_pool().await;
    let alice = common::register_and_login(&pool, &common::unique("alice")).await;
    let bob = common::register_and_login(&pool, &common::unique("bob")).await;
    let barcode = common::unique("B");
    common::seed_catalog(&pool, &barcode, "Jigsaw").await;
    Tool::claim(&pool, &alice, &barcode).await.unwrap();

    let visible = |tools: Vec<Tool>| tools.into_iter().any(|t| t.barcode == barcode);

    let before = Tool::list_visible(&pool, &bob, SortKey::Name, SortDirection::Ascending)
        .await
        .unwrap();
    assert!(!visible(before), "private tool is invisible to others");

    Tool::set_shareable(&pool, &alice, &barcode, true).await.unwrap();

    let after = Tool::list_visible(&pool, &bob, SortKey::Name, SortDirection::Ascending)
        .await
        .unwrap();
    assert!(visible(after), "shareable tool shows up for others");
}

#[tokio::test]
async fn test_remove_owner_only_and_barcode_becomes_claimable() {
    let pool = common::test_pool().await;
    let alice = common::register_and_login(&pool, &common::unique("alice")).await;
    let bob = common::register_and_login(&pool, &common::unique("bob")).await;
    let barcode = common::unique("B");
    common::seed_catalog(&pool, &barcode, "Router").await;
    Tool::claim(&pool, &alice, &barcode).await.unwrap();

    assert!(!Tool::remove(&pool, &bob, &barcode).await.unwrap());
    assert!(Tool::remove(&pool, &alice, &barcode).await.unwrap());
    assert!(!Tool::remove(&pool, &alice, &barcode).await.unwrap(), "already gone");

    // The catalog entry survives, so the barcode can be claimed again
    assert!(CatalogEntry::find(&pool, &barcode).await.unwrap().is_some());
    assert!(Tool::claim(&pool, &bob, &barcode).await.unwrap());
}

#[tokio::test]
async fn test_remove_cascades_category_associations() {
    let pool = common::test_pool().await;
    let alice = common::register_and_login(&pool, &common::unique("alice")).await;
    let barcode = common::unique("B");
    common::seed_catalog(&pool, &barcode, "Impact Driver").await;
    Tool::claim(&pool, &alice, &barcode).await.unwrap();

    Category::create(&pool, &alice, "drills").await.unwrap();
    assert!(Category::add_tool(&pool, &alice, "drills", &barcode).await.unwrap());

    Tool::remove(&pool, &alice, &barcode).await.unwrap();

    let summaries = Category::list(&pool, &alice).await.unwrap();
    assert!(
        summaries.iter().all(|s| !s.barcodes.contains(&barcode)),
        "no association may survive the tool"
    );
}

#[tokio::test]
async fn test_list_sorted_by_name() {
    let pool = common::test_pool().await;
    let alice = common::register_and_login(&pool, &common::unique("alice")).await;

    let b1 = common::unique("B1");
    let b2 = common::unique("B2");
    common::seed_catalog(&pool, &b1, "Zip Saw").await;
    common::seed_catalog(&pool, &b2, "Angle Grinder").await;
    Tool::claim(&pool, &alice, &b1).await.unwrap();
    Tool::claim(&pool, &alice, &b2).await.unwrap();

    let owned_names = |tools: Vec<Tool>| {
        tools
            .into_iter()
            .filter(|t| t.owner == alice.username())
            .map(|t| t.name)
            .collect::<Vec<_>>()
    };

    let asc = Tool::list_visible(&pool, &alice, SortKey::Name, SortDirection::Ascending)
        .await
        .unwrap();
    assert_eq!(owned_names(asc), vec!["Angle Grinder", "Zip Saw"]);

    let desc = Tool::list_visible(&pool, &alice, SortKey::Name, SortDirection::Descending)
        .await
        .unwrap();
    assert_eq!(owned_names(desc), vec!["Zip Saw", "Angle Grinder"]);
}

#[tokio::test]
async fn test_list_sorted_by_category_uncategorized_last() {
    let pool = common::test_pool().await;
    let alice = common::register_and_login(&pool, &common::unique("alice")).await;

    let filed = common::unique("B1");
    let loose = common::unique("B2");
    common::seed_catalog(&pool, &filed, "Caulk Gun").await;
    common::seed_catalog(&pool, &loose, "Awl").await;
    Tool::claim(&pool, &alice, &filed).await.unwrap();
    Tool::claim(&pool, &alice, &loose).await.unwrap();

    Category::create(&pool, &alice, "sealing").await.unwrap();
    Category::add_tool(&pool, &alice, "sealing", &filed).await.unwrap();

    let tools = Tool::list_visible(&pool, &alice, SortKey::Category, SortDirection::Ascending)
        .await
        .unwrap();
    let mine: Vec<_> = tools
        .into_iter()
        .filter(|t| t.owner == alice.username())
        .map(|t| t.barcode)
        .collect();

    // "Awl" sorts before "Caulk Gun" by name, but it has no category, so
    // it is placed after every categorized tool.
    assert_eq!(mine, vec![filed, loose]);
}
