// ABOUTME: Integration tests for the composite menu write coordinator
// ABOUTME: Pins down atomic rollback, replace-not-merge child sets, and safe delete ordering
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Innkeeper Systems

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use innkeeper_server::database::Database;
use innkeeper_server::errors::ErrorCode;
use innkeeper_server::models::{
    AddonPayload, CategoryPayload, MenuItemPayload, MenuVariantPayload, UnitPayload,
};

/// Seed a category, a unit, and two addons; returns (category_id, [addon ids])
async fn seed_catalog(db: &Database) -> (i64, Vec<i64>) {
    let category = db
        .create_category(
            &CategoryPayload {
                category_name: "Main Course".into(),
                description: None,
                status: None,
            },
            None,
        )
        .await
        .unwrap();

    let unit = db
        .create_unit(
            &UnitPayload {
                unit_name: "Piece".into(),
                status: None,
            },
            None,
        )
        .await
        .unwrap();

    let mut addon_ids = Vec::new();
    for name in ["Papad", "Pickle"] {
        let addon = db
            .create_addon(
                &AddonPayload {
                    addon_name: name.into(),
                    unit_id: Some(unit.unit_id),
                    rate: Some(10.0),
                    status: None,
                },
                None,
            )
            .await
            .unwrap();
        addon_ids.push(addon.addon_id);
    }

    (category.category_id, addon_ids)
}

fn menu_payload(
    name: &str,
    category_id: i64,
    variants: Vec<MenuVariantPayload>,
    addons: Vec<i64>,
) -> MenuItemPayload {
    MenuItemPayload {
        menu_name: name.into(),
        category_id: Some(category_id),
        description: Some("House special".into()),
        status: None,
        variants,
        addons,
    }
}

fn variant(kind: &str, rate: f64) -> MenuVariantPayload {
    MenuVariantPayload {
        variant_type: kind.into(),
        rate,
    }
}

async fn count_rows(db: &Database, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(db.pool())
        .await
        .unwrap()
}

#[tokio::test]
async fn test_create_composite_menu_item() {
    let db = common::create_test_database().await;
    let (category_id, addon_ids) = seed_catalog(&db).await;

    let menu_id = db
        .create_menu_item(
            &menu_payload(
                "Thali",
                category_id,
                vec![variant("half", 50.0), variant("full", 90.0)],
                addon_ids.clone(),
            ),
            Some(1),
        )
        .await
        .unwrap();

    let menu = db.get_menu_item(menu_id).await.unwrap().unwrap();
    assert_eq!(menu.summary.menu_name, "Thali");
    assert_eq!(menu.summary.category_name.as_deref(), Some("Main Course"));
    assert_eq!(menu.variants.len(), 2);
    assert_eq!(menu.addons.len(), 2);
    assert!(menu
        .variants
        .iter()
        .any(|v| v.variant_type == "half" && (v.rate - 50.0).abs() < f64::EPSILON));
    assert!(menu
        .addons
        .iter()
        .any(|a| a.addon_name.as_deref() == Some("Papad")));
}

#[tokio::test]
async fn test_create_with_invalid_addon_rolls_back_everything() {
    let db = common::create_test_database().await;
    let (category_id, _) = seed_catalog(&db).await;

    let err = db
        .create_menu_item(
            &menu_payload(
                "Phantom Thali",
                category_id,
                vec![variant("half", 50.0)],
                vec![99_999], // does not exist
            ),
            None,
        )
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::DependentRowsExist);
    assert!(err.message.contains("addon"));

    // Full rollback: no partial menu item in any of the three tables
    assert_eq!(count_rows(&db, "menumaster").await, 0);
    assert_eq!(count_rows(&db, "menu_details").await, 0);
    assert_eq!(count_rows(&db, "menuaddon").await, 0);
}

#[tokio::test]
async fn test_create_with_duplicate_variant_rolls_back_everything() {
    let db = common::create_test_database().await;
    let (category_id, addon_ids) = seed_catalog(&db).await;

    let err = db
        .create_menu_item(
            &menu_payload(
                "Twice Half",
                category_id,
                vec![variant("half", 50.0), variant("half", 60.0)],
                addon_ids,
            ),
            None,
        )
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::DuplicateValue);

    assert_eq!(count_rows(&db, "menumaster").await, 0);
    assert_eq!(count_rows(&db, "menu_details").await, 0);
    assert_eq!(count_rows(&db, "menuaddon").await, 0);
}

#[tokio::test]
async fn test_update_replaces_variant_set_wholesale() {
    let db = common::create_test_database().await;
    let (category_id, addon_ids) = seed_catalog(&db).await;

    let menu_id = db
        .create_menu_item(
            &menu_payload(
                "Thali",
                category_id,
                vec![variant("half", 50.0), variant("full", 90.0)],
                addon_ids.clone(),
            ),
            None,
        )
        .await
        .unwrap();

    // Replace [half, full] with just [full]: exactly one detail row remains
    db.update_menu_item(
        menu_id,
        &menu_payload("Thali", category_id, vec![variant("full", 90.0)], addon_ids),
        Some(3),
    )
    .await
    .unwrap();

    let menu = db.get_menu_item(menu_id).await.unwrap().unwrap();
    assert_eq!(menu.variants.len(), 1);
    assert_eq!(menu.variants[0].variant_type, "full");
    assert_eq!(count_rows(&db, "menu_details").await, 1);
    assert_eq!(menu.summary.updated_by_id, Some(3));
}

#[tokio::test]
async fn test_failed_update_preserves_previous_children() {
    let db = common::create_test_database().await;
    let (category_id, addon_ids) = seed_catalog(&db).await;

    let menu_id = db
        .create_menu_item(
            &menu_payload(
                "Thali",
                category_id,
                vec![variant("half", 50.0)],
                addon_ids.clone(),
            ),
            None,
        )
        .await
        .unwrap();

    // The new addon set references a missing addon: the whole update rolls
    // back, INCLUDING the delete-then-reinsert of the child sets
    let err = db
        .update_menu_item(
            menu_id,
            &menu_payload("Thali", category_id, vec![variant("full", 90.0)], vec![424_242]),
            None,
        )
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::DependentRowsExist);

    let menu = db.get_menu_item(menu_id).await.unwrap().unwrap();
    assert_eq!(menu.variants.len(), 1);
    assert_eq!(menu.variants[0].variant_type, "half");
    assert_eq!(menu.addons.len(), 2);
}

#[tokio::test]
async fn test_update_missing_menu_returns_not_found() {
    let db = common::create_test_database().await;
    let (category_id, _) = seed_catalog(&db).await;

    let err = db
        .update_menu_item(
            777,
            &menu_payload("Ghost", category_id, vec![], vec![]),
            None,
        )
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
}

#[tokio::test]
async fn test_delete_removes_children_and_is_idempotent_404_after() {
    let db = common::create_test_database().await;
    let (category_id, addon_ids) = seed_catalog(&db).await;

    let menu_id = db
        .create_menu_item(
            &menu_payload(
                "Thali",
                category_id,
                vec![variant("half", 50.0), variant("full", 90.0)],
                addon_ids,
            ),
            None,
        )
        .await
        .unwrap();

    db.delete_menu_item(menu_id).await.unwrap();

    assert_eq!(count_rows(&db, "menumaster").await, 0);
    assert_eq!(count_rows(&db, "menu_details").await, 0);
    assert_eq!(count_rows(&db, "menuaddon").await, 0);

    // Repeating the delete reports NotFound
    let err = db.delete_menu_item(menu_id).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
}

#[tokio::test]
async fn test_delete_missing_menu_touches_nothing() {
    let db = common::create_test_database().await;
    let (category_id, addon_ids) = seed_catalog(&db).await;

    let menu_id = db
        .create_menu_item(
            &menu_payload("Thali", category_id, vec![variant("half", 50.0)], addon_ids),
            None,
        )
        .await
        .unwrap();

    // A 404 delete of a different id must not disturb existing children
    let err = db.delete_menu_item(menu_id + 100).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);

    assert_eq!(count_rows(&db, "menu_details").await, 1);
    assert_eq!(count_rows(&db, "menuaddon").await, 2);
}

#[tokio::test]
async fn test_replace_menu_addons_is_replace_not_merge() {
    let db = common::create_test_database().await;
    let (category_id, addon_ids) = seed_catalog(&db).await;

    let menu_id = db
        .create_menu_item(
            &menu_payload("Thali", category_id, vec![], vec![addon_ids[0]]),
            None,
        )
        .await
        .unwrap();

    // Replace the set [Papad] with [Pickle]
    db.replace_menu_addons(menu_id, &[addon_ids[1]]).await.unwrap();

    let addons = db.get_menu_addons(menu_id).await.unwrap();
    assert_eq!(addons.len(), 1);
    assert_eq!(addons[0].addon_id, addon_ids[1]);

    // An empty set clears the junction rows
    db.replace_menu_addons(menu_id, &[]).await.unwrap();
    assert!(db.get_menu_addons(menu_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_failed_addon_replace_preserves_previous_set() {
    let db = common::create_test_database().await;
    let (category_id, addon_ids) = seed_catalog(&db).await;

    let menu_id = db
        .create_menu_item(
            &menu_payload("Thali", category_id, vec![], addon_ids.clone()),
            None,
        )
        .await
        .unwrap();

    let err = db
        .replace_menu_addons(menu_id, &[addon_ids[0], 55_555])
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::DependentRowsExist);

    // The original two-addon set survived the failed replacement
    let addons = db.get_menu_addons(menu_id).await.unwrap();
    assert_eq!(addons.len(), 2);
}

#[tokio::test]
async fn test_replace_addons_on_missing_menu_returns_not_found() {
    let db = common::create_test_database().await;
    let (_, addon_ids) = seed_catalog(&db).await;

    let err = db.replace_menu_addons(31_337, &addon_ids).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
}

#[tokio::test]
async fn test_delete_category_with_menu_is_guarded() {
    let db = common::create_test_database().await;
    let (category_id, addon_ids) = seed_catalog(&db).await;

    db.create_menu_item(
        &menu_payload("Thali", category_id, vec![variant("full", 90.0)], addon_ids),
        None,
    )
    .await
    .unwrap();

    let err = db.delete_category(category_id).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::DependentRowsExist);
    assert!(db.get_category(category_id).await.unwrap().is_some());
}
