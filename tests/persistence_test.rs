// ABOUTME: Tests for file-backed database creation and persistence across reopen
// ABOUTME: Uses a temporary directory so each run starts from a missing database file
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Innkeeper Systems

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use innkeeper_server::database::Database;
use innkeeper_server::models::CountryPayload;

#[tokio::test]
async fn test_file_database_is_created_and_survives_reopen() {
    common::init_test_logging();

    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("innkeeper.db");
    let url = format!("sqlite:{}", db_path.display());

    let country_id = {
        let db = Database::new(&url, 10).await.unwrap();
        let created = db
            .create_country(
                &CountryPayload {
                    country_name: "India".into(),
                    country_code: "IN".into(),
                    capital: Some("New Delhi".into()),
                    status: None,
                },
                None,
            )
            .await
            .unwrap();
        db.pool().close().await;
        created.country_id
    };

    assert!(db_path.exists());

    // Reopen: schema bootstrap is idempotent and the row is still there
    let db = Database::new(&url, 10).await.unwrap();
    let country = db.get_country(country_id).await.unwrap().unwrap();
    assert_eq!(country.country_name, "India");
    assert_eq!(country.capital.as_deref(), Some("New Delhi"));
}
