// ABOUTME: Integration tests for the location hierarchy repositories
// ABOUTME: Validates round-trips, full-replace updates, uniqueness, and FK delete guards
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Innkeeper Systems

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use innkeeper_server::errors::ErrorCode;
use innkeeper_server::models::{CountryPayload, DistrictPayload, StatePayload, ZonePayload};

fn country_payload(name: &str, code: &str) -> CountryPayload {
    CountryPayload {
        country_name: name.into(),
        country_code: code.into(),
        capital: Some("Capital City".into()),
        status: None,
    }
}

#[tokio::test]
async fn test_country_create_get_round_trip() {
    let db = common::create_test_database().await;

    let created = db
        .create_country(&country_payload("India", "IN"), Some(1))
        .await
        .unwrap();

    assert!(created.country_id > 0);
    assert_eq!(created.country_name, "India");
    assert_eq!(created.country_code, "IN");
    assert_eq!(created.capital.as_deref(), Some("Capital City"));
    assert_eq!(created.status, 1);
    assert_eq!(created.created_by_id, Some(1));

    let fetched = db.get_country(created.country_id).await.unwrap().unwrap();
    assert_eq!(fetched.country_name, created.country_name);
    assert_eq!(fetched.country_code, created.country_code);
    assert_eq!(fetched.capital, created.capital);
}

#[tokio::test]
async fn test_country_code_uniqueness_leaves_first_intact() {
    let db = common::create_test_database().await;

    let first = db
        .create_country(&country_payload("India", "IN"), None)
        .await
        .unwrap();

    let err = db
        .create_country(&country_payload("Indonesia", "IN"), None)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::DuplicateValue);
    assert!(err.message.contains("unique"));

    // The first row is unmodified and remains the only one
    let countries = db.list_countries().await.unwrap();
    assert_eq!(countries.len(), 1);
    assert_eq!(countries[0].country_id, first.country_id);
    assert_eq!(countries[0].country_name, "India");
}

#[tokio::test]
async fn test_country_create_validates_missing_fields() {
    let db = common::create_test_database().await;

    let err = db
        .create_country(
            &CountryPayload {
                country_name: String::new(),
                country_code: "  ".into(),
                capital: None,
                status: None,
            },
            None,
        )
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::MissingRequiredField);
    assert!(err.message.contains("country_name"));
    assert!(err.message.contains("country_code"));
}

#[tokio::test]
async fn test_country_update_is_full_replace() {
    let db = common::create_test_database().await;

    let created = db
        .create_country(&country_payload("India", "IN"), None)
        .await
        .unwrap();

    // Omitting capital on update writes NULL rather than preserving it
    let updated = db
        .update_country(
            created.country_id,
            &CountryPayload {
                country_name: "Bharat".into(),
                country_code: "IN".into(),
                capital: None,
                status: None,
            },
            Some(9),
        )
        .await
        .unwrap();

    assert_eq!(updated.country_name, "Bharat");
    assert_eq!(updated.capital, None);
    assert_eq!(updated.updated_by_id, Some(9));
    assert!(updated.updated_date.is_some());

    let fetched = db.get_country(created.country_id).await.unwrap().unwrap();
    assert_eq!(fetched.country_name, "Bharat");
    assert_eq!(fetched.capital, None);
}

#[tokio::test]
async fn test_update_missing_country_returns_not_found() {
    let db = common::create_test_database().await;

    let err = db
        .update_country(9999, &country_payload("Nowhere", "NW"), None)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
}

#[tokio::test]
async fn test_state_joins_country_name() {
    let db = common::create_test_database().await;

    let country = db
        .create_country(&country_payload("India", "IN"), None)
        .await
        .unwrap();

    let state = db
        .create_state(
            &StatePayload {
                state_name: "Kerala".into(),
                state_code: "KL".into(),
                capital: Some("Thiruvananthapuram".into()),
                country_id: Some(country.country_id),
                status: None,
            },
            None,
        )
        .await
        .unwrap();

    assert_eq!(state.country_name.as_deref(), Some("India"));

    let listed = db.list_states().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].country_name.as_deref(), Some("India"));
}

#[tokio::test]
async fn test_state_requires_country_reference() {
    let db = common::create_test_database().await;

    let err = db
        .create_state(
            &StatePayload {
                state_name: "Orphan".into(),
                state_code: "OR".into(),
                capital: None,
                country_id: None,
                status: None,
            },
            None,
        )
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::MissingRequiredField);
    assert!(err.message.contains("country_id"));

    // A dangling reference is rejected by the foreign key
    let err = db
        .create_state(
            &StatePayload {
                state_name: "Dangling".into(),
                state_code: "DG".into(),
                capital: None,
                country_id: Some(777),
                status: None,
            },
            None,
        )
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::DependentRowsExist);
}

#[tokio::test]
async fn test_delete_district_with_zone_fails_and_leaves_rows() {
    let db = common::create_test_database().await;

    let country = db
        .create_country(&country_payload("India", "IN"), None)
        .await
        .unwrap();
    let state = db
        .create_state(
            &StatePayload {
                state_name: "Kerala".into(),
                state_code: "KL".into(),
                capital: None,
                country_id: Some(country.country_id),
                status: None,
            },
            None,
        )
        .await
        .unwrap();
    let district = db
        .create_district(
            &DistrictPayload {
                district_name: "Ernakulam".into(),
                district_code: "EKM".into(),
                state_id: Some(state.state_id),
                status: None,
            },
            None,
        )
        .await
        .unwrap();
    let zone = db
        .create_zone(
            &ZonePayload {
                zone_name: "Fort Kochi".into(),
                zone_code: "FK".into(),
                district_id: Some(district.district_id),
                status: None,
            },
            None,
        )
        .await
        .unwrap();

    let err = db.delete_district(district.district_id).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::DependentRowsExist);
    assert!(err.message.contains("associated records"));

    // Both rows intact
    assert!(db
        .get_district(district.district_id)
        .await
        .unwrap()
        .is_some());
    assert!(db.get_zone(zone.zone_id).await.unwrap().is_some());

    // Removing the zone unblocks the district delete
    db.delete_zone(zone.zone_id).await.unwrap();
    db.delete_district(district.district_id).await.unwrap();
    assert!(db
        .get_district(district.district_id)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_delete_missing_country_returns_not_found() {
    let db = common::create_test_database().await;

    let err = db.delete_country(4242).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
}

#[tokio::test]
async fn test_list_countries_is_alphabetical_and_active_only() {
    let db = common::create_test_database().await;

    db.create_country(&country_payload("Zimbabwe", "ZW"), None)
        .await
        .unwrap();
    db.create_country(&country_payload("Austria", "AT"), None)
        .await
        .unwrap();
    let inactive = db
        .create_country(
            &CountryPayload {
                country_name: "Hidden".into(),
                country_code: "HD".into(),
                capital: None,
                status: Some(0),
            },
            None,
        )
        .await
        .unwrap();
    assert_eq!(inactive.status, 0);

    let names: Vec<String> = db
        .list_countries()
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.country_name)
        .collect();
    assert_eq!(names, vec!["Austria".to_owned(), "Zimbabwe".to_owned()]);
}
