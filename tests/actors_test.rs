// ABOUTME: Integration tests for actor storage (superadmins, agents, hotels)
// ABOUTME: Validates transactional location validation, soft deletes, and login lookups
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Innkeeper Systems

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use innkeeper_server::database::Database;
use innkeeper_server::errors::ErrorCode;
use innkeeper_server::models::{AgentPayload, CountryPayload, HotelPayload, StatePayload};

const HASH: &str = "$2b$04$test.hash.placeholder.value.not.verified.here";

async fn seed_country_state(db: &Database) -> (i64, i64) {
    let country = db
        .create_country(
            &CountryPayload {
                country_name: "India".into(),
                country_code: "IN".into(),
                capital: None,
                status: None,
            },
            None,
        )
        .await
        .unwrap();
    let state = db
        .create_state(
            &StatePayload {
                state_name: "Goa".into(),
                state_code: "GA".into(),
                capital: None,
                country_id: Some(country.country_id),
                status: None,
            },
            None,
        )
        .await
        .unwrap();
    (country.country_id, state.state_id)
}

fn agent_payload(name: &str, email: &str, country_id: Option<i64>, state_id: Option<i64>) -> AgentPayload {
    AgentPayload {
        agent_name: name.into(),
        email: email.into(),
        password: None,
        phone: Some("9999999999".into()),
        country_id,
        state_id,
        district_id: None,
        zone_id: None,
        status: None,
    }
}

#[tokio::test]
async fn test_create_agent_with_location_and_lineage() {
    let db = common::create_test_database().await;
    let (country_id, state_id) = seed_country_state(&db).await;

    let agent = db
        .create_agent(
            &agent_payload("Travel Desk", "desk@example.com", Some(country_id), Some(state_id)),
            HASH,
            Some(1),
        )
        .await
        .unwrap();

    assert!(agent.agent_id > 0);
    assert_eq!(agent.country_name.as_deref(), Some("India"));
    assert_eq!(agent.state_name.as_deref(), Some("Goa"));
    assert_eq!(agent.created_by_id, Some(1));

    let listed = db.list_agents().await.unwrap();
    assert_eq!(listed.len(), 1);
}

#[tokio::test]
async fn test_create_agent_rejects_inactive_or_missing_location() {
    let db = common::create_test_database().await;

    // No locations seeded at all: reference cannot resolve
    let err = db
        .create_agent(
            &agent_payload("Lost", "lost@example.com", Some(404), None),
            HASH,
            None,
        )
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
    assert!(err.message.contains("country_id"));

    // Nothing was inserted
    assert!(db.list_agents().await.unwrap().is_empty());

    // An INACTIVE country is also rejected
    let country = db
        .create_country(
            &CountryPayload {
                country_name: "Ruritania".into(),
                country_code: "RU".into(),
                capital: None,
                status: Some(0),
            },
            None,
        )
        .await
        .unwrap();
    let err = db
        .create_agent(
            &agent_payload("Lost2", "lost2@example.com", Some(country.country_id), None),
            HASH,
            None,
        )
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
}

#[tokio::test]
async fn test_agent_email_uniqueness() {
    let db = common::create_test_database().await;

    db.create_agent(
        &agent_payload("First", "same@example.com", None, None),
        HASH,
        None,
    )
    .await
    .unwrap();

    let err = db
        .create_agent(
            &agent_payload("Second", "same@example.com", None, None),
            HASH,
            None,
        )
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::DuplicateValue);
    assert!(err.message.contains("Email"));
}

#[tokio::test]
async fn test_soft_delete_agent_hides_from_list_and_login() {
    let db = common::create_test_database().await;

    let password_hash = bcrypt::hash("hunter2-secret", common::TEST_BCRYPT_COST).unwrap();
    let agent = db
        .create_agent(
            &agent_payload("Leaver", "leaver@example.com", None, None),
            &password_hash,
            None,
        )
        .await
        .unwrap();

    assert!(db
        .get_agent_login("leaver@example.com")
        .await
        .unwrap()
        .is_some());

    db.soft_delete_agent(agent.agent_id).await.unwrap();

    // Hidden from list and login, but the row remains resolvable by id
    assert!(db.list_agents().await.unwrap().is_empty());
    assert!(db
        .get_agent_login("leaver@example.com")
        .await
        .unwrap()
        .is_none());
    let fetched = db.get_agent(agent.agent_id).await.unwrap().unwrap();
    assert_eq!(fetched.status, 0);

    // Repeating the soft delete still resolves the row (idempotent update)
    db.soft_delete_agent(agent.agent_id).await.unwrap();
    let err = db.soft_delete_agent(agent.agent_id + 50).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
}

#[tokio::test]
async fn test_update_agent_preserves_password_when_omitted() {
    let db = common::create_test_database().await;

    let original_hash = bcrypt::hash("original-pass", common::TEST_BCRYPT_COST).unwrap();
    let agent = db
        .create_agent(
            &agent_payload("Keeper", "keeper@example.com", None, None),
            &original_hash,
            None,
        )
        .await
        .unwrap();

    db.update_agent(
        agent.agent_id,
        &agent_payload("Keeper Renamed", "keeper@example.com", None, None),
        None,
        Some(7),
    )
    .await
    .unwrap();

    let login = db
        .get_agent_login("keeper@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(login.password_hash, original_hash);
    assert_eq!(login.name, "Keeper Renamed");

    // Supplying a new hash replaces the stored one
    let new_hash = bcrypt::hash("rotated-pass", common::TEST_BCRYPT_COST).unwrap();
    db.update_agent(
        agent.agent_id,
        &agent_payload("Keeper Renamed", "keeper@example.com", None, None),
        Some(&new_hash),
        Some(7),
    )
    .await
    .unwrap();

    let login = db
        .get_agent_login("keeper@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(login.password_hash, new_hash);
}

#[tokio::test]
async fn test_hotel_round_trip_with_kyc_fields() {
    let db = common::create_test_database().await;
    let (country_id, state_id) = seed_country_state(&db).await;

    let hotel = db
        .create_hotel(
            &HotelPayload {
                hotel_name: "Seaside Inn".into(),
                email: "stay@seaside.example.com".into(),
                password: None,
                phone: Some("8888888888".into()),
                address: Some("Beach Road 1".into()),
                country_id: Some(country_id),
                state_id: Some(state_id),
                district_id: None,
                zone_id: None,
                opening_time: Some("06:00".into()),
                closing_time: Some("23:00".into()),
                gst_number: Some("22AAAAA0000A1Z5".into()),
                pan_number: Some("AAAAA9999A".into()),
                aadhar_number: Some("1234-5678-9012".into()),
                status: None,
            },
            HASH,
            Some(2),
        )
        .await
        .unwrap();

    let fetched = db.get_hotel(hotel.hotel_id).await.unwrap().unwrap();
    assert_eq!(fetched.hotel_name, "Seaside Inn");
    assert_eq!(fetched.opening_time.as_deref(), Some("06:00"));
    assert_eq!(fetched.gst_number.as_deref(), Some("22AAAAA0000A1Z5"));
    assert_eq!(fetched.country_name.as_deref(), Some("India"));
    assert_eq!(fetched.created_by_id, Some(2));
}

#[tokio::test]
async fn test_superadmin_bootstrap_count_and_login_lookup() {
    let db = common::create_test_database().await;

    assert_eq!(db.superadmin_count().await.unwrap(), 0);
    common::seed_superadmin(&db, "root@example.com", "root-password").await;
    assert_eq!(db.superadmin_count().await.unwrap(), 1);

    let account = db
        .get_superadmin_login("root@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(account.email, "root@example.com");
    assert!(bcrypt::verify("root-password", &account.password_hash).unwrap());

    assert!(db
        .get_superadmin_login("nobody@example.com")
        .await
        .unwrap()
        .is_none());

    let err = db
        .create_superadmin("Another", "root@example.com", HASH)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::DuplicateValue);
}
