// ABOUTME: Common data models for master-data entities and request payloads
// ABOUTME: Row structs mirror the canonical schema; payload structs carry client input
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Innkeeper Systems

//! # Data Models
//!
//! Entity structs mirror one row of the canonical schema, denormalized with
//! the immediate parent's display name where the read queries join it.
//! Payload structs are the write-side counterparts: every optional field a
//! client may omit is an `Option` (or defaulted `String`), so required-field
//! validation can report ALL missing fields in one 400 instead of failing at
//! deserialization.
//!
//! Lifecycle convention: `status` is 1 for active rows and 0 for inactive or
//! soft-deleted rows. `created_date` is set by the database on insert;
//! `updated_date` is written on every full-document update.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Generic acknowledgement body for delete endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

// ── Location hierarchy ──────────────────────────────────────────────────

/// One row of `countries`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Country {
    pub country_id: i64,
    pub country_name: String,
    /// Unique across all countries
    pub country_code: String,
    pub capital: Option<String>,
    pub status: i64,
    pub created_by_id: Option<i64>,
    pub created_date: DateTime<Utc>,
    pub updated_by_id: Option<i64>,
    pub updated_date: Option<DateTime<Utc>>,
}

/// Create/update body for a country
#[derive(Debug, Clone, Deserialize)]
pub struct CountryPayload {
    #[serde(default)]
    pub country_name: String,
    #[serde(default)]
    pub country_code: String,
    pub capital: Option<String>,
    pub status: Option<i64>,
}

/// One row of `states`, denormalized with its country's name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct State {
    pub state_id: i64,
    pub state_name: String,
    pub state_code: String,
    pub capital: Option<String>,
    pub country_id: i64,
    /// Display name joined from `countries`
    pub country_name: Option<String>,
    pub status: i64,
    pub created_by_id: Option<i64>,
    pub created_date: DateTime<Utc>,
    pub updated_by_id: Option<i64>,
    pub updated_date: Option<DateTime<Utc>>,
}

/// Create/update body for a state
#[derive(Debug, Clone, Deserialize)]
pub struct StatePayload {
    #[serde(default)]
    pub state_name: String,
    #[serde(default)]
    pub state_code: String,
    pub capital: Option<String>,
    pub country_id: Option<i64>,
    pub status: Option<i64>,
}

/// One row of `districts`, denormalized with its state's name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct District {
    pub district_id: i64,
    pub district_name: String,
    pub district_code: String,
    pub state_id: i64,
    pub state_name: Option<String>,
    pub status: i64,
    pub created_by_id: Option<i64>,
    pub created_date: DateTime<Utc>,
    pub updated_by_id: Option<i64>,
    pub updated_date: Option<DateTime<Utc>>,
}

/// Create/update body for a district
#[derive(Debug, Clone, Deserialize)]
pub struct DistrictPayload {
    #[serde(default)]
    pub district_name: String,
    #[serde(default)]
    pub district_code: String,
    pub state_id: Option<i64>,
    pub status: Option<i64>,
}

/// One row of `zones`, denormalized with its district's name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Zone {
    pub zone_id: i64,
    pub zone_name: String,
    pub zone_code: String,
    pub district_id: i64,
    pub district_name: Option<String>,
    pub status: i64,
    pub created_by_id: Option<i64>,
    pub created_date: DateTime<Utc>,
    pub updated_by_id: Option<i64>,
    pub updated_date: Option<DateTime<Utc>>,
}

/// Create/update body for a zone
#[derive(Debug, Clone, Deserialize)]
pub struct ZonePayload {
    #[serde(default)]
    pub zone_name: String,
    #[serde(default)]
    pub zone_code: String,
    pub district_id: Option<i64>,
    pub status: Option<i64>,
}

// ── Catalog master data ─────────────────────────────────────────────────

/// One row of `units`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unit {
    pub unit_id: i64,
    pub unit_name: String,
    pub status: i64,
    pub created_by_id: Option<i64>,
    pub created_date: DateTime<Utc>,
    pub updated_by_id: Option<i64>,
    pub updated_date: Option<DateTime<Utc>>,
}

/// Create/update body for a unit
#[derive(Debug, Clone, Deserialize)]
pub struct UnitPayload {
    #[serde(default)]
    pub unit_name: String,
    pub status: Option<i64>,
}

/// One row of `categories`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub category_id: i64,
    pub category_name: String,
    pub description: Option<String>,
    pub status: i64,
    pub created_by_id: Option<i64>,
    pub created_date: DateTime<Utc>,
    pub updated_by_id: Option<i64>,
    pub updated_date: Option<DateTime<Utc>>,
}

/// Create/update body for a category
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryPayload {
    #[serde(default)]
    pub category_name: String,
    pub description: Option<String>,
    pub status: Option<i64>,
}

/// One row of `addons_master`, denormalized with its unit's name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Addon {
    pub addon_id: i64,
    pub addon_name: String,
    pub unit_id: i64,
    pub unit_name: Option<String>,
    pub rate: f64,
    pub status: i64,
    pub created_by_id: Option<i64>,
    pub created_date: DateTime<Utc>,
    pub updated_by_id: Option<i64>,
    pub updated_date: Option<DateTime<Utc>>,
}

/// Create/update body for an addon
#[derive(Debug, Clone, Deserialize)]
pub struct AddonPayload {
    #[serde(default)]
    pub addon_name: String,
    pub unit_id: Option<i64>,
    pub rate: Option<f64>,
    pub status: Option<i64>,
}

// ── Menu domain ─────────────────────────────────────────────────────────

/// One `menu_details` row: a priced variant of a menu item (e.g. half/full)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuVariant {
    pub menu_detail_id: i64,
    pub menu_id: i64,
    pub variant_type: String,
    pub rate: f64,
}

/// One `menuaddon` junction row, denormalized with addon display fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuAddonLink {
    pub menu_addon_id: i64,
    pub menu_id: i64,
    pub addon_id: i64,
    pub addon_name: Option<String>,
    pub rate: Option<f64>,
}

/// Master row of a menu item as returned by list endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemSummary {
    pub menu_id: i64,
    pub menu_name: String,
    pub category_id: i64,
    pub category_name: Option<String>,
    pub description: Option<String>,
    pub status: i64,
    pub created_by_id: Option<i64>,
    pub created_date: DateTime<Utc>,
    pub updated_by_id: Option<i64>,
    pub updated_date: Option<DateTime<Utc>>,
}

/// Full composite menu item: master row plus its owned variant and addon sets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    #[serde(flatten)]
    pub summary: MenuItemSummary,
    pub variants: Vec<MenuVariant>,
    pub addons: Vec<MenuAddonLink>,
}

/// Requested variant within a composite menu write
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MenuVariantPayload {
    pub variant_type: String,
    pub rate: f64,
}

/// Composite create/update body for a menu item.
///
/// The `variants` and `addons` collections are REPLACED wholesale on update:
/// the coordinator deletes every existing child row and inserts exactly this
/// set, inside one transaction.
#[derive(Debug, Clone, Deserialize)]
pub struct MenuItemPayload {
    #[serde(default)]
    pub menu_name: String,
    pub category_id: Option<i64>,
    pub description: Option<String>,
    pub status: Option<i64>,
    #[serde(default)]
    pub variants: Vec<MenuVariantPayload>,
    #[serde(default)]
    pub addons: Vec<i64>,
}

/// Body of the menu-addon bulk replace endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct ReplaceMenuAddonsPayload {
    #[serde(default)]
    pub addons: Vec<i64>,
}

// ── Actor tables ────────────────────────────────────────────────────────

/// One row of `superadmins` (credential hash never serialized)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Superadmin {
    pub superadmin_id: i64,
    pub name: String,
    pub email: String,
    pub status: i64,
    pub created_date: DateTime<Utc>,
    pub updated_date: Option<DateTime<Utc>>,
}

/// One row of `agents`, denormalized with location display names
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    pub agent_id: i64,
    pub agent_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub country_id: Option<i64>,
    pub state_id: Option<i64>,
    pub district_id: Option<i64>,
    pub zone_id: Option<i64>,
    pub country_name: Option<String>,
    pub state_name: Option<String>,
    pub status: i64,
    pub created_by_id: Option<i64>,
    pub created_date: DateTime<Utc>,
    pub updated_by_id: Option<i64>,
    pub updated_date: Option<DateTime<Utc>>,
}

/// Create/update body for an agent.
///
/// `password` is required on create and optional on update; when omitted on
/// update the stored hash is left unchanged (every other column is replaced).
#[derive(Debug, Clone, Deserialize)]
pub struct AgentPayload {
    #[serde(default)]
    pub agent_name: String,
    #[serde(default)]
    pub email: String,
    pub password: Option<String>,
    pub phone: Option<String>,
    pub country_id: Option<i64>,
    pub state_id: Option<i64>,
    pub district_id: Option<i64>,
    pub zone_id: Option<i64>,
    pub status: Option<i64>,
}

/// One row of `hotels`, denormalized with location display names
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hotel {
    pub hotel_id: i64,
    pub hotel_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub country_id: Option<i64>,
    pub state_id: Option<i64>,
    pub district_id: Option<i64>,
    pub zone_id: Option<i64>,
    pub country_name: Option<String>,
    pub state_name: Option<String>,
    /// Operating hours, stored as opaque display strings (e.g. "09:00")
    pub opening_time: Option<String>,
    pub closing_time: Option<String>,
    /// Owner KYC fields
    pub gst_number: Option<String>,
    pub pan_number: Option<String>,
    pub aadhar_number: Option<String>,
    pub status: i64,
    pub created_by_id: Option<i64>,
    pub created_date: DateTime<Utc>,
    pub updated_by_id: Option<i64>,
    pub updated_date: Option<DateTime<Utc>>,
}

/// Create/update body for a hotel. Password semantics match [`AgentPayload`].
#[derive(Debug, Clone, Deserialize)]
pub struct HotelPayload {
    #[serde(default)]
    pub hotel_name: String,
    #[serde(default)]
    pub email: String,
    pub password: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub country_id: Option<i64>,
    pub state_id: Option<i64>,
    pub district_id: Option<i64>,
    pub zone_id: Option<i64>,
    pub opening_time: Option<String>,
    pub closing_time: Option<String>,
    pub gst_number: Option<String>,
    pub pan_number: Option<String>,
    pub aadhar_number: Option<String>,
    pub status: Option<i64>,
}

/// Internal credential record used by the login flows.
///
/// Deliberately NOT serializable: the stored hash must never leave the
/// process, and all three actor tables project into this one shape so the
/// password check is written once.
#[derive(Debug, Clone)]
pub struct LoginAccount {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
}
