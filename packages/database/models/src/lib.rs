#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Database row types and query parameter definitions.
//!
//! These types represent the shapes of data as stored in and retrieved from
//! the `SQLite` database. They are distinct from the API response types in
//! `ecopulse_server_models` and from the analytics snapshot types in
//! `ecopulse_analytics_models`.
//!
//! Zone statuses are carried as plain strings here: the `zone_statuses`
//! reference table is admin-editable, so rows may hold labels outside the
//! canonical [`ecopulse_zone_models::ZoneStatus`] scale. Ranking code
//! resolves labels through the enum and passes unknown ones through.

use ecopulse_zone_models::UserRole;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// A green zone row as retrieved from the database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneRow {
    /// Primary key.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// City the zone belongs to.
    pub city: String,
    /// Zone type label (park, square, ...).
    #[serde(rename = "type")]
    pub zone_type: String,
    /// Stored baseline status label; never overwritten by derived
    /// adjustment.
    pub status: String,
    /// Latitude (WGS84).
    pub lat: f64,
    /// Longitude (WGS84).
    pub lng: f64,
    /// Free-text area descriptor ("15 га", "500 м²").
    pub area: Option<String>,
    /// Free-text description.
    pub description: Option<String>,
    /// User who created the zone (or whose request materialized it).
    pub created_by: i64,
    /// Whether the zone passed moderation and shows on the map.
    pub is_approved: bool,
    /// Creation timestamp (RFC 3339).
    pub created_at: String,
    /// Timestamp of the last recorded maintenance, if any.
    pub last_maintenance: Option<String>,
}

/// A zone row joined with its count of open problem reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneWithProblems {
    /// The zone row.
    pub zone: ZoneRow,
    /// Count of problem reports still in the `new` state.
    pub open_problems: i64,
}

/// A citizen problem report row.
///
/// `user_name` is populated by queries that join against `users`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemReportRow {
    /// Primary key.
    pub id: i64,
    /// Zone the report is filed against.
    pub zone_id: i64,
    /// Reporting user.
    pub user_id: i64,
    /// Problem type label from the `problem_types` reference table.
    pub problem_type: String,
    /// Citizen-supplied description.
    pub description: String,
    /// Lifecycle status (`new` or `resolved`).
    pub status: String,
    /// Submission timestamp (RFC 3339).
    pub created_at: String,
    /// Resolution timestamp, if resolved.
    pub resolved_at: Option<String>,
    /// Reporter display name (join field).
    pub user_name: Option<String>,
}

/// A maintenance log entry row.
///
/// `user_name` is populated by queries that join against `users`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceLogRow {
    /// Primary key.
    pub id: i64,
    /// Zone the work was performed on.
    pub zone_id: i64,
    /// Staff member who performed the work.
    pub user_id: i64,
    /// Kind of work performed.
    pub action_type: String,
    /// Description of the work.
    pub description: String,
    /// Cost of the work, if recorded.
    pub cost: Option<f64>,
    /// Duration in minutes, if recorded.
    pub duration_minutes: Option<i64>,
    /// When the work was performed (RFC 3339).
    pub performed_at: String,
    /// Performer display name (join field).
    pub user_name: Option<String>,
}

/// A citizen zone submission awaiting moderation.
///
/// `user_name`/`user_email` are populated by queries that join `users`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneRequestRow {
    /// Primary key.
    pub id: i64,
    /// Submitting user.
    pub user_id: i64,
    /// Proposed zone name.
    pub name: String,
    /// City of the proposed zone.
    pub city: String,
    /// Proposed zone type label.
    #[serde(rename = "type")]
    pub zone_type: String,
    /// Latitude (WGS84).
    pub lat: f64,
    /// Longitude (WGS84).
    pub lng: f64,
    /// Free-text description.
    pub description: Option<String>,
    /// Lifecycle status (`pending`, `approved`, `rejected`).
    pub status: String,
    /// Reason given on rejection.
    pub rejection_reason: Option<String>,
    /// Submission timestamp (RFC 3339).
    pub created_at: String,
    /// Submitter display name (join field).
    pub user_name: Option<String>,
    /// Submitter email (join field).
    pub user_email: Option<String>,
}

/// A registered user row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRow {
    /// Primary key.
    pub id: i64,
    /// Login email, unique.
    pub email: String,
    /// Argon2 password hash.
    pub password_hash: String,
    /// Display name.
    pub name: String,
    /// Authority level.
    pub role: UserRole,
    /// Home city, if set.
    pub city: Option<String>,
    /// Registration timestamp (RFC 3339).
    pub created_at: String,
}

/// A row in the `cities` reference table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityRow {
    /// Primary key.
    pub id: i64,
    /// City name, unique.
    pub name: String,
    /// Map center latitude.
    pub lat: f64,
    /// Map center longitude.
    pub lng: f64,
    /// Initial map zoom level.
    pub zoom: i64,
    /// Soft-delete flag.
    pub is_active: bool,
}

/// A row in the `zone_types` or `problem_types` reference tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedEntryRow {
    /// Primary key.
    pub id: i64,
    /// Entry name, unique within its table.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Soft-delete flag.
    pub is_active: bool,
}

/// Count of rows sharing one label, for distribution charts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelCount {
    /// Grouping label (status, zone type, problem type, or city).
    pub label: String,
    /// Number of rows with that label.
    pub count: i64,
}

/// Per-zone-type breakdown of stored statuses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeStatusBreakdown {
    /// Zone type label.
    #[serde(rename = "type")]
    pub zone_type: String,
    /// Total zones of this type.
    pub total: i64,
    /// Zones with the `отличный` baseline status.
    pub excellent: i64,
    /// Zones with the `хороший` baseline status.
    pub good: i64,
    /// Zones with the `удовлетворительный` baseline status.
    pub satisfactory: i64,
    /// Zones with the `требует ухода` baseline status.
    pub needs_care: i64,
    /// Zones with the `критический` baseline status.
    pub critical: i64,
}

/// System-wide counters for the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminTotals {
    /// All zones, approved or not.
    pub total_zones: i64,
    /// All registered users.
    pub total_users: i64,
    /// All problem reports ever filed.
    pub total_reports: i64,
    /// Problem reports still in the `new` state.
    pub active_problems: i64,
    /// Maintenance log entries recorded.
    pub completed_maintenance: i64,
}

/// Payload for inserting a zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewZone {
    /// Display name.
    pub name: String,
    /// City the zone belongs to.
    pub city: String,
    /// Zone type label.
    pub zone_type: String,
    /// Baseline status label.
    pub status: String,
    /// Latitude (WGS84).
    pub lat: f64,
    /// Longitude (WGS84).
    pub lng: f64,
    /// Free-text area descriptor.
    pub area: Option<String>,
    /// Free-text description.
    pub description: Option<String>,
    /// Creating user.
    pub created_by: i64,
    /// Whether the zone is immediately visible (staff-created zones are).
    pub is_approved: bool,
}

/// Payload for updating a zone's editable fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneUpdate {
    /// Display name.
    pub name: String,
    /// City the zone belongs to.
    pub city: String,
    /// Zone type label.
    pub zone_type: String,
    /// Baseline status label.
    pub status: String,
    /// Latitude (WGS84).
    pub lat: f64,
    /// Longitude (WGS84).
    pub lng: f64,
    /// Free-text description.
    pub description: Option<String>,
}

/// Payload for inserting a citizen zone submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewZoneRequest {
    /// Submitting user.
    pub user_id: i64,
    /// Proposed zone name.
    pub name: String,
    /// City of the proposed zone.
    pub city: String,
    /// Proposed zone type label.
    pub zone_type: String,
    /// Latitude (WGS84).
    pub lat: f64,
    /// Longitude (WGS84).
    pub lng: f64,
    /// Free-text description.
    pub description: Option<String>,
}

/// Payload for inserting a citizen problem report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProblemReport {
    /// Zone the report is filed against.
    pub zone_id: i64,
    /// Reporting user.
    pub user_id: i64,
    /// Problem type label.
    pub problem_type: String,
    /// Citizen-supplied description.
    pub description: String,
}

/// Payload for inserting a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewUser {
    /// Login email.
    pub email: String,
    /// Argon2 password hash.
    pub password_hash: String,
    /// Display name.
    pub name: String,
    /// Authority level.
    pub role: UserRole,
    /// Home city, if given.
    pub city: Option<String>,
}

/// Admin-curated reference tables addressable through the dictionary API.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DictionaryKind {
    /// The `cities` table.
    Cities,
    /// The `zone_types` table.
    ZoneTypes,
    /// The `zone_statuses` table.
    Statuses,
    /// The `problem_types` table.
    ProblemTypes,
}

impl DictionaryKind {
    /// Returns the backing table name.
    #[must_use]
    pub const fn table(self) -> &'static str {
        match self {
            Self::Cities => "cities",
            Self::ZoneTypes => "zone_types",
            Self::Statuses => "zone_statuses",
            Self::ProblemTypes => "problem_types",
        }
    }
}

/// Payload for creating or updating a `cities` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityUpsert {
    /// City name.
    pub name: String,
    /// Map center latitude.
    pub lat: f64,
    /// Map center longitude.
    pub lng: f64,
    /// Initial map zoom level.
    pub zoom: i64,
    /// Soft-delete flag.
    pub is_active: bool,
}

/// Payload for creating or updating a `zone_statuses` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusUpsert {
    /// Display label.
    pub name: String,
    /// Map marker color (hex).
    pub color: String,
    /// Legend icon.
    pub icon: Option<String>,
    /// Display ordering weight.
    pub priority: i64,
    /// Soft-delete flag.
    pub is_active: bool,
}

/// Payload for creating or updating a `zone_types`/`problem_types` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedEntryUpsert {
    /// Entry name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Soft-delete flag.
    pub is_active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dictionary_kind_parses_api_segments() {
        assert_eq!(
            "zone_types".parse::<DictionaryKind>().unwrap(),
            DictionaryKind::ZoneTypes
        );
        assert_eq!(
            "statuses".parse::<DictionaryKind>().unwrap().table(),
            "zone_statuses"
        );
        assert!("users".parse::<DictionaryKind>().is_err());
    }
}
