#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the ecopulse server.
//!
//! These types are serialized to JSON for the REST API. Field names match
//! the wire format the frontend was built against: snake_case for zone
//! and auth payloads, camelCase for the chart distribution keys.

use std::collections::BTreeMap;

use ecopulse_analytics_models::CostEstimate;
use ecopulse_database_models::{
    MaintenanceLogRow, ProblemReportRow, TypeStatusBreakdown, UserRow, ZoneRow,
};
use ecopulse_zone_models::UserRole;
use serde::{Deserialize, Serialize};

/// A zone as returned by the map endpoint.
///
/// `status` is the adjusted display status; `original_status` preserves
/// the stored baseline for clients that need both.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiZone {
    /// Zone id.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Zone type label.
    #[serde(rename = "type")]
    pub zone_type: String,
    /// Adjusted display status label.
    pub status: String,
    /// Latitude (WGS84).
    pub lat: f64,
    /// Longitude (WGS84).
    pub lng: f64,
    /// Free-text area descriptor.
    pub area: Option<String>,
    /// Free-text description.
    pub description: Option<String>,
    /// Count of open problem reports.
    pub problems_count: u32,
    /// Stored baseline status label.
    pub original_status: String,
}

/// Query parameters selecting a city.
#[derive(Debug, Clone, Deserialize)]
pub struct CityQuery {
    /// City name; the server falls back to its default city when absent.
    pub city: Option<String>,
}

/// Zone detail response: the row plus recent activity.
#[derive(Debug, Clone, Serialize)]
pub struct ApiZoneDetails {
    /// The zone row.
    pub zone: ZoneRow,
    /// Most recent problem reports (up to 5).
    pub problems: Vec<ProblemReportRow>,
    /// Most recent maintenance log entries (up to 5).
    pub maintenance: Vec<MaintenanceLogRow>,
}

/// Body of a citizen problem report.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportProblemRequest {
    /// Zone the report is filed against.
    pub zone_id: i64,
    /// Problem type label.
    pub problem_type: String,
    /// Description of the problem.
    pub description: String,
}

/// Body of a citizen zone submission.
#[derive(Debug, Clone, Deserialize)]
pub struct ZoneSubmission {
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
}

/// Body of a staff direct zone creation.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminZonePayload {
    /// Zone name.
    pub name: String,
    /// City the zone belongs to.
    pub city: String,
    /// Zone type label.
    #[serde(rename = "type")]
    pub zone_type: String,
    /// Baseline status label; defaults to `удовлетворительный`.
    pub status: Option<String>,
    /// Latitude (WGS84).
    pub lat: f64,
    /// Longitude (WGS84).
    pub lng: f64,
    /// Free-text description.
    pub description: Option<String>,
}

/// Body of a staff zone edit.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateZonePayload {
    /// Zone name.
    pub name: String,
    /// City the zone belongs to.
    pub city: String,
    /// Zone type label.
    #[serde(rename = "type")]
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

/// Body of a zone request rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct RejectPayload {
    /// Reason shown to the submitter; defaults to a placeholder.
    pub reason: Option<String>,
}

/// Body of a role change that requires password re-confirmation.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfirmPayload {
    /// The acting administrator's own password.
    pub admin_password: Option<String>,
}

/// Body of a registration request.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    /// Login email.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Password.
    pub password: String,
    /// Password confirmation.
    pub confirm_password: String,
    /// Home city.
    pub city: String,
}

/// Body of a login request.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    /// Login email.
    pub email: String,
    /// Password.
    pub password: String,
}

/// A user as exposed by the API (never includes the password hash).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiUser {
    /// User id.
    pub id: i64,
    /// Login email.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Authority level.
    pub role: UserRole,
    /// Home city, if set.
    pub city: Option<String>,
    /// Registration timestamp (RFC 3339).
    pub created_at: String,
}

impl From<&UserRow> for ApiUser {
    fn from(row: &UserRow) -> Self {
        Self {
            id: row.id,
            email: row.email.clone(),
            name: row.name.clone(),
            role: row.role,
            city: row.city.clone(),
            created_at: row.created_at.clone(),
        }
    }
}

/// Response to a successful login or registration.
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    /// Bearer token for subsequent requests.
    pub token: String,
    /// The authenticated user.
    pub user: ApiUser,
}

/// Headline metrics of the analytics summary.
#[derive(Debug, Clone, Serialize)]
pub struct ApiMetrics {
    /// Total approved zones in the city.
    pub total_zones: u64,
    /// Zones in good condition.
    pub good_zones: u64,
    /// Zones needing care or in critical condition.
    pub problem_zones: u64,
    /// Open problem reports across the city.
    pub maintenance_count: u64,
}

/// Parallel label/value arrays for one chart.
#[derive(Debug, Clone, Serialize)]
pub struct Distribution {
    /// Chart labels.
    pub labels: Vec<String>,
    /// Counts aligned with `labels`.
    pub values: Vec<i64>,
}

/// Response of the analytics summary endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsData {
    /// Headline metrics.
    pub metrics: ApiMetrics,
    /// Zone counts over the fixed status label ordering.
    #[serde(rename = "statusDistribution")]
    pub status_distribution: Distribution,
    /// Zone counts by type (data-driven label ordering).
    #[serde(rename = "typeDistribution")]
    pub type_distribution: Distribution,
    /// Open problem counts by problem type.
    #[serde(rename = "problemsByType")]
    pub problems_by_type: Distribution,
}

/// Response of the detailed analytics endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct DetailedStats {
    /// Per-type status breakdown.
    pub zones: Vec<TypeStatusBreakdown>,
    /// Maintenance cost estimate for the city.
    pub costs: CostEstimate,
}

/// Count of open problem reports for one problem type.
#[derive(Debug, Clone, Serialize)]
pub struct ProblemTypeCount {
    /// Problem type label.
    pub problem_type: String,
    /// Number of open reports.
    pub count: i64,
}

/// Response of the admin statistics endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct AdminStatistics {
    /// All zones, approved or not.
    pub total_zones: i64,
    /// All registered users.
    pub total_users: i64,
    /// All problem reports ever filed.
    pub total_reports: i64,
    /// Problem reports still open.
    pub active_problems: i64,
    /// Maintenance log entries recorded.
    pub completed_maintenance: i64,
    /// Open problem reports by type, across all cities.
    pub problems_by_type: Vec<ProblemTypeCount>,
    /// Zone counts by city.
    pub zones_by_city: BTreeMap<String, i64>,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}

/// Body for creating or updating a city dictionary entry.
#[derive(Debug, Clone, Deserialize)]
pub struct CityPayload {
    /// City name.
    pub name: String,
    /// Map center latitude.
    pub lat: f64,
    /// Map center longitude.
    pub lng: f64,
    /// Initial map zoom level.
    pub zoom: i64,
    /// Soft-delete flag; defaults to active.
    pub is_active: Option<bool>,
}

/// Body for creating or updating a zone status dictionary entry.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusPayload {
    /// Display label.
    pub name: String,
    /// Map marker color (hex).
    pub color: String,
    /// Legend icon.
    pub icon: Option<String>,
    /// Display ordering weight.
    pub priority: i64,
    /// Soft-delete flag; defaults to active.
    pub is_active: Option<bool>,
}

/// Body for creating or updating a zone type or problem type entry.
#[derive(Debug, Clone, Deserialize)]
pub struct NamedEntryPayload {
    /// Entry name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Soft-delete flag; defaults to active.
    pub is_active: Option<bool>,
}
