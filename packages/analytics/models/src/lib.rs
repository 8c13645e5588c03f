#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Input and output types for the zone analytics pipeline.
//!
//! A [`ZoneSnapshot`] is the per-request view of one zone that the HTTP
//! layer assembles from storage: the stored baseline status already pushed
//! through status adjustment, plus the open-problem count that drove the
//! adjustment. Every derived view (stats, costs, predictions) is computed
//! from a `&[ZoneSnapshot]` and never persisted.

use ecopulse_zone_models::Priority;
use serde::{Deserialize, Serialize};

/// Per-request view of one zone, as consumed by the aggregators.
///
/// `status` is the adjusted display status; `original_status` is the
/// stored baseline. Both are labels rather than enum values because the
/// status dictionary is admin-editable and unknown labels pass through
/// unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneSnapshot {
    /// Zone display name.
    pub name: String,
    /// City the zone belongs to.
    pub city: String,
    /// Zone type label.
    pub zone_type: String,
    /// Adjusted display status label.
    pub status: String,
    /// Stored baseline status label.
    pub original_status: String,
    /// Free-text area descriptor ("15 га", "500 м²").
    pub area: Option<String>,
    /// Count of open problem reports.
    pub open_problems: u32,
}

/// Summary counts over a set of zones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneStats {
    /// Total zones.
    pub total: u64,
    /// Zones in `отличный` or `хороший` condition.
    pub good: u64,
    /// Zones in `требует ухода` condition.
    pub needs_care: u64,
    /// Zones in `критический` condition.
    pub critical: u64,
    /// Truncated integer percentage of good zones (0 when there are none).
    pub good_percent: u8,
    /// Total open problem reports across all zones.
    pub problems_count: u64,
}

/// Recurring maintenance cost projection for one zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneCost {
    /// Zone display name.
    pub name: String,
    /// Parsed area in hectares.
    pub area: f64,
    /// Status label the rate was taken from.
    pub status: String,
    /// Monthly cost in currency units.
    pub monthly_cost: f64,
    /// Quarterly cost (monthly × 3).
    pub quarterly_cost: f64,
    /// Annual cost (monthly × 12).
    pub annual_cost: f64,
}

/// Aggregated maintenance cost estimate for a city.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CostEstimate {
    /// Total monthly cost across all zones.
    pub total_monthly: f64,
    /// Total quarterly cost (monthly × 3).
    pub total_quarterly: f64,
    /// Total annual cost (monthly × 12).
    pub total_annual: f64,
    /// Per-zone cost detail records.
    pub detailed: Vec<ZoneCost>,
}

/// Risk prediction for one zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZonePrediction {
    /// Zone display name.
    pub zone_name: String,
    /// Status label the prediction was derived from.
    pub current_status: String,
    /// Human-readable prediction text.
    pub prediction: String,
    /// Qualitative risk tier.
    pub priority: Priority,
    /// Recommended actions, in rule order.
    pub recommended_actions: Vec<String>,
}

/// Zone-count outlook derived from prediction priorities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusOutlook {
    /// Zones expected to stay in good shape (low priority).
    pub improve: u64,
    /// Zones at risk (high or critical priority).
    pub worsen: u64,
    /// Zones needing only preventive care (medium priority).
    pub stable: u64,
    /// Fixed advisory text.
    pub recommendation: String,
}

/// Budget projection derived from the cost estimate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetForecast {
    /// Monthly maintenance budget.
    pub monthly: f64,
    /// Quarterly maintenance budget.
    pub quarterly: f64,
    /// Annual maintenance budget.
    pub annual: f64,
    /// Recommended monthly budget with a 20% contingency margin.
    pub recommended: f64,
}

/// Caller-level prediction summary for the analytics API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionSummary {
    /// Zone-count outlook.
    pub status: StatusOutlook,
    /// Budget projection.
    pub budget: BudgetForecast,
    /// Up to 5 human-readable lines for high/critical priority zones.
    pub recommendations: Vec<String>,
}
