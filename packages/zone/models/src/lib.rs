#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Green-zone condition taxonomy and role definitions.
//!
//! This crate defines the canonical ordered zone status scale used across
//! the entire ecopulse system, the qualitative priority tiers produced by
//! the prediction engine, and the user role hierarchy. Status and priority
//! labels are the Russian display names that the reference tables and the
//! JSON API carry — the enum variants exist so that ranking logic never
//! falls back to string comparison.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Condition of a green zone, ordered best (`Excellent`) to worst
/// (`Critical`).
///
/// The discriminant is the rank used by the status adjustment algorithm:
/// adding problems can only move a zone toward `Critical`, never back up.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum ZoneStatus {
    /// Rank 0: freshly maintained, no issues.
    #[serde(rename = "отличный")]
    #[strum(serialize = "отличный")]
    Excellent = 0,
    /// Rank 1: minor wear, routine upkeep is enough.
    #[serde(rename = "хороший")]
    #[strum(serialize = "хороший")]
    Good = 1,
    /// Rank 2: acceptable, scheduled maintenance expected.
    #[serde(rename = "удовлетворительный")]
    #[strum(serialize = "удовлетворительный")]
    Satisfactory = 2,
    /// Rank 3: degradation visible, needs attention soon.
    #[serde(rename = "требует ухода")]
    #[strum(serialize = "требует ухода")]
    NeedsCare = 3,
    /// Rank 4: unusable or hazardous, urgent intervention.
    #[serde(rename = "критический")]
    #[strum(serialize = "критический")]
    Critical = 4,
}

impl ZoneStatus {
    /// Worst rank on the scale.
    pub const MAX_RANK: u8 = 4;

    /// Returns the numeric rank of this status (0 = best, 4 = worst).
    #[must_use]
    pub const fn rank(self) -> u8 {
        self as u8
    }

    /// Returns the status at the given rank, clamping out-of-range values
    /// to [`Self::Critical`].
    #[must_use]
    pub const fn from_rank(rank: u8) -> Self {
        match rank {
            0 => Self::Excellent,
            1 => Self::Good,
            2 => Self::Satisfactory,
            3 => Self::NeedsCare,
            _ => Self::Critical,
        }
    }

    /// Returns the status after degradation by the given count of open
    /// problem reports.
    ///
    /// Every 2 open problems push the status down one level; the drop is
    /// capped so the result never exceeds [`Self::Critical`] and never
    /// improves on the starting value.
    #[must_use]
    pub const fn degraded_by(self, open_problems: u32) -> Self {
        let drop = open_problems / 2;
        let drop = if drop > Self::MAX_RANK as u32 {
            Self::MAX_RANK as u32
        } else {
            drop
        };
        let rank = self.rank() as u32 + drop;
        let rank = if rank > Self::MAX_RANK as u32 {
            Self::MAX_RANK as u32
        } else {
            rank
        };
        #[allow(clippy::cast_possible_truncation)]
        let rank = rank as u8;
        Self::from_rank(rank)
    }

    /// Returns the map marker color for this status.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Excellent => "#4caf50",
            Self::Good => "#8bc34a",
            Self::Satisfactory => "#ffeb3b",
            Self::NeedsCare => "#ff9800",
            Self::Critical => "#f44336",
        }
    }

    /// Returns the legend icon for this status.
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Excellent | Self::Good => "\u{1f7e2}",
            Self::Satisfactory => "\u{1f7e1}",
            Self::NeedsCare => "\u{1f7e0}",
            Self::Critical => "\u{1f534}",
        }
    }

    /// Returns all statuses in rank order (best first).
    ///
    /// This is the fixed label ordering for status distributions.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Excellent,
            Self::Good,
            Self::Satisfactory,
            Self::NeedsCare,
            Self::Critical,
        ]
    }
}

/// Qualitative risk tier assigned by the prediction engine.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum Priority {
    /// Stable zone, no action expected.
    #[serde(rename = "низкий")]
    #[strum(serialize = "низкий")]
    Low,
    /// Preventive action recommended.
    #[serde(rename = "средний")]
    #[strum(serialize = "средний")]
    Medium,
    /// Intervention needed within days.
    #[serde(rename = "высокий")]
    #[strum(serialize = "высокий")]
    High,
    /// Urgent intervention required.
    #[serde(rename = "критический")]
    #[strum(serialize = "критический")]
    Critical,
}

impl Priority {
    /// Whether this tier warrants an operator-facing recommendation line.
    #[must_use]
    pub const fn is_urgent(self) -> bool {
        matches!(self, Self::High | Self::Critical)
    }
}

/// Role of a registered user, ordered by increasing authority.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum UserRole {
    /// Regular citizen: reports problems, submits zone requests.
    User,
    /// Moderates zone requests and edits zones.
    Moderator,
    /// Manages moderators and reference data on top of moderation rights.
    JuniorAdmin,
    /// Full authority, including role grants and user deletion.
    SuperAdmin,
}

impl UserRole {
    /// Whether this role may moderate content (requests, zones, stats).
    #[must_use]
    pub const fn is_staff(self) -> bool {
        matches!(self, Self::Moderator | Self::JuniorAdmin | Self::SuperAdmin)
    }

    /// Whether this role may manage users and reference data.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::JuniorAdmin | Self::SuperAdmin)
    }

    /// Whether this role holds full authority.
    #[must_use]
    pub const fn is_super_admin(self) -> bool {
        matches!(self, Self::SuperAdmin)
    }
}

/// Lifecycle state of a citizen problem report.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ReportStatus {
    /// Submitted and not yet handled; only these feed status adjustment.
    New,
    /// Closed by staff.
    Resolved,
}

/// Lifecycle state of a citizen zone submission.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RequestStatus {
    /// Awaiting moderation.
    Pending,
    /// Approved; a zone was materialized from it.
    Approved,
    /// Rejected with a reason.
    Rejected,
}

/// A row in the `zone_statuses` reference table.
///
/// The table mirrors [`ZoneStatus`] so administrators can adjust display
/// attributes, but rank ordering always comes from the enum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneStatusRecord {
    /// Database primary key.
    pub id: i64,
    /// Display label (Russian).
    pub name: String,
    /// Map marker color (hex).
    pub color: String,
    /// Legend icon.
    pub icon: Option<String>,
    /// Display ordering weight (higher = better condition).
    pub priority: i64,
    /// Soft-delete flag.
    pub is_active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_roundtrip() {
        for status in ZoneStatus::all() {
            assert_eq!(ZoneStatus::from_rank(status.rank()), *status);
        }
        assert_eq!(ZoneStatus::from_rank(9), ZoneStatus::Critical);
    }

    #[test]
    fn label_roundtrip() {
        for status in ZoneStatus::all() {
            let label = status.to_string();
            assert_eq!(label.parse::<ZoneStatus>().unwrap(), *status);
        }
        assert!("неизвестный".parse::<ZoneStatus>().is_err());
    }

    #[test]
    fn degradation_never_improves() {
        for status in ZoneStatus::all() {
            for problems in 0..20 {
                let adjusted = status.degraded_by(problems);
                assert!(
                    adjusted.rank() >= status.rank(),
                    "{status:?} improved to {adjusted:?} with {problems} problems"
                );
            }
        }
    }

    #[test]
    fn degradation_steps_and_caps() {
        assert_eq!(ZoneStatus::Excellent.degraded_by(0), ZoneStatus::Excellent);
        assert_eq!(ZoneStatus::Excellent.degraded_by(1), ZoneStatus::Excellent);
        assert_eq!(ZoneStatus::Excellent.degraded_by(2), ZoneStatus::Good);
        assert_eq!(ZoneStatus::Excellent.degraded_by(10), ZoneStatus::Critical);
        assert_eq!(ZoneStatus::Critical.degraded_by(100), ZoneStatus::Critical);
    }

    #[test]
    fn role_hierarchy() {
        assert!(UserRole::SuperAdmin.is_staff());
        assert!(UserRole::Moderator.is_staff());
        assert!(!UserRole::User.is_staff());
        assert!(UserRole::JuniorAdmin.is_admin());
        assert!(!UserRole::Moderator.is_admin());
        assert!(!UserRole::JuniorAdmin.is_super_admin());
    }

    #[test]
    fn role_labels() {
        assert_eq!(UserRole::JuniorAdmin.to_string(), "junior_admin");
        assert_eq!("super_admin".parse::<UserRole>().unwrap(), UserRole::SuperAdmin);
    }

    #[test]
    fn priority_urgency() {
        assert!(Priority::Critical.is_urgent());
        assert!(Priority::High.is_urgent());
        assert!(!Priority::Medium.is_urgent());
        assert_eq!(Priority::Critical.to_string(), "критический");
    }
}
