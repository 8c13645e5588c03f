//! Display status adjustment.
//!
//! A zone's stored baseline status never changes when citizens file
//! problem reports; instead the displayed status is degraded on the fly
//! from the open-report count.

use ecopulse_zone_models::ZoneStatus;

/// Returns the display status for a baseline status label and an open
/// problem count.
///
/// Every 2 open problems degrade the status one level, capped at
/// `критический`. Labels outside the canonical scale pass through
/// unchanged — the status dictionary is admin-editable and an unknown
/// label is not an error here.
#[must_use]
pub fn adjust_status(baseline: &str, open_problems: u32) -> String {
    baseline.parse::<ZoneStatus>().map_or_else(
        |_| baseline.to_string(),
        |status| status.degraded_by(open_problems).to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_problems_keeps_baseline() {
        assert_eq!(adjust_status("отличный", 0), "отличный");
    }

    #[test]
    fn one_problem_is_not_enough_to_degrade() {
        assert_eq!(adjust_status("хороший", 1), "хороший");
    }

    #[test]
    fn every_two_problems_degrade_one_level() {
        assert_eq!(adjust_status("отличный", 2), "хороший");
        assert_eq!(adjust_status("отличный", 4), "удовлетворительный");
        assert_eq!(adjust_status("хороший", 2), "удовлетворительный");
    }

    #[test]
    fn degradation_caps_at_critical() {
        assert_eq!(adjust_status("отличный", 10), "критический");
        assert_eq!(adjust_status("критический", 8), "критический");
    }

    #[test]
    fn unknown_labels_pass_through() {
        assert_eq!(adjust_status("заброшенный", 6), "заброшенный");
        assert_eq!(adjust_status("", 2), "");
    }

    #[test]
    fn adjusted_rank_never_improves() {
        for status in ZoneStatus::all() {
            for problems in 0..12 {
                let adjusted = adjust_status(&status.to_string(), problems)
                    .parse::<ZoneStatus>()
                    .unwrap();
                assert!(adjusted.rank() >= status.rank());
            }
        }
    }
}
