//! Zone summary statistics.

use ecopulse_analytics_models::{ZoneSnapshot, ZoneStats};
use ecopulse_zone_models::ZoneStatus;

/// Reduces a set of zone snapshots to summary counts.
///
/// Classification uses the adjusted display status carried in the
/// snapshot. Labels outside the canonical scale count toward `total`
/// only. An empty input yields an all-zero result; `good_percent` uses
/// truncating integer division.
#[must_use]
pub fn calculate_zone_stats(zones: &[ZoneSnapshot]) -> ZoneStats {
    let total = zones.len() as u64;
    if total == 0 {
        return ZoneStats::default();
    }

    let mut good = 0u64;
    let mut needs_care = 0u64;
    let mut critical = 0u64;
    let mut problems_count = 0u64;

    for zone in zones {
        match zone.status.parse::<ZoneStatus>() {
            Ok(ZoneStatus::Excellent | ZoneStatus::Good) => good += 1,
            Ok(ZoneStatus::NeedsCare) => needs_care += 1,
            Ok(ZoneStatus::Critical) => critical += 1,
            _ => {}
        }
        problems_count += u64::from(zone.open_problems);
    }

    #[allow(clippy::cast_possible_truncation)]
    let good_percent = (good * 100 / total) as u8;

    ZoneStats {
        total,
        good,
        needs_care,
        critical,
        good_percent,
        problems_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(status: &str, open_problems: u32) -> ZoneSnapshot {
        ZoneSnapshot {
            name: "Городской парк".to_string(),
            city: "Барнаул".to_string(),
            zone_type: "парк".to_string(),
            status: status.to_string(),
            original_status: status.to_string(),
            area: Some("5 га".to_string()),
            open_problems,
        }
    }

    #[test]
    fn empty_input_yields_zeroes() {
        let stats = calculate_zone_stats(&[]);
        assert_eq!(stats, ZoneStats::default());
        assert_eq!(stats.good_percent, 0);
    }

    #[test]
    fn classifies_and_truncates_percentage() {
        let zones = vec![
            snapshot("хороший", 1),
            snapshot("отличный", 0),
            snapshot("критический", 3),
        ];

        let stats = calculate_zone_stats(&zones);

        assert_eq!(stats.total, 3);
        assert_eq!(stats.good, 2);
        assert_eq!(stats.needs_care, 0);
        assert_eq!(stats.critical, 1);
        assert_eq!(stats.good_percent, 66);
        assert_eq!(stats.problems_count, 4);
    }

    #[test]
    fn unknown_labels_count_toward_total_only() {
        let zones = vec![snapshot("заброшенный", 2), snapshot("требует ухода", 0)];

        let stats = calculate_zone_stats(&zones);

        assert_eq!(stats.total, 2);
        assert_eq!(stats.good, 0);
        assert_eq!(stats.needs_care, 1);
        assert_eq!(stats.problems_count, 2);
    }

    #[test]
    fn reduction_is_order_independent() {
        let mut zones = vec![
            snapshot("отличный", 1),
            snapshot("требует ухода", 2),
            snapshot("критический", 0),
            snapshot("хороший", 5),
        ];
        let forward = calculate_zone_stats(&zones);
        zones.reverse();
        assert_eq!(calculate_zone_stats(&zones), forward);
    }
}
