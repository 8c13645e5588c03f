//! Maintenance cost estimation.

use ecopulse_analytics_models::{CostEstimate, ZoneCost, ZoneSnapshot};
use ecopulse_zone_models::ZoneStatus;

use crate::area::parse_area;

/// Monthly maintenance rate when the status label is not on the canonical
/// scale, in currency units per hectare.
pub const FALLBACK_RATE: f64 = 10_000.0;

/// Returns the monthly maintenance rate for a status label, in currency
/// units per hectare.
///
/// Unknown labels are billed at the `удовлетворительный` rate.
#[must_use]
pub fn monthly_rate(status: &str) -> f64 {
    status
        .parse::<ZoneStatus>()
        .map_or(FALLBACK_RATE, |status| match status {
            ZoneStatus::Excellent => 5_000.0,
            ZoneStatus::Good => 7_500.0,
            ZoneStatus::Satisfactory => 10_000.0,
            ZoneStatus::NeedsCare => 15_000.0,
            ZoneStatus::Critical => 25_000.0,
        })
}

/// Projects recurring maintenance costs for the zones of one city.
///
/// Each zone contributes `area × rate(status)` per month. Quarterly and
/// annual figures are fixed multiples of the monthly ones, so the three
/// horizons stay consistent by construction.
#[must_use]
pub fn estimate_maintenance_cost(zones: &[ZoneSnapshot], city: &str) -> CostEstimate {
    let mut total_monthly = 0.0;
    let mut detailed = Vec::new();

    for zone in zones.iter().filter(|z| z.city == city) {
        let area = parse_area(zone.area.as_deref());
        let monthly = area * monthly_rate(&zone.status);
        total_monthly += monthly;

        detailed.push(ZoneCost {
            name: zone.name.clone(),
            area,
            status: zone.status.clone(),
            monthly_cost: monthly,
            quarterly_cost: monthly * 3.0,
            annual_cost: monthly * 12.0,
        });
    }

    CostEstimate {
        total_monthly,
        total_quarterly: total_monthly * 3.0,
        total_annual: total_monthly * 12.0,
        detailed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(name: &str, city: &str, status: &str, area: &str) -> ZoneSnapshot {
        ZoneSnapshot {
            name: name.to_string(),
            city: city.to_string(),
            zone_type: "парк".to_string(),
            status: status.to_string(),
            original_status: status.to_string(),
            area: Some(area.to_string()),
            open_problems: 0,
        }
    }

    #[test]
    fn critical_zone_monthly_quarterly_annual() {
        let zones = vec![snapshot("Парк Победы", "Барнаул", "критический", "2 га")];

        let estimate = estimate_maintenance_cost(&zones, "Барнаул");

        assert!((estimate.total_monthly - 50_000.0).abs() < f64::EPSILON);
        assert!((estimate.total_quarterly - 150_000.0).abs() < f64::EPSILON);
        assert!((estimate.total_annual - 600_000.0).abs() < f64::EPSILON);
        assert_eq!(estimate.detailed.len(), 1);
        assert!((estimate.detailed[0].annual_cost - 600_000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn filters_by_city() {
        let zones = vec![
            snapshot("Парк А", "Барнаул", "отличный", "1 га"),
            snapshot("Парк Б", "Бийск", "отличный", "1 га"),
        ];

        let estimate = estimate_maintenance_cost(&zones, "Бийск");

        assert_eq!(estimate.detailed.len(), 1);
        assert_eq!(estimate.detailed[0].name, "Парк Б");
        assert!((estimate.total_monthly - 5_000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn unknown_status_bills_at_fallback_rate() {
        let zones = vec![snapshot("Парк", "Барнаул", "заброшенный", "1 га")];

        let estimate = estimate_maintenance_cost(&zones, "Барнаул");

        assert!((estimate.total_monthly - FALLBACK_RATE).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_city_yields_zeroed_estimate() {
        let estimate = estimate_maintenance_cost(&[], "Барнаул");

        assert!(estimate.detailed.is_empty());
        assert!(estimate.total_monthly.abs() < f64::EPSILON);
        assert!(estimate.total_annual.abs() < f64::EPSILON);
    }

    #[test]
    fn missing_area_defaults_to_one_hectare() {
        let mut zone = snapshot("Парк", "Барнаул", "хороший", "");
        zone.area = None;

        let estimate = estimate_maintenance_cost(&[zone], "Барнаул");

        assert!((estimate.total_monthly - 7_500.0).abs() < f64::EPSILON);
    }
}
