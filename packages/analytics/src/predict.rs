//! Risk predictions and recommended actions.

use ecopulse_analytics_models::{
    BudgetForecast, CostEstimate, PredictionSummary, StatusOutlook, ZonePrediction, ZoneSnapshot,
};
use ecopulse_zone_models::{Priority, ZoneStatus};

/// Prediction text for healthy zones without open problems.
const PREDICTION_STABLE: &str = "Стабильное состояние на ближайший месяц";

/// Prediction text for healthy zones with open problems.
const PREDICTION_PREVENTIVE: &str = "Требуется профилактика в течение 2 недель";

/// Prediction text for zones needing care.
const PREDICTION_INTERVENE: &str = "Требуется вмешательство в течение недели";

/// Prediction text for critical zones.
const PREDICTION_URGENT: &str = "Срочное вмешательство требуется";

/// Action: site inspection.
const ACTION_INSPECT: &str = "Провести осмотр территории";

/// Action: remediation plan.
const ACTION_PLAN: &str = "Составить план восстановительных работ";

/// Action: review open problem reports.
const ACTION_REVIEW_PROBLEMS: &str = "Рассмотреть активные проблемы";

/// Action: allocate extra resources.
const ACTION_RESOURCES: &str = "Выделить дополнительные ресурсы";

/// Action: notify responsible parties.
const ACTION_NOTIFY: &str = "Уведомить ответственных лиц";

/// Action when no other rule fired.
const ACTION_NONE: &str = "Плановое обслуживание не требуется";

/// Fixed advisory line for the prediction summary.
const SUMMARY_RECOMMENDATION: &str =
    "Рекомендуется уделить внимание зонам с высоким приоритетом";

/// Maximum number of recommendation lines in the summary.
const MAX_RECOMMENDATIONS: usize = 5;

/// Generates a risk prediction for every zone snapshot.
///
/// Healthy zones (`отличный`/`хороший`) are stable or due for preventive
/// care depending on open problems; `требует ухода` needs intervention
/// within a week. Everything else — `критический`, `удовлетворительный`,
/// and unrecognized labels — falls into the urgent bucket.
#[must_use]
pub fn generate_predictions(zones: &[ZoneSnapshot]) -> Vec<ZonePrediction> {
    zones
        .iter()
        .map(|zone| {
            let (prediction, priority) = match zone.status.parse::<ZoneStatus>() {
                Ok(ZoneStatus::Excellent | ZoneStatus::Good) => {
                    if zone.open_problems == 0 {
                        (PREDICTION_STABLE, Priority::Low)
                    } else {
                        (PREDICTION_PREVENTIVE, Priority::Medium)
                    }
                }
                Ok(ZoneStatus::NeedsCare) => (PREDICTION_INTERVENE, Priority::High),
                _ => (PREDICTION_URGENT, Priority::Critical),
            };

            ZonePrediction {
                zone_name: zone.name.clone(),
                current_status: zone.status.clone(),
                prediction: prediction.to_string(),
                priority,
                recommended_actions: recommended_actions(&zone.status, zone.open_problems),
            }
        })
        .collect()
}

/// Builds the recommended-action list for a status label and problem
/// count.
///
/// Rules are evaluated in a fixed order and matches are appended, so the
/// output ordering is deterministic.
#[must_use]
pub fn recommended_actions(status: &str, open_problems: u32) -> Vec<String> {
    let parsed = status.parse::<ZoneStatus>().ok();
    let mut actions = Vec::new();

    if matches!(parsed, Some(ZoneStatus::NeedsCare | ZoneStatus::Critical)) {
        actions.push(ACTION_INSPECT.to_string());
        actions.push(ACTION_PLAN.to_string());
    }

    if open_problems > 0 {
        actions.push(ACTION_REVIEW_PROBLEMS.to_string());
    }

    if parsed == Some(ZoneStatus::Critical) {
        actions.push(ACTION_RESOURCES.to_string());
        actions.push(ACTION_NOTIFY.to_string());
    }

    if actions.is_empty() {
        actions.push(ACTION_NONE.to_string());
    }

    actions
}

/// Derives the caller-level summary from per-zone predictions and the
/// matching cost estimate.
///
/// Priority tiers partition the zone list into the outlook counters; the
/// recommended budget carries a 20% contingency margin on top of the
/// monthly total; recommendation lines cover high/critical zones only and
/// are truncated to [`MAX_RECOMMENDATIONS`].
#[must_use]
pub fn summarize_predictions(
    predictions: &[ZonePrediction],
    costs: &CostEstimate,
) -> PredictionSummary {
    let improve = predictions
        .iter()
        .filter(|p| p.priority == Priority::Low)
        .count() as u64;
    let stable = predictions
        .iter()
        .filter(|p| p.priority == Priority::Medium)
        .count() as u64;
    let worsen = predictions
        .iter()
        .filter(|p| p.priority.is_urgent())
        .count() as u64;

    let recommendations: Vec<String> = predictions
        .iter()
        .filter(|p| p.priority.is_urgent())
        .take(MAX_RECOMMENDATIONS)
        .map(|p| format!("Зона '{}': {}", p.zone_name, p.prediction))
        .collect();

    PredictionSummary {
        status: StatusOutlook {
            improve,
            worsen,
            stable,
            recommendation: SUMMARY_RECOMMENDATION.to_string(),
        },
        budget: BudgetForecast {
            monthly: costs.total_monthly,
            quarterly: costs.total_quarterly,
            annual: costs.total_annual,
            recommended: costs.total_monthly * 1.2,
        },
        recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(name: &str, status: &str, open_problems: u32) -> ZoneSnapshot {
        ZoneSnapshot {
            name: name.to_string(),
            city: "Барнаул".to_string(),
            zone_type: "парк".to_string(),
            status: status.to_string(),
            original_status: status.to_string(),
            area: Some("2 га".to_string()),
            open_problems,
        }
    }

    #[test]
    fn healthy_zone_without_problems_is_stable() {
        let predictions = generate_predictions(&[snapshot("Парк", "отличный", 0)]);

        assert_eq!(predictions[0].priority, Priority::Low);
        assert_eq!(predictions[0].prediction, PREDICTION_STABLE);
        assert_eq!(predictions[0].recommended_actions, vec![ACTION_NONE]);
    }

    #[test]
    fn healthy_zone_with_problems_needs_prevention() {
        let predictions = generate_predictions(&[snapshot("Парк", "хороший", 1)]);

        assert_eq!(predictions[0].priority, Priority::Medium);
        assert_eq!(predictions[0].prediction, PREDICTION_PREVENTIVE);
        assert_eq!(
            predictions[0].recommended_actions,
            vec![ACTION_REVIEW_PROBLEMS]
        );
    }

    #[test]
    fn needs_care_zone_gets_high_priority() {
        let predictions = generate_predictions(&[snapshot("Сквер", "требует ухода", 0)]);

        assert_eq!(predictions[0].priority, Priority::High);
        assert_eq!(
            predictions[0].recommended_actions,
            vec![ACTION_INSPECT, ACTION_PLAN]
        );
    }

    #[test]
    fn critical_zone_accumulates_all_actions() {
        let predictions = generate_predictions(&[snapshot("Парк", "критический", 1)]);

        assert_eq!(predictions[0].priority, Priority::Critical);
        assert_eq!(predictions[0].prediction, PREDICTION_URGENT);
        assert_eq!(
            predictions[0].recommended_actions,
            vec![
                ACTION_INSPECT,
                ACTION_PLAN,
                ACTION_REVIEW_PROBLEMS,
                ACTION_RESOURCES,
                ACTION_NOTIFY,
            ]
        );
    }

    #[test]
    fn summary_partitions_priorities() {
        let zones = vec![
            snapshot("А", "отличный", 0),
            snapshot("Б", "хороший", 2),
            snapshot("В", "требует ухода", 0),
            snapshot("Г", "критический", 4),
        ];
        let predictions = generate_predictions(&zones);
        let costs = crate::cost::estimate_maintenance_cost(&zones, "Барнаул");

        let summary = summarize_predictions(&predictions, &costs);

        assert_eq!(summary.status.improve, 1);
        assert_eq!(summary.status.stable, 1);
        assert_eq!(summary.status.worsen, 2);
        assert_eq!(
            summary.status.improve + summary.status.stable + summary.status.worsen,
            predictions.len() as u64
        );
        assert_eq!(summary.recommendations.len(), 2);
        assert!(summary.recommendations[0].starts_with("Зона 'В'"));
        assert!((summary.budget.recommended - costs.total_monthly * 1.2).abs() < f64::EPSILON);
    }

    #[test]
    fn summary_truncates_recommendations() {
        let zones: Vec<ZoneSnapshot> = (0..8)
            .map(|i| snapshot(&format!("Зона {i}"), "критический", 0))
            .collect();
        let predictions = generate_predictions(&zones);
        let costs = crate::cost::estimate_maintenance_cost(&zones, "Барнаул");

        let summary = summarize_predictions(&predictions, &costs);

        assert_eq!(summary.recommendations.len(), MAX_RECOMMENDATIONS);
    }

    #[test]
    fn predictions_are_idempotent() {
        let zones = vec![snapshot("Парк", "требует ухода", 3)];

        assert_eq!(generate_predictions(&zones), generate_predictions(&zones));
    }
}
