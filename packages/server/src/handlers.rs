//! HTTP handler functions for the public ecopulse API.
//!
//! Covers the health check, the zone map, zone details, the reference
//! dictionaries, the analytics endpoints, authentication, and the
//! citizen-facing submission endpoints. Staff-only handlers live in
//! [`crate::admin`].

use actix_web::{HttpResponse, web};
use ecopulse_analytics::{cost, predict, stats, status};
use ecopulse_analytics_models::ZoneSnapshot;
use ecopulse_auth::{AuthUser, JwtService};
use ecopulse_database::{DbError, queries};
use ecopulse_database_models::{
    DictionaryKind, NewProblemReport, NewZoneRequest, ZoneWithProblems,
};
use ecopulse_server_models::{
    AnalyticsData, ApiHealth, ApiMetrics, ApiUser, ApiZone, ApiZoneDetails, AuthResponse,
    CityQuery, DetailedStats, Distribution, LoginRequest, RegisterRequest, ReportProblemRequest,
    ZoneSubmission,
};
use ecopulse_zone_models::{UserRole, ZoneStatus};

use crate::AppState;

/// City assumed when a request doesn't name one.
pub const DEFAULT_CITY: &str = "Барнаул";

/// Number of recent problem/maintenance entries in a zone detail
/// response.
const RECENT_LIMIT: u32 = 5;

/// Logs a failed database operation and produces the uniform 500
/// response.
pub fn db_error(context: &str, e: &DbError) -> HttpResponse {
    log::error!("{context}: {e}");
    HttpResponse::InternalServerError().json(serde_json::json!({
        "error": "Ошибка базы данных"
    }))
}

/// Whether the pair is a plausible WGS84 coordinate.
pub const fn valid_coordinates(lat: f64, lng: f64) -> bool {
    lat >= -90.0 && lat <= 90.0 && lng >= -180.0 && lng <= 180.0
}

/// The uniform 400 response for out-of-range coordinates.
pub fn bad_coordinates() -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({
        "error": "Некорректные координаты"
    }))
}

/// Builds the per-request analytics snapshots: adjusted display status
/// plus open-problem count per zone.
pub fn snapshot_zones(zones: &[ZoneWithProblems]) -> Vec<ZoneSnapshot> {
    zones
        .iter()
        .map(|z| {
            let open_problems = u32::try_from(z.open_problems).unwrap_or(0);
            ZoneSnapshot {
                name: z.zone.name.clone(),
                city: z.zone.city.clone(),
                zone_type: z.zone.zone_type.clone(),
                status: status::adjust_status(&z.zone.status, open_problems),
                original_status: z.zone.status.clone(),
                area: z.zone.area.clone(),
                open_problems,
            }
        })
        .collect()
}

fn requested_city(params: &CityQuery) -> String {
    params
        .city
        .clone()
        .unwrap_or_else(|| DEFAULT_CITY.to_string())
}

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/zones`
///
/// Returns the approved zones of a city with their adjusted display
/// status and open-problem counts.
pub async fn zones(state: web::Data<AppState>, params: web::Query<CityQuery>) -> HttpResponse {
    let city = requested_city(&params);

    match queries::approved_zones_with_problems(state.db.as_ref(), &city).await {
        Ok(rows) => {
            let zones: Vec<ApiZone> = rows
                .iter()
                .map(|z| {
                    let open_problems = u32::try_from(z.open_problems).unwrap_or(0);
                    ApiZone {
                        id: z.zone.id,
                        name: z.zone.name.clone(),
                        zone_type: z.zone.zone_type.clone(),
                        status: status::adjust_status(&z.zone.status, open_problems),
                        lat: z.zone.lat,
                        lng: z.zone.lng,
                        area: z.zone.area.clone(),
                        description: z.zone.description.clone(),
                        problems_count: open_problems,
                        original_status: z.zone.status.clone(),
                    }
                })
                .collect();

            HttpResponse::Ok().json(zones)
        }
        Err(e) => db_error("Failed to query zones", &e),
    }
}

/// `GET /api/zone/{id}`
///
/// Returns a zone with its recent problem reports and maintenance log.
pub async fn zone_details(state: web::Data<AppState>, path: web::Path<i64>) -> HttpResponse {
    let zone_id = path.into_inner();

    let zone = match queries::zone_by_id(state.db.as_ref(), zone_id).await {
        Ok(Some(zone)) => zone,
        Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": "Zone not found"
            }));
        }
        Err(e) => return db_error("Failed to query zone", &e),
    };

    let problems = match queries::recent_problems(state.db.as_ref(), zone_id, RECENT_LIMIT).await {
        Ok(problems) => problems,
        Err(e) => return db_error("Failed to query zone problems", &e),
    };

    let maintenance =
        match queries::recent_maintenance(state.db.as_ref(), zone_id, RECENT_LIMIT).await {
            Ok(maintenance) => maintenance,
            Err(e) => return db_error("Failed to query zone maintenance", &e),
        };

    HttpResponse::Ok().json(ApiZoneDetails {
        zone,
        problems,
        maintenance,
    })
}

/// `GET /api/dictionaries/{dict_type}`
///
/// Returns the active entries of a reference dictionary.
pub async fn dictionary(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let Ok(kind) = path.into_inner().parse::<DictionaryKind>() else {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Invalid dictionary type"
        }));
    };

    match kind {
        DictionaryKind::Cities => match queries::list_cities(state.db.as_ref()).await {
            Ok(cities) => HttpResponse::Ok().json(cities),
            Err(e) => db_error("Failed to query cities", &e),
        },
        DictionaryKind::Statuses => match queries::list_zone_statuses(state.db.as_ref()).await {
            Ok(statuses) => HttpResponse::Ok().json(statuses),
            Err(e) => db_error("Failed to query statuses", &e),
        },
        DictionaryKind::ZoneTypes | DictionaryKind::ProblemTypes => {
            match queries::list_named_entries(state.db.as_ref(), kind).await {
                Ok(entries) => HttpResponse::Ok().json(entries),
                Err(e) => db_error("Failed to query dictionary", &e),
            }
        }
    }
}

/// `GET /api/analytics/data`
///
/// Returns the headline metrics and the three distribution charts for a
/// city.
pub async fn analytics_data(
    state: web::Data<AppState>,
    params: web::Query<CityQuery>,
) -> HttpResponse {
    let city = requested_city(&params);

    let rows = match queries::approved_zones_with_problems(state.db.as_ref(), &city).await {
        Ok(rows) => rows,
        Err(e) => return db_error("Failed to query zones", &e),
    };
    let snapshots = snapshot_zones(&rows);
    let zone_stats = stats::calculate_zone_stats(&snapshots);

    // Fixed label ordering for statuses; adjusted statuses are counted so
    // the chart matches the map and the headline metrics.
    let status_labels: Vec<String> = ZoneStatus::all().iter().map(ToString::to_string).collect();
    let status_values: Vec<i64> = status_labels
        .iter()
        .map(|label| {
            i64::try_from(snapshots.iter().filter(|s| s.status == *label).count()).unwrap_or(0)
        })
        .collect();

    let type_counts = match queries::type_distribution(state.db.as_ref(), &city).await {
        Ok(counts) => counts,
        Err(e) => return db_error("Failed to query type distribution", &e),
    };

    let problem_counts = match queries::open_problem_distribution(state.db.as_ref(), &city).await {
        Ok(counts) => counts,
        Err(e) => return db_error("Failed to query problem distribution", &e),
    };

    HttpResponse::Ok().json(AnalyticsData {
        metrics: ApiMetrics {
            total_zones: zone_stats.total,
            good_zones: zone_stats.good,
            problem_zones: zone_stats.needs_care + zone_stats.critical,
            maintenance_count: zone_stats.problems_count,
        },
        status_distribution: Distribution {
            labels: status_labels,
            values: status_values,
        },
        type_distribution: Distribution {
            labels: type_counts.iter().map(|c| c.label.clone()).collect(),
            values: type_counts.iter().map(|c| c.count).collect(),
        },
        problems_by_type: Distribution {
            labels: problem_counts.iter().map(|c| c.label.clone()).collect(),
            values: problem_counts.iter().map(|c| c.count).collect(),
        },
    })
}

/// `GET /api/analytics/detailed`
///
/// Returns the per-type status breakdown and the maintenance cost
/// estimate for a city.
pub async fn analytics_detailed(
    state: web::Data<AppState>,
    params: web::Query<CityQuery>,
) -> HttpResponse {
    let city = requested_city(&params);

    let breakdown = match queries::type_status_breakdown(state.db.as_ref(), &city).await {
        Ok(breakdown) => breakdown,
        Err(e) => return db_error("Failed to query type breakdown", &e),
    };

    let rows = match queries::approved_zones_with_problems(state.db.as_ref(), &city).await {
        Ok(rows) => rows,
        Err(e) => return db_error("Failed to query zones", &e),
    };
    let snapshots = snapshot_zones(&rows);

    HttpResponse::Ok().json(DetailedStats {
        zones: breakdown,
        costs: cost::estimate_maintenance_cost(&snapshots, &city),
    })
}

/// `GET /api/analytics/predictions`
///
/// Returns the prediction summary: outlook counters, budget projection,
/// and up to 5 recommendation lines.
pub async fn analytics_predictions(
    state: web::Data<AppState>,
    params: web::Query<CityQuery>,
) -> HttpResponse {
    let city = requested_city(&params);

    let rows = match queries::approved_zones_with_problems(state.db.as_ref(), &city).await {
        Ok(rows) => rows,
        Err(e) => return db_error("Failed to query zones", &e),
    };
    let snapshots = snapshot_zones(&rows);

    let predictions = predict::generate_predictions(&snapshots);
    let costs = cost::estimate_maintenance_cost(&snapshots, &city);

    HttpResponse::Ok().json(predict::summarize_predictions(&predictions, &costs))
}

/// `GET /api/analytics/chart/{chart_type}`
///
/// Returns label/value arrays for the requested chart. Maintenance costs
/// are reported in thousands of currency units.
pub async fn analytics_chart(
    state: web::Data<AppState>,
    path: web::Path<String>,
    params: web::Query<CityQuery>,
) -> HttpResponse {
    let city = requested_city(&params);

    match path.into_inner().as_str() {
        "problem-types" => {
            match queries::open_problem_distribution(state.db.as_ref(), &city).await {
                Ok(counts) => HttpResponse::Ok().json(serde_json::json!({
                    "labels": counts.iter().map(|c| c.label.clone()).collect::<Vec<_>>(),
                    "values": counts.iter().map(|c| c.count).collect::<Vec<_>>(),
                })),
                Err(e) => db_error("Failed to query problem distribution", &e),
            }
        }
        "maintenance-costs" => {
            let rows = match queries::approved_zones_with_problems(state.db.as_ref(), &city).await
            {
                Ok(rows) => rows,
                Err(e) => return db_error("Failed to query zones", &e),
            };
            let snapshots = snapshot_zones(&rows);

            let mut types: Vec<String> = Vec::new();
            for snapshot in &snapshots {
                if !types.contains(&snapshot.zone_type) {
                    types.push(snapshot.zone_type.clone());
                }
            }

            let values: Vec<f64> = types
                .iter()
                .map(|zone_type| {
                    let of_type: Vec<ZoneSnapshot> = snapshots
                        .iter()
                        .filter(|s| s.zone_type == *zone_type)
                        .cloned()
                        .collect();
                    cost::estimate_maintenance_cost(&of_type, &city).total_monthly / 1000.0
                })
                .collect();

            HttpResponse::Ok().json(serde_json::json!({
                "labels": types,
                "values": values,
            }))
        }
        _ => HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Invalid chart type"
        })),
    }
}

/// `POST /api/auth/register`
///
/// Creates a citizen account and returns a bearer token.
pub async fn register(
    state: web::Data<AppState>,
    jwt: web::Data<JwtService>,
    body: web::Json<RegisterRequest>,
) -> HttpResponse {
    if let Err(message) = ecopulse_auth::validate::validate_registration(
        &body.email,
        &body.name,
        &body.password,
        &body.confirm_password,
        &body.city,
    ) {
        return HttpResponse::BadRequest().json(serde_json::json!({ "error": message }));
    }

    match queries::user_by_email(state.db.as_ref(), &body.email).await {
        Ok(Some(_)) => {
            return HttpResponse::BadRequest().json(serde_json::json!({
                "error": "Пользователь с таким email уже существует"
            }));
        }
        Ok(None) => {}
        Err(e) => return db_error("Failed to query user", &e),
    }

    let password_hash = match ecopulse_auth::password::hash_password(&body.password) {
        Ok(hash) => hash,
        Err(e) => {
            log::error!("Failed to hash password: {e}");
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Внутренняя ошибка сервера"
            }));
        }
    };

    let new_user = ecopulse_database_models::NewUser {
        email: body.email.clone(),
        password_hash,
        name: body.name.clone(),
        role: UserRole::User,
        city: Some(body.city.clone()),
    };

    let user_id = match queries::insert_user(state.db.as_ref(), &new_user).await {
        Ok(id) => id,
        Err(e) => return db_error("Failed to insert user", &e),
    };

    let user = match queries::user_by_id(state.db.as_ref(), user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Внутренняя ошибка сервера"
            }));
        }
        Err(e) => return db_error("Failed to query user", &e),
    };

    issue_auth_response(&jwt, &user)
}

/// `POST /api/auth/login`
///
/// Verifies credentials and returns a bearer token.
pub async fn login(
    state: web::Data<AppState>,
    jwt: web::Data<JwtService>,
    body: web::Json<LoginRequest>,
) -> HttpResponse {
    let user = match queries::user_by_email(state.db.as_ref(), &body.email).await {
        Ok(user) => user,
        Err(e) => return db_error("Failed to query user", &e),
    };

    let Some(user) = user else {
        return invalid_credentials();
    };

    if !ecopulse_auth::password::verify_password(&user.password_hash, &body.password) {
        return invalid_credentials();
    }

    issue_auth_response(&jwt, &user)
}

fn invalid_credentials() -> HttpResponse {
    HttpResponse::Unauthorized().json(serde_json::json!({
        "error": "Неверный email или пароль"
    }))
}

fn issue_auth_response(
    jwt: &JwtService,
    user: &ecopulse_database_models::UserRow,
) -> HttpResponse {
    match jwt.issue(
        user.id,
        &user.email,
        &user.name,
        user.role,
        user.city.as_deref(),
    ) {
        Ok(token) => HttpResponse::Ok().json(AuthResponse {
            token,
            user: ApiUser::from(user),
        }),
        Err(e) => {
            log::error!("Failed to issue token: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Внутренняя ошибка сервера"
            }))
        }
    }
}

/// `POST /api/report-problem`
///
/// Files a citizen problem report against a zone.
pub async fn report_problem(
    state: web::Data<AppState>,
    user: AuthUser,
    body: web::Json<ReportProblemRequest>,
) -> HttpResponse {
    let report = NewProblemReport {
        zone_id: body.zone_id,
        user_id: user.id,
        problem_type: body.problem_type.clone(),
        description: body.description.clone(),
    };

    match queries::insert_problem_report(state.db.as_ref(), &report).await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "success": true })),
        Err(e) => db_error("Failed to insert problem report", &e),
    }
}

/// `POST /api/zone-requests`
///
/// Submits a citizen zone request for moderation.
pub async fn submit_zone_request(
    state: web::Data<AppState>,
    user: AuthUser,
    body: web::Json<ZoneSubmission>,
) -> HttpResponse {
    if !valid_coordinates(body.lat, body.lng) {
        return bad_coordinates();
    }

    let request = NewZoneRequest {
        user_id: user.id,
        name: body.name.clone(),
        city: body.city.clone(),
        zone_type: body.zone_type.clone(),
        lat: body.lat,
        lng: body.lng,
        description: body.description.clone(),
    };

    match queries::insert_zone_request(state.db.as_ref(), &request).await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "message": "Заявка на добавление зоны отправлена на рассмотрение"
        })),
        Err(e) => db_error("Failed to insert zone request", &e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecopulse_database_models::ZoneRow;

    fn zone_with_problems(status: &str, open_problems: i64) -> ZoneWithProblems {
        ZoneWithProblems {
            zone: ZoneRow {
                id: 1,
                name: "Городской парк".to_string(),
                city: "Барнаул".to_string(),
                zone_type: "парк".to_string(),
                status: status.to_string(),
                lat: 53.36,
                lng: 83.76,
                area: Some("5 га".to_string()),
                description: None,
                created_by: 1,
                is_approved: true,
                created_at: "2025-01-01T00:00:00Z".to_string(),
                last_maintenance: None,
            },
            open_problems,
        }
    }

    #[test]
    fn snapshots_carry_adjusted_and_baseline_status() {
        let snapshots = snapshot_zones(&[zone_with_problems("отличный", 4)]);

        assert_eq!(snapshots[0].status, "удовлетворительный");
        assert_eq!(snapshots[0].original_status, "отличный");
        assert_eq!(snapshots[0].open_problems, 4);
    }

    #[test]
    fn snapshots_tolerate_negative_problem_counts() {
        let snapshots = snapshot_zones(&[zone_with_problems("хороший", -3)]);

        assert_eq!(snapshots[0].open_problems, 0);
        assert_eq!(snapshots[0].status, "хороший");
    }

    #[test]
    fn coordinate_validation_bounds() {
        assert!(valid_coordinates(53.36, 83.76));
        assert!(valid_coordinates(-90.0, 180.0));
        assert!(!valid_coordinates(90.5, 0.0));
        assert!(!valid_coordinates(0.0, -180.5));
    }
}
