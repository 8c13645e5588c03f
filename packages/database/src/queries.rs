//! Database query functions for zones, reports, users, and reference data.
//!
//! All access goes through `query_raw_params()`/`exec_raw_params()` with
//! positional parameters. Row conversion is tolerant (`unwrap_or_default`)
//! for display fields and strict for identifiers.

use ecopulse_database_models::{
    AdminTotals, CityRow, CityUpsert, DictionaryKind, LabelCount, MaintenanceLogRow,
    NamedEntryRow, NamedEntryUpsert, NewProblemReport, NewUser, NewZone, NewZoneRequest,
    ProblemReportRow, StatusUpsert, TypeStatusBreakdown, UserRow, ZoneRequestRow, ZoneRow,
    ZoneUpdate, ZoneWithProblems,
};
use ecopulse_zone_models::{RequestStatus, UserRole, ZoneStatusRecord};
use moosicbox_json_utils::database::ToValue as _;
use switchy_database::{Database, DatabaseValue};

use crate::DbError;

// ---------------------------------------------------------------------------
// Row conversion helpers
// ---------------------------------------------------------------------------

/// Converts an `Option<&str>` to a [`DatabaseValue`], using `Null` for
/// `None`.
fn opt_str(value: Option<&str>) -> DatabaseValue {
    value.map_or(DatabaseValue::Null, |s| DatabaseValue::String(s.to_string()))
}

/// Reads an `INTEGER` column as a `bool` (any non-zero value = true).
fn row_bool(row: &switchy_database::Row, col: &str) -> bool {
    row.to_value::<Option<i64>>(col)
        .unwrap_or(None)
        .is_some_and(|v| v != 0)
}

/// Extracts an `i64` from the `id` column of the first row returned by a
/// `RETURNING id` clause.
fn returning_id(rows: &[switchy_database::Row]) -> i64 {
    rows.first()
        .and_then(|r| r.to_value("id").ok())
        .unwrap_or(0)
}

fn row_to_zone(row: &switchy_database::Row) -> ZoneRow {
    ZoneRow {
        id: row.to_value("id").unwrap_or(0),
        name: row.to_value("name").unwrap_or_default(),
        city: row.to_value("city").unwrap_or_default(),
        zone_type: row.to_value("type").unwrap_or_default(),
        status: row.to_value("status").unwrap_or_default(),
        lat: row.to_value("lat").unwrap_or(0.0),
        lng: row.to_value("lng").unwrap_or(0.0),
        area: row.to_value("area").unwrap_or(None),
        description: row.to_value("description").unwrap_or(None),
        created_by: row.to_value("created_by").unwrap_or(0),
        is_approved: row_bool(row, "is_approved"),
        created_at: row.to_value("created_at").unwrap_or_default(),
        last_maintenance: row.to_value("last_maintenance").unwrap_or(None),
    }
}

fn row_to_problem_report(row: &switchy_database::Row) -> ProblemReportRow {
    ProblemReportRow {
        id: row.to_value("id").unwrap_or(0),
        zone_id: row.to_value("zone_id").unwrap_or(0),
        user_id: row.to_value("user_id").unwrap_or(0),
        problem_type: row.to_value("problem_type").unwrap_or_default(),
        description: row.to_value("description").unwrap_or_default(),
        status: row.to_value("status").unwrap_or_default(),
        created_at: row.to_value("created_at").unwrap_or_default(),
        resolved_at: row.to_value("resolved_at").unwrap_or(None),
        user_name: row.to_value("user_name").unwrap_or(None),
    }
}

fn row_to_maintenance_log(row: &switchy_database::Row) -> MaintenanceLogRow {
    MaintenanceLogRow {
        id: row.to_value("id").unwrap_or(0),
        zone_id: row.to_value("zone_id").unwrap_or(0),
        user_id: row.to_value("user_id").unwrap_or(0),
        action_type: row.to_value("action_type").unwrap_or_default(),
        description: row.to_value("description").unwrap_or_default(),
        cost: row.to_value("cost").unwrap_or(None),
        duration_minutes: row.to_value("duration_minutes").unwrap_or(None),
        performed_at: row.to_value("performed_at").unwrap_or_default(),
        user_name: row.to_value("user_name").unwrap_or(None),
    }
}

fn row_to_request(row: &switchy_database::Row) -> ZoneRequestRow {
    ZoneRequestRow {
        id: row.to_value("id").unwrap_or(0),
        user_id: row.to_value("user_id").unwrap_or(0),
        name: row.to_value("name").unwrap_or_default(),
        city: row.to_value("city").unwrap_or_default(),
        zone_type: row.to_value("type").unwrap_or_default(),
        lat: row.to_value("lat").unwrap_or(0.0),
        lng: row.to_value("lng").unwrap_or(0.0),
        description: row.to_value("description").unwrap_or(None),
        status: row.to_value("status").unwrap_or_default(),
        rejection_reason: row.to_value("rejection_reason").unwrap_or(None),
        created_at: row.to_value("created_at").unwrap_or_default(),
        user_name: row.to_value("user_name").unwrap_or(None),
        user_email: row.to_value("user_email").unwrap_or(None),
    }
}

fn row_to_user(row: &switchy_database::Row) -> UserRow {
    let role: String = row.to_value("role").unwrap_or_default();

    UserRow {
        id: row.to_value("id").unwrap_or(0),
        email: row.to_value("email").unwrap_or_default(),
        password_hash: row.to_value("password_hash").unwrap_or_default(),
        name: row.to_value("name").unwrap_or_default(),
        role: role.parse::<UserRole>().unwrap_or(UserRole::User),
        city: row.to_value("city").unwrap_or(None),
        created_at: row.to_value("created_at").unwrap_or_default(),
    }
}

fn row_to_city(row: &switchy_database::Row) -> CityRow {
    CityRow {
        id: row.to_value("id").unwrap_or(0),
        name: row.to_value("name").unwrap_or_default(),
        lat: row.to_value("lat").unwrap_or(0.0),
        lng: row.to_value("lng").unwrap_or(0.0),
        zoom: row.to_value("zoom").unwrap_or(12),
        is_active: row_bool(row, "is_active"),
    }
}

fn row_to_named_entry(row: &switchy_database::Row) -> NamedEntryRow {
    NamedEntryRow {
        id: row.to_value("id").unwrap_or(0),
        name: row.to_value("name").unwrap_or_default(),
        description: row.to_value("description").unwrap_or(None),
        is_active: row_bool(row, "is_active"),
    }
}

fn row_to_status_record(row: &switchy_database::Row) -> ZoneStatusRecord {
    ZoneStatusRecord {
        id: row.to_value("id").unwrap_or(0),
        name: row.to_value("name").unwrap_or_default(),
        color: row.to_value("color").unwrap_or_default(),
        icon: row.to_value("icon").unwrap_or(None),
        priority: row.to_value("priority").unwrap_or(0),
        is_active: row_bool(row, "is_active"),
    }
}

fn rows_to_label_counts(rows: &[switchy_database::Row], label_col: &str) -> Vec<LabelCount> {
    rows.iter()
        .map(|row| LabelCount {
            label: row.to_value(label_col).unwrap_or_default(),
            count: row.to_value("count").unwrap_or(0),
        })
        .collect()
}

/// Runs a `SELECT COUNT(*) AS count` query and returns the scalar.
async fn count_scalar(
    db: &dyn Database,
    sql: &str,
    params: &[DatabaseValue],
) -> Result<i64, DbError> {
    let rows = db.query_raw_params(sql, params).await?;
    Ok(rows
        .first()
        .and_then(|row| row.to_value("count").ok())
        .unwrap_or(0))
}

// ---------------------------------------------------------------------------
// Zones
// ---------------------------------------------------------------------------

/// Returns the approved zones of a city, each with its count of open
/// problem reports.
///
/// This is the snapshot the analytics pipeline and the map endpoint are
/// built from.
///
/// # Errors
///
/// Returns [`DbError`] if the database operation fails.
pub async fn approved_zones_with_problems(
    db: &dyn Database,
    city: &str,
) -> Result<Vec<ZoneWithProblems>, DbError> {
    let rows = db
        .query_raw_params(
            "SELECT z.*,
                    (SELECT COUNT(*) FROM problem_reports pr
                     WHERE pr.zone_id = z.id AND pr.status = 'new') AS open_problems
             FROM zones z
             WHERE z.city = $1 AND z.is_approved = 1
             ORDER BY z.name",
            &[DatabaseValue::String(city.to_string())],
        )
        .await?;

    Ok(rows
        .iter()
        .map(|row| ZoneWithProblems {
            zone: row_to_zone(row),
            open_problems: row.to_value("open_problems").unwrap_or(0),
        })
        .collect())
}

/// Looks up a single zone by id.
///
/// # Errors
///
/// Returns [`DbError`] if the database operation fails.
pub async fn zone_by_id(db: &dyn Database, id: i64) -> Result<Option<ZoneRow>, DbError> {
    let rows = db
        .query_raw_params(
            "SELECT * FROM zones WHERE id = $1",
            &[DatabaseValue::Int64(id)],
        )
        .await?;

    Ok(rows.first().map(row_to_zone))
}

/// Inserts a zone and returns its id.
///
/// # Errors
///
/// Returns [`DbError`] if the database operation fails.
pub async fn insert_zone(db: &dyn Database, zone: &NewZone) -> Result<i64, DbError> {
    let now = chrono::Utc::now().to_rfc3339();

    let rows = db
        .query_raw_params(
            "INSERT INTO zones
                (name, city, type, status, lat, lng, area, description,
                 created_by, is_approved, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING id",
            &[
                DatabaseValue::String(zone.name.clone()),
                DatabaseValue::String(zone.city.clone()),
                DatabaseValue::String(zone.zone_type.clone()),
                DatabaseValue::String(zone.status.clone()),
                DatabaseValue::Real64(zone.lat),
                DatabaseValue::Real64(zone.lng),
                opt_str(zone.area.as_deref()),
                opt_str(zone.description.as_deref()),
                DatabaseValue::Int64(zone.created_by),
                DatabaseValue::Int64(i64::from(zone.is_approved)),
                DatabaseValue::String(now),
            ],
        )
        .await?;

    Ok(returning_id(&rows))
}

/// Updates a zone's editable fields.
///
/// Returns the number of rows affected (0 when the zone doesn't exist).
///
/// # Errors
///
/// Returns [`DbError`] if the database operation fails.
pub async fn update_zone(db: &dyn Database, id: i64, update: &ZoneUpdate) -> Result<u64, DbError> {
    let affected = db
        .exec_raw_params(
            "UPDATE zones SET
                name = $1,
                city = $2,
                type = $3,
                status = $4,
                lat = $5,
                lng = $6,
                description = $7
             WHERE id = $8",
            &[
                DatabaseValue::String(update.name.clone()),
                DatabaseValue::String(update.city.clone()),
                DatabaseValue::String(update.zone_type.clone()),
                DatabaseValue::String(update.status.clone()),
                DatabaseValue::Real64(update.lat),
                DatabaseValue::Real64(update.lng),
                opt_str(update.description.as_deref()),
                DatabaseValue::Int64(id),
            ],
        )
        .await?;

    Ok(affected)
}

/// Deletes a zone together with its problem reports and maintenance logs.
///
/// # Errors
///
/// Returns [`DbError`] if any database operation fails.
pub async fn delete_zone(db: &dyn Database, id: i64) -> Result<(), DbError> {
    db.exec_raw_params(
        "DELETE FROM problem_reports WHERE zone_id = $1",
        &[DatabaseValue::Int64(id)],
    )
    .await?;

    db.exec_raw_params(
        "DELETE FROM maintenance_logs WHERE zone_id = $1",
        &[DatabaseValue::Int64(id)],
    )
    .await?;

    db.exec_raw_params("DELETE FROM zones WHERE id = $1", &[DatabaseValue::Int64(id)])
        .await?;

    Ok(())
}

// ---------------------------------------------------------------------------
// Problem reports and maintenance logs
// ---------------------------------------------------------------------------

/// Returns the most recent problem reports for a zone, reporter name
/// included.
///
/// # Errors
///
/// Returns [`DbError`] if the database operation fails.
pub async fn recent_problems(
    db: &dyn Database,
    zone_id: i64,
    limit: u32,
) -> Result<Vec<ProblemReportRow>, DbError> {
    let rows = db
        .query_raw_params(
            "SELECT pr.*, u.name AS user_name
             FROM problem_reports pr
             JOIN users u ON pr.user_id = u.id
             WHERE pr.zone_id = $1
             ORDER BY pr.created_at DESC
             LIMIT $2",
            &[
                DatabaseValue::Int64(zone_id),
                DatabaseValue::Int64(i64::from(limit)),
            ],
        )
        .await?;

    Ok(rows.iter().map(row_to_problem_report).collect())
}

/// Returns the most recent maintenance log entries for a zone, performer
/// name included.
///
/// # Errors
///
/// Returns [`DbError`] if the database operation fails.
pub async fn recent_maintenance(
    db: &dyn Database,
    zone_id: i64,
    limit: u32,
) -> Result<Vec<MaintenanceLogRow>, DbError> {
    let rows = db
        .query_raw_params(
            "SELECT ml.*, u.name AS user_name
             FROM maintenance_logs ml
             JOIN users u ON ml.user_id = u.id
             WHERE ml.zone_id = $1
             ORDER BY ml.performed_at DESC
             LIMIT $2",
            &[
                DatabaseValue::Int64(zone_id),
                DatabaseValue::Int64(i64::from(limit)),
            ],
        )
        .await?;

    Ok(rows.iter().map(row_to_maintenance_log).collect())
}

/// Files a citizen problem report (status starts as `new`).
///
/// # Errors
///
/// Returns [`DbError`] if the database operation fails.
pub async fn insert_problem_report(
    db: &dyn Database,
    report: &NewProblemReport,
) -> Result<(), DbError> {
    let now = chrono::Utc::now().to_rfc3339();

    db.exec_raw_params(
        "INSERT INTO problem_reports (zone_id, user_id, problem_type, description, status, created_at)
         VALUES ($1, $2, $3, $4, 'new', $5)",
        &[
            DatabaseValue::Int64(report.zone_id),
            DatabaseValue::Int64(report.user_id),
            DatabaseValue::String(report.problem_type.clone()),
            DatabaseValue::String(report.description.clone()),
            DatabaseValue::String(now),
        ],
    )
    .await?;

    Ok(())
}

// ---------------------------------------------------------------------------
// Zone requests (citizen submissions)
// ---------------------------------------------------------------------------

/// Submits a citizen zone request (status starts as `pending`).
///
/// # Errors
///
/// Returns [`DbError`] if the database operation fails.
pub async fn insert_zone_request(
    db: &dyn Database,
    request: &NewZoneRequest,
) -> Result<(), DbError> {
    let now = chrono::Utc::now().to_rfc3339();

    db.exec_raw_params(
        "INSERT INTO zone_requests (user_id, name, city, type, lat, lng, description, status, created_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, 'pending', $8)",
        &[
            DatabaseValue::Int64(request.user_id),
            DatabaseValue::String(request.name.clone()),
            DatabaseValue::String(request.city.clone()),
            DatabaseValue::String(request.zone_type.clone()),
            DatabaseValue::Real64(request.lat),
            DatabaseValue::Real64(request.lng),
            opt_str(request.description.as_deref()),
            DatabaseValue::String(now),
        ],
    )
    .await?;

    Ok(())
}

/// Returns all pending zone requests, newest first, with submitter info.
///
/// # Errors
///
/// Returns [`DbError`] if the database operation fails.
pub async fn pending_requests(db: &dyn Database) -> Result<Vec<ZoneRequestRow>, DbError> {
    let rows = db
        .query_raw_params(
            "SELECT zr.*, u.name AS user_name, u.email AS user_email
             FROM zone_requests zr
             JOIN users u ON zr.user_id = u.id
             WHERE zr.status = 'pending'
             ORDER BY zr.created_at DESC",
            &[],
        )
        .await?;

    Ok(rows.iter().map(row_to_request).collect())
}

/// Looks up a single zone request by id, with submitter info.
///
/// # Errors
///
/// Returns [`DbError`] if the database operation fails.
pub async fn request_by_id(
    db: &dyn Database,
    id: i64,
) -> Result<Option<ZoneRequestRow>, DbError> {
    let rows = db
        .query_raw_params(
            "SELECT zr.*, u.name AS user_name, u.email AS user_email
             FROM zone_requests zr
             JOIN users u ON zr.user_id = u.id
             WHERE zr.id = $1",
            &[DatabaseValue::Int64(id)],
        )
        .await?;

    Ok(rows.first().map(row_to_request))
}

/// Marks a request as approved.
///
/// # Errors
///
/// Returns [`DbError`] if the database operation fails.
pub async fn mark_request_approved(db: &dyn Database, id: i64) -> Result<(), DbError> {
    db.exec_raw_params(
        "UPDATE zone_requests SET status = $1 WHERE id = $2",
        &[
            DatabaseValue::String(RequestStatus::Approved.to_string()),
            DatabaseValue::Int64(id),
        ],
    )
    .await?;

    Ok(())
}

/// Marks a request as rejected with the given reason.
///
/// # Errors
///
/// Returns [`DbError`] if the database operation fails.
pub async fn mark_request_rejected(
    db: &dyn Database,
    id: i64,
    reason: &str,
) -> Result<(), DbError> {
    db.exec_raw_params(
        "UPDATE zone_requests SET status = $1, rejection_reason = $2 WHERE id = $3",
        &[
            DatabaseValue::String(RequestStatus::Rejected.to_string()),
            DatabaseValue::String(reason.to_string()),
            DatabaseValue::Int64(id),
        ],
    )
    .await?;

    Ok(())
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// Returns all users ordered by id.
///
/// # Errors
///
/// Returns [`DbError`] if the database operation fails.
pub async fn list_users(db: &dyn Database) -> Result<Vec<UserRow>, DbError> {
    let rows = db
        .query_raw_params("SELECT * FROM users ORDER BY id", &[])
        .await?;

    Ok(rows.iter().map(row_to_user).collect())
}

/// Looks up a user by id.
///
/// # Errors
///
/// Returns [`DbError`] if the database operation fails.
pub async fn user_by_id(db: &dyn Database, id: i64) -> Result<Option<UserRow>, DbError> {
    let rows = db
        .query_raw_params(
            "SELECT * FROM users WHERE id = $1",
            &[DatabaseValue::Int64(id)],
        )
        .await?;

    Ok(rows.first().map(row_to_user))
}

/// Looks up a user by email.
///
/// # Errors
///
/// Returns [`DbError`] if the database operation fails.
pub async fn user_by_email(db: &dyn Database, email: &str) -> Result<Option<UserRow>, DbError> {
    let rows = db
        .query_raw_params(
            "SELECT * FROM users WHERE email = $1",
            &[DatabaseValue::String(email.to_string())],
        )
        .await?;

    Ok(rows.first().map(row_to_user))
}

/// Inserts a user and returns their id.
///
/// # Errors
///
/// Returns [`DbError`] if the database operation fails (including the
/// unique-email constraint).
pub async fn insert_user(db: &dyn Database, user: &NewUser) -> Result<i64, DbError> {
    let now = chrono::Utc::now().to_rfc3339();

    let rows = db
        .query_raw_params(
            "INSERT INTO users (email, password_hash, name, role, city, created_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id",
            &[
                DatabaseValue::String(user.email.clone()),
                DatabaseValue::String(user.password_hash.clone()),
                DatabaseValue::String(user.name.clone()),
                DatabaseValue::String(user.role.to_string()),
                opt_str(user.city.as_deref()),
                DatabaseValue::String(now),
            ],
        )
        .await?;

    Ok(returning_id(&rows))
}

/// Sets a user's role.
///
/// Returns the number of rows affected (0 when the user doesn't exist).
///
/// # Errors
///
/// Returns [`DbError`] if the database operation fails.
pub async fn set_user_role(db: &dyn Database, id: i64, role: UserRole) -> Result<u64, DbError> {
    let affected = db
        .exec_raw_params(
            "UPDATE users SET role = $1 WHERE id = $2",
            &[
                DatabaseValue::String(role.to_string()),
                DatabaseValue::Int64(id),
            ],
        )
        .await?;

    Ok(affected)
}

/// Deletes a user.
///
/// # Errors
///
/// Returns [`DbError`] if the database operation fails.
pub async fn delete_user(db: &dyn Database, id: i64) -> Result<(), DbError> {
    db.exec_raw_params("DELETE FROM users WHERE id = $1", &[DatabaseValue::Int64(id)])
        .await?;

    Ok(())
}

// ---------------------------------------------------------------------------
// Distribution and dashboard queries
// ---------------------------------------------------------------------------

/// Counts approved zones of a city grouped by zone type.
///
/// # Errors
///
/// Returns [`DbError`] if the database operation fails.
pub async fn type_distribution(db: &dyn Database, city: &str) -> Result<Vec<LabelCount>, DbError> {
    let rows = db
        .query_raw_params(
            "SELECT type, COUNT(*) AS count
             FROM zones
             WHERE city = $1 AND is_approved = 1
             GROUP BY type",
            &[DatabaseValue::String(city.to_string())],
        )
        .await?;

    Ok(rows_to_label_counts(&rows, "type"))
}

/// Counts open problem reports of a city grouped by problem type.
///
/// # Errors
///
/// Returns [`DbError`] if the database operation fails.
pub async fn open_problem_distribution(
    db: &dyn Database,
    city: &str,
) -> Result<Vec<LabelCount>, DbError> {
    let rows = db
        .query_raw_params(
            "SELECT pr.problem_type, COUNT(*) AS count
             FROM problem_reports pr
             JOIN zones z ON pr.zone_id = z.id
             WHERE z.city = $1 AND pr.status = 'new'
             GROUP BY pr.problem_type",
            &[DatabaseValue::String(city.to_string())],
        )
        .await?;

    Ok(rows_to_label_counts(&rows, "problem_type"))
}

/// Breaks down a city's approved zones by type and stored baseline status.
///
/// # Errors
///
/// Returns [`DbError`] if the database operation fails.
pub async fn type_status_breakdown(
    db: &dyn Database,
    city: &str,
) -> Result<Vec<TypeStatusBreakdown>, DbError> {
    let rows = db
        .query_raw_params(
            "SELECT
                type,
                COUNT(*) AS total,
                SUM(CASE WHEN status = 'отличный' THEN 1 ELSE 0 END) AS excellent,
                SUM(CASE WHEN status = 'хороший' THEN 1 ELSE 0 END) AS good,
                SUM(CASE WHEN status = 'удовлетворительный' THEN 1 ELSE 0 END) AS satisfactory,
                SUM(CASE WHEN status = 'требует ухода' THEN 1 ELSE 0 END) AS needs_care,
                SUM(CASE WHEN status = 'критический' THEN 1 ELSE 0 END) AS critical
             FROM zones
             WHERE city = $1 AND is_approved = 1
             GROUP BY type",
            &[DatabaseValue::String(city.to_string())],
        )
        .await?;

    Ok(rows
        .iter()
        .map(|row| TypeStatusBreakdown {
            zone_type: row.to_value("type").unwrap_or_default(),
            total: row.to_value("total").unwrap_or(0),
            excellent: row.to_value("excellent").unwrap_or(0),
            good: row.to_value("good").unwrap_or(0),
            satisfactory: row.to_value("satisfactory").unwrap_or(0),
            needs_care: row.to_value("needs_care").unwrap_or(0),
            critical: row.to_value("critical").unwrap_or(0),
        })
        .collect())
}

/// Returns system-wide counters for the admin dashboard.
///
/// # Errors
///
/// Returns [`DbError`] if any database operation fails.
pub async fn admin_totals(db: &dyn Database) -> Result<AdminTotals, DbError> {
    Ok(AdminTotals {
        total_zones: count_scalar(db, "SELECT COUNT(*) AS count FROM zones", &[]).await?,
        total_users: count_scalar(db, "SELECT COUNT(*) AS count FROM users", &[]).await?,
        total_reports: count_scalar(db, "SELECT COUNT(*) AS count FROM problem_reports", &[])
            .await?,
        active_problems: count_scalar(
            db,
            "SELECT COUNT(*) AS count FROM problem_reports WHERE status = 'new'",
            &[],
        )
        .await?,
        completed_maintenance: count_scalar(
            db,
            "SELECT COUNT(*) AS count FROM maintenance_logs",
            &[],
        )
        .await?,
    })
}

/// Counts open problem reports across all cities grouped by problem type.
///
/// # Errors
///
/// Returns [`DbError`] if the database operation fails.
pub async fn open_problems_by_type(db: &dyn Database) -> Result<Vec<LabelCount>, DbError> {
    let rows = db
        .query_raw_params(
            "SELECT problem_type, COUNT(*) AS count
             FROM problem_reports
             WHERE status = 'new'
             GROUP BY problem_type",
            &[],
        )
        .await?;

    Ok(rows_to_label_counts(&rows, "problem_type"))
}

/// Counts zones grouped by city.
///
/// # Errors
///
/// Returns [`DbError`] if the database operation fails.
pub async fn zones_by_city(db: &dyn Database) -> Result<Vec<LabelCount>, DbError> {
    let rows = db
        .query_raw_params(
            "SELECT city, COUNT(*) AS count FROM zones GROUP BY city",
            &[],
        )
        .await?;

    Ok(rows_to_label_counts(&rows, "city"))
}

// ---------------------------------------------------------------------------
// Reference dictionaries
// ---------------------------------------------------------------------------

/// Returns the active cities ordered by name.
///
/// # Errors
///
/// Returns [`DbError`] if the database operation fails.
pub async fn list_cities(db: &dyn Database) -> Result<Vec<CityRow>, DbError> {
    let rows = db
        .query_raw_params(
            "SELECT * FROM cities WHERE is_active = 1 ORDER BY name",
            &[],
        )
        .await?;

    Ok(rows.iter().map(row_to_city).collect())
}

/// Returns the active zone statuses ordered by priority (best first).
///
/// # Errors
///
/// Returns [`DbError`] if the database operation fails.
pub async fn list_zone_statuses(db: &dyn Database) -> Result<Vec<ZoneStatusRecord>, DbError> {
    let rows = db
        .query_raw_params(
            "SELECT * FROM zone_statuses WHERE is_active = 1 ORDER BY priority DESC",
            &[],
        )
        .await?;

    Ok(rows.iter().map(row_to_status_record).collect())
}

/// Returns the active entries of a name/description dictionary
/// (`zone_types` or `problem_types`) ordered by name.
///
/// # Errors
///
/// Returns [`DbError`] if the database operation fails, or a
/// [`DbError::Conversion`] when `kind` is not a name/description table.
pub async fn list_named_entries(
    db: &dyn Database,
    kind: DictionaryKind,
) -> Result<Vec<NamedEntryRow>, DbError> {
    if !matches!(kind, DictionaryKind::ZoneTypes | DictionaryKind::ProblemTypes) {
        return Err(DbError::Conversion {
            message: format!("{kind} is not a named-entry dictionary"),
        });
    }

    let rows = db
        .query_raw_params(
            &format!(
                "SELECT * FROM {} WHERE is_active = 1 ORDER BY name",
                kind.table()
            ),
            &[],
        )
        .await?;

    Ok(rows.iter().map(row_to_named_entry).collect())
}

/// Inserts a city dictionary entry and returns its id.
///
/// # Errors
///
/// Returns [`DbError`] if the database operation fails (including the
/// unique-name constraint).
pub async fn insert_city(db: &dyn Database, city: &CityUpsert) -> Result<i64, DbError> {
    let now = chrono::Utc::now().to_rfc3339();

    let rows = db
        .query_raw_params(
            "INSERT INTO cities (name, lat, lng, zoom, is_active, created_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id",
            &[
                DatabaseValue::String(city.name.clone()),
                DatabaseValue::Real64(city.lat),
                DatabaseValue::Real64(city.lng),
                DatabaseValue::Int64(city.zoom),
                DatabaseValue::Int64(i64::from(city.is_active)),
                DatabaseValue::String(now),
            ],
        )
        .await?;

    Ok(returning_id(&rows))
}

/// Updates a city dictionary entry.
///
/// # Errors
///
/// Returns [`DbError`] if the database operation fails.
pub async fn update_city(db: &dyn Database, id: i64, city: &CityUpsert) -> Result<u64, DbError> {
    let affected = db
        .exec_raw_params(
            "UPDATE cities SET name = $1, lat = $2, lng = $3, zoom = $4, is_active = $5
             WHERE id = $6",
            &[
                DatabaseValue::String(city.name.clone()),
                DatabaseValue::Real64(city.lat),
                DatabaseValue::Real64(city.lng),
                DatabaseValue::Int64(city.zoom),
                DatabaseValue::Int64(i64::from(city.is_active)),
                DatabaseValue::Int64(id),
            ],
        )
        .await?;

    Ok(affected)
}

/// Inserts a zone status dictionary entry and returns its id.
///
/// # Errors
///
/// Returns [`DbError`] if the database operation fails (including the
/// unique-name constraint).
pub async fn insert_status(db: &dyn Database, status: &StatusUpsert) -> Result<i64, DbError> {
    let now = chrono::Utc::now().to_rfc3339();

    let rows = db
        .query_raw_params(
            "INSERT INTO zone_statuses (name, color, icon, priority, is_active, created_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id",
            &[
                DatabaseValue::String(status.name.clone()),
                DatabaseValue::String(status.color.clone()),
                opt_str(status.icon.as_deref()),
                DatabaseValue::Int64(status.priority),
                DatabaseValue::Int64(i64::from(status.is_active)),
                DatabaseValue::String(now),
            ],
        )
        .await?;

    Ok(returning_id(&rows))
}

/// Updates a zone status dictionary entry.
///
/// # Errors
///
/// Returns [`DbError`] if the database operation fails.
pub async fn update_status(
    db: &dyn Database,
    id: i64,
    status: &StatusUpsert,
) -> Result<u64, DbError> {
    let affected = db
        .exec_raw_params(
            "UPDATE zone_statuses SET name = $1, color = $2, icon = $3, priority = $4, is_active = $5
             WHERE id = $6",
            &[
                DatabaseValue::String(status.name.clone()),
                DatabaseValue::String(status.color.clone()),
                opt_str(status.icon.as_deref()),
                DatabaseValue::Int64(status.priority),
                DatabaseValue::Int64(i64::from(status.is_active)),
                DatabaseValue::Int64(id),
            ],
        )
        .await?;

    Ok(affected)
}

/// Inserts a name/description dictionary entry and returns its id.
///
/// # Errors
///
/// Returns [`DbError`] if the database operation fails, or a
/// [`DbError::Conversion`] when `kind` is not a name/description table.
pub async fn insert_named_entry(
    db: &dyn Database,
    kind: DictionaryKind,
    entry: &NamedEntryUpsert,
) -> Result<i64, DbError> {
    if !matches!(kind, DictionaryKind::ZoneTypes | DictionaryKind::ProblemTypes) {
        return Err(DbError::Conversion {
            message: format!("{kind} is not a named-entry dictionary"),
        });
    }

    let now = chrono::Utc::now().to_rfc3339();

    let rows = db
        .query_raw_params(
            &format!(
                "INSERT INTO {} (name, description, is_active, created_at)
                 VALUES ($1, $2, $3, $4)
                 RETURNING id",
                kind.table()
            ),
            &[
                DatabaseValue::String(entry.name.clone()),
                opt_str(entry.description.as_deref()),
                DatabaseValue::Int64(i64::from(entry.is_active)),
                DatabaseValue::String(now),
            ],
        )
        .await?;

    Ok(returning_id(&rows))
}

/// Updates a name/description dictionary entry.
///
/// # Errors
///
/// Returns [`DbError`] if the database operation fails, or a
/// [`DbError::Conversion`] when `kind` is not a name/description table.
pub async fn update_named_entry(
    db: &dyn Database,
    kind: DictionaryKind,
    id: i64,
    entry: &NamedEntryUpsert,
) -> Result<u64, DbError> {
    if !matches!(kind, DictionaryKind::ZoneTypes | DictionaryKind::ProblemTypes) {
        return Err(DbError::Conversion {
            message: format!("{kind} is not a named-entry dictionary"),
        });
    }

    let affected = db
        .exec_raw_params(
            &format!(
                "UPDATE {} SET name = $1, description = $2, is_active = $3 WHERE id = $4",
                kind.table()
            ),
            &[
                DatabaseValue::String(entry.name.clone()),
                opt_str(entry.description.as_deref()),
                DatabaseValue::Int64(i64::from(entry.is_active)),
                DatabaseValue::Int64(id),
            ],
        )
        .await?;

    Ok(affected)
}

/// Soft-deletes a dictionary entry by clearing its `is_active` flag.
///
/// # Errors
///
/// Returns [`DbError`] if the database operation fails.
pub async fn deactivate_dictionary_entry(
    db: &dyn Database,
    kind: DictionaryKind,
    id: i64,
) -> Result<u64, DbError> {
    let affected = db
        .exec_raw_params(
            &format!("UPDATE {} SET is_active = 0 WHERE id = $1", kind.table()),
            &[DatabaseValue::Int64(id)],
        )
        .await?;

    Ok(affected)
}
