//! Reference-data and demo-data seeding.
//!
//! Seeding is idempotent: dictionary rows use `INSERT OR IGNORE`, the
//! super-admin account is created only when missing, and demo zones are
//! inserted only into an empty `zones` table.

use ecopulse_zone_models::{UserRole, ZoneStatus};
use moosicbox_json_utils::database::ToValue as _;
use switchy_database::{Database, DatabaseValue};

use crate::DbError;

/// Cities served by the platform: `(name, lat, lng, zoom)`.
const CITIES: &[(&str, f64, f64, i64)] = &[
    ("Барнаул", 53.347_996, 83.779_836, 12),
    ("Бийск", 52.5181, 85.2072, 12),
    ("Рубцовск", 51.5147, 81.2064, 12),
    ("Котельниково", 47.6316, 43.1461, 13),
    ("Ленинск-Кузнецкий", 54.6565, 86.1737, 13),
    ("Полысаево", 54.6056, 86.2809, 13),
    ("Прокопьевск", 53.8606, 86.7183, 12),
    ("Мыски", 53.7125, 87.8056, 13),
    ("Кемерово", 55.3547, 86.0873, 12),
    ("Бородино", 55.9056, 94.9025, 13),
    ("Назарово", 56.0064, 90.3914, 13),
    ("Шарыпово", 55.5278, 89.2000, 13),
    ("Ковдор", 67.5667, 30.4667, 13),
    ("Кингисепп", 59.3769, 28.6111, 13),
    ("Березники", 59.4081, 56.8056, 12),
    ("Усолье", 59.4167, 56.6833, 13),
    ("Абакан", 53.7167, 91.4167, 12),
    ("Черногорск", 53.8236, 91.2842, 13),
    ("Рефтинский", 57.1167, 61.6833, 13),
    ("Чегдомын", 51.1167, 133.0333, 13),
];

/// Zone type dictionary entries.
const ZONE_TYPES: &[&str] = &[
    "парк",
    "сквер",
    "газон",
    "сад",
    "лесопарк",
    "бульвар",
    "аллея",
    "спортивная площадка",
    "детская площадка",
];

/// Problem type dictionary entries.
const PROBLEM_TYPES: &[&str] = &[
    "полив",
    "обрезка",
    "уборка",
    "ремонт",
    "посадка",
    "освещение",
    "безопасность",
    "другое",
];

/// Demo zones with real park coordinates:
/// `(name, city, type, status, lat, lng, area, description)`.
#[allow(clippy::type_complexity)]
const DEMO_ZONES: &[(&str, &str, &str, ZoneStatus, f64, f64, &str, &str)] = &[
    (
        "Парк \"Лесной\" (Центральный парк)",
        "Барнаул",
        "парк",
        ZoneStatus::Excellent,
        53.3600,
        83.7633,
        "15 га",
        "Центральный парк культуры и отдыха",
    ),
    (
        "Набережная реки Обь",
        "Барнаул",
        "бульвар",
        ZoneStatus::Good,
        53.3478,
        83.7756,
        "8 га",
        "Благоустроенная набережная",
    ),
    (
        "Парк \"Изумрудный\"",
        "Барнаул",
        "парк",
        ZoneStatus::Good,
        53.3739,
        83.7528,
        "12 га",
        "Парк в жилом районе",
    ),
    (
        "Сквер у театра драмы",
        "Барнаул",
        "сквер",
        ZoneStatus::Excellent,
        53.3561,
        83.7622,
        "2 га",
        "Сквер у Алтайского театра драмы",
    ),
    (
        "Парк культуры и отдыха",
        "Бийск",
        "парк",
        ZoneStatus::Good,
        52.5150,
        85.2100,
        "10 га",
        "Главный парк города",
    ),
    (
        "Сквер им. Гаркавого",
        "Бийск",
        "сквер",
        ZoneStatus::Excellent,
        52.5183,
        85.2139,
        "3 га",
        "Мемориальный сквер",
    ),
    (
        "Парк им. С.М. Кирова",
        "Рубцовск",
        "парк",
        ZoneStatus::Good,
        51.5167,
        81.2000,
        "8 га",
        "Центральный парк города",
    ),
    (
        "Сквер Победы",
        "Рубцовск",
        "сквер",
        ZoneStatus::Excellent,
        51.5200,
        81.2033,
        "2 га",
        "Мемориальный сквер",
    ),
    (
        "Парк Победы",
        "Котельниково",
        "парк",
        ZoneStatus::Good,
        47.6314,
        43.1461,
        "5 га",
        "Центральный парк",
    ),
    (
        "Городской парк",
        "Ленинск-Кузнецкий",
        "парк",
        ZoneStatus::Good,
        54.6569,
        86.1736,
        "12 га",
        "Парк культуры и отдыха",
    ),
    (
        "Сквер Шахтеров",
        "Ленинск-Кузнецкий",
        "сквер",
        ZoneStatus::Excellent,
        54.6533,
        86.1700,
        "3 га",
        "Мемориальный сквер",
    ),
    (
        "Парк \"Юбилейный\"",
        "Полысаево",
        "парк",
        ZoneStatus::Good,
        54.6000,
        86.2833,
        "4 га",
        "Городской парк",
    ),
    (
        "Парк культуры и отдыха",
        "Прокопьевск",
        "парк",
        ZoneStatus::Excellent,
        53.8833,
        86.7167,
        "20 га",
        "Крупнейший парк города",
    ),
    (
        "Детский парк \"Чайка\"",
        "Прокопьевск",
        "парк",
        ZoneStatus::Good,
        53.8800,
        86.7133,
        "5 га",
        "Детский развлекательный парк",
    ),
    (
        "Городской парк",
        "Мыски",
        "парк",
        ZoneStatus::Good,
        53.7000,
        87.8167,
        "8 га",
        "Парк культуры и отдыха",
    ),
    (
        "Парк Победы",
        "Бородино",
        "парк",
        ZoneStatus::Excellent,
        55.9000,
        94.9000,
        "6 га",
        "Мемориальный парк",
    ),
    (
        "Городской парк",
        "Назарово",
        "парк",
        ZoneStatus::Good,
        56.0000,
        90.4000,
        "7 га",
        "Парк культуры и отдыха",
    ),
    (
        "Парк культуры и отдыха",
        "Шарыпово",
        "парк",
        ZoneStatus::Good,
        55.5333,
        89.2000,
        "9 га",
        "Основной парк города",
    ),
    (
        "Городской парк",
        "Ковдор",
        "парк",
        ZoneStatus::Good,
        67.5667,
        30.4667,
        "5 га",
        "Парк в заполярном городе",
    ),
    (
        "Парк \"Роща\"",
        "Кингисепп",
        "парк",
        ZoneStatus::Excellent,
        59.3733,
        28.6133,
        "8 га",
        "Исторический парк",
    ),
    (
        "Парк культуры и отдыха",
        "Березники",
        "парк",
        ZoneStatus::Good,
        59.4167,
        56.8000,
        "15 га",
        "Центральный парк",
    ),
    (
        "Строгановские сады",
        "Усолье",
        "парк",
        ZoneStatus::Excellent,
        59.4167,
        56.6833,
        "6 га",
        "Исторический парк",
    ),
    (
        "Парк топиарного искусства",
        "Абакан",
        "парк",
        ZoneStatus::Excellent,
        53.7167,
        91.4333,
        "10 га",
        "Парк с фигурами из растений",
    ),
    (
        "Парк \"Орлёнок\"",
        "Абакан",
        "парк",
        ZoneStatus::Good,
        53.7133,
        91.4300,
        "8 га",
        "Детский парк",
    ),
    (
        "Городской парк",
        "Черногорск",
        "парк",
        ZoneStatus::Good,
        53.8167,
        91.2833,
        "7 га",
        "Парк культуры и отдыха",
    ),
    (
        "Парк у водохранилища",
        "Рефтинский",
        "парк",
        ZoneStatus::Excellent,
        57.1167,
        61.6667,
        "5 га",
        "Парк на берегу водохранилища",
    ),
    (
        "Парк Горняков",
        "Чегдомын",
        "парк",
        ZoneStatus::Good,
        51.1167,
        133.0167,
        "4 га",
        "Парк в шахтерском поселке",
    ),
];

/// Inserts the city/type/status/problem dictionaries if absent.
///
/// # Errors
///
/// Returns [`DbError`] if any insert fails.
pub async fn seed_reference_data(db: &dyn Database) -> Result<(), DbError> {
    let now = chrono::Utc::now().to_rfc3339();

    for (name, lat, lng, zoom) in CITIES {
        db.exec_raw_params(
            "INSERT OR IGNORE INTO cities (name, lat, lng, zoom, created_at)
             VALUES ($1, $2, $3, $4, $5)",
            &[
                DatabaseValue::String((*name).to_string()),
                DatabaseValue::Real64(*lat),
                DatabaseValue::Real64(*lng),
                DatabaseValue::Int64(*zoom),
                DatabaseValue::String(now.clone()),
            ],
        )
        .await?;
    }

    for name in ZONE_TYPES {
        db.exec_raw_params(
            "INSERT OR IGNORE INTO zone_types (name, created_at) VALUES ($1, $2)",
            &[
                DatabaseValue::String((*name).to_string()),
                DatabaseValue::String(now.clone()),
            ],
        )
        .await?;
    }

    // Priority mirrors the enum rank: higher weight = better condition.
    for status in ZoneStatus::all() {
        db.exec_raw_params(
            "INSERT OR IGNORE INTO zone_statuses (name, color, icon, priority, created_at)
             VALUES ($1, $2, $3, $4, $5)",
            &[
                DatabaseValue::String(status.to_string()),
                DatabaseValue::String(status.color().to_string()),
                DatabaseValue::String(status.icon().to_string()),
                DatabaseValue::Int64(i64::from(ZoneStatus::MAX_RANK - status.rank()) + 1),
                DatabaseValue::String(now.clone()),
            ],
        )
        .await?;
    }

    for name in PROBLEM_TYPES {
        db.exec_raw_params(
            "INSERT OR IGNORE INTO problem_types (name, created_at) VALUES ($1, $2)",
            &[
                DatabaseValue::String((*name).to_string()),
                DatabaseValue::String(now.clone()),
            ],
        )
        .await?;
    }

    log::info!("Reference dictionaries seeded");

    Ok(())
}

/// Ensures the super-admin account exists and holds the `super_admin` role.
///
/// Returns the admin's user id. The password hash is supplied by the caller
/// so this crate stays independent of the hashing implementation.
///
/// # Errors
///
/// Returns [`DbError`] if the lookup or insert fails.
pub async fn ensure_admin(
    db: &dyn Database,
    email: &str,
    password_hash: &str,
    name: &str,
) -> Result<i64, DbError> {
    let rows = db
        .query_raw_params(
            "SELECT id, role FROM users WHERE email = $1",
            &[DatabaseValue::String(email.to_string())],
        )
        .await?;

    if let Some(row) = rows.first() {
        let id: i64 = row.to_value("id").map_err(|e| DbError::Conversion {
            message: format!("Failed to parse admin id: {e}"),
        })?;
        let role: String = row.to_value("role").unwrap_or_default();

        if role != UserRole::SuperAdmin.to_string() {
            db.exec_raw_params(
                "UPDATE users SET role = $1 WHERE id = $2",
                &[
                    DatabaseValue::String(UserRole::SuperAdmin.to_string()),
                    DatabaseValue::Int64(id),
                ],
            )
            .await?;
            log::info!("Existing account {email} promoted to super_admin");
        }

        return Ok(id);
    }

    let now = chrono::Utc::now().to_rfc3339();
    let rows = db
        .query_raw_params(
            "INSERT INTO users (email, password_hash, name, role, created_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id",
            &[
                DatabaseValue::String(email.to_string()),
                DatabaseValue::String(password_hash.to_string()),
                DatabaseValue::String(name.to_string()),
                DatabaseValue::String(UserRole::SuperAdmin.to_string()),
                DatabaseValue::String(now),
            ],
        )
        .await?;

    let row = rows.first().ok_or_else(|| DbError::Conversion {
        message: "Failed to get admin id from insert".to_string(),
    })?;

    let id: i64 = row.to_value("id").map_err(|e| DbError::Conversion {
        message: format!("Failed to parse admin id: {e}"),
    })?;

    log::info!("Super-admin account created: {email}");

    Ok(id)
}

/// Inserts the demo zone set when the `zones` table is empty.
///
/// Returns the number of zones inserted (0 when the table already has
/// data).
///
/// # Errors
///
/// Returns [`DbError`] if any database operation fails.
pub async fn seed_demo_zones(db: &dyn Database, created_by: i64) -> Result<u64, DbError> {
    let rows = db
        .query_raw_params("SELECT COUNT(*) AS count FROM zones", &[])
        .await?;
    let existing: i64 = rows
        .first()
        .and_then(|row| row.to_value("count").ok())
        .unwrap_or(0);

    if existing > 0 {
        return Ok(0);
    }

    let now = chrono::Utc::now().to_rfc3339();
    let mut inserted = 0u64;

    for (name, city, zone_type, status, lat, lng, area, description) in DEMO_ZONES {
        inserted += db
            .exec_raw_params(
                "INSERT INTO zones
                    (name, city, type, status, lat, lng, area, description,
                     created_by, is_approved, created_at)
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 1, $10)",
                &[
                    DatabaseValue::String((*name).to_string()),
                    DatabaseValue::String((*city).to_string()),
                    DatabaseValue::String((*zone_type).to_string()),
                    DatabaseValue::String(status.to_string()),
                    DatabaseValue::Real64(*lat),
                    DatabaseValue::Real64(*lng),
                    DatabaseValue::String((*area).to_string()),
                    DatabaseValue::String((*description).to_string()),
                    DatabaseValue::Int64(created_by),
                    DatabaseValue::String(now.clone()),
                ],
            )
            .await?;
    }

    log::info!("Seeded {inserted} demo zones");

    Ok(inserted)
}
