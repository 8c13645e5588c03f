#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the ecopulse green-zone platform.
//!
//! Serves the JSON REST API for the map frontend: public zone and
//! analytics endpoints, token-authenticated citizen submissions, and the
//! role-gated admin surface. On startup the server ensures the `SQLite`
//! schema, seeds the reference dictionaries, and bootstraps the
//! super-admin account.

pub mod admin;
pub mod handlers;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use ecopulse_auth::JwtService;
use ecopulse_database::{db, schema, seed};
use switchy_database::Database;

/// Shared application state.
pub struct AppState {
    /// Database connection.
    pub db: Arc<dyn Database>,
}

/// Starts the ecopulse API server.
///
/// Opens the `SQLite` database, ensures the schema, seeds reference data
/// and the super-admin account, and starts the Actix-Web HTTP server.
/// This is a regular async function — the caller is responsible for
/// providing the async runtime (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind or
/// encounters a runtime error.
///
/// # Panics
///
/// Panics if the database cannot be opened, the schema cannot be created,
/// or seeding fails.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    log::info!("Opening database...");
    let db_conn = db::connect_from_env()
        .await
        .expect("Failed to open database");

    log::info!("Ensuring schema...");
    schema::ensure_schema(db_conn.as_ref())
        .await
        .expect("Failed to ensure database schema");

    log::info!("Seeding reference data...");
    seed::seed_reference_data(db_conn.as_ref())
        .await
        .expect("Failed to seed reference data");

    let admin_email =
        std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@ecopulse.ru".to_string());
    let admin_password =
        std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "Admin123!".to_string());
    let admin_hash = ecopulse_auth::password::hash_password(&admin_password)
        .expect("Failed to hash admin password");

    let admin_id = seed::ensure_admin(
        db_conn.as_ref(),
        &admin_email,
        &admin_hash,
        "Главный Администратор",
    )
    .await
    .expect("Failed to ensure admin account");

    seed::seed_demo_zones(db_conn.as_ref(), admin_id)
        .await
        .expect("Failed to seed demo zones");

    let state = web::Data::new(AppState {
        db: Arc::from(db_conn),
    });
    let jwt = web::Data::new(JwtService::from_env());

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .app_data(jwt.clone())
            .service(
                web::scope("/api")
                    .route("/health", web::get().to(handlers::health))
                    .route("/zones", web::get().to(handlers::zones))
                    .route("/zone/{id}", web::get().to(handlers::zone_details))
                    .route(
                        "/dictionaries/{dict_type}",
                        web::get().to(handlers::dictionary),
                    )
                    .route("/report-problem", web::post().to(handlers::report_problem))
                    .route(
                        "/zone-requests",
                        web::post().to(handlers::submit_zone_request),
                    )
                    .service(
                        web::scope("/auth")
                            .route("/register", web::post().to(handlers::register))
                            .route("/login", web::post().to(handlers::login)),
                    )
                    .service(
                        web::scope("/analytics")
                            .route("/data", web::get().to(handlers::analytics_data))
                            .route("/detailed", web::get().to(handlers::analytics_detailed))
                            .route(
                                "/predictions",
                                web::get().to(handlers::analytics_predictions),
                            )
                            .route(
                                "/chart/{chart_type}",
                                web::get().to(handlers::analytics_chart),
                            ),
                    )
                    .service(
                        web::scope("/admin")
                            .route("/requests", web::get().to(admin::requests))
                            .route("/request/{id}", web::get().to(admin::request_details))
                            .route("/approve-zone/{id}", web::post().to(admin::approve_zone))
                            .route("/reject-zone/{id}", web::post().to(admin::reject_zone))
                            .service(
                                web::resource("/zone/{id}")
                                    .route(web::get().to(admin::zone_details))
                                    .route(web::put().to(admin::update_zone))
                                    .route(web::delete().to(admin::delete_zone)),
                            )
                            .route("/add-zone", web::post().to(admin::add_zone))
                            .route("/users", web::get().to(admin::users))
                            .route("/statistics", web::get().to(admin::statistics))
                            .route(
                                "/promote-junior-admin/{id}",
                                web::post().to(admin::promote_junior_admin),
                            )
                            .route(
                                "/promote-moderator/{id}",
                                web::post().to(admin::promote_moderator),
                            )
                            .route("/demote-user/{id}", web::post().to(admin::demote_user))
                            .route("/delete-user/{id}", web::post().to(admin::delete_user))
                            .route(
                                "/dictionaries/{dict_type}",
                                web::post().to(admin::add_dictionary_entry),
                            )
                            .service(
                                web::resource("/dictionaries/{dict_type}/{id}")
                                    .route(web::put().to(admin::update_dictionary_entry))
                                    .route(web::delete().to(admin::delete_dictionary_entry)),
                            ),
                    ),
            )
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
