//! Staff-only HTTP handlers: moderation, zone management, user role
//! management, dashboard statistics, and reference-dictionary editing.
//!
//! Every handler takes an [`AuthUser`] and states its required authority
//! up front; the extractor has already rejected unauthenticated requests
//! with a 401.

use actix_web::{HttpResponse, web};
use ecopulse_auth::{AuthError, AuthUser, password};
use ecopulse_database::queries;
use ecopulse_database_models::{
    CityUpsert, DictionaryKind, NamedEntryUpsert, NewZone, StatusUpsert, ZoneUpdate,
};
use ecopulse_server_models::{
    AdminStatistics, AdminZonePayload, ApiUser, CityPayload, ConfirmPayload, NamedEntryPayload,
    ProblemTypeCount, RejectPayload, StatusPayload, UpdateZonePayload,
};
use ecopulse_zone_models::{UserRole, ZoneStatus};

use crate::AppState;
use crate::handlers::{bad_coordinates, db_error, valid_coordinates};

/// Checks the acting administrator's own password for destructive role
/// operations.
///
/// Returns `Some(response)` with the error to send when confirmation
/// fails, `None` when the password checks out.
async fn password_confirmation_failure(
    state: &web::Data<AppState>,
    admin_id: i64,
    provided: Option<&str>,
) -> Option<HttpResponse> {
    let Some(provided) = provided else {
        return Some(HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Требуется пароль администратора"
        })));
    };

    match queries::user_by_id(state.db.as_ref(), admin_id).await {
        Ok(Some(admin)) if password::verify_password(&admin.password_hash, provided) => None,
        Ok(_) => Some(HttpResponse::Unauthorized().json(serde_json::json!({
            "error": "Неверный пароль администратора"
        }))),
        Err(e) => Some(db_error("Failed to query user", &e)),
    }
}

fn not_found(message: &str) -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": message }))
}

fn success(message: &str) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": message
    }))
}

/// `GET /api/admin/requests`
///
/// Lists pending zone requests with submitter info.
pub async fn requests(
    state: web::Data<AppState>,
    user: AuthUser,
) -> Result<HttpResponse, AuthError> {
    user.require_staff()?;

    Ok(
        match queries::pending_requests(state.db.as_ref()).await {
            Ok(requests) => HttpResponse::Ok().json(requests),
            Err(e) => db_error("Failed to query zone requests", &e),
        },
    )
}

/// `GET /api/admin/request/{id}`
pub async fn request_details(
    state: web::Data<AppState>,
    user: AuthUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, AuthError> {
    user.require_staff()?;

    Ok(
        match queries::request_by_id(state.db.as_ref(), path.into_inner()).await {
            Ok(Some(request)) => HttpResponse::Ok().json(request),
            Ok(None) => not_found("Request not found"),
            Err(e) => db_error("Failed to query zone request", &e),
        },
    )
}

/// `POST /api/admin/approve-zone/{id}`
///
/// Materializes a zone from a pending request. The new zone starts at
/// the `удовлетворительный` baseline until staff assess it.
pub async fn approve_zone(
    state: web::Data<AppState>,
    user: AuthUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, AuthError> {
    user.require_staff()?;

    let request_id = path.into_inner();

    let request = match queries::request_by_id(state.db.as_ref(), request_id).await {
        Ok(Some(request)) => request,
        Ok(None) => return Ok(not_found("Request not found")),
        Err(e) => return Ok(db_error("Failed to query zone request", &e)),
    };

    let zone = NewZone {
        name: request.name.clone(),
        city: request.city.clone(),
        zone_type: request.zone_type.clone(),
        status: ZoneStatus::Satisfactory.to_string(),
        lat: request.lat,
        lng: request.lng,
        area: None,
        description: request.description.clone(),
        created_by: request.user_id,
        is_approved: true,
    };

    if let Err(e) = queries::insert_zone(state.db.as_ref(), &zone).await {
        return Ok(db_error("Failed to insert zone", &e));
    }

    Ok(
        match queries::mark_request_approved(state.db.as_ref(), request_id).await {
            Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "success": true })),
            Err(e) => db_error("Failed to update zone request", &e),
        },
    )
}

/// `POST /api/admin/reject-zone/{id}`
pub async fn reject_zone(
    state: web::Data<AppState>,
    user: AuthUser,
    path: web::Path<i64>,
    body: web::Json<RejectPayload>,
) -> Result<HttpResponse, AuthError> {
    user.require_staff()?;

    let reason = body
        .reason
        .clone()
        .unwrap_or_else(|| "Причина не указана".to_string());

    Ok(
        match queries::mark_request_rejected(state.db.as_ref(), path.into_inner(), &reason).await
        {
            Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "success": true })),
            Err(e) => db_error("Failed to update zone request", &e),
        },
    )
}

/// `GET /api/admin/zone/{id}`
pub async fn zone_details(
    state: web::Data<AppState>,
    user: AuthUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, AuthError> {
    user.require_staff()?;

    Ok(
        match queries::zone_by_id(state.db.as_ref(), path.into_inner()).await {
            Ok(Some(zone)) => HttpResponse::Ok().json(zone),
            Ok(None) => not_found("Zone not found"),
            Err(e) => db_error("Failed to query zone", &e),
        },
    )
}

/// `PUT /api/admin/zone/{id}`
pub async fn update_zone(
    state: web::Data<AppState>,
    user: AuthUser,
    path: web::Path<i64>,
    body: web::Json<UpdateZonePayload>,
) -> Result<HttpResponse, AuthError> {
    user.require_staff()?;

    if !valid_coordinates(body.lat, body.lng) {
        return Ok(bad_coordinates());
    }

    let update = ZoneUpdate {
        name: body.name.clone(),
        city: body.city.clone(),
        zone_type: body.zone_type.clone(),
        status: body.status.clone(),
        lat: body.lat,
        lng: body.lng,
        description: body.description.clone(),
    };

    Ok(
        match queries::update_zone(state.db.as_ref(), path.into_inner(), &update).await {
            Ok(0) => not_found("Zone not found"),
            Ok(_) => success("Зона обновлена"),
            Err(e) => db_error("Failed to update zone", &e),
        },
    )
}

/// `DELETE /api/admin/zone/{id}`
///
/// Removes a zone together with its reports and maintenance history.
/// Moderators may edit zones but not delete them.
pub async fn delete_zone(
    state: web::Data<AppState>,
    user: AuthUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, AuthError> {
    user.require_staff()?;

    if !user.role.is_admin() {
        return Ok(HttpResponse::Forbidden().json(serde_json::json!({
            "error": "Недостаточно прав для удаления зон"
        })));
    }

    Ok(
        match queries::delete_zone(state.db.as_ref(), path.into_inner()).await {
            Ok(()) => success("Зона удалена"),
            Err(e) => db_error("Failed to delete zone", &e),
        },
    )
}

/// `POST /api/admin/add-zone`
///
/// Creates a pre-approved zone directly, bypassing moderation.
pub async fn add_zone(
    state: web::Data<AppState>,
    user: AuthUser,
    body: web::Json<AdminZonePayload>,
) -> Result<HttpResponse, AuthError> {
    user.require_staff()?;

    if !valid_coordinates(body.lat, body.lng) {
        return Ok(bad_coordinates());
    }

    let zone = NewZone {
        name: body.name.clone(),
        city: body.city.clone(),
        zone_type: body.zone_type.clone(),
        status: body
            .status
            .clone()
            .unwrap_or_else(|| ZoneStatus::Satisfactory.to_string()),
        lat: body.lat,
        lng: body.lng,
        area: None,
        description: body.description.clone(),
        created_by: user.id,
        is_approved: true,
    };

    Ok(match queries::insert_zone(state.db.as_ref(), &zone).await {
        Ok(zone_id) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "message": "Зона успешно добавлена",
            "zone_id": zone_id
        })),
        Err(e) => db_error("Failed to insert zone", &e),
    })
}

/// `GET /api/admin/users`
pub async fn users(
    state: web::Data<AppState>,
    user: AuthUser,
) -> Result<HttpResponse, AuthError> {
    user.require_admin()?;

    Ok(match queries::list_users(state.db.as_ref()).await {
        Ok(users) => {
            let users: Vec<ApiUser> = users.iter().map(ApiUser::from).collect();
            HttpResponse::Ok().json(users)
        }
        Err(e) => db_error("Failed to query users", &e),
    })
}

/// `GET /api/admin/statistics`
pub async fn statistics(
    state: web::Data<AppState>,
    user: AuthUser,
) -> Result<HttpResponse, AuthError> {
    user.require_staff()?;

    let totals = match queries::admin_totals(state.db.as_ref()).await {
        Ok(totals) => totals,
        Err(e) => return Ok(db_error("Failed to query totals", &e)),
    };

    let problems_by_type = match queries::open_problems_by_type(state.db.as_ref()).await {
        Ok(counts) => counts,
        Err(e) => return Ok(db_error("Failed to query problem distribution", &e)),
    };

    let zones_by_city = match queries::zones_by_city(state.db.as_ref()).await {
        Ok(counts) => counts,
        Err(e) => return Ok(db_error("Failed to query city distribution", &e)),
    };

    Ok(HttpResponse::Ok().json(AdminStatistics {
        total_zones: totals.total_zones,
        total_users: totals.total_users,
        total_reports: totals.total_reports,
        active_problems: totals.active_problems,
        completed_maintenance: totals.completed_maintenance,
        problems_by_type: problems_by_type
            .into_iter()
            .map(|c| ProblemTypeCount {
                problem_type: c.label,
                count: c.count,
            })
            .collect(),
        zones_by_city: zones_by_city
            .into_iter()
            .map(|c| (c.label, c.count))
            .collect(),
    }))
}

/// `POST /api/admin/promote-junior-admin/{id}`
///
/// Grants the `junior_admin` role. Super-admin only, own password
/// required.
pub async fn promote_junior_admin(
    state: web::Data<AppState>,
    user: AuthUser,
    path: web::Path<i64>,
    body: web::Json<ConfirmPayload>,
) -> Result<HttpResponse, AuthError> {
    user.require_super_admin()?;

    if let Some(response) =
        password_confirmation_failure(&state, user.id, body.admin_password.as_deref()).await
    {
        return Ok(response);
    }

    Ok(
        match queries::set_user_role(state.db.as_ref(), path.into_inner(), UserRole::JuniorAdmin)
            .await
        {
            Ok(0) => not_found("Пользователь не найден"),
            Ok(_) => success("Пользователь назначен младшим администратором"),
            Err(e) => db_error("Failed to update user role", &e),
        },
    )
}

/// `POST /api/admin/promote-moderator/{id}`
///
/// Grants the `moderator` role. Super-admins re-confirm with their own
/// password; junior admins don't.
pub async fn promote_moderator(
    state: web::Data<AppState>,
    user: AuthUser,
    path: web::Path<i64>,
    body: web::Json<ConfirmPayload>,
) -> Result<HttpResponse, AuthError> {
    user.require_admin()?;

    if user.role.is_super_admin() {
        if let Some(response) =
            password_confirmation_failure(&state, user.id, body.admin_password.as_deref()).await
        {
            return Ok(response);
        }
    }

    Ok(
        match queries::set_user_role(state.db.as_ref(), path.into_inner(), UserRole::Moderator)
            .await
        {
            Ok(0) => not_found("Пользователь не найден"),
            Ok(_) => success("Пользователь назначен модератором"),
            Err(e) => db_error("Failed to update user role", &e),
        },
    )
}

/// `POST /api/admin/demote-user/{id}`
///
/// Demotes a user to the regular role. Super-admins may demote anyone
/// except another super-admin; junior admins may demote moderators only.
pub async fn demote_user(
    state: web::Data<AppState>,
    user: AuthUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, AuthError> {
    user.require_admin()?;

    let target_id = path.into_inner();

    let target = match queries::user_by_id(state.db.as_ref(), target_id).await {
        Ok(Some(target)) => target,
        Ok(None) => return Ok(not_found("Пользователь не найден")),
        Err(e) => return Ok(db_error("Failed to query user", &e)),
    };

    if user.role.is_super_admin() {
        if target.role.is_super_admin() {
            return Ok(HttpResponse::Forbidden().json(serde_json::json!({
                "error": "Нельзя понизить другого супер-администратора"
            })));
        }
    } else if target.role != UserRole::Moderator {
        return Ok(HttpResponse::Forbidden().json(serde_json::json!({
            "error": "Можно понижать только модераторов"
        })));
    }

    Ok(
        match queries::set_user_role(state.db.as_ref(), target_id, UserRole::User).await {
            Ok(_) => success("Пользователь понижен до обычного пользователя"),
            Err(e) => db_error("Failed to update user role", &e),
        },
    )
}

/// `POST /api/admin/delete-user/{id}`
///
/// Deletes an account. Super-admin only, own password required; neither
/// the acting account nor another super-admin can be deleted.
pub async fn delete_user(
    state: web::Data<AppState>,
    user: AuthUser,
    path: web::Path<i64>,
    body: web::Json<ConfirmPayload>,
) -> Result<HttpResponse, AuthError> {
    user.require_super_admin()?;

    if let Some(response) =
        password_confirmation_failure(&state, user.id, body.admin_password.as_deref()).await
    {
        return Ok(response);
    }

    let target_id = path.into_inner();

    if target_id == user.id {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Нельзя удалить свой собственный аккаунт"
        })));
    }

    let target = match queries::user_by_id(state.db.as_ref(), target_id).await {
        Ok(Some(target)) => target,
        Ok(None) => return Ok(not_found("Пользователь не найден")),
        Err(e) => return Ok(db_error("Failed to query user", &e)),
    };

    if target.role.is_super_admin() {
        return Ok(HttpResponse::Forbidden().json(serde_json::json!({
            "error": "Нельзя удалить другого супер-администратора"
        })));
    }

    Ok(
        match queries::delete_user(state.db.as_ref(), target_id).await {
            Ok(()) => success("Пользователь удален"),
            Err(e) => db_error("Failed to delete user", &e),
        },
    )
}

fn invalid_dictionary() -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({
        "error": "Invalid dictionary type"
    }))
}

fn invalid_payload() -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({
        "error": "Некорректные данные"
    }))
}

/// `POST /api/admin/dictionaries/{dict_type}`
///
/// Adds a reference dictionary entry. Duplicate names are reported as a
/// client error.
pub async fn add_dictionary_entry(
    state: web::Data<AppState>,
    user: AuthUser,
    path: web::Path<String>,
    body: web::Json<serde_json::Value>,
) -> Result<HttpResponse, AuthError> {
    user.require_admin()?;

    let Ok(kind) = path.into_inner().parse::<DictionaryKind>() else {
        return Ok(invalid_dictionary());
    };

    let inserted = match kind {
        DictionaryKind::Cities => {
            let Ok(payload) = serde_json::from_value::<CityPayload>(body.into_inner()) else {
                return Ok(invalid_payload());
            };
            queries::insert_city(
                state.db.as_ref(),
                &CityUpsert {
                    name: payload.name,
                    lat: payload.lat,
                    lng: payload.lng,
                    zoom: payload.zoom,
                    is_active: payload.is_active.unwrap_or(true),
                },
            )
            .await
        }
        DictionaryKind::Statuses => {
            let Ok(payload) = serde_json::from_value::<StatusPayload>(body.into_inner()) else {
                return Ok(invalid_payload());
            };
            queries::insert_status(
                state.db.as_ref(),
                &StatusUpsert {
                    name: payload.name,
                    color: payload.color,
                    icon: payload.icon,
                    priority: payload.priority,
                    is_active: payload.is_active.unwrap_or(true),
                },
            )
            .await
        }
        DictionaryKind::ZoneTypes | DictionaryKind::ProblemTypes => {
            let Ok(payload) = serde_json::from_value::<NamedEntryPayload>(body.into_inner())
            else {
                return Ok(invalid_payload());
            };
            queries::insert_named_entry(
                state.db.as_ref(),
                kind,
                &NamedEntryUpsert {
                    name: payload.name,
                    description: payload.description,
                    is_active: payload.is_active.unwrap_or(true),
                },
            )
            .await
        }
    };

    Ok(match inserted {
        Ok(id) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "message": "Элемент добавлен",
            "id": id
        })),
        // The realistic failure here is the unique-name constraint.
        Err(e) => {
            log::warn!("Failed to insert dictionary entry: {e}");
            HttpResponse::BadRequest().json(serde_json::json!({
                "error": "Элемент с таким именем уже существует"
            }))
        }
    })
}

/// `PUT /api/admin/dictionaries/{dict_type}/{id}`
pub async fn update_dictionary_entry(
    state: web::Data<AppState>,
    user: AuthUser,
    path: web::Path<(String, i64)>,
    body: web::Json<serde_json::Value>,
) -> Result<HttpResponse, AuthError> {
    user.require_admin()?;

    let (kind, id) = path.into_inner();
    let Ok(kind) = kind.parse::<DictionaryKind>() else {
        return Ok(invalid_dictionary());
    };

    let updated = match kind {
        DictionaryKind::Cities => {
            let Ok(payload) = serde_json::from_value::<CityPayload>(body.into_inner()) else {
                return Ok(invalid_payload());
            };
            queries::update_city(
                state.db.as_ref(),
                id,
                &CityUpsert {
                    name: payload.name,
                    lat: payload.lat,
                    lng: payload.lng,
                    zoom: payload.zoom,
                    is_active: payload.is_active.unwrap_or(true),
                },
            )
            .await
        }
        DictionaryKind::Statuses => {
            let Ok(payload) = serde_json::from_value::<StatusPayload>(body.into_inner()) else {
                return Ok(invalid_payload());
            };
            queries::update_status(
                state.db.as_ref(),
                id,
                &StatusUpsert {
                    name: payload.name,
                    color: payload.color,
                    icon: payload.icon,
                    priority: payload.priority,
                    is_active: payload.is_active.unwrap_or(true),
                },
            )
            .await
        }
        DictionaryKind::ZoneTypes | DictionaryKind::ProblemTypes => {
            let Ok(payload) = serde_json::from_value::<NamedEntryPayload>(body.into_inner())
            else {
                return Ok(invalid_payload());
            };
            queries::update_named_entry(
                state.db.as_ref(),
                kind,
                id,
                &NamedEntryUpsert {
                    name: payload.name,
                    description: payload.description,
                    is_active: payload.is_active.unwrap_or(true),
                },
            )
            .await
        }
    };

    Ok(match updated {
        Ok(0) => not_found("Элемент не найден"),
        Ok(_) => success("Элемент обновлен"),
        Err(e) => db_error("Failed to update dictionary entry", &e),
    })
}

/// `DELETE /api/admin/dictionaries/{dict_type}/{id}`
///
/// Dictionary entries are soft-deleted so existing zones keep their
/// labels.
pub async fn delete_dictionary_entry(
    state: web::Data<AppState>,
    user: AuthUser,
    path: web::Path<(String, i64)>,
) -> Result<HttpResponse, AuthError> {
    user.require_admin()?;

    let (kind, id) = path.into_inner();
    let Ok(kind) = kind.parse::<DictionaryKind>() else {
        return Ok(invalid_dictionary());
    };

    Ok(
        match queries::deactivate_dictionary_entry(state.db.as_ref(), kind, id).await {
            Ok(0) => not_found("Элемент не найден"),
            Ok(_) => success("Элемент деактивирован"),
            Err(e) => db_error("Failed to deactivate dictionary entry", &e),
        },
    )
}
