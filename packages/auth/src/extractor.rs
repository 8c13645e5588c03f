//! Request identity extraction.

use std::future::{Ready, ready};

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, web};
use ecopulse_zone_models::UserRole;

use crate::token::{Claims, JwtService};
use crate::AuthError;

/// The authenticated user of a request, decoded from its bearer token.
///
/// Extracted via [`FromRequest`], so handlers that declare an `AuthUser`
/// parameter reject unauthenticated requests with a 401 before running.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// User id.
    pub id: i64,
    /// Login email.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Authority level.
    pub role: UserRole,
    /// Home city, if set.
    pub city: Option<String>,
}

impl AuthUser {
    /// Requires moderation authority (`moderator` and up).
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Forbidden`] for regular users.
    pub const fn require_staff(&self) -> Result<(), AuthError> {
        if self.role.is_staff() {
            Ok(())
        } else {
            Err(AuthError::Forbidden)
        }
    }

    /// Requires administrative authority (`junior_admin` and up).
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Forbidden`] for roles below `junior_admin`.
    pub const fn require_admin(&self) -> Result<(), AuthError> {
        if self.role.is_admin() {
            Ok(())
        } else {
            Err(AuthError::Forbidden)
        }
    }

    /// Requires full authority (`super_admin`).
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Forbidden`] for any other role.
    pub const fn require_super_admin(&self) -> Result<(), AuthError> {
        if self.role.is_super_admin() {
            Ok(())
        } else {
            Err(AuthError::Forbidden)
        }
    }
}

impl TryFrom<Claims> for AuthUser {
    type Error = AuthError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        let id = claims
            .sub
            .parse::<i64>()
            .map_err(|_| AuthError::InvalidToken("non-numeric subject".to_string()))?;

        Ok(Self {
            id,
            email: claims.email,
            name: claims.name,
            role: claims.role,
            city: claims.city,
        })
    }
}

fn extract(req: &HttpRequest) -> Result<AuthUser, AuthError> {
    let service = req
        .app_data::<web::Data<JwtService>>()
        .ok_or(AuthError::MissingToken)?;

    let header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(AuthError::MissingToken)?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::MissingToken)?;

    let claims = service.validate(token)?;

    AuthUser::try_from(claims)
}

impl FromRequest for AuthUser {
    type Error = AuthError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract(req))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: UserRole) -> AuthUser {
        AuthUser {
            id: 1,
            email: "user@ecopulse.ru".to_string(),
            name: "Пользователь".to_string(),
            role,
            city: None,
        }
    }

    #[test]
    fn role_gates() {
        assert!(user(UserRole::User).require_staff().is_err());
        assert!(user(UserRole::Moderator).require_staff().is_ok());
        assert!(user(UserRole::Moderator).require_admin().is_err());
        assert!(user(UserRole::JuniorAdmin).require_admin().is_ok());
        assert!(user(UserRole::JuniorAdmin).require_super_admin().is_err());
        assert!(user(UserRole::SuperAdmin).require_super_admin().is_ok());
    }

    #[test]
    fn claims_conversion_requires_numeric_subject() {
        let claims = Claims {
            sub: "42".to_string(),
            email: "user@ecopulse.ru".to_string(),
            name: "Пользователь".to_string(),
            role: UserRole::User,
            city: Some("Бийск".to_string()),
            exp: 0,
            iat: 0,
        };
        let user = AuthUser::try_from(claims).unwrap();
        assert_eq!(user.id, 42);

        let bad = Claims {
            sub: "abc".to_string(),
            email: String::new(),
            name: String::new(),
            role: UserRole::User,
            city: None,
            exp: 0,
            iat: 0,
        };
        assert!(AuthUser::try_from(bad).is_err());
    }
}
