//! JWT issuing and validation.

use chrono::{Duration, Utc};
use ecopulse_zone_models::UserRole;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::AuthError;

/// Fallback signing secret for development runs without `JWT_SECRET`.
const DEV_SECRET: &str = "ecopulse-dev-secret-change-me";

/// Default token lifetime in minutes (24 hours).
const DEFAULT_TTL_MINUTES: i64 = 1440;

/// Claims carried in an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id (subject).
    pub sub: String,
    /// Login email.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Authority level.
    pub role: UserRole,
    /// Home city, if set.
    pub city: Option<String>,
    /// Expiry timestamp (seconds since epoch).
    pub exp: i64,
    /// Issue timestamp (seconds since epoch).
    pub iat: i64,
}

/// HS256 token service.
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_minutes: i64,
}

impl JwtService {
    /// Creates a service with the given secret and token lifetime.
    #[must_use]
    pub fn new(secret: &str, ttl_minutes: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl_minutes,
        }
    }

    /// Creates a service from the `JWT_SECRET` and `JWT_TTL_MINUTES`
    /// environment variables.
    ///
    /// Falls back to a development secret (with a warning) when
    /// `JWT_SECRET` is not set.
    #[must_use]
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
            log::warn!("JWT_SECRET not set, using development secret");
            DEV_SECRET.to_string()
        });
        let ttl_minutes = std::env::var("JWT_TTL_MINUTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TTL_MINUTES);

        Self::new(&secret, ttl_minutes)
    }

    /// Issues an access token for a user.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidToken`] if encoding fails.
    pub fn issue(
        &self,
        user_id: i64,
        email: &str,
        name: &str,
        role: UserRole,
        city: Option<&str>,
    ) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            name: name.to_string(),
            role,
            city: city.map(ToString::to_string),
            exp: (now + Duration::minutes(self.ttl_minutes)).timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }

    /// Validates a token and returns its claims.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::ExpiredToken`] for expired tokens and
    /// [`AuthError::InvalidToken`] for anything else that fails
    /// validation.
    pub fn validate(&self, token: &str) -> Result<Claims, AuthError> {
        let validation = Validation::new(Algorithm::HS256);

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
                _ => AuthError::InvalidToken(e.to_string()),
            }
        })?;

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::new("test-secret-at-least-32-bytes-long!", 60)
    }

    #[test]
    fn issue_validate_roundtrip() {
        let service = service();

        let token = service
            .issue(7, "user1@ecopulse.ru", "Иван Петров", UserRole::User, Some("Барнаул"))
            .unwrap();
        let claims = service.validate(&token).unwrap();

        assert_eq!(claims.sub, "7");
        assert_eq!(claims.email, "user1@ecopulse.ru");
        assert_eq!(claims.role, UserRole::User);
        assert_eq!(claims.city.as_deref(), Some("Барнаул"));
    }

    #[test]
    fn tampered_token_fails() {
        let service = service();
        let token = service
            .issue(1, "admin@ecopulse.ru", "Администратор", UserRole::SuperAdmin, None)
            .unwrap();

        let mut tampered = token.clone();
        tampered.push('x');
        assert!(service.validate(&tampered).is_err());

        let other = JwtService::new("another-secret-entirely-different!!", 60);
        assert!(other.validate(&token).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let service = JwtService::new("test-secret-at-least-32-bytes-long!", -5);
        let token = service
            .issue(1, "user@ecopulse.ru", "Пользователь", UserRole::User, None)
            .unwrap();

        assert!(matches!(
            service.validate(&token),
            Err(AuthError::ExpiredToken | AuthError::InvalidToken(_))
        ));
    }
}
