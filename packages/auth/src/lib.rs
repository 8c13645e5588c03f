#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Authentication for the ecopulse API.
//!
//! Credentials are verified against Argon2 hashes, identity travels as a
//! stateless HS256 bearer token, and handlers receive a typed
//! [`AuthUser`] through an Actix-Web extractor. Role gates live on
//! [`AuthUser`] so each handler states its required authority in one
//! line.

pub mod extractor;
pub mod password;
pub mod token;
pub mod validate;

pub use extractor::AuthUser;
pub use token::{Claims, JwtService};

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

/// Errors from authentication and authorization.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No usable `Authorization: Bearer` header on the request.
    #[error("Missing bearer token")]
    MissingToken,

    /// The token failed signature or structural validation.
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// The token is past its expiry.
    #[error("Expired token")]
    ExpiredToken,

    /// The authenticated role lacks the required authority.
    #[error("Insufficient role")]
    Forbidden,

    /// Password hashing failed.
    #[error("Password hash error: {0}")]
    Hash(String),
}

impl AuthError {
    /// Russian message shown to API clients.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::MissingToken => "Требуется авторизация",
            Self::InvalidToken(_) | Self::ExpiredToken => "Недействительный токен",
            Self::Forbidden => "Недостаточно прав",
            Self::Hash(_) => "Внутренняя ошибка сервера",
        }
    }
}

impl ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingToken | Self::InvalidToken(_) | Self::ExpiredToken => {
                StatusCode::UNAUTHORIZED
            }
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Hash(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.user_message()
        }))
    }
}
