use std::str::FromStr;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use jsonwebtoken::{DecodingKey, Validation, decode, errors::ErrorKind};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{config::AppConfig, error::ApiError};

/// Role
///
/// The RBAC levels a session can carry. Editors manage content alongside
/// admins; plain users only reach member pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Role {
    User,
    Editor,
    Admin,
}

impl Role {
    pub const fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Editor => "editor",
            Role::Admin => "admin",
        }
    }

    /// Staff may see drafts and the admin API.
    pub fn is_staff(self) -> bool {
        matches!(self, Role::Admin | Role::Editor)
    }
}

impl FromStr for Role {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" => Ok(Role::User),
            "editor" => Ok(Role::Editor),
            "admin" => Ok(Role::Admin),
            _ => Err(ApiError::Unauthorized),
        }
    }
}

/// Claims
///
/// The JWT payload issued by the identity provider. The role travels inside
/// the signed token, so no lookup is needed to authorize a request.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user id.
    pub sub: Uuid,
    pub role: Role,
    /// Expiration, seconds since the epoch.
    pub exp: usize,
    /// Issued at, seconds since the epoch.
    pub iat: usize,
}

/// AuthUser
///
/// The resolved identity of an authenticated request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct AuthUser {
    pub id: Uuid,
    pub role: Role,
}

impl AuthUser {
    /// Resolves the caller from request headers.
    ///
    /// In `Env::Local` the `x-user-id` + `x-user-role` header pair is accepted
    /// as a development bypass. Otherwise, and whenever the bypass headers are
    /// absent or malformed, a `Bearer` JWT signed with the configured secret
    /// is required.
    pub fn resolve(parts: &Parts, config: &AppConfig) -> Result<Self, ApiError> {
        if config.local_auth_bypass() {
            if let Some(user) = local_bypass(parts) {
                return Ok(user);
            }
        }

        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or(ApiError::Unauthorized)?;

        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());
        let mut validation = Validation::default();
        validation.validate_exp = true;

        let token_data = decode::<Claims>(token, &decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => tracing::debug!("rejected expired token"),
                other => tracing::debug!("rejected token: {:?}", other),
            }
            ApiError::Unauthorized
        })?;

        Ok(AuthUser {
            id: token_data.claims.sub,
            role: token_data.claims.role,
        })
    }
}

fn local_bypass(parts: &Parts) -> Option<AuthUser> {
    let id = parts
        .headers
        .get("x-user-id")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| Uuid::parse_str(value).ok())?;
    let role = parts
        .headers
        .get("x-user-role")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<Role>().ok())?;
    Some(AuthUser { id, role })
}

/// Lets handlers take `AuthUser` as an argument; a failed resolution rejects
/// with the 401 envelope before the handler runs.
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppConfig: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let config = AppConfig::from_ref(state);
        AuthUser::resolve(parts, &config)
    }
}

/// StaffUser
///
/// An `AuthUser` already checked to hold the `admin` or `editor` role.
#[derive(Debug, Clone)]
pub struct StaffUser(pub AuthUser);

impl<S> FromRequestParts<S> for StaffUser
where
    S: Send + Sync,
    AppConfig: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.role.is_staff() {
            return Err(ApiError::Forbidden);
        }
        Ok(StaffUser(user))
    }
}
