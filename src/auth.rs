//! Password hashing, session tokens and the authenticated-user extractor.

use crate::config::Settings;
use crate::error::{AppError, AppResult};
use crate::schemas::AppState;
use axum::{extract::FromRequestParts, http::header::AUTHORIZATION, http::request::Parts};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use model::entities::user::{self, Role};
use regex::Regex;
use sea_orm::EntityTrait;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tracing::{debug, warn};

/// Accounts are limited to university mailboxes, including department subdomains.
static UNIVERSITY_EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@([A-Za-z0-9-]+\.)*sust\.edu$").expect("email pattern compiles")
});

pub const MIN_PASSWORD_LENGTH: usize = 6;

pub fn is_university_email(email: &str) -> bool {
    UNIVERSITY_EMAIL.is_match(email)
}

/// Rejects addresses outside the university domain.
pub fn ensure_university_email(email: &str) -> AppResult<()> {
    if is_university_email(email) {
        Ok(())
    } else {
        Err(AppError::Validation(
            "Email must be a valid @sust.edu address".to_string(),
        ))
    }
}

pub fn ensure_password_strength(password: &str) -> AppResult<()> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AppError::Validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        )));
    }
    Ok(())
}

pub fn hash_password(password: &str, cost: u32) -> AppResult<String> {
    Ok(bcrypt::hash(password, cost)?)
}

pub fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    Ok(bcrypt::verify(password, hash)?)
}

/// Session token payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// User id
    pub sub: i32,
    pub email: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

pub fn create_token(user: &user::Model, settings: &Settings) -> AppResult<String> {
    let now = Utc::now();
    let claims = Claims {
        sub: user.id,
        email: user.email.clone(),
        role: user.role,
        iat: now.timestamp(),
        exp: (now + Duration::days(settings.token_ttl_days)).timestamp(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(settings.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("failed to sign token: {}", e)))
}

/// Checks signature and expiry.
pub fn decode_token(token: &str, settings: &Settings) -> AppResult<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(settings.jwt_secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|data| data.claims)
    .map_err(|e| {
        debug!("Rejected bearer token: {}", e);
        AppError::Unauthorized
    })
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// The caller, loaded fresh from the database for every request.
///
/// Extraction fails with 401 when no valid token is presented and with 403
/// when the account has not been approved (or was suspended after login).
#[derive(Debug, Clone)]
pub struct AuthUser(pub user::Model);

impl AuthUser {
    pub fn id(&self) -> i32 {
        self.0.id
    }

    pub fn role(&self) -> Role {
        self.0.role
    }

    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        self.0.has_any_role(roles)
    }

    /// Fails with 403 unless the caller holds one of `roles`.
    pub fn require_any(&self, roles: &[Role]) -> AppResult<()> {
        if self.has_any_role(roles) {
            Ok(())
        } else {
            warn!(
                user_id = self.0.id,
                role = self.0.role.as_str(),
                "Role not permitted for this operation"
            );
            Err(AppError::Forbidden(
                "You do not have permission to perform this action".to_string(),
            ))
        }
    }

    pub fn require_admin(&self) -> AppResult<()> {
        self.require_any(&[Role::Admin])
    }
}

#[axum::async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(AppError::Unauthorized)?;
        let claims = decode_token(token, &state.settings)?;

        let user = user::Entity::find_by_id(claims.sub)
            .one(&state.db)
            .await?
            .ok_or(AppError::Unauthorized)?;

        if !user.is_approved() {
            return Err(AppError::AccountNotApproved(user.account_status));
        }

        Ok(AuthUser(user))
    }
}
