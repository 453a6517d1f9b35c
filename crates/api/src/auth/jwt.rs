//! JWT access tokens and opaque refresh tokens.
//!
//! Access tokens are HS256-signed and carry the verified principal id plus
//! the system role (`member` / `admin`). Marketplace roles are not embedded:
//! they are resolved from sponsor/publisher records on every request so a
//! fresh signup takes effect without re-login.
//!
//! Refresh tokens are random UUIDs; only their SHA-256 hex digest is stored.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use slotbook_core::error::CoreError;
use slotbook_core::roles::VALID_SYSTEM_ROLES;
use slotbook_core::types::DbId;
use uuid::Uuid;

const ALGORITHM: Algorithm = Algorithm::HS256;

/// Claims embedded in every access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AccessClaims {
    /// Principal id (`users.id`).
    pub sub: DbId,
    /// System role (`member` or `admin`).
    pub role: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token id.
    pub jti: String,
}

impl AccessClaims {
    fn new(principal_id: DbId, system_role: &str, ttl_secs: i64) -> Self {
        let iat = chrono::Utc::now().timestamp();
        Self {
            sub: principal_id,
            role: system_role.to_owned(),
            exp: iat + ttl_secs,
            iat,
            jti: Uuid::new_v4().to_string(),
        }
    }
}

/// Token signing configuration.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret.
    pub secret: String,
    /// Access token lifetime in minutes (default: 15).
    pub access_token_expiry_mins: i64,
    /// Refresh token lifetime in days (default: 7).
    pub refresh_token_expiry_days: i64,
}

const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 15;
const DEFAULT_REFRESH_EXPIRY_DAYS: i64 = 7;

impl JwtConfig {
    /// Load from `JWT_SECRET` (required), `JWT_ACCESS_EXPIRY_MINS` and
    /// `JWT_REFRESH_EXPIRY_DAYS`.
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is missing or empty, or an expiry is not an integer.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let access_token_expiry_mins: i64 = std::env::var("JWT_ACCESS_EXPIRY_MINS")
            .unwrap_or_else(|_| DEFAULT_ACCESS_EXPIRY_MINS.to_string())
            .parse()
            .expect("JWT_ACCESS_EXPIRY_MINS must be a valid i64");

        let refresh_token_expiry_days: i64 = std::env::var("JWT_REFRESH_EXPIRY_DAYS")
            .unwrap_or_else(|_| DEFAULT_REFRESH_EXPIRY_DAYS.to_string())
            .parse()
            .expect("JWT_REFRESH_EXPIRY_DAYS must be a valid i64");

        Self {
            secret,
            access_token_expiry_mins,
            refresh_token_expiry_days,
        }
    }

    /// Access token lifetime in seconds, as reported to clients.
    pub fn access_token_ttl_secs(&self) -> i64 {
        self.access_token_expiry_mins * 60
    }
}

/// Sign an access token for a principal with the given system role.
pub fn issue_access_token(
    principal_id: DbId,
    system_role: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = AccessClaims::new(principal_id, system_role, config.access_token_ttl_secs());
    let key = EncodingKey::from_secret(config.secret.as_bytes());
    encode(&Header::new(ALGORITHM), &claims, &key)
}

/// Verify an access token and return its claims.
///
/// Checks the HS256 signature and expiry with no leeway, and requires the
/// role to be a known system role. Every failure is `Unauthenticated`.
pub fn verify_access_token(token: &str, config: &JwtConfig) -> Result<AccessClaims, CoreError> {
    let mut validation = Validation::new(ALGORITHM);
    validation.leeway = 0;

    let key = DecodingKey::from_secret(config.secret.as_bytes());
    let claims = decode::<AccessClaims>(token, &key, &validation)
        .map_err(|e| {
            tracing::debug!(error = %e, "Access token rejected");
            invalid_token()
        })?
        .claims;

    if !VALID_SYSTEM_ROLES.contains(&claims.role.as_str()) {
        tracing::warn!(principal_id = claims.sub, role = %claims.role, "Access token carries unknown role");
        return Err(invalid_token());
    }
    Ok(claims)
}

fn invalid_token() -> CoreError {
    CoreError::Unauthenticated("Invalid or expired token".into())
}

/// A newly minted refresh token. Only `hash` is persisted.
#[derive(Debug, Clone)]
pub struct RefreshToken {
    pub plaintext: String,
    pub hash: String,
}

impl RefreshToken {
    pub fn generate() -> Self {
        let plaintext = Uuid::new_v4().simple().to_string();
        let hash = hash_refresh_token(&plaintext);
        Self { plaintext, hash }
    }
}

/// SHA-256 hex digest of a refresh token, as stored in `sessions`.
pub fn hash_refresh_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}
