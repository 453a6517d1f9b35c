//! Bearer-token authentication at the request boundary.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use slotbook_core::error::CoreError;
use slotbook_core::identity::{RequestContext, ResolvedRole};
use slotbook_core::types::DbId;

use crate::auth::jwt::{verify_access_token, AccessClaims};
use crate::error::AppError;
use crate::state::AppState;

/// The verified principal behind a request.
///
/// Handlers that act before a marketplace role exists (sponsor/publisher
/// signup, logout) take this directly. Everything else goes through
/// [`Caller`](super::context::Caller), which adds the resolved role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// `users.id`, from the token subject.
    pub id: DbId,
    /// `member` or `admin`.
    pub system_role: String,
}

impl Principal {
    pub fn into_context(self, resolved: ResolvedRole) -> RequestContext {
        RequestContext::new(self.id, self.system_role, resolved)
    }
}

impl From<AccessClaims> for Principal {
    fn from(claims: AccessClaims) -> Self {
        Self {
            id: claims.sub,
            system_role: claims.role,
        }
    }
}

/// Token from an `Authorization: Bearer <token>` header.
///
/// The scheme is matched case-insensitively.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, CoreError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| CoreError::Unauthenticated("Missing Authorization header".into()))?;
    let malformed =
        || CoreError::Unauthenticated("Invalid Authorization format. Expected: Bearer <token>".into());

    match value.to_str().map_err(|_| malformed())?.split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") && !token.trim().is_empty() => {
            Ok(token.trim())
        }
        _ => Err(malformed()),
    }
}

impl FromRequestParts<AppState> for Principal {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;
        let claims = verify_access_token(token, &state.config.jwt)?;
        Ok(claims.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use axum::http::HeaderValue;

    fn headers(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn bearer_scheme_is_case_insensitive() {
        assert_eq!(bearer_token(&headers("Bearer abc.def")).unwrap(), "abc.def");
        assert_eq!(bearer_token(&headers("bearer abc.def")).unwrap(), "abc.def");
    }

    #[test]
    fn missing_or_malformed_header_is_unauthenticated() {
        assert_matches!(
            bearer_token(&HeaderMap::new()),
            Err(CoreError::Unauthenticated(msg)) if msg == "Missing Authorization header"
        );
        for value in ["Basic dXNlcjpwdw==", "Bearer ", "abc.def"] {
            assert_matches!(bearer_token(&headers(value)), Err(CoreError::Unauthenticated(_)));
        }
    }
}
