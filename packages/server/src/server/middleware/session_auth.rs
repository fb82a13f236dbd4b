use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use crate::common::auth::{Actor, UserRole};
use crate::domains::auth::SessionIdentity;
use crate::domains::user::actions::resolve_session_user;
use crate::domains::user::User;
use crate::kernel::ServerDeps;
use crate::server::app::AppState;
use crate::server::error::ApiError;

/// Cookie carrying the session token for page requests
pub const SESSION_COOKIE: &str = "session_token";

/// Authenticated user for the current request, with the role as stored now
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user: User,
}

impl AuthUser {
    pub fn actor(&self) -> Actor {
        self.user.actor()
    }

    pub fn role(&self) -> UserRole {
        self.user.role
    }
}

/// Session middleware
///
/// Verifies the session token (bearer header, then cookie), loads or creates
/// the user, and stores `AuthUser` in request extensions. Never blocks: a
/// missing or invalid token just leaves the request anonymous.
pub async fn session_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let deps = &state.deps;
    if let Some(identity) = extract_identity(request.headers(), deps) {
        match resolve_session_user(&identity, deps).await {
            Ok(user) => {
                debug!(user_id = %user.id, role = %user.role, "Authenticated request");
                request.extensions_mut().insert(AuthUser { user });
            }
            Err(e) => warn!(error = %e, user_id = %identity.user_id, "Failed to load session user"),
        }
    }

    next.run(request).await
}

/// Verify the token carried by a request, if any
fn extract_identity(headers: &HeaderMap, deps: &ServerDeps) -> Option<SessionIdentity> {
    let token = session_token(headers)?;
    match deps.jwt_service.verify_token(&token) {
        Ok(claims) => Some(claims.into()),
        Err(e) => {
            debug!(error = %e, "Ignoring invalid session token");
            None
        }
    }
}

/// Bearer token from `Authorization`, falling back to the session cookie
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.strip_prefix("Bearer ").unwrap_or(v).trim())
        .filter(|v| !v.is_empty());
    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.to_string())
        .filter(|v| !v.is_empty())
}

/// Extractor for handlers that need a signed-in user (401 otherwise)
pub struct RequireUser(pub AuthUser);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for RequireUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .map(RequireUser)
            .ok_or(ApiError::Unauthorized)
    }
}

/// Extractor for handlers that work with or without a session
pub struct MaybeUser(pub Option<AuthUser>);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for MaybeUser {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(parts.extensions.get::<AuthUser>().cloned()))
    }
}
