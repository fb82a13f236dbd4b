//! Edge gates for the admin area
//!
//! `/admin` pages redirect, `/api/admin` answers 401/403 JSON. Both require
//! at least a moderator; finer checks happen in the actions.

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::common::auth::{GuardOutcome, RoleGuard, UserRole};
use crate::server::error::ApiError;
use crate::server::middleware::AuthUser;

/// Lowest role allowed into the admin area
pub const ADMIN_AREA_ROLE: UserRole = UserRole::Moderator;

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";

/// What to do with a page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageDecision {
    Allow,
    Redirect(&'static str),
}

pub fn page_decision(role: Option<UserRole>) -> PageDecision {
    match RoleGuard::evaluate(role, ADMIN_AREA_ROLE) {
        GuardOutcome::Granted => PageDecision::Allow,
        GuardOutcome::NotSignedIn => PageDecision::Redirect(LOGIN_PATH),
        GuardOutcome::InsufficientRole { .. } => PageDecision::Redirect(HOME_PATH),
    }
}

pub fn api_decision(role: Option<UserRole>) -> Result<(), ApiError> {
    match RoleGuard::evaluate(role, ADMIN_AREA_ROLE) {
        GuardOutcome::Granted => Ok(()),
        GuardOutcome::NotSignedIn => Err(ApiError::Unauthorized),
        GuardOutcome::InsufficientRole { .. } => Err(ApiError::Forbidden),
    }
}

fn request_role(request: &Request) -> Option<UserRole> {
    request.extensions().get::<AuthUser>().map(AuthUser::role)
}

/// Gate for `/admin` pages: 303 to `/login` or `/`
pub async fn admin_page_gate(request: Request, next: Next) -> Response {
    match page_decision(request_role(&request)) {
        PageDecision::Allow => next.run(request).await,
        PageDecision::Redirect(to) => Redirect::to(to).into_response(),
    }
}

/// Gate for the `/api/admin` namespace: 401 or 403 JSON
pub async fn admin_api_gate(request: Request, next: Next) -> Response {
    match api_decision(request_role(&request)) {
        Ok(()) => next.run(request).await,
        Err(e) => e.into_response(),
    }
}
