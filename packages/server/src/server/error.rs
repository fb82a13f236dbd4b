//! JSON envelope and error mapping for the HTTP API
//!
//! Success: `{"success": true, "data": ...}`.
//! Failure: `{"success": false, "error": "...", "details"?: {...}}`.

use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

use crate::common::AuthError;

/// Field name -> messages
pub type FieldErrors = BTreeMap<String, Vec<String>>;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error")]
    Validation(FieldErrors),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden")]
    Forbidden,

    #[error("{0}")]
    BadRequest(String),

    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        if err.is_forbidden() {
            ApiError::Forbidden
        } else {
            ApiError::Unauthorized
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::Validation(field_errors(&errors))
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        if let Some(auth) = err.downcast_ref::<AuthError>() {
            return auth.clone().into();
        }
        match err.downcast::<ValidationErrors>() {
            Ok(errors) => errors.into(),
            Err(err) => ApiError::Internal(err),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    success: bool,
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a FieldErrors>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(e) => {
                error!(error = ?e, "Request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let message = self.to_string();
        let details = match &self {
            ApiError::Validation(fields) => Some(fields),
            _ => None,
        };

        let body = ErrorBody {
            success: false,
            error: &message,
            details,
        };
        (status, Json(body)).into_response()
    }
}

/// Successful envelope
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data,
        })
    }
}

pub type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

/// Flatten validator output into `{camelCaseField: [messages]}`
pub fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value ({})", e.code))
                })
                .collect();
            (camel_case(&field), messages)
        })
        .collect()
}

fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}
