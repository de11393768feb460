//! HTTP error response conversion
//!
//! Handlers return `Result<_, HttpAppError>`; anything convertible into `AppError`
//! renders with the same status, body shape, and log level.
//!
//! The rendered body never carries `details`. Outside production,
//! [`error_details_middleware`] re-renders non-sensitive errors with them.

use axum::{
    body::Body,
    extract::{multipart::MultipartRejection, Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use filemeta_core::{AppError, ErrorMetadata, LogLevel, ValidationError};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// Machine-readable error code
    pub code: String,
    /// Whether retrying the same request may succeed
    pub recoverable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_action: Option<String>,
}

/// Wrapper so `IntoResponse` can be implemented for the core error type.
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<ValidationError> for HttpAppError {
    fn from(err: ValidationError) -> Self {
        HttpAppError(AppError::Validation(err))
    }
}

impl From<MultipartRejection> for HttpAppError {
    fn from(rejection: MultipartRejection) -> Self {
        HttpAppError(AppError::InvalidInput(format!(
            "Expected a multipart/form-data body: {}",
            rejection.body_text()
        )))
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Request rejected");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, "Request failed");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_type = error_type, "Request failed");
        }
    }
}

impl ErrorResponse {
    fn from_app_error(error: &AppError, with_details: bool) -> Self {
        Self {
            error: error.client_message(),
            details: with_details.then(|| error.detailed_message()),
            error_type: with_details.then(|| error.error_type().to_string()),
            code: error.error_code().to_string(),
            recoverable: error.is_recoverable(),
            suggested_action: error.suggested_action().map(String::from),
        }
    }
}

/// The error behind an error response, kept in the response extensions.
#[derive(Clone)]
pub struct RenderedError(pub Arc<AppError>);

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(&app_error);

        let body = ErrorResponse::from_app_error(&app_error, false);
        let mut response = (status, Json(body)).into_response();
        response
            .extensions_mut()
            .insert(RenderedError(Arc::new(app_error)));
        response
    }
}

/// Whether error responses may include `details`.
#[derive(Debug, Clone, Copy)]
pub struct ErrorDetailPolicy {
    pub expose_details: bool,
}

impl ErrorDetailPolicy {
    pub fn from_config(config: &filemeta_core::Config) -> Self {
        Self {
            expose_details: !config.is_production(),
        }
    }
}

/// Adds `details` and `error_type` to non-sensitive error bodies when the
/// policy allows it.
pub async fn error_details_middleware(
    State(policy): State<ErrorDetailPolicy>,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;
    if !policy.expose_details {
        return response;
    }

    let rendered = response.extensions().get::<RenderedError>().cloned();
    let Some(RenderedError(error)) = rendered else {
        return response;
    };
    if error.is_sensitive() {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    match serde_json::to_vec(&ErrorResponse::from_app_error(&error, true)) {
        Ok(bytes) => {
            parts.headers.remove(header::CONTENT_LENGTH);
            Response::from_parts(parts, Body::from(bytes))
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to render error details");
            Response::from_parts(parts, body)
        }
    }
}
