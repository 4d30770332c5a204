use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use database::services::ServiceError;
use sea_orm::DbErr;
use serde::Serialize;
use std::fmt::Display;
use thiserror::Error;
use utoipa::ToSchema;

/// Body of every error response
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Machine readable error kind
    pub error: &'static str,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("{0}")]
    BadRequest(String),
}

impl From<DbErr> for ApiError {
    fn from(e: DbErr) -> Self {
        Self::Service(ServiceError::Db(e))
    }
}

impl ApiError {
    pub fn not_found(entity: &'static str, id: impl Display) -> Self {
        Self::Service(ServiceError::not_found(entity, id))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Service(e) => match e {
                ServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
                ServiceError::NotFound { .. } => StatusCode::NOT_FOUND,
                ServiceError::DuplicateReview { .. }
                | ServiceError::DuplicateCourse(_)
                | ServiceError::UsernameTaken(_) => StatusCode::CONFLICT,
                ServiceError::Db(_) | ServiceError::PasswordHash(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Service(e) => match e {
                ServiceError::Validation(_) => "validation_error",
                ServiceError::NotFound { .. } => "not_found",
                ServiceError::DuplicateReview { .. } => "duplicate_review",
                ServiceError::DuplicateCourse(_) => "duplicate_course",
                ServiceError::UsernameTaken(_) => "username_taken",
                ServiceError::Db(_) | ServiceError::PasswordHash(_) => "internal_error",
            },
            Self::InvalidCredentials => "invalid_credentials",
            Self::BadRequest(_) => "bad_request",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Store failures are logged, not shown to the client
        let message = if status.is_server_error() {
            log::error!("Request failed: {self}");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        let body = ErrorResponse {
            error: self.kind(),
            message,
        };
        (status, Json(body)).into_response()
    }
}
