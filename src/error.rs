use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::{
    backend::BackendError,
    catalog::{DraftError, RequiredField},
    response::{ApiResponse, Meta},
};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not Found")]
    NotFound,

    #[error("{0}")]
    BadRequest(String),

    #[error("Image is too large")]
    PayloadTooLarge,

    #[error("Please fill in all required fields.")]
    MissingFields(Vec<RequiredField>),

    #[error(transparent)]
    Draft(#[from] DraftError),

    #[error("Are you sure you want to delete this product?")]
    ConfirmationRequired,

    #[error("No product is being edited")]
    NotEditing,

    #[error("Please login to access dashboard")]
    Unauthorized,

    #[error("Access denied. Admins only.")]
    Forbidden,

    #[error("{message}")]
    Backend {
        message: String,
        #[source]
        source: BackendError,
    },

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Wraps a backend failure, preferring the backend's own message over
    /// `fallback`.
    pub fn backend(fallback: &str, source: BackendError) -> Self {
        let message = source.message().unwrap_or(fallback).to_string();
        AppError::Backend { message, source }
    }
}

/// Body of every error response.
#[derive(Serialize, ToSchema)]
pub struct ErrorData {
    pub error: String,
    /// Required fields left empty, when that was the problem.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[schema(value_type = Vec<String>)]
    pub fields: Vec<&'static str>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::MissingFields(_) => StatusCode::BAD_REQUEST,
            AppError::Draft(_) => StatusCode::BAD_REQUEST,
            AppError::ConfirmationRequired => StatusCode::PRECONDITION_REQUIRED,
            AppError::NotEditing => StatusCode::CONFLICT,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::Backend { source, .. } => source
                .status()
                .and_then(|code| StatusCode::from_u16(code).ok())
                .filter(StatusCode::is_client_error)
                .unwrap_or(StatusCode::BAD_GATEWAY),
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let fields = match &self {
            AppError::MissingFields(missing) => missing.iter().map(|f| f.as_str()).collect(),
            _ => Vec::new(),
        };

        let error = match &self {
            AppError::Backend { source, .. } => source.to_string(),
            _ => self.to_string(),
        };

        let body = ApiResponse {
            message: self.to_string(),
            data: Some(ErrorData { error, fields }),
            meta: Some(Meta::empty()),
        };

        (status, axum::Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
