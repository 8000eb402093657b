use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use validator::{ValidationErrors, ValidationErrorsKind};

/// One offending input location in a 422 response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("Invalid request body")]
    InvalidBody(Vec<FieldError>),

    #[error("Internal server error: {0}")]
    InternalError(#[from] anyhow::Error),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(anyhow::Error::new(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(anyhow::Error::new(err))
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::InvalidBody(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::InternalError(_) | AppError::ConfigError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

/// Flattens nested validator errors into `body.<path>` locations, sorted for stable output.
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out = Vec::new();
    collect_field_errors(errors, &mut vec!["body".to_string()], &mut out);
    out.sort_by(|a, b| a.loc.cmp(&b.loc));
    out
}

fn collect_field_errors(
    errors: &ValidationErrors,
    path: &mut Vec<String>,
    out: &mut Vec<FieldError>,
) {
    for (field, kind) in errors.errors() {
        path.push(field.to_string());
        match kind {
            ValidationErrorsKind::Field(list) => {
                for err in list {
                    out.push(FieldError {
                        loc: path.clone(),
                        msg: err
                            .message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| format!("failed '{}' validation", err.code)),
                        kind: err.code.to_string(),
                    });
                }
            }
            ValidationErrorsKind::Struct(inner) => collect_field_errors(inner, path, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    path.push(index.to_string());
                    collect_field_errors(inner, path, out);
                    path.pop();
                }
            }
        }
        path.pop();
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        #[serde(untagged)]
        enum Detail {
            Message(String),
            Fields(Vec<FieldError>),
        }

        #[derive(Serialize)]
        struct ErrorResponse {
            detail: Detail,
        }

        let status = self.status();
        let detail = match self {
            AppError::ValidationError(errors) => Detail::Fields(field_errors(&errors)),
            AppError::InvalidBody(fields) => Detail::Fields(fields),
            AppError::InternalError(err) => {
                tracing::error!(error = %format!("{:#}", err), "Request failed");
                Detail::Message(format!("{:#}", err))
            }
            AppError::ServiceUnavailable(msg) => Detail::Message(msg),
            AppError::ConfigError(err) => {
                tracing::error!(error = %err, "Configuration error");
                Detail::Message(format!("Configuration error: {}", err))
            }
        };

        (status, Json(ErrorResponse { detail })).into_response()
    }
}
