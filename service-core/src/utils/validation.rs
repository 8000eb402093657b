use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::{AppError, FieldError};

const DATA_ERROR_PREFIX: &str = "Failed to deserialize the JSON body into the target type: ";

/// JSON body extractor that rejects malformed or invalid input with a 422 before
/// the handler runs.
pub struct ValidatedJson<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + 'static,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                AppError::InvalidBody(vec![rejection_to_field_error(&rejection)])
            })?;

        value.validate()?;

        Ok(ValidatedJson(value))
    }
}

fn rejection_to_field_error(rejection: &JsonRejection) -> FieldError {
    let message = rejection.body_text();
    let kind = match rejection {
        JsonRejection::JsonDataError(_) => "value_error",
        JsonRejection::JsonSyntaxError(_) => "json_invalid",
        JsonRejection::MissingJsonContentType(_) => "content_type",
        _ => "body_error",
    };

    let loc = match rejection {
        JsonRejection::JsonDataError(_) => data_error_location(&message),
        _ => vec!["body".to_string()],
    };

    FieldError {
        loc,
        msg: message,
        kind: kind.to_string(),
    }
}

/// Recovers the offending field path from a serde data error message.
///
/// Nested failures read `messages[0].role: unknown variant ...`; top-level missing
/// fields read ``missing field `code` at line 1 column 2``.
pub fn data_error_location(message: &str) -> Vec<String> {
    let mut loc = vec!["body".to_string()];
    let detail = message.strip_prefix(DATA_ERROR_PREFIX).unwrap_or(message);

    if let Some((path, _)) = detail.split_once(": ")
        && !path.is_empty()
        && !path.contains(' ')
    {
        for segment in path.split('.') {
            match segment.split_once('[') {
                Some((name, rest)) => {
                    if !name.is_empty() {
                        loc.push(name.to_string());
                    }
                    for index in rest.split('[') {
                        loc.push(index.trim_end_matches(']').to_string());
                    }
                }
                None => loc.push(segment.to_string()),
            }
        }
    }

    if let Some(rest) = detail.split("missing field `").nth(1)
        && let Some((field, _)) = rest.split_once('`')
    {
        loc.push(field.to_string());
    }

    loc
}
