//! Unified API error type with Axum `IntoResponse` support.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use mlg_nlp::QueryError;
use mlg_translate::TranslateError;
use serde_json::json;

use crate::store::StoreError;

/// API error type that converts to proper HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("unprocessable: {0}")]
    Unprocessable(String),

    #[error("upstream error: {0}")]
    Upstream(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unprocessable(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::Upstream(msg) => (StatusCode::BAD_GATEWAY, msg),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = json!({
            "error": message,
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(_) => ApiError::Conflict("string already exists in the system".into()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<QueryError> for ApiError {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::Unrecognized { .. } => {
                ApiError::BadRequest(format!("unable to parse natural language query: {err}"))
            }
            QueryError::OutOfRange { .. } | QueryError::ConflictingBounds { .. } => {
                ApiError::Unprocessable(format!("query parsed but resulted in invalid filters: {err}"))
            }
        }
    }
}

impl From<TranslateError> for ApiError {
    fn from(err: TranslateError) -> Self {
        if err.is_client_error() {
            ApiError::BadRequest(err.to_string())
        } else {
            ApiError::Upstream(err.to_string())
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let message = rejection.body_text();
        match rejection {
            JsonRejection::JsonDataError(_) => ApiError::Unprocessable(message),
            _ => ApiError::BadRequest(message),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// Convenience alias.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn status_and_body(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn not_found_response() {
        let (status, json) = status_and_body(ApiError::NotFound("string 'abc'".into())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["status"], 404);
        assert!(json["error"].as_str().unwrap().contains("abc"));
    }

    #[tokio::test]
    async fn store_conflict_maps_to_409() {
        let err: ApiError = StoreError::Conflict("abc".into()).into();
        let (status, json) = status_and_body(err).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["error"], "string already exists in the system");
    }

    #[tokio::test]
    async fn query_errors() {
        let err: ApiError = QueryError::unrecognized().into();
        let (status, json) = status_and_body(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().contains("Try queries like"));

        let err: ApiError = QueryError::ConflictingBounds { min: 10, max: 5 }.into();
        let (status, _) = status_and_body(err).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn query_rejection_is_json_400() {
        let uri: axum::http::Uri = "/strings?min_length=lots".parse().unwrap();
        let rejection =
            axum::extract::Query::<std::collections::HashMap<String, usize>>::try_from_uri(&uri)
                .unwrap_err();
        let (status, json) = status_and_body(rejection.into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["status"], 400);
        assert!(json["error"].as_str().unwrap().contains("query string"));
    }

    #[tokio::test]
    async fn translate_errors() {
        let err: ApiError = TranslateError::UnsupportedLanguage("klingon".into()).into();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);

        let err: ApiError = TranslateError::Upstream {
            status: 503,
            message: "unavailable".into(),
        }
        .into();
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }
}
