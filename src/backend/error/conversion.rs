/**
 * Error Conversion
 *
 * This module converts backend errors into HTTP responses and provides the
 * `ApiJson` / `ApiPath` extractors, which route axum's own body and path
 * rejections through `BackendError` so every failure shares one shape.
 *
 * # Response Format
 *
 * ```json
 * {
 *   "error": "not_found",
 *   "detail": "Page not found",
 *   "status": 404
 * }
 * ```
 */

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        FromRequest, FromRequestParts, Path, Request,
    },
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use crate::backend::error::types::BackendError;

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = serde_json::json!({
            "error": self.kind(),
            "detail": self.message(),
            "status": status.as_u16(),
        });

        (status, Json(body)).into_response()
    }
}

/// JSON body extractor whose rejection is a `BackendError`
///
/// Malformed or mistyped bodies are `Validation` (422); a missing JSON
/// content type (415) or an oversized body (413) keeps its own status.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(json_rejection(rejection)),
        }
    }
}

/// Map a body rejection, keeping axum's 413 and 415
fn json_rejection(rejection: JsonRejection) -> BackendError {
    tracing::warn!("Rejected request body: {}", rejection.body_text());
    match rejection.status() {
        status @ (StatusCode::UNSUPPORTED_MEDIA_TYPE | StatusCode::PAYLOAD_TOO_LARGE) => {
            BackendError::handler(status, rejection.body_text())
        }
        _ => BackendError::validation(rejection.body_text()),
    }
}

/// Path extractor whose rejection is a `BackendError::Validation`
#[derive(Debug, Clone, Copy)]
pub struct ApiPath<T>(pub T);

impl<T, S> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(Self(value)),
            Err(rejection) => Err(path_rejection(rejection)),
        }
    }
}

fn path_rejection(rejection: PathRejection) -> BackendError {
    tracing::warn!("Rejected request path: {}", rejection.body_text());
    BackendError::validation(rejection.body_text())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::header::CONTENT_TYPE,
    };
    use serde_json::Value;

    async fn extract_json(content_type: Option<&str>, body: impl Into<Body>) -> Result<Value, BackendError> {
        let mut builder = axum::http::Request::builder().method("POST").uri("/api/page");
        if let Some(content_type) = content_type {
            builder = builder.header(CONTENT_TYPE, content_type);
        }
        let request = builder.body(body.into()).unwrap();
        ApiJson::<Value>::from_request(request, &()).await.map(|ApiJson(value)| value)
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_not_found_response_shape() {
        let response = BackendError::not_found(999).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["error"], "not_found");
        assert_eq!(body["detail"], "Page not found");
        assert_eq!(body["status"], 404);
    }

    #[tokio::test]
    async fn test_storage_failure_hides_details() {
        let err: BackendError = sqlx::Error::Protocol("relation \"pages\" does not exist".into()).into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let body = body_json(response).await;
        assert!(!body["detail"].as_str().unwrap().contains("relation"));
    }

    #[tokio::test]
    async fn test_malformed_json_is_validation_error() {
        let err = extract_json(Some("application/json"), "{not json").await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.kind(), "validation_error");
    }

    #[tokio::test]
    async fn test_missing_content_type_keeps_415() {
        let err = extract_json(None, "{}").await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

        let err = extract_json(Some("text/plain"), "{}").await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

        let body = body_json(err.into_response()).await;
        assert_eq!(body["error"], "request_error");
        assert_eq!(body["status"], 415);
    }

    #[tokio::test]
    async fn test_oversized_body_keeps_413() {
        let oversized = format!("[\"{}\"]", "x".repeat(3 * 1024 * 1024));
        let err = extract_json(Some("application/json"), oversized).await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(err.kind(), "request_error");
    }
}
