//! Request body extractor with the service's JSON error shape.
//!
//! Wraps [`axum::Json`] so a missing content type, malformed JSON, or a
//! body that does not match the target type becomes a 400
//! `VALIDATION_ERROR` instead of axum's plain-text rejection.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, OptionalFromRequest, Request};
use axum::Json;
use cocode_core::error::CoreError;
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// JSON request body. Use `Option<JsonBody<T>>` when the body may be
/// omitted entirely (no `Content-Type` header).
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Core(CoreError::Validation(rejection.body_text()))
    }
}

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = <Json<T> as FromRequest<S>>::from_request(req, state).await?;
        Ok(JsonBody(value))
    }
}

impl<T, S> OptionalFromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Option<Self>, Self::Rejection> {
        let body = <Json<T> as OptionalFromRequest<S>>::from_request(req, state).await?;
        Ok(body.map(|Json(value)| JsonBody(value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::header::CONTENT_TYPE;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Decision {
        aprobado: bool,
    }

    fn json_request(body: &'static str) -> Request {
        Request::builder()
            .method("POST")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn missing_field_is_a_validation_error() {
        let result =
            <JsonBody<Decision> as FromRequest<()>>::from_request(json_request("{}"), &()).await;
        match result {
            Err(AppError::Core(CoreError::Validation(msg))) => assert!(msg.contains("aprobado")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn parses_valid_body() {
        let JsonBody(decision) = <JsonBody<Decision> as FromRequest<()>>::from_request(
            json_request(r#"{"aprobado":true}"#),
            &(),
        )
        .await
        .unwrap();
        assert!(decision.aprobado);
    }

    #[tokio::test]
    async fn optional_body_without_content_type_is_none() {
        let req = Request::builder()
            .method("POST")
            .body(Body::empty())
            .unwrap();
        let body = <JsonBody<Decision> as OptionalFromRequest<()>>::from_request(req, &())
            .await
            .unwrap();
        assert!(body.is_none());
    }
}
