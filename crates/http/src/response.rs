//! Success envelope and request body extraction shared by module handlers

use axum::{
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{de::DeserializeOwned, Serialize};

use crate::error::AppError;

/// Body of every successful response:
/// `{"status": "success", "message"?: ..., "data"?: ...}`
#[derive(Debug, Serialize)]
pub struct ApiResponse<T = ()> {
    #[serde(skip)]
    status_code: StatusCode,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// `200 OK` carrying only data
    pub fn data(data: T) -> Self {
        Self {
            status_code: StatusCode::OK,
            status: "success",
            message: None,
            data: Some(data),
        }
    }

    /// `201 Created` carrying a message and data
    pub fn created(message: impl Into<String>, data: T) -> Self {
        Self {
            status_code: StatusCode::CREATED,
            status: "success",
            message: Some(message.into()),
            data: Some(data),
        }
    }
}

impl ApiResponse {
    /// `200 OK` carrying only a message
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            status_code: StatusCode::OK,
            status: "success",
            message: Some(message.into()),
            data: None,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status_code, Json(self)).into_response()
    }
}

/// JSON body extractor whose rejections render as `AppError`
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use serde::Deserialize;
    use serde_json::json;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[derive(Debug, Deserialize)]
    struct Probe {
        count: u32,
    }

    fn json_request(body: &'static str) -> Request {
        Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn created_response_carries_message_and_data() {
        let response = ApiResponse::created("added", json!({ "bookId": "abc" })).into_response();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            body_json(response).await,
            json!({ "status": "success", "message": "added", "data": { "bookId": "abc" } })
        );
    }

    #[tokio::test]
    async fn message_response_omits_data() {
        let response = ApiResponse::message("deleted").into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({ "status": "success", "message": "deleted" })
        );
    }

    #[tokio::test]
    async fn json_body_extracts_valid_payload() {
        let JsonBody(probe) = JsonBody::<Probe>::from_request(json_request(r#"{"count":3}"#), &())
            .await
            .unwrap();
        assert_eq!(probe.count, 3);
    }

    #[tokio::test]
    async fn json_body_rejects_with_fail_envelope() {
        let rejection = JsonBody::<Probe>::from_request(json_request(r#"{"count":-1}"#), &())
            .await
            .unwrap_err();
        let response = rejection.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["status"], "fail");
    }
}
