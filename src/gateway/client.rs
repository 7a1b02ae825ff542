//! Forwarding client: relays validated requests to the server

use axum::body::Body;
use axum::http::{header, StatusCode};
use axum::response::Response;
use serde_json::Value;

use crate::api::USER_ID_HEADER;
use crate::error::{AppError, AppResult};

pub use reqwest::Method;

#[derive(Clone)]
pub struct ForwardClient {
    http: reqwest::Client,
    base_url: String,
}

impl ForwardClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Send the request upstream and relay status and body verbatim
    pub async fn forward(
        &self,
        method: Method,
        path: &str,
        user_id: Option<i64>,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> AppResult<Response> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http.request(method, url);

        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(id) = user_id {
            request = request.header(USER_ID_HEADER, id);
        }
        if let Some(json) = body {
            request = request.json(json);
        }

        let upstream = request.send().await?;
        let status = StatusCode::from_u16(upstream.status().as_u16())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let content_type = upstream
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("application/json")
            .to_string();
        let bytes = upstream.bytes().await?;

        Response::builder()
            .status(status)
            .header(header::CONTENT_TYPE, content_type)
            .body(Body::from(bytes))
            .map_err(|e| AppError::Internal(format!("failed to relay response: {}", e)))
    }
}
