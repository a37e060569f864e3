//! HTTP API response types.
//!
//! Operation routes answer in plain text. Only the health endpoint uses JSON.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::error::MatrixError;
use crate::transform::Operation;

/// Plain-text reply of an operation route.
#[derive(Debug)]
pub struct OperationReply {
    result: Result<String, MatrixError>,
    status_codes: bool,
}

impl OperationReply {
    pub fn new(result: Result<String, MatrixError>, status_codes: bool) -> Self {
        Self { result, status_codes }
    }

    pub fn status(&self) -> StatusCode {
        match &self.result {
            Err(e) if self.status_codes => e.status_code(),
            _ => StatusCode::OK,
        }
    }

    pub fn body(&self) -> String {
        match &self.result {
            Ok(body) => body.clone(),
            Err(e) => e.body(),
        }
    }
}

impl IntoResponse for OperationReply {
    fn into_response(self) -> Response {
        (self.status(), self.body()).into_response()
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub endpoints: Vec<EndpointInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointInfo {
    pub method: String,
    pub path: String,
    pub description: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        let mut endpoints: Vec<EndpointInfo> = Operation::ALL
            .into_iter()
            .map(|op| EndpointInfo {
                method: "ANY".to_string(),
                path: op.path().to_string(),
                description: op.description().to_string(),
            })
            .collect();
        endpoints.push(EndpointInfo {
            method: "GET".to_string(),
            path: "/logs".to_string(),
            description: "SSE stream of request logs".to_string(),
        });

        Self {
            status: "ok".to_string(),
            service: "csvmatrix".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            endpoints,
        }
    }
}
