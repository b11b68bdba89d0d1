//! Health check endpoint
//!
//! GET / returns a static status payload unconditionally; the diagram
//! frontend uses it as a reachability probe.

use bytes::Bytes;
use http_body_util::Full;
use hyper::{Response, StatusCode};
use serde::Serialize;

/// Health response payload
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

/// Handle GET /
pub fn health_check() -> Response<Full<Bytes>> {
    let response = HealthResponse {
        status: "OK",
        service: "Endorsement Network API",
    };

    let body = serde_json::to_string(&response)
        .unwrap_or_else(|_| r#"{"status":"OK"}"#.to_string());

    Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(Full::new(Bytes::from(body)))
        .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_payload() {
        let response = health_check();
        assert_eq!(response.status(), StatusCode::OK);

        let json = serde_json::to_value(HealthResponse {
            status: "OK",
            service: "Endorsement Network API",
        })
        .unwrap();
        assert_eq!(json["status"], "OK");
        assert_eq!(json["service"], "Endorsement Network API");
    }
}
