//! Endorsement read endpoint
//!
//! GET /api/endorsements returns every Endorse edge sorted ascending by
//! order, projected to the wire shape the tree renderer consumes. Store
//! failures surface as a generic 500; detail stays in the server log.

use bson::doc;
use bytes::Bytes;
use http_body_util::Full;
use hyper::{Response, StatusCode};
use std::sync::Arc;
use tracing::error;

use crate::db::schemas::EndorsementView;
use crate::server::AppState;
use crate::types::ApiError;

/// Fixed body returned on any store-access failure
const FETCH_FAILED_BODY: &str = r#"{"error":"Failed to fetch endorsements"}"#;

/// Handle GET /api/endorsements
pub async fn list_endorsements(state: Arc<AppState>) -> Response<Full<Bytes>> {
    match fetch_endorsements(&state).await {
        Ok(views) => {
            let body = match serde_json::to_string(&views) {
                Ok(b) => b,
                Err(e) => {
                    error!("Failed to serialize endorsements: {}", e);
                    return fetch_failed_response();
                }
            };

            Response::builder()
                .status(StatusCode::OK)
                .header("Content-Type", "application/json")
                .header("Access-Control-Allow-Origin", "*")
                .body(Full::new(Bytes::from(body)))
                .unwrap()
        }
        Err(e) => {
            error!("Failed to fetch endorsements: {}", e);
            fetch_failed_response()
        }
    }
}

/// Read all Endorse edges in display order
async fn fetch_endorsements(state: &AppState) -> Result<Vec<EndorsementView>, ApiError> {
    let docs = state
        .endorsements
        .find_sorted(doc! { "action": "Endorse" }, doc! { "order": 1 })
        .await?;

    Ok(docs.into_iter().map(EndorsementView::from).collect())
}

fn fetch_failed_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::INTERNAL_SERVER_ERROR)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(Full::new(Bytes::from(FETCH_FAILED_BODY)))
        .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_failed_response_shape() {
        let response = fetch_failed_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let parsed: serde_json::Value = serde_json::from_str(FETCH_FAILED_BODY).unwrap();
        assert_eq!(parsed["error"], "Failed to fetch endorsements");
    }

    #[test]
    fn test_empty_edge_list_serializes_to_empty_array() {
        let views: Vec<EndorsementView> = Vec::new();
        assert_eq!(serde_json::to_string(&views).unwrap(), "[]");
    }
}
