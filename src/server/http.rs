//! HTTP server implementation
//!
//! Uses hyper http1 with TokioIo for async handling; one tokio task per
//! connection, all handlers read-only.

use bytes::Bytes;
use http_body_util::Full;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{body::Incoming, Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::config::Args;
use crate::db::schemas::EndorsementDoc;
use crate::db::{MongoClient, MongoCollection};
use crate::routes;
use crate::types::ApiError;

/// Shared application state
///
/// The Mongo handle is constructed once at startup and owned here; handlers
/// borrow it through the Arc for the process lifetime.
pub struct AppState {
    pub args: Args,
    pub mongo: MongoClient,
    /// Endorsement collection, indexes applied at startup
    pub endorsements: MongoCollection<EndorsementDoc>,
}

impl AppState {
    pub fn new(
        args: Args,
        mongo: MongoClient,
        endorsements: MongoCollection<EndorsementDoc>,
    ) -> Self {
        Self {
            args,
            mongo,
            endorsements,
        }
    }
}

/// Run the HTTP server accept loop
pub async fn run(state: Arc<AppState>) -> Result<(), ApiError> {
    let listener = TcpListener::bind(state.args.listen).await?;

    info!("Server running on {}", state.args.listen);

    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                let state = Arc::clone(&state);
                tokio::spawn(async move {
                    let io = TokioIo::new(stream);

                    let service = service_fn(move |req| {
                        let state = Arc::clone(&state);
                        async move { handle_request(state, addr, req).await }
                    });

                    if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                        error!("Error serving connection from {}: {:?}", addr, err);
                    }
                });
            }
            Err(e) => {
                error!("Error accepting connection: {:?}", e);
            }
        }
    }
}

/// Route incoming HTTP requests
async fn handle_request(
    state: Arc<AppState>,
    addr: SocketAddr,
    req: Request<Incoming>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    info!("[{}] {} {}", addr, method, path);

    let response = match (method, path.as_str()) {
        // Health check
        (Method::GET, "/") => routes::health_check(),

        // Endorse edges in display order, for the tree diagram
        (Method::GET, "/api/endorsements") => {
            routes::list_endorsements(Arc::clone(&state)).await
        }

        // CORS preflight
        (Method::OPTIONS, _) => preflight_response(),

        _ => not_found_response(&path),
    };

    Ok(response)
}

/// CORS preflight response
fn preflight_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::OK)
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Headers", "Content-Type")
        .header("Access-Control-Allow-Methods", "GET, POST")
        .body(Full::new(Bytes::new()))
        .unwrap()
}

/// Not found response
fn not_found_response(path: &str) -> Response<Full<Bytes>> {
    let body = serde_json::json!({
        "error": "Not Found",
        "path": path,
    });

    Response::builder()
        .status(StatusCode::NOT_FOUND)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(Full::new(Bytes::from(body.to_string())))
        .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preflight_allows_cors() {
        let response = preflight_response();
        assert_eq!(response.status(), StatusCode::OK);

        let headers = response.headers();
        assert_eq!(headers["Access-Control-Allow-Origin"], "*");
        assert_eq!(headers["Access-Control-Allow-Headers"], "Content-Type");
        // Only the methods the frontend uses; OPTIONS itself is not advertised
        assert_eq!(headers["Access-Control-Allow-Methods"], "GET, POST");
    }

    #[test]
    fn test_not_found_includes_path() {
        let response = not_found_response("/nope");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
