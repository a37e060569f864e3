//! HTTP Server for the csvmatrix API.
//!
//! Every operation route takes a multipart upload with the CSV in field
//! `file` and answers in plain text. Errors are bodies starting with `error `,
//! sent with status 200 unless structured status codes are enabled.
//!
//! Operation routes accept any method. Only a multipart body carries an
//! upload, so a GET gets an error body.
//!
//! # API Endpoints
//!
//! | Method | Path        | Description                    |
//! |--------|-------------|--------------------------------|
//! | GET    | `/health`   | Health check                   |
//! | ANY    | `/echo`     | Re-emit the matrix             |
//! | ANY    | `/invert`   | Transpose                      |
//! | ANY    | `/flatten`  | Single row-major line          |
//! | ANY    | `/sum`      | Sum of all cells               |
//! | ANY    | `/multiply` | Product of all cells           |
//! | GET    | `/logs`     | SSE stream for request logs    |

use axum::{
    extract::{
        multipart::{Multipart, MultipartRejection},
        DefaultBodyLimit, State,
    },
    http::{header, Method},
    response::{sse::Event, Json, Sse},
    routing::{any, get},
    Router,
};
use futures::stream::Stream;
use std::{convert::Infallible, net::SocketAddr, sync::Arc, time::Duration};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt as _;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use super::logs::{log_error, log_info, log_success, log_warning, LOG_BROADCASTER};
use super::types::{HealthResponse, OperationReply};
use crate::config::{ServerConfig, FILE_FIELD};
use crate::error::{IngestionError, ServerError, ServerResult};
use crate::transform::pipeline::run_bytes;
use crate::transform::Operation;

type SharedConfig = Arc<ServerConfig>;

/// Build the application router.
pub fn build_router(config: ServerConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::CONTENT_TYPE]);

    let body_limit = DefaultBodyLimit::max(config.max_upload_bytes);

    Router::new()
        .route("/", get(health))
        .route("/health", get(health))
        .route("/logs", get(sse_logs))
        .route(Operation::Echo.path(), any(echo))
        .route(Operation::Invert.path(), any(invert))
        .route(Operation::Flatten.path(), any(flatten))
        .route(Operation::Sum.path(), any(sum))
        .route(Operation::Multiply.path(), any(multiply))
        .layer(body_limit)
        .layer(cors)
        .with_state(Arc::new(config))
}

/// Start the HTTP server. Returns only on a fatal error.
pub async fn start_server(config: ServerConfig) -> ServerResult<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(source) => {
            log_error(format!("Failed to bind {}: {}", addr, source));
            return Err(ServerError::Bind { addr, source });
        }
    };

    println!("🚀 csvmatrix server running on http://localhost:{}", config.port);
    for op in Operation::ALL {
        println!("   ANY  {:<10} - {}", op.path(), op.description());
    }
    println!("   GET  /logs      - SSE log stream");
    println!("   GET  /health    - Health check");
    if config.status_codes {
        println!("   Request errors use 400/422 status codes");
    }
    println!();

    let app = build_router(config);
    axum::serve(listener, app).await?;

    Ok(())
}

/// Health check endpoint
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

/// SSE endpoint for real-time log streaming
async fn sse_logs() -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = LOG_BROADCASTER.subscribe();

    let stream = BroadcastStream::new(rx).filter_map(|result| match result {
        Ok(entry) => {
            let json = serde_json::to_string(&entry).ok()?;
            Some(Ok(Event::default().data(json)))
        }
        Err(_) => None,
    });

    Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}

async fn echo(
    State(config): State<SharedConfig>,
    multipart: Result<Multipart, MultipartRejection>,
) -> OperationReply {
    handle_operation(Operation::Echo, &config, multipart).await
}

async fn invert(
    State(config): State<SharedConfig>,
    multipart: Result<Multipart, MultipartRejection>,
) -> OperationReply {
    handle_operation(Operation::Invert, &config, multipart).await
}

async fn flatten(
    State(config): State<SharedConfig>,
    multipart: Result<Multipart, MultipartRejection>,
) -> OperationReply {
    handle_operation(Operation::Flatten, &config, multipart).await
}

async fn sum(
    State(config): State<SharedConfig>,
    multipart: Result<Multipart, MultipartRejection>,
) -> OperationReply {
    handle_operation(Operation::Sum, &config, multipart).await
}

async fn multiply(
    State(config): State<SharedConfig>,
    multipart: Result<Multipart, MultipartRejection>,
) -> OperationReply {
    handle_operation(Operation::Multiply, &config, multipart).await
}

async fn handle_operation(
    operation: Operation,
    config: &ServerConfig,
    multipart: Result<Multipart, MultipartRejection>,
) -> OperationReply {
    let request_id = Uuid::new_v4().to_string();

    let result = match read_upload(multipart).await {
        Ok(bytes) => run_bytes(operation, &bytes),
        Err(e) => Err(e.into()),
    };

    match &result {
        Ok(r) => log_success(
            &request_id,
            format!(
                "{} {}x{} -> {} bytes",
                operation.path(),
                r.dimension,
                r.dimension,
                r.body.len()
            ),
        ),
        Err(e) => log_warning(&request_id, format!("{} error {}", operation.path(), e)),
    }

    OperationReply::new(result.map(|r| r.body), config.status_codes)
}

/// Read the CSV bytes from the `file` field of the form.
async fn read_upload(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Vec<u8>, IngestionError> {
    let mut multipart = multipart.map_err(|e| IngestionError::Multipart(e.body_text()))?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| IngestionError::Multipart(e.body_text()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        if let Some(name) = field.file_name() {
            log_info(format!("Upload '{}'", name));
        }
        let bytes = field
            .bytes()
            .await
            .map_err(|e| IngestionError::Multipart(e.body_text()))?;
        return Ok(bytes.to_vec());
    }

    Err(IngestionError::MissingFile)
}
