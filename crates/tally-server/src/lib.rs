//! Tally Web Server
//!
//! Axum-based web shell for the Tally personal finance tracker: an entry
//! page, a visuals page, and the small JSON/SVG API behind them.
//!
//! - Every request re-reads the store; nothing is cached between requests
//! - Restrictive CORS policy and security headers
//! - Sanitized error responses

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tower_http::{cors::CorsLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer};
use tracing::{error, info};

use tally_core::{Config, TransactionStore};

mod handlers;

/// Maximum rows returned by the transaction listing
pub const MAX_PAGE_LIMIT: usize = 500;

/// Shared application state
pub struct AppState {
    pub store: TransactionStore,
    pub config: Config,
}

impl AppState {
    pub fn new(store: TransactionStore, config: Config) -> Self {
        Self { store, config }
    }
}

/// Create the router with all routes
pub fn create_router(store: TransactionStore, config: Config) -> Router {
    let state = Arc::new(AppState::new(store, config));

    let api_routes = Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/transactions",
            get(handlers::list_transactions).post(handlers::create_transaction),
        )
        .route("/charts/:kind", get(handlers::get_chart_data))
        .route("/charts/:kind/svg", get(handlers::get_chart_svg))
        .route("/options", get(handlers::get_options));

    // Restrictive default: only allow same-origin
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    // Security headers
    // CSP: scripts and images from this origin only, inline styles for the pages
    let csp_value = HeaderValue::from_static(
        "default-src 'self'; script-src 'self'; style-src 'self' 'unsafe-inline'; img-src 'self' data:; connect-src 'self'; frame-ancestors 'none'"
    );

    Router::new()
        .route("/", get(handlers::index_page))
        .route("/visuals", get(handlers::visuals_page))
        .route("/static/app.js", get(handlers::app_js))
        .nest("/api", api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Security headers
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_SECURITY_POLICY,
            csp_value,
        ))
}

/// Start the server
pub async fn serve(
    store: TransactionStore,
    config: Config,
    host: &str,
    port: u16,
) -> anyhow::Result<()> {
    let app = create_router(store, config);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn not_found(msg: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn unprocessable(msg: &str) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: msg.to_string(),
            internal: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();

        // Store contents and empty views are the caller's business; anything
        // else stays server-side
        if let Some(core) = err.downcast_ref::<tally_core::Error>() {
            if let tally_core::Error::EmptyDataset(view) = core {
                return Self::not_found(&format!("No data for this view: {}", view));
            }
            if core.is_data_error() {
                return Self::unprocessable(&core.to_string());
            }
        }

        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Return generic message to client
            message: "An internal error occurred".to_string(),
            // Keep full error for logging
            internal: Some(err),
        }
    }
}
