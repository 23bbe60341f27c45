//! # HTTP Server for Card Rendering
//!
//! JSON in, layouts, previews and PDFs out.
//!
//! ## Usage
//!
//! ```bash
//! speccard serve --listen 0.0.0.0:8080 --brand-icons icons.json
//! ```
//!
//! | Route | Response |
//! |-------|----------|
//! | `GET /api/sizes` | size table |
//! | `POST /api/cards/:size/layout` | `CardLayout` JSON |
//! | `POST /api/cards/:size/preview` | HTML (or `?format=json` tree) |
//! | `POST /api/cards/:size/pdf` | single-card PDF |
//! | `POST /api/cards/:size/sheet` | multi-up PDF, `?crop_marks=true` |
//! | `POST /api/cards/export` | every size as base64 PDF |

mod handlers;
mod state;

pub use state::{AppState, ServerConfig};

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::CardError;

/// Routes bound to `state`, without a listener.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/sizes", get(handlers::cards::sizes))
        .route("/api/cards/export", post(handlers::cards::export))
        .route("/api/cards/:size/layout", post(handlers::cards::layout))
        .route("/api/cards/:size/preview", post(handlers::cards::preview))
        .route("/api/cards/:size/pdf", post(handlers::cards::pdf))
        .route("/api/cards/:size/sheet", post(handlers::cards::sheet))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server.
///
/// ## Example
///
/// ```no_run
/// use speccard::server::{serve, ServerConfig};
///
/// # async fn example() -> Result<(), speccard::error::CardError> {
/// let config = ServerConfig {
///     listen_addr: "0.0.0.0:8080".to_string(),
///     ..Default::default()
/// };
///
/// serve(config).await?;
/// # Ok(())
/// # }
/// ```
pub async fn serve(config: ServerConfig) -> Result<(), CardError> {
    let app_state = Arc::new(AppState::new(config.clone())?);
    let app = router(app_state);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .map_err(|e| {
            CardError::Config(format!("Failed to bind to {}: {}", config.listen_addr, e))
        })?;

    info!(
        listen = %config.listen_addr,
        brand_icons = config.brand_icons.icons.len(),
        "speccard server listening"
    );

    axum::serve(listener, app).await?;

    Ok(())
}
