//! Card API handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::assets::AssetWarnings;
use crate::card::{CardSize, ProductConfig};
use crate::error::CardError;
use crate::layout::CardLayout;
use crate::preview::{PreviewScale, render_preview};
use crate::print::{self, PrintDocument};

use super::super::state::AppState;

type ApiError = (StatusCode, String);

fn parse_size(size: &str) -> Result<CardSize, ApiError> {
    size.parse()
        .map_err(|e: CardError| (StatusCode::BAD_REQUEST, e.to_string()))
}

/// Configuration mistakes are the caller's fault; everything else is ours.
fn api_error(e: CardError) -> ApiError {
    let status = match &e {
        CardError::Config(_) | CardError::Json(_) => StatusCode::BAD_REQUEST,
        CardError::Export { source, .. } if matches!(**source, CardError::Config(_)) => {
            StatusCode::BAD_REQUEST
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, e.to_string())
}

fn pdf_response(document: &PrintDocument, filename: &str) -> Result<Response, ApiError> {
    let bytes = document.to_bytes().map_err(api_error)?;
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("inline; filename=\"{}\"", filename),
            ),
        ],
        bytes,
    )
        .into_response())
}

// ============================================================================
// SIZES
// ============================================================================

#[derive(Debug, Serialize)]
pub struct SizeInfo {
    pub key: &'static str,
    pub label: &'static str,
    pub width: f32,
    pub height: f32,
}

/// GET /api/sizes - List card sizes.
pub async fn sizes() -> Json<Vec<SizeInfo>> {
    Json(
        CardSize::ALL
            .iter()
            .map(|&size| {
                let (width, height) = size.dimensions();
                SizeInfo {
                    key: size.key(),
                    label: size.label(),
                    width,
                    height,
                }
            })
            .collect(),
    )
}

// ============================================================================
// LAYOUT & PREVIEW
// ============================================================================

#[derive(Debug, Serialize)]
pub struct LayoutResponse {
    pub layout: CardLayout,
    pub warnings: AssetWarnings,
}

/// POST /api/cards/:size/layout - Build the layout model.
pub async fn layout(
    State(state): State<Arc<AppState>>,
    Path(size): Path<String>,
    Json(config): Json<ProductConfig>,
) -> Result<Json<LayoutResponse>, ApiError> {
    let size = parse_size(&size)?;
    let (layout, warnings) = print::prepare_layout(&config, size, &state.print_options)
        .await
        .map_err(api_error)?;
    Ok(Json(LayoutResponse { layout, warnings }))
}

/// Query parameters for the preview endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct PreviewQuery {
    /// `html` (default) or `json`.
    pub format: Option<String>,
    pub font_scale: Option<f32>,
    pub spatial_scale: Option<f32>,
}

/// POST /api/cards/:size/preview - Render the screen preview.
pub async fn preview(
    State(state): State<Arc<AppState>>,
    Path(size): Path<String>,
    Query(query): Query<PreviewQuery>,
    Json(config): Json<ProductConfig>,
) -> Result<Response, ApiError> {
    let size = parse_size(&size)?;
    let (layout, _) = print::prepare_layout(&config, size, &state.print_options)
        .await
        .map_err(api_error)?;

    let defaults = PreviewScale::default();
    let scale = PreviewScale {
        font_scale: query.font_scale.unwrap_or(defaults.font_scale),
        spatial_scale: query.spatial_scale.unwrap_or(defaults.spatial_scale),
    };
    let tree = render_preview(&layout, &scale);

    match query.format.as_deref() {
        None | Some("html") => Ok(Html(tree.to_html()).into_response()),
        Some("json") => Ok(Json(tree).into_response()),
        Some(other) => Err((
            StatusCode::BAD_REQUEST,
            format!("unknown preview format '{}'", other),
        )),
    }
}

// ============================================================================
// PDF
// ============================================================================

/// POST /api/cards/:size/pdf - Render a single card.
pub async fn pdf(
    State(state): State<Arc<AppState>>,
    Path(size): Path<String>,
    Json(config): Json<ProductConfig>,
) -> Result<Response, ApiError> {
    let size = parse_size(&size)?;
    let output = print::generate_card(&config, size, &state.print_options)
        .await
        .map_err(api_error)?;
    pdf_response(&output.document, &format!("{}.pdf", size.key()))
}

/// Query parameters for the sheet endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct SheetQuery {
    #[serde(default)]
    pub crop_marks: bool,
}

/// POST /api/cards/:size/sheet - Render a multi-up letter sheet.
pub async fn sheet(
    State(state): State<Arc<AppState>>,
    Path(size): Path<String>,
    Query(query): Query<SheetQuery>,
    Json(config): Json<ProductConfig>,
) -> Result<Response, ApiError> {
    let size = parse_size(&size)?;
    let options = state.print_options.clone().with_crop_marks(query.crop_marks);
    let output = print::generate_multi_up(&config, size, &options)
        .await
        .map_err(api_error)?;
    pdf_response(&output.document, &format!("{}-sheet.pdf", size.key()))
}

// ============================================================================
// EXPORT
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ExportedFile {
    pub size: CardSize,
    pub filename: String,
    /// Standard base64 PDF, ready to attach.
    pub pdf_base64: String,
    pub warnings: AssetWarnings,
}

/// POST /api/cards/export - Every size as a base64 PDF.
pub async fn export(
    State(state): State<Arc<AppState>>,
    Json(config): Json<ProductConfig>,
) -> Result<Json<Vec<ExportedFile>>, ApiError> {
    use base64::Engine as _;
    use base64::engine::general_purpose::STANDARD;

    let cards = print::export_all_sizes(&config, &state.print_options)
        .await
        .map_err(api_error)?;
    Ok(Json(
        cards
            .into_iter()
            .map(|card| ExportedFile {
                size: card.size,
                filename: format!("{}.pdf", card.size.key()),
                pdf_base64: STANDARD.encode(&card.pdf),
                warnings: card.warnings,
            })
            .collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::print::PrintOptions;
    use crate::print::vector::NoImages;
    use crate::server::{ServerConfig, router};
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use tower::ServiceExt;

    fn app() -> axum::Router {
        let state = AppState {
            config: ServerConfig::default(),
            print_options: PrintOptions {
                loader: Some(Arc::new(NoImages)),
                ..Default::default()
            },
        };
        router(Arc::new(state))
    }

    fn post_json(uri: &str, config: &ProductConfig) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(config).unwrap()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_sizes() {
        let response = app()
            .oneshot(Request::get("/api/sizes").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let sizes: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(sizes.as_array().unwrap().len(), 3);
        assert_eq!(sizes[0]["key"], "shelf");
    }

    #[tokio::test]
    async fn test_unknown_size_is_bad_request() {
        let response = app()
            .oneshot(post_json("/api/cards/banner/layout", &ProductConfig::sample()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_layout_json() {
        let response = app()
            .oneshot(post_json("/api/cards/shelf/layout", &ProductConfig::sample()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["layout"]["size"], "shelf");
        assert_eq!(value["layout"]["elements"][0]["type"], "header");
    }

    #[tokio::test]
    async fn test_preview_html() {
        let response = app()
            .oneshot(post_json("/api/cards/price/preview", &ProductConfig::sample()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.starts_with("<div"));
        assert!(html.contains("Nebula RTX Gaming PC"));
    }

    #[tokio::test]
    async fn test_sheet_is_pdf() {
        let response = app()
            .oneshot(post_json(
                "/api/cards/shelf/sheet?crop_marks=true",
                &ProductConfig::sample(),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(body.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_export_returns_every_size() {
        let response = app()
            .oneshot(post_json("/api/cards/export", &ProductConfig::sample()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let files: serde_json::Value = serde_json::from_slice(&body).unwrap();
        let names: Vec<&str> = files
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["filename"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["shelf.pdf", "price.pdf", "poster.pdf"]);
    }
}
