//! Server state and configuration.

use std::sync::Arc;

use crate::assets::DefaultImageLoader;
use crate::brand::BrandIconSet;
use crate::error::CardError;
use crate::print::PrintOptions;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on (e.g., "0.0.0.0:8080")
    pub listen_addr: String,
    /// Brand icons attached to spec rows.
    pub brand_icons: BrandIconSet,
    /// Partial layout table applied to every request.
    pub layout_overrides: Option<serde_json::Value>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".to_string(),
            brand_icons: BrandIconSet::default(),
            layout_overrides: None,
        }
    }
}

/// Application state shared across handlers.
pub struct AppState {
    pub config: ServerConfig,
    /// Base options every print request starts from.
    pub print_options: PrintOptions,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Result<Self, CardError> {
        let loader = DefaultImageLoader::new()?;
        let print_options = PrintOptions {
            crop_marks: false,
            layout_overrides: config.layout_overrides.clone(),
            brand_icons: Some(Arc::new(config.brand_icons.clone())),
            loader: Some(Arc::new(loader)),
        };
        Ok(Self {
            config,
            print_options,
        })
    }
}
