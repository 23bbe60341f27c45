//! # Speccard CLI
//!
//! Command-line interface for spec card layout, preview and printing.
//!
//! ## Usage
//!
//! ```bash
//! # Dump the layout model for a price card
//! speccard layout --size price --config build.json
//!
//! # Write an HTML preview
//! speccard preview --size poster --config build.json --output poster.html
//!
//! # One shelf tag as a PDF
//! speccard render --size shelf --config build.json --output tag.pdf
//!
//! # Twelve shelf tags on a letter sheet, with crop marks
//! speccard sheet --size shelf --config build.json --crop-marks --output tags.pdf
//!
//! # Every size into a directory
//! speccard export --config build.json --out-dir cards/
//!
//! # HTTP API
//! speccard serve --listen 0.0.0.0:8080
//! ```
//!
//! Without `--config` the built-in sample product is used. Logging goes to
//! stderr and honours `RUST_LOG` (default `speccard=info`).

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use speccard::{
    CardError,
    brand::BrandIconSet,
    card::{CardSize, ProductConfig},
    preview::{PreviewScale, render_preview},
    print::{self, PrintOptions},
    server::{self, ServerConfig},
};

/// Speccard - Spec cards for prebuilt PCs
#[derive(Parser, Debug)]
#[command(name = "speccard")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Inputs shared by every card-producing command.
#[derive(Args, Debug)]
struct CardArgs {
    /// Product configuration JSON (defaults to the built-in sample)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Partial layout table JSON merged over the built-in one
    #[arg(long, value_name = "FILE")]
    layout_config: Option<PathBuf>,

    /// Brand icon set JSON
    #[arg(long, value_name = "FILE")]
    brand_icons: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum PreviewFormat {
    Html,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the CardLayout JSON
    Layout {
        /// Card size: shelf, price or poster
        #[arg(long)]
        size: CardSize,

        #[command(flatten)]
        card: CardArgs,

        /// Write to a file instead of stdout
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Render the screen preview
    Preview {
        #[arg(long)]
        size: CardSize,

        #[command(flatten)]
        card: CardArgs,

        #[arg(long, value_enum, default_value = "html")]
        format: PreviewFormat,

        /// Pixels per point
        #[arg(long)]
        font_scale: Option<f32>,

        /// Pixels per inch
        #[arg(long)]
        spatial_scale: Option<f32>,

        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Render one card to PDF
    Render {
        #[arg(long)]
        size: CardSize,

        #[command(flatten)]
        card: CardArgs,

        #[arg(long, value_name = "FILE")]
        output: PathBuf,
    },

    /// Tile a card onto a US Letter sheet
    Sheet {
        #[arg(long)]
        size: CardSize,

        #[command(flatten)]
        card: CardArgs,

        /// Draw crop marks around the grid
        #[arg(long)]
        crop_marks: bool,

        #[arg(long, value_name = "FILE")]
        output: PathBuf,
    },

    /// Write every size as a PDF into a directory
    Export {
        #[command(flatten)]
        card: CardArgs,

        #[arg(long, value_name = "DIR", default_value = ".")]
        out_dir: PathBuf,
    },

    /// Run the HTTP server
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "127.0.0.1:8080")]
        listen: String,

        /// Partial layout table JSON merged over the built-in one
        #[arg(long, value_name = "FILE")]
        layout_config: Option<PathBuf>,

        /// Brand icon set JSON
        #[arg(long, value_name = "FILE")]
        brand_icons: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("speccard=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, CardError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| CardError::Config(format!("Failed to read {}: {}", path.display(), e)))?;
    Ok(serde_json::from_str(&text)?)
}

fn load_optional<T: serde::de::DeserializeOwned>(
    path: Option<&Path>,
) -> Result<Option<T>, CardError> {
    path.map(|p| read_json(p)).transpose()
}

impl CardArgs {
    fn product(&self) -> Result<ProductConfig, CardError> {
        match &self.config {
            Some(path) => read_json(path),
            None => Ok(ProductConfig::sample()),
        }
    }

    fn options(&self) -> Result<PrintOptions, CardError> {
        let brand_icons: Option<BrandIconSet> = load_optional(self.brand_icons.as_deref())?;
        Ok(PrintOptions {
            layout_overrides: load_optional(self.layout_config.as_deref())?,
            brand_icons: brand_icons.map(Arc::new),
            ..Default::default()
        })
    }
}

fn write_output(output: Option<&Path>, text: &str) -> Result<(), CardError> {
    match output {
        Some(path) => {
            std::fs::write(path, text)?;
            info!(path = %path.display(), "wrote output");
        }
        None => println!("{}", text),
    }
    Ok(())
}

async fn run() -> Result<(), CardError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Layout { size, card, output } => {
            let config = card.product()?;
            let (layout, _) = print::prepare_layout(&config, size, &card.options()?).await?;
            write_output(output.as_deref(), &serde_json::to_string_pretty(&layout)?)
        }

        Commands::Preview {
            size,
            card,
            format,
            font_scale,
            spatial_scale,
            output,
        } => {
            let config = card.product()?;
            let (layout, _) = print::prepare_layout(&config, size, &card.options()?).await?;
            let defaults = PreviewScale::default();
            let scale = PreviewScale {
                font_scale: font_scale.unwrap_or(defaults.font_scale),
                spatial_scale: spatial_scale.unwrap_or(defaults.spatial_scale),
            };
            let tree = render_preview(&layout, &scale);
            let text = match format {
                PreviewFormat::Html => tree.to_html(),
                PreviewFormat::Json => serde_json::to_string_pretty(&tree)?,
            };
            write_output(output.as_deref(), &text)
        }

        Commands::Render { size, card, output } => {
            let config = card.product()?;
            let result = print::generate_card(&config, size, &card.options()?).await?;
            report_warnings(&result.warnings);
            result.document.save(&output)
        }

        Commands::Sheet {
            size,
            card,
            crop_marks,
            output,
        } => {
            let config = card.product()?;
            let options = card.options()?.with_crop_marks(crop_marks);
            let result = print::generate_multi_up(&config, size, &options).await?;
            report_warnings(&result.warnings);
            result.document.save(&output)
        }

        Commands::Export { card, out_dir } => {
            let config = card.product()?;
            let cards = print::export_all_sizes(&config, &card.options()?).await?;
            std::fs::create_dir_all(&out_dir)?;
            for exported in cards {
                report_warnings(&exported.warnings);
                let path = out_dir.join(format!("{}.pdf", exported.size.key()));
                std::fs::write(&path, &exported.pdf)?;
                println!("{} -> {}", exported.size.label(), path.display());
            }
            Ok(())
        }

        Commands::Serve {
            listen,
            layout_config,
            brand_icons,
        } => {
            let config = ServerConfig {
                listen_addr: listen,
                brand_icons: load_optional(brand_icons.as_deref())?.unwrap_or_default(),
                layout_overrides: load_optional(layout_config.as_deref())?,
            };
            server::serve(config).await
        }
    }
}

fn report_warnings(warnings: &speccard::assets::AssetWarnings) {
    for warning in warnings.iter() {
        eprintln!("warning: {} omitted: {}", warning.asset, warning.message);
    }
}
