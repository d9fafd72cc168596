//! FoodMap Desktop GUI
//!
//! Restaurant map with category filter, text search and a "show my location" control.

mod app;
mod dock;
mod locate;
mod menu;
mod panels;
mod render;
mod state;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use foodmap_core::location::DEFAULT_ENDPOINT;
use foodmap_core::{Catalog, Coordinate, MapConfig, SourceKind};

use app::{AppSettings, FoodMapApp};

#[derive(Parser)]
#[command(name = "foodmap")]
#[command(author, version, about = "Find vegetarian and non-vegetarian restaurants on a map", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Restaurant catalog (JSON). Uses the built-in list when omitted
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Where the user position comes from: ip, off, or a fixed LAT,LON
    #[arg(long, default_value = "ip", allow_hyphen_values = true)]
    locate: SourceKind,

    /// IP geolocation endpoint used by `--locate ip`
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    geo_endpoint: String,

    /// Map center when no position is available, as LAT,LON
    #[arg(long, allow_hyphen_values = true)]
    fallback: Option<Coordinate>,
}

impl Cli {
    fn map_config(&self) -> MapConfig {
        let mut config = MapConfig::default();
        if let Some(fallback) = self.fallback {
            config.fallback = fallback;
        }
        config
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("a global tracing subscriber is already installed");
    }
}

fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    foodmap_core::load_catalog(path).with_context(|| match path {
        Some(path) => format!("Failed to load catalog {}", path.display()),
        None => "Failed to load built-in catalog".to_string(),
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let catalog = load_catalog(cli.catalog.as_deref())?;
    info!("{} restaurants loaded", catalog.len());

    let source = cli
        .locate
        .build(&cli.geo_endpoint)
        .context("Failed to set up location source")?;
    info!("location source: {}", source.describe());

    let settings = AppSettings {
        catalog,
        config: cli.map_config(),
        source,
    };

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("FoodMap: Restaurant Map")
            .with_inner_size([1280.0, 820.0])
            .with_min_inner_size([720.0, 480.0]),
        renderer: eframe::Renderer::Wgpu,
        ..Default::default()
    };

    eframe::run_native(
        "FoodMap",
        native_options,
        Box::new(|cc| Ok(Box::new(FoodMapApp::new(cc, settings)))),
    )
    .map_err(|e| anyhow::anyhow!("GUI failed: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_defaults() {
        let cli = Cli::try_parse_from(["foodmap"]).unwrap();
        assert_eq!(cli.locate, SourceKind::Ip);
        assert_eq!(cli.geo_endpoint, DEFAULT_ENDPOINT);
        assert!(cli.catalog.is_none());
        assert_eq!(cli.map_config().fallback, Coordinate::new(51.505, -0.09));
    }

    #[test]
    fn cli_accepts_negative_coordinates() {
        let cli = Cli::try_parse_from([
            "foodmap",
            "--locate",
            "-33.86,151.2",
            "--fallback",
            "40.7,-74.0",
        ])
        .unwrap();
        assert_eq!(cli.locate, SourceKind::Fixed(Coordinate::new(-33.86, 151.2)));
        assert_eq!(cli.map_config().fallback, Coordinate::new(40.7, -74.0));
    }

    #[test]
    fn cli_rejects_unknown_source() {
        assert!(Cli::try_parse_from(["foodmap", "--locate", "gps"]).is_err());
    }

    #[test]
    fn builtin_catalog_when_no_path() {
        assert_eq!(load_catalog(None).unwrap().len(), 4);
    }

    #[test]
    fn missing_catalog_names_the_file() {
        let path = std::env::temp_dir().join("foodmap-missing.json");
        let err = load_catalog(Some(path.as_path())).unwrap_err();
        assert!(err.to_string().contains("foodmap-missing.json"));
    }
}
