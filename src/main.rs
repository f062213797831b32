use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use eframe::egui;

use quake_atlas::app::QuakeAtlasApp;
use quake_atlas::config::AppConfig;
use quake_atlas::data::cache::CatalogCache;
use quake_atlas::state::AppState;

#[derive(Parser)]
#[command(name = "quake-atlas")]
#[command(version, about = "Interactive earthquake catalog dashboard", long_about = None)]
struct Cli {
    /// Catalog file (CSV or Parquet); overrides the config file
    #[arg(short, long)]
    catalog: Option<PathBuf>,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = AppConfig::resolve(cli.config.as_deref(), cli.catalog)?;
    let cache = Arc::new(CatalogCache::new(config.catalog_path.clone()));

    // The catalog is a hard startup dependency.
    let catalog = cache
        .get()
        .with_context(|| format!("loading catalog {}", config.catalog_path.display()))?;

    let state = AppState::new(config, cache, catalog);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Quake Atlas – Earthquake Catalog",
        options,
        Box::new(move |_cc| Ok(Box::new(QuakeAtlasApp::new(state)))),
    )
    .map_err(|e| anyhow!("UI error: {e}"))
}
