use std::sync::Arc;

use clap::Parser;
use color_eyre::Result;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::App;
use crate::catalog::{Catalog, HttpProductApi, ProductApi};
use crate::config::KeyResolver;

mod app;
mod catalog;
mod cli;
mod commands;
mod config;
mod search;
mod service;
mod theme;
mod tui;
mod ui;

pub use theme::Theme;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let _guard = initialize_logging()?;
    info!("Starting lazyshop");

    let args = cli::Args::parse();

    let mut config = config::load()?;
    if let Some(base_url) = args.base_url {
        config.backend.base_url = base_url;
    }
    if let Some(theme) = args.theme {
        config.theme.name = theme;
    }

    let resolver = Arc::new(KeyResolver::new(Arc::new(config.keybindings)));
    let http = HttpProductApi::new(config.backend.base_url);
    info!("Using backend at {}", http.base_url());

    let base_url = http.base_url().to_string();
    let api: Arc<dyn ProductApi> = Arc::new(http);
    let catalog = Catalog::new(api, base_url, Arc::clone(&resolver));

    let mut app = App::new(catalog, resolver, config.theme.name);
    app.run().await?;

    Ok(())
}

fn initialize_logging() -> Result<WorkerGuard> {
    let directory = dirs::data_local_dir().map_or_else(
        || std::path::PathBuf::from("logs"),
        |path| path.join("lazyshop").join("logs"),
    );
    std::fs::create_dir_all(&directory)?;

    let file_appender = tracing_appender::rolling::daily(&directory, "lazyshop.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_file(true)
                .with_line_number(true)
                .with_thread_ids(true),
        )
        .init();

    Ok(guard)
}
