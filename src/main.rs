mod action;
mod api;
mod app;
mod config;
mod event;
mod models;
mod tui;
mod ui;
mod utils;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use crate::api::client::HttpClient;
use crate::api::session::SessionStore;
use crate::config::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "network-tui", version, about = "A terminal client for the Network posts service")]
struct Cli {
    /// Server base URL (overrides config)
    #[arg(short, long)]
    server: Option<String>,

    /// Start signed out, ignoring any saved session
    #[arg(long)]
    no_session: bool,

    /// Write the effective configuration to the config file and exit
    #[arg(long)]
    init_config: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, default_value = "error")]
    log_level: String,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_tracing(cli: &Cli) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match &cli.log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            builder
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(file))
                .init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli)?;

    let mut config = AppConfig::load()?;
    if let Some(server) = cli.server.clone() {
        config.server = server;
    }
    if cli.init_config {
        let path = config.save()?;
        println!("Wrote {}", path.display());
        return Ok(());
    }

    let client = Arc::new(HttpClient::new(&config.server, config.request_timeout())?);
    let store = SessionStore::default();

    let mut terminal = tui::init()?;
    tui::install_panic_hook();

    let result = app::App::new(config, client, store)
        .with_session_restore(!cli.no_session)
        .run(&mut terminal)
        .await;
    tui::restore()?;

    result
}
