// src/lib.rs
pub mod app;
pub mod application;
pub mod cli;
pub mod constants;
pub mod domain;
pub mod infrastructure;
pub mod ports;
pub mod util;

use crate::app::App;
use crate::cli::args::Args;
use anyhow::Result;
use infrastructure::Config;
use tracing::{debug, info};

pub fn run(args: Args) -> Result<()> {
    debug!(
        config = ?args.config,
        api_url = ?args.api_url,
        json = args.json,
        command = args.command.name(),
        "Starting mistakebook with arguments"
    );

    // Initialize configuration
    let config = Config::load_or_default(args.config.as_deref())?.with_base_url(args.api_url);
    debug!(?config, "Loaded configuration");

    // Initialize application
    let app = App::from_config(&config)?;

    // Execute use case
    info!(command = args.command.name(), "Running command");
    let output = cli::commands::execute(&app, args.command, args.json)?;
    println!("{output}");

    Ok(())
}
