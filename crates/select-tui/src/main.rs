mod action;
mod app;
mod app_state;
mod cli;
mod component;
mod components;
mod input;
mod theme;
mod widgets;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use select_core::config::Config;
use select_core::OptionIndex;

use crate::app::App;
use crate::app_state::AppState;
use crate::cli::Cli;
use crate::components::select_list::SelectList;
use crate::input::{InputSource, KeyMap};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let data_dir = select_core::platform::data_dir();
    std::fs::create_dir_all(&data_dir)?;
    let log_path = data_dir.join("pick.log");
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    // stdout belongs to the TUI and to the final answer; logs go to a file.
    let log_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(log_filter.as_str())
        .with_ansi(false)
        .init();

    tracing::info!("pick starting…");

    // ── Load config ──────────────────────────────────────────────────────────
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::load_or_default(),
    };
    if let Some(title) = &cli.title {
        config.ui.title = title.clone();
    }

    // ── Options ──────────────────────────────────────────────────────────────
    let options = cli.collect_options()?;
    if options.is_empty() {
        tracing::warn!("no options given; the list will be empty");
    }
    let index = Arc::new(OptionIndex::build(options).context("building option list")?);
    let controller = cli.controller(index)?;

    // ── Input + UI ───────────────────────────────────────────────────────────
    let keymap = KeyMap::from_config(&config.keys).context("parsing [keys] in config")?;
    let input = InputSource::default();
    let list = SelectList::with_controller(controller, input.clone(), !cli.disabled);
    let state = AppState::new(config.ui.clone(), keymap.hint());

    let app = App::new(list, input, keymap, state, !cli.stay);
    let selected = app.run().await?;

    match selected {
        Some(value) => {
            println!("{}", value);
            Ok(())
        }
        None => {
            tracing::info!("nothing selected");
            std::process::exit(1);
        }
    }
}
