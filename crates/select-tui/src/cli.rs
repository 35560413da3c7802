use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use select_core::{OptionIndex, OptionsFile, SelectOption, SelectionController};

/// Pick one option from a list in the terminal and print its value.
#[derive(Debug, Parser)]
#[command(name = "pick", version)]
pub struct Cli {
    /// TOML file with `[[options]]` entries (`value`, `label`, `description`).
    pub file: Option<PathBuf>,

    /// Extra option as `value=label`; may be repeated. Appended after the file.
    #[arg(short = 'o', long = "option", value_name = "VALUE=LABEL")]
    pub options: Vec<String>,

    /// Value to start with selected and focused.
    #[arg(short, long)]
    pub default: Option<String>,

    /// Start with the list disabled (toggle with Tab).
    #[arg(long)]
    pub disabled: bool,

    /// Keep running after a selection instead of exiting.
    #[arg(long)]
    pub stay: bool,

    /// Pane title; overrides `[ui] title` from the config.
    #[arg(short, long)]
    pub title: Option<String>,

    /// Config file to use instead of the default location.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    pub fn collect_options(&self) -> anyhow::Result<Vec<SelectOption>> {
        let mut options = match &self.file {
            Some(path) => {
                OptionsFile::load(path)
                    .with_context(|| format!("reading options from {}", path.display()))?
                    .options
            }
            None => Vec::new(),
        };
        options.extend(self.options.iter().map(|pair| SelectOption::parse_pair(pair)));
        Ok(options)
    }

    /// Controller over `index`, starting on `--default` when given.
    pub fn controller(
        &self,
        index: Arc<OptionIndex<SelectOption>>,
    ) -> anyhow::Result<SelectionController<SelectOption>> {
        match &self.default {
            Some(value) => SelectionController::with_default(index, value.clone())
                .with_context(|| format!("--default {}", value)),
            None => Ok(SelectionController::new(index)),
        }
    }
}
