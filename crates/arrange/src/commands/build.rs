//! `arrange build` command implementation.

use std::io::Write;
use std::path::PathBuf;

use clap::{Args, ValueEnum};

use super::NavArgs;
use crate::error::CliError;
use crate::output::{Output, render_tree};

/// Output format for the arranged navigation.
#[derive(Clone, Copy, Default, ValueEnum)]
pub(crate) enum Format {
    /// Pretty-printed JSON with items and reading order.
    #[default]
    Json,
    /// Indented outline of the navigation items.
    Text,
}

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    #[command(flatten)]
    pub nav: NavArgs,

    /// Write the result to a file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t)]
    format: Format,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, scanning, or the build fails, or
    /// the result cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let built = self.nav.build(&output)?;
        output.warnings(&built.result.warnings);

        let view = built.result.to_output(&built.files)?;
        let mut rendered = match self.format {
            Format::Json => serde_json::to_string_pretty(&view)?,
            Format::Text => render_tree(&view.items),
        };
        if !rendered.ends_with('\n') {
            rendered.push('\n');
        }

        match &self.output {
            Some(path) => {
                std::fs::write(path, rendered)?;
                output.success(&format!(
                    "Navigation with {} pages written to {}",
                    view.pages.len(),
                    path.display()
                ));
            }
            None => std::io::stdout().lock().write_all(rendered.as_bytes())?,
        }
        Ok(())
    }
}
