//! `arrange check` command implementation.

use clap::Args;

use super::NavArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    pub nav: NavArgs,

    /// Fail when the build reports any warning.
    #[arg(long)]
    deny_warnings: bool,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// Builds the navigation, reports warnings, and resolves every page
    /// title so unreadable pages surface here too.
    ///
    /// # Errors
    ///
    /// Returns an error if the build fails, or if warnings were reported and
    /// `--deny-warnings` is set.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let built = self.nav.build(&output)?;
        let view = built.result.to_output(&built.files)?;

        let warnings = &built.result.warnings;
        if !warnings.is_empty() {
            output.heading(&format!("{} warning(s)", warnings.len()));
            output.warnings(warnings);
            if self.deny_warnings {
                return Err(CliError::Validation(format!(
                    "{} warning(s) reported with --deny-warnings",
                    warnings.len()
                )));
            }
        }

        output.success(&format!(
            "Navigation OK: {} pages, {} top-level items",
            view.pages.len(),
            view.items.len()
        ));
        Ok(())
    }
}
