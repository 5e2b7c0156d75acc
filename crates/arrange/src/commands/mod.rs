//! CLI command implementations.

pub(crate) mod build;
pub(crate) mod check;

use std::path::{Path, PathBuf};

use arrange_config::{CliSettings, Config};
use arrange_meta::NavEntry;
use arrange_nav::{HostPlugin, NavigationResult, Options};
use arrange_storage::FsFiles;
use clap::Args;

use crate::error::CliError;
use crate::output::Output;

pub(crate) use build::BuildArgs;
pub(crate) use check::CheckArgs;

/// Arguments shared by every command that builds navigation.
#[derive(Args)]
pub(crate) struct NavArgs {
    /// Path to configuration file (default: auto-discover arrange.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Documentation source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Host nav config file (overrides config).
    #[arg(long)]
    nav_file: Option<PathBuf>,

    /// Warn instead of failing on nav entries that name nothing.
    #[arg(long)]
    lenient: bool,

    /// Collapse single-child sections by default.
    #[arg(long)]
    collapse_single_pages: bool,

    /// Enable verbose output (log metadata loads and warnings).
    #[arg(short, long)]
    pub verbose: bool,
}

/// A finished build with the file index it was built from.
pub(crate) struct Built {
    pub files: FsFiles,
    pub result: NavigationResult,
}

impl NavArgs {
    /// Load config, scan the docs directory, and build navigation.
    pub(crate) fn build(self, output: &Output) -> Result<Built, CliError> {
        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            nav_file: self.nav_file,
            strict: self.lenient.then_some(false),
            collapse_single_pages: self.collapse_single_pages.then_some(true),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let source_dir = &config.docs_resolved.source_dir;
        output.info(&format!("Source directory: {}", source_dir.display()));

        let options = options_from_config(&config);
        let files = FsFiles::scan(source_dir, &options.filename)?;
        let host_nav = config
            .docs_resolved
            .nav_file
            .as_deref()
            .map(read_nav_file)
            .transpose()?;
        let plugins: Vec<HostPlugin> = config
            .plugins
            .iter()
            .map(|p| HostPlugin::new(p.name.clone(), p.handles_nav))
            .collect();

        let result = arrange_nav::build(&files, &options, host_nav, &plugins)?;
        Ok(Built { files, result })
    }
}

/// Build-wide engine options from the loaded configuration.
fn options_from_config(config: &Config) -> Options {
    let navigation = &config.navigation;
    Options {
        filename: config.metadata.filename.clone(),
        collapse_single_pages: navigation.collapse_single_pages,
        strict: navigation.strict,
        order: navigation.order,
        sort_type: navigation.sort_type,
        order_by: navigation.order_by,
    }
}

/// Read and parse the host nav config.
fn read_nav_file(path: &Path) -> Result<Vec<NavEntry>, CliError> {
    tracing::debug!(path = %path.display(), "Loading host nav config");
    let content = std::fs::read_to_string(path)?;
    Ok(NavEntry::list_from_yaml_str(
        &content,
        &path.display().to_string(),
    )?)
}
