//! Command-line interface definitions for `baserepo-gen`.

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use clap::error::ErrorKind;

use crate::config::ConfigOverrides;

/// Parsed CLI arguments for `baserepo-gen`.
#[derive(Debug, Parser)]
#[command(name = "baserepo-gen")]
#[command(about = "Generate data-access repositories for declared Rust types")]
#[command(version)]
pub struct Args {
    /// Comma-separated list of type names; must be set.
    #[arg(
        short = 't',
        long = "type",
        value_name = "TYPE[,TYPE...]",
        value_delimiter = ',',
        required = true
    )]
    pub types: Vec<String>,
    /// Configuration file (defaults to `baserepo-gen.toml`).
    #[arg(long, value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,
    /// Path generated files import the runtime surface from.
    #[arg(long, value_name = "PATH")]
    pub runtime_crate: Option<String>,
    /// One module directory or a list of Rust source files.
    #[arg(value_name = "PATH")]
    pub inputs: Vec<Utf8PathBuf>,
}

impl Args {
    /// Requested type names with surrounding whitespace and empty entries
    /// removed, in command-line order.
    ///
    /// # Errors
    ///
    /// Returns a usage error when no name remains.
    pub fn type_names(&self) -> Result<Vec<&str>, clap::Error> {
        let names: Vec<&str> = self
            .types
            .iter()
            .map(String::as_str)
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .collect();
        if names.is_empty() {
            return Err(clap::Error::raw(
                ErrorKind::MissingRequiredArgument,
                "at least one type name must be given with -t/--type\n",
            ));
        }
        Ok(names)
    }

    /// Explicit configuration file, if any.
    #[must_use]
    pub fn config_file(&self) -> Option<&Utf8Path> {
        self.config.as_deref()
    }

    /// Command-line layer of the configuration.
    #[must_use]
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            runtime_crate: self.runtime_crate.clone(),
        }
    }
}
