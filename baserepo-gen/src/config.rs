//! Layered generator configuration.
//!
//! Values are merged with `figment`, lowest precedence first: built-in
//! defaults, `baserepo-gen.toml` (or the file passed with `--config`),
//! `BASEREPO_GEN_*` environment variables and finally command-line flags.

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use crate::emitter::{DEFAULT_RUNTIME_CRATE, EmitterOptions};
use crate::error::GenerateError;

/// Configuration file looked up when `--config` is not given.
pub const CONFIG_FILE: &str = "baserepo-gen.toml";

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "BASEREPO_GEN_";

/// Merged generator settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Path generated files import the runtime surface from.
    pub runtime_crate: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            runtime_crate: DEFAULT_RUNTIME_CRATE.to_owned(),
        }
    }
}

/// Values supplied on the command line; unset fields leave lower layers
/// untouched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigOverrides {
    /// `--runtime-crate`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime_crate: Option<String>,
}

impl GeneratorConfig {
    /// Loads and validates the merged configuration.
    ///
    /// `config_file` names an explicit file, which must exist; without it the
    /// nearest [`CONFIG_FILE`] is used when present.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::Io`] when an explicit file is missing,
    /// [`GenerateError::Config`] when a layer cannot be read or extracted,
    /// and [`GenerateError::InvalidRuntimePath`] when the runtime crate is not
    /// a Rust path.
    pub fn load(
        config_file: Option<&Utf8Path>,
        overrides: &ConfigOverrides,
    ) -> Result<Self, GenerateError> {
        let file = match config_file {
            Some(path) if !path.exists() => {
                return Err(GenerateError::Io {
                    path: path.to_path_buf(),
                    source: std::io::Error::from(std::io::ErrorKind::NotFound),
                });
            }
            Some(path) => path.to_path_buf(),
            None => Utf8PathBuf::from(CONFIG_FILE),
        };

        let config: Self = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(file.as_std_path()))
            .merge(Env::prefixed(ENV_PREFIX))
            .merge(Serialized::defaults(overrides))
            .extract()
            .map_err(Box::new)?;
        config.runtime_path()?;
        Ok(config)
    }

    /// Parses [`GeneratorConfig::runtime_crate`] as a Rust path.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::InvalidRuntimePath`] when it does not parse.
    pub fn runtime_path(&self) -> Result<syn::Path, GenerateError> {
        syn::parse_str(&self.runtime_crate)
            .map_err(|_| GenerateError::InvalidRuntimePath(self.runtime_crate.clone()))
    }

    /// Emitter options derived from this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::InvalidRuntimePath`] when the runtime crate is
    /// not a Rust path.
    pub fn emitter_options(&self) -> Result<EmitterOptions, GenerateError> {
        Ok(EmitterOptions {
            runtime_crate: self.runtime_path()?,
        })
    }
}
