//! Configuration tests inside a `figment::Jail`.
//!
//! A jail gives each test a scratch working directory and an isolated
//! environment, so `baserepo-gen.toml` files and `BASEREPO_GEN_*` variables
//! written by one test never leak into another.

use anyhow::{Context, Result, anyhow};
use figment::Jail;

/// Runs `f` inside a [`Jail`] and returns its value.
///
/// # Errors
///
/// Returns an error if the jail cannot be set up or `f` fails.
pub fn with_jail<F, T>(f: F) -> Result<T>
where
    F: FnOnce(&mut Jail) -> figment::error::Result<T>,
{
    let mut captured = None;
    Jail::try_with(|jail| {
        captured = Some(f(jail)?);
        Ok(())
    })
    .map_err(|err| anyhow!("jailed test failed: {err}"))?;
    captured.context("jail closure did not run")
}

/// Writes a TOML file named `file` setting only `runtime_crate`.
///
/// # Errors
///
/// Returns the jail's error when the file cannot be created.
pub fn write_runtime_crate(
    jail: &Jail,
    file: &str,
    runtime_crate: &str,
) -> figment::error::Result<()> {
    jail.create_file(file, &format!("runtime_crate = \"{runtime_crate}\"\n"))?;
    Ok(())
}
