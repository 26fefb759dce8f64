//! Helpers for loading export options inside a `figment::Jail`.
//!
//! The jail isolates the process environment and working directory, so
//! tests can set `CONFIG_EXPORT_*` variables and write option files without
//! leaking into each other.

use anyhow::{Result, anyhow};
use camino::Utf8Path;
use config_export::{ExportOptions, ExportResult};

/// Executes `f` inside a [`figment::Jail`], returning the closure's output.
///
/// # Errors
///
/// Returns an error if the jail cannot be set up or the closure fails.
pub fn with_jail<F, T>(f: F) -> Result<T>
where
    F: FnOnce(&mut figment::Jail) -> Result<T>,
{
    let mut output = None;
    figment::Jail::try_with(|jail| {
        let value = f(jail).map_err(|err| figment::Error::from(err.to_string()))?;
        output = Some(value);
        Ok(())
    })
    .map_err(|err| anyhow!(err.to_string()))?;
    output.ok_or_else(|| anyhow!("jail closure did not return a value"))
}

/// Runs `setup` in a fresh jail with a cleared environment, then loads
/// [`ExportOptions`] from `file` (relative to the jail directory) and the
/// environment.
///
/// The load result is returned unchanged so callers can inspect failures.
///
/// # Errors
///
/// Returns an error if the jail cannot be set up or `setup` fails.
pub fn load_in_jail<F>(file: Option<&str>, setup: F) -> Result<ExportResult<ExportOptions>>
where
    F: FnOnce(&mut figment::Jail) -> Result<()>,
{
    with_jail(|jail| {
        jail.clear_env();
        setup(jail)?;
        Ok(ExportOptions::load(file.map(Utf8Path::new)))
    })
}
