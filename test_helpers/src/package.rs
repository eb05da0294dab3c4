//! Throwaway module directories.
//!
//! # Examples
//!
//! ```
//! use baserepo_test_helpers::package::TempPackage;
//!
//! let package = TempPackage::new()?.with_file("order.rs", "pub struct Order;")?;
//! assert!(package.exists("order.rs"));
//! # Ok::<(), anyhow::Error>(())
//! ```

use anyhow::{Context, Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::{Dir, OpenOptions};
use std::io::Write;
use tempfile::TempDir;

/// A temporary directory holding Rust source files.
///
/// The directory and everything in it are removed when the value is dropped.
#[derive(Debug)]
pub struct TempPackage {
    _root: TempDir,
    path: Utf8PathBuf,
    dir: Dir,
}

impl TempPackage {
    /// Creates an empty package directory.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory cannot be created or its path is
    /// not UTF-8.
    pub fn new() -> Result<Self> {
        let root = tempfile::tempdir().context("create temp dir")?;
        let path = Utf8PathBuf::from_path_buf(root.path().to_path_buf())
            .map_err(|raw| anyhow!("temp dir path is not UTF-8: {}", raw.display()))?;
        let dir = Dir::open_ambient_dir(&path, ambient_authority())
            .with_context(|| format!("open {path}"))?;
        Ok(Self {
            _root: root,
            path,
            dir,
        })
    }

    /// Writes `contents` to `name` and returns the package for chaining.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be written.
    pub fn with_file(self, name: &str, contents: &str) -> Result<Self> {
        self.write(name, contents)?;
        Ok(self)
    }

    /// Writes `contents` to `name`, creating parent directories, and returns
    /// the absolute path of the file.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be written.
    pub fn write(&self, name: &str, contents: &str) -> Result<Utf8PathBuf> {
        if let Some(parent) = Utf8Path::new(name)
            .parent()
            .filter(|parent| !parent.as_str().is_empty())
        {
            self.dir
                .create_dir_all(parent)
                .with_context(|| format!("create {parent}"))?;
        }
        let mut file = self
            .dir
            .open_with(
                name,
                OpenOptions::new().write(true).create(true).truncate(true),
            )
            .with_context(|| format!("open {name}"))?;
        file.write_all(contents.as_bytes())
            .with_context(|| format!("write {name}"))?;
        Ok(self.join(name))
    }

    /// Reads `name` back as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read.
    pub fn read(&self, name: &str) -> Result<String> {
        self.dir
            .read_to_string(name)
            .with_context(|| format!("read {name}"))
    }

    /// Returns `true` when `name` exists inside the package.
    #[must_use]
    pub fn exists(&self, name: &str) -> bool {
        self.dir.exists(name)
    }

    /// Names of the regular files directly inside the package, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory cannot be listed.
    pub fn file_names(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry_result in self.dir.entries().context("list package")? {
            let entry = entry_result.context("read entry")?;
            if entry.file_type().context("entry type")?.is_file() {
                names.push(entry.file_name().context("entry name")?);
            }
        }
        names.sort();
        Ok(names)
    }

    /// Absolute path of the package directory.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Absolute path of `name` inside the package.
    #[must_use]
    pub fn join(&self, name: &str) -> Utf8PathBuf {
        self.path.join(name)
    }
}
