//! Destinations for generated artifacts.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::assembler::FileArtifact;
use crate::error::{Error, Result};

/// Receives the complete artifact list of a run.
///
/// Implementations must fully replace whatever a previous run left behind:
/// no stale artifact may survive next to the new ones.
pub trait ArtifactSink {
    fn write_all(&mut self, artifacts: &[FileArtifact]) -> Result<()>;
}

/// Writes artifacts into a directory that is recreated on every run.
///
/// Files are staged in a sibling temporary directory first; the target is only
/// replaced once every file has been written, so a failed write leaves the
/// previous output untouched.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    root: PathBuf,
}

impl DirectorySink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn parent(&self) -> &Path {
        match self.root.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

impl ArtifactSink for DirectorySink {
    fn write_all(&mut self, artifacts: &[FileArtifact]) -> Result<()> {
        let parent = self.parent();
        fs::create_dir_all(parent)
            .map_err(|err| Error::io(format!("failed to create {}", parent.display()), err))?;

        let staging = tempfile::Builder::new()
            .prefix(".shapegen-")
            .tempdir_in(parent)
            .map_err(|err| Error::io("failed to create staging directory", err))?;
        debug!(staging = %staging.path().display(), "Staging artifacts.");

        artifacts.par_iter().try_for_each(|artifact| {
            let path = staging.path().join(&artifact.filename);
            fs::write(&path, &artifact.content)
                .map_err(|err| Error::io(format!("failed to write {}", artifact.filename), err))
        })?;

        let parking = tempfile::Builder::new()
            .prefix(".shapegen-previous-")
            .tempdir_in(parent)
            .map_err(|err| Error::io("failed to create parking directory", err))?;
        swap_in(staging.path(), &self.root, &parking.path().join("output"))?;
        // The staging directory is now the output; only the parked copy is dropped.
        let _ = staging.keep();

        info!(
            output = %self.root.display(),
            files = artifacts.len(),
            "Wrote artifacts."
        );
        Ok(())
    }
}

/// Moves `staged` to `root`.
///
/// An existing `root` is parked at `parked` first and moved back if the swap
/// fails, so the previous output survives a failed run.
fn swap_in(staged: &Path, root: &Path, parked: &Path) -> Result<()> {
    let had_previous = root.exists();
    if had_previous {
        fs::rename(root, parked).map_err(|err| {
            Error::io(format!("failed to move aside {}", root.display()), err)
        })?;
    }

    if let Err(err) = fs::rename(staged, root) {
        if had_previous && let Err(restore) = fs::rename(parked, root) {
            warn!(
                output = %root.display(),
                parked = %parked.display(),
                error = %restore,
                "Failed to restore previous output."
            );
        }
        return Err(Error::io(
            format!("failed to move {} to {}", staged.display(), root.display()),
            err,
        ));
    }
    Ok(())
}

/// Keeps artifacts in memory, keyed by filename.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    files: IndexMap<String, String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, filename: &str) -> Option<&str> {
        self.files.get(filename).map(String::as_str)
    }

    /// Filenames in write order.
    pub fn filenames(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl ArtifactSink for MemorySink {
    fn write_all(&mut self, artifacts: &[FileArtifact]) -> Result<()> {
        self.files = artifacts
            .iter()
            .map(|a| (a.filename.clone(), a.content.clone()))
            .collect();
        Ok(())
    }
}
