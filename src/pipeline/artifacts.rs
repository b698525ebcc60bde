//! Artifact files exchanged between stages.
//!
//! Artifacts are plain UTF-8 files in the working directory. Content is
//! carried byte for byte: nothing is trimmed or normalized on either side of
//! the file boundary.

use crate::config::{ArtifactNames, Config};
use crate::error::{QuillError, Result};
use crate::fs::atomic_write_file;
use crate::pipeline::ArtifactKind;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Reads and writes pipeline artifacts under a working directory.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    work_dir: PathBuf,
    names: ArtifactNames,
}

impl ArtifactStore {
    pub fn new(work_dir: impl Into<PathBuf>, names: ArtifactNames) -> Self {
        Self {
            work_dir: work_dir.into(),
            names,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.work_dir, config.pipeline.artifacts.clone())
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Full path of an artifact.
    pub fn path(&self, kind: ArtifactKind) -> PathBuf {
        self.work_dir.join(self.names.get(kind))
    }

    pub fn exists(&self, kind: ArtifactKind) -> bool {
        self.path(kind).is_file()
    }

    /// Read an artifact. A missing file is a hard failure.
    pub fn read(&self, kind: ArtifactKind) -> Result<String> {
        let path = self.path(kind);

        let bytes = std::fs::read(&path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                QuillError::Artifact(format!(
                    "{} artifact not found at '{}'; run the stage that produces it first",
                    kind,
                    path.display()
                ))
            } else {
                QuillError::Artifact(format!(
                    "failed to read {} artifact '{}': {}",
                    kind,
                    path.display(),
                    e
                ))
            }
        })?;

        String::from_utf8(bytes).map_err(|e| {
            QuillError::Artifact(format!(
                "{} artifact '{}' is not valid UTF-8: {}",
                kind,
                path.display(),
                e
            ))
        })
    }

    /// Write an artifact, replacing any previous version atomically.
    pub fn write(&self, kind: ArtifactKind, content: &str) -> Result<PathBuf> {
        let path = self.path(kind);
        atomic_write_file(&path, content)?;
        Ok(path)
    }
}
