//! Destinations for synthesized files.

use anyhow::{Context, Result};
use kmir_synth::SynthesizedFile;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// Receives every successfully synthesized file, in input order.
pub trait OutputSink: Sync {
    fn write(&self, file: &SynthesizedFile) -> Result<()>;
}

/// Keeps files in memory.
#[derive(Debug, Default)]
pub struct CollectingSink {
    files: Mutex<Vec<SynthesizedFile>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_files(self) -> Vec<SynthesizedFile> {
        self.files
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl OutputSink for CollectingSink {
    fn write(&self, file: &SynthesizedFile) -> Result<()> {
        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(file.clone());
        Ok(())
    }
}

/// Writes each file as pretty JSON under `<root>/<package path>/<Name>.json`.
#[derive(Debug, Clone)]
pub struct JsonDirectorySink {
    root: PathBuf,
}

impl JsonDirectorySink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, file: &SynthesizedFile) -> PathBuf {
        let mut path = self.root.clone();
        path.extend(file.package_name.split('.').filter(|s| !s.is_empty()));
        path.push(format!("{}.json", file.file_name));
        path
    }
}

impl OutputSink for JsonDirectorySink {
    fn write(&self, file: &SynthesizedFile) -> Result<()> {
        let path = self.path_for(file);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(file)
            .with_context(|| format!("failed to serialize {}", file.file_name))?;
        std::fs::write(&path, json).with_context(|| format!("failed to write {}", path.display()))
    }
}
