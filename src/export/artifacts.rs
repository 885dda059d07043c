//! export::artifacts
//!
//! Deterministic artifact file naming and writing.
//!
//! # Naming convention
//!
//! All artifacts land flat in `Output/`:
//!
//! - `DM-{module}.json/.js` - domain model
//! - `MSC-{module}.json/.js` - module security
//! - `DOC-{qualifiedName}.json/.js` - document
//! - `MOD-{module}.js` - module regeneration script (script-only)
//! - `NAV-{position}.json/.js` - navigation document
//! - `PSC-{position}.json/.js` - project security

use std::fs;
use std::path::{Path, PathBuf};

use super::serialize::DualArtifact;

/// Name of the flat output directory.
pub const OUTPUT_DIR_NAME: &str = "Output";

/// The kind of an exported artifact, determining its file-name prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    /// A module's domain model
    DomainModel,
    /// A module's security document
    ModuleSecurity,
    /// A document
    Document,
    /// A module's aggregated regeneration script
    ModuleScript,
    /// A navigation document (positional)
    Navigation,
    /// A project-security document (positional)
    ProjectSecurity,
}

impl ArtifactKind {
    /// The file-name prefix for this kind.
    pub fn prefix(&self) -> &'static str {
        match self {
            ArtifactKind::DomainModel => "DM",
            ArtifactKind::ModuleSecurity => "MSC",
            ArtifactKind::Document => "DOC",
            ArtifactKind::ModuleScript => "MOD",
            ArtifactKind::Navigation => "NAV",
            ArtifactKind::ProjectSecurity => "PSC",
        }
    }
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.prefix())
    }
}

/// Writes artifacts into the flat output directory.
#[derive(Debug)]
pub struct ArtifactWriter {
    dir: PathBuf,
}

impl ArtifactWriter {
    /// Create the writer, creating `Output/` under `root` if absent.
    pub fn create(root: &Path) -> std::io::Result<Self> {
        let dir = root.join(OUTPUT_DIR_NAME);
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// The output directory path.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The output path for one artifact file.
    pub fn path_for(&self, kind: ArtifactKind, name: &str, ext: &str) -> PathBuf {
        self.dir.join(format!("{}-{}.{}", kind.prefix(), name, ext))
    }

    /// Write a snapshot/script pair for one unit.
    pub fn write_pair(
        &self,
        kind: ArtifactKind,
        name: &str,
        artifact: &DualArtifact,
    ) -> std::io::Result<()> {
        fs::write(self.path_for(kind, name, "json"), &artifact.snapshot)?;
        fs::write(self.path_for(kind, name, "js"), &artifact.script)?;
        Ok(())
    }

    /// Write a script-only artifact (the per-module regeneration script).
    pub fn write_script(&self, kind: ArtifactKind, name: &str, script: &str) -> std::io::Result<()> {
        fs::write(self.path_for(kind, name, "js"), script)
    }
}
