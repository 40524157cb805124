//! Export delivery
//!
//! An [`ExportSink`] is where a finished artifact goes: the browser download
//! in the admin, a directory in the demo, a vector in tests.

use super::ExportArtifact;
use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Receives finished export artifacts
pub trait ExportSink {
	/// Delivers one artifact
	fn deliver(&mut self, artifact: &ExportArtifact) -> Result<()>;
}

/// Keeps every delivered artifact in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
	/// Artifacts in delivery order
	pub artifacts: Vec<ExportArtifact>,
}

impl MemorySink {
	/// Creates an empty sink
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the most recently delivered artifact
	pub fn last(&self) -> Option<&ExportArtifact> {
		self.artifacts.last()
	}
}

impl ExportSink for MemorySink {
	fn deliver(&mut self, artifact: &ExportArtifact) -> Result<()> {
		self.artifacts.push(artifact.clone());
		Ok(())
	}
}

/// Writes artifacts as files named after their suggested filename
#[derive(Debug, Clone)]
pub struct DirectorySink {
	dir: PathBuf,
	written: Vec<PathBuf>,
}

impl DirectorySink {
	/// Creates a sink writing into `dir`, which is created on first delivery
	pub fn new(dir: impl Into<PathBuf>) -> Self {
		Self {
			dir: dir.into(),
			written: Vec::new(),
		}
	}

	/// Target directory
	pub fn dir(&self) -> &Path {
		&self.dir
	}

	/// Paths written so far
	pub fn written(&self) -> &[PathBuf] {
		&self.written
	}
}

impl ExportSink for DirectorySink {
	fn deliver(&mut self, artifact: &ExportArtifact) -> Result<()> {
		fs::create_dir_all(&self.dir)?;
		let path = self.dir.join(&artifact.filename);
		fs::write(&path, &artifact.data)?;
		tracing::debug!(path = %path.display(), bytes = artifact.size_bytes(), "Wrote export file");
		self.written.push(path);
		Ok(())
	}
}
