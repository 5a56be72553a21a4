use crate::{GeneratedArtifact, GENERATED_MARKER};
use ahash::AHashSet;
use std::path::{Path, PathBuf};
use std::{fs, io};
use thiserror::Error;
use tracing::{debug, warn};
use viewbind_core::BINDER_SUFFIX;
use walkdir::WalkDir;

#[derive(Debug, Error)]
#[error("failed to write {}", path.display())]
pub struct ArtifactWriteFailure {
	pub path: PathBuf,
	#[source]
	pub source: io::Error,
}

/// Writes artifacts below an output directory, one file per binder.
pub struct Emitter {
	out_dir: PathBuf,
}

impl Emitter {
	pub fn new(out_dir: impl Into<PathBuf>) -> Emitter {
		Emitter {
			out_dir: out_dir.into(),
		}
	}

	pub fn out_dir(&self) -> &Path {
		&self.out_dir
	}

	pub fn path_of(&self, artifact: &GeneratedArtifact) -> PathBuf {
		self.out_dir.join(artifact.relative_path())
	}

	/// Writes the artifact, replacing any earlier file at its path.
	pub fn emit(&self, artifact: &GeneratedArtifact) -> Result<PathBuf, ArtifactWriteFailure> {
		let path = self.path_of(artifact);
		write_file(&path, &artifact.source)?;
		debug!("Wrote {}", path.display());
		Ok(path)
	}

	/// Deletes generated binders under the output directory that are not in `keep`.
	///
	/// Only files carrying the generated header are touched. Failures are logged and
	/// skipped.
	pub fn prune(&self, keep: &[PathBuf]) -> Vec<PathBuf> {
		let keep: AHashSet<&Path> = keep.iter().map(PathBuf::as_path).collect();
		let mut removed = vec![];

		for entry in WalkDir::new(&self.out_dir).into_iter().filter_map(Result::ok) {
			let path = entry.path();
			let is_binder = path
				.file_name()
				.and_then(|name| name.to_str())
				.map_or(false, |name| name.ends_with(&format!("{BINDER_SUFFIX}.rs")));
			if !entry.file_type().is_file() || !is_binder || keep.contains(path) {
				continue;
			}

			let generated = fs::read_to_string(path)
				.map_or(false, |text| text.starts_with(GENERATED_MARKER));
			if !generated {
				continue;
			}

			match fs::remove_file(path) {
				Ok(()) => {
					debug!("Removed stale {}", path.display());
					removed.push(path.to_path_buf());
				}
				Err(error) => warn!("Could not remove stale {}: {error}", path.display()),
			}
		}

		removed
	}
}

pub(crate) fn write_file(path: &Path, contents: &str) -> Result<(), ArtifactWriteFailure> {
	let failure = |source| ArtifactWriteFailure {
		path: path.to_path_buf(),
		source,
	};

	if let Some(parent) = path.parent() {
		fs::create_dir_all(parent).map_err(failure)?;
	}
	fs::write(path, contents).map_err(failure)
}
