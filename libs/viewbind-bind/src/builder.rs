use crate::emit::write_file;
use crate::{
	generate, group, render_manifest, ArtifactWriteFailure, Emitter, GenerateError,
	GenerateOptions, MANIFEST_FILE,
};
use eyre::{eyre, Context};
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, error, info};
use viewbind_reader::{extract, DuplicatePolicy, SourceScanner, DEFAULT_ATTRIBUTE};

/// A group that produced no binder. Other groups are unaffected.
#[derive(Debug, Error)]
pub enum GroupFailure {
	#[error(transparent)]
	Generate(#[from] GenerateError),
	#[error(transparent)]
	Write(#[from] ArtifactWriteFailure),
}

#[derive(Debug, Default)]
pub struct BuildReport {
	/// Accepted binding records.
	pub records: usize,
	/// Owners with at least one binding.
	pub groups: usize,
	/// Binder files written, in group order.
	pub written: Vec<PathBuf>,
	pub manifest: Option<PathBuf>,
	/// Binder files from earlier passes that were deleted.
	pub pruned: Vec<PathBuf>,
	pub failures: Vec<GroupFailure>,
}

impl BuildReport {
	/// Whether every group got a binder.
	pub fn is_complete(&self) -> bool {
		self.failures.is_empty()
	}
}

/// One full generation pass: scan, extract, group, generate, emit.
///
/// ```ignore
/// // build.rs
/// fn main() -> eyre::Result<()> {
/// 	let builder = viewbind_bind::Builder::from_cargo_env()?;
/// 	builder.emit_cargo_directives();
/// 	builder.run()?;
/// 	Ok(())
/// }
/// ```
#[derive(Clone, Debug)]
pub struct Builder {
	source_dir: PathBuf,
	out_dir: PathBuf,
	attribute: String,
	duplicates: DuplicatePolicy,
	options: GenerateOptions,
	manifest: bool,
}

impl Builder {
	pub fn new(source_dir: impl Into<PathBuf>, out_dir: impl Into<PathBuf>) -> Builder {
		Builder {
			source_dir: source_dir.into(),
			out_dir: out_dir.into(),
			attribute: DEFAULT_ATTRIBUTE.to_string(),
			duplicates: DuplicatePolicy::default(),
			options: GenerateOptions::default(),
			manifest: true,
		}
	}

	/// Scans `$CARGO_MANIFEST_DIR/src` into `$OUT_DIR/viewbind`.
	pub fn from_cargo_env() -> eyre::Result<Builder> {
		let manifest_dir =
			env::var_os("CARGO_MANIFEST_DIR").ok_or_else(|| eyre!("CARGO_MANIFEST_DIR is not set"))?;
		let out_dir = env::var_os("OUT_DIR").ok_or_else(|| eyre!("OUT_DIR is not set"))?;

		Ok(Builder::new(
			Path::new(&manifest_dir).join("src"),
			Path::new(&out_dir).join("viewbind"),
		))
	}

	/// Attribute to scan for instead of `bind_view`.
	///
	/// `#[derive(BindViews)]` only registers `bind_view` as a helper attribute. Code
	/// using another name has to make that attribute legal some other way, for
	/// instance with its own derive.
	pub fn attribute(mut self, attribute: impl Into<String>) -> Builder {
		self.attribute = attribute.into();
		self
	}

	pub fn duplicates(mut self, duplicates: DuplicatePolicy) -> Builder {
		self.duplicates = duplicates;
		self
	}

	pub fn runtime_path(mut self, runtime_path: impl Into<String>) -> Builder {
		self.options.runtime_path = runtime_path.into();
		self
	}

	/// Whether to write the `register_all` manifest.
	pub fn manifest(mut self, manifest: bool) -> Builder {
		self.manifest = manifest;
		self
	}

	pub fn source_dir(&self) -> &Path {
		&self.source_dir
	}

	pub fn out_dir(&self) -> &Path {
		&self.out_dir
	}

	pub fn emit_cargo_directives(&self) {
		println!("cargo:rerun-if-changed={}", self.source_dir.display());
	}

	pub fn run(&self) -> eyre::Result<BuildReport> {
		info!("Scanning {}", self.source_dir.display());
		let members = SourceScanner::new(self.attribute.as_str())
			.scan_dir(&self.source_dir)
			.wrap_err_with(|| format!("Scanning {}", self.source_dir.display()))?;
		let records = extract(members, self.duplicates)?;

		let mut report = BuildReport {
			records: records.len(),
			..BuildReport::default()
		};

		let groups = group(records);
		report.groups = groups.len();

		let emitter = Emitter::new(&self.out_dir);
		let mut artifacts = vec![];
		for group in &groups {
			let result = generate(group, &self.options)
				.map_err(GroupFailure::from)
				.and_then(|artifact| Ok((emitter.emit(&artifact)?, artifact)));

			match result {
				Ok((path, artifact)) => {
					report.written.push(path);
					artifacts.push(artifact);
				}
				Err(failure) => {
					error!("No binder for {}: {failure}", group.owner_qualified_name);
					report.failures.push(failure);
				}
			}
		}

		report.pruned = emitter.prune(&report.written);

		if self.manifest {
			let source = render_manifest(&artifacts, &self.options)?;
			let path = self.out_dir.join(MANIFEST_FILE);
			write_file(&path, &source)?;
			debug!("Wrote {}", path.display());
			report.manifest = Some(path);
		}

		info!(
			"Generated {} binders from {} bindings ({} failed)",
			report.written.len(),
			report.records,
			report.failures.len()
		);
		Ok(report)
	}
}
