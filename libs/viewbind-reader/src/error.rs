use crate::Location;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
	#[error("failed to walk {root}")]
	Walk {
		root: PathBuf,
		#[source]
		source: walkdir::Error,
	},
	#[error("failed to read {path}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
	#[error("failed to parse {path}")]
	Parse {
		path: PathBuf,
		#[source]
		source: syn::Error,
	},
}

/// Failures that abort the whole extraction pass.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum ExtractError {
	#[error("{location}: malformed binding on `{member}`: {reason}")]
	MalformedMetadata {
		location: Location,
		member: String,
		reason: String,
	},
}
