use thiserror::Error;
use viewbind_core::ViewId;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failure inside a binder's `bind`. Always reported to the caller.
#[derive(Debug, Error)]
pub enum BindError {
	#[error("no view with id {id} for `{owner}.{member}`")]
	ViewNotFound {
		owner: &'static str,
		member: &'static str,
		id: ViewId,
	},
	#[error(transparent)]
	Other(#[from] BoxError),
}

/// Why no binder could be produced for a target. These are expected outcomes
/// (most types have no bindings) and end up in [`BindOutcome::Skipped`].
///
/// [`BindOutcome::Skipped`]: crate::BindOutcome::Skipped
#[derive(Debug, Error)]
pub enum ResolveError {
	#[error("no binder named `{name}`")]
	BinderNotFound { name: String },
	#[error("`{name}` does not bind `{target}`, it was registered for `{registered}`")]
	ContractMismatch {
		name: String,
		target: &'static str,
		registered: &'static str,
	},
	#[error("failed to instantiate `{name}`")]
	InstantiationFailure {
		name: String,
		#[source]
		source: BoxError,
	},
}

#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum RegistryError {
	#[error("binder `{name}` is already registered")]
	DuplicateBinder { name: String },
}
