use crate::{BindError, BinderEntry, Registry, ResolveError};
use ahash::AHashMap;
use parking_lot::RwLock;
use std::any::{type_name, Any, TypeId};
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// What [`bind_instance`] did with a target.
#[derive(Debug)]
pub enum BindOutcome {
	/// The named binder ran to completion.
	Bound { binder: String },
	/// No usable binder exists for the target. Nothing was assigned.
	Skipped(ResolveError),
}

impl BindOutcome {
	pub fn is_bound(&self) -> bool {
		matches!(self, BindOutcome::Bound { .. })
	}
}

/// Binds targets through a shared [`Registry`].
///
/// A resolver made with [`Resolver::cached`] remembers verified entries per
/// target type. Two threads may race to fill the same slot; both compute the same
/// entry, so the later write simply replaces an equal value.
pub struct Resolver {
	registry: Arc<Registry>,
	cache: Option<RwLock<AHashMap<TypeId, Arc<BinderEntry>>>>,
}

impl Resolver {
	pub fn new(registry: impl Into<Arc<Registry>>) -> Resolver {
		Resolver {
			registry: registry.into(),
			cache: None,
		}
	}

	pub fn cached(registry: impl Into<Arc<Registry>>) -> Resolver {
		Resolver {
			registry: registry.into(),
			cache: Some(RwLock::new(AHashMap::new())),
		}
	}

	pub fn registry(&self) -> &Registry {
		&self.registry
	}

	/// Finds and verifies the binder for `T`.
	pub fn resolve<T: Any>(&self) -> Result<Arc<BinderEntry>, ResolveError> {
		let Some(cache) = &self.cache else {
			return self.registry.lookup::<T>();
		};

		if let Some(entry) = cache.read().get(&TypeId::of::<T>()) {
			trace!("Cached binder {} for {}", entry.name(), type_name::<T>());
			return Ok(entry.clone());
		}

		let entry = self.registry.lookup::<T>()?;
		cache.write().insert(TypeId::of::<T>(), entry.clone());
		Ok(entry)
	}

	/// Runs the generated binder for `target`, if there is one.
	///
	/// Resolution failures are logged and returned as [`BindOutcome::Skipped`].
	/// Failures inside the binder itself are returned as errors.
	pub fn bind_instance<T: Any>(&self, target: &mut T) -> Result<BindOutcome, BindError> {
		bind_resolved(self.resolve::<T>(), target)
	}
}

/// Binds `target` with the binder registered for its type, without caching.
pub fn bind_instance<T: Any>(
	registry: &Registry,
	target: &mut T,
) -> Result<BindOutcome, BindError> {
	bind_resolved(registry.lookup::<T>(), target)
}

fn bind_resolved<T: Any>(
	entry: Result<Arc<BinderEntry>, ResolveError>,
	target: &mut T,
) -> Result<BindOutcome, BindError> {
	let binder = entry.and_then(|entry| entry.instantiate::<T>().map(|binder| (entry, binder)));
	let (entry, binder) = match binder {
		Ok(value) => value,
		Err(error) => {
			match &error {
				ResolveError::BinderNotFound { .. } => {
					debug!("Nothing to bind for {}: {error}", type_name::<T>())
				}
				_ => warn!("Skipping bind of {}: {error}", type_name::<T>()),
			}
			return Ok(BindOutcome::Skipped(error));
		}
	};

	binder.bind(target)?;
	debug!("Bound {} with {}", type_name::<T>(), entry.name());
	Ok(BindOutcome::Bound {
		binder: entry.name().to_string(),
	})
}
