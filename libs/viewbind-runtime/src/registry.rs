use crate::{BoxError, RegistryError, ResolveError, ViewBinder};
use ahash::AHashMap;
use std::any::{type_name, Any};
use std::collections::hash_map::Entry;
use std::sync::Arc;
use tracing::debug;
use viewbind_core::binder_name;

pub type BoxedBinder<T> = Box<dyn ViewBinder<T> + Send + Sync>;

type Factory<T> = Arc<dyn Fn() -> Result<BoxedBinder<T>, BoxError> + Send + Sync>;

/// A registered binder: its name, what it binds, and how to build it.
pub struct BinderEntry {
	name: String,
	binder_type: &'static str,
	target: &'static str,
	/// A `Factory<T>` for the target type `T`.
	factory: Box<dyn Any + Send + Sync>,
}

impl BinderEntry {
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Type name of the binder itself.
	pub fn binder_type(&self) -> &'static str {
		self.binder_type
	}

	/// Type name of the owner this binder was registered for.
	pub fn target(&self) -> &'static str {
		self.target
	}

	/// Whether this entry binds `T`.
	pub fn binds<T: 'static>(&self) -> bool {
		self.factory.is::<Factory<T>>()
	}

	/// Builds a fresh binder for `T`.
	pub fn instantiate<T: 'static>(&self) -> Result<BoxedBinder<T>, ResolveError> {
		let factory = self.factory.downcast_ref::<Factory<T>>().ok_or_else(|| {
			ResolveError::ContractMismatch {
				name: self.name.clone(),
				target: type_name::<T>(),
				registered: self.target,
			}
		})?;

		factory().map_err(|source| ResolveError::InstantiationFailure {
			name: self.name.clone(),
			source,
		})
	}
}

/// Every binder known to the program, keyed by binder name.
///
/// Built once at start-up, usually by the generated `register_all`, and read-only
/// afterwards.
#[derive(Default)]
pub struct Registry {
	binders: AHashMap<String, Arc<BinderEntry>>,
}

impl Registry {
	pub fn new() -> Registry {
		Registry {
			binders: AHashMap::new(),
		}
	}

	/// Registers `B` as the binder for `T` under the conventional name.
	pub fn register<T, B>(&mut self) -> Result<(), RegistryError>
	where
		T: 'static,
		B: ViewBinder<T> + Default + Send + Sync + 'static,
	{
		self.register_with::<T, B>(|| Ok(B::default()))
	}

	/// Registers a binder for `T` built by `factory` on every bind.
	pub fn register_with<T, B>(
		&mut self,
		factory: impl Fn() -> Result<B, BoxError> + Send + Sync + 'static,
	) -> Result<(), RegistryError>
	where
		T: 'static,
		B: ViewBinder<T> + Send + Sync + 'static,
	{
		self.register_named::<T, B>(binder_name(type_name::<T>()), factory)
	}

	/// Registers a binder for `T` under an explicit name.
	pub fn register_named<T, B>(
		&mut self,
		name: impl Into<String>,
		factory: impl Fn() -> Result<B, BoxError> + Send + Sync + 'static,
	) -> Result<(), RegistryError>
	where
		T: 'static,
		B: ViewBinder<T> + Send + Sync + 'static,
	{
		let name = name.into();
		let factory: Factory<T> =
			Arc::new(move || factory().map(|binder| Box::new(binder) as BoxedBinder<T>));

		match self.binders.entry(name) {
			Entry::Occupied(entry) => Err(RegistryError::DuplicateBinder {
				name: entry.key().clone(),
			}),
			Entry::Vacant(entry) => {
				debug!("Registered {} for {}", entry.key(), type_name::<T>());
				let binder = BinderEntry {
					name: entry.key().clone(),
					binder_type: type_name::<B>(),
					target: type_name::<T>(),
					factory: Box::new(factory),
				};
				entry.insert(Arc::new(binder));
				Ok(())
			}
		}
	}

	pub fn get(&self, name: &str) -> Option<&Arc<BinderEntry>> {
		self.binders.get(name)
	}

	/// Finds the binder for `T` by name and checks that it binds `T`.
	pub fn lookup<T: 'static>(&self) -> Result<Arc<BinderEntry>, ResolveError> {
		let name = binder_name(type_name::<T>());
		let Some(entry) = self.binders.get(&name) else {
			return Err(ResolveError::BinderNotFound { name });
		};

		if !entry.binds::<T>() {
			return Err(ResolveError::ContractMismatch {
				name,
				target: type_name::<T>(),
				registered: entry.target,
			});
		}

		Ok(entry.clone())
	}

	pub fn contains(&self, name: &str) -> bool {
		self.binders.contains_key(name)
	}

	pub fn len(&self) -> usize {
		self.binders.len()
	}

	pub fn is_empty(&self) -> bool {
		self.binders.is_empty()
	}

	/// Registered binder names, sorted.
	pub fn names(&self) -> Vec<&str> {
		let mut names: Vec<&str> = self.binders.keys().map(String::as_str).collect();
		names.sort_unstable();
		names
	}
}
