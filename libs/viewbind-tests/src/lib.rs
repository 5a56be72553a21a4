//! A small screen hierarchy wired up by the generated binders.

use tracing::info;
use viewbind_runtime::{Registry, RegistryError};

pub mod screens;
pub mod settings;
pub mod ui;

#[cfg(test)]
mod tests;

include!(concat!(env!("OUT_DIR"), "/viewbind/registry.rs"));

/// Every generated binder of this crate.
pub fn registry() -> Result<Registry, RegistryError> {
	let mut registry = Registry::new();
	register_all(&mut registry)?;
	info!("{} binders registered", registry.len());
	Ok(registry)
}
