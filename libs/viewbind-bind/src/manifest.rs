use crate::generate::{owner_path, parse, render};
use crate::{GenerateError, GenerateOptions, GeneratedArtifact};
use proc_macro2::TokenStream;
use quote::quote;
use syn::Path;

pub const MANIFEST_FILE: &str = "registry.rs";

/// Renders `register_all`, which registers every artifact's binder.
///
/// Registrations of owners that only exist under a `cfg` carry the same `cfg`.
///
/// Entries are sorted by owner so the file only changes when the set of owners does.
pub fn render_manifest<'a>(
	artifacts: impl IntoIterator<Item = &'a GeneratedArtifact>,
	options: &GenerateOptions,
) -> Result<String, GenerateError> {
	let mut artifacts: Vec<_> = artifacts.into_iter().collect();
	artifacts.sort_by(|a, b| a.owner_qualified_name.cmp(&b.owner_qualified_name));

	let runtime: Path = parse("registry", &options.runtime_path, "path")?;
	let mut registrations = vec![];
	for artifact in artifacts {
		let owner = owner_path(&artifact.owner_qualified_name)?;
		let binder = owner_path(&artifact.binder().qualified())?;
		let cfg = artifact
			.cfg
			.iter()
			.map(|predicate| {
				parse::<TokenStream>(&artifact.owner_qualified_name, predicate, "cfg predicate")
			})
			.collect::<Result<Vec<_>, _>>()?;

		registrations.push(quote! {
			#(#[cfg(#cfg)])*
			registry.register::<#owner, #binder>()?;
		});
	}

	let tokens = quote! {
		/// Registers every generated view binder.
		#[allow(unused_variables)]
		pub fn register_all(
			registry: &mut #runtime::Registry,
		) -> ::core::result::Result<(), #runtime::RegistryError> {
			#(#registrations)*
			::core::result::Result::Ok(())
		}
	};

	render("registry", "registry", tokens)
}
