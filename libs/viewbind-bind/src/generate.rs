use crate::BindingGroup;
use proc_macro2::{Literal, TokenStream};
use quote::quote;
use std::path::PathBuf;
use syn::{Ident, Member, Path};
use thiserror::Error;
use viewbind_core::{binder_name, TypePath};

/// First line of every generated file.
pub const GENERATED_MARKER: &str = "// @generated by viewbind";

#[derive(Clone, Debug)]
pub struct GenerateOptions {
	/// Path under which generated code reaches the runtime crate.
	pub runtime_path: String,
}

impl Default for GenerateOptions {
	fn default() -> Self {
		GenerateOptions {
			runtime_path: "::viewbind_runtime".to_string(),
		}
	}
}

#[derive(Debug, Error)]
pub enum GenerateError {
	#[error("`{name}` is not a valid {kind} (while generating `{owner}`)")]
	InvalidName {
		owner: String,
		name: String,
		kind: &'static str,
		#[source]
		source: syn::Error,
	},
}

/// Source text of one generated binder.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct GeneratedArtifact {
	pub namespace: String,
	pub type_name: String,
	pub owner_qualified_name: String,
	/// `cfg` predicates the owner only exists under.
	pub cfg: Vec<String>,
	pub source: String,
}

impl GeneratedArtifact {
	/// `screens/login/LoginScreen_ViewBinder.rs` for a binder in `screens::login`.
	pub fn relative_path(&self) -> PathBuf {
		let mut path = self.binder().namespace_dir();
		path.push(format!("{}.rs", self.type_name));
		path
	}

	pub fn owner(&self) -> TypePath {
		TypePath::parse(&self.owner_qualified_name)
	}

	pub fn binder(&self) -> TypePath {
		TypePath::new(self.namespace.clone(), self.type_name.clone())
	}
}

/// Renders the binder for one group.
pub fn generate(
	group: &BindingGroup,
	options: &GenerateOptions,
) -> Result<GeneratedArtifact, GenerateError> {
	let owner = &group.owner_qualified_name;
	let runtime: Path = parse(owner, &options.runtime_path, "path")?;
	let target = owner_path(owner)?;
	let type_name = binder_name(&group.owner_simple_name);
	let binder: Ident = parse(owner, &type_name, "identifier")?;

	let mut statements = TokenStream::new();
	for member in &group.members {
		let field: Member = parse(owner, &member.name, "field name")?;
		let id = Literal::u32_suffixed(member.id);
		let name = member.name.as_str();

		statements.extend(quote! {
			target.#field = #runtime::find_view(&*target, #id, #name)?;
		});
	}

	let tokens = quote! {
		#[allow(non_camel_case_types)]
		#[derive(Clone, Copy, Debug, Default)]
		pub struct #binder;

		impl #runtime::ViewBinder<#target> for #binder {
			fn bind(&self, target: &mut #target) -> ::core::result::Result<(), #runtime::BindError> {
				#statements
				::core::result::Result::Ok(())
			}
		}
	};

	Ok(GeneratedArtifact {
		namespace: group.namespace.clone(),
		type_name,
		owner_qualified_name: owner.clone(),
		cfg: group.cfg.clone(),
		source: render(owner, &format!("for `{owner}`"), tokens)?,
	})
}

/// `crate::`-rooted path of a type given its qualified name.
pub(crate) fn owner_path(qualified: &str) -> Result<Path, GenerateError> {
	parse(qualified, &format!("crate::{qualified}"), "type path")
}

pub(crate) fn parse<T: syn::parse::Parse>(
	owner: &str,
	name: &str,
	kind: &'static str,
) -> Result<T, GenerateError> {
	syn::parse_str(name).map_err(|source| GenerateError::InvalidName {
		owner: owner.to_string(),
		name: name.to_string(),
		kind,
		source,
	})
}

/// Formats generated items into file text.
pub(crate) fn render(
	owner: &str,
	subject: &str,
	tokens: TokenStream,
) -> Result<String, GenerateError> {
	let file: syn::File =
		syn::parse2(tokens).map_err(|source| GenerateError::InvalidName {
			owner: owner.to_string(),
			name: owner.to_string(),
			kind: "item",
			source,
		})?;

	Ok(format!(
		"{GENERATED_MARKER} {subject}. Do not edit.\n{}",
		prettyplease::unparse(&file)
	))
}
