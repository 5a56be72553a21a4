use crate::{
	attribute_value, is_binding_attribute, AnnotatedMember, Location, OwnerRef, ScanError,
	DEFAULT_ATTRIBUTE,
};
use ahash::AHashMap;
use std::fs::read_to_string;
use std::path::{Component, Path};
use syn::spanned::Spanned;
use syn::visit::Visit;
use syn::{Attribute, Item, Visibility};
use tracing::{debug, trace};
use viewbind_core::{join, namespace_segments};
use walkdir::WalkDir;

/// Finds every use of the binding attribute in a tree of Rust sources.
pub struct SourceScanner {
	attribute: String,
}

/// A module or owner declaration, as seen from its parent module.
struct Declaration {
	/// Visible at the crate root, provided the parent is.
	exported: bool,
	cfg: Vec<String>,
}

#[derive(Default)]
struct Sightings {
	members: Vec<AnnotatedMember>,
	declarations: AHashMap<String, Declaration>,
}

impl Sightings {
	fn declare(&mut self, path: String, vis: &Visibility, attrs: &[Attribute]) {
		let depth = namespace_segments(&path).count();
		let declaration = Declaration {
			exported: exported(vis, depth),
			cfg: attrs.iter().filter_map(cfg_predicate).collect(),
		};
		self.declarations.insert(path, declaration);
	}

	/// Fills in what each owner inherits from its enclosing modules.
	///
	/// Modules declared in files outside the scan are taken to be visible and unconditional.
	fn finish(self) -> Vec<AnnotatedMember> {
		let Sightings {
			mut members,
			declarations,
		} = self;

		for owner in members.iter_mut().filter_map(|v| v.owner.as_mut()) {
			let qualified = owner.qualified_name();
			let mut path = String::new();
			for segment in namespace_segments(&qualified) {
				path = join(&path, segment);
				let Some(declaration) = declarations.get(&path) else {
					continue;
				};
				if !declaration.exported && owner.hidden.is_none() {
					owner.hidden = Some(path.clone());
				}
				owner.cfg.extend(declaration.cfg.iter().cloned());
			}
		}
		members
	}
}

/// Whether an item declared `depth` segments below the crate root can be named there.
fn exported(vis: &Visibility, depth: usize) -> bool {
	if depth <= 1 {
		return true;
	}

	match vis {
		Visibility::Public(_) => true,
		Visibility::Restricted(restricted) => {
			let path = &restricted.path;
			path.is_ident("crate") || (path.is_ident("super") && depth == 2)
		}
		Visibility::Inherited => false,
	}
}

fn cfg_predicate(attr: &Attribute) -> Option<String> {
	if !attr.path().is_ident("cfg") {
		return None;
	}
	attr.meta
		.require_list()
		.ok()
		.map(|list| list.tokens.to_string())
}

/// Every binding attribute below an item, however deeply nested.
struct Buried<'a> {
	attribute: &'a str,
	found: Vec<Attribute>,
}

impl<'ast> Visit<'ast> for Buried<'_> {
	fn visit_attribute(&mut self, attr: &'ast Attribute) {
		if is_binding_attribute(attr, self.attribute) {
			self.found.push(attr.clone());
		}
	}
}

impl SourceScanner {
	pub fn new(attribute: impl Into<String>) -> SourceScanner {
		SourceScanner {
			attribute: attribute.into(),
		}
	}

	pub fn attribute(&self) -> &str {
		&self.attribute
	}

	/// Scans all `.rs` files below `root`, in file name order.
	///
	/// `root` is taken to be a crate's source root, so `lib.rs`, `main.rs` and
	/// `mod.rs` files do not add a namespace segment of their own.
	pub fn scan_dir(&self, root: &Path) -> Result<Vec<AnnotatedMember>, ScanError> {
		let mut sightings = Sightings::default();
		for entry in WalkDir::new(root).sort_by_file_name() {
			let entry = entry.map_err(|source| ScanError::Walk {
				root: root.to_path_buf(),
				source,
			})?;

			let path = entry.path();
			if !entry.file_type().is_file() || path.extension().map_or(true, |v| v != "rs") {
				continue;
			}

			let relative = path.strip_prefix(root).unwrap_or(path);
			let namespace = module_namespace(relative);
			let text = read_to_string(path).map_err(|source| ScanError::Io {
				path: path.to_path_buf(),
				source,
			})?;

			trace!("Scanning {path:?} as `{namespace}`");
			self.scan_file(&namespace, path, &text, &mut sightings)?;
		}

		let members = sightings.finish();
		debug!(
			"Found {} #[{}] attributes under {root:?}",
			members.len(),
			self.attribute
		);
		Ok(members)
	}

	/// Scans one file whose items live in `namespace`.
	pub fn scan_source(
		&self,
		namespace: &str,
		file: &Path,
		text: &str,
	) -> Result<Vec<AnnotatedMember>, ScanError> {
		let mut sightings = Sightings::default();
		self.scan_file(namespace, file, text, &mut sightings)?;
		Ok(sightings.finish())
	}

	fn scan_file(
		&self,
		namespace: &str,
		file: &Path,
		text: &str,
		out: &mut Sightings,
	) -> Result<(), ScanError> {
		let syntax = syn::parse_file(text).map_err(|source| ScanError::Parse {
			path: file.to_path_buf(),
			source,
		})?;

		self.scan_items(namespace, &syntax.items, file, out);
		Ok(())
	}

	fn scan_items(&self, namespace: &str, items: &[Item], file: &Path, out: &mut Sightings) {
		for item in items {
			match item {
				Item::Struct(item) => {
					let owner = OwnerRef {
						generic: !item.generics.params.is_empty(),
						..OwnerRef::new(namespace, item.ident.to_string())
					};
					out.declare(owner.qualified_name(), &item.vis, &item.attrs);
					self.misplaced(&item.attrs, &owner.simple_name, file, out);

					for (i, field) in item.fields.iter().enumerate() {
						let member = match &field.ident {
							Some(ident) => ident.to_string(),
							None => i.to_string(),
						};
						self.sightings(&field.attrs, &member, Some(&owner), file, out);
					}
				}
				Item::Enum(item) => {
					let name = item.ident.to_string();
					self.misplaced(&item.attrs, &name, file, out);

					// Variant fields can not be assigned through `target.<member>`.
					for variant in &item.variants {
						let variant_name = format!("{name}::{}", variant.ident);
						self.misplaced(&variant.attrs, &variant_name, file, out);
						for (i, field) in variant.fields.iter().enumerate() {
							let member = match &field.ident {
								Some(ident) => format!("{variant_name}.{ident}"),
								None => format!("{variant_name}.{i}"),
							};
							self.misplaced(&field.attrs, &member, file, out);
						}
					}
				}
				Item::Union(item) => {
					let name = item.ident.to_string();
					self.misplaced(&item.attrs, &name, file, out);
					for field in &item.fields.named {
						if let Some(ident) = &field.ident {
							self.misplaced(&field.attrs, &format!("{name}.{ident}"), file, out);
						}
					}
				}
				Item::Mod(item) => {
					let namespace = join(namespace, &item.ident.to_string());
					out.declare(namespace.clone(), &item.vis, &item.attrs);
					self.misplaced(&item.attrs, &item.ident.to_string(), file, out);
					if let Some((_, items)) = &item.content {
						self.scan_items(&namespace, items, file, out);
					}
				}
				// Types declared in these can not be named from outside.
				Item::Fn(fun) => self.buried(item, &fun.sig.ident.to_string(), file, out),
				Item::Const(konst) => self.buried(item, &konst.ident.to_string(), file, out),
				Item::Static(statik) => self.buried(item, &statik.ident.to_string(), file, out),
				Item::Type(alias) => self.buried(item, &alias.ident.to_string(), file, out),
				Item::Trait(trait_) => self.buried(item, &trait_.ident.to_string(), file, out),
				Item::Impl(_) => self.buried(item, "impl", file, out),
				_ => {}
			}
		}
	}

	/// Attribute on something that is not a struct field.
	fn misplaced(&self, attrs: &[Attribute], name: &str, file: &Path, out: &mut Sightings) {
		self.sightings(attrs, name, None, file, out);
	}

	fn buried(&self, item: &Item, name: &str, file: &Path, out: &mut Sightings) {
		let mut buried = Buried {
			attribute: &self.attribute,
			found: vec![],
		};
		buried.visit_item(item);
		self.misplaced(&buried.found, name, file, out);
	}

	fn sightings(
		&self,
		attrs: &[Attribute],
		member: &str,
		owner: Option<&OwnerRef>,
		file: &Path,
		out: &mut Sightings,
	) {
		for attr in attrs {
			if !is_binding_attribute(attr, &self.attribute) {
				continue;
			}

			out.members.push(AnnotatedMember {
				member: member.to_string(),
				owner: owner.cloned(),
				value: attribute_value(attr),
				location: Location::new(file, attr.span().start().line),
			});
		}
	}
}

impl Default for SourceScanner {
	fn default() -> Self {
		SourceScanner::new(DEFAULT_ATTRIBUTE)
	}
}

/// Module path of a source file relative to its crate root.
pub fn module_namespace(relative: &Path) -> String {
	let mut segments: Vec<String> = relative
		.components()
		.filter_map(|component| match component {
			Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
			_ => None,
		})
		.collect();

	if let Some(last) = segments.pop() {
		let stem = last.trim_end_matches(".rs");
		let is_root = segments.is_empty() && (stem == "lib" || stem == "main");
		if stem != "mod" && !is_root {
			segments.push(stem.to_string());
		}
	}

	segments.join("::")
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::RawValue;
	use std::fs::{create_dir_all, write};

	const LOGIN: &str = r#"
		use crate::ui::View;

		#[derive(BindViews)]
		pub struct LoginScreen {
			window: Window,
			#[bind_view(101)]
			email_field: Option<View>,
			#[bind_view(102)]
			submit_button: Option<View>,
		}
	"#;

	fn scan(text: &str) -> Vec<AnnotatedMember> {
		SourceScanner::default()
			.scan_source("screens::login", Path::new("login.rs"), text)
			.unwrap()
	}

	#[test]
	fn finds_struct_fields_in_order() {
		let members = scan(LOGIN);
		assert_eq!(members.len(), 2);

		let owner = OwnerRef::new("screens::login", "LoginScreen");
		assert_eq!(members[0].member, "email_field");
		assert_eq!(members[0].owner.as_ref(), Some(&owner));
		assert_eq!(members[0].value, Some(RawValue::Int(101)));
		assert_eq!(members[1].member, "submit_button");
		assert_eq!(members[1].value, Some(RawValue::Int(102)));
		assert_eq!(members[0].location.file, Path::new("login.rs"));
		assert!(members[0].location.line > 0);
	}

	#[test]
	fn inline_modules_extend_the_namespace() {
		let members = scan(
			r#"
			mod nested {
				pub mod deeper {
					pub struct Header(#[bind_view(7)] Option<u8>);
				}
			}
		"#,
		);

		assert_eq!(members.len(), 1);
		assert_eq!(members[0].member, "0");
		assert_eq!(
			members[0].owner.as_ref().unwrap().qualified_name(),
			"screens::login::nested::deeper::Header"
		);
	}

	#[test]
	fn misplaced_attributes_have_no_owner() {
		let members = scan(
			r#"
			#[bind_view(1)]
			struct Whole;

			enum Choice {
				A { #[bind_view(2)] inner: u8 },
			}

			#[bind_view(3)]
			fn helper() {}
		"#,
		);

		let names: Vec<_> = members.iter().map(|v| v.member.as_str()).collect();
		assert_eq!(names, vec!["Whole", "Choice::A.inner", "helper"]);
		assert!(members.iter().all(|v| v.owner.is_none()));
	}

	#[test]
	fn generic_owners_are_flagged() {
		let members = scan("struct Holder<T> { #[bind_view(1)] value: T }");
		assert!(members[0].owner.as_ref().unwrap().generic);
	}

	#[test]
	fn custom_attribute_name() {
		let members = SourceScanner::new("view")
			.scan_source("", Path::new("lib.rs"), "struct A { #[view(5)] a: u8, #[bind_view(6)] b: u8 }")
			.unwrap();
		assert_eq!(members.len(), 1);
		assert_eq!(members[0].member, "a");
	}

	#[test]
	fn invalid_source_is_a_parse_error() {
		let result = SourceScanner::default().scan_source("", Path::new("broken.rs"), "struct {");
		assert!(matches!(result, Err(ScanError::Parse { .. })));
	}

	#[test]
	fn namespaces_follow_the_file_layout() {
		assert_eq!(module_namespace(Path::new("lib.rs")), "");
		assert_eq!(module_namespace(Path::new("main.rs")), "");
		assert_eq!(module_namespace(Path::new("screens/mod.rs")), "screens");
		assert_eq!(module_namespace(Path::new("screens/login.rs")), "screens::login");
		assert_eq!(module_namespace(Path::new("ui/main.rs")), "ui::main");
	}

	#[test]
	fn scans_directories_in_name_order() {
		let dir = tempfile::tempdir().unwrap();
		let root = dir.path();
		create_dir_all(root.join("screens")).unwrap();
		write(root.join("lib.rs"), "mod screens;\nstruct Root { #[bind_view(1)] a: u8 }").unwrap();
		write(root.join("screens/mod.rs"), "mod login;").unwrap();
		write(root.join("screens/login.rs"), LOGIN).unwrap();
		write(root.join("notes.txt"), "#[bind_view(9)]").unwrap();

		let members = SourceScanner::default().scan_dir(root).unwrap();
		let owners: Vec<_> = members
			.iter()
			.map(|v| v.owner.as_ref().unwrap().qualified_name())
			.collect();
		assert_eq!(
			owners,
			vec![
				"Root",
				"screens::login::LoginScreen",
				"screens::login::LoginScreen"
			]
		);
	}

	#[test]
	fn private_modules_hide_their_owners() {
		let dir = tempfile::tempdir().unwrap();
		let root = dir.path();
		create_dir_all(root.join("screens")).unwrap();
		write(root.join("lib.rs"), "pub mod screens; pub(crate) mod settings;").unwrap();
		write(
			root.join("screens/mod.rs"),
			"mod login;\npub use login::LoginScreen;\npub(crate) mod about;",
		)
		.unwrap();
		write(root.join("screens/login.rs"), LOGIN).unwrap();
		write(
			root.join("screens/about.rs"),
			"pub struct About { #[bind_view(3)] body: u8 }",
		)
		.unwrap();
		write(
			root.join("settings.rs"),
			"struct Private { #[bind_view(4)] a: u8 }\npub(super) struct Shared { #[bind_view(5)] b: u8 }",
		)
		.unwrap();

		let members = SourceScanner::default().scan_dir(root).unwrap();
		let hidden: Vec<_> = members
			.iter()
			.map(|v| {
				let owner = v.owner.as_ref().unwrap();
				(owner.simple_name.as_str(), owner.hidden.as_deref())
			})
			.collect();
		assert_eq!(
			hidden,
			vec![
				("About", None),
				("LoginScreen", Some("screens::login")),
				("LoginScreen", Some("screens::login")),
				("Private", Some("settings::Private")),
				("Shared", None),
			]
		);
	}

	#[test]
	fn owners_inherit_module_cfg() {
		let dir = tempfile::tempdir().unwrap();
		let root = dir.path();
		write(root.join("lib.rs"), "#[cfg(test)]\nmod tests;").unwrap();
		write(
			root.join("tests.rs"),
			r#"
			pub struct Dialog { #[bind_view(5)] ok_button: u8 }

			#[cfg(feature = "demo")]
			pub mod demo {
				#[cfg(unix)]
				pub struct Demo { #[bind_view(6)] a: u8 }
			}
		"#,
		)
		.unwrap();

		let members = SourceScanner::default().scan_dir(root).unwrap();
		let cfg: Vec<_> = members
			.iter()
			.map(|v| v.owner.as_ref().unwrap().cfg.clone())
			.collect();
		assert_eq!(
			cfg,
			vec![
				vec!["test".to_string()],
				vec![
					"test".to_string(),
					"feature = \"demo\"".to_string(),
					"unix".to_string()
				],
			]
		);
	}

	#[test]
	fn types_inside_bodies_are_misplaced() {
		let members = scan(
			r#"
			fn build() {
				struct Local { #[bind_view(1)] a: u8 }
			}

			impl Screen {
				const INNER: () = {
					struct Deep(#[bind_view(2)] u8);
				};
			}
		"#,
		);

		let names: Vec<_> = members.iter().map(|v| v.member.as_str()).collect();
		assert_eq!(names, vec!["build", "impl"]);
		assert!(members.iter().all(|v| v.owner.is_none()));
	}
}
