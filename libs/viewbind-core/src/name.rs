use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Appended to an owner's name to form the name of its generated binder.
pub const BINDER_SUFFIX: &str = "_ViewBinder";

/// Separator between namespace segments, as in `screens::login::LoginScreen`.
pub const PATH_SEPARATOR: &str = "::";

/// Name of the generated binder for an owner.
///
/// This is the only naming rule shared between the generator and the runtime
/// resolver, so it must stay a pure function of its input. The binder is declared
/// in its owner's namespace, so applying this to a qualified owner name yields the
/// binder's qualified name.
pub fn binder_name(owner: &str) -> String {
	format!("{owner}{BINDER_SUFFIX}")
}

/// A type named by its namespace and simple name.
#[derive(Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
pub struct TypePath {
	pub namespace: String,
	pub simple_name: String,
}

impl TypePath {
	pub fn new(namespace: impl Into<String>, simple_name: impl Into<String>) -> TypePath {
		TypePath {
			namespace: namespace.into(),
			simple_name: simple_name.into(),
		}
	}

	/// Splits `a::b::Name` into namespace `a::b` and simple name `Name`.
	pub fn parse(qualified: &str) -> TypePath {
		match qualified.rsplit_once(PATH_SEPARATOR) {
			Some((namespace, name)) => TypePath::new(namespace, name),
			None => TypePath::new("", qualified),
		}
	}

	pub fn qualified(&self) -> String {
		join(&self.namespace, &self.simple_name)
	}

	/// The generated binder that lives next to this type.
	pub fn binder(&self) -> TypePath {
		TypePath::new(self.namespace.clone(), binder_name(&self.simple_name))
	}

	pub fn segments(&self) -> impl Iterator<Item = &str> {
		namespace_segments(&self.namespace).chain(std::iter::once(self.simple_name.as_str()))
	}

	/// Relative directory for artifacts in this type's namespace.
	pub fn namespace_dir(&self) -> PathBuf {
		namespace_segments(&self.namespace).collect()
	}
}

impl Display for TypePath {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		if !self.namespace.is_empty() {
			f.write_str(&self.namespace)?;
			f.write_str(PATH_SEPARATOR)?;
		}
		f.write_str(&self.simple_name)
	}
}

/// Joins a namespace and a name, leaving the name alone for the root namespace.
pub fn join(namespace: &str, name: &str) -> String {
	if namespace.is_empty() {
		name.to_string()
	} else {
		format!("{namespace}{PATH_SEPARATOR}{name}")
	}
}

pub fn namespace_segments(namespace: &str) -> impl Iterator<Item = &str> {
	namespace.split(PATH_SEPARATOR).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn binder_name_is_stable() {
		assert_eq!(binder_name("LoginScreen"), "LoginScreen_ViewBinder");
		assert_eq!(binder_name("LoginScreen"), binder_name("LoginScreen"));
	}

	#[test]
	fn parse_and_qualify() {
		let path = TypePath::parse("screens::login::LoginScreen");
		assert_eq!(path.namespace, "screens::login");
		assert_eq!(path.simple_name, "LoginScreen");
		assert_eq!(path.qualified(), "screens::login::LoginScreen");
		assert_eq!(
			path.binder().qualified(),
			"screens::login::LoginScreen_ViewBinder"
		);
		assert_eq!(path.namespace_dir(), PathBuf::from("screens/login"));
	}

	#[test]
	fn root_namespace() {
		let path = TypePath::parse("Splash");
		assert_eq!(path.namespace, "");
		assert_eq!(path.to_string(), "Splash");
		assert_eq!(path.segments().collect::<Vec<_>>(), vec!["Splash"]);
		assert_eq!(path.namespace_dir(), PathBuf::new());
	}
}
