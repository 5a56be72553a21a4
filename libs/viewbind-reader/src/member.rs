use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use viewbind_core::{join, ViewId};

/// Where an attribute was found.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Location {
	pub file: PathBuf,
	pub line: usize,
}

impl Location {
	pub fn new(file: impl Into<PathBuf>, line: usize) -> Location {
		Location {
			file: file.into(),
			line,
		}
	}
}

impl Display for Location {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}:{}", self.file.display(), self.line)
	}
}

/// The type enclosing an annotated field.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct OwnerRef {
	pub namespace: String,
	pub simple_name: String,
	/// The owner declares generic parameters.
	pub generic: bool,
	/// First path, from the crate root down to the owner itself, that is not
	/// visible at the crate root.
	pub hidden: Option<String>,
	/// `cfg` predicates on the owner and every module enclosing it.
	pub cfg: Vec<String>,
}

impl OwnerRef {
	pub fn new(namespace: impl Into<String>, simple_name: impl Into<String>) -> OwnerRef {
		OwnerRef {
			namespace: namespace.into(),
			simple_name: simple_name.into(),
			generic: false,
			hidden: None,
			cfg: vec![],
		}
	}

	pub fn qualified_name(&self) -> String {
		join(&self.namespace, &self.simple_name)
	}
}

/// Argument of a binding attribute, as written.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum RawValue {
	Int(i128),
	/// Anything that is not an integer literal, kept as source text.
	Other(String),
}

impl RawValue {
	/// Validates the value as a [`ViewId`], returning the reason on failure.
	pub fn view_id(&self) -> Result<ViewId, String> {
		match self {
			RawValue::Int(value) if *value < 0 => {
				Err(format!("identifier {value} is negative"))
			}
			RawValue::Int(value) => ViewId::try_from(*value)
				.map_err(|_| format!("identifier {value} exceeds {}", ViewId::MAX)),
			RawValue::Other(text) => Err(format!(
				"identifier `{text}` is not an integer literal"
			)),
		}
	}
}

impl From<ViewId> for RawValue {
	fn from(value: ViewId) -> Self {
		RawValue::Int(i128::from(value))
	}
}

/// One sighting of the binding attribute.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct AnnotatedMember {
	/// Field name, or its index for tuple structs.
	pub member: String,
	/// `None` when the attribute is not placed on a struct field.
	pub owner: Option<OwnerRef>,
	/// `None` when the attribute carries no argument.
	pub value: Option<RawValue>,
	pub location: Location,
}
