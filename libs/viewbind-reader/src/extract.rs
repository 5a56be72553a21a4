use crate::{AnnotatedMember, ExtractError};
use ahash::AHashSet;
use tracing::debug;
use viewbind_core::{join, ViewId};

/// A validated `(owner, member, identifier)` triple.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct BindingRecord {
	pub owner_qualified_name: String,
	pub owner_simple_name: String,
	pub namespace: String,
	pub member_name: String,
	pub identifier: ViewId,
	/// `cfg` predicates the owner only exists under.
	pub cfg: Vec<String>,
}

impl BindingRecord {
	pub fn new(namespace: &str, owner: &str, member: &str, identifier: ViewId) -> BindingRecord {
		BindingRecord {
			owner_qualified_name: join(namespace, owner),
			owner_simple_name: owner.to_string(),
			namespace: namespace.to_string(),
			member_name: member.to_string(),
			identifier,
			cfg: vec![],
		}
	}
}

/// What to do when one field carries the binding attribute more than once.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub enum DuplicatePolicy {
	/// Fail the pass with [`ExtractError::MalformedMetadata`].
	#[default]
	Reject,
	/// Keep every record. The generated binder assigns the field once per record.
	Allow,
}

/// Normalizes raw attribute sightings into binding records.
///
/// Any malformed sighting fails the whole pass; nothing is skipped silently.
pub fn extract(
	members: impl IntoIterator<Item = AnnotatedMember>,
	duplicates: DuplicatePolicy,
) -> Result<Vec<BindingRecord>, ExtractError> {
	let mut seen = AHashSet::new();
	let mut records = Vec::new();

	for member in members {
		let malformed = |reason: String| ExtractError::MalformedMetadata {
			location: member.location.clone(),
			member: member.member.clone(),
			reason,
		};

		let Some(owner) = &member.owner else {
			return Err(malformed(
				"attribute is not on a field of a module-level struct".to_string(),
			));
		};
		if owner.generic {
			return Err(malformed(format!(
				"owner `{}` has generic parameters",
				owner.qualified_name()
			)));
		}

		if let Some(hidden) = &owner.hidden {
			return Err(malformed(format!(
				"owner `{}` can not be named from the crate root, `{hidden}` is private",
				owner.qualified_name()
			)));
		}

		let identifier = match &member.value {
			None => return Err(malformed("attribute has no identifier".to_string())),
			Some(value) => value.view_id().map_err(&malformed)?,
		};

		let mut record = BindingRecord::new(
			&owner.namespace,
			&owner.simple_name,
			&member.member,
			identifier,
		);
		record.cfg = owner.cfg.clone();

		let key = (record.owner_qualified_name.clone(), record.member_name.clone());
		if !seen.insert(key) && duplicates == DuplicatePolicy::Reject {
			return Err(malformed(format!(
				"`{}.{}` is bound more than once",
				record.owner_qualified_name, record.member_name
			)));
		}

		debug!(
			"{}.{} -> {}",
			record.owner_qualified_name, record.member_name, record.identifier
		);
		records.push(record);
	}

	Ok(records)
}
