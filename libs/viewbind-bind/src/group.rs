use tracing::trace;
use viewbind_core::{Storage, TypePath, ViewId};
use viewbind_reader::BindingRecord;

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct MemberBinding {
	pub name: String,
	pub id: ViewId,
}

/// Every binding of one owner type, in the order the bindings were found.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct BindingGroup {
	pub owner_qualified_name: String,
	pub namespace: String,
	pub owner_simple_name: String,
	/// `cfg` predicates the owner only exists under.
	pub cfg: Vec<String>,
	pub members: Vec<MemberBinding>,
}

impl BindingGroup {
	fn new(record: &BindingRecord) -> BindingGroup {
		BindingGroup {
			owner_qualified_name: record.owner_qualified_name.clone(),
			namespace: record.namespace.clone(),
			owner_simple_name: record.owner_simple_name.clone(),
			cfg: record.cfg.clone(),
			members: vec![],
		}
	}

	pub fn owner(&self) -> TypePath {
		TypePath::new(self.namespace.clone(), self.owner_simple_name.clone())
	}

	/// The generated binder, declared next to the owner.
	pub fn binder(&self) -> TypePath {
		self.owner().binder()
	}
}

/// Binding groups keyed by owner, in first-seen order.
#[derive(Default)]
pub struct Groups {
	groups: Storage<String, BindingGroup>,
}

impl Groups {
	pub fn new() -> Groups {
		Groups {
			groups: Storage::new(),
		}
	}

	pub fn insert(&mut self, record: BindingRecord) {
		let group = self
			.groups
			.get_or_insert_with(record.owner_qualified_name.clone(), |_| {
				BindingGroup::new(&record)
			});

		// The owner's qualified name fixes these, so they are only taken from the first record.
		debug_assert_eq!(group.namespace, record.namespace);
		debug_assert_eq!(group.owner_simple_name, record.owner_simple_name);
		debug_assert_eq!(group.cfg, record.cfg);

		trace!(
			"{} += {} ({})",
			group.owner_qualified_name,
			record.member_name,
			record.identifier
		);
		group.members.push(MemberBinding {
			name: record.member_name,
			id: record.identifier,
		});
	}

	pub fn get(&self, owner_qualified_name: &str) -> Option<&BindingGroup> {
		self.groups.get_keyed(owner_qualified_name)
	}

	pub fn iter(&self) -> impl Iterator<Item = &BindingGroup> {
		self.groups.iter().iter()
	}

	pub fn len(&self) -> usize {
		self.groups.len()
	}

	pub fn is_empty(&self) -> bool {
		self.groups.is_empty()
	}

	/// Number of member bindings over all groups.
	pub fn member_count(&self) -> usize {
		self.iter().map(|group| group.members.len()).sum()
	}

	pub fn into_vec(self) -> Vec<BindingGroup> {
		self.groups.into_values()
	}
}

impl<'a> IntoIterator for &'a Groups {
	type Item = &'a BindingGroup;
	type IntoIter = std::slice::Iter<'a, BindingGroup>;

	fn into_iter(self) -> Self::IntoIter {
		self.groups.iter().iter()
	}
}

/// Partitions records by owner.
pub fn group(records: impl IntoIterator<Item = BindingRecord>) -> Groups {
	let mut groups = Groups::new();
	for record in records {
		groups.insert(record);
	}
	groups
}
