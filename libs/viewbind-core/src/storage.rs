use ahash::{HashMap, HashMapExt};
use std::borrow::Borrow;
use std::fmt::Debug;
use std::hash::Hash;

/// Keyed storage that remembers insertion order.
///
/// Lookups go through a hash map, iteration walks the values in the order their
/// keys were first inserted. Generated output depends on that order, so nothing
/// in here may reorder values.
pub struct Storage<K: Hash + Eq + Debug, V> {
	lookup: HashMap<K, usize>,
	values: Vec<V>,
}

impl<K: Hash + Eq + Debug, V> Storage<K, V> {
	pub fn new() -> Storage<K, V> {
		Storage {
			lookup: HashMap::new(),
			values: vec![],
		}
	}

	/// Inserts a value, replacing the previous one in place if the key already exists.
	pub fn insert(&mut self, key: K, value: V) -> usize {
		match self.lookup.get(&key) {
			Some(&idx) => {
				self.values[idx] = value;
				idx
			}
			None => {
				let idx = self.values.len();
				self.lookup.insert(key, idx);
				self.values.push(value);
				idx
			}
		}
	}

	/// Returns the value for `key`, creating it with `func` when absent.
	pub fn get_or_insert_with(&mut self, key: K, func: impl FnOnce(&K) -> V) -> &mut V {
		let idx = match self.lookup.get(&key) {
			Some(&idx) => idx,
			None => {
				let idx = self.values.len();
				self.values.push(func(&key));
				self.lookup.insert(key, idx);
				idx
			}
		};

		&mut self.values[idx]
	}

	pub fn contains<Q: ?Sized>(&self, key: &Q) -> bool
	where
		K: Borrow<Q>,
		Q: Hash + Eq,
	{
		self.lookup.contains_key(key)
	}

	pub fn get_keyed<Q: ?Sized>(&self, key: &Q) -> Option<&V>
	where
		K: Borrow<Q>,
		Q: Hash + Eq,
	{
		let idx = *self.lookup.get(key)?;
		Some(&self.values[idx])
	}

	pub fn get_mut_keyed<Q: ?Sized>(&mut self, key: &Q) -> Option<&mut V>
	where
		K: Borrow<Q>,
		Q: Hash + Eq,
	{
		let idx = *self.lookup.get(key)?;
		Some(&mut self.values[idx])
	}

	pub fn iter(&self) -> &[V] {
		self.values.as_slice()
	}

	pub fn len(&self) -> usize {
		self.values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	pub fn into_values(self) -> Vec<V> {
		self.values
	}
}

impl<K: Hash + Eq + Debug, V> Default for Storage<K, V> {
	fn default() -> Self {
		Self::new()
	}
}

impl<'a, K: Hash + Eq + Debug, V> IntoIterator for &'a Storage<K, V> {
	type Item = &'a V;
	type IntoIter = std::slice::Iter<'a, V>;

	fn into_iter(self) -> Self::IntoIter {
		self.values.iter()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn keeps_first_insertion_order() {
		let mut storage = Storage::new();
		storage.insert("b", 1);
		storage.insert("a", 2);
		storage.insert("c", 3);
		storage.insert("a", 4);

		assert_eq!(storage.iter(), &[1, 4, 3]);
		assert_eq!(storage.get_keyed("a"), Some(&4));
		assert_eq!(storage.len(), 3);
	}

	#[test]
	fn get_or_insert_only_creates_once() {
		let mut storage: Storage<String, Vec<u32>> = Storage::new();
		storage.get_or_insert_with("x".to_string(), |_| vec![]).push(1);
		storage.get_or_insert_with("y".to_string(), |_| vec![]).push(2);
		storage
			.get_or_insert_with("x".to_string(), |_| panic!("already present"))
			.push(3);

		assert_eq!(storage.iter(), &[vec![1u32, 3], vec![2u32]]);
		assert!(storage.contains("y"));
		assert!(!storage.contains("z"));
	}
}
