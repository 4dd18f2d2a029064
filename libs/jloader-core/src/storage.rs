use ahash::{HashMap, HashMapExt};
use num_traits::{NumCast, PrimInt, ToPrimitive};
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::hash_map::Entry;
use std::fmt::{Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// An append-only table of values addressable by key or by [`Id`].
///
/// Values are never replaced once inserted.
pub struct Storage<K: Hash + Eq + Debug, V: StorageValue> {
	lookup: HashMap<K, Id<V>>,
	values: Vec<V>,
}

impl<K: Hash + Eq + Debug, V: StorageValue> Storage<K, V> {
	pub fn new() -> Storage<K, V> {
		Storage {
			lookup: HashMap::new(),
			values: vec![],
		}
	}

	/// Inserts `value` under `key` unless the key is taken or the id type
	/// has run out of room. Either way the table is left untouched.
	pub fn try_insert(
		&mut self,
		key: K,
		value: impl FnOnce(Id<V>) -> V,
	) -> Result<Id<V>, InsertError<V>> {
		match self.lookup.entry(key) {
			Entry::Occupied(entry) => Err(InsertError::Occupied(*entry.get())),
			Entry::Vacant(entry) => {
				let id = Id::new(self.values.len() + 1).ok_or(InsertError::Exhausted)?;
				entry.insert(id);
				self.values.push(value(id));
				Ok(id)
			}
		}
	}

	pub fn contains(&self, key: &K) -> bool {
		self.lookup.contains_key(key)
	}

	pub fn get_id<Q: ?Sized>(&self, key: &Q) -> Option<Id<V>>
	where
		K: Borrow<Q>,
		Q: Hash + Eq,
	{
		self.lookup.get(key).copied()
	}

	pub fn get_keyed<Q: ?Sized>(&self, key: &Q) -> Option<&V>
	where
		K: Borrow<Q>,
		Q: Hash + Eq,
	{
		let id = self.get_id(key)?;
		self.get(id)
	}

	pub fn get(&self, id: Id<V>) -> Option<&V> {
		self.values.get(id.0.to_usize()?.checked_sub(1)?)
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
}

impl<K: Hash + Eq + Debug, V: StorageValue> Default for Storage<K, V> {
	fn default() -> Self {
		Storage::new()
	}
}

/// Why [`Storage::try_insert`] refused a value.
pub enum InsertError<V: StorageValue> {
	/// The key already maps to this id.
	Occupied(Id<V>),
	/// Every id of `V::Idx` is in use.
	Exhausted,
}

impl<V: StorageValue> Debug for InsertError<V> {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			InsertError::Occupied(id) => f.debug_tuple("Occupied").field(id).finish(),
			InsertError::Exhausted => f.write_str("Exhausted"),
		}
	}
}

/// A one based index into a [`Storage`].
pub struct Id<V: StorageValue>(V::Idx);

impl<V: StorageValue> Id<V> {
	fn new(idx: usize) -> Option<Id<V>> {
		<V::Idx as NumCast>::from(idx).map(Id)
	}

	pub fn idx(&self) -> V::Idx {
		self.0
	}
}

impl<V: StorageValue> Clone for Id<V> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<V: StorageValue> Copy for Id<V> {}

impl<V: StorageValue> Debug for Id<V> {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "Id<{}>", self.0)
	}
}

impl<V: StorageValue> PartialEq for Id<V> {
	fn eq(&self, other: &Self) -> bool {
		self.0.eq(&other.0)
	}
}

impl<V: StorageValue> Eq for Id<V> {}

impl<V: StorageValue> PartialOrd for Id<V> {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl<V: StorageValue> Ord for Id<V> {
	fn cmp(&self, other: &Self) -> Ordering {
		self.0.cmp(&other.0)
	}
}

impl<V: StorageValue> Hash for Id<V> {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.0.hash(state)
	}
}

pub trait StorageValue {
	type Idx: PrimInt + Hash + Display;
}

impl<V: StorageValue> StorageValue for Arc<V> {
	type Idx = V::Idx;
}

#[cfg(test)]
mod tests {
	use super::*;

	struct Named(&'static str);

	impl StorageValue for Named {
		type Idx = u8;
	}

	#[test]
	fn insert_is_once_per_key() {
		let mut storage: Storage<&str, Named> = Storage::new();
		let first = storage.try_insert("a", |_| Named("first")).unwrap();
		let second = storage.try_insert("a", |_| Named("second"));

		assert!(matches!(second, Err(InsertError::Occupied(id)) if id == first));
		assert_eq!(storage.len(), 1);
		assert_eq!(storage.get(first).unwrap().0, "first");
		assert_eq!(storage.get_keyed("a").unwrap().0, "first");
	}

	#[test]
	fn ids_are_sequential() {
		let mut storage: Storage<u32, Named> = Storage::new();
		let a = storage.try_insert(1, |_| Named("a")).unwrap();
		let b = storage.try_insert(2, |_| Named("b")).unwrap();
		assert!(a < b);
		assert_eq!(b.idx(), 2);
		assert!(storage.contains(&2));
		assert_eq!(storage.get_id(&3), None);
	}

	#[test]
	fn full_table_refuses_new_keys() {
		let mut storage: Storage<u32, Named> = Storage::new();
		for key in 0..u8::MAX as u32 {
			storage.try_insert(key, |_| Named("value")).unwrap();
		}
		assert_eq!(storage.len(), 255);

		let error = storage.try_insert(1000, |_| Named("overflow"));
		assert!(matches!(error, Err(InsertError::Exhausted)));
		assert!(!storage.contains(&1000));
		assert_eq!(storage.len(), 255);

		// Existing keys still report their id.
		let again = storage.try_insert(0, |_| Named("again"));
		assert!(matches!(again, Err(InsertError::Occupied(_))));
	}
}
