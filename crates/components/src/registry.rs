//! Insertion-ordered, uniquely keyed component storage.
//!
//! # Invariants
//!
//! - Must reject a second entry for an id that is already present.
//!   - Enforced in: [`ComponentRegistry::insert`].
//!   - Failure symptom: two components answer to the same id in config.
//!
//! - Must preserve insertion order across removals.
//!   - Enforced in: [`ComponentRegistry::remove`] (shifting removal).
//!   - Failure symptom: enumeration order depends on which entries were removed.
//!
//! - Must never reorder on read.

use harbor_model::ComponentId;
use indexmap::IndexMap;
use indexmap::map::Values;

use crate::capability::CapabilitySet;
use crate::component::{Component, Servlet};
use crate::error::RegistryError;

/// Trait for values a [`ComponentRegistry`] can key and filter.
pub trait RegistryEntry {
	/// Returns the identity the entry is registered under by default.
	fn id(&self) -> &ComponentId;

	/// Returns the capabilities used by [`ComponentRegistry::enumerate`].
	fn capabilities(&self) -> CapabilitySet {
		CapabilitySet::empty()
	}
}

impl RegistryEntry for Component {
	fn id(&self) -> &ComponentId {
		Component::id(self)
	}

	fn capabilities(&self) -> CapabilitySet {
		Component::capabilities(self)
	}
}

impl RegistryEntry for Servlet {
	fn id(&self) -> &ComponentId {
		self.global_id()
	}

	fn capabilities(&self) -> CapabilitySet {
		CapabilitySet::SERVLET
	}
}

#[derive(Debug, Clone)]
struct Slot<T> {
	/// Stable ingest ordinal, never reused after removal.
	ordinal: u32,
	value: T,
}

/// An ordered map of id → entry, scoped under one owner.
#[derive(Debug, Clone)]
pub struct ComponentRegistry<T> {
	label: &'static str,
	entries: IndexMap<ComponentId, Slot<T>>,
	next_ordinal: u32,
}

impl<T> ComponentRegistry<T> {
	/// Creates an empty registry. `label` names it in error messages.
	pub fn new(label: &'static str) -> Self {
		Self {
			label,
			entries: IndexMap::new(),
			next_ordinal: 0,
		}
	}

	pub fn label(&self) -> &'static str {
		self.label
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn contains(&self, id: &ComponentId) -> bool {
		self.entries.contains_key(id)
	}

	pub fn get(&self, id: &ComponentId) -> Option<&T> {
		self.entries.get(id).map(|slot| &slot.value)
	}

	/// Returns the ingest ordinal of `id`, if present.
	pub fn ordinal_of(&self, id: &ComponentId) -> Option<u32> {
		self.entries.get(id).map(|slot| slot.ordinal)
	}

	/// Registers `value` under an explicitly derived `id`.
	///
	/// Fails with [`RegistryError::DuplicateIdentity`] if `id` is taken; the
	/// registry is left unchanged in that case.
	pub fn insert(&mut self, id: ComponentId, value: T) -> Result<(), RegistryError> {
		if self.entries.contains_key(&id) {
			return Err(RegistryError::DuplicateIdentity {
				registry: self.label,
				id,
			});
		}
		let ordinal = self.next_ordinal;
		self.next_ordinal = self.next_ordinal.saturating_add(1);
		self.entries.insert(id, Slot { ordinal, value });
		Ok(())
	}

	/// Removes the entry for `id`, returning it. Absent ids are not an error.
	pub fn remove(&mut self, id: &ComponentId) -> Option<T> {
		self.entries.shift_remove(id).map(|slot| slot.value)
	}

	/// Iterates over entries in insertion order.
	pub fn values(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator + Clone {
		self.entries.values().map(|slot| &slot.value)
	}

	pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
		self.entries.values_mut().map(|slot| &mut slot.value)
	}

	/// Iterates over `(id, entry)` pairs in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (&ComponentId, &T)> {
		self.entries.iter().map(|(id, slot)| (id, &slot.value))
	}

	/// Returns every entry in insertion order.
	pub fn snapshot(&self) -> Vec<&T> {
		self.values().collect()
	}
}

impl<T: RegistryEntry> ComponentRegistry<T> {
	/// Registers `value` under its own id.
	pub fn add(&mut self, value: T) -> Result<(), RegistryError> {
		let id = value.id().clone();
		self.insert(id, value)
	}

	/// Lazily enumerates entries whose capabilities include every flag of
	/// `filter`, in insertion order. The empty filter matches every entry.
	///
	/// The returned iterator is cheap to clone, so the sequence can be restarted.
	pub fn enumerate(&self, filter: CapabilitySet) -> Enumerate<'_, T> {
		Enumerate {
			inner: self.entries.values(),
			filter,
		}
	}
}

/// Iterator returned by [`ComponentRegistry::enumerate`].
pub struct Enumerate<'a, T> {
	inner: Values<'a, ComponentId, Slot<T>>,
	filter: CapabilitySet,
}

impl<T> Clone for Enumerate<'_, T> {
	fn clone(&self) -> Self {
		Self {
			inner: self.inner.clone(),
			filter: self.filter,
		}
	}
}

impl<'a, T: RegistryEntry> Iterator for Enumerate<'a, T> {
	type Item = &'a T;

	fn next(&mut self) -> Option<Self::Item> {
		let filter = self.filter;
		self.inner
			.by_ref()
			.map(|slot| &slot.value)
			.find(|value| value.capabilities().contains(filter))
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		(0, self.inner.size_hint().1)
	}
}
