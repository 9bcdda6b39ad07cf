use std::ops::Deref;
use std::sync::Arc;

use super::{EntryType, RegistryEntry};
use crate::core::{Identifier, Kind, RegistrateError};
use crate::objects::ItemStack;
use crate::registrate::Registrate;

/// Entry for an item.
pub struct ItemEntry<T>(RegistryEntry<T>);

impl<T: Send + Sync + 'static> ItemEntry<T> {
	pub fn as_stack(&self, count: u32) -> Result<ItemStack, RegistrateError> {
		stack_of(self.owner(), self.id(), count)
	}

	pub fn is_in(&self, stack: &ItemStack) -> bool {
		holds(self.owner(), self.id(), stack)
	}
}

/// Builds a stack of the item registered as `id`.
pub(super) fn stack_of(owner: &Registrate, id: &Identifier, count: u32) -> Result<ItemStack, RegistrateError> {
	let item = owner.handle(Kind::Item, id)?.object()?.clone();
	Ok(ItemStack::new(id.clone(), item, count))
}

/// Whether `stack` holds the item registered as `id`.
pub(super) fn holds(owner: &Registrate, id: &Identifier, stack: &ItemStack) -> bool {
	stack.id() == id
		&& owner
			.handle(Kind::Item, id)
			.ok()
			.and_then(|handle| handle.object().ok().cloned())
			.is_some_and(|item| Arc::ptr_eq(&item, stack.item()))
}

impl<T: Send + Sync + 'static> EntryType<T> for ItemEntry<T> {
	fn accepts(kind: Kind) -> bool {
		kind == Kind::Item
	}

	fn describe() -> &'static str {
		"item entry"
	}

	fn wrap(entry: RegistryEntry<T>) -> Self {
		Self(entry)
	}

	fn entry(&self) -> &RegistryEntry<T> {
		&self.0
	}
}

impl<T> Deref for ItemEntry<T> {
	type Target = RegistryEntry<T>;

	fn deref(&self) -> &RegistryEntry<T> {
		&self.0
	}
}

impl<T> Clone for ItemEntry<T> {
	fn clone(&self) -> Self {
		Self(self.0.clone())
	}
}

impl<T> std::fmt::Debug for ItemEntry<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_tuple("ItemEntry").field(&self.0).finish()
	}
}
