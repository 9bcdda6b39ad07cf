use std::ops::Deref;
use std::sync::Arc;

use super::item::{holds, stack_of};
use super::{EntryType, ItemEntry, RegistryEntry};
use crate::core::{Kind, RegistrateError};
use crate::objects::{BlockLike, BlockSettings, ItemStack};

/// Entry for a block. Its item projection is the item registered under the same name.
pub struct BlockEntry<T>(RegistryEntry<T>);

impl<T: Send + Sync + 'static> BlockEntry<T> {
	/// Whether `block` is this entry's block.
	pub fn has(&self, block: &Arc<T>) -> bool {
		self.is(block)
	}

	/// The companion item registered under this block's name.
	pub fn item<I: Send + Sync + 'static>(&self) -> Result<ItemEntry<I>, RegistrateError> {
		self.owner().entry::<I>(Kind::Item, self.id())?.cast()
	}

	pub fn as_stack(&self, count: u32) -> Result<ItemStack, RegistrateError> {
		stack_of(self.owner(), self.id(), count)
	}

	pub fn is_in(&self, stack: &ItemStack) -> bool {
		holds(self.owner(), self.id(), stack)
	}
}

impl<T: BlockLike> BlockEntry<T> {
	/// Settings the block was constructed with.
	pub fn settings(&self) -> Result<BlockSettings, RegistrateError> {
		Ok(self.get()?.settings().clone())
	}
}

impl<T: Send + Sync + 'static> EntryType<T> for BlockEntry<T> {
	fn accepts(kind: Kind) -> bool {
		kind == Kind::Block
	}

	fn describe() -> &'static str {
		"block entry"
	}

	fn wrap(entry: RegistryEntry<T>) -> Self {
		Self(entry)
	}

	fn entry(&self) -> &RegistryEntry<T> {
		&self.0
	}
}

impl<T> Deref for BlockEntry<T> {
	type Target = RegistryEntry<T>;

	fn deref(&self) -> &RegistryEntry<T> {
		&self.0
	}
}

impl<T> Clone for BlockEntry<T> {
	fn clone(&self) -> Self {
		Self(self.0.clone())
	}
}

impl<T> std::fmt::Debug for BlockEntry<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_tuple("BlockEntry").field(&self.0).finish()
	}
}
