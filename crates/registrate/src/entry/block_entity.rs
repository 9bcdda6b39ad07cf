use std::ops::Deref;
use std::sync::Arc;

use super::{EntryType, RegistryEntry};
use crate::core::{Kind, RegistrateError};
use crate::objects::BlockEntityType;

/// Entry for a block entity type.
pub struct BlockEntityEntry<E>(RegistryEntry<BlockEntityType<E>>);

impl<E: 'static> BlockEntityEntry<E> {
	pub fn instantiate(&self) -> Result<E, RegistrateError> {
		Ok(self.get()?.instantiate())
	}

	/// Whether `block` is a valid host; false while unresolved.
	pub fn supports<B: ?Sized>(&self, block: &Arc<B>) -> bool {
		self.get().is_ok_and(|ty| ty.supports(block))
	}
}

impl<E: 'static> EntryType<BlockEntityType<E>> for BlockEntityEntry<E> {
	fn accepts(kind: Kind) -> bool {
		kind == Kind::BlockEntity
	}

	fn describe() -> &'static str {
		"block entity entry"
	}

	fn wrap(entry: RegistryEntry<BlockEntityType<E>>) -> Self {
		Self(entry)
	}

	fn entry(&self) -> &RegistryEntry<BlockEntityType<E>> {
		&self.0
	}
}

impl<E> Deref for BlockEntityEntry<E> {
	type Target = RegistryEntry<BlockEntityType<E>>;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl<E> Clone for BlockEntityEntry<E> {
	fn clone(&self) -> Self {
		Self(self.0.clone())
	}
}

impl<E> std::fmt::Debug for BlockEntityEntry<E> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_tuple("BlockEntityEntry").field(&self.0).finish()
	}
}
