//! Typed, lazily resolved handles to registered objects.
//!
//! A [`RegistryEntry`] is returned by every builder's `register`. Entry
//! subtypes add accessors for one kind of object but carry no state of their
//! own, so [`RegistryEntry::cast`] is a rewrap of the same delegate.

mod block;
mod block_entity;
mod item;

use std::any::{Any, type_name};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

pub use block::BlockEntry;
pub use block_entity::BlockEntityEntry;
pub use item::ItemEntry;

use crate::core::{Identifier, Kind, RegistrateError};
use crate::registrate::Registrate;
use crate::registry::{DelegateHandle, RegistryObject};

/// An entry type that can wrap a [`RegistryEntry<T>`].
pub trait EntryType<T>: Sized {
	/// Whether delegates of `kind` may be viewed through this type.
	fn accepts(kind: Kind) -> bool;

	/// Human-readable name used in mismatch errors.
	fn describe() -> &'static str;

	fn wrap(entry: RegistryEntry<T>) -> Self;

	fn entry(&self) -> &RegistryEntry<T>;
}

/// Handle to an object that the owning registry constructs in its own phase.
pub struct RegistryEntry<T> {
	owner: Registrate,
	delegate: RegistryObject<T>,
}

impl<T: Send + Sync + 'static> RegistryEntry<T> {
	pub fn new(owner: Registrate, delegate: RegistryObject<T>) -> Self {
		Self { owner, delegate }
	}

	/// Returns the object, failing with [`RegistrateError::Unresolved`] before its phase ran.
	pub fn get(&self) -> Result<Arc<T>, RegistrateError> {
		self.delegate.get()
	}

	/// Registration name; available whether or not the object exists yet.
	pub fn id(&self) -> &Identifier {
		self.delegate.handle().id()
	}

	pub fn kind(&self) -> Kind {
		self.delegate.handle().kind()
	}

	pub fn owner(&self) -> &Registrate {
		&self.owner
	}

	pub fn delegate(&self) -> &RegistryObject<T> {
		&self.delegate
	}

	pub fn is_resolved(&self) -> bool {
		self.delegate.handle().is_resolved()
	}

	/// True iff the resolved object is `candidate` itself. Unresolved entries match nothing.
	pub fn is<U: ?Sized>(&self, candidate: &Arc<U>) -> bool {
		self.delegate
			.handle()
			.object()
			.is_ok_and(|object| std::ptr::addr_eq(Arc::as_ptr(object), Arc::as_ptr(candidate)))
	}

	/// True iff the resolved object's concrete type is `U`.
	pub fn is_type<U: Any>(&self) -> bool {
		self.delegate.handle().object().is_ok_and(|object| object.is::<U>())
	}

	pub fn is_kind(&self, kind: Kind) -> bool {
		self.kind() == kind
	}

	/// Translation key for this entry, e.g. `block.forge.anvil`.
	pub fn translation_key(&self) -> String {
		format!("{}.{}", self.kind().translation_prefix(), self.id().to_dotted())
	}

	/// Rewraps this entry as the subtype `E`, failing if `E` cannot hold this kind.
	pub fn cast<E: EntryType<T>>(self) -> Result<E, RegistrateError> {
		if !E::accepts(self.kind()) {
			return Err(RegistrateError::TypeMismatch {
				id: self.id().clone(),
				expected: E::describe().to_string(),
				found: format!("{} entry", self.kind()),
			});
		}
		Ok(E::wrap(self))
	}

	/// Re-types the entry, checked against the type declared at registration.
	pub fn retype<U: Send + Sync + 'static>(self) -> Result<RegistryEntry<U>, RegistrateError> {
		let delegate = RegistryObject::new(self.delegate.handle().clone())?;
		Ok(RegistryEntry {
			owner: self.owner,
			delegate,
		})
	}

	/// A lazily resolving reference to the same object.
	pub fn supplier(&self) -> ObjectSupplier<T> {
		ObjectSupplier::new(self.owner.clone(), self.kind(), self.id().clone())
	}
}

impl<T: Send + Sync + 'static> EntryType<T> for RegistryEntry<T> {
	fn accepts(_: Kind) -> bool {
		true
	}

	fn describe() -> &'static str {
		"registry entry"
	}

	fn wrap(entry: RegistryEntry<T>) -> Self {
		entry
	}

	fn entry(&self) -> &RegistryEntry<T> {
		self
	}
}

impl<T> Clone for RegistryEntry<T> {
	fn clone(&self) -> Self {
		Self {
			owner: self.owner.clone(),
			delegate: self.delegate.clone(),
		}
	}
}

impl<T> PartialEq for RegistryEntry<T> {
	fn eq(&self, other: &Self) -> bool {
		self.delegate.handle().ptr_eq(other.delegate.handle())
	}
}

impl<T> Eq for RegistryEntry<T> {}

impl<T> fmt::Debug for RegistryEntry<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let handle: &DelegateHandle = self.delegate.handle();
		f.debug_struct("RegistryEntry")
			.field("kind", &handle.kind())
			.field("id", handle.id())
			.field("resolved", &handle.is_resolved())
			.finish()
	}
}

/// Reference to a registered name that looks the object up on every access.
///
/// Used to wire companions (block items, block entity types) to an object
/// whose builder has not been registered yet.
pub struct ObjectSupplier<T> {
	owner: Registrate,
	kind: Kind,
	id: Identifier,
	_marker: PhantomData<fn() -> T>,
}

impl<T: Send + Sync + 'static> ObjectSupplier<T> {
	pub fn new(owner: Registrate, kind: Kind, id: Identifier) -> Self {
		Self {
			owner,
			kind,
			id,
			_marker: PhantomData,
		}
	}

	pub fn get(&self) -> Result<Arc<T>, RegistrateError> {
		self.owner.entry::<T>(self.kind, &self.id)?.get()
	}

	pub fn kind(&self) -> Kind {
		self.kind
	}

	pub fn id(&self) -> &Identifier {
		&self.id
	}
}

impl<T> Clone for ObjectSupplier<T> {
	fn clone(&self) -> Self {
		Self {
			owner: self.owner.clone(),
			kind: self.kind,
			id: self.id.clone(),
			_marker: PhantomData,
		}
	}
}

impl<T> fmt::Debug for ObjectSupplier<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ObjectSupplier")
			.field("kind", &self.kind)
			.field("id", &self.id)
			.field("type", &type_name::<T>())
			.finish()
	}
}
