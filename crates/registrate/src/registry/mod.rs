//! External registry boundary.
//!
//! # Role
//!
//! A [`DeferredRegistry`] accepts a name plus a factory thunk and hands back a
//! [`DelegateHandle`]. Nothing is constructed at that point: the registry's own
//! phase resolves handles later, in the order the registry requires.
//!
//! # Invariants
//!
//! - A handle's factory succeeds at most once; the object is shared afterwards.
//! - Reading a handle before its phase ran fails with [`RegistrateError::Unresolved`].
//! - Resolution listeners run once, in insertion order, right after construction.

mod memory;

use std::any::type_name;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

pub use memory::ObjectRegistry;
use parking_lot::Mutex;

use crate::core::{Environment, ErasedObject, Identifier, Kind, LazyValue, RegistrateError, TypeTag};

/// Deferred constructor handed to the registry.
pub type ErasedFactory = Box<dyn FnMut() -> Result<ErasedObject, RegistrateError> + Send>;

/// Callback run against a freshly constructed object.
pub type Listener = Box<dyn FnOnce(&ErasedObject, &Environment) -> Result<(), RegistrateError> + Send>;

/// Registry that constructs objects in its own phase.
pub trait DeferredRegistry: Send + Sync {
	/// Records `id` under `kind` without constructing it.
	fn register(
		&self,
		kind: Kind,
		id: Identifier,
		tag: TypeTag,
		factory: ErasedFactory,
	) -> Result<DelegateHandle, RegistrateError>;

	/// Returns the handle registered for `id`, resolved or not.
	fn lookup(&self, kind: Kind, id: &Identifier) -> Option<DelegateHandle>;
}

struct Slot {
	kind: Kind,
	id: Identifier,
	tag: TypeTag,
	value: LazyValue<ErasedObject, RegistrateError>,
	listeners: Mutex<Vec<Listener>>,
}

/// Shared, untyped handle to one registry slot.
#[derive(Clone)]
pub struct DelegateHandle {
	slot: Arc<Slot>,
}

impl DelegateHandle {
	pub fn new(kind: Kind, id: Identifier, tag: TypeTag, factory: ErasedFactory) -> Self {
		Self {
			slot: Arc::new(Slot {
				kind,
				id,
				tag,
				value: LazyValue::fallible(factory),
				listeners: Mutex::new(Vec::new()),
			}),
		}
	}

	pub fn kind(&self) -> Kind {
		self.slot.kind
	}

	pub fn id(&self) -> &Identifier {
		&self.slot.id
	}

	/// Declared type of the object this slot will hold.
	pub fn tag(&self) -> TypeTag {
		self.slot.tag
	}

	pub fn is_resolved(&self) -> bool {
		self.slot.value.is_resolved()
	}

	/// Returns the constructed object, failing if the phase has not produced it.
	pub fn object(&self) -> Result<&ErasedObject, RegistrateError> {
		self.slot.value.peek().ok_or_else(|| RegistrateError::Unresolved {
			kind: self.slot.kind,
			id: self.slot.id.clone(),
		})
	}

	/// Queues a listener for construction time.
	///
	/// Listeners added after the handle resolved are never invoked.
	pub fn on_resolved(&self, listener: Listener) {
		self.slot.listeners.lock().push(listener);
	}

	/// Constructs the object if needed and drains the listeners.
	///
	/// Called by registry implementations during their phase. A failing
	/// factory leaves the slot unresolved; a failing listener stops the
	/// remaining listeners of this run.
	pub fn resolve(&self, env: &Environment) -> Result<&ErasedObject, RegistrateError> {
		if let Some(object) = self.slot.value.peek() {
			return Ok(object);
		}
		let object = self.slot.value.try_get()?;
		tracing::debug!(kind = %self.slot.kind, id = %self.slot.id, "constructed registry object");
		let listeners = std::mem::take(&mut *self.slot.listeners.lock());
		for listener in listeners {
			listener(object, env)?;
		}
		Ok(object)
	}

	pub fn ptr_eq(&self, other: &DelegateHandle) -> bool {
		Arc::ptr_eq(&self.slot, &other.slot)
	}
}

impl fmt::Debug for DelegateHandle {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("DelegateHandle")
			.field("kind", &self.slot.kind)
			.field("id", &self.slot.id)
			.field("type", &self.slot.tag.name())
			.field("resolved", &self.is_resolved())
			.finish()
	}
}

/// Typed view over a [`DelegateHandle`] whose declared type is `T`.
pub struct RegistryObject<T> {
	handle: DelegateHandle,
	_marker: PhantomData<fn() -> T>,
}

impl<T> Clone for RegistryObject<T> {
	fn clone(&self) -> Self {
		Self {
			handle: self.handle.clone(),
			_marker: PhantomData,
		}
	}
}

impl<T> RegistryObject<T> {
	pub fn handle(&self) -> &DelegateHandle {
		&self.handle
	}
}

impl<T: Send + Sync + 'static> RegistryObject<T> {
	/// Checks the handle's declared type against `T`.
	pub fn new(handle: DelegateHandle) -> Result<Self, RegistrateError> {
		if !handle.tag().is::<T>() {
			return Err(RegistrateError::TypeMismatch {
				id: handle.id().clone(),
				expected: type_name::<T>().to_string(),
				found: handle.tag().name().to_string(),
			});
		}
		Ok(Self {
			handle,
			_marker: PhantomData,
		})
	}

	pub fn get(&self) -> Result<Arc<T>, RegistrateError> {
		let object = self.handle.object()?.clone();
		object.downcast::<T>().map_err(|_| RegistrateError::TypeMismatch {
			id: self.handle.id().clone(),
			expected: type_name::<T>().to_string(),
			found: self.handle.tag().name().to_string(),
		})
	}
}

impl<T> fmt::Debug for RegistryObject<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("RegistryObject").field(&self.handle).finish()
	}
}
