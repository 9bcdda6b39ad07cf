//! Builders and the shared registration pipeline.
//!
//! # Mental Model
//!
//! 1. **Configure:** a builder accumulates settings transforms, data payloads
//!    and on-register hooks. Nothing is constructed and nothing is registered.
//! 2. **Register:** [`Builder::register`] consumes the builder. The concrete
//!    builder supplies its constructor ([`Builder::into_parts`]), the shared
//!    [`BuilderCore`] hands a type-erased [`BuilderSpec`] to the
//!    [`BuilderCallback`], wraps the returned delegate in the builder's entry
//!    type and queues the hooks on the delegate.
//! 3. **Resolve:** the external registry constructs the object during its own
//!    phase and runs the queued hooks, in the order they were added, against
//!    that object.
//!
//! Construction is deferred twice, so the order objects are built in follows
//! the registry's phase order and not the order builder chains appear in.
//!
//! Consuming `self` in `register` makes registering one builder twice
//! unrepresentable; registering the same name twice by other routes fails
//! with [`RegistrateError::AlreadyRegistered`].

mod block;
mod block_entity;
mod item;
mod no_config;
mod settings;

use std::any::type_name;
use std::sync::Arc;

pub use block::BlockBuilder;
pub use block_entity::BlockEntityBuilder;
pub use item::ItemBuilder;
pub use no_config::NoConfigBuilder;

use crate::core::{Environment, ErasedObject, HookError, Identifier, Kind, RegistrateError, TypeTag};
use crate::data::{DataPayload, DataSet, ProviderType};
use crate::entry::{EntryType, ObjectSupplier, RegistryEntry};
use crate::registrate::Registrate;
use crate::registry::{DelegateHandle, ErasedFactory, RegistryObject};

/// Side effect run once against the constructed object.
pub type Hook<T> = Box<dyn FnOnce(&Arc<T>, &Environment) -> Result<(), HookError> + Send>;

/// Constructor produced by a concrete builder; may run again if it failed.
pub type Creator<T> = Box<dyn FnMut() -> Result<T, RegistrateError> + Send>;

/// Everything the callback needs to register one object.
pub struct BuilderSpec {
	pub kind: Kind,
	pub id: Identifier,
	pub tag: TypeTag,
	pub factory: ErasedFactory,
	pub data: DataSet,
}

/// Performs the actual registration on behalf of a builder.
///
/// Implementations must not run `spec.factory`; construction belongs to the
/// registry's phase.
pub trait BuilderCallback: Send + Sync {
	fn accept(&self, spec: BuilderSpec) -> Result<DelegateHandle, RegistrateError>;
}

/// Pipeline state shared by every builder.
pub struct BuilderCore<T, P> {
	owner: Registrate,
	parent: P,
	id: Identifier,
	kind: Kind,
	callback: Arc<dyn BuilderCallback>,
	hooks: Vec<Hook<T>>,
	data: DataSet,
}

impl<T: Send + Sync + 'static, P> BuilderCore<T, P> {
	pub fn new(owner: Registrate, parent: P, id: Identifier, kind: Kind, callback: Arc<dyn BuilderCallback>) -> Self {
		Self {
			owner,
			parent,
			id,
			kind,
			callback,
			hooks: Vec::new(),
			data: DataSet::default(),
		}
	}

	pub fn owner(&self) -> &Registrate {
		&self.owner
	}

	pub fn parent(&self) -> &P {
		&self.parent
	}

	pub fn id(&self) -> &Identifier {
		&self.id
	}

	pub fn kind(&self) -> Kind {
		self.kind
	}

	pub fn add_hook(&mut self, hook: Hook<T>) {
		self.hooks.push(hook);
	}

	pub fn hook_count(&self) -> usize {
		self.hooks.len()
	}

	pub fn set_data(&mut self, provider: ProviderType, payload: DataPayload) {
		self.data.set(provider, payload);
	}

	pub fn remove_data(&mut self, provider: ProviderType) {
		self.data.remove(provider);
	}

	pub fn data(&self) -> &DataSet {
		&self.data
	}

	/// Lazily resolving reference to the object this builder will produce.
	pub fn supplier(&self) -> ObjectSupplier<T> {
		ObjectSupplier::new(self.owner.clone(), self.kind, self.id.clone())
	}

	/// Hands the object to the callback and wraps the returned delegate as `E`.
	///
	/// Hooks are queued on the delegate and run when the registry constructs
	/// the object. The first failing hook aborts the remaining ones.
	pub fn register<E: EntryType<T>>(self, mut create: Creator<T>) -> Result<(E, P), RegistrateError> {
		let Self {
			owner,
			parent,
			id,
			kind,
			callback,
			hooks,
			data,
		} = self;

		let factory: ErasedFactory = Box::new(move || create().map(|object| Arc::new(object) as ErasedObject));
		let handle = callback.accept(BuilderSpec {
			kind,
			id: id.clone(),
			tag: TypeTag::of::<T>(),
			factory,
			data,
		})?;

		let entry = RegistryEntry::new(owner, RegistryObject::<T>::new(handle.clone())?).cast::<E>()?;

		if !hooks.is_empty() {
			let count = hooks.len();
			handle.on_resolved(Box::new(move |object: &ErasedObject, env: &Environment| {
				run_hooks(kind, &id, hooks, object, env)
			}));
			tracing::trace!(%kind, id = %handle.id(), count, "queued on-register hooks");
		}

		Ok((entry, parent))
	}
}

fn run_hooks<T: Send + Sync + 'static>(
	kind: Kind,
	id: &Identifier,
	hooks: Vec<Hook<T>>,
	object: &ErasedObject,
	env: &Environment,
) -> Result<(), RegistrateError> {
	let object = object.clone().downcast::<T>().map_err(|_| RegistrateError::TypeMismatch {
		id: id.clone(),
		expected: type_name::<T>().to_string(),
		found: "a different registry object".to_string(),
	})?;
	for (index, hook) in hooks.into_iter().enumerate() {
		tracing::trace!(%kind, %id, index, "running on-register hook");
		hook(&object, env).map_err(|source| RegistrateError::Hook {
			kind,
			id: id.clone(),
			source,
		})?;
	}
	Ok(())
}

/// Fluent surface shared by all builders.
pub trait Builder: Sized {
	type Object: Send + Sync + 'static;
	type Parent;
	type Entry: EntryType<Self::Object>;

	fn core(&self) -> &BuilderCore<Self::Object, Self::Parent>;

	fn core_mut(&mut self) -> &mut BuilderCore<Self::Object, Self::Parent>;

	/// Splits the builder into its pipeline state and its constructor.
	fn into_parts(self) -> (BuilderCore<Self::Object, Self::Parent>, Creator<Self::Object>);

	/// Registers the object and returns its entry.
	///
	/// Nothing is constructed yet: the object is built and its on-register
	/// hooks run when the registry runs the phase for its kind.
	fn register(self) -> Result<Self::Entry, RegistrateError> {
		self.register_with_parent().map(|(entry, _)| entry)
	}

	/// Registers the object and returns the parent, for chaining back to it.
	fn build(self) -> Result<Self::Parent, RegistrateError> {
		self.register_with_parent().map(|(_, parent)| parent)
	}

	fn register_with_parent(self) -> Result<(Self::Entry, Self::Parent), RegistrateError> {
		let (core, create) = self.into_parts();
		core.register(create)
	}

	/// Adds a hook run with the constructed object, after any hooks added before it.
	fn on_register<F>(mut self, hook: F) -> Self
	where
		F: FnOnce(&Arc<Self::Object>, &Environment) -> Result<(), HookError> + Send + 'static,
	{
		self.core_mut().add_hook(Box::new(hook));
		self
	}

	/// Sets the English display name.
	fn lang(mut self, name: impl Into<String>) -> Self {
		self.core_mut().set_data(ProviderType::Lang, DataPayload::Lang(name.into()));
		self
	}

	/// Drops any display name set so far.
	fn no_lang(mut self) -> Self {
		self.core_mut().remove_data(ProviderType::Lang);
		self
	}

	fn id(&self) -> &Identifier {
		self.core().id()
	}

	fn name(&self) -> &str {
		self.core().id().path()
	}

	fn owner(&self) -> &Registrate {
		self.core().owner()
	}

	fn parent(&self) -> &Self::Parent {
		self.core().parent()
	}

	fn supplier(&self) -> ObjectSupplier<Self::Object> {
		self.core().supplier()
	}
}
