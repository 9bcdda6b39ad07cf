//! The owning registration context.
//!
//! # Role
//!
//! A [`Registrate`] hands out builders for one namespace, acts as their
//! [`BuilderCallback`], and keeps the bookkeeping the builders need after
//! registration: which names it registered and which data payloads were
//! attached to them.
//!
//! # Invariants
//!
//! - Every builder it creates has an identifier in its namespace.
//! - Data payloads are recorded only once the registry accepted the name.
//! - Lookups go through the registry, so entries registered by another
//!   context in the same registry resolve too.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::builders::{
	BlockBuilder, BlockEntityBuilder, BuilderCallback, BuilderCore, BuilderSpec, ItemBuilder, NoConfigBuilder,
};
use crate::config::RegistrateConfig;
use crate::core::{ClientRegistrar, Environment, HookError, Identifier, Kind, RegistrateError};
use crate::data::{DataContext, DataPayload, DataSink, ProviderType};
use crate::entry::RegistryEntry;
use crate::objects::{BlockEntityType, BlockSettings, ItemSettings, Material};
use crate::registry::{DeferredRegistry, DelegateHandle, RegistryObject};

struct DataRecord {
	kind: Kind,
	id: Identifier,
	provider: ProviderType,
	payload: DataPayload,
}

struct Inner {
	namespace: String,
	registry: Arc<dyn DeferredRegistry>,
	env: Environment,
	auto_lang: bool,
	entries: Mutex<Vec<(Kind, Identifier)>>,
	data: Mutex<Vec<DataRecord>>,
}

/// Cheaply cloneable handle to a registration context.
#[derive(Clone)]
pub struct Registrate {
	inner: Arc<Inner>,
}

impl Registrate {
	/// Creates a context for `namespace` that registers into `registry`.
	pub fn new(
		namespace: impl Into<String>,
		registry: Arc<dyn DeferredRegistry>,
		env: Environment,
	) -> Result<Self, RegistrateError> {
		Self::with_options(namespace.into(), registry, env, true)
	}

	/// Creates a context from a loaded [`RegistrateConfig`].
	///
	/// `client` is only consulted when the config enables the client side.
	pub fn from_config(
		config: &RegistrateConfig,
		registry: Arc<dyn DeferredRegistry>,
		client: Option<Arc<dyn ClientRegistrar>>,
	) -> Result<Self, RegistrateError> {
		let env = Environment::new(config.side_set(), client);
		Self::with_options(config.mod_id.clone(), registry, env, config.auto_lang)
	}

	fn with_options(
		namespace: String,
		registry: Arc<dyn DeferredRegistry>,
		env: Environment,
		auto_lang: bool,
	) -> Result<Self, RegistrateError> {
		Identifier::validate_namespace(&namespace)?;
		tracing::debug!(%namespace, ?env, auto_lang, "created registrate");
		Ok(Self {
			inner: Arc::new(Inner {
				namespace,
				registry,
				env,
				auto_lang,
				entries: Mutex::new(Vec::new()),
				data: Mutex::new(Vec::new()),
			}),
		})
	}

	pub fn namespace(&self) -> &str {
		&self.inner.namespace
	}

	pub fn env(&self) -> &Environment {
		&self.inner.env
	}

	pub fn registry(&self) -> &Arc<dyn DeferredRegistry> {
		&self.inner.registry
	}

	/// Identifier for `name` in this context's namespace.
	pub fn id(&self, name: &str) -> Result<Identifier, RegistrateError> {
		Identifier::new(self.namespace(), name)
	}

	/// Callback handed to every builder this context creates.
	pub fn callback(&self) -> Arc<dyn BuilderCallback> {
		Arc::new(self.clone())
	}

	/// Registry handle for `id`, resolved or not.
	pub fn handle(&self, kind: Kind, id: &Identifier) -> Result<DelegateHandle, RegistrateError> {
		self.inner
			.registry
			.lookup(kind, id)
			.ok_or_else(|| RegistrateError::UnknownEntry { kind, id: id.clone() })
	}

	/// Typed entry for `id`, checked against the type declared at registration.
	pub fn entry<T: Send + Sync + 'static>(
		&self,
		kind: Kind,
		id: &Identifier,
	) -> Result<RegistryEntry<T>, RegistrateError> {
		let delegate = RegistryObject::new(self.handle(kind, id)?)?;
		Ok(RegistryEntry::new(self.clone(), delegate))
	}

	/// Names this context registered under `kind`, in registration order.
	pub fn entries(&self, kind: Kind) -> Vec<Identifier> {
		self.inner
			.entries
			.lock()
			.iter()
			.filter(|(k, _)| *k == kind)
			.map(|(_, id)| id.clone())
			.collect()
	}

	/// Forwards every payload of `provider` to `sink`, paired with its resolved object.
	///
	/// Fails with [`RegistrateError::Unresolved`] if an object carrying such a
	/// payload has not been constructed yet. Returns the number of payloads sent.
	pub fn generate(&self, provider: ProviderType, sink: &mut dyn DataSink) -> Result<usize, RegistrateError> {
		let data = self.inner.data.lock();
		let mut sent = 0;
		for record in data.iter().filter(|record| record.provider == provider) {
			let handle = self.handle(record.kind, &record.id)?;
			sink.accept(DataContext {
				kind: record.kind,
				id: &record.id,
				payload: &record.payload,
				object: handle.object()?,
			});
			sent += 1;
		}
		tracing::debug!(?provider, sent, "generated data");
		Ok(sent)
	}

	fn core<T: Send + Sync + 'static, P>(
		&self,
		parent: P,
		id: Identifier,
		kind: Kind,
	) -> BuilderCore<T, P> {
		BuilderCore::new(self.clone(), parent, id, kind, self.callback())
	}

	/// Starts a block builder whose parent is this context.
	pub fn block<T: Send + Sync + 'static>(
		&self,
		name: &str,
		factory: impl Fn(BlockSettings) -> T + Send + Sync + 'static,
	) -> Result<BlockBuilder<T, Self>, RegistrateError> {
		self.block_with_parent(self.clone(), name, factory)
	}

	/// Starts a block builder that returns `parent` from [`crate::Builder::build`].
	///
	/// Initial settings default to [`Material::Stone`].
	pub fn block_with_parent<T: Send + Sync + 'static, P>(
		&self,
		parent: P,
		name: &str,
		factory: impl Fn(BlockSettings) -> T + Send + Sync + 'static,
	) -> Result<BlockBuilder<T, P>, RegistrateError> {
		let core = self.core(parent, self.id(name)?, Kind::Block);
		let builder = BlockBuilder::new(core, factory, || BlockSettings::of(Material::Stone));
		Ok(if self.inner.auto_lang {
			builder.default_lang()
		} else {
			builder
		})
	}

	pub fn item<T: Send + Sync + 'static>(
		&self,
		name: &str,
		factory: impl Fn(ItemSettings) -> T + Send + Sync + 'static,
	) -> Result<ItemBuilder<T, Self>, RegistrateError> {
		self.item_with_parent(self.clone(), name, factory)
	}

	pub fn item_with_parent<T: Send + Sync + 'static, P>(
		&self,
		parent: P,
		name: &str,
		factory: impl Fn(ItemSettings) -> T + Send + Sync + 'static,
	) -> Result<ItemBuilder<T, P>, RegistrateError> {
		let builder = self.item_for(parent, self.id(name)?, move |settings| Ok(factory(settings)));
		Ok(if self.inner.auto_lang {
			builder.default_lang()
		} else {
			builder
		})
	}

	/// Starts a companion item builder under an existing identifier.
	///
	/// No name is generated: a companion shares its primary's display name.
	pub fn item_for<T: Send + Sync + 'static, P>(
		&self,
		parent: P,
		id: Identifier,
		factory: impl Fn(ItemSettings) -> Result<T, RegistrateError> + Send + Sync + 'static,
	) -> ItemBuilder<T, P> {
		ItemBuilder::new(self.core(parent, id, Kind::Item), factory)
	}

	pub fn block_entity<E: 'static>(
		&self,
		name: &str,
		factory: impl Fn(&BlockEntityType<E>) -> E + Send + Sync + 'static,
	) -> Result<BlockEntityBuilder<E, Self>, RegistrateError> {
		self.block_entity_with_parent(self.clone(), name, factory)
	}

	pub fn block_entity_with_parent<E: 'static, P>(
		&self,
		parent: P,
		name: &str,
		factory: impl Fn(&BlockEntityType<E>) -> E + Send + Sync + 'static,
	) -> Result<BlockEntityBuilder<E, P>, RegistrateError> {
		Ok(self.block_entity_for(parent, self.id(name)?, factory))
	}

	/// Starts a companion block entity builder under an existing identifier.
	pub fn block_entity_for<E: 'static, P>(
		&self,
		parent: P,
		id: Identifier,
		factory: impl Fn(&BlockEntityType<E>) -> E + Send + Sync + 'static,
	) -> BlockEntityBuilder<E, P> {
		BlockEntityBuilder::new(self.core(parent, id, Kind::BlockEntity), factory)
	}

	/// Starts a factory-only builder for any kind, typically [`Kind::Custom`].
	pub fn object<T: Send + Sync + 'static>(
		&self,
		kind: Kind,
		name: &str,
		factory: impl FnMut() -> T + Send + 'static,
	) -> Result<NoConfigBuilder<T, Self>, RegistrateError> {
		let core = self.core(self.clone(), self.id(name)?, kind);
		Ok(NoConfigBuilder::new(core, factory))
	}

	/// Like [`Registrate::object`] for a factory that can fail.
	pub fn object_try<T: Send + Sync + 'static, E: Into<HookError>>(
		&self,
		kind: Kind,
		name: &str,
		factory: impl FnMut() -> Result<T, E> + Send + 'static,
	) -> Result<NoConfigBuilder<T, Self>, RegistrateError> {
		let core = self.core(self.clone(), self.id(name)?, kind);
		Ok(NoConfigBuilder::fallible(core, factory))
	}
}

impl BuilderCallback for Registrate {
	fn accept(&self, spec: BuilderSpec) -> Result<DelegateHandle, RegistrateError> {
		let BuilderSpec {
			kind,
			id,
			tag,
			factory,
			data,
		} = spec;
		let handle = self.inner.registry.register(kind, id.clone(), tag, factory)?;

		self.inner.entries.lock().push((kind, id.clone()));
		let mut records = self.inner.data.lock();
		for (provider, payload) in data {
			records.push(DataRecord {
				kind,
				id: id.clone(),
				provider,
				payload,
			});
		}
		tracing::debug!(%kind, %id, ty = tag.name(), "accepted registration");
		Ok(handle)
	}
}

impl fmt::Debug for Registrate {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Registrate")
			.field("namespace", &self.inner.namespace)
			.field("env", &self.inner.env)
			.field("entries", &self.inner.entries.lock().len())
			.finish()
	}
}
