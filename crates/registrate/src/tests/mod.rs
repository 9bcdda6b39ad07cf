//! End-to-end registration scenarios against the in-memory registry.

mod companions;
mod data;

use std::sync::Arc;

use parking_lot::Mutex;

use crate::core::{ClientRegistrar, ColorProvider, Environment, Identifier, RenderLayer};
use crate::registry::ObjectRegistry;
use crate::{RegistrateError, Registrate};

/// What a [`RecordingClient`] was asked to do; colors are sampled at tint index 0.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ClientEvent {
	Layer(Identifier, RenderLayer),
	BlockColor(Identifier, Option<u32>),
	ItemColor(Identifier, Option<u32>),
}

#[derive(Default)]
pub(crate) struct RecordingClient {
	events: Mutex<Vec<ClientEvent>>,
}

impl RecordingClient {
	pub(crate) fn events(&self) -> Vec<ClientEvent> {
		self.events.lock().clone()
	}
}

impl ClientRegistrar for RecordingClient {
	fn put_render_layer(&self, id: &Identifier, layer: RenderLayer) {
		self.events.lock().push(ClientEvent::Layer(id.clone(), layer));
	}

	fn register_block_color(&self, id: &Identifier, provider: Arc<dyn ColorProvider>) {
		self.events
			.lock()
			.push(ClientEvent::BlockColor(id.clone(), provider.color(0)));
	}

	fn register_item_color(&self, id: &Identifier, provider: Arc<dyn ColorProvider>) {
		self.events
			.lock()
			.push(ClientEvent::ItemColor(id.clone(), provider.color(0)));
	}
}

/// A registrate in the `forge` namespace wired to a fresh in-memory registry.
pub(crate) struct Harness {
	pub(crate) registry: Arc<ObjectRegistry>,
	pub(crate) registrate: Registrate,
	pub(crate) client: Arc<RecordingClient>,
}

impl Harness {
	pub(crate) fn server() -> Self {
		Self::with_env(|_| Environment::server())
	}

	pub(crate) fn client() -> Self {
		Self::with_env(Environment::client)
	}

	fn with_env(env: impl FnOnce(Arc<dyn ClientRegistrar>) -> Environment) -> Self {
		let registry = Arc::new(ObjectRegistry::new());
		let client = Arc::new(RecordingClient::default());
		let registrar: Arc<dyn ClientRegistrar> = client.clone();
		let registrate = Registrate::new("forge", registry.clone(), env(registrar)).unwrap();
		Self {
			registry,
			registrate,
			client,
		}
	}

	/// Runs every registry phase in order.
	pub(crate) fn run(&self) -> Result<usize, RegistrateError> {
		self.registry.run_all(self.registrate.env())
	}

	pub(crate) fn id(&self, path: &str) -> Identifier {
		self.registrate.id(path).unwrap()
	}
}
