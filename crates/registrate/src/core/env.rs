//! Execution-context gate for side-specific hooks.
//!
//! Hooks receive the [`Environment`] explicitly instead of consulting global
//! state, so both sides can be simulated in one process.

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;

use super::id::Identifier;

/// Side of the game a process runs as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
	Client,
	Server,
}

bitflags::bitflags! {
	/// Sides active in the current process.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
	pub struct SideSet: u8 {
		const CLIENT = 1 << 0;
		const SERVER = 1 << 1;
	}
}

impl Side {
	pub const fn as_set(self) -> SideSet {
		match self {
			Self::Client => SideSet::CLIENT,
			Self::Server => SideSet::SERVER,
		}
	}
}

impl FromIterator<Side> for SideSet {
	fn from_iter<I: IntoIterator<Item = Side>>(iter: I) -> Self {
		iter.into_iter().fold(SideSet::empty(), |set, side| set | side.as_set())
	}
}

/// Render pass a block is drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderLayer {
	Solid,
	CutoutMipped,
	Cutout,
	Translucent,
	Tripwire,
}

/// Tint source for a block or item, keyed by tint index.
pub trait ColorProvider: Send + Sync {
	fn color(&self, tint_index: u32) -> Option<u32>;
}

impl<F> ColorProvider for F
where
	F: Fn(u32) -> Option<u32> + Send + Sync,
{
	fn color(&self, tint_index: u32) -> Option<u32> {
		self(tint_index)
	}
}

/// Client-only registries that rendering hooks write into.
pub trait ClientRegistrar: Send + Sync {
	fn put_render_layer(&self, id: &Identifier, layer: RenderLayer);
	fn register_block_color(&self, id: &Identifier, provider: Arc<dyn ColorProvider>);
	fn register_item_color(&self, id: &Identifier, provider: Arc<dyn ColorProvider>);
}

/// Active sides plus the client collaborators available to hooks.
#[derive(Clone, Default)]
pub struct Environment {
	sides: SideSet,
	client: Option<Arc<dyn ClientRegistrar>>,
}

impl Environment {
	/// A dedicated server: client hooks never run.
	pub fn server() -> Self {
		Self {
			sides: SideSet::SERVER,
			client: None,
		}
	}

	/// A client with an integrated server.
	pub fn client(registrar: Arc<dyn ClientRegistrar>) -> Self {
		Self {
			sides: SideSet::CLIENT | SideSet::SERVER,
			client: Some(registrar),
		}
	}

	/// Arbitrary side set; client hooks additionally need a registrar to run.
	pub fn new(sides: SideSet, client: Option<Arc<dyn ClientRegistrar>>) -> Self {
		Self { sides, client }
	}

	pub fn sides(&self) -> SideSet {
		self.sides
	}

	pub fn is_on(&self, side: Side) -> bool {
		self.sides.contains(side.as_set())
	}

	/// Runs `f` now if `side` is active, otherwise does nothing.
	pub fn run_when_on<R>(&self, side: Side, f: impl FnOnce() -> R) -> Option<R> {
		self.is_on(side).then(f)
	}

	/// Runs `f` against the client registrar when running as a client.
	pub fn with_client<R>(&self, f: impl FnOnce(&dyn ClientRegistrar) -> R) -> Option<R> {
		match &self.client {
			Some(client) if self.is_on(Side::Client) => Some(f(client.as_ref())),
			_ => None,
		}
	}
}

impl fmt::Debug for Environment {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Environment")
			.field("sides", &self.sides)
			.field("client", &self.client.is_some())
			.finish()
	}
}
