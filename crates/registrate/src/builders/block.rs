use std::sync::Arc;

use super::settings::{Latched, SettingsChain};
use super::{BlockEntityBuilder, Builder, BuilderCore, Creator, ItemBuilder};
use crate::core::{ClientRegistrar, ColorProvider, HookError, Identifier, Kind, RegistrateError, RenderLayer};
use crate::data::{self, DataPayload, ProviderType};
use crate::entry::{BlockEntry, ObjectSupplier};
use crate::objects::{BlockEntityType, BlockItem, BlockLike, BlockSettings, DyeColor, ItemSettings, MapColor, Material};

type ColorSupplier = Arc<dyn Fn() -> Arc<dyn ColorProvider> + Send + Sync>;

/// Builder for blocks.
///
/// Settings are produced lazily: the initial supplier runs first, then every
/// [`BlockBuilder::properties`] transform in the order they were added, and
/// the result is handed to the factory when the block registry phase runs.
pub struct BlockBuilder<T, P> {
	core: BuilderCore<T, P>,
	factory: Box<dyn Fn(BlockSettings) -> T + Send + Sync>,
	settings: SettingsChain<BlockSettings>,
	render_layers: Latched<Vec<RenderLayer>>,
	color: Latched<ColorSupplier>,
}

impl<T: Send + Sync + 'static, P> BlockBuilder<T, P> {
	pub fn new(
		core: BuilderCore<T, P>,
		factory: impl Fn(BlockSettings) -> T + Send + Sync + 'static,
		initial: impl Fn() -> BlockSettings + Send + Sync + 'static,
	) -> Self {
		Self {
			core,
			factory: Box::new(factory),
			settings: SettingsChain::new(move || Ok(initial())),
			render_layers: Latched::default(),
			color: Latched::default(),
		}
	}

	/// Adds a settings transform, run after all transforms added before it.
	pub fn properties(mut self, f: impl Fn(BlockSettings) -> BlockSettings + Send + Sync + 'static) -> Self {
		self.settings.compose(f);
		self
	}

	/// Replaces the initial settings, keeping every [`BlockBuilder::properties`] transform.
	pub fn initial_properties(self, material: Material) -> Self {
		self.initial_properties_with(move || BlockSettings::of(material))
	}

	pub fn initial_properties_colored(self, material: Material, color: MapColor) -> Self {
		self.initial_properties_with(move || BlockSettings::of_colored(material, color))
	}

	pub fn initial_properties_dyed(self, material: Material, color: DyeColor) -> Self {
		self.initial_properties_colored(material, MapColor::Dye(color))
	}

	/// Starts from a copy of another block's settings, read when this block is constructed.
	pub fn initial_properties_from<B: BlockLike>(mut self, block: ObjectSupplier<B>) -> Self {
		self.settings
			.replace_initial(move || Ok(block.get()?.settings().clone()));
		self
	}

	pub fn initial_properties_with(mut self, initial: impl Fn() -> BlockSettings + Send + Sync + 'static) -> Self {
		self.settings.replace_initial(move || Ok(initial()));
		self
	}

	/// Like [`BlockBuilder::initial_properties_with`] for a supplier that can fail.
	///
	/// A failure leaves the block unbuilt and surfaces as [`RegistrateError::Producer`]
	/// from the phase run; the next run calls the supplier again.
	pub fn initial_properties_try<E>(
		mut self,
		initial: impl Fn() -> Result<BlockSettings, E> + Send + Sync + 'static,
	) -> Self
	where
		E: Into<HookError>,
	{
		let id = self.core.id().clone();
		self.settings
			.replace_initial(move || initial().map_err(|err| RegistrateError::producer(Kind::Block, &id, err)));
		self
	}

	/// Adds a render layer; the client hook is queued on the first call only.
	///
	/// The renderer holds one layer per block, so only the first layer added is applied.
	pub fn add_layer(mut self, layer: RenderLayer) -> Self {
		let id = self.core.id().clone();
		let layers = self
			.render_layers
			.get_or_hook(&mut self.core, Vec::new, move |layers: &Vec<RenderLayer>, env| {
				env.with_client(|client| apply_layers(client, &id, layers));
			});
		layers.lock().push(layer);
		self
	}

	/// Sets the block color provider. Repeated calls replace the provider; one hook is queued.
	pub fn color(mut self, provider: impl Fn() -> Arc<dyn ColorProvider> + Send + Sync + 'static) -> Self {
		let provider: ColorSupplier = Arc::new(provider);
		let id = self.core.id().clone();
		let slot = self.color.get_or_hook(
			&mut self.core,
			|| provider.clone(),
			move |provider: &ColorSupplier, env| {
				env.with_client(|client| client.register_block_color(&id, provider()));
			},
		);
		*slot.lock() = provider;
		self
	}

	/// Creates a [`BlockItem`] for this block and returns its builder.
	///
	/// The item has no display name of its own; it shares the block's.
	pub fn item(self) -> ItemBuilder<BlockItem<T>, Self> {
		self.item_with(BlockItem::new)
	}

	/// Creates an item for this block with a custom factory that receives the constructed block.
	pub fn item_with<I, F>(self, factory: F) -> ItemBuilder<I, Self>
	where
		I: Send + Sync + 'static,
		F: Fn(Arc<T>, ItemSettings) -> I + Send + Sync + 'static,
	{
		let block = self.supplier();
		let owner = self.owner().clone();
		let id = self.id().clone();
		owner.item_for(self, id, move |settings| Ok(factory(block.get()?, settings)))
	}

	/// Registers a default [`BlockItem`] right away.
	pub fn simple_item(self) -> Result<Self, RegistrateError> {
		self.item().build()
	}

	/// Creates a block entity type bound to this block and returns its builder.
	pub fn block_entity<E, F>(self, factory: F) -> BlockEntityBuilder<E, Self>
	where
		E: 'static,
		F: Fn(&BlockEntityType<E>) -> E + Send + Sync + 'static,
	{
		let block = self.supplier();
		let owner = self.owner().clone();
		let id = self.id().clone();
		owner.block_entity_for(self, id, factory).valid_block(block)
	}

	/// Registers a block entity type bound to this block right away.
	pub fn simple_block_entity<E, F>(self, factory: F) -> Result<Self, RegistrateError>
	where
		E: 'static,
		F: Fn(&BlockEntityType<E>) -> E + Send + Sync + 'static,
	{
		self.block_entity(factory).build()
	}

	/// Uses the name derived from the registry path, e.g. `Polished Granite`.
	pub fn default_lang(self) -> Self {
		let name = data::automatic_name(self.core.id());
		self.lang(name)
	}

	/// Adds the block to `tags`. Repeated calls accumulate.
	pub fn tag(mut self, tags: impl IntoIterator<Item = Identifier>) -> Self {
		self.core
			.set_data(ProviderType::BlockTags, DataPayload::Tags(tags.into_iter().collect()));
		self
	}
}

fn apply_layers(client: &dyn ClientRegistrar, id: &Identifier, layers: &[RenderLayer]) {
	let Some(&first) = layers.first() else {
		return;
	};
	if layers.len() > 1 {
		tracing::warn!(%id, ignored = layers.len() - 1, "block supports one render layer; extra layers ignored");
	}
	client.put_render_layer(id, first);
}

impl<T: Send + Sync + 'static, P> Builder for BlockBuilder<T, P> {
	type Object = T;
	type Parent = P;
	type Entry = BlockEntry<T>;

	fn core(&self) -> &BuilderCore<T, P> {
		&self.core
	}

	fn core_mut(&mut self) -> &mut BuilderCore<T, P> {
		&mut self.core
	}

	fn into_parts(self) -> (BuilderCore<T, P>, Creator<T>) {
		let Self {
			core,
			factory,
			settings,
			..
		} = self;
		let create: Creator<T> = Box::new(move || Ok(factory(settings.build()?)));
		(core, create)
	}
}
