use std::sync::Arc;

use super::settings::{Latched, SettingsChain};
use super::{Builder, BuilderCore, Creator};
use crate::core::{ColorProvider, HookError, Identifier, RegistrateError};
use crate::data::{self, DataPayload, ProviderType};
use crate::entry::ItemEntry;
use crate::objects::ItemSettings;

type ItemFactory<T> = Box<dyn Fn(ItemSettings) -> Result<T, RegistrateError> + Send + Sync>;
type ColorSupplier = Arc<dyn Fn() -> Arc<dyn ColorProvider> + Send + Sync>;

/// Builder for items, standalone or as the companion of a block.
pub struct ItemBuilder<T, P> {
	core: BuilderCore<T, P>,
	factory: ItemFactory<T>,
	settings: SettingsChain<ItemSettings>,
	color: Latched<ColorSupplier>,
}

impl<T: Send + Sync + 'static, P> ItemBuilder<T, P> {
	pub fn new(
		core: BuilderCore<T, P>,
		factory: impl Fn(ItemSettings) -> Result<T, RegistrateError> + Send + Sync + 'static,
	) -> Self {
		Self {
			core,
			factory: Box::new(factory),
			settings: SettingsChain::new(|| Ok(ItemSettings::default())),
			color: Latched::default(),
		}
	}

	/// Adds a settings transform, run after all transforms added before it.
	pub fn properties(mut self, f: impl Fn(ItemSettings) -> ItemSettings + Send + Sync + 'static) -> Self {
		self.settings.compose(f);
		self
	}

	/// Replaces the default starting settings, keeping every transform.
	pub fn initial_properties(mut self, initial: impl Fn() -> ItemSettings + Send + Sync + 'static) -> Self {
		self.settings.replace_initial(move || Ok(initial()));
		self
	}

	/// Fallible initial settings; an error surfaces as [`RegistrateError::Producer`].
	pub fn initial_properties_try<E>(
		mut self,
		initial: impl Fn() -> Result<ItemSettings, E> + Send + Sync + 'static,
	) -> Self
	where
		E: Into<HookError>,
	{
		let (kind, id) = (self.core.kind(), self.core.id().clone());
		self.settings
			.replace_initial(move || initial().map_err(|err| RegistrateError::producer(kind, &id, err)));
		self
	}

	/// Sets the item color provider. Repeated calls replace the provider; one hook is queued.
	pub fn color(mut self, provider: impl Fn() -> Arc<dyn ColorProvider> + Send + Sync + 'static) -> Self {
		let provider: ColorSupplier = Arc::new(provider);
		let id = self.core.id().clone();
		let slot = self.color.get_or_hook(
			&mut self.core,
			|| provider.clone(),
			move |provider: &ColorSupplier, env| {
				env.with_client(|client| client.register_item_color(&id, provider()));
			},
		);
		*slot.lock() = provider;
		self
	}

	pub fn default_lang(self) -> Self {
		let name = data::automatic_name(self.core.id());
		self.lang(name)
	}

	/// Adds the item to `tags`. Repeated calls accumulate.
	pub fn tag(mut self, tags: impl IntoIterator<Item = Identifier>) -> Self {
		self.core
			.set_data(ProviderType::ItemTags, DataPayload::Tags(tags.into_iter().collect()));
		self
	}
}

impl<T: Send + Sync + 'static, P> Builder for ItemBuilder<T, P> {
	type Object = T;
	type Parent = P;
	type Entry = ItemEntry<T>;

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
		let create: Creator<T> = Box::new(move || factory(settings.build()?));
		(core, create)
	}
}
