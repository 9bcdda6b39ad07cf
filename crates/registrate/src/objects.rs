//! Engine-side value types the exemplar builders construct.
//!
//! These stand in for the host engine's block, item and block-entity
//! settings. The builders only compose and forward them.

use std::fmt;
use std::sync::Arc;

use crate::core::{ErasedObject, Identifier};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DyeColor {
	White,
	Orange,
	Magenta,
	LightBlue,
	Yellow,
	Lime,
	Pink,
	Gray,
	LightGray,
	Cyan,
	Purple,
	Blue,
	Brown,
	Green,
	Red,
	Black,
}

/// Color shown for a block on maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapColor {
	Clear,
	Stone,
	Iron,
	Wood,
	Plant,
	Sand,
	Ice,
	Wool,
	Dye(DyeColor),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Material {
	Stone,
	Metal,
	Wood,
	Glass,
	Plant,
	Sand,
	Ice,
	Wool,
}

impl Material {
	pub const fn map_color(self) -> MapColor {
		match self {
			Self::Stone => MapColor::Stone,
			Self::Metal => MapColor::Iron,
			Self::Wood => MapColor::Wood,
			Self::Glass => MapColor::Clear,
			Self::Plant => MapColor::Plant,
			Self::Sand => MapColor::Sand,
			Self::Ice => MapColor::Ice,
			Self::Wool => MapColor::Wool,
		}
	}
}

/// Construction settings for a block.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockSettings {
	pub material: Material,
	pub map_color: MapColor,
	pub hardness: f32,
	pub resistance: f32,
	pub requires_tool: bool,
	pub luminance: u8,
	pub drops_nothing: bool,
	pub collidable: bool,
	pub ticks_randomly: bool,
}

impl BlockSettings {
	pub fn of(material: Material) -> Self {
		Self::of_colored(material, material.map_color())
	}

	pub fn of_colored(material: Material, map_color: MapColor) -> Self {
		Self {
			material,
			map_color,
			hardness: 0.0,
			resistance: 0.0,
			requires_tool: false,
			luminance: 0,
			drops_nothing: false,
			collidable: true,
			ticks_randomly: false,
		}
	}

	pub fn hardness(mut self, hardness: f32) -> Self {
		self.hardness = hardness;
		self
	}

	pub fn resistance(mut self, resistance: f32) -> Self {
		self.resistance = resistance.max(0.0);
		self
	}

	/// Sets hardness and blast resistance together.
	pub fn strength(self, hardness: f32, resistance: f32) -> Self {
		self.hardness(hardness).resistance(resistance)
	}

	pub fn requires_tool(mut self) -> Self {
		self.requires_tool = true;
		self
	}

	pub fn luminance(mut self, luminance: u8) -> Self {
		self.luminance = luminance.min(15);
		self
	}

	pub fn drops_nothing(mut self) -> Self {
		self.drops_nothing = true;
		self
	}

	pub fn no_collision(mut self) -> Self {
		self.collidable = false;
		self
	}

	pub fn ticks_randomly(mut self) -> Self {
		self.ticks_randomly = true;
		self
	}
}

/// A block type whose construction settings can be read back.
pub trait BlockLike: Send + Sync + 'static {
	fn settings(&self) -> &BlockSettings;
}

/// Plain block that only carries its settings.
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleBlock {
	settings: BlockSettings,
}

impl SimpleBlock {
	pub fn new(settings: BlockSettings) -> Self {
		Self { settings }
	}
}

impl BlockLike for SimpleBlock {
	fn settings(&self) -> &BlockSettings {
		&self.settings
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rarity {
	#[default]
	Common,
	Uncommon,
	Rare,
	Epic,
}

/// Construction settings for an item.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemSettings {
	pub max_count: u32,
	pub max_damage: u32,
	pub fireproof: bool,
	pub rarity: Rarity,
	pub group: Option<String>,
}

impl Default for ItemSettings {
	fn default() -> Self {
		Self {
			max_count: 64,
			max_damage: 0,
			fireproof: false,
			rarity: Rarity::Common,
			group: None,
		}
	}
}

impl ItemSettings {
	pub fn max_count(mut self, max_count: u32) -> Self {
		self.max_count = max_count;
		self
	}

	/// Makes the item damageable; damageable items never stack.
	pub fn max_damage(mut self, max_damage: u32) -> Self {
		self.max_damage = max_damage;
		self.max_count = 1;
		self
	}

	pub fn fireproof(mut self) -> Self {
		self.fireproof = true;
		self
	}

	pub fn rarity(mut self, rarity: Rarity) -> Self {
		self.rarity = rarity;
		self
	}

	pub fn group(mut self, group: impl Into<String>) -> Self {
		self.group = Some(group.into());
		self
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimpleItem {
	settings: ItemSettings,
}

impl SimpleItem {
	pub fn new(settings: ItemSettings) -> Self {
		Self { settings }
	}

	pub fn settings(&self) -> &ItemSettings {
		&self.settings
	}
}

/// Item that places a block.
#[derive(Debug)]
pub struct BlockItem<B> {
	block: Arc<B>,
	settings: ItemSettings,
}

impl<B> BlockItem<B> {
	pub fn new(block: Arc<B>, settings: ItemSettings) -> Self {
		Self { block, settings }
	}

	pub fn block(&self) -> &Arc<B> {
		&self.block
	}

	pub fn settings(&self) -> &ItemSettings {
		&self.settings
	}
}

type BlockEntityFactory<E> = Arc<dyn Fn(&BlockEntityType<E>) -> E + Send + Sync>;

/// Registered type of a block entity, bound to the blocks it may live in.
pub struct BlockEntityType<E> {
	id: Identifier,
	factory: BlockEntityFactory<E>,
	valid_blocks: Vec<ErasedObject>,
}

impl<E> BlockEntityType<E> {
	pub fn new(id: Identifier, factory: BlockEntityFactory<E>, valid_blocks: Vec<ErasedObject>) -> Self {
		Self {
			id,
			factory,
			valid_blocks,
		}
	}

	pub fn id(&self) -> &Identifier {
		&self.id
	}

	/// Creates a fresh block entity of this type.
	pub fn instantiate(&self) -> E {
		(self.factory)(self)
	}

	/// Whether `block` is one of the blocks this type was bound to.
	pub fn supports<B: ?Sized>(&self, block: &Arc<B>) -> bool {
		self.valid_blocks
			.iter()
			.any(|valid| std::ptr::addr_eq(Arc::as_ptr(valid), Arc::as_ptr(block)))
	}

	pub fn valid_block_count(&self) -> usize {
		self.valid_blocks.len()
	}
}

impl<E> fmt::Debug for BlockEntityType<E> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("BlockEntityType")
			.field("id", &self.id)
			.field("valid_blocks", &self.valid_blocks.len())
			.finish()
	}
}

/// A counted reference to a registered item.
#[derive(Clone)]
pub struct ItemStack {
	id: Identifier,
	item: ErasedObject,
	count: u32,
}

impl ItemStack {
	pub fn new(id: Identifier, item: ErasedObject, count: u32) -> Self {
		Self { id, item, count }
	}

	pub fn id(&self) -> &Identifier {
		&self.id
	}

	pub fn item(&self) -> &ErasedObject {
		&self.item
	}

	pub fn count(&self) -> u32 {
		self.count
	}
}

impl fmt::Debug for ItemStack {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}x {}", self.count, self.id)
	}
}
