use std::sync::Arc;

use super::{Builder, BuilderCore, Creator};
use crate::core::{ErasedObject, RegistrateError};
use crate::entry::{BlockEntityEntry, ObjectSupplier};
use crate::objects::BlockEntityType;

type EntityFactory<E> = Arc<dyn Fn(&BlockEntityType<E>) -> E + Send + Sync>;
type BlockSource = Box<dyn Fn() -> Result<ErasedObject, RegistrateError> + Send + Sync>;

/// Builder for block entity types.
///
/// Valid blocks are held as suppliers and looked up when the type is
/// constructed, which happens after the block phase.
pub struct BlockEntityBuilder<E, P> {
	core: BuilderCore<BlockEntityType<E>, P>,
	factory: EntityFactory<E>,
	valid_blocks: Vec<BlockSource>,
}

impl<E: 'static, P> BlockEntityBuilder<E, P> {
	pub fn new(
		core: BuilderCore<BlockEntityType<E>, P>,
		factory: impl Fn(&BlockEntityType<E>) -> E + Send + Sync + 'static,
	) -> Self {
		Self {
			core,
			factory: Arc::new(factory),
			valid_blocks: Vec::new(),
		}
	}

	/// Adds a block this entity type may live in.
	pub fn valid_block<B: Send + Sync + 'static>(mut self, block: ObjectSupplier<B>) -> Self {
		self.valid_blocks
			.push(Box::new(move || block.get().map(|block| block as ErasedObject)));
		self
	}

	pub fn valid_blocks<B: Send + Sync + 'static>(self, blocks: impl IntoIterator<Item = ObjectSupplier<B>>) -> Self {
		blocks.into_iter().fold(self, Self::valid_block)
	}
}

impl<E: 'static, P> Builder for BlockEntityBuilder<E, P> {
	type Object = BlockEntityType<E>;
	type Parent = P;
	type Entry = BlockEntityEntry<E>;

	fn core(&self) -> &BuilderCore<BlockEntityType<E>, P> {
		&self.core
	}

	fn core_mut(&mut self) -> &mut BuilderCore<BlockEntityType<E>, P> {
		&mut self.core
	}

	fn into_parts(self) -> (BuilderCore<BlockEntityType<E>, P>, Creator<BlockEntityType<E>>) {
		let id = self.core.id().clone();
		let factory = self.factory;
		let valid_blocks = self.valid_blocks;
		let create: Creator<BlockEntityType<E>> = Box::new(move || {
			let blocks = valid_blocks
				.iter()
				.map(|block| block())
				.collect::<Result<Vec<_>, _>>()?;
			Ok(BlockEntityType::new(id.clone(), factory.clone(), blocks))
		});
		(self.core, create)
	}
}
