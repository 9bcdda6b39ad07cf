use std::sync::Arc;

use pretty_assertions::assert_eq;

use super::Harness;
use crate::core::{Identifier, Kind, RegistrateError};
use crate::entry::BlockEntityEntry;
use crate::objects::{BlockEntityType, BlockItem, BlockLike, BlockSettings, ItemSettings, Material, Rarity, SimpleBlock};
use crate::Builder;

#[derive(Debug, PartialEq)]
struct Press {
	ty: Identifier,
}

#[test]
fn block_item_resolves_after_its_block() {
	let harness = Harness::server();
	let block = harness
		.registrate
		.block("anvil", SimpleBlock::new)
		.unwrap()
		.item()
		.properties(|settings| settings.rarity(Rarity::Uncommon))
		.build()
		.unwrap()
		.register()
		.unwrap();

	let item = block.item::<BlockItem<SimpleBlock>>().unwrap();
	assert_eq!(item.id(), block.id());
	assert!(item.is_kind(Kind::Item));

	harness.run().unwrap();

	let placed = item.get().unwrap();
	assert!(Arc::ptr_eq(placed.block(), &block.get().unwrap()));
	assert_eq!(placed.settings().rarity, Rarity::Uncommon);

	let stack = block.as_stack(3).unwrap();
	assert_eq!(stack.count(), 3);
	assert!(item.is_in(&stack));
	assert!(block.is_in(&stack));
}

#[test]
fn simple_item_uses_default_settings() {
	let harness = Harness::server();
	let block = harness
		.registrate
		.block("grate", SimpleBlock::new)
		.unwrap()
		.simple_item()
		.unwrap()
		.register()
		.unwrap();
	harness.run().unwrap();

	let item = block.item::<BlockItem<SimpleBlock>>().unwrap().get().unwrap();
	assert_eq!(item.settings(), &ItemSettings::default());
}

#[test]
fn item_with_receives_constructed_block() {
	let harness = Harness::server();
	let block = harness
		.registrate
		.block("lamp", SimpleBlock::new)
		.unwrap()
		.properties(|settings| settings.luminance(12))
		.item_with(|block: Arc<SimpleBlock>, _settings| block.settings().luminance)
		.build()
		.unwrap()
		.register()
		.unwrap();
	harness.run().unwrap();

	assert_eq!(*block.item::<u8>().unwrap().get().unwrap(), 12);
}

#[test]
fn block_entity_is_bound_to_its_block() {
	let harness = Harness::server();
	let block = harness
		.registrate
		.block("press", SimpleBlock::new)
		.unwrap()
		.simple_block_entity(|ty: &BlockEntityType<Press>| Press { ty: ty.id().clone() })
		.unwrap()
		.register()
		.unwrap();
	let other = harness
		.registrate
		.block("grate", SimpleBlock::new)
		.unwrap()
		.register()
		.unwrap();

	let entity: BlockEntityEntry<Press> = harness
		.registrate
		.entry::<BlockEntityType<Press>>(Kind::BlockEntity, block.id())
		.unwrap()
		.cast()
		.unwrap();
	assert!(!entity.is_resolved());

	harness.run().unwrap();

	assert!(entity.supports(&block.get().unwrap()));
	assert!(!entity.supports(&other.get().unwrap()));
	assert_eq!(entity.get().unwrap().valid_block_count(), 1);
	assert_eq!(
		entity.instantiate().unwrap(),
		Press {
			ty: harness.id("press")
		}
	);
}

#[test]
fn standalone_block_entity_accepts_many_blocks() {
	let harness = Harness::server();
	let first = harness.registrate.block("oak_sign", SimpleBlock::new).unwrap().register().unwrap();
	let second = harness.registrate.block("birch_sign", SimpleBlock::new).unwrap().register().unwrap();
	let entity = harness
		.registrate
		.block_entity("sign", |ty: &BlockEntityType<Press>| Press { ty: ty.id().clone() })
		.unwrap()
		.valid_blocks([first.supplier(), second.supplier()])
		.register()
		.unwrap();

	harness.run().unwrap();

	assert!(entity.supports(&first.get().unwrap()));
	assert!(entity.supports(&second.get().unwrap()));
	assert_eq!(entity.get().unwrap().valid_block_count(), 2);
}

#[test]
fn copies_settings_from_another_block() {
	let harness = Harness::server();
	let granite = harness
		.registrate
		.block("granite", SimpleBlock::new)
		.unwrap()
		.initial_properties(Material::Stone)
		.properties(|settings| settings.strength(1.5, 6.0))
		.register()
		.unwrap();
	let polished = harness
		.registrate
		.block("polished_granite", SimpleBlock::new)
		.unwrap()
		.initial_properties_from(granite.supplier())
		.properties(|settings| settings.luminance(3))
		.register()
		.unwrap();

	harness.run().unwrap();

	assert_eq!(
		polished.settings().unwrap(),
		BlockSettings::of(Material::Stone).strength(1.5, 6.0).luminance(3)
	);
}

#[test]
fn copy_may_name_a_block_registered_after_it() {
	let harness = Harness::server();
	let granite = harness.registrate.block("granite", SimpleBlock::new).unwrap().supplier();
	let polished = harness
		.registrate
		.block("polished_granite", SimpleBlock::new)
		.unwrap()
		.initial_properties_from(granite)
		.register()
		.unwrap();
	let granite = harness
		.registrate
		.block("granite", SimpleBlock::new)
		.unwrap()
		.properties(|settings| settings.hardness(1.5))
		.register()
		.unwrap();
	let unrelated = harness.registrate.block("grate", SimpleBlock::new).unwrap().register().unwrap();

	assert_eq!(harness.run().unwrap(), 3);

	assert!(unrelated.is_resolved());
	assert_eq!(polished.settings().unwrap(), granite.settings().unwrap());
}

#[test]
fn missing_source_block_leaves_slot_unresolved() {
	let harness = Harness::server();
	let missing = harness.registrate.block("nowhere", SimpleBlock::new).unwrap().supplier();
	let copy = harness
		.registrate
		.block("copy", SimpleBlock::new)
		.unwrap()
		.initial_properties_from(missing)
		.register()
		.unwrap();

	let err = harness.run().unwrap_err();
	assert!(matches!(err, RegistrateError::UnknownEntry { kind: Kind::Block, .. }), "{err}");
	assert!(!copy.is_resolved());
}

#[test]
fn custom_kinds_use_the_factory_as_is() {
	let harness = Harness::server();
	let mut next = 0u32;
	let entry = harness
		.registrate
		.object(Kind::Custom("sound"), "clang", move || {
			next += 1;
			next
		})
		.unwrap()
		.register()
		.unwrap();

	harness.run().unwrap();
	assert_eq!(*entry.get().unwrap(), 1);
	assert_eq!(entry.translation_key(), "sound.forge.clang");
}
