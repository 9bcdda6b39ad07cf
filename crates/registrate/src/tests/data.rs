use pretty_assertions::assert_eq;

use super::Harness;
use crate::core::{Identifier, Kind, RegistrateError};
use crate::data::{DataContext, DataPayload, DataSink, ProviderType};
use crate::objects::{ItemSettings, SimpleBlock, SimpleItem};
use crate::Builder;

#[derive(Default)]
struct Collect {
	seen: Vec<(String, DataPayload)>,
}

impl DataSink for Collect {
	fn accept(&mut self, ctx: DataContext<'_>) {
		self.seen.push((ctx.translation_key(), ctx.payload.clone()));
	}
}

fn tag(path: &str) -> Identifier {
	Identifier::new("c", path).unwrap()
}

#[test]
fn lang_entries_follow_registration() {
	let harness = Harness::server();
	harness
		.registrate
		.block("polished_granite", SimpleBlock::new)
		.unwrap()
		.simple_item()
		.unwrap()
		.register()
		.unwrap();
	harness
		.registrate
		.block("anvil", SimpleBlock::new)
		.unwrap()
		.lang("Heavy Anvil")
		.register()
		.unwrap();
	harness
		.registrate
		.block("hidden", SimpleBlock::new)
		.unwrap()
		.no_lang()
		.register()
		.unwrap();
	harness
		.registrate
		.item("hammer", SimpleItem::new)
		.unwrap()
		.register()
		.unwrap();

	harness.run().unwrap();

	let mut sink = Collect::default();
	assert_eq!(harness.registrate.generate(ProviderType::Lang, &mut sink).unwrap(), 3);
	assert_eq!(
		sink.seen,
		vec![
			(
				"block.forge.polished_granite".to_string(),
				DataPayload::Lang("Polished Granite".into())
			),
			("block.forge.anvil".to_string(), DataPayload::Lang("Heavy Anvil".into())),
			("item.forge.hammer".to_string(), DataPayload::Lang("Hammer".into())),
		]
	);
}

#[test]
fn tags_accumulate_per_provider() {
	let harness = Harness::server();
	harness
		.registrate
		.block("granite", SimpleBlock::new)
		.unwrap()
		.tag([tag("stones")])
		.tag([tag("stones"), tag("mineable/pickaxe")])
		.item()
		.tag([tag("stones")])
		.build()
		.unwrap()
		.register()
		.unwrap();
	harness.run().unwrap();

	let mut blocks = Collect::default();
	harness.registrate.generate(ProviderType::BlockTags, &mut blocks).unwrap();
	assert_eq!(
		blocks.seen,
		vec![(
			"block.forge.granite".to_string(),
			DataPayload::Tags(vec![tag("stones"), tag("mineable/pickaxe")])
		)]
	);

	let mut items = Collect::default();
	assert_eq!(harness.registrate.generate(ProviderType::ItemTags, &mut items).unwrap(), 1);
	assert_eq!(items.seen[0].0, "item.forge.granite");
}

#[test]
fn item_tags_reach_the_item_provider() {
	let harness = Harness::server();
	harness
		.registrate
		.item("ingot", SimpleItem::new)
		.unwrap()
		.properties(|settings: ItemSettings| settings.max_count(16))
		.tag([tag("ingots")])
		.register()
		.unwrap();
	harness.run().unwrap();

	let mut items = Collect::default();
	assert_eq!(harness.registrate.generate(ProviderType::ItemTags, &mut items).unwrap(), 1);
	assert_eq!(items.seen[0].1, DataPayload::Tags(vec![tag("ingots")]));
	assert_eq!(items.seen[0].0, "item.forge.ingot");
}

#[test]
fn generating_before_the_phase_fails() {
	let harness = Harness::server();
	harness.registrate.block("anvil", SimpleBlock::new).unwrap().register().unwrap();

	let err = harness
		.registrate
		.generate(ProviderType::Lang, &mut Collect::default())
		.unwrap_err();
	assert!(matches!(err, RegistrateError::Unresolved { kind: Kind::Block, .. }), "{err}");
}
