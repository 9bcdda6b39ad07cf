//! Data-generation payloads.
//!
//! Builders attach payloads (translations, tags) to the entry they build. The
//! owning context stores them when the entry is accepted and forwards them to
//! a [`DataSink`] on request, paired with the resolved object. Nothing here
//! interprets a payload.

use heck::ToTitleCase;

use crate::core::{ErasedObject, Identifier, Kind};

/// Which provider a payload belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderType {
	Lang,
	BlockTags,
	ItemTags,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataPayload {
	/// English display name.
	Lang(String),
	/// Tags the entry is added to.
	Tags(Vec<Identifier>),
}

/// Payloads queued on a builder, keyed by provider.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataSet {
	records: Vec<(ProviderType, DataPayload)>,
}

impl DataSet {
	/// Adds a payload. Tags accumulate across calls; any other payload replaces
	/// the previous one for the same provider.
	pub fn set(&mut self, provider: ProviderType, payload: DataPayload) {
		let existing = self.records.iter_mut().find(|(p, _)| *p == provider);
		match (existing, payload) {
			(Some((_, DataPayload::Tags(tags))), DataPayload::Tags(more)) => {
				for tag in more {
					if !tags.contains(&tag) {
						tags.push(tag);
					}
				}
			}
			(Some((_, slot)), payload) => *slot = payload,
			(None, payload) => self.records.push((provider, payload)),
		}
	}

	pub fn remove(&mut self, provider: ProviderType) {
		self.records.retain(|(p, _)| *p != provider);
	}

	pub fn get(&self, provider: ProviderType) -> Option<&DataPayload> {
		self.records.iter().find(|(p, _)| *p == provider).map(|(_, payload)| payload)
	}

	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}
}

impl IntoIterator for DataSet {
	type Item = (ProviderType, DataPayload);
	type IntoIter = std::vec::IntoIter<(ProviderType, DataPayload)>;

	fn into_iter(self) -> Self::IntoIter {
		self.records.into_iter()
	}
}

/// One payload forwarded to a sink.
pub struct DataContext<'a> {
	pub kind: Kind,
	pub id: &'a Identifier,
	pub payload: &'a DataPayload,
	pub object: &'a ErasedObject,
}

impl DataContext<'_> {
	pub fn translation_key(&self) -> String {
		format!("{}.{}", self.kind.translation_prefix(), self.id.to_dotted())
	}
}

/// Receiver for generated data.
pub trait DataSink {
	fn accept(&mut self, ctx: DataContext<'_>);
}

/// English name derived from the last path segment: `polished_granite` becomes `Polished Granite`.
pub fn automatic_name(id: &Identifier) -> String {
	let last = id.path().rsplit('/').next().unwrap_or(id.path());
	last.to_title_case()
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use rstest::rstest;

	use super::*;

	fn tag(path: &str) -> Identifier {
		Identifier::new("c", path).unwrap()
	}

	#[rstest]
	#[case("anvil", "Anvil")]
	#[case("polished_granite", "Polished Granite")]
	#[case("machines/steam_press", "Steam Press")]
	fn automatic_names(#[case] path: &str, #[case] expected: &str) {
		let id = Identifier::new("forge", path).unwrap();
		assert_eq!(automatic_name(&id), expected);
	}

	#[test]
	fn lang_replaces_tags_accumulate() {
		let mut data = DataSet::default();
		data.set(ProviderType::Lang, DataPayload::Lang("Old".into()));
		data.set(ProviderType::Lang, DataPayload::Lang("New".into()));
		data.set(ProviderType::BlockTags, DataPayload::Tags(vec![tag("ores")]));
		data.set(ProviderType::BlockTags, DataPayload::Tags(vec![tag("ores"), tag("stone")]));

		assert_eq!(data.get(ProviderType::Lang), Some(&DataPayload::Lang("New".into())));
		assert_eq!(
			data.get(ProviderType::BlockTags),
			Some(&DataPayload::Tags(vec![tag("ores"), tag("stone")]))
		);

		data.remove(ProviderType::Lang);
		assert_eq!(data.get(ProviderType::Lang), None);
		assert!(!data.is_empty());
	}
}
