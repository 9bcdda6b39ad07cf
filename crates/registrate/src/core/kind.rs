use std::any::{Any, TypeId};
use std::fmt;

/// Category of registry an object belongs to; selects the external registry it is dispatched to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
	Block,
	Item,
	BlockEntity,
	/// Any other registry, keyed by its registry name.
	Custom(&'static str),
}

impl Kind {
	/// Position of this kind in the registry phase order.
	///
	/// Companion kinds construct after the kinds they reference: items hold
	/// their block, block entity types hold their valid blocks.
	pub const fn phase_rank(self) -> u8 {
		match self {
			Self::Block => 0,
			Self::Item => 1,
			Self::BlockEntity => 2,
			Self::Custom(_) => 3,
		}
	}

	/// Prefix used for translation keys (`block.ns.path`).
	pub const fn translation_prefix(self) -> &'static str {
		match self {
			Self::Block => "block",
			Self::Item => "item",
			Self::BlockEntity => "block_entity_type",
			Self::Custom(name) => name,
		}
	}
}

impl fmt::Display for Kind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Block => f.write_str("block"),
			Self::Item => f.write_str("item"),
			Self::BlockEntity => f.write_str("block_entity"),
			Self::Custom(name) => write!(f, "custom:{name}"),
		}
	}
}

/// Declared Rust type of a registered object, captured when it is registered.
///
/// Typed lookups and entry re-typing compare tags instead of probing the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeTag {
	id: TypeId,
	name: &'static str,
}

impl TypeTag {
	pub fn of<T: Any>() -> Self {
		Self {
			id: TypeId::of::<T>(),
			name: std::any::type_name::<T>(),
		}
	}

	pub fn is<T: Any>(self) -> bool {
		self.id == TypeId::of::<T>()
	}

	pub fn name(self) -> &'static str {
		self.name
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn phase_order_puts_companions_last() {
		let mut kinds = [Kind::Custom("sound_event"), Kind::BlockEntity, Kind::Item, Kind::Block];
		kinds.sort_by_key(|k| k.phase_rank());
		assert_eq!(
			kinds,
			[Kind::Block, Kind::Item, Kind::BlockEntity, Kind::Custom("sound_event")]
		);
	}

	#[test]
	fn type_tag_matches_declared_type() {
		let tag = TypeTag::of::<String>();
		assert!(tag.is::<String>());
		assert!(!tag.is::<&str>());
		assert_eq!(tag, TypeTag::of::<String>());
	}
}
