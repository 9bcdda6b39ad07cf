//! Owning-context configuration loaded from TOML.

use serde::Deserialize;

use crate::core::{RegistrateError, Side, SideSet};

/// Settings for one [`crate::Registrate`].
///
/// ```toml
/// mod_id = "forge"
/// sides = ["server"]
/// auto_lang = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistrateConfig {
	/// Namespace of every identifier the context creates.
	pub mod_id: String,
	/// Sides the process runs as.
	#[serde(default = "default_sides")]
	pub sides: Vec<Side>,
	/// Give new blocks and items an English name derived from their path.
	#[serde(default = "default_auto_lang")]
	pub auto_lang: bool,
}

fn default_sides() -> Vec<Side> {
	vec![Side::Client, Side::Server]
}

fn default_auto_lang() -> bool {
	true
}

impl RegistrateConfig {
	pub fn new(mod_id: impl Into<String>) -> Self {
		Self {
			mod_id: mod_id.into(),
			sides: default_sides(),
			auto_lang: default_auto_lang(),
		}
	}

	pub fn from_toml(source: &str) -> Result<Self, RegistrateError> {
		Ok(toml::from_str(source)?)
	}

	pub fn side_set(&self) -> SideSet {
		self.sides.iter().copied().collect()
	}
}
