use super::id::Identifier;
use super::kind::Kind;

/// Error produced by user-supplied hooks, factories and initial-settings suppliers.
pub type HookError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors surfaced by the registration pipeline.
///
/// Nothing inside the crate swallows one of these: every failure reaches the
/// immediate caller of the operation that triggered it.
#[derive(Debug, thiserror::Error)]
pub enum RegistrateError {
	/// An entry was read before the registry phase constructed its object.
	#[error("{kind} entry {id} is not resolved yet")]
	Unresolved { kind: Kind, id: Identifier },

	/// A typed view was requested over an object of another declared type or kind.
	#[error("type mismatch for {id}: expected {expected}, found {found}")]
	TypeMismatch {
		id: Identifier,
		expected: String,
		found: String,
	},

	/// The same name was registered twice under one kind.
	#[error("{kind} entry {id} is already registered")]
	AlreadyRegistered { kind: Kind, id: Identifier },

	/// An on-register hook failed; later hooks of the same run were skipped.
	#[error("on-register hook for {kind} entry {id} failed: {source}")]
	Hook {
		kind: Kind,
		id: Identifier,
		#[source]
		source: HookError,
	},

	/// A factory or settings supplier failed while constructing an object.
	#[error("failed to construct {kind} entry {id}: {source}")]
	Producer {
		kind: Kind,
		id: Identifier,
		#[source]
		source: HookError,
	},

	/// Lookup of a name that was never registered.
	#[error("no {kind} entry named {id}")]
	UnknownEntry { kind: Kind, id: Identifier },

	/// A namespace or path contains characters outside the allowed set.
	#[error("invalid identifier {value:?}: {reason}")]
	InvalidIdentifier { value: String, reason: &'static str },

	/// The registry phase for this kind already ran.
	#[error("{kind} registry is frozen")]
	RegistryFrozen { kind: Kind },

	#[error("invalid registrate config: {0}")]
	Config(#[from] toml::de::Error),
}

impl RegistrateError {
	/// Wraps a user error as a construction failure of `id`.
	pub fn producer(kind: Kind, id: &Identifier, source: impl Into<HookError>) -> Self {
		Self::Producer {
			kind,
			id: id.clone(),
			source: source.into(),
		}
	}
}
