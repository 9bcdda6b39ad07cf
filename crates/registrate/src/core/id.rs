use std::fmt;

use super::error::RegistrateError;

/// Namespaced registry name, displayed as `namespace:path`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier {
	namespace: String,
	path: String,
}

impl Identifier {
	/// Creates a validated identifier.
	pub fn new(namespace: impl Into<String>, path: impl Into<String>) -> Result<Self, RegistrateError> {
		let namespace = namespace.into();
		let path = path.into();
		validate(&namespace, is_namespace_char, Part::Namespace)?;
		validate(&path, is_path_char, Part::Path)?;
		Ok(Self { namespace, path })
	}

	/// Checks a namespace on its own, before any path is known.
	pub fn validate_namespace(namespace: &str) -> Result<(), RegistrateError> {
		validate(namespace, is_namespace_char, Part::Namespace)
	}

	/// Parses `namespace:path`. A missing namespace is an error, there is no default.
	pub fn parse(value: &str) -> Result<Self, RegistrateError> {
		let Some((namespace, path)) = value.split_once(':') else {
			return Err(RegistrateError::InvalidIdentifier {
				value: value.to_string(),
				reason: "expected namespace:path",
			});
		};
		Self::new(namespace, path)
	}

	pub fn namespace(&self) -> &str {
		&self.namespace
	}

	pub fn path(&self) -> &str {
		&self.path
	}

	/// Returns the dotted form used in translation keys (`namespace.path`, `/` mapped to `.`).
	pub fn to_dotted(&self) -> String {
		format!("{}.{}", self.namespace, self.path.replace('/', "."))
	}
}

impl fmt::Display for Identifier {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}", self.namespace, self.path)
	}
}

fn is_namespace_char(c: char) -> bool {
	matches!(c, 'a'..='z' | '0'..='9' | '_' | '.' | '-')
}

fn is_path_char(c: char) -> bool {
	is_namespace_char(c) || c == '/'
}

fn validate(value: &str, allowed: fn(char) -> bool, part: Part) -> Result<(), RegistrateError> {
	let reason = match part {
		_ if !value.is_empty() && value.chars().all(allowed) => return Ok(()),
		Part::Namespace if value.is_empty() => "empty namespace",
		Part::Namespace => "namespace must match [a-z0-9_.-]",
		Part::Path if value.is_empty() => "empty path",
		Part::Path => "path must match [a-z0-9_./-]",
	};
	Err(RegistrateError::InvalidIdentifier {
		value: value.to_string(),
		reason,
	})
}

#[derive(Clone, Copy)]
enum Part {
	Namespace,
	Path,
}
