//! Shared registration primitives.

pub mod env;
pub mod error;
pub mod id;
pub mod kind;
pub mod lazy;

use std::any::Any;
use std::sync::Arc;

pub use env::{ClientRegistrar, ColorProvider, Environment, RenderLayer, Side, SideSet};
pub use error::{HookError, RegistrateError};
pub use id::Identifier;
pub use kind::{Kind, TypeTag};
pub use lazy::LazyValue;

/// A constructed registry object with its concrete type erased.
pub type ErasedObject = Arc<dyn Any + Send + Sync>;
