//! Deferred, builder-driven registration of named objects.
//!
//! Callers configure objects through fluent builders obtained from a
//! [`Registrate`]. Registering a builder records a factory with an external
//! [`DeferredRegistry`] and returns a typed [`RegistryEntry`]; the object is
//! only constructed, and its on-register hooks only run, when that registry
//! runs its own phase.
//!
//! # Modules
//!
//! - [`core`](mod@crate::core) - errors, identifiers, kinds, [`LazyValue`] and the execution [`Environment`]
//! - [`registry`] - the external registry contract and the in-memory [`ObjectRegistry`]
//! - [`entry`] - typed entries and their subtypes
//! - [`builders`] - the shared pipeline and the concrete builders
//! - [`objects`] - settings and value types the builders construct
//! - [`data`] - data payloads and sinks
//! - [`config`] - TOML configuration for a [`Registrate`]

pub mod builders;
pub mod config;
pub mod core;
pub mod data;
pub mod entry;
pub mod objects;
mod registrate;
pub mod registry;

pub use builders::{
	BlockBuilder, BlockEntityBuilder, Builder, BuilderCallback, BuilderCore, BuilderSpec, ItemBuilder, NoConfigBuilder,
};
pub use config::RegistrateConfig;
pub use crate::core::{
	ClientRegistrar, ColorProvider, Environment, HookError, Identifier, Kind, LazyValue, RegistrateError, RenderLayer,
	Side, SideSet, TypeTag,
};
pub use data::{DataContext, DataPayload, DataSink, ProviderType};
pub use entry::{BlockEntityEntry, BlockEntry, EntryType, ItemEntry, ObjectSupplier, RegistryEntry};
pub use registrate::Registrate;
pub use registry::{DeferredRegistry, DelegateHandle, ObjectRegistry, RegistryObject};

#[cfg(test)]
mod tests;
