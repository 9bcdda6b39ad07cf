use super::{Builder, BuilderCore, Creator};
use crate::core::{HookError, RegistrateError};
use crate::entry::RegistryEntry;

/// Builder with nothing to configure beyond hooks: the factory is the whole recipe.
pub struct NoConfigBuilder<T, P> {
	core: BuilderCore<T, P>,
	factory: Creator<T>,
}

impl<T: Send + Sync + 'static, P> NoConfigBuilder<T, P> {
	pub fn new(core: BuilderCore<T, P>, mut factory: impl FnMut() -> T + Send + 'static) -> Self {
		Self {
			core,
			factory: Box::new(move || Ok(factory())),
		}
	}

	/// Uses a factory that may fail; its errors surface as [`RegistrateError::Producer`].
	pub fn fallible<E>(core: BuilderCore<T, P>, mut factory: impl FnMut() -> Result<T, E> + Send + 'static) -> Self
	where
		E: Into<HookError>,
	{
		let kind = core.kind();
		let id = core.id().clone();
		Self {
			core,
			factory: Box::new(move || factory().map_err(|err| RegistrateError::producer(kind, &id, err))),
		}
	}
}

impl<T: Send + Sync + 'static, P> Builder for NoConfigBuilder<T, P> {
	type Object = T;
	type Parent = P;
	type Entry = RegistryEntry<T>;

	fn core(&self) -> &BuilderCore<T, P> {
		&self.core
	}

	fn core_mut(&mut self) -> &mut BuilderCore<T, P> {
		&mut self.core
	}

	fn into_parts(self) -> (BuilderCore<T, P>, Creator<T>) {
		(self.core, self.factory)
	}
}
