use std::sync::Arc;

use parking_lot::Mutex;

use super::BuilderCore;
use crate::core::{Environment, RegistrateError};

type Initial<S> = Arc<dyn Fn() -> Result<S, RegistrateError> + Send + Sync>;
type Transform<S> = Box<dyn Fn(S) -> S + Send + Sync>;

/// Initial-settings supplier followed by a composed chain of transforms.
///
/// Replacing the supplier never touches the chain, so transforms added
/// before a later `replace_initial` still apply.
pub(super) struct SettingsChain<S> {
	initial: Initial<S>,
	transform: Transform<S>,
}

impl<S: 'static> SettingsChain<S> {
	pub(super) fn new(initial: impl Fn() -> Result<S, RegistrateError> + Send + Sync + 'static) -> Self {
		Self {
			initial: Arc::new(initial),
			transform: Box::new(|settings| settings),
		}
	}

	/// Runs `f` after every transform added so far.
	pub(super) fn compose(&mut self, f: impl Fn(S) -> S + Send + Sync + 'static) {
		let previous = std::mem::replace(&mut self.transform, Box::new(|settings| settings));
		self.transform = Box::new(move |settings| f(previous(settings)));
	}

	pub(super) fn replace_initial(&mut self, initial: impl Fn() -> Result<S, RegistrateError> + Send + Sync + 'static) {
		self.initial = Arc::new(initial);
	}

	pub(super) fn build(&self) -> Result<S, RegistrateError> {
		Ok((self.transform)((self.initial)()?))
	}
}

/// Configuration read by a hook when it runs.
///
/// The hook is queued the first time the slot is touched; later updates only
/// change the stored value.
pub(super) struct Latched<V> {
	slot: Option<Arc<Mutex<V>>>,
}

impl<V> Default for Latched<V> {
	fn default() -> Self {
		Self { slot: None }
	}
}

impl<V: Send + 'static> Latched<V> {
	pub(super) fn get_or_hook<T, P>(
		&mut self,
		core: &mut BuilderCore<T, P>,
		init: impl FnOnce() -> V,
		hook: impl FnOnce(&V, &Environment) + Send + 'static,
	) -> Arc<Mutex<V>>
	where
		T: Send + Sync + 'static,
	{
		if let Some(slot) = &self.slot {
			return slot.clone();
		}
		let slot = Arc::new(Mutex::new(init()));
		let shared = slot.clone();
		core.add_hook(Box::new(move |_: &Arc<T>, env: &Environment| {
			hook(&shared.lock(), env);
			Ok(())
		}));
		self.slot = Some(slot.clone());
		slot
	}
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;

	use super::*;

	proptest! {
		#[test]
		fn transforms_apply_in_insertion_order(start in -1000i64..1000, add in -50i64..50, mul in -9i64..9) {
			let mut chain = SettingsChain::new(move || Ok(start));
			chain.compose(move |s| s + add);
			chain.compose(move |s| s * mul);
			prop_assert_eq!(chain.build().unwrap(), (start + add) * mul);
		}

		#[test]
		fn replacing_initial_keeps_transforms(first in 0i64..100, second in 0i64..100, add in 1i64..50) {
			let mut chain = SettingsChain::new(move || Ok(first));
			chain.compose(move |s| s + add);
			chain.replace_initial(move || Ok(second));
			prop_assert_eq!(chain.build().unwrap(), second + add);
		}
	}
}
