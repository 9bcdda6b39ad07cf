use indexmap::IndexMap;
use parking_lot::Mutex;
use rustc_hash::FxBuildHasher;

use super::{DeferredRegistry, DelegateHandle, ErasedFactory};
use crate::core::{Environment, Identifier, Kind, RegistrateError, TypeTag};

type SlotMap = IndexMap<Identifier, DelegateHandle, FxBuildHasher>;

#[derive(Default)]
struct KindTable {
	slots: SlotMap,
	frozen: bool,
}

/// In-process [`DeferredRegistry`] with explicit registry phases.
///
/// Registration only records pending slots. [`ObjectRegistry::run_phase`]
/// freezes one kind and constructs its slots in registration order;
/// [`ObjectRegistry::run_all`] walks kinds in [`Kind::phase_rank`] order.
#[derive(Default)]
pub struct ObjectRegistry {
	kinds: Mutex<IndexMap<Kind, KindTable, FxBuildHasher>>,
}

impl ObjectRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Constructs every pending object of `kind`, returning how many were built.
	///
	/// The kind stops accepting registrations as soon as its phase starts.
	/// Slots are attempted in registration order, and the pending ones are
	/// retried in further passes while a pass still builds something, so a
	/// slot may depend on one registered after it. A failing slot does not stop
	/// the others. The run then reports a failed hook first, else the first
	/// construction failure of the last pass; calling again retries the slots
	/// that are still unresolved.
	pub fn run_phase(&self, kind: Kind, env: &Environment) -> Result<usize, RegistrateError> {
		let handles: Vec<DelegateHandle> = {
			let mut kinds = self.kinds.lock();
			let table = kinds.entry(kind).or_default();
			table.frozen = true;
			table.slots.values().cloned().collect()
		};

		let mut built = 0;
		let mut hook_failure = None;
		let mut pending: Vec<&DelegateHandle> = handles.iter().filter(|h| !h.is_resolved()).collect();
		let failure = loop {
			let before = pending.len();
			let mut failure = None;
			pending.retain(|handle| match handle.resolve(env) {
				Ok(_) => {
					built += 1;
					false
				}
				Err(err) if handle.is_resolved() => {
					built += 1;
					hook_failure.get_or_insert(err);
					false
				}
				Err(err) => {
					failure.get_or_insert(err);
					true
				}
			});
			if pending.is_empty() || pending.len() == before {
				break failure;
			}
		};

		tracing::info!(%kind, built, pending = pending.len(), total = handles.len(), "registry phase complete");
		match hook_failure.or(failure) {
			Some(err) => Err(err),
			None => Ok(built),
		}
	}

	/// Runs the phase of every known kind in phase order.
	pub fn run_all(&self, env: &Environment) -> Result<usize, RegistrateError> {
		let mut kinds: Vec<Kind> = self.kinds.lock().keys().copied().collect();
		kinds.sort_by_key(|kind| kind.phase_rank());
		let mut built = 0;
		for kind in kinds {
			built += self.run_phase(kind, env)?;
		}
		Ok(built)
	}

	pub fn is_frozen(&self, kind: Kind) -> bool {
		self.kinds.lock().get(&kind).is_some_and(|table| table.frozen)
	}

	/// Handles registered under `kind`, in registration order.
	pub fn entries(&self, kind: Kind) -> Vec<DelegateHandle> {
		self.kinds
			.lock()
			.get(&kind)
			.map(|table| table.slots.values().cloned().collect())
			.unwrap_or_default()
	}

	pub fn len(&self, kind: Kind) -> usize {
		self.kinds.lock().get(&kind).map_or(0, |table| table.slots.len())
	}
}

impl DeferredRegistry for ObjectRegistry {
	fn register(
		&self,
		kind: Kind,
		id: Identifier,
		tag: TypeTag,
		factory: ErasedFactory,
	) -> Result<DelegateHandle, RegistrateError> {
		let mut kinds = self.kinds.lock();
		let table = kinds.entry(kind).or_default();
		if table.frozen {
			return Err(RegistrateError::RegistryFrozen { kind });
		}
		if table.slots.contains_key(&id) {
			return Err(RegistrateError::AlreadyRegistered { kind, id });
		}
		let handle = DelegateHandle::new(kind, id.clone(), tag, factory);
		table.slots.insert(id, handle.clone());
		Ok(handle)
	}

	fn lookup(&self, kind: Kind, id: &Identifier) -> Option<DelegateHandle> {
		self.kinds.lock().get(&kind)?.slots.get(id).cloned()
	}
}

#[cfg(test)]
mod tests;
