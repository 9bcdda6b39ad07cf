//! Single-assignment memoizing value.
//!
//! The producer runs at most once successfully; after that the value is
//! cached and the producer is dropped. A failed run leaves the value unset and
//! keeps the producer, so a later access tries again. A producer that panics
//! is lost, and every later access panics as well.

use std::convert::Infallible;
use std::fmt;
use std::sync::OnceLock;

use parking_lot::Mutex;

type Producer<T, E> = Box<dyn FnMut() -> Result<T, E> + Send>;

pub struct LazyValue<T, E = Infallible> {
	value: OnceLock<T>,
	producer: Mutex<Option<Producer<T, E>>>,
}

impl<T> LazyValue<T> {
	/// Wraps an infallible producer.
	pub fn new(producer: impl FnOnce() -> T + Send + 'static) -> Self {
		let mut producer = Some(producer);
		Self::fallible(move || match producer.take() {
			Some(f) => Ok(f()),
			None => unreachable!("infallible producer is dropped after its only run"),
		})
	}

	/// Returns the value, computing it on first access.
	pub fn get(&self) -> &T {
		match self.try_get() {
			Ok(value) => value,
			Err(never) => match never {},
		}
	}
}

impl<T, E> LazyValue<T, E> {
	/// Wraps a producer that may fail; failures are not cached.
	pub fn fallible(producer: impl FnMut() -> Result<T, E> + Send + 'static) -> Self {
		Self {
			value: OnceLock::new(),
			producer: Mutex::new(Some(Box::new(producer))),
		}
	}

	/// Returns the value, running the producer if no earlier run succeeded.
	///
	/// Re-entering the same value from inside its producer deadlocks.
	///
	/// # Panics
	///
	/// If an earlier access panicked inside the producer.
	pub fn try_get(&self) -> Result<&T, E> {
		if let Some(value) = self.value.get() {
			return Ok(value);
		}
		let mut slot = self.producer.lock();
		if let Some(value) = self.value.get() {
			return Ok(value);
		}
		// Out of the slot while it runs: a producer that panics leaves nothing to call.
		let Some(mut producer) = slot.take() else {
			panic!("lazy value producer panicked on an earlier access");
		};
		match producer() {
			Ok(value) => Ok(self.value.get_or_init(|| value)),
			Err(err) => {
				*slot = Some(producer);
				Err(err)
			}
		}
	}

	/// Returns the value only if an earlier access already produced it.
	pub fn peek(&self) -> Option<&T> {
		self.value.get()
	}

	pub fn is_resolved(&self) -> bool {
		self.value.get().is_some()
	}
}

impl<T: fmt::Debug, E> fmt::Debug for LazyValue<T, E> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.value.get() {
			Some(value) => f.debug_tuple("LazyValue").field(value).finish(),
			None => f.write_str("LazyValue(<unresolved>)"),
		}
	}
}
