use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use pretty_assertions::assert_eq;

use super::*;
use crate::core::ErasedObject;
use crate::registry::RegistryObject;

fn id(path: &str) -> Identifier {
	Identifier::new("test", path).unwrap()
}

fn factory(value: u32, log: &Arc<Mutex<Vec<String>>>, name: &str) -> ErasedFactory {
	let log = log.clone();
	let name = name.to_string();
	Box::new(move || {
		log.lock().push(name.clone());
		Ok(Arc::new(value) as ErasedObject)
	})
}

#[test]
fn register_does_not_construct() {
	let registry = ObjectRegistry::new();
	let log = Arc::new(Mutex::new(Vec::new()));
	let handle = registry
		.register(Kind::Block, id("stone"), TypeTag::of::<u32>(), factory(1, &log, "stone"))
		.unwrap();

	assert!(log.lock().is_empty());
	assert!(matches!(handle.object(), Err(RegistrateError::Unresolved { .. })));

	assert_eq!(registry.run_phase(Kind::Block, &Environment::server()).unwrap(), 1);
	let typed = RegistryObject::<u32>::new(handle).unwrap();
	assert_eq!(*typed.get().unwrap(), 1);
}

#[test]
fn run_all_follows_phase_order() {
	let registry = ObjectRegistry::new();
	let log = Arc::new(Mutex::new(Vec::new()));
	let tag = TypeTag::of::<u32>();
	registry
		.register(Kind::BlockEntity, id("press"), tag, factory(3, &log, "press"))
		.unwrap();
	registry
		.register(Kind::Item, id("anvil"), tag, factory(2, &log, "anvil_item"))
		.unwrap();
	registry
		.register(Kind::Block, id("anvil"), tag, factory(1, &log, "anvil"))
		.unwrap();
	registry
		.register(Kind::Block, id("grate"), tag, factory(1, &log, "grate"))
		.unwrap();

	assert_eq!(registry.run_all(&Environment::server()).unwrap(), 4);
	assert_eq!(*log.lock(), vec!["anvil", "grate", "anvil_item", "press"]);
}

#[test]
fn duplicate_name_is_rejected() {
	let registry = ObjectRegistry::new();
	let log = Arc::new(Mutex::new(Vec::new()));
	let tag = TypeTag::of::<u32>();
	registry
		.register(Kind::Block, id("anvil"), tag, factory(1, &log, "a"))
		.unwrap();
	let err = registry
		.register(Kind::Block, id("anvil"), tag, factory(1, &log, "b"))
		.unwrap_err();
	assert!(matches!(err, RegistrateError::AlreadyRegistered { kind: Kind::Block, .. }));

	// Same path under another kind is a different registry.
	registry
		.register(Kind::Item, id("anvil"), tag, factory(1, &log, "c"))
		.unwrap();
	assert_eq!(registry.len(Kind::Block), 1);
	assert_eq!(registry.len(Kind::Item), 1);
}

#[test]
fn frozen_kind_rejects_late_registration() {
	let registry = ObjectRegistry::new();
	let log = Arc::new(Mutex::new(Vec::new()));
	registry.run_phase(Kind::Block, &Environment::server()).unwrap();
	assert!(registry.is_frozen(Kind::Block));
	assert!(!registry.is_frozen(Kind::Item));

	let err = registry
		.register(Kind::Block, id("late"), TypeTag::of::<u32>(), factory(1, &log, "late"))
		.unwrap_err();
	assert!(matches!(err, RegistrateError::RegistryFrozen { kind: Kind::Block }));
}

#[test]
fn listeners_run_in_order_once() {
	let registry = ObjectRegistry::new();
	let log = Arc::new(Mutex::new(Vec::new()));
	let handle = registry
		.register(Kind::Block, id("anvil"), TypeTag::of::<u32>(), factory(9, &log, "built"))
		.unwrap();
	for n in 1..=3 {
		let log = log.clone();
		handle.on_resolved(Box::new(move |object: &ErasedObject, _: &Environment| {
			log.lock().push(format!("hook{n}:{}", object.downcast_ref::<u32>().unwrap()));
			Ok(())
		}));
	}

	let env = Environment::server();
	registry.run_phase(Kind::Block, &env).unwrap();
	handle.resolve(&env).unwrap();
	assert_eq!(*log.lock(), vec!["built", "hook1:9", "hook2:9", "hook3:9"]);
}

#[test]
fn failing_listener_stops_the_run() {
	let registry = ObjectRegistry::new();
	let log = Arc::new(Mutex::new(Vec::new()));
	let handle = registry
		.register(Kind::Block, id("anvil"), TypeTag::of::<u32>(), factory(9, &log, "built"))
		.unwrap();
	let first = log.clone();
	handle.on_resolved(Box::new(move |_: &ErasedObject, _: &Environment| {
		first.lock().push("first".into());
		Ok(())
	}));
	handle.on_resolved(Box::new(|_: &ErasedObject, _: &Environment| {
		Err(RegistrateError::Hook {
			kind: Kind::Block,
			id: Identifier::new("test", "anvil").unwrap(),
			source: "boom".into(),
		})
	}));
	let last = log.clone();
	handle.on_resolved(Box::new(move |_: &ErasedObject, _: &Environment| {
		last.lock().push("last".into());
		Ok(())
	}));

	let err = registry.run_phase(Kind::Block, &Environment::server()).unwrap_err();
	assert!(matches!(err, RegistrateError::Hook { .. }));
	assert_eq!(*log.lock(), vec!["built", "first"]);
	assert!(handle.is_resolved());
}

#[test]
fn failed_factory_is_retried_by_next_phase_run() {
	let registry = ObjectRegistry::new();
	let attempts = Arc::new(AtomicUsize::new(0));
	let counter = attempts.clone();
	let handle = registry
		.register(
			Kind::Block,
			id("flaky"),
			TypeTag::of::<u32>(),
			Box::new(move || {
				if counter.fetch_add(1, Ordering::SeqCst) == 0 {
					Err(RegistrateError::producer(Kind::Block, &id("flaky"), "not yet"))
				} else {
					Ok(Arc::new(5u32) as ErasedObject)
				}
			}),
		)
		.unwrap();

	let env = Environment::server();
	assert!(matches!(
		registry.run_phase(Kind::Block, &env),
		Err(RegistrateError::Producer { .. })
	));
	assert!(!handle.is_resolved());
	assert_eq!(registry.run_phase(Kind::Block, &env).unwrap(), 1);
	assert_eq!(attempts.load(Ordering::SeqCst), 2);
}

#[test]
fn failing_slot_does_not_hold_back_the_rest() {
	let registry = ObjectRegistry::new();
	let log = Arc::new(Mutex::new(Vec::new()));
	let tag = TypeTag::of::<u32>();
	let broken = registry
		.register(
			Kind::Block,
			id("broken"),
			tag,
			Box::new(|| Err(RegistrateError::producer(Kind::Block, &id("broken"), "cracked"))),
		)
		.unwrap();
	let anvil = registry
		.register(Kind::Block, id("anvil"), tag, factory(1, &log, "anvil"))
		.unwrap();

	let env = Environment::server();
	for _ in 0..2 {
		let err = registry.run_phase(Kind::Block, &env).unwrap_err();
		assert!(matches!(err, RegistrateError::Producer { .. }), "{err}");
	}
	assert!(anvil.is_resolved());
	assert!(!broken.is_resolved());
	assert_eq!(*log.lock(), vec!["anvil"]);
}

#[test]
fn typed_view_checks_declared_type() {
	let registry = ObjectRegistry::new();
	let log = Arc::new(Mutex::new(Vec::new()));
	let handle = registry
		.register(Kind::Block, id("anvil"), TypeTag::of::<u32>(), factory(1, &log, "a"))
		.unwrap();
	assert!(matches!(
		RegistryObject::<String>::new(handle.clone()),
		Err(RegistrateError::TypeMismatch { .. })
	));
	assert!(registry.lookup(Kind::Block, &id("anvil")).unwrap().ptr_eq(&handle));
	assert!(registry.lookup(Kind::Item, &id("anvil")).is_none());
}
