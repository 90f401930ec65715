//! Effect - reactive side effects
//!
//! An `Effect` runs its closure immediately on creation and again
//! whenever a signal or memo it read has changed. Effects are the bridge
//! from reactive state to the outside world (rendering, logging, document
//! metadata).
//!
//! Disposal is idempotent and happens automatically on drop; a disposed
//! effect never runs again.

use core::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use super::runtime::{NodeId, NodeType, Observer, try_with_runtime, with_runtime};

type EffectFn = Box<dyn FnMut() + 'static>;

// Closures for live effects, keyed by node id, so the runtime can re-run
// them when dependencies change.
thread_local! {
	static EFFECT_FUNCTIONS: RefCell<BTreeMap<NodeId, EffectFn>> = RefCell::new(BTreeMap::new());
}

/// A side effect re-run whenever its tracked dependencies change.
pub struct Effect {
	id: NodeId,
	disposed: Rc<RefCell<bool>>,
}

impl Effect {
	/// Create an effect and run it once immediately.
	///
	/// Any `Signal::get()` or `Memo::get()` inside `f` registers a
	/// dependency; changes to those values re-run `f`.
	pub fn new<F>(mut f: F) -> Self
	where
		F: FnMut() + 'static,
	{
		let id = NodeId::new();
		let disposed = Rc::new(RefCell::new(false));

		let disposed_guard = disposed.clone();
		EFFECT_FUNCTIONS.with(|storage| {
			storage.borrow_mut().insert(
				id,
				Box::new(move || {
					if !*disposed_guard.borrow() {
						f();
					}
				}),
			);
		});

		execute_effect(id);

		Self { id, disposed }
	}

	/// The graph id of this effect.
	pub fn id(&self) -> NodeId {
		self.id
	}

	/// Stop the effect from ever running again. Safe to call repeatedly.
	pub fn dispose(&self) {
		*self.disposed.borrow_mut() = true;
		let _ = try_with_runtime(|rt| rt.remove_node(self.id));
		let _ = EFFECT_FUNCTIONS.try_with(|storage| {
			storage.borrow_mut().remove(&self.id);
		});
	}
}

impl Drop for Effect {
	fn drop(&mut self) {
		self.dispose();
	}
}

/// Re-run the effect registered under `effect_id`.
///
/// Dependencies from the previous run are cleared first so only the
/// latest execution's reads stay tracked.
pub(crate) fn execute_effect(effect_id: NodeId) {
	with_runtime(|rt| {
		rt.clear_dependencies(effect_id);
		rt.push_observer(Observer {
			id: effect_id,
			node_type: NodeType::Effect,
		});
	});

	// Take the closure out while it runs: an effect that creates another
	// effect (or drops one) re-enters the storage map.
	let entry = EFFECT_FUNCTIONS.with(|storage| storage.borrow_mut().remove(&effect_id));
	if let Some(mut effect_fn) = entry {
		effect_fn();
		EFFECT_FUNCTIONS.with(|storage| {
			storage.borrow_mut().insert(effect_id, effect_fn);
		});
	}

	with_runtime(|rt| rt.pop_observer());
}
