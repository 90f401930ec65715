//! Memo - lazily recomputed derivations
//!
//! `Memo<T>` caches the result of a computation over reactive state.
//! A dependency change only marks the memo dirty; recomputation is
//! deferred until the next `get()`, and a clean memo returns the cached
//! value without running the computation at all.
//!
//! Invariant: `get()` never returns a stale value.

use core::cell::{Cell, RefCell};
use core::fmt;
use std::collections::BTreeMap;
use std::rc::Rc;

use super::runtime::{NodeId, NodeType, Observer, try_with_runtime, with_runtime};

type ComputeFn = Box<dyn FnMut() + 'static>;

thread_local! {
	static MEMO_FUNCTIONS: RefCell<BTreeMap<NodeId, ComputeFn>> = RefCell::new(BTreeMap::new());
	static MEMO_DIRTY: RefCell<BTreeMap<NodeId, Rc<Cell<bool>>>> = RefCell::new(BTreeMap::new());
}

/// Mark the memo registered under `id` as dirty.
///
/// Called by the runtime when one of the memo's dependencies changes.
pub(crate) fn mark_dirty(id: NodeId) {
	MEMO_DIRTY.with(|flags| {
		if let Some(flag) = flags.borrow().get(&id) {
			flag.set(true);
		}
	});
}

/// A memoized value derived from reactive state.
///
/// Cloning a memo shares the cache; all clones observe the same
/// computation.
pub struct Memo<T: 'static> {
	id: NodeId,
	value: Rc<RefCell<Option<T>>>,
	dirty: Rc<Cell<bool>>,
}

impl<T: Clone + 'static> Memo<T> {
	/// Create a memo over `f`.
	///
	/// The computation does not run here; the first `get()` runs it and
	/// records its dependencies.
	pub fn new<F>(mut f: F) -> Self
	where
		F: FnMut() -> T + 'static,
	{
		let id = NodeId::new();
		let value: Rc<RefCell<Option<T>>> = Rc::new(RefCell::new(None));
		let dirty = Rc::new(Cell::new(true));

		let value_slot = value.clone();
		MEMO_FUNCTIONS.with(|storage| {
			storage.borrow_mut().insert(
				id,
				Box::new(move || {
					let computed = f();
					*value_slot.borrow_mut() = Some(computed);
				}),
			);
		});
		MEMO_DIRTY.with(|flags| {
			flags.borrow_mut().insert(id, dirty.clone());
		});

		Self { id, value, dirty }
	}

	/// Return the memoized value, recomputing only when dirty.
	pub fn get(&self) -> T {
		// The reader (an effect, or an outer memo) depends on this memo,
		// not on the signals it reads internally.
		with_runtime(|rt| rt.track_dependency(self.id));

		if self.dirty.get() || self.value.borrow().is_none() {
			self.recompute();
		}
		self.value
			.borrow()
			.clone()
			.expect("memo computation stored a value")
	}

	fn recompute(&self) {
		with_runtime(|rt| {
			rt.clear_dependencies(self.id);
			rt.push_observer(Observer {
				id: self.id,
				node_type: NodeType::Memo,
			});
		});

		// Taken out while running so a computation that touches other
		// memos does not hold the storage borrow.
		let entry = MEMO_FUNCTIONS.with(|storage| storage.borrow_mut().remove(&self.id));
		if let Some(mut compute) = entry {
			compute();
			MEMO_FUNCTIONS.with(|storage| {
				storage.borrow_mut().insert(self.id, compute);
			});
		}

		with_runtime(|rt| rt.pop_observer());
		self.dirty.set(false);
	}

	/// The graph id of this memo.
	pub fn id(&self) -> NodeId {
		self.id
	}
}

impl<T: 'static> Clone for Memo<T> {
	fn clone(&self) -> Self {
		Self {
			id: self.id,
			value: self.value.clone(),
			dirty: self.dirty.clone(),
		}
	}
}

impl<T: 'static> Drop for Memo<T> {
	fn drop(&mut self) {
		if Rc::strong_count(&self.value) == 1 {
			let _ = try_with_runtime(|rt| rt.remove_node(self.id));
			let _ = MEMO_FUNCTIONS.try_with(|storage| {
				storage.borrow_mut().remove(&self.id);
			});
			let _ = MEMO_DIRTY.try_with(|flags| {
				flags.borrow_mut().remove(&self.id);
			});
		}
	}
}

impl<T: fmt::Debug + Clone + 'static> fmt::Debug for Memo<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Memo")
			.field("id", &self.id)
			.field("dirty", &self.dirty.get())
			.finish()
	}
}
