//! Signal - the reactive value cell
//!
//! `Signal<T>` holds a piece of state that changes over time. Reading it
//! inside an [`Effect`](super::Effect) or [`Memo`](super::Memo) records a
//! dependency automatically; writing it notifies every dependent.
//!
//! Signals are `Rc`-shared and cheap to clone; all clones observe the
//! same value.

use core::cell::RefCell;
use core::fmt;
use std::rc::Rc;

use super::runtime::{NodeId, try_with_runtime, with_runtime};

/// A reactive value cell with automatic dependency tracking.
#[derive(Clone)]
pub struct Signal<T: 'static> {
	id: NodeId,
	value: Rc<RefCell<T>>,
}

impl<T: 'static> Signal<T> {
	/// Create a signal holding `value`.
	pub fn new(value: T) -> Self {
		Self {
			id: NodeId::new(),
			value: Rc::new(RefCell::new(value)),
		}
	}

	/// Read the current value, recording a dependency when called from
	/// inside an effect or memo.
	pub fn get(&self) -> T
	where
		T: Clone,
	{
		with_runtime(|rt| rt.track_dependency(self.id));
		self.get_untracked()
	}

	/// Read the current value without recording a dependency.
	pub fn get_untracked(&self) -> T
	where
		T: Clone,
	{
		self.value.borrow().clone()
	}

	/// Replace the value and notify dependents.
	pub fn set(&self, value: T) {
		*self.value.borrow_mut() = value;
		with_runtime(|rt| rt.notify_signal_change(self.id));
	}

	/// Mutate the value in place and notify dependents once.
	pub fn update<F>(&self, f: F)
	where
		F: FnOnce(&mut T),
	{
		f(&mut *self.value.borrow_mut());
		with_runtime(|rt| rt.notify_signal_change(self.id));
	}

	/// Inspect the value through a borrow, recording a dependency.
	///
	/// Useful when `T` is expensive to clone.
	pub fn with<F, R>(&self, f: F) -> R
	where
		F: FnOnce(&T) -> R,
	{
		with_runtime(|rt| rt.track_dependency(self.id));
		f(&self.value.borrow())
	}

	/// The graph id of this signal.
	pub fn id(&self) -> NodeId {
		self.id
	}
}

impl<T: 'static> Drop for Signal<T> {
	fn drop(&mut self) {
		// Last clone cleans the node out of the runtime. TLS may already
		// be gone during thread teardown.
		if Rc::strong_count(&self.value) == 1 {
			let _ = try_with_runtime(|rt| rt.remove_node(self.id));
		}
	}
}

impl<T: fmt::Debug + Clone + 'static> fmt::Debug for Signal<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Signal")
			.field("id", &self.id)
			.field("value", &self.get_untracked())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serial_test::serial;

	#[test]
	#[serial]
	fn new_signal_holds_initial_value() {
		let signal = Signal::new(42);
		assert_eq!(signal.get_untracked(), 42);
	}

	#[test]
	#[serial]
	fn set_replaces_the_value() {
		let signal = Signal::new(0);
		signal.set(100);
		assert_eq!(signal.get_untracked(), 100);
	}

	#[test]
	#[serial]
	fn update_mutates_in_place() {
		let signal = Signal::new(1);
		signal.update(|n| *n *= 10);
		assert_eq!(signal.get_untracked(), 10);
	}

	#[test]
	#[serial]
	fn clones_share_the_value() {
		let a = Signal::new("x".to_string());
		let b = a.clone();
		a.set("y".to_string());
		assert_eq!(b.get_untracked(), "y");
	}

	#[test]
	#[serial]
	fn with_borrows_without_cloning() {
		let signal = Signal::new(vec![1, 2, 3]);
		let len = signal.with(|v| v.len());
		assert_eq!(len, 3);
	}
}
