//! Test doubles for binder consumers.
//!
//! Available to downstream crates' tests; nothing here is used by
//! production code paths.

use core::cell::RefCell;
use core::fmt;
use std::rc::Rc;

use crate::observe::ObservabilitySink;

/// A sink that captures `(context, error)` pairs for assertions.
///
/// Cloning shares the captured entries.
#[derive(Debug, Clone, Default)]
pub struct CapturingSink {
	entries: Rc<RefCell<Vec<(String, String)>>>,
}

impl CapturingSink {
	/// Create an empty sink.
	pub fn new() -> Self {
		Self::default()
	}

	/// The captured `(context, error)` pairs, in arrival order.
	pub fn entries(&self) -> Vec<(String, String)> {
		self.entries.borrow().clone()
	}

	/// Number of captured entries.
	pub fn len(&self) -> usize {
		self.entries.borrow().len()
	}

	/// True when nothing has been captured.
	pub fn is_empty(&self) -> bool {
		self.entries.borrow().is_empty()
	}
}

impl ObservabilitySink for CapturingSink {
	fn record(&self, context: &str, error: &dyn fmt::Display) {
		self.entries
			.borrow_mut()
			.push((context.to_string(), error.to_string()));
	}
}
