//! Document metadata sink.
//!
//! Pages push title, description and canonical-link updates here as a
//! fire-and-forget side effect of data arrival. The sink upserts by
//! selector (title is replaced, meta tags match on `name`, link tags on
//! `rel`), so re-applying the same head is a no-op.
//!
//! Metadata is best-effort by contract: `apply` may fail, and callers
//! swallow the failure - it must never affect lifecycle state or
//! rendering.

use core::cell::RefCell;
use lyceum_core::page::Head;
use thiserror::Error;

/// Failure to apply a metadata update.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetadataError {
	/// The document head cannot be written right now.
	#[error("Document metadata unavailable: {0}")]
	Unavailable(String),
}

/// Side channel for document head updates. No acknowledgment beyond the
/// `Result` is expected.
pub trait MetadataSink {
	/// Upserts `head` into the document.
	fn apply(&self, head: &Head) -> Result<(), MetadataError>;
}

/// The site's document head, accumulated across page transitions.
#[derive(Debug, Default)]
pub struct DocumentMetadata {
	head: RefCell<Head>,
}

impl DocumentMetadata {
	/// Creates an empty document head.
	pub fn new() -> Self {
		Self::default()
	}

	/// A copy of the current head state.
	pub fn snapshot(&self) -> Head {
		self.head.borrow().clone()
	}

	/// Renders the current head to HTML.
	pub fn render_to_string(&self) -> String {
		self.head.borrow().render_to_string()
	}
}

impl MetadataSink for DocumentMetadata {
	fn apply(&self, head: &Head) -> Result<(), MetadataError> {
		self.head.borrow_mut().merge(head);
		Ok(())
	}
}
