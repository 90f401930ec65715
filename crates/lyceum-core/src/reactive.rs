//! Fine-grained reactivity for Lyceum.
//!
//! This module provides the primitives the rest of the workspace builds
//! on:
//!
//! - [`Signal`]: a value cell with automatic dependency tracking.
//! - [`Effect`]: a side effect re-run when its dependencies change.
//! - [`Memo`]: a lazily recomputed, cached derivation.
//!
//! ## Model
//!
//! Everything here is single-threaded and cooperative: state lives in
//! `Rc`/`RefCell` behind a thread-local runtime, so no locks are needed
//! and all mutation happens on the thread that owns the rendering layer.
//!
//! ## Invariants
//!
//! 1. Dependents are notified in registration order.
//! 2. A disposed effect never runs again.
//! 3. `Memo::get()` never returns a stale value; recomputation happens
//!    at most once per dependency change.

pub mod effect;
pub mod memo;
pub mod runtime;
pub mod signal;

pub use effect::Effect;
pub use memo::Memo;
pub use runtime::{NodeId, NodeType};
pub use signal::Signal;
