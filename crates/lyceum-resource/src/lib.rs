//! # Lyceum Resource
//!
//! The async resource binder: the one piece of structural logic every
//! remote-record page in the site shares. A [`Resource`] encapsulates
//! the fetch-mount-render lifecycle for a record keyed by an identifier
//! (or an aggregate with no key):
//!
//! - `Loading` is published synchronously on activation,
//! - the fetch resolves to exactly one of `Ready`, `Empty` or `Failed`,
//! - a deactivated or superseded fetch can never write state
//!   (mount guard + generation counter, last-request-wins),
//! - derived views are memoized per record identity,
//! - `on_ready` side effects run once per distinct record and swallow
//!   their own failures.
//!
//! There are no retries, no backoff and no cache: a fresh activation
//! supersedes rather than merges with a prior result.
//!
//! The binder is strictly single-threaded; fetches are spawned on the
//! current-thread task set and all state mutation happens on the thread
//! that owns the rendering layer.

#![warn(missing_docs)]

pub mod binder;
pub mod observe;
pub mod state;
pub mod testing;

pub use binder::{Resource, ResourceRequest};
pub use observe::{ObservabilitySink, TracingSink};
pub use state::ResourceState;
