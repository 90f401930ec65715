//! Observability sink for failed fetches.
//!
//! The binder reports every failed fetch exactly once; what happens to
//! the report is the sink's business. The default sink forwards to
//! `tracing`; tests inject [`CapturingSink`](crate::testing::CapturingSink).

use std::fmt;

/// Receives `(context, error)` pairs for failed fetches.
///
/// Implementations must not assume anything about delivery beyond
/// "called once per failure"; no return value is consumed.
pub trait ObservabilitySink {
	/// Record one failure. `context` identifies the request (it embeds
	/// the request key); `error` is the failure itself.
	fn record(&self, context: &str, error: &dyn fmt::Display);
}

/// Default sink: forwards failures to `tracing::error!`.
#[derive(Debug, Default)]
pub struct TracingSink;

impl ObservabilitySink for TracingSink {
	fn record(&self, context: &str, error: &dyn fmt::Display) {
		tracing::error!(context, error = %error, "resource fetch failed");
	}
}
