//! Error types for the remote service clients.
//!
//! Both error enums are `Clone` so they can live inside a lifecycle
//! state and be handed to every observer of that state. "Query found no
//! rows" is not represented here at all: that outcome is `Ok(None)` at
//! the client boundary and `Empty` in the lifecycle.

use thiserror::Error;

/// Failures surfaced by the remote data store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
	/// Transport-level failure reaching the store.
	#[error("Network error: {0}")]
	Network(String),

	/// The store answered with a non-success status.
	#[error("Store rejected the query with status {code}")]
	Status {
		/// HTTP status code of the response.
		code: u16,
	},

	/// The response body could not be interpreted.
	#[error("Invalid response: {0}")]
	InvalidResponse(String),
}

impl From<reqwest::Error> for StoreError {
	fn from(error: reqwest::Error) -> Self {
		StoreError::Network(error.to_string())
	}
}

impl From<serde_json::Error> for StoreError {
	fn from(error: serde_json::Error) -> Self {
		StoreError::InvalidResponse(error.to_string())
	}
}

/// Failures surfaced by the identity provider.
///
/// `Rejected` is the user-facing outcome for declined credentials. Its
/// display is a fixed message: provider-internal detail goes to the
/// logs, never to the end user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
	/// The provider declined the credentials.
	#[error("Invalid email or password")]
	Rejected,

	/// Transport-level failure reaching the provider.
	#[error("Network error: {0}")]
	Network(String),

	/// The response body could not be interpreted.
	#[error("Invalid response: {0}")]
	InvalidResponse(String),
}

impl From<reqwest::Error> for AuthError {
	fn from(error: reqwest::Error) -> Self {
		AuthError::Network(error.to_string())
	}
}
