//! Identity provider access.
//!
//! Authentication is a single request/response exchange with the hosted
//! provider: credentials go in, one terminal outcome comes back. The
//! shape is deliberately identical to a resource fetch so the login
//! page can reuse the binder lifecycle (`Loading` -> `Ready(Session)` |
//! `Failed`).
//!
//! Declined credentials surface as [`AuthError::Rejected`], whose
//! display is a fixed user-facing message; whatever detail the provider
//! returned is logged and goes no further.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// Login credentials for the admin area.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
	/// Account email.
	pub email: String,
	/// Account password.
	pub password: String,
}

/// The authenticated account inside a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
	/// Provider-side account id.
	pub id: String,
	/// Account email.
	pub email: String,
}

/// A session issued by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
	/// Bearer token for subsequent requests.
	pub access_token: String,
	/// Token type, normally `bearer`.
	pub token_type: String,
	/// Seconds until the token expires.
	pub expires_in: u64,
	/// The authenticated account.
	pub user: AuthUser,
}

/// Request/response contract with the identity provider.
///
/// Consumed from a single cooperative thread; futures need not be
/// `Send`.
#[async_trait(?Send)]
pub trait IdentityProvider {
	/// Verifies credentials and issues a session.
	async fn authenticate(&self, credentials: &Credentials) -> Result<Session, AuthError>;
}

/// Password-grant implementation against the hosted auth endpoint.
#[derive(Debug, Clone)]
pub struct PasswordAuth {
	http: reqwest::Client,
	auth_url: String,
	api_key: String,
}

#[derive(Debug, Deserialize)]
struct ProviderError {
	#[serde(default)]
	error_description: Option<String>,
	#[serde(default)]
	msg: Option<String>,
}

impl PasswordAuth {
	/// Creates a provider client for `auth_url`, authenticating the
	/// application with `api_key`.
	pub fn new(auth_url: impl Into<String>, api_key: impl Into<String>) -> Self {
		Self {
			http: reqwest::Client::new(),
			auth_url: auth_url.into().trim_end_matches('/').to_string(),
			api_key: api_key.into(),
		}
	}

	fn token_endpoint(&self) -> String {
		format!("{}/token?grant_type=password", self.auth_url)
	}
}

#[async_trait(?Send)]
impl IdentityProvider for PasswordAuth {
	async fn authenticate(&self, credentials: &Credentials) -> Result<Session, AuthError> {
		let response = self
			.http
			.post(self.token_endpoint())
			.header("apikey", &self.api_key)
			.json(credentials)
			.send()
			.await?;

		let status = response.status();
		if status.is_client_error() {
			// The raw detail stays in the logs; the caller only ever
			// sees the fixed rejection message.
			let detail = response
				.json::<ProviderError>()
				.await
				.ok()
				.and_then(|body| body.error_description.or(body.msg))
				.unwrap_or_else(|| format!("status {}", status.as_u16()));
			tracing::warn!(detail = %detail, "identity provider declined credentials");
			return Err(AuthError::Rejected);
		}
		if !status.is_success() {
			return Err(AuthError::Network(format!(
				"provider answered with status {}",
				status.as_u16()
			)));
		}

		response
			.json::<Session>()
			.await
			.map_err(|error| AuthError::InvalidResponse(error.to_string()))
	}
}
