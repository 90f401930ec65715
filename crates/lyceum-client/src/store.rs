//! Remote data store access.
//!
//! The store is an external collaborator reached over HTTP; this module
//! defines the narrow request/response contract the rest of the
//! workspace consumes ([`RemoteStore`]) and the production
//! implementation ([`RestStore`]).
//!
//! The store value is always passed in explicitly - there is no global
//! connection handle anywhere in this workspace.

use async_trait::async_trait;

use crate::error::StoreError;

/// An untyped, fully-built query: table plus encoded parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
	/// The table to query.
	pub table: String,
	/// Query parameters in submission order.
	pub params: Vec<(String, String)>,
}

/// Request/response contract with the hosted data store.
///
/// Implementations are consumed from a single cooperative thread, so
/// the futures need not be `Send`.
#[async_trait(?Send)]
pub trait RemoteStore {
	/// Executes the query limited to one row.
	///
	/// `Ok(None)` means the query matched nothing; that is a successful
	/// outcome, not an error.
	async fn fetch_one(&self, request: QueryRequest)
	-> Result<Option<serde_json::Value>, StoreError>;

	/// Executes the query as a count aggregate.
	async fn count(&self, request: QueryRequest) -> Result<u64, StoreError>;
}

/// HTTP implementation of [`RemoteStore`] against the hosted store's
/// REST endpoint.
#[derive(Debug, Clone)]
pub struct RestStore {
	http: reqwest::Client,
	base_url: String,
	api_key: String,
}

impl RestStore {
	/// Creates a store client for `base_url`, authenticating with
	/// `api_key`.
	pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
		Self {
			http: reqwest::Client::new(),
			base_url: base_url.into().trim_end_matches('/').to_string(),
			api_key: api_key.into(),
		}
	}

	fn endpoint(&self, table: &str) -> String {
		format!("{}/{}", self.base_url, table)
	}

	async fn execute(
		&self,
		request: &QueryRequest,
		extra: &[(&str, &str)],
	) -> Result<Vec<serde_json::Value>, StoreError> {
		let response = self
			.http
			.get(self.endpoint(&request.table))
			.header("apikey", &self.api_key)
			.header("Authorization", format!("Bearer {}", self.api_key))
			.query(&request.params)
			.query(extra)
			.send()
			.await?;

		let status = response.status();
		if !status.is_success() {
			return Err(StoreError::Status {
				code: status.as_u16(),
			});
		}
		let rows = response.json::<Vec<serde_json::Value>>().await?;
		Ok(rows)
	}
}

#[async_trait(?Send)]
impl RemoteStore for RestStore {
	async fn fetch_one(
		&self,
		request: QueryRequest,
	) -> Result<Option<serde_json::Value>, StoreError> {
		// Cap the result set unless the query already did.
		let extra: &[(&str, &str)] = if request.params.iter().any(|(key, _)| key == "limit") {
			&[]
		} else {
			&[("limit", "1")]
		};
		let rows = self.execute(&request, extra).await?;
		Ok(rows.into_iter().next())
	}

	async fn count(&self, request: QueryRequest) -> Result<u64, StoreError> {
		let rows = self.execute(&request, &[("select", "count")]).await?;
		let row = rows.into_iter().next().ok_or_else(|| {
			StoreError::InvalidResponse("count aggregate returned no rows".to_string())
		})?;
		row.get("count")
			.and_then(serde_json::Value::as_u64)
			.ok_or_else(|| {
				StoreError::InvalidResponse("count aggregate missing numeric count".to_string())
			})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn endpoint_joins_base_and_table() {
		let store = RestStore::new("https://store.example.edu/rest/v1/", "key");
		assert_eq!(
			store.endpoint("articles"),
			"https://store.example.edu/rest/v1/articles"
		);
	}

	#[test]
	fn query_request_is_value_comparable() {
		let a = QueryRequest {
			table: "articles".to_string(),
			params: vec![("id".to_string(), "eq.1".to_string())],
		};
		assert_eq!(a, a.clone());
	}
}
