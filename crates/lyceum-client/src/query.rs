//! QuerySet-style builder for data store queries.
//!
//! [`StoreQuery`] provides a fluent interface for building single-row
//! and aggregate queries against the hosted store's REST surface, where
//! filters are encoded as `column=op.value` query parameters.
//!
//! The builder never talks to the network itself: execution goes
//! through an explicitly injected [`RemoteStore`](crate::RemoteStore)
//! value.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;

use crate::error::StoreError;
use crate::store::{QueryRequest, RemoteStore};

/// Filter operation types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterOp {
	/// Exact match (column = value).
	#[default]
	Eq,
	/// Not equal.
	Neq,
	/// Greater than.
	Gt,
	/// Greater than or equal.
	Gte,
	/// Less than.
	Lt,
	/// Less than or equal.
	Lte,
	/// Pattern match (case-sensitive).
	Like,
	/// Pattern match (case-insensitive).
	ILike,
	/// Identity check (null / true / false).
	Is,
	/// Membership in a list of values.
	In,
}

impl FilterOp {
	fn as_str(self) -> &'static str {
		match self {
			FilterOp::Eq => "eq",
			FilterOp::Neq => "neq",
			FilterOp::Gt => "gt",
			FilterOp::Gte => "gte",
			FilterOp::Lt => "lt",
			FilterOp::Lte => "lte",
			FilterOp::Like => "like",
			FilterOp::ILike => "ilike",
			FilterOp::Is => "is",
			FilterOp::In => "in",
		}
	}
}

/// A single filter condition.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
	/// The column to filter on.
	pub column: String,
	/// The filter operation.
	pub op: FilterOp,
	/// The value to filter with.
	pub value: serde_json::Value,
}

impl Filter {
	/// Creates an exact match filter.
	pub fn eq(column: impl Into<String>, value: impl Serialize) -> Self {
		Self::with_op(column, FilterOp::Eq, value)
	}

	/// Creates a filter with a specific operation.
	pub fn with_op(column: impl Into<String>, op: FilterOp, value: impl Serialize) -> Self {
		Self {
			column: column.into(),
			op,
			value: serde_json::to_value(value).unwrap_or(serde_json::Value::Null),
		}
	}

	/// Converts the filter to a query parameter pair.
	pub fn to_query_param(&self) -> (String, String) {
		let rendered = match &self.value {
			serde_json::Value::String(s) => s.clone(),
			serde_json::Value::Array(items) => {
				let joined = items
					.iter()
					.map(|item| match item {
						serde_json::Value::String(s) => s.clone(),
						other => other.to_string(),
					})
					.collect::<Vec<_>>()
					.join(",");
				format!("({joined})")
			}
			serde_json::Value::Null => "null".to_string(),
			other => other.to_string(),
		};
		(
			self.column.clone(),
			format!("{}.{}", self.op.as_str(), rendered),
		)
	}
}

/// A query builder for one table of the remote store.
///
/// The type parameter is the row type the query deserializes into;
/// aggregate execution ignores it.
///
/// # Example
///
/// ```ignore
/// let article = StoreQuery::<Article>::new("articles")
///     .select(&["id", "title", "content", "published_at"])
///     .filter("id", id)
///     .limit(1)
///     .fetch_one(store.as_ref())
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct StoreQuery<T> {
	table: String,
	filters: Vec<Filter>,
	select: Vec<String>,
	order: Vec<String>,
	limit: Option<usize>,
	_marker: PhantomData<T>,
}

impl<T> StoreQuery<T> {
	/// Creates a new query against `table`.
	pub fn new(table: impl Into<String>) -> Self {
		Self {
			table: table.into(),
			filters: Vec::new(),
			select: Vec::new(),
			order: Vec::new(),
			limit: None,
			_marker: PhantomData,
		}
	}

	/// Adds an exact match filter.
	pub fn filter(mut self, column: impl Into<String>, value: impl Serialize) -> Self {
		self.filters.push(Filter::eq(column, value));
		self
	}

	/// Adds a filter with a specific operation.
	pub fn filter_op(
		mut self,
		column: impl Into<String>,
		op: FilterOp,
		value: impl Serialize,
	) -> Self {
		self.filters.push(Filter::with_op(column, op, value));
		self
	}

	/// Selects the columns to return.
	pub fn select(mut self, columns: &[&str]) -> Self {
		self.select = columns.iter().map(|s| (*s).to_string()).collect();
		self
	}

	/// Sets the ordering. Prefix a column with '-' for descending.
	pub fn order_by(mut self, columns: &[&str]) -> Self {
		self.order = columns
			.iter()
			.map(|column| match column.strip_prefix('-') {
				Some(name) => format!("{name}.desc"),
				None => format!("{column}.asc"),
			})
			.collect();
		self
	}

	/// Limits the number of rows.
	pub fn limit(mut self, n: usize) -> Self {
		self.limit = Some(n);
		self
	}

	/// The table this query targets.
	pub fn table(&self) -> &str {
		&self.table
	}

	/// Builds the query parameters in a stable order.
	pub fn query_params(&self) -> Vec<(String, String)> {
		let mut params: Vec<(String, String)> = Vec::new();
		if !self.select.is_empty() {
			params.push(("select".to_string(), self.select.join(",")));
		}
		for filter in &self.filters {
			params.push(filter.to_query_param());
		}
		if !self.order.is_empty() {
			params.push(("order".to_string(), self.order.join(",")));
		}
		if let Some(limit) = self.limit {
			params.push(("limit".to_string(), limit.to_string()));
		}
		params
	}

	/// Builds the full request URL against `base`, with encoded values.
	pub fn build_url(&self, base: &str) -> String {
		let mut url = format!("{}/{}", base.trim_end_matches('/'), self.table);
		let params = self.query_params();
		if !params.is_empty() {
			let encoded = params
				.iter()
				.map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
				.collect::<Vec<_>>()
				.join("&");
			url.push('?');
			url.push_str(&encoded);
		}
		url
	}

	/// Lowers the builder to an untyped request for a [`RemoteStore`].
	pub fn to_request(&self) -> QueryRequest {
		QueryRequest {
			table: self.table.clone(),
			params: self.query_params(),
		}
	}
}

impl<T: DeserializeOwned> StoreQuery<T> {
	/// Fetches at most one row and deserializes it.
	///
	/// `Ok(None)` means the query matched nothing - callers map that to
	/// their own "not found" outcome rather than treating it as an
	/// error.
	pub async fn fetch_one(&self, store: &dyn RemoteStore) -> Result<Option<T>, StoreError> {
		match store.fetch_one(self.to_request()).await? {
			Some(row) => Ok(Some(serde_json::from_value(row)?)),
			None => Ok(None),
		}
	}

	/// Counts the rows matching the query's filters.
	pub async fn count(&self, store: &dyn RemoteStore) -> Result<u64, StoreError> {
		store.count(self.to_request()).await
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(Filter::eq("id", "42"), ("id", "eq.42"))]
	#[case(Filter::with_op("age", FilterOp::Gte, 18), ("age", "gte.18"))]
	#[case(Filter::with_op("status", FilterOp::Neq, "draft"), ("status", "neq.draft"))]
	#[case(Filter::with_op("deleted_at", FilterOp::Is, ()), ("deleted_at", "is.null"))]
	#[case(
		Filter::with_op("id", FilterOp::In, vec!["a", "b"]),
		("id", "in.(a,b)")
	)]
	fn filters_render_store_operators(
		#[case] filter: Filter,
		#[case] expected: (&str, &str),
	) {
		let (key, value) = filter.to_query_param();
		assert_eq!((key.as_str(), value.as_str()), expected);
	}

	#[test]
	fn query_params_keep_a_stable_order() {
		let query = StoreQuery::<serde_json::Value>::new("articles")
			.select(&["id", "title"])
			.filter("id", "42")
			.order_by(&["-published_at", "title"])
			.limit(1);

		assert_eq!(
			query.query_params(),
			vec![
				("select".to_string(), "id,title".to_string()),
				("id".to_string(), "eq.42".to_string()),
				(
					"order".to_string(),
					"published_at.desc,title.asc".to_string()
				),
				("limit".to_string(), "1".to_string()),
			]
		);
	}

	#[test]
	fn build_url_encodes_values() {
		let query = StoreQuery::<serde_json::Value>::new("articles")
			.filter("title", "a b&c");
		let url = query.build_url("https://store.example.edu/rest/v1/");
		assert_eq!(
			url,
			"https://store.example.edu/rest/v1/articles?title=eq.a%20b%26c"
		);
	}

	#[test]
	fn bare_query_has_no_parameters() {
		let query = StoreQuery::<serde_json::Value>::new("articles");
		assert_eq!(
			query.build_url("https://store.example.edu"),
			"https://store.example.edu/articles"
		);
	}
}
