//! Article model, fetch requests and derived views.
//!
//! The derived view functions are pure over an [`Article`]; pages feed
//! them through `Resource::derive_view` so they recompute only when the
//! underlying record changes.

use chrono::{DateTime, Utc};
use lyceum_client::{RemoteStore, StoreError, StoreQuery};
use lyceum_resource::ResourceRequest;
use serde::{Deserialize, Serialize};
use std::rc::Rc;

use crate::dateformat;

/// The columns every article query selects.
const ARTICLE_COLUMNS: [&str; 4] = ["id", "title", "content", "published_at"];

/// One article row from the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
	/// Row id, also the public URL segment.
	pub id: String,
	/// Article title.
	pub title: String,
	/// Body text; newline-separated paragraphs.
	pub content: String,
	/// Publication timestamp.
	pub published_at: DateTime<Utc>,
}

/// Non-empty paragraphs of the article body, in order.
pub fn paragraphs(article: &Article) -> Vec<String> {
	article
		.content
		.lines()
		.filter(|line| !line.trim().is_empty())
		.map(str::to_string)
		.collect()
}

/// The publication date as a long-form date ("January 5, 2025").
pub fn published_on(article: &Article) -> String {
	dateformat::format(&article.published_at, "F j, Y")
}

/// A single-line description for meta tags: the first paragraph,
/// clipped to `max_chars`.
pub fn excerpt(article: &Article, max_chars: usize) -> String {
	let first = article
		.content
		.lines()
		.find(|line| !line.trim().is_empty())
		.unwrap_or("")
		.trim();
	if first.chars().count() <= max_chars {
		return first.to_string();
	}
	let clipped: String = first.chars().take(max_chars.saturating_sub(1)).collect();
	format!("{}\u{2026}", clipped.trim_end())
}

/// Fetch request for one published article by id.
pub fn article_request(
	store: Rc<dyn RemoteStore>,
	article_id: impl Into<String>,
) -> ResourceRequest<Article, StoreError> {
	ResourceRequest::new(article_id.into(), move |id: String| {
		let store = Rc::clone(&store);
		async move {
			StoreQuery::<Article>::new("articles")
				.select(&ARTICLE_COLUMNS)
				.filter("id", id)
				.filter("published", true)
				.limit(1)
				.fetch_one(store.as_ref())
				.await
		}
	})
}

/// Aggregate request counting the published articles.
///
/// A count of zero resolves to the empty outcome so the home page can
/// show its "nothing published yet" affordance.
pub fn published_count_request(store: Rc<dyn RemoteStore>) -> ResourceRequest<u64, StoreError> {
	ResourceRequest::aggregate(move || {
		let store = Rc::clone(&store);
		async move {
			let count = StoreQuery::<serde_json::Value>::new("articles")
				.filter("published", true)
				.count(store.as_ref())
				.await?;
			Ok((count > 0).then_some(count))
		}
	})
}
