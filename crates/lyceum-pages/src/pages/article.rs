//! The public article reading page.

use lyceum_conf::Settings;
use lyceum_core::page::{Head, Page};
use lyceum_core::reactive::{Effect, Memo};
use lyceum_client::{RemoteStore, StoreError};
use lyceum_resource::{Resource, ResourceState};
use std::rc::Rc;

use crate::article::{self, Article};
use crate::meta::MetadataSink;
use crate::views;

/// One mounted article page: a binder for the article record, memoized
/// derived views, and the document-metadata side effect.
pub struct ArticlePage {
	store: Rc<dyn RemoteStore>,
	resource: Resource<Article, StoreError>,
	paragraphs: Memo<Option<Vec<String>>>,
	published_on: Memo<Option<String>>,
	_metadata_effect: Effect,
}

impl ArticlePage {
	/// Mounts the page and starts fetching `article_id`.
	///
	/// The metadata side effect upserts the page title, description and
	/// canonical link once per loaded article; a failing sink is logged
	/// and ignored.
	pub fn mount(
		store: Rc<dyn RemoteStore>,
		metadata: Rc<dyn MetadataSink>,
		settings: &Settings,
		article_id: impl Into<String>,
	) -> Self {
		let resource: Resource<Article, StoreError> = Resource::new();
		resource.activate(article::article_request(Rc::clone(&store), article_id));

		let paragraphs = resource.derive_view(article::paragraphs);
		let published_on = resource.derive_view(article::published_on);

		let base_title = settings.site.base_title.clone();
		let canonical_base = settings.site.canonical_base.clone();
		let metadata_effect = resource.on_ready(move |article: &Article| {
			let head = Head::new()
				.title(format!("{} | {}", article.title, base_title))
				.meta("description", article::excerpt(article, 160))
				.link(
					"canonical",
					format!("{}/articles/{}", canonical_base, article.id),
				);
			metadata.apply(&head)
		});

		Self {
			store,
			resource,
			paragraphs,
			published_on,
			_metadata_effect: metadata_effect,
		}
	}

	/// Navigates to another article without remounting.
	///
	/// Supersedes any fetch still in flight; only the newest navigation
	/// can ever publish a terminal state.
	pub fn navigate(&self, article_id: impl Into<String>) {
		self.resource
			.reactivate(article::article_request(Rc::clone(&self.store), article_id));
	}

	/// Unmounts the page; late fetch completions are discarded.
	pub fn unmount(&self) {
		self.resource.deactivate();
	}

	/// The current lifecycle state.
	pub fn state(&self) -> ResourceState<Article, StoreError> {
		self.resource.state()
	}

	/// The page body, re-rendered per lifecycle state.
	pub fn view(&self) -> Page {
		let resource = self.resource.clone();
		let paragraphs = self.paragraphs.clone();
		let published_on = self.published_on.clone();
		Page::reactive(move || match resource.state() {
			ResourceState::Idle | ResourceState::Loading => views::loading_view(),
			ResourceState::Empty => views::not_found_view(),
			ResourceState::Failed(_) => views::failure_view(),
			ResourceState::Ready(article) => views::article_view(
				&article,
				paragraphs.get().unwrap_or_default(),
				published_on.get().unwrap_or_default(),
			),
		})
	}
}
