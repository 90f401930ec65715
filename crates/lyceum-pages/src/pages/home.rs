//! The public home page.
//!
//! Loads a single aggregate (the published-article count) through the
//! same lifecycle as the record pages. A count of zero is the empty
//! outcome, not a failure.

use lyceum_conf::Settings;
use lyceum_core::page::{Head, Page};
use lyceum_core::reactive::Effect;
use lyceum_client::{RemoteStore, StoreError};
use lyceum_resource::{Resource, ResourceState};
use std::rc::Rc;

use crate::article;
use crate::meta::MetadataSink;
use crate::views;

/// The mounted home page.
pub struct HomePage {
	resource: Resource<u64, StoreError>,
	site_name: String,
	_metadata_effect: Effect,
}

impl HomePage {
	/// Mounts the page and starts the aggregate fetch.
	pub fn mount(
		store: Rc<dyn RemoteStore>,
		metadata: Rc<dyn MetadataSink>,
		settings: &Settings,
	) -> Self {
		let resource: Resource<u64, StoreError> = Resource::new();
		resource.activate(article::published_count_request(store));

		let base_title = settings.site.base_title.clone();
		let site_name = settings.site.name.clone();
		let canonical_base = settings.site.canonical_base.clone();
		let metadata_effect = resource.on_ready({
			let site_name = site_name.clone();
			move |_count: &u64| {
				let head = Head::new()
					.title(base_title.clone())
					.meta("description", format!("News and articles from {site_name}"))
					.link("canonical", format!("{canonical_base}/"));
				metadata.apply(&head)
			}
		});

		Self {
			resource,
			site_name,
			_metadata_effect: metadata_effect,
		}
	}

	/// Unmounts the page; late fetch completions are discarded.
	pub fn unmount(&self) {
		self.resource.deactivate();
	}

	/// The page body, re-rendered per lifecycle state.
	pub fn view(&self) -> Page {
		let resource = self.resource.clone();
		let site_name = self.site_name.clone();
		Page::reactive(move || match resource.state() {
			ResourceState::Idle | ResourceState::Loading => views::loading_view(),
			ResourceState::Empty => views::home_empty_view(&site_name),
			ResourceState::Failed(_) => views::failure_view(),
			ResourceState::Ready(count) => views::home_view(&site_name, *count),
		})
	}
}
