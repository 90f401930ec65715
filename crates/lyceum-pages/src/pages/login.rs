//! The admin login page.
//!
//! Authentication is a write-type request with the same shape as a
//! resource fetch, so it runs through the same binder: `Loading` while
//! the provider verifies credentials, `Ready(Session)` on success,
//! `Failed` on rejection or transport trouble. `Empty` is unreachable
//! for this resource - a session is either issued or the attempt
//! failed.

use lyceum_core::page::Page;
use lyceum_client::{AuthError, Credentials, IdentityProvider, Session};
use lyceum_resource::{Resource, ResourceRequest, ResourceState};
use std::rc::Rc;

use crate::views;

/// The mounted login page.
pub struct LoginPage {
	provider: Rc<dyn IdentityProvider>,
	resource: Resource<Session, AuthError>,
}

impl LoginPage {
	/// Mounts the page. No request is issued until
	/// [`submit`](Self::submit).
	pub fn mount(provider: Rc<dyn IdentityProvider>) -> Self {
		Self {
			provider,
			resource: Resource::new(),
		}
	}

	/// Submits credentials to the identity provider.
	///
	/// Resubmitting supersedes an attempt still in flight, exactly like
	/// a key change on a record page.
	pub fn submit(&self, credentials: Credentials) {
		let provider = Rc::clone(&self.provider);
		self.resource.reactivate(ResourceRequest::aggregate(move || {
			let provider = Rc::clone(&provider);
			let credentials = credentials.clone();
			async move { provider.authenticate(&credentials).await.map(Some) }
		}));
	}

	/// The issued session, once signed in.
	pub fn session(&self) -> Option<Rc<Session>> {
		self.resource.state().record()
	}

	/// Unmounts the page; a late provider response is discarded.
	pub fn unmount(&self) {
		self.resource.deactivate();
	}

	/// The page body, re-rendered per lifecycle state.
	///
	/// A rejection renders its fixed user-facing message inside the
	/// form; provider-internal detail never reaches this view.
	pub fn view(&self) -> Page {
		let resource = self.resource.clone();
		Page::reactive(move || match resource.state() {
			ResourceState::Idle | ResourceState::Empty => views::login_form_view(None),
			ResourceState::Loading => views::signing_in_view(),
			ResourceState::Failed(error) => views::login_form_view(Some(error.to_string())),
			ResourceState::Ready(session) => views::admin_welcome_view(&session.user.email),
		})
	}
}
