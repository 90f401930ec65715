//! Shared view fragments.
//!
//! One function per affordance; every page renders exactly one of these
//! for its current lifecycle state. "Not found" and "failed" are
//! deliberately distinct views.

use lyceum_core::page::{IntoPage, Page, PageElement};

use crate::article::Article;

/// The loading affordance, shown from activation until resolution.
pub fn loading_view() -> Page {
	PageElement::new("div")
		.attr("class", "loading")
		.attr("role", "status")
		.child("Loading...")
		.into_page()
}

/// The not-found affordance for an empty fetch outcome.
pub fn not_found_view() -> Page {
	PageElement::new("div")
		.attr("class", "not-found")
		.child(PageElement::new("h1").child("Article not found").into_page())
		.child(
			PageElement::new("p")
				.child("The article you are looking for does not exist or is not published.")
				.into_page(),
		)
		.into_page()
}

/// The generic failure affordance for a failed fetch.
pub fn failure_view() -> Page {
	PageElement::new("div")
		.attr("class", "error")
		.child(PageElement::new("h1").child("Something went wrong").into_page())
		.child(
			PageElement::new("p")
				.child("The page could not be loaded. Please try again later.")
				.into_page(),
		)
		.into_page()
}

/// A full article.
pub fn article_view(article: &Article, paragraphs: Vec<String>, published_on: String) -> Page {
	PageElement::new("article")
		.attr("class", "article")
		.child(PageElement::new("h1").child(article.title.clone()).into_page())
		.child(
			PageElement::new("time")
				.attr("class", "published")
				.child(published_on)
				.into_page(),
		)
		.children(
			paragraphs
				.into_iter()
				.map(|paragraph| PageElement::new("p").child(paragraph).into_page()),
		)
		.into_page()
}

/// The home page body once the article count is known.
pub fn home_view(site_name: &str, article_count: u64) -> Page {
	let summary = if article_count == 1 {
		"1 article published".to_string()
	} else {
		format!("{article_count} articles published")
	};
	PageElement::new("section")
		.attr("class", "home")
		.child(PageElement::new("h1").child(site_name.to_string()).into_page())
		.child(
			PageElement::new("p")
				.attr("class", "article-count")
				.child(summary)
				.into_page(),
		)
		.into_page()
}

/// The home page body when nothing is published yet.
pub fn home_empty_view(site_name: &str) -> Page {
	PageElement::new("section")
		.attr("class", "home")
		.child(PageElement::new("h1").child(site_name.to_string()).into_page())
		.child(
			PageElement::new("p")
				.attr("class", "article-count")
				.child("No articles published yet.")
				.into_page(),
		)
		.into_page()
}

/// The admin login form, with an optional error line.
pub fn login_form_view(error_message: Option<String>) -> Page {
	let mut form = PageElement::new("form")
		.attr("class", "login")
		.attr("method", "post")
		.attr("action", "/admin/login");
	if let Some(message) = error_message {
		form = form.child(
			PageElement::new("p")
				.attr("class", "login-error")
				.child(message)
				.into_page(),
		);
	}
	form.child(
		PageElement::new("input")
			.attr("type", "email")
			.attr("name", "email")
			.attr("placeholder", "Email")
			.into_page(),
	)
	.child(
		PageElement::new("input")
			.attr("type", "password")
			.attr("name", "password")
			.attr("placeholder", "Password")
			.into_page(),
	)
	.child(
		PageElement::new("button")
			.attr("type", "submit")
			.child("Sign in")
			.into_page(),
	)
	.into_page()
}

/// The signing-in affordance while credentials are being verified.
pub fn signing_in_view() -> Page {
	PageElement::new("div")
		.attr("class", "loading")
		.attr("role", "status")
		.child("Signing in...")
		.into_page()
}

/// The admin landing view after a successful login.
pub fn admin_welcome_view(email: &str) -> Page {
	PageElement::new("section")
		.attr("class", "admin")
		.child(PageElement::new("h1").child("Admin").into_page())
		.child(
			PageElement::new("p")
				.child(format!("Signed in as {email}"))
				.into_page(),
		)
		.into_page()
}
