//! Document head description.
//!
//! [`Head`] models the metadata a page wants in the HTML `<head>`:
//! title, meta tags and link tags. Pages declare a `Head`; the document
//! metadata sink applies it with upsert-by-selector semantics, so
//! applying the same head twice is a no-op.

use super::util::html_escape;

/// A `<meta name=... content=...>` tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaTag {
	/// The `name` attribute, also the upsert selector.
	pub name: String,
	/// The `content` attribute.
	pub content: String,
}

/// A `<link rel=... href=...>` tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkTag {
	/// The `rel` attribute, also the upsert selector.
	pub rel: String,
	/// The `href` attribute.
	pub href: String,
}

/// Metadata destined for the HTML `<head>` element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Head {
	title: Option<String>,
	metas: Vec<MetaTag>,
	links: Vec<LinkTag>,
}

impl Head {
	/// Create an empty head section.
	pub fn new() -> Self {
		Self::default()
	}

	/// Set the document title.
	pub fn title(mut self, title: impl Into<String>) -> Self {
		self.title = Some(title.into());
		self
	}

	/// Add a meta tag.
	pub fn meta(mut self, name: impl Into<String>, content: impl Into<String>) -> Self {
		self.metas.push(MetaTag {
			name: name.into(),
			content: content.into(),
		});
		self
	}

	/// Add a link tag.
	pub fn link(mut self, rel: impl Into<String>, href: impl Into<String>) -> Self {
		self.links.push(LinkTag {
			rel: rel.into(),
			href: href.into(),
		});
		self
	}

	/// The current title, if set.
	pub fn title_text(&self) -> Option<&str> {
		self.title.as_deref()
	}

	/// The meta tags in declaration order.
	pub fn metas(&self) -> &[MetaTag] {
		&self.metas
	}

	/// The link tags in declaration order.
	pub fn links(&self) -> &[LinkTag] {
		&self.links
	}

	/// Look up a meta tag by its `name` selector.
	pub fn meta_content(&self, name: &str) -> Option<&str> {
		self.metas
			.iter()
			.find(|tag| tag.name == name)
			.map(|tag| tag.content.as_str())
	}

	/// Look up a link tag by its `rel` selector.
	pub fn link_href(&self, rel: &str) -> Option<&str> {
		self.links
			.iter()
			.find(|tag| tag.rel == rel)
			.map(|tag| tag.href.as_str())
	}

	/// Merge `other` into `self` with upsert-by-selector semantics.
	///
	/// The title is replaced when `other` sets one; meta tags are matched
	/// by `name` and link tags by `rel` - an existing tag is updated in
	/// place, a new one is appended. Merging the same head twice leaves
	/// the result unchanged.
	pub fn merge(&mut self, other: &Head) {
		if let Some(title) = &other.title {
			self.title = Some(title.clone());
		}
		for incoming in &other.metas {
			match self.metas.iter_mut().find(|tag| tag.name == incoming.name) {
				Some(existing) => existing.content = incoming.content.clone(),
				None => self.metas.push(incoming.clone()),
			}
		}
		for incoming in &other.links {
			match self.links.iter_mut().find(|tag| tag.rel == incoming.rel) {
				Some(existing) => existing.href = incoming.href.clone(),
				None => self.links.push(incoming.clone()),
			}
		}
	}

	/// Render the head section to HTML (the inner content of `<head>`).
	pub fn render_to_string(&self) -> String {
		let mut output = String::new();
		if let Some(title) = &self.title {
			output.push_str("<title>");
			output.push_str(&html_escape(title));
			output.push_str("</title>");
		}
		for tag in &self.metas {
			output.push_str(&format!(
				"<meta name=\"{}\" content=\"{}\">",
				html_escape(&tag.name),
				html_escape(&tag.content)
			));
		}
		for tag in &self.links {
			output.push_str(&format!(
				"<link rel=\"{}\" href=\"{}\">",
				html_escape(&tag.rel),
				html_escape(&tag.href)
			));
		}
		output
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn builder_collects_tags() {
		let head = Head::new()
			.title("Welcome")
			.meta("description", "A school site")
			.link("canonical", "https://example.edu/");

		assert_eq!(head.title_text(), Some("Welcome"));
		assert_eq!(head.meta_content("description"), Some("A school site"));
		assert_eq!(head.link_href("canonical"), Some("https://example.edu/"));
	}

	#[test]
	fn merge_updates_existing_selectors() {
		let mut head = Head::new().title("Old").meta("description", "old text");
		head.merge(&Head::new().title("New").meta("description", "new text"));

		assert_eq!(head.title_text(), Some("New"));
		assert_eq!(head.meta_content("description"), Some("new text"));
		assert_eq!(head.metas().len(), 1);
	}

	#[test]
	fn merge_is_idempotent() {
		let incoming = Head::new()
			.title("T")
			.meta("description", "d")
			.link("canonical", "https://example.edu/a");

		let mut head = Head::new();
		head.merge(&incoming);
		let once = head.clone();
		head.merge(&incoming);
		assert_eq!(head, once);
	}

	#[test]
	fn merge_keeps_unrelated_tags() {
		let mut head = Head::new().meta("description", "d").meta("robots", "index");
		head.merge(&Head::new().meta("description", "updated"));

		assert_eq!(head.meta_content("robots"), Some("index"));
		assert_eq!(head.metas().len(), 2);
	}

	#[test]
	fn renders_escaped_html() {
		let head = Head::new().title("A & B").meta("description", "<desc>");
		let html = head.render_to_string();
		assert!(html.contains("<title>A &amp; B</title>"));
		assert!(html.contains("content=\"&lt;desc&gt;\""));
	}
}
