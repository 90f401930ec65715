//! Renderable page tree.
//!
//! `Page` is the unified representation of server-rendered content: DOM
//! elements, text nodes, fragments, head-carrying views and reactive
//! closures. Pages render to HTML strings; there is no client-side DOM
//! layer in this workspace.
//!
//! ## Example
//!
//! ```ignore
//! use lyceum_core::page::{Page, PageElement, IntoPage};
//!
//! let view = PageElement::new("div")
//!     .attr("class", "container")
//!     .child("Hello, World!")
//!     .into_page();
//!
//! let html = view.render_to_string();
//! ```

pub mod head;
mod util;

pub use head::{Head, LinkTag, MetaTag};
pub(crate) use util::html_escape;

use std::borrow::Cow;

/// A view that re-renders when reactive dependencies change.
///
/// Holds a closure producing a fresh `Page`; each render call
/// re-evaluates it against the current reactive state.
pub struct Reactive {
	render: Box<dyn Fn() -> Page + 'static>,
}

impl Reactive {
	/// Evaluate the closure and return the current view.
	pub fn render(&self) -> Page {
		(self.render)()
	}
}

impl std::fmt::Debug for Reactive {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Reactive")
			.field("render", &"<closure>")
			.finish()
	}
}

/// A unified representation of renderable content.
#[derive(Debug)]
pub enum Page {
	/// A DOM element.
	Element(PageElement),
	/// A text node.
	Text(Cow<'static, str>),
	/// A fragment containing multiple views (no wrapper element).
	Fragment(Vec<Page>),
	/// An empty view (renders nothing).
	Empty,
	/// A view with an associated head section, collected during SSR.
	WithHead {
		/// The head section for this view.
		head: Head,
		/// The actual view content.
		view: Box<Page>,
	},
	/// A reactive view re-evaluated against current state on render.
	Reactive(Reactive),
}

/// A DOM element in the view tree.
pub struct PageElement {
	tag: Cow<'static, str>,
	attrs: Vec<(Cow<'static, str>, Cow<'static, str>)>,
	children: Vec<Page>,
	is_void: bool,
}

impl std::fmt::Debug for PageElement {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("PageElement")
			.field("tag", &self.tag)
			.field("attrs", &self.attrs)
			.field("children", &self.children)
			.field("is_void", &self.is_void)
			.finish()
	}
}

impl PageElement {
	/// Creates a new element view.
	pub fn new(tag: impl Into<Cow<'static, str>>) -> Self {
		let tag = tag.into();
		let is_void = matches!(
			tag.as_ref(),
			"area"
				| "base" | "br"
				| "col" | "embed"
				| "hr" | "img"
				| "input" | "link"
				| "meta" | "source"
				| "track" | "wbr"
		);
		Self {
			tag,
			attrs: Vec::new(),
			children: Vec::new(),
			is_void,
		}
	}

	/// Adds an attribute.
	pub fn attr(
		mut self,
		name: impl Into<Cow<'static, str>>,
		value: impl Into<Cow<'static, str>>,
	) -> Self {
		self.attrs.push((name.into(), value.into()));
		self
	}

	/// Adds a child view.
	pub fn child(mut self, child: impl IntoPage) -> Self {
		self.children.push(child.into_page());
		self
	}

	/// Adds multiple child views.
	pub fn children(mut self, children: impl IntoIterator<Item = impl IntoPage>) -> Self {
		self.children
			.extend(children.into_iter().map(|c| c.into_page()));
		self
	}

	/// Returns the tag name.
	pub fn tag_name(&self) -> &str {
		&self.tag
	}

	/// Returns the attributes.
	pub fn attrs(&self) -> &[(Cow<'static, str>, Cow<'static, str>)] {
		&self.attrs
	}

	/// Returns the child views.
	pub fn child_views(&self) -> &[Page] {
		&self.children
	}

	/// Returns whether this is a void element.
	pub fn is_void(&self) -> bool {
		self.is_void
	}
}

impl Page {
	/// Creates an element view.
	pub fn element(tag: impl Into<Cow<'static, str>>) -> PageElement {
		PageElement::new(tag)
	}

	/// Creates a text view.
	pub fn text(content: impl Into<Cow<'static, str>>) -> Self {
		Self::Text(content.into())
	}

	/// Creates a fragment view.
	pub fn fragment(children: impl IntoIterator<Item = impl IntoPage>) -> Self {
		Self::Fragment(children.into_iter().map(|c| c.into_page()).collect())
	}

	/// Creates an empty view.
	pub fn empty() -> Self {
		Self::Empty
	}

	/// Attaches a head section to this view.
	pub fn with_head(self, head: Head) -> Self {
		Page::WithHead {
			head,
			view: Box::new(self),
		}
	}

	/// Creates a reactive view re-evaluated on each render.
	///
	/// # Example
	///
	/// ```ignore
	/// let view = Page::reactive(move || match resource.state() {
	///     ResourceState::Loading => Page::text("Loading..."),
	///     other => render_other(other),
	/// });
	/// ```
	pub fn reactive<F>(render: F) -> Self
	where
		F: Fn() -> Page + 'static,
	{
		Page::Reactive(Reactive {
			render: Box::new(render),
		})
	}

	/// Finds the topmost head section in the view tree.
	///
	/// The outermost (page-level) head takes precedence over inner
	/// component heads; fragments are searched in order.
	pub fn find_topmost_head(&self) -> Option<&Head> {
		match self {
			Page::WithHead { head, .. } => Some(head),
			Page::Fragment(children) => children.iter().find_map(|v| v.find_topmost_head()),
			_ => None,
		}
	}

	/// Renders the view to an HTML string.
	pub fn render_to_string(&self) -> String {
		let mut output = String::new();
		self.render_to_string_inner(&mut output);
		output
	}

	fn render_to_string_inner(&self, output: &mut String) {
		match self {
			Page::Element(element) => {
				output.push('<');
				output.push_str(&element.tag);
				for (name, value) in &element.attrs {
					output.push(' ');
					output.push_str(name);
					output.push_str("=\"");
					output.push_str(&html_escape(value));
					output.push('"');
				}
				output.push('>');
				if !element.is_void {
					for child in &element.children {
						child.render_to_string_inner(output);
					}
					output.push_str("</");
					output.push_str(&element.tag);
					output.push('>');
				}
			}
			Page::Text(text) => output.push_str(&html_escape(text)),
			Page::Fragment(children) => {
				for child in children {
					child.render_to_string_inner(output);
				}
			}
			Page::Empty => {}
			Page::WithHead { view, .. } => view.render_to_string_inner(output),
			Page::Reactive(reactive) => reactive.render().render_to_string_inner(output),
		}
	}
}

/// Conversion into a renderable [`Page`].
pub trait IntoPage {
	/// Convert `self` into a `Page`.
	fn into_page(self) -> Page;
}

impl IntoPage for Page {
	fn into_page(self) -> Page {
		self
	}
}

impl IntoPage for PageElement {
	fn into_page(self) -> Page {
		Page::Element(self)
	}
}

impl IntoPage for &'static str {
	fn into_page(self) -> Page {
		Page::Text(Cow::Borrowed(self))
	}
}

impl IntoPage for String {
	fn into_page(self) -> Page {
		Page::Text(Cow::Owned(self))
	}
}

impl<F> IntoPage for F
where
	F: Fn() -> Page + 'static,
{
	fn into_page(self) -> Page {
		Page::reactive(self)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn renders_nested_elements() {
		let view = PageElement::new("div")
			.attr("class", "container")
			.child(PageElement::new("p").child("Hello").into_page())
			.into_page();

		assert_eq!(
			view.render_to_string(),
			"<div class=\"container\"><p>Hello</p></div>"
		);
	}

	#[test]
	fn void_elements_have_no_closing_tag() {
		let view = PageElement::new("meta")
			.attr("name", "description")
			.into_page();
		assert_eq!(view.render_to_string(), "<meta name=\"description\">");
	}

	#[test]
	fn text_content_is_escaped() {
		let view = Page::text("<b>bold</b>");
		assert_eq!(view.render_to_string(), "&lt;b&gt;bold&lt;/b&gt;");
	}

	#[test]
	fn fragment_renders_children_in_order() {
		let view = Page::fragment(vec![Page::text("a"), Page::text("b")]);
		assert_eq!(view.render_to_string(), "ab");
	}

	#[test]
	fn empty_renders_nothing() {
		assert_eq!(Page::empty().render_to_string(), "");
	}

	#[test]
	fn with_head_exposes_the_head_and_renders_the_view() {
		let view = Page::text("body").with_head(Head::new().title("T"));
		assert_eq!(view.render_to_string(), "body");
		assert_eq!(
			view.find_topmost_head().and_then(|h| h.title_text()),
			Some("T")
		);
	}

	#[test]
	fn topmost_head_wins_inside_fragments() {
		let inner = Page::text("inner").with_head(Head::new().title("inner"));
		let view = Page::fragment(vec![
			Page::text("lead").with_head(Head::new().title("outer")),
			inner,
		]);
		assert_eq!(
			view.find_topmost_head().and_then(|h| h.title_text()),
			Some("outer")
		);
	}

	#[test]
	fn reactive_views_reevaluate_on_each_render() {
		use crate::reactive::Signal;

		let label = Signal::new("first".to_string());
		let label_in_view = label.clone();
		let view = Page::reactive(move || Page::text(label_in_view.get()));

		assert_eq!(view.render_to_string(), "first");
		label.set("second".to_string());
		assert_eq!(view.render_to_string(), "second");
	}
}
