//! # Lyceum
//!
//! A school informational site built around one reusable engineering
//! core: the async resource binder. Every page that loads remote data
//! shares the same lifecycle - a mount-guarded fetch published as
//! loading/ready/empty/failed state, memoized derived views, and
//! best-effort document metadata side effects.
//!
//! The workspace is consumed through this facade crate:
//!
//! - [`core`]: reactive primitives (Signal, Effect, Memo) and the
//!   renderable page tree.
//! - [`resource`]: the async resource binder.
//! - [`client`]: clients for the hosted data store and identity
//!   provider.
//! - [`conf`]: site settings.
//! - [`pages`]: the site pages themselves.
//!
//! ## Feature Flags
//!
//! - `minimal` - the reactive/resource core only
//! - `standard` (default) - core plus the remote-service clients and
//!   settings
//! - `full` - everything, including the site pages
//!
//! ## Example
//!
//! ```ignore
//! use lyceum::client::RestStore;
//! use lyceum::conf::Settings;
//! use lyceum::pages::ArticlePage;
//! use lyceum::pages::DocumentMetadata;
//! use std::rc::Rc;
//!
//! let settings = Settings::load("lyceum.toml")?;
//! let store = Rc::new(RestStore::new(
//!     settings.store.url.clone(),
//!     settings.store.api_key.clone(),
//! ));
//! let document = Rc::new(DocumentMetadata::new());
//!
//! let page = ArticlePage::mount(store, document, &settings, "42");
//! let html = page.view().render_to_string();
//! ```

#![warn(missing_docs)]

#[cfg(feature = "core")]
pub use lyceum_core as core;

#[cfg(feature = "resource")]
pub use lyceum_resource as resource;

#[cfg(feature = "client")]
pub use lyceum_client as client;

#[cfg(feature = "conf")]
pub use lyceum_conf as conf;

#[cfg(feature = "pages")]
pub use lyceum_pages as pages;

#[cfg(feature = "resource")]
pub use lyceum_resource::{Resource, ResourceRequest, ResourceState};

#[cfg(feature = "core")]
pub use lyceum_core::{Effect, Memo, Signal};
