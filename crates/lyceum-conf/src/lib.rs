//! # Lyceum Conf
//!
//! Typed settings for the site: identity of the site itself plus the
//! endpoints and keys of the two hosted collaborators (data store,
//! identity provider).
//!
//! Settings load from a TOML file and/or environment variables, with
//! the environment taking precedence. Nothing here is global: the
//! composition root loads a [`Settings`] value once and passes it down.
//!
//! ## Environment variables
//!
//! | Variable | Field |
//! |----------|-------|
//! | `LYCEUM_SITE_NAME` | `site.name` |
//! | `LYCEUM_BASE_TITLE` | `site.base_title` |
//! | `LYCEUM_CANONICAL_BASE` | `site.canonical_base` |
//! | `LYCEUM_STORE_URL` | `store.url` |
//! | `LYCEUM_STORE_API_KEY` | `store.api_key` |
//! | `LYCEUM_AUTH_URL` | `auth.url` |

#![warn(missing_docs)]

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading settings.
#[derive(Debug, Error)]
pub enum SettingsError {
	/// A required value is missing from both file and environment.
	#[error("Missing setting: {0}")]
	Missing(&'static str),

	/// The settings file could not be read.
	#[error("Cannot read settings file: {0}")]
	Io(#[from] std::io::Error),

	/// The settings file is not valid TOML.
	#[error("Cannot parse settings file: {0}")]
	Parse(#[from] toml::de::Error),
}

/// Identity of the site itself.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SiteSettings {
	/// Human-readable site name.
	pub name: String,
	/// Suffix appended to page titles.
	pub base_title: String,
	/// Base URL for canonical links.
	pub canonical_base: String,
}

/// Endpoint and key of the hosted data store.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StoreSettings {
	/// REST endpoint of the store.
	pub url: String,
	/// Application API key.
	pub api_key: String,
}

/// Endpoint of the identity provider.
///
/// The provider shares the store's API key.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthSettings {
	/// Auth endpoint of the provider.
	pub url: String,
}

/// The complete site configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
	/// Site identity.
	pub site: SiteSettings,
	/// Data store access.
	pub store: StoreSettings,
	/// Identity provider access.
	pub auth: AuthSettings,
}

/// Partial settings as they appear in a TOML file; every field is
/// optional so the environment can fill the gaps.
#[derive(Debug, Clone, Default, Deserialize)]
struct RawSettings {
	#[serde(default)]
	site: RawSite,
	#[serde(default)]
	store: RawStore,
	#[serde(default)]
	auth: RawAuth,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RawSite {
	name: Option<String>,
	base_title: Option<String>,
	canonical_base: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RawStore {
	url: Option<String>,
	api_key: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RawAuth {
	url: Option<String>,
}

fn env_var(name: &str) -> Option<String> {
	std::env::var(name).ok().filter(|value| !value.is_empty())
}

fn resolve(
	env_name: &str,
	file_value: Option<String>,
	field: &'static str,
) -> Result<String, SettingsError> {
	env_var(env_name)
		.or(file_value)
		.ok_or(SettingsError::Missing(field))
}

impl Settings {
	/// Loads settings from the environment only.
	pub fn from_env() -> Result<Self, SettingsError> {
		Self::resolve_with(RawSettings::default())
	}

	/// Loads settings from a TOML file, with environment overrides.
	pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
		let raw = toml::from_str::<RawSettings>(&std::fs::read_to_string(path)?)?;
		Self::resolve_with(raw)
	}

	/// Parses settings from a TOML string, with environment overrides.
	pub fn from_toml_str(content: &str) -> Result<Self, SettingsError> {
		Self::resolve_with(toml::from_str::<RawSettings>(content)?)
	}

	fn resolve_with(raw: RawSettings) -> Result<Self, SettingsError> {
		Ok(Self {
			site: SiteSettings {
				name: resolve("LYCEUM_SITE_NAME", raw.site.name, "site.name")?,
				base_title: resolve("LYCEUM_BASE_TITLE", raw.site.base_title, "site.base_title")?,
				canonical_base: resolve(
					"LYCEUM_CANONICAL_BASE",
					raw.site.canonical_base,
					"site.canonical_base",
				)?,
			},
			store: StoreSettings {
				url: resolve("LYCEUM_STORE_URL", raw.store.url, "store.url")?,
				api_key: resolve("LYCEUM_STORE_API_KEY", raw.store.api_key, "store.api_key")?,
			},
			auth: AuthSettings {
				url: resolve("LYCEUM_AUTH_URL", raw.auth.url, "auth.url")?,
			},
		})
	}
}
