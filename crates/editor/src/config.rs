//! Route configuration for session navigation.
//!
//! ```toml
//! [routes]
//! root = "/"
//! record = "/article/"
//! ```

use serde::Deserialize;

use crate::error::ConfigError;

/// Top-level editor configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorConfig {
	pub routes: RouteConfig,
}

/// Navigation targets emitted by the session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RouteConfig {
	/// Where unauthorized editors are sent.
	pub root: String,
	/// Prefix of a record's detail page; the slug is appended.
	pub record: String,
}

impl Default for RouteConfig {
	fn default() -> Self {
		Self {
			root: "/".to_string(),
			record: "/article/".to_string(),
		}
	}
}

impl RouteConfig {
	/// Detail path for `slug`.
	pub fn record_path(&self, slug: &str) -> String {
		if self.record.ends_with('/') {
			format!("{}{slug}", self.record)
		} else {
			format!("{}/{slug}", self.record)
		}
	}

	fn validate(&self) -> Result<(), ConfigError> {
		for (name, value) in [("root", &self.root), ("record", &self.record)] {
			if !value.starts_with('/') {
				return Err(ConfigError::RelativeRoute {
					name,
					value: value.clone(),
				});
			}
		}
		Ok(())
	}
}

impl EditorConfig {
	/// Parses and validates a TOML document. Missing keys take defaults.
	pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
		let config: Self = toml::from_str(input)?;
		config.routes.validate()?;
		Ok(config)
	}
}
