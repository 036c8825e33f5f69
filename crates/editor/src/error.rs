//! Error types surfaced by the editor session.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Field-keyed error messages, in the order the server reported them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorMap(IndexMap<String, Vec<String>>);

/// Wire envelope: `{"errors": {"title": ["can't be blank"]}}`.
#[derive(Deserialize)]
struct ErrorEnvelope {
	errors: ErrorMap,
}

impl ErrorMap {
	pub fn new() -> Self {
		Self::default()
	}

	/// Map holding one message under `field`.
	pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
		let mut map = Self::new();
		map.push(field, message);
		map
	}

	/// Appends `message` to the messages of `field`.
	pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
		self.0.entry(field.into()).or_default().push(message.into());
	}

	/// Parses a response body of the form `{"errors": {...}}`.
	pub fn from_response_body(body: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str::<ErrorEnvelope>(body).map(|envelope| envelope.errors)
	}

	pub fn get(&self, field: &str) -> Option<&[String]> {
		self.0.get(field).map(Vec::as_slice)
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
		self.0.iter().map(|(field, messages)| (field.as_str(), messages.as_slice()))
	}

	/// Flattens into display lines, one per message: `"title can't be blank"`.
	pub fn messages(&self) -> Vec<String> {
		self.iter()
			.flat_map(|(field, messages)| messages.iter().map(move |message| format!("{field} {message}")))
			.collect()
	}
}

impl<K, V> FromIterator<(K, V)> for ErrorMap
where
	K: Into<String>,
	V: IntoIterator,
	V::Item: Into<String>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		let mut map = Self::new();
		for (field, messages) in iter {
			let field = field.into();
			for message in messages {
				map.push(field.clone(), message);
			}
		}
		map
	}
}

/// Failures reported by the record repository and identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
	/// No record exists for the requested identifier.
	#[error("record not found")]
	NotFound,

	/// The server rejected the payload with field-keyed messages.
	#[error("validation failed: {}", .0.messages().join(", "))]
	Validation(ErrorMap),

	/// The server failed to handle the request.
	#[error("server error {status}: {message}")]
	Server {
		/// HTTP-like status code reported by the server.
		status: u16,
		message: String,
	},

	/// The request never reached the server or the response was lost.
	#[error("network error: {0}")]
	Network(String),

	/// No authenticated actor.
	#[error("not authenticated")]
	Unauthenticated,
}

impl RepositoryError {
	/// Converts into the structured form stored on the session.
	///
	/// Validation messages pass through verbatim; every other failure becomes
	/// a single-entry map keyed by its origin.
	pub fn into_error_map(self) -> ErrorMap {
		match self {
			Self::Validation(map) => map,
			Self::NotFound => ErrorMap::single("record", "not found"),
			Self::Server { status, message } => ErrorMap::single("server", format!("{status} {message}")),
			Self::Network(message) => ErrorMap::single("network", message),
			Self::Unauthenticated => ErrorMap::single("identity", "not authenticated"),
		}
	}
}

/// Which load-time fetch failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
	Record,
	Identity,
}

impl LoadSource {
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Record => "record",
			Self::Identity => "identity",
		}
	}
}

/// Terminal failure of the initial load. The session stays in `Loading`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to load {}: {error}", .source_kind.as_str())]
pub struct LoadError {
	pub source_kind: LoadSource,
	pub error: RepositoryError,
}

impl LoadError {
	pub fn record(error: RepositoryError) -> Self {
		Self {
			source_kind: LoadSource::Record,
			error,
		}
	}

	pub fn identity(error: RepositoryError) -> Self {
		Self {
			source_kind: LoadSource::Identity,
			error,
		}
	}
}

/// Errors raised while reading [`crate::EditorConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
	/// The TOML document could not be parsed.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	/// A route path does not start with `/`.
	#[error("route '{name}' must be an absolute path, got '{value}'")]
	RelativeRoute { name: &'static str, value: String },
}
