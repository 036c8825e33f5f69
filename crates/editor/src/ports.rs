//! Collaborators the session talks to.
//!
//! Transport, routing tables and authentication storage live behind these
//! traits; the session only sees records, identities and paths.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::RepositoryError;
use crate::model::{Identity, Record, RecordPayload};

/// Source and sink of records.
#[async_trait]
pub trait RecordRepository: Send + Sync {
	/// Fetches the record stored under `slug`.
	async fn fetch(&self, slug: &str) -> Result<Record, RepositoryError>;

	/// Creates a record; the result carries the canonical slug.
	async fn create(&self, payload: RecordPayload) -> Result<Record, RepositoryError>;

	/// Replaces the record stored under `slug`.
	async fn update(&self, slug: &str, payload: RecordPayload) -> Result<Record, RepositoryError>;
}

/// Resolves the authenticated actor.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
	async fn current_identity(&self) -> Result<Identity, RepositoryError>;
}

/// Fire-and-forget navigation side effect.
pub trait Navigator: Send + Sync {
	fn go_to(&self, path: &str);
}

/// Bundle of collaborators handed to a session.
#[derive(Clone)]
pub struct SessionPorts {
	pub records: Arc<dyn RecordRepository>,
	pub identity: Arc<dyn IdentityProvider>,
	pub navigator: Arc<dyn Navigator>,
}

impl SessionPorts {
	pub fn new(records: Arc<dyn RecordRepository>, identity: Arc<dyn IdentityProvider>, navigator: Arc<dyn Navigator>) -> Self {
		Self {
			records,
			identity,
			navigator,
		}
	}
}

impl std::fmt::Debug for SessionPorts {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SessionPorts").finish_non_exhaustive()
	}
}
