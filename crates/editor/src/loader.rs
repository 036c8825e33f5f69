//! Initial load of an edit session.
//!
//! Fetches the record and the current identity concurrently and only decides
//! on authorization once both have resolved.

use std::sync::Arc;

use folio_worker::{CancellationScope, Settled, settle_both};

use crate::error::LoadError;
use crate::model::Record;
use crate::ports::{IdentityProvider, RecordRepository};

/// Result of [`SessionLoader::load`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
	/// No identifier: nothing to load.
	Skipped,
	/// The current identity authored the record.
	Authorized(Record),
	/// The current identity may not edit the record.
	Redirect(String),
	/// One of the fetches failed.
	Failed(LoadError),
	/// The scope was cancelled before the result could be applied.
	Stale,
}

pub struct SessionLoader {
	records: Arc<dyn RecordRepository>,
	identity: Arc<dyn IdentityProvider>,
	root: String,
}

impl SessionLoader {
	/// `root` is the redirect target for unauthorized editors.
	pub fn new(records: Arc<dyn RecordRepository>, identity: Arc<dyn IdentityProvider>, root: impl Into<String>) -> Self {
		Self {
			records,
			identity,
			root: root.into(),
		}
	}

	pub async fn load(&self, scope: &CancellationScope, slug: Option<&str>) -> LoadOutcome {
		let Some(slug) = slug else {
			return LoadOutcome::Skipped;
		};

		let record = async { self.records.fetch(slug).await.map_err(LoadError::record) };
		let identity = async { self.identity.current_identity().await.map_err(LoadError::identity) };

		match settle_both(scope, record, identity).await {
			Settled::Stale => LoadOutcome::Stale,
			Settled::Ready(Err(err)) => LoadOutcome::Failed(err),
			Settled::Ready(Ok((record, identity))) if identity.may_edit(&record) => LoadOutcome::Authorized(record),
			Settled::Ready(Ok((record, identity))) => {
				tracing::debug!(
					slug,
					author = %record.author.username,
					identity = %identity.username,
					"loader.unauthorized"
				);
				LoadOutcome::Redirect(self.root.clone())
			}
		}
	}
}
