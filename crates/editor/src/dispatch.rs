//! Create-or-update mutation dispatch.

use std::sync::Arc;

use folio_worker::{CancellationScope, Settled, settle};

use crate::config::RouteConfig;
use crate::error::ErrorMap;
use crate::model::RecordPayload;
use crate::ports::RecordRepository;

/// Which mutation a submission issues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationTarget {
	Create,
	/// Update of the record captured when the session was created.
	Update(String),
}

/// Result of [`SubmissionDispatcher::dispatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
	/// The mutation succeeded; go to the record's detail path.
	Navigate(String),
	/// The mutation failed with structured errors.
	Failure(ErrorMap),
	/// The scope was cancelled while the mutation was outstanding.
	Stale,
}

pub struct SubmissionDispatcher {
	records: Arc<dyn RecordRepository>,
	routes: RouteConfig,
}

impl SubmissionDispatcher {
	pub fn new(records: Arc<dyn RecordRepository>, routes: RouteConfig) -> Self {
		Self { records, routes }
	}

	/// Issues exactly one mutation and maps its result.
	pub async fn dispatch(&self, scope: &CancellationScope, target: &MutationTarget, payload: RecordPayload) -> DispatchOutcome {
		let mutation = async {
			match target {
				MutationTarget::Create => self.records.create(payload).await,
				MutationTarget::Update(slug) => self.records.update(slug, payload).await,
			}
		};

		match settle(scope, mutation).await {
			Settled::Stale => DispatchOutcome::Stale,
			Settled::Ready(Ok(record)) => DispatchOutcome::Navigate(self.routes.record_path(&record.slug)),
			Settled::Ready(Err(err)) => {
				tracing::debug!(error = %err, "dispatch.failure");
				DispatchOutcome::Failure(err.into_error_map())
			}
		}
	}
}
