//! Editor session state machine.
//!
//! ```text
//! Loading --authorized--> Ready --submit--> Submitting --ok--> Navigated
//!    |                      ^                   |
//!    +--unauthorized--> Redirected              +--err--> Ready (errors attached)
//!
//! any phase --dispose--> Disposed
//! ```
//!
//! State is only ever touched by the session's own continuations. Each one
//! checks the [`CancellationScope`] and applies its transition inside a
//! single critical section, so results that resolve after [`EditorSession::dispose`]
//! have no effect. The lock is never held across an `.await` and is released
//! before the navigator runs; the scope is checked again right before
//! `go_to`, so a dispose from another thread in between suppresses the
//! navigation. A dispose that races past that final check is not observed.

use std::sync::Arc;

use folio_worker::CancellationScope;
use parking_lot::Mutex;
use tokio::task::JoinHandle;

use crate::config::EditorConfig;
use crate::dispatch::{DispatchOutcome, MutationTarget, SubmissionDispatcher};
use crate::error::{ErrorMap, LoadError};
use crate::loader::{LoadOutcome, SessionLoader};
use crate::model::{FieldName, Fields, Mode, RecordPayload};
use crate::ports::{Navigator, SessionPorts};
use crate::tags::TagCollection;

/// Lifecycle phase of an [`EditorSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
	Loading,
	Ready,
	Submitting,
	Redirected,
	Navigated,
	Disposed,
}

/// Result of [`EditorSession::open`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenOutcome {
	/// Create mode, or the load already ran.
	Skipped,
	Ready,
	Redirected(String),
	Failed(LoadError),
	/// The session was disposed before the load resolved.
	Discarded,
}

/// Why a submission was not dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
	/// A submission is already outstanding.
	InFlight,
	Disposed,
	/// The session is not in [`Phase::Ready`].
	NotReady(Phase),
}

/// Result of [`EditorSession::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
	Navigated(String),
	Failed(ErrorMap),
	Rejected(Rejection),
	/// The session was disposed while the mutation was outstanding.
	Discarded,
}

/// Read-only copy of the session state handed to the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
	pub mode: Mode,
	pub identifier: Option<String>,
	pub phase: Phase,
	pub fields: Fields,
	pub tags: Vec<String>,
	pub tag_input: String,
	pub errors: Option<ErrorMap>,
	pub load_error: Option<LoadError>,
	pub submitting: bool,
}

struct SessionState {
	phase: Phase,
	fields: Fields,
	tags: TagCollection,
	tag_input: String,
	errors: Option<ErrorMap>,
	load_error: Option<LoadError>,
	submitting: bool,
	load_started: bool,
}

impl SessionState {
	fn commit_tag_input(&mut self) -> bool {
		let staged = std::mem::take(&mut self.tag_input);
		self.tags.add(&staged)
	}
}

/// Controller behind one editor page instance.
pub struct EditorSession {
	mode: Mode,
	identifier: Option<String>,
	scope: CancellationScope,
	loader: SessionLoader,
	dispatcher: SubmissionDispatcher,
	navigator: Arc<dyn Navigator>,
	state: Mutex<SessionState>,
}

impl EditorSession {
	/// Creates a session. An absent or empty `identifier` selects create mode.
	pub fn new(ports: SessionPorts, config: &EditorConfig, identifier: Option<String>) -> Self {
		let identifier = identifier.filter(|slug| !slug.is_empty());
		let mode = if identifier.is_some() { Mode::Edit } else { Mode::Create };
		let phase = match mode {
			Mode::Create => Phase::Ready,
			Mode::Edit => Phase::Loading,
		};
		tracing::debug!(?mode, slug = identifier.as_deref(), "session.new");

		Self {
			mode,
			identifier,
			scope: CancellationScope::new(),
			loader: SessionLoader::new(ports.records.clone(), ports.identity, config.routes.root.clone()),
			dispatcher: SubmissionDispatcher::new(ports.records, config.routes.clone()),
			navigator: ports.navigator,
			state: Mutex::new(SessionState {
				phase,
				fields: Fields::default(),
				tags: TagCollection::new(),
				tag_input: String::new(),
				errors: None,
				load_error: None,
				submitting: false,
				load_started: false,
			}),
		}
	}

	pub fn mode(&self) -> Mode {
		self.mode
	}

	pub fn identifier(&self) -> Option<&str> {
		self.identifier.as_deref()
	}

	pub fn phase(&self) -> Phase {
		self.state.lock().phase
	}

	pub fn is_disposed(&self) -> bool {
		self.scope.is_cancelled()
	}

	pub fn snapshot(&self) -> SessionSnapshot {
		let state = self.state.lock();
		SessionSnapshot {
			mode: self.mode,
			identifier: self.identifier.clone(),
			phase: state.phase,
			fields: state.fields.clone(),
			tags: state.tags.to_vec(),
			tag_input: state.tag_input.clone(),
			errors: state.errors.clone(),
			load_error: state.load_error.clone(),
			submitting: state.submitting,
		}
	}

	/// Loads the record for edit mode and applies the authorization decision.
	///
	/// Runs at most once per session; later calls return [`OpenOutcome::Skipped`].
	pub async fn open(&self) -> OpenOutcome {
		let Some(slug) = self.identifier.as_deref() else {
			return OpenOutcome::Skipped;
		};
		{
			let mut state = self.state.lock();
			if state.load_started || state.phase != Phase::Loading {
				return OpenOutcome::Skipped;
			}
			state.load_started = true;
		}
		tracing::debug!(slug, "session.open");

		match self.loader.load(&self.scope, Some(slug)).await {
			LoadOutcome::Skipped => OpenOutcome::Skipped,
			LoadOutcome::Stale => {
				self.trace_discard("open");
				OpenOutcome::Discarded
			}
			LoadOutcome::Authorized(record) => {
				let mut state = self.state.lock();
				if self.scope.is_cancelled() {
					drop(state);
					self.trace_discard("open");
					return OpenOutcome::Discarded;
				}
				state.fields = Fields::from_record(&record);
				state.tags = TagCollection::from_tags(&record.tag_list);
				state.phase = Phase::Ready;
				tracing::debug!(slug, tags = state.tags.len(), "session.ready");
				OpenOutcome::Ready
			}
			LoadOutcome::Redirect(path) => {
				{
					let mut state = self.state.lock();
					if self.scope.is_cancelled() {
						drop(state);
						self.trace_discard("open");
						return OpenOutcome::Discarded;
					}
					state.phase = Phase::Redirected;
				}
				tracing::info!(slug, path = %path, "session.redirect");
				if !self.navigate("open", &path) {
					return OpenOutcome::Discarded;
				}
				OpenOutcome::Redirected(path)
			}
			LoadOutcome::Failed(err) => {
				let mut state = self.state.lock();
				if self.scope.is_cancelled() {
					drop(state);
					self.trace_discard("open");
					return OpenOutcome::Discarded;
				}
				tracing::warn!(slug, error = %err, "session.load_failed");
				state.load_error = Some(err.clone());
				OpenOutcome::Failed(err)
			}
		}
	}

	/// Spawns [`Self::open`] on the worker runtime.
	pub fn spawn_open(self: &Arc<Self>) -> JoinHandle<OpenOutcome> {
		let session = Arc::clone(self);
		folio_worker::spawn("session.open", async move { session.open().await })
	}

	/// Binds a form field. Ignored after disposal.
	pub fn set_field(&self, name: FieldName, value: impl Into<String>) {
		let mut state = self.state.lock();
		if state.phase != Phase::Disposed {
			state.fields.set(name, value.into());
		}
	}

	/// Binds the staged tag input. Ignored after disposal.
	pub fn set_tag_input(&self, text: impl Into<String>) {
		let mut state = self.state.lock();
		if state.phase != Phase::Disposed {
			state.tag_input = text.into();
		}
	}

	/// Adds `raw` as a tag and clears the staged input.
	///
	/// Returns whether the tag collection changed.
	pub fn add_tag(&self, raw: &str) -> bool {
		let mut state = self.state.lock();
		if state.phase == Phase::Disposed {
			return false;
		}
		state.tag_input.clear();
		state.tags.add(raw)
	}

	/// Commits the staged tag input as a tag and clears it.
	pub fn commit_tag_input(&self) -> bool {
		let mut state = self.state.lock();
		if state.phase == Phase::Disposed {
			return false;
		}
		state.commit_tag_input()
	}

	pub fn remove_tag(&self, name: &str) -> bool {
		let mut state = self.state.lock();
		if state.phase == Phase::Disposed {
			return false;
		}
		state.tags.remove(name)
	}

	/// Submits the current fields and tags.
	///
	/// At most one submission is outstanding per session. On failure the
	/// session returns to [`Phase::Ready`] with `errors` attached so the user
	/// can retry.
	pub async fn submit(&self) -> SubmitOutcome {
		let (target, payload) = {
			let mut state = self.state.lock();
			if state.phase == Phase::Disposed || self.scope.is_cancelled() {
				return SubmitOutcome::Rejected(Rejection::Disposed);
			}
			if state.submitting {
				tracing::debug!("session.submit_in_flight");
				return SubmitOutcome::Rejected(Rejection::InFlight);
			}
			if state.phase != Phase::Ready {
				return SubmitOutcome::Rejected(Rejection::NotReady(state.phase));
			}

			state.submitting = true;
			state.phase = Phase::Submitting;
			state.errors = None;
			state.commit_tag_input();
			(self.target(), RecordPayload::new(&state.fields, state.tags.to_vec()))
		};
		tracing::info!(mode = ?self.mode, tags = payload.tag_list.len(), "session.submit");

		match self.dispatcher.dispatch(&self.scope, &target, payload).await {
			DispatchOutcome::Stale => {
				self.trace_discard("submit");
				SubmitOutcome::Discarded
			}
			DispatchOutcome::Navigate(path) => {
				{
					let mut state = self.state.lock();
					if self.scope.is_cancelled() {
						drop(state);
						self.trace_discard("submit");
						return SubmitOutcome::Discarded;
					}
					state.phase = Phase::Navigated;
				}
				tracing::info!(path = %path, "session.navigate");
				if !self.navigate("submit", &path) {
					return SubmitOutcome::Discarded;
				}
				SubmitOutcome::Navigated(path)
			}
			DispatchOutcome::Failure(errors) => {
				let mut state = self.state.lock();
				if self.scope.is_cancelled() {
					drop(state);
					self.trace_discard("submit");
					return SubmitOutcome::Discarded;
				}
				tracing::debug!(fields = errors.len(), "session.submit_failed");
				state.errors = Some(errors.clone());
				state.submitting = false;
				state.phase = Phase::Ready;
				SubmitOutcome::Failed(errors)
			}
		}
	}

	/// Spawns [`Self::submit`] on the worker runtime.
	pub fn spawn_submit(self: &Arc<Self>) -> JoinHandle<SubmitOutcome> {
		let session = Arc::clone(self);
		folio_worker::spawn("session.submit", async move { session.submit().await })
	}

	/// Tears the session down. Results of outstanding work are discarded.
	pub fn dispose(&self) {
		let mut state = self.state.lock();
		if state.phase == Phase::Disposed {
			return;
		}
		self.scope.cancel();
		state.phase = Phase::Disposed;
		tracing::debug!(slug = self.identifier.as_deref(), "session.dispose");
	}

	fn target(&self) -> MutationTarget {
		match &self.identifier {
			Some(slug) => MutationTarget::Update(slug.clone()),
			None => MutationTarget::Create,
		}
	}

	/// Hands `path` to the navigator unless the session was disposed after
	/// the phase transition released the lock.
	fn navigate(&self, stage: &'static str, path: &str) -> bool {
		if self.scope.is_cancelled() {
			self.trace_discard(stage);
			return false;
		}
		self.navigator.go_to(path);
		true
	}

	fn trace_discard(&self, stage: &'static str) {
		tracing::debug!(stage, slug = self.identifier.as_deref(), "session.discard_stale");
	}
}
