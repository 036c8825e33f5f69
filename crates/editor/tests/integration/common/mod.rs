//! In-memory backend for editor session integration tests.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use folio_editor::{
	Author, EditorConfig, EditorSession, ErrorMap, Identity, IdentityProvider, Navigator, Record, RecordPayload,
	RecordRepository, RepositoryError, SessionPorts,
};
use parking_lot::Mutex;
use tokio::sync::oneshot;

/// Record store keyed by slug that validates payloads the way a server would.
#[derive(Default)]
pub struct InMemoryBackend {
	records: Mutex<HashMap<String, Record>>,
	current_user: Mutex<Option<String>>,
	held_identity: Mutex<Option<oneshot::Receiver<()>>>,
	last_payload: Mutex<Option<RecordPayload>>,
	mutations: AtomicUsize,
}

impl InMemoryBackend {
	pub fn new(current_user: Option<&str>) -> Arc<Self> {
		let backend = Self::default();
		*backend.current_user.lock() = current_user.map(str::to_string);
		Arc::new(backend)
	}

	pub fn insert(&self, slug: &str, author: &str, tags: &[&str]) {
		let record = Record {
			slug: slug.to_string(),
			author: Author {
				username: author.to_string(),
			},
			title: format!("Title of {slug}"),
			description: "description".to_string(),
			body: "body".to_string(),
			tag_list: tags.iter().map(|tag| tag.to_string()).collect(),
		};
		self.records.lock().insert(slug.to_string(), record);
	}

	/// Holds the next identity lookup until the returned sender fires.
	pub fn hold_identity(&self) -> oneshot::Sender<()> {
		let (tx, rx) = oneshot::channel();
		*self.held_identity.lock() = Some(rx);
		tx
	}

	pub fn last_payload(&self) -> Option<RecordPayload> {
		self.last_payload.lock().clone()
	}

	pub fn mutation_count(&self) -> usize {
		self.mutations.load(Ordering::SeqCst)
	}

	fn validate(payload: &RecordPayload) -> Result<(), RepositoryError> {
		let mut errors = ErrorMap::new();
		if payload.title.trim().is_empty() {
			errors.push("title", "can't be blank");
		}
		if payload.body.trim().is_empty() {
			errors.push("body", "can't be blank");
		}
		if errors.is_empty() { Ok(()) } else { Err(RepositoryError::Validation(errors)) }
	}

	fn author(&self) -> Result<String, RepositoryError> {
		self.current_user.lock().clone().ok_or(RepositoryError::Unauthenticated)
	}
}

fn slugify(title: &str, n: usize) -> String {
	let base: String = title
		.chars()
		.map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
		.collect();
	format!("{}-{n}", base.trim_matches('-'))
}

#[async_trait]
impl RecordRepository for InMemoryBackend {
	async fn fetch(&self, slug: &str) -> Result<Record, RepositoryError> {
		self.records.lock().get(slug).cloned().ok_or(RepositoryError::NotFound)
	}

	async fn create(&self, payload: RecordPayload) -> Result<Record, RepositoryError> {
		let n = self.mutations.fetch_add(1, Ordering::SeqCst) + 1;
		*self.last_payload.lock() = Some(payload.clone());
		Self::validate(&payload)?;

		let record = Record {
			slug: slugify(&payload.title, n),
			author: Author { username: self.author()? },
			title: payload.title,
			description: payload.description,
			body: payload.body,
			tag_list: payload.tag_list,
		};
		self.records.lock().insert(record.slug.clone(), record.clone());
		Ok(record)
	}

	async fn update(&self, slug: &str, payload: RecordPayload) -> Result<Record, RepositoryError> {
		self.mutations.fetch_add(1, Ordering::SeqCst);
		*self.last_payload.lock() = Some(payload.clone());
		Self::validate(&payload)?;

		let mut records = self.records.lock();
		let record = records.get_mut(slug).ok_or(RepositoryError::NotFound)?;
		record.title = payload.title;
		record.description = payload.description;
		record.body = payload.body;
		record.tag_list = payload.tag_list;
		Ok(record.clone())
	}
}

#[async_trait]
impl IdentityProvider for InMemoryBackend {
	async fn current_identity(&self) -> Result<Identity, RepositoryError> {
		let held = self.held_identity.lock().take();
		if let Some(rx) = held {
			let _ = rx.await;
		}
		Ok(Identity { username: self.author()? })
	}
}

#[derive(Default)]
pub struct Redirects(Mutex<Vec<String>>);

impl Redirects {
	pub fn paths(&self) -> Vec<String> {
		self.0.lock().clone()
	}
}

impl Navigator for Redirects {
	fn go_to(&self, path: &str) {
		self.0.lock().push(path.to_string());
	}
}

pub fn init_tracing() {
	let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

pub fn open_session(backend: &Arc<InMemoryBackend>, nav: &Arc<Redirects>, slug: Option<&str>) -> EditorSession {
	init_tracing();
	let ports = SessionPorts::new(backend.clone(), backend.clone(), nav.clone());
	EditorSession::new(ports, &EditorConfig::default(), slug.map(str::to_string))
}
