//! Scriptable fakes for the session's collaborators.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::oneshot;

use crate::error::RepositoryError;
use crate::model::{Author, Identity, Record, RecordPayload};
use crate::ports::{IdentityProvider, Navigator, RecordRepository, SessionPorts};

pub(crate) type Reply<T> = Result<T, RepositoryError>;

enum Scripted<T> {
	Now(Reply<T>),
	Gated(oneshot::Receiver<Reply<T>>),
}

impl<T> Scripted<T> {
	async fn resolve(self) -> Reply<T> {
		match self {
			Self::Now(reply) => reply,
			Self::Gated(rx) => rx.await.unwrap_or_else(|_| Err(RepositoryError::Network("gate dropped".into()))),
		}
	}
}

struct Script<T>(Mutex<VecDeque<Scripted<T>>>);

impl<T> Default for Script<T> {
	fn default() -> Self {
		Self(Mutex::new(VecDeque::new()))
	}
}

impl<T> Script<T> {
	fn reply(&self, reply: Reply<T>) {
		self.0.lock().push_back(Scripted::Now(reply));
	}

	fn gate(&self) -> oneshot::Sender<Reply<T>> {
		let (tx, rx) = oneshot::channel();
		self.0.lock().push_back(Scripted::Gated(rx));
		tx
	}

	fn next(&self) -> Scripted<T> {
		self.0
			.lock()
			.pop_front()
			.unwrap_or_else(|| Scripted::Now(Err(RepositoryError::Server {
				status: 500,
				message: "unscripted call".into(),
			})))
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
	Fetch(String),
	Create(RecordPayload),
	Update(String, RecordPayload),
	Identity,
}

#[derive(Default)]
pub(crate) struct FakeBackend {
	fetches: Script<Record>,
	mutations: Script<Record>,
	identities: Script<Identity>,
	calls: Mutex<Vec<Call>>,
}

impl FakeBackend {
	pub(crate) fn new() -> Arc<Self> {
		Arc::new(Self::default())
	}

	pub(crate) fn reply_fetch(&self, reply: Reply<Record>) {
		self.fetches.reply(reply);
	}

	pub(crate) fn reply_identity(&self, reply: Reply<Identity>) {
		self.identities.reply(reply);
	}

	pub(crate) fn gate_identity(&self) -> oneshot::Sender<Reply<Identity>> {
		self.identities.gate()
	}

	pub(crate) fn reply_mutation(&self, reply: Reply<Record>) {
		self.mutations.reply(reply);
	}

	pub(crate) fn gate_mutation(&self) -> oneshot::Sender<Reply<Record>> {
		self.mutations.gate()
	}

	pub(crate) fn calls(&self) -> Vec<Call> {
		self.calls.lock().clone()
	}

	pub(crate) fn mutation_calls(&self) -> usize {
		self.calls
			.lock()
			.iter()
			.filter(|call| matches!(call, Call::Create(_) | Call::Update(..)))
			.count()
	}
}

#[async_trait]
impl RecordRepository for FakeBackend {
	async fn fetch(&self, slug: &str) -> Result<Record, RepositoryError> {
		self.calls.lock().push(Call::Fetch(slug.to_string()));
		let scripted = self.fetches.next();
		scripted.resolve().await
	}

	async fn create(&self, payload: RecordPayload) -> Result<Record, RepositoryError> {
		self.calls.lock().push(Call::Create(payload));
		let scripted = self.mutations.next();
		scripted.resolve().await
	}

	async fn update(&self, slug: &str, payload: RecordPayload) -> Result<Record, RepositoryError> {
		self.calls.lock().push(Call::Update(slug.to_string(), payload));
		let scripted = self.mutations.next();
		scripted.resolve().await
	}
}

#[async_trait]
impl IdentityProvider for FakeBackend {
	async fn current_identity(&self) -> Result<Identity, RepositoryError> {
		self.calls.lock().push(Call::Identity);
		let scripted = self.identities.next();
		scripted.resolve().await
	}
}

#[derive(Default)]
pub(crate) struct RecordingNavigator {
	visited: Mutex<Vec<String>>,
}

impl RecordingNavigator {
	pub(crate) fn visited(&self) -> Vec<String> {
		self.visited.lock().clone()
	}
}

impl Navigator for RecordingNavigator {
	fn go_to(&self, path: &str) {
		self.visited.lock().push(path.to_string());
	}
}

pub(crate) fn ports(backend: &Arc<FakeBackend>, navigator: &Arc<RecordingNavigator>) -> SessionPorts {
	SessionPorts::new(backend.clone(), backend.clone(), navigator.clone())
}

pub(crate) fn record(slug: &str, author: &str) -> Record {
	Record {
		slug: slug.to_string(),
		author: Author {
			username: author.to_string(),
		},
		title: format!("{slug} title"),
		description: format!("{slug} description"),
		body: format!("{slug} body"),
		tag_list: vec!["rust".to_string(), "async".to_string()],
	}
}

pub(crate) fn identity(username: &str) -> Identity {
	Identity {
		username: username.to_string(),
	}
}
