#![cfg_attr(test, allow(unused_crate_dependencies))]
//! Editor session controller.
//!
//! An [`EditorSession`] backs one editor page: it loads an existing record
//! (or starts empty for a new one), checks that the current identity may edit
//! it, tracks fields and tags, and submits a create or update mutation.
//!
//! # Main Types
//!
//! - [`EditorSession`] - state machine exposed to the UI host
//! - [`TagCollection`] - ordered, deduplicated tags
//! - [`SessionLoader`] - fan-in load with authorization
//! - [`SubmissionDispatcher`] - create/update mutation dispatch
//!
//! Collaborators are injected through [`SessionPorts`].

pub mod config;
/// Create-or-update mutation dispatch.
pub mod dispatch;
pub mod error;
/// Fan-in load and authorization.
pub mod loader;
pub mod model;
pub mod ports;
pub mod session;
pub mod tags;
#[cfg(test)]
mod testing;

pub use config::{EditorConfig, RouteConfig};
pub use dispatch::{DispatchOutcome, MutationTarget, SubmissionDispatcher};
pub use error::{ConfigError, ErrorMap, LoadError, LoadSource, RepositoryError};
pub use folio_worker::CancellationScope;
pub use loader::{LoadOutcome, SessionLoader};
pub use model::{Author, FieldName, Fields, Identity, Mode, Record, RecordPayload};
pub use ports::{IdentityProvider, Navigator, RecordRepository, SessionPorts};
pub use session::{EditorSession, OpenOutcome, Phase, Rejection, SessionSnapshot, SubmitOutcome};
pub use tags::TagCollection;
