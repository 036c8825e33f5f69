//! Record, identity and payload types exchanged with the repository.

use serde::{Deserialize, Serialize};

/// Author reference embedded in a [`Record`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
	pub username: String,
}

/// A stored record as returned by the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
	/// Canonical identifier, also used in the detail path.
	pub slug: String,
	pub author: Author,
	pub title: String,
	pub description: String,
	pub body: String,
	#[serde(default)]
	pub tag_list: Vec<String>,
}

/// The currently authenticated actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
	pub username: String,
}

impl Identity {
	/// Whether this identity authored `record`.
	pub fn may_edit(&self, record: &Record) -> bool {
		self.username == record.author.username
	}
}

/// Whether the session creates a new record or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
	Create,
	Edit,
}

/// Editable text fields of a record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fields {
	pub title: String,
	pub description: String,
	pub body: String,
}

impl Fields {
	pub fn from_record(record: &Record) -> Self {
		Self {
			title: record.title.clone(),
			description: record.description.clone(),
			body: record.body.clone(),
		}
	}

	pub fn get(&self, name: FieldName) -> &str {
		match name {
			FieldName::Title => &self.title,
			FieldName::Description => &self.description,
			FieldName::Body => &self.body,
		}
	}

	pub fn set(&mut self, name: FieldName, value: String) {
		match name {
			FieldName::Title => self.title = value,
			FieldName::Description => self.description = value,
			FieldName::Body => self.body = value,
		}
	}
}

/// Selector for one of the [`Fields`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldName {
	Title,
	Description,
	Body,
}

/// Body of a create or update mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPayload {
	pub title: String,
	pub description: String,
	pub body: String,
	pub tag_list: Vec<String>,
}

impl RecordPayload {
	pub fn new(fields: &Fields, tag_list: Vec<String>) -> Self {
		Self {
			title: fields.title.clone(),
			description: fields.description.clone(),
			body: fields.body.clone(),
			tag_list,
		}
	}
}
