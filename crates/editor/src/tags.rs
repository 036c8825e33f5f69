//! Ordered, deduplicated tag set.

use indexmap::IndexSet;

/// Insertion-ordered set of tags.
///
/// Entries are trimmed, non-empty and unique; lookups trim their argument
/// the same way. The only mutators are [`Self::add`] and [`Self::remove`].
#[derive(Debug, Clone, Default)]
pub struct TagCollection {
	tags: IndexSet<String>,
}

// `IndexSet` equality ignores order; two collections are equal only when
// they hold the same tags in the same order.
impl PartialEq for TagCollection {
	fn eq(&self, other: &Self) -> bool {
		self.tags.iter().eq(other.tags.iter())
	}
}

impl Eq for TagCollection {}

impl TagCollection {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds a collection by adding each tag in order.
	pub fn from_tags<I>(tags: I) -> Self
	where
		I: IntoIterator,
		I::Item: AsRef<str>,
	{
		let mut collection = Self::new();
		for tag in tags {
			collection.add(tag.as_ref());
		}
		collection
	}

	/// Appends the trimmed `raw` unless it is empty or already present.
	///
	/// Returns whether the collection changed.
	pub fn add(&mut self, raw: &str) -> bool {
		let tag = raw.trim();
		if tag.is_empty() || self.tags.contains(tag) {
			return false;
		}
		self.tags.insert(tag.to_owned())
	}

	/// Removes the trimmed `name` if present, keeping the order of the rest.
	pub fn remove(&mut self, name: &str) -> bool {
		self.tags.shift_remove(name.trim())
	}

	pub fn contains(&self, name: &str) -> bool {
		self.tags.contains(name.trim())
	}

	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.tags.iter().map(String::as_str)
	}

	pub fn len(&self) -> usize {
		self.tags.len()
	}

	pub fn is_empty(&self) -> bool {
		self.tags.is_empty()
	}

	pub fn to_vec(&self) -> Vec<String> {
		self.tags.iter().cloned().collect()
	}
}
