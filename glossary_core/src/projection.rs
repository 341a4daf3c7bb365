use derive_more::Deref;
use indexmap::IndexMap;

use crate::Entry;
use crate::EntryKind;

/// The render-ready fields of one entry, in the order the template expects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref)]
pub struct ProjectedEntry(#[deref] IndexMap<&'static str, String>);

impl ProjectedEntry {
	#[must_use]
	pub fn with(mut self, field: &'static str, value: impl Into<String>) -> Self {
		self.0.insert(field, value.into());
		self
	}
}

/// Per-document usage metadata: which labels were referenced and what their
/// entries looked like when they were first referenced.
///
/// The projection is append-only. Projecting a label that is already present
/// keeps the first projection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Projection {
	has_references: bool,
	glossary: IndexMap<String, ProjectedEntry>,
	acronyms: IndexMap<String, ProjectedEntry>,
}

impl Projection {
	/// True once at least one reference resolved (or one entry was dumped).
	pub fn has_references(&self) -> bool {
		self.has_references
	}

	pub fn mark_referenced(&mut self) {
		self.has_references = true;
	}

	pub fn entries(&self, kind: EntryKind) -> &IndexMap<String, ProjectedEntry> {
		match kind {
			EntryKind::Glossary => &self.glossary,
			EntryKind::Acronym => &self.acronyms,
		}
	}

	pub fn contains(&self, kind: EntryKind, label: &str) -> bool {
		self.entries(kind).contains_key(label)
	}

	/// Project `entry` under `label` unless the label is already projected.
	/// Returns whether a new projection was added.
	pub fn project<E: Entry>(&mut self, label: &str, entry: &E) -> bool {
		let entries = match E::KIND {
			EntryKind::Glossary => &mut self.glossary,
			EntryKind::Acronym => &mut self.acronyms,
		};

		if entries.contains_key(label) {
			return false;
		}

		entries.insert(label.to_string(), entry.project());
		true
	}

	/// Total projected entries across both kinds.
	pub fn len(&self) -> usize {
		self.glossary.len() + self.acronyms.len()
	}

	pub fn is_empty(&self) -> bool {
		self.glossary.is_empty() && self.acronyms.is_empty()
	}
}
