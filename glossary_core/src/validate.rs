use std::fmt;

use crate::AcronymEntry;
use crate::Entry;
use crate::EntryKind;
use crate::EntryStore;
use crate::GlossaryEntry;

/// An entry whose required fields have not all been filled in yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncompleteEntry {
	pub kind: EntryKind,
	pub label: String,
	/// Required fields that are still empty, e.g. `["name", "long"]`.
	pub missing: Vec<&'static str>,
}

impl fmt::Display for IncompleteEntry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"empty {} for {} label `{}`",
			self.missing.join(" and "),
			self.kind,
			self.label
		)
	}
}

/// Result of scanning both registries for incomplete entries.
#[derive(Debug, Default)]
pub struct ValidationReport {
	pub incomplete: Vec<IncompleteEntry>,
}

impl ValidationReport {
	/// Returns true when every stored entry is complete.
	pub fn is_ok(&self) -> bool {
		self.incomplete.is_empty()
	}
}

/// Scan glossary entries then acronym entries, each in store order.
pub fn validate(store: &EntryStore) -> ValidationReport {
	let mut incomplete = collect_incomplete::<GlossaryEntry>(store);
	incomplete.extend(collect_incomplete::<AcronymEntry>(store));

	ValidationReport { incomplete }
}

fn collect_incomplete<E: Entry>(store: &EntryStore) -> Vec<IncompleteEntry> {
	store
		.all::<E>()
		.filter_map(|(label, entry)| {
			let missing = entry.missing_fields();
			(!missing.is_empty()).then(|| IncompleteEntry {
				kind: E::KIND,
				label: label.to_string(),
				missing,
			})
		})
		.collect()
}
