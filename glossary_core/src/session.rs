use tracing::debug;
use tracing::info;

use crate::AcronymEntry;
use crate::Entry;
use crate::EntryKind;
use crate::EntryStore;
use crate::GlossaryEntry;
use crate::Projection;
use crate::Reference;
use crate::find_reference;

/// Resolution state for one document.
///
/// A session borrows the run's [`EntryStore`] mutably, so stubs created while
/// resolving are visible to the save and validation steps that follow.
#[derive(Debug)]
pub struct Session<'s> {
	store: &'s mut EntryStore,
	projection: Projection,
}

impl<'s> Session<'s> {
	pub fn new(store: &'s mut EntryStore) -> Self {
		Self {
			store,
			projection: Projection::default(),
		}
	}

	pub fn store(&self) -> &EntryStore {
		&*self.store
	}

	pub fn projection(&self) -> &Projection {
		&self.projection
	}

	/// Resolve the first reference in `text` and return the rewritten text.
	/// Returns `None` when `text` holds no recognized reference.
	pub fn resolve(&mut self, text: &str) -> Option<String> {
		let reference = find_reference(text)?;
		self.record(&reference);

		Some(reference.rewrite(text))
	}

	/// Make sure the referenced label exists in the store and in this
	/// document's projection.
	pub fn record(&mut self, reference: &Reference<'_>) {
		match reference.kind() {
			EntryKind::Glossary => self.record_entry::<GlossaryEntry>(reference.label),
			EntryKind::Acronym => self.record_entry::<AcronymEntry>(reference.label),
		}
		self.projection.mark_referenced();
	}

	fn record_entry<E: Entry>(&mut self, label: &str) {
		let entry = if let Some(entry) = self.store.get::<E>(label) {
			entry.clone()
		} else {
			debug!(label, kind = %E::KIND, "creating stub entry");
			let stub = E::default();
			self.store.set(label, stub.clone());
			stub
		};

		self.projection.project(label, &entry);
	}

	/// Project every stored entry regardless of whether the document cites
	/// it.
	pub fn project_all(&mut self) {
		for (label, entry) in self.store.all::<GlossaryEntry>() {
			self.projection.project(label, entry);
		}
		for (label, entry) in self.store.all::<AcronymEntry>() {
			self.projection.project(label, entry);
		}

		if !self.projection.is_empty() {
			self.projection.mark_referenced();
		}
		info!(entries = self.projection.len(), "projected full glossary");
	}

	pub fn finish(self) -> Projection {
		self.projection
	}
}
