use std::fmt;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::projection::ProjectedEntry;
use crate::store::EntryStore;
use crate::store::Registry;

/// The two independent label namespaces a reference can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
	Glossary,
	Acronym,
}

impl EntryKind {
	/// Both kinds, in the order the resolver consults them.
	pub const ALL: [EntryKind; 2] = [Self::Glossary, Self::Acronym];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Glossary => "glossary",
			Self::Acronym => "acronym",
		}
	}

	/// The document metadata key that collects projected entries of this kind.
	pub fn metadata_key(self) -> &'static str {
		match self {
			Self::Glossary => "glossary-entries",
			Self::Acronym => "acronym-entries",
		}
	}

	/// Suffix appended after the renderer command. The downstream LaTeX
	/// template styles glossary and acronym expansions by this marker.
	pub fn subscript(self) -> &'static str {
		match self {
			Self::Glossary => "{$_G$}",
			Self::Acronym => "{$_A$}",
		}
	}
}

impl fmt::Display for EntryKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Behaviour shared by glossary and acronym records.
///
/// The `Default` value of an entry is its stub: every text field empty.
pub trait Entry: 'static + Clone + Default + fmt::Debug + Serialize + DeserializeOwned {
	const KIND: EntryKind;

	/// Names of the required fields that are still empty.
	fn missing_fields(&self) -> Vec<&'static str>;

	/// The render-ready subset of fields copied into document metadata.
	fn project(&self) -> ProjectedEntry;

	fn registry(store: &EntryStore) -> &Registry<Self>;

	fn registry_mut(store: &mut EntryStore) -> &mut Registry<Self>;

	/// Returns true when every required field has been filled in.
	fn is_complete(&self) -> bool {
		self.missing_fields().is_empty()
	}
}

/// A glossary term.
///
/// ```yaml
/// compiler:
///   name: compiler
///   description: a program that translates source code
///   plural: compilers
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossaryEntry {
	/// Word(s) rendered for each occurrence of the term.
	#[serde(default, deserialize_with = "null_as_empty")]
	pub name: String,
	/// Explanation of the term.
	#[serde(default, deserialize_with = "null_as_empty")]
	pub description: String,
	/// Plural form, when it is not a regular one.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub plural: Option<String>,
}

impl GlossaryEntry {
	pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			description: description.into(),
			plural: None,
		}
	}

	#[must_use]
	pub fn with_plural(mut self, plural: impl Into<String>) -> Self {
		self.plural = Some(plural.into());
		self
	}
}

impl Entry for GlossaryEntry {
	const KIND: EntryKind = EntryKind::Glossary;

	fn missing_fields(&self) -> Vec<&'static str> {
		let mut missing = Vec::new();
		if self.name.is_empty() {
			missing.push("name");
		}
		if self.description.is_empty() {
			missing.push("description");
		}
		missing
	}

	fn project(&self) -> ProjectedEntry {
		let mut projected = ProjectedEntry::default()
			.with("name", &self.name)
			.with("description", &self.description);
		if let Some(plural) = self.plural.as_deref().filter(|p| !p.is_empty()) {
			projected = projected.with("plural", plural);
		}
		projected
	}

	fn registry(store: &EntryStore) -> &Registry<Self> {
		store.glossary()
	}

	fn registry_mut(store: &mut EntryStore) -> &mut Registry<Self> {
		store.glossary_mut()
	}
}

/// An acronym.
///
/// ```yaml
/// ast:
///   name: AST
///   long: abstract syntax tree
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcronymEntry {
	/// The acronym as rendered in the text.
	#[serde(default, deserialize_with = "null_as_empty")]
	pub name: String,
	/// Expanded form.
	#[serde(default, deserialize_with = "null_as_empty")]
	pub long: String,
	/// Optional extra gloss shown in the acronym list.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
}

impl AcronymEntry {
	pub fn new(name: impl Into<String>, long: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			long: long.into(),
			description: None,
		}
	}

	#[must_use]
	pub fn with_description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());
		self
	}
}

impl Entry for AcronymEntry {
	const KIND: EntryKind = EntryKind::Acronym;

	fn missing_fields(&self) -> Vec<&'static str> {
		let mut missing = Vec::new();
		if self.name.is_empty() {
			missing.push("name");
		}
		if self.long.is_empty() {
			missing.push("long");
		}
		missing
	}

	fn project(&self) -> ProjectedEntry {
		let mut projected = ProjectedEntry::default().with("name", &self.name);
		if !self.long.is_empty() {
			projected = projected.with("long", &self.long);
		}
		if let Some(description) = self.description.as_deref().filter(|d| !d.is_empty()) {
			projected = projected.with("description", description);
		}
		projected
	}

	fn registry(store: &EntryStore) -> &Registry<Self> {
		store.acronyms()
	}

	fn registry_mut(store: &mut EntryStore) -> &mut Registry<Self> {
		store.acronyms_mut()
	}
}

/// Hand-edited files often leave a field as `name:` with no value, which YAML
/// reads as null.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
	D: Deserializer<'de>,
{
	Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}
