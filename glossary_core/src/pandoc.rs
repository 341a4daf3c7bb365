//! Binding to pandoc's JSON AST.
//!
//! Pandoc hands a filter the whole document as JSON on stdin. Every element is
//! an object with a `t` tag and an optional `c` payload, e.g.
//! `{"t": "Str", "c": "word"}`. This module walks that tree, calls an
//! [`ElementVisitor`] for each tagged element, and writes the per-document
//! [`Projection`] back into the document metadata.

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;
use serde_json::json;
use tracing::debug;
use tracing::warn;

use crate::EntryKind;
use crate::EntryStore;
use crate::GlossaryError;
use crate::GlossaryResult;
use crate::ProjectedEntry;
use crate::Projection;
use crate::Session;

/// Metadata flag set by the document author to get every stored entry listed.
pub const FULL_GLOSSARY_KEY: &str = "full-glossary";
/// Metadata flag telling the template that a glossary section is needed.
pub const HAS_GLOSSARY_KEY: &str = "has-glossary";
/// Raw format of the markup emitted for references.
pub const RAW_FORMAT: &str = "latex";

static NULL: Value = Value::Null;

/// Output formats the filter rewrites. Any other format leaves the document
/// untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
	/// Final LaTeX (and PDF through LaTeX) output.
	Latex,
	/// Pandoc's own JSON, used for inspecting the filtered AST.
	Json,
}

impl OutputFormat {
	pub fn from_name(name: &str) -> Option<Self> {
		match name {
			"latex" => Some(Self::Latex),
			"json" => Some(Self::Json),
			_ => None,
		}
	}
}

/// A pandoc document as serialized by `pandoc --to json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PandocDocument {
	#[serde(rename = "pandoc-api-version")]
	pub api_version: Vec<u32>,
	#[serde(default)]
	pub meta: Map<String, Value>,
	#[serde(default)]
	pub blocks: Vec<Value>,
}

impl PandocDocument {
	pub fn from_json(input: &str) -> GlossaryResult<Self> {
		serde_json::from_str(input).map_err(|e| GlossaryError::InvalidDocument(e.to_string()))
	}

	pub fn to_json(&self) -> GlossaryResult<String> {
		serde_json::to_string(self).map_err(|e| GlossaryError::InvalidDocument(e.to_string()))
	}

	/// Read a boolean metadata flag. Accepts `MetaBool` and the textual forms
	/// pandoc produces for `key: "true"`.
	pub fn meta_flag(&self, key: &str) -> bool {
		let Some(value) = self.meta.get(key) else {
			return false;
		};

		match element_parts(value) {
			Some(("MetaBool", content)) => content.as_bool().unwrap_or(false),
			Some(("MetaString", content)) => content.as_str().is_some_and(is_truthy),
			Some(("MetaInlines", content)) => {
				content.as_array().is_some_and(|inlines| match inlines.as_slice() {
					[single] => {
						matches!(element_parts(single), Some(("Str", text)) if text.as_str().is_some_and(is_truthy))
					}
					_ => false,
				})
			}
			_ => false,
		}
	}
}

fn is_truthy(text: &str) -> bool {
	matches!(text.to_ascii_lowercase().as_str(), "true" | "yes" | "on")
}

/// Called once per tagged element while walking the tree.
pub trait ElementVisitor {
	/// Return a replacement for the element, or `None` to keep it.
	fn visit(&mut self, tag: &str, content: &Value) -> Option<Value>;
}

/// Walk `value` depth first. Elements inside arrays are offered to the
/// visitor; a replacement is walked in turn.
pub fn walk<V: ElementVisitor + ?Sized>(value: &mut Value, visitor: &mut V) {
	match value {
		Value::Array(items) => walk_items(items, visitor),
		Value::Object(map) => {
			for child in map.values_mut() {
				walk(child, visitor);
			}
		}
		_ => {}
	}
}

fn walk_items<V: ElementVisitor + ?Sized>(items: &mut [Value], visitor: &mut V) {
	for item in items {
		let replacement = element_parts(item).and_then(|(tag, content)| visitor.visit(tag, content));
		if let Some(replacement) = replacement {
			*item = replacement;
		}
		walk(item, visitor);
	}
}

/// Split a tagged element into its tag and payload.
fn element_parts(value: &Value) -> Option<(&str, &Value)> {
	let object = value.as_object()?;
	let tag = object.get("t")?.as_str()?;
	Some((tag, object.get("c").unwrap_or(&NULL)))
}

impl Session<'_> {
	/// The per-element callback. Only `Str` leaves are considered, and only
	/// for the supported output formats.
	pub fn on_element(&mut self, tag: &str, content: &Value, format: &str) -> Option<Value> {
		OutputFormat::from_name(format)?;
		if tag != "Str" {
			return None;
		}

		let rewritten = self.resolve(content.as_str()?)?;
		Some(raw_inline(&rewritten))
	}
}

/// Visitor that feeds every element to a [`Session`].
#[derive(Debug)]
pub struct GlossaryFilter<'s> {
	session: Session<'s>,
	format: String,
}

impl<'s> GlossaryFilter<'s> {
	pub fn new(store: &'s mut EntryStore, format: impl Into<String>) -> Self {
		Self {
			session: Session::new(store),
			format: format.into(),
		}
	}

	pub fn finish(self) -> Projection {
		self.session.finish()
	}
}

impl ElementVisitor for GlossaryFilter<'_> {
	fn visit(&mut self, tag: &str, content: &Value) -> Option<Value> {
		self.session.on_element(tag, content, &self.format)
	}
}

/// Run the filter over one document: rewrite references in the body (or dump
/// every entry when the document asks for it) and merge the resulting
/// projection into the metadata.
pub fn filter_document(
	document: &mut PandocDocument,
	store: &mut EntryStore,
	format: &str,
) -> Projection {
	if OutputFormat::from_name(format).is_none() {
		debug!(format, "unsupported output format, leaving document untouched");
		return Projection::default();
	}

	let mut filter = GlossaryFilter::new(store, format);
	if document.meta_flag(FULL_GLOSSARY_KEY) {
		filter.session.project_all();
	} else {
		walk_items(&mut document.blocks, &mut filter);
	}

	let projection = filter.finish();
	apply_projection(&mut document.meta, &projection);
	projection
}

/// Merge a projection into pandoc metadata. Labels already present in the
/// document's own entry maps keep their authored values.
pub fn apply_projection(meta: &mut Map<String, Value>, projection: &Projection) {
	if projection.has_references() {
		meta.insert(HAS_GLOSSARY_KEY.to_string(), meta_bool(true));
	}

	for kind in EntryKind::ALL {
		let entries = projection.entries(kind);
		if entries.is_empty() {
			continue;
		}

		let slot = meta
			.entry(kind.metadata_key())
			.or_insert_with(|| meta_map(Map::new()));
		if !matches!(element_parts(slot), Some(("MetaMap", Value::Object(_)))) {
			warn!(key = kind.metadata_key(), "replacing metadata value that is not a map");
			*slot = meta_map(Map::new());
		}

		let Some(fields) = slot.get_mut("c").and_then(Value::as_object_mut) else {
			continue;
		};
		for (label, entry) in entries {
			fields
				.entry(label.as_str())
				.or_insert_with(|| projected_to_meta(entry));
		}
	}
}

fn projected_to_meta(entry: &ProjectedEntry) -> Value {
	let fields = entry
		.iter()
		.map(|(field, value)| ((*field).to_string(), meta_string(value)))
		.collect();
	meta_map(fields)
}

pub fn raw_inline(text: &str) -> Value {
	json!({ "t": "RawInline", "c": [RAW_FORMAT, text] })
}

pub fn meta_string(text: &str) -> Value {
	json!({ "t": "MetaString", "c": text })
}

pub fn meta_bool(value: bool) -> Value {
	json!({ "t": "MetaBool", "c": value })
}

pub fn meta_map(fields: Map<String, Value>) -> Value {
	json!({ "t": "MetaMap", "c": fields })
}
