use std::path::Path;

use serde_json::Map;
use serde_json::Value;
use serde_json::json;

use crate::AcronymEntry;
use crate::EntryPaths;
use crate::EntryStore;
use crate::GlossaryEntry;
use crate::pandoc::PandocDocument;

/// A single paragraph with one `Str` per word, separated by `Space`.
pub fn paragraph(words: &[&str]) -> PandocDocument {
	document(Map::new(), vec![para(words)])
}

pub fn document(meta: Map<String, Value>, blocks: Vec<Value>) -> PandocDocument {
	PandocDocument {
		api_version: vec![1, 23, 1],
		meta,
		blocks,
	}
}

pub fn para(words: &[&str]) -> Value {
	let mut inlines = Vec::new();
	for (index, word) in words.iter().enumerate() {
		if index > 0 {
			inlines.push(json!({ "t": "Space" }));
		}
		inlines.push(json!({ "t": "Str", "c": word }));
	}
	json!({ "t": "Para", "c": inlines })
}

/// All inline elements of the first paragraph.
pub fn first_para_inlines(document: &PandocDocument) -> &Vec<Value> {
	document.blocks[0]["c"]
		.as_array()
		.expect("first block is a paragraph")
}

pub fn entry_paths(dir: &Path) -> EntryPaths {
	EntryPaths::in_dir(dir)
}

pub fn compiler_entry() -> GlossaryEntry {
	GlossaryEntry::new("compiler", "a program that translates source code").with_plural("compilers")
}

pub fn ast_entry() -> AcronymEntry {
	AcronymEntry::new("AST", "abstract syntax tree")
}

/// A clean in-memory store holding `compiler` and `ast`.
pub fn populated_store(dir: &Path) -> EntryStore {
	let mut store = EntryStore::new(entry_paths(dir));
	*store.glossary_mut() =
		crate::Registry::from_entries([("compiler".to_string(), compiler_entry())]);
	*store.acronyms_mut() = crate::Registry::from_entries([("ast".to_string(), ast_entry())]);
	store
}

pub const GLOSSARY_YAML: &str = "# project terms\ncompiler:\n  name: compiler\n  description: a program \
                                 that translates source code\n  plural: compilers\n";

pub const ACRONYMS_YAML: &str = "ast:\n  name: AST\n  long: abstract syntax tree\n";
