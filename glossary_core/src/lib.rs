//! `glossary_core` is the core library for the
//! [pandoc-glossary](https://github.com/ifiokjr/pandoc-glossary) filter. It
//! recognizes glossary and acronym references in pandoc documents, rewrites
//! them into LaTeX `glossaries` commands, and keeps the term definitions in
//! two human-editable YAML files.
//!
//! ## Processing Pipeline
//!
//! ```text
//! pandoc JSON AST
//!   -> Walker (offers every tagged element to the filter)
//!   -> Resolver (finds `{cmd:label}` tokens in `Str` elements)
//!   -> Session (looks up or stubs the entry, projects it once per document)
//!   -> Metadata (`has-glossary`, `glossary-entries`, `acronym-entries`)
//!   -> Entry store save (only registries that changed)
//!   -> Validation (entries whose required fields are still empty)
//! ```
//!
//! ## Reference Commands
//!
//! | token | expands to |
//! |---|---|
//! | `{g:label}` | `\gls{label}{$_G$}` |
//! | `{gs:label}` | `\glspl{label}{$_G$}` |
//! | `{G:label}` | `\Gls{label}{$_G$}` |
//! | `{Gs:label}` | `\Glspl{label}{$_G$}` |
//! | `{a:label}` | `\gls{label}{$_A$}` |
//!
//! ## Modules
//!
//! - [`config`]: configuration loading from `pandoc-glossary.toml`.
//! - [`pandoc`]: the pandoc JSON document model, tree walker and per-element
//!   callback.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use glossary_core::EntryPaths;
//! use glossary_core::EntryStore;
//! use glossary_core::pandoc::PandocDocument;
//! use glossary_core::pandoc::filter_document;
//! use glossary_core::validate;
//!
//! let input = std::fs::read_to_string("document.json").unwrap();
//! let mut document = PandocDocument::from_json(&input).unwrap();
//! let mut store = EntryStore::load(EntryPaths::default()).unwrap();
//!
//! filter_document(&mut document, &mut store, "latex");
//! store.save().unwrap();
//!
//! for entry in validate(&store).incomplete {
//! 	eprintln!("{entry}");
//! }
//! ```

pub use config::*;
pub use entry::*;
pub use error::*;
pub use projection::*;
pub use resolver::*;
pub use session::*;
pub use store::*;
pub use validate::*;

pub mod config;
mod entry;
#[allow(unused_assignments)]
mod error;
pub mod pandoc;
mod projection;
mod resolver;
mod session;
mod store;
mod validate;

#[cfg(test)]
mod __fixtures;
