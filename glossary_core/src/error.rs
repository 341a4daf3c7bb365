use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum GlossaryError {
	#[error(transparent)]
	#[diagnostic(code(glossary::io_error))]
	Io(#[from] std::io::Error),

	#[error("failed to parse entry file `{path}`: {reason}")]
	#[diagnostic(
		code(glossary::entry_file_parse),
		help("the file must be a YAML mapping of labels to entries, e.g. `term: {{ name: ..., description: ... }}`")
	)]
	EntryFileParse { path: String, reason: String },

	#[error("failed to write entry file `{path}`: {reason}")]
	#[diagnostic(code(glossary::entry_file_write))]
	EntryFileWrite { path: String, reason: String },

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(glossary::config_parse),
		help("check that pandoc-glossary.toml is valid TOML with an optional [files] section")
	)]
	ConfigParse(String),

	#[error("invalid pandoc document: {0}")]
	#[diagnostic(
		code(glossary::invalid_document),
		help("pandoc-glossary expects the JSON AST that pandoc writes with `--to json` or `--filter`")
	)]
	InvalidDocument(String),
}

pub type GlossaryResult<T> = Result<T, GlossaryError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
