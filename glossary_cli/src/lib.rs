use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Pandoc filter that expands glossary and acronym references.",
	long_about = "pandoc-glossary turns `{g:label}`, `{gs:label}`, `{G:label}`, `{Gs:label}` and \
	              `{a:label}` references into LaTeX glossaries commands, and keeps the \
	              definitions in glossary.yaml and acronyms.yaml.\n\nUnknown labels are added to \
	              the YAML files as empty entries; the filter exits with status 1 until every \
	              entry has been filled in.\n\nQuick start:\n  pandoc doc.md --filter \
	              pandoc-glossary -o doc.pdf\n  pandoc-glossary check   Report incomplete \
	              entries\n  pandoc-glossary list    Print every entry"
)]
pub struct GlossaryCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Output format, passed by pandoc when running as a filter. Only `latex`
	/// and `json` are rewritten; other formats pass through unchanged.
	pub format: Option<String>,

	/// Path to the project root directory holding the entry files.
	#[arg(long, short, global = true)]
	pub path: Option<PathBuf>,

	/// Glossary entry file, overriding the config file.
	#[arg(long, global = true)]
	pub glossary_file: Option<PathBuf>,

	/// Acronym entry file, overriding the config file.
	#[arg(long, global = true)]
	pub acronym_file: Option<PathBuf>,

	/// Enable verbose output.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Check that every stored entry has its required fields.
	///
	/// Glossary entries need a `name` and a `description`; acronyms need a
	/// `name` and a `long` form. Exits with a non-zero status code if any entry
	/// is incomplete, which makes it suitable for CI.
	Check,
	/// List every glossary and acronym entry.
	List {
		/// Output format for the listing.
		#[arg(long, value_enum, default_value_t = ListFormat::Text)]
		format: ListFormat,
	},
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
	/// Human-readable output.
	#[default]
	Text,
	/// Machine-readable JSON output.
	Json,
}
