use std::io::Read;
use std::io::Write;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use glossary_cli::Commands;
use glossary_cli::GlossaryCli;
use glossary_cli::ListFormat;
use glossary_core::AcronymEntry;
use glossary_core::Entry;
use glossary_core::EntryKind;
use glossary_core::EntryPaths;
use glossary_core::EntryStore;
use glossary_core::GlossaryConfig;
use glossary_core::GlossaryEntry;
use glossary_core::ValidationReport;
use glossary_core::pandoc::PandocDocument;
use glossary_core::pandoc::filter_document;
use glossary_core::validate;
use owo_colors::OwoColorize;
use tracing::debug;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,yellow) => {
		if color_enabled() {
			format!("{}", $text.yellow())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = GlossaryCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	setup_tracing(args.verbose, use_color);

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	let result = match args.command {
		Some(Commands::Check) => run_check(&args),
		Some(Commands::List { format }) => run_list(&args, format),
		None => run_filter(&args),
	};

	if let Err(e) = result {
		// Try to render through miette for rich diagnostics with help text
		// and error codes.
		match e.downcast::<glossary_core::GlossaryError>() {
			Ok(glossary_err) => {
				let report: miette::Report = (*glossary_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

/// Logs go to stderr: stdout carries the filtered document back to pandoc.
fn setup_tracing(verbose: bool, use_color: bool) {
	use tracing_subscriber::EnvFilter;

	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
		if verbose {
			EnvFilter::new("glossary_core=debug,pandoc_glossary=debug,warn")
		} else {
			EnvFilter::new("warn")
		}
	});

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(use_color)
		.with_target(false)
		.init();
}

fn resolve_root(args: &GlossaryCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

fn resolve_entry_paths(args: &GlossaryCli) -> Result<EntryPaths, Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let config = GlossaryConfig::load(&root)?.unwrap_or_default();
	let mut paths = config.entry_paths(&root);

	if let Some(glossary_file) = &args.glossary_file {
		paths.glossary = root.join(glossary_file);
	}
	if let Some(acronym_file) = &args.acronym_file {
		paths.acronyms = root.join(acronym_file);
	}

	debug!(
		glossary = %paths.glossary.display(),
		acronyms = %paths.acronyms.display(),
		"resolved entry files"
	);

	Ok(paths)
}

fn run_filter(args: &GlossaryCli) -> Result<(), Box<dyn std::error::Error>> {
	let Some(format) = args.format.as_deref() else {
		eprintln!(
			"No output format specified. Run through `pandoc --filter pandoc-glossary` or see \
			 `pandoc-glossary --help`."
		);
		process::exit(2);
	};

	let mut input = String::new();
	std::io::stdin().read_to_string(&mut input)?;

	// A corrupt entry file aborts the run before any element is processed.
	let mut store = EntryStore::load(resolve_entry_paths(args)?)?;
	let mut document = PandocDocument::from_json(&input)?;

	let projection = filter_document(&mut document, &mut store, format);
	debug!(
		format,
		glossary = projection.entries(EntryKind::Glossary).len(),
		acronyms = projection.entries(EntryKind::Acronym).len(),
		"filtered document"
	);

	let output = document.to_json()?;
	let written = store.save()?;
	for kind in written {
		debug!(kind = %kind, path = %store.paths().get(kind).display(), "updated entry file");
	}

	let mut stdout = std::io::stdout().lock();
	stdout.write_all(output.as_bytes())?;
	stdout.flush()?;

	let report = validate(&store);
	print_incomplete(&report);
	if !report.is_ok() {
		process::exit(1);
	}

	Ok(())
}

fn run_check(args: &GlossaryCli) -> Result<(), Box<dyn std::error::Error>> {
	let store = EntryStore::load(resolve_entry_paths(args)?)?;
	let report = validate(&store);

	if report.is_ok() {
		println!(
			"{} {} glossary and {} acronym entries are complete.",
			colored!("Check passed:", green),
			store.glossary().len(),
			store.acronyms().len()
		);
		return Ok(());
	}

	print_incomplete(&report);
	eprintln!();
	eprintln!(
		"{} incomplete entr{} found. Fill in {} and {}.",
		report.incomplete.len(),
		if report.incomplete.len() == 1 { "y" } else { "ies" },
		store.paths().glossary.display(),
		store.paths().acronyms.display()
	);
	process::exit(1);
}

/// One diagnostic line per incomplete entry.
fn print_incomplete(report: &ValidationReport) {
	for entry in &report.incomplete {
		eprintln!("{} {entry}", colored!("error:", red));
	}
}

fn run_list(args: &GlossaryCli, format: ListFormat) -> Result<(), Box<dyn std::error::Error>> {
	let store = EntryStore::load(resolve_entry_paths(args)?)?;

	match format {
		ListFormat::Json => {
			let listing = serde_json::json!({
				"glossary": &**store.glossary(),
				"acronyms": &**store.acronyms(),
			});
			println!("{}", serde_json::to_string_pretty(&listing)?);
		}
		ListFormat::Text => {
			print_section("Glossary");
			for (label, entry) in store.all::<GlossaryEntry>() {
				let plural = entry
					.plural
					.as_deref()
					.map_or_else(String::new, |plural| format!(" ({plural})"));
				print_entry(label, entry, &format!("{}{plural}: {}", entry.name, entry.description));
			}

			print_section("Acronyms");
			for (label, entry) in store.all::<AcronymEntry>() {
				print_entry(label, entry, &format!("{}: {}", entry.name, entry.long));
			}
		}
	}

	Ok(())
}

fn print_section(title: &str) {
	println!();
	println!("{}", colored!(title, bold));
}

fn print_entry<E: Entry>(label: &str, entry: &E, summary: &str) {
	if entry.is_complete() {
		println!("  {label:<20} {summary}");
	} else {
		println!(
			"  {label:<20} {}",
			colored!(format!("incomplete (missing {})", entry.missing_fields().join(", ")), yellow)
		);
	}
}
