use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::EntryKind;

/// `{cmd:label}` where both parts are word characters.
static REFERENCE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"\{(?P<cmd>\w+):(?P<label>\w+)\}").expect("reference pattern is a valid regex")
});

/// How a referenced entry should be displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
	Singular,
	Plural,
	SingularCapitalized,
	PluralCapitalized,
	Acronym,
}

/// A reference command mnemonic and what it expands to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command {
	/// Text written before the colon, e.g. `Gs`.
	pub mnemonic: &'static str,
	pub kind: EntryKind,
	pub variant: Variant,
	/// Macro name emitted for the renderer, without the backslash.
	pub renderer: &'static str,
}

pub const GLOSSARY_COMMANDS: [Command; 4] = [
	Command {
		mnemonic: "g",
		kind: EntryKind::Glossary,
		variant: Variant::Singular,
		renderer: "gls",
	},
	Command {
		mnemonic: "gs",
		kind: EntryKind::Glossary,
		variant: Variant::Plural,
		renderer: "glspl",
	},
	Command {
		mnemonic: "G",
		kind: EntryKind::Glossary,
		variant: Variant::SingularCapitalized,
		renderer: "Gls",
	},
	Command {
		mnemonic: "Gs",
		kind: EntryKind::Glossary,
		variant: Variant::PluralCapitalized,
		renderer: "Glspl",
	},
];

pub const ACRONYM_COMMANDS: [Command; 1] = [Command {
	mnemonic: "a",
	kind: EntryKind::Acronym,
	variant: Variant::Acronym,
	renderer: "gls",
}];

/// Find the command for a mnemonic. Glossary commands take precedence over
/// acronym commands.
pub fn lookup_command(mnemonic: &str) -> Option<&'static Command> {
	GLOSSARY_COMMANDS
		.iter()
		.chain(ACRONYM_COMMANDS.iter())
		.find(|command| command.mnemonic == mnemonic)
}

/// A recognized reference token inside a text fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference<'a> {
	pub command: &'static Command,
	pub label: &'a str,
	/// Byte range of the whole `{cmd:label}` token in the fragment.
	pub span: Range<usize>,
}

impl Reference<'_> {
	pub fn kind(&self) -> EntryKind {
		self.command.kind
	}

	/// Renderer markup for this reference, e.g. `\Glspl{bar}{$_G$}`.
	pub fn markup(&self) -> String {
		format!(
			"\\{}{{{}}}{}",
			self.command.renderer,
			self.label,
			self.command.kind.subscript()
		)
	}

	/// The fragment with this token replaced by its markup. Text around the
	/// token is kept.
	pub fn rewrite(&self, text: &str) -> String {
		let mut rewritten = String::with_capacity(text.len() + 16);
		rewritten.push_str(&text[..self.span.start]);
		rewritten.push_str(&self.markup());
		rewritten.push_str(&text[self.span.end..]);
		rewritten
	}
}

/// Look at the first reference-shaped token in `text`.
///
/// Returns `None` when there is no token or when the first token's mnemonic
/// is unknown. Later tokens in the same fragment are never considered.
pub fn find_reference(text: &str) -> Option<Reference<'_>> {
	let captures = REFERENCE_PATTERN.captures(text)?;
	let token = captures.get(0)?;
	let command = lookup_command(captures.name("cmd")?.as_str())?;
	let label = captures.name("label")?.as_str();

	Some(Reference {
		command,
		label,
		span: token.range(),
	})
}
