use assert_cmd::Command;
use insta_cmd::get_cargo_bin;

pub fn glossary_cmd() -> Command {
	let mut cmd = Command::new(get_cargo_bin("pandoc-glossary"));
	cmd.env("NO_COLOR", "1");
	cmd.env_remove("RUST_LOG");
	cmd
}

/// A pandoc JSON document with one paragraph made of the given words.
#[allow(dead_code)]
pub fn paragraph_json(words: &[&str]) -> String {
	let inlines: Vec<String> = words
		.iter()
		.map(|word| format!(r#"{{"t":"Str","c":"{word}"}}"#))
		.collect();
	format!(
		r#"{{"pandoc-api-version":[1,23,1],"meta":{{}},"blocks":[{{"t":"Para","c":[{}]}}]}}"#,
		inlines.join(r#",{"t":"Space"},"#)
	)
}

#[allow(dead_code)]
pub const COMPLETE_GLOSSARY: &str =
	"compiler:\n  name: compiler\n  description: a program that translates source code\n";

#[allow(dead_code)]
pub const COMPLETE_ACRONYMS: &str = "ast:\n  name: AST\n  long: abstract syntax tree\n";
