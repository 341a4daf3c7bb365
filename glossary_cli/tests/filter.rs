mod common;

use glossary_core::AnyEmptyResult;
use serde_json::Value;
use serde_json::json;
use similar_asserts::assert_eq;

#[test]
fn filter_rewrites_references_and_records_stubs() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	let output = common::glossary_cmd()
		.arg("latex")
		.arg("--path")
		.arg(tmp.path())
		.write_stdin(common::paragraph_json(&["See", "{g:lexer}", "and", "{a:ast}."]))
		.assert()
		.code(1)
		.stderr(predicates::str::contains(
			"empty name and description for glossary label `lexer`",
		))
		.stderr(predicates::str::contains(
			"empty name and long for acronym label `ast`",
		))
		.get_output()
		.stdout
		.clone();

	let document: Value = serde_json::from_slice(&output)?;
	let inlines = &document["blocks"][0]["c"];
	assert_eq!(
		inlines[2],
		json!({ "t": "RawInline", "c": ["latex", "\\gls{lexer}{$_G$}"] })
	);
	assert_eq!(
		inlines[6],
		json!({ "t": "RawInline", "c": ["latex", "\\gls{ast}{$_A$}."] })
	);
	assert_eq!(
		document["meta"]["has-glossary"],
		json!({ "t": "MetaBool", "c": true })
	);
	assert!(document["meta"]["glossary-entries"]["c"]["lexer"].is_object());
	assert!(document["meta"]["acronym-entries"]["c"]["ast"].is_object());

	let glossary: Value =
		serde_yaml_ng::from_str(&std::fs::read_to_string(tmp.path().join("glossary.yaml"))?)?;
	assert_eq!(glossary["lexer"]["name"], Value::String(String::new()));
	let acronyms: Value =
		serde_yaml_ng::from_str(&std::fs::read_to_string(tmp.path().join("acronyms.yaml"))?)?;
	assert_eq!(acronyms["ast"]["long"], Value::String(String::new()));

	Ok(())
}

#[test]
fn filter_succeeds_when_entries_are_complete() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("glossary.yaml"), common::COMPLETE_GLOSSARY)?;
	std::fs::write(tmp.path().join("acronyms.yaml"), common::COMPLETE_ACRONYMS)?;

	let output = common::glossary_cmd()
		.arg("latex")
		.arg("--path")
		.arg(tmp.path())
		.write_stdin(common::paragraph_json(&["{Gs:compiler}", "{a:ast}"]))
		.assert()
		.success()
		.get_output()
		.stdout
		.clone();

	let document: Value = serde_json::from_slice(&output)?;
	assert_eq!(
		document["meta"]["glossary-entries"]["c"]["compiler"]["c"]["description"],
		json!({ "t": "MetaString", "c": "a program that translates source code" })
	);

	assert_eq!(
		std::fs::read_to_string(tmp.path().join("glossary.yaml"))?,
		common::COMPLETE_GLOSSARY
	);
	assert_eq!(
		std::fs::read_to_string(tmp.path().join("acronyms.yaml"))?,
		common::COMPLETE_ACRONYMS
	);

	Ok(())
}

#[test]
fn filter_leaves_untouched_kind_on_disk() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let glossary = "# hand edited\ncompiler:   {name: compiler, description: translates code}\n";
	std::fs::write(tmp.path().join("glossary.yaml"), glossary)?;

	common::glossary_cmd()
		.arg("latex")
		.arg("--path")
		.arg(tmp.path())
		.write_stdin(common::paragraph_json(&["{a:cpu}"]))
		.assert()
		.code(1);

	assert_eq!(
		std::fs::read_to_string(tmp.path().join("glossary.yaml"))?,
		glossary
	);
	assert!(tmp.path().join("acronyms.yaml").is_file());

	Ok(())
}

#[test]
fn filter_passes_other_formats_through() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = common::paragraph_json(&["{g:lexer}"]);

	let output = common::glossary_cmd()
		.arg("html")
		.arg("--path")
		.arg(tmp.path())
		.write_stdin(input.clone())
		.assert()
		.success()
		.get_output()
		.stdout
		.clone();

	let expected: Value = serde_json::from_str(&input)?;
	let actual: Value = serde_json::from_slice(&output)?;
	assert_eq!(actual, expected);
	assert!(!tmp.path().join("glossary.yaml").exists());

	Ok(())
}

#[test]
fn filter_warns_about_missing_entry_files() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::glossary_cmd()
		.arg("json")
		.arg("--path")
		.arg(tmp.path())
		.write_stdin(common::paragraph_json(&["plain", "text"]))
		.assert()
		.success()
		.stderr(predicates::str::contains("entry file not found"));

	Ok(())
}

#[test]
fn filter_aborts_on_corrupt_entry_file() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("acronyms.yaml"), "- not\n- a mapping\n")?;

	common::glossary_cmd()
		.arg("latex")
		.arg("--path")
		.arg(tmp.path())
		.write_stdin(common::paragraph_json(&["{a:ast}"]))
		.assert()
		.code(2)
		.stdout(predicates::str::is_empty())
		.stderr(predicates::str::contains("failed to parse entry file"));

	assert!(!tmp.path().join("glossary.yaml").exists());
	assert_eq!(
		std::fs::read_to_string(tmp.path().join("acronyms.yaml"))?,
		"- not\n- a mapping\n"
	);

	Ok(())
}

#[test]
fn filter_rejects_invalid_document() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::glossary_cmd()
		.arg("latex")
		.arg("--path")
		.arg(tmp.path())
		.write_stdin("not json")
		.assert()
		.code(2)
		.stderr(predicates::str::contains("invalid pandoc document"));

	Ok(())
}

#[test]
fn filter_requires_output_format() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::glossary_cmd()
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicates::str::contains("No output format specified"));

	Ok(())
}

#[test]
fn filter_projects_full_glossary_on_request() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("glossary.yaml"), common::COMPLETE_GLOSSARY)?;
	std::fs::write(tmp.path().join("acronyms.yaml"), common::COMPLETE_ACRONYMS)?;
	let input = r#"{"pandoc-api-version":[1,23,1],"meta":{"full-glossary":{"t":"MetaBool","c":true}},"blocks":[]}"#;

	let output = common::glossary_cmd()
		.arg("latex")
		.arg("--path")
		.arg(tmp.path())
		.write_stdin(input)
		.assert()
		.success()
		.get_output()
		.stdout
		.clone();

	let document: Value = serde_json::from_slice(&output)?;
	assert!(document["meta"]["glossary-entries"]["c"]["compiler"].is_object());
	assert!(document["meta"]["acronym-entries"]["c"]["ast"].is_object());

	Ok(())
}
