mod common;

use glossary_core::AnyEmptyResult;
use serde_json::Value;
use serde_json::json;
use similar_asserts::assert_eq;

#[test]
fn list_prints_entries_as_json() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("glossary.yaml"), common::COMPLETE_GLOSSARY)?;
	std::fs::write(tmp.path().join("acronyms.yaml"), common::COMPLETE_ACRONYMS)?;

	let output = common::glossary_cmd()
		.arg("list")
		.arg("--format")
		.arg("json")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.get_output()
		.stdout
		.clone();

	let listing: Value = serde_json::from_slice(&output)?;
	assert_eq!(
		listing,
		json!({
			"glossary": {
				"compiler": {
					"name": "compiler",
					"description": "a program that translates source code"
				}
			},
			"acronyms": {
				"ast": { "name": "AST", "long": "abstract syntax tree" }
			}
		})
	);

	Ok(())
}

#[test]
fn list_marks_incomplete_entries_in_text_output() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("glossary.yaml"), common::COMPLETE_GLOSSARY)?;
	std::fs::write(tmp.path().join("acronyms.yaml"), "cpu:\n  name: CPU\n  long: ''\n")?;

	common::glossary_cmd()
		.arg("list")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("Glossary"))
		.stdout(predicates::str::contains(
			"compiler: a program that translates source code",
		))
		.stdout(predicates::str::contains("Acronyms"))
		.stdout(predicates::str::contains("incomplete (missing long)"));

	Ok(())
}
