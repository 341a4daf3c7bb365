mod common;

use glossary_core::AnyEmptyResult;
use predicates::prelude::PredicateBooleanExt;

#[test]
fn check_passes_with_complete_entries() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("glossary.yaml"), common::COMPLETE_GLOSSARY)?;
	std::fs::write(tmp.path().join("acronyms.yaml"), common::COMPLETE_ACRONYMS)?;

	common::glossary_cmd()
		.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains(
			"Check passed: 1 glossary and 1 acronym entries are complete.",
		));

	Ok(())
}

#[test]
fn check_passes_without_entry_files() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::glossary_cmd()
		.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("Check passed"));

	assert!(!tmp.path().join("glossary.yaml").exists());
	assert!(!tmp.path().join("acronyms.yaml").exists());

	Ok(())
}

#[test]
fn check_reports_each_incomplete_entry() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(
		tmp.path().join("glossary.yaml"),
		"lexer:\n  name: lexer\n  description: ''\nparser:\n  name: parser\n  description: builds trees\n",
	)?;
	std::fs::write(tmp.path().join("acronyms.yaml"), "cpu:\n  name: ~\n  long: ~\n")?;

	common::glossary_cmd()
		.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(1)
		.stderr(predicates::str::contains(
			"error: empty description for glossary label `lexer`",
		))
		.stderr(predicates::str::contains(
			"error: empty name and long for acronym label `cpu`",
		))
		.stderr(predicates::str::contains("2 incomplete entries found."))
		.stderr(predicates::str::contains("label `parser`").not());

	Ok(())
}

#[test]
fn check_does_not_rewrite_entry_files() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let acronyms = "cpu: {name: CPU, long: ''}\n";
	std::fs::write(tmp.path().join("acronyms.yaml"), acronyms)?;

	common::glossary_cmd()
		.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(1)
		.stderr(predicates::str::contains("1 incomplete entry found."));

	assert_eq!(
		std::fs::read_to_string(tmp.path().join("acronyms.yaml"))?,
		acronyms
	);

	Ok(())
}
