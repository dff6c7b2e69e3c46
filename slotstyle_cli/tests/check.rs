mod common;

use clap::Parser;
use serde_json::Value;
use slotstyle_cli::Commands;
use slotstyle_cli::OutputFormat;
use slotstyle_cli::SlotStyleCli;
use slotstyle_core::AnyEmptyResult;
use slotstyle_core::RawSlotStyleOptions;
use slotstyle_core::SlotStyle;
use slotstyle_core::SlotStyleOptions;

#[test]
fn check_passes_when_slots_match_style() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("app.vue"), common::INLINE)?;

	let mut cmd = common::slotstyle_cmd();
	let _ = cmd
		.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("Check passed: 1 file(s)"));

	Ok(())
}

#[test]
fn check_fails_for_wrapped_slot_by_default() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("app.vue"), common::WRAPPED)?;

	let mut cmd = common::slotstyle_cmd();
	let _ = cmd
		.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(1)
		.stderr(predicates::str::contains("Check failed."))
		.stderr(predicates::str::contains("app.vue:2:17"))
		.stderr(predicates::str::contains(
			"Expected single slot to be directly on the component.",
		))
		.stderr(predicates::str::contains("1 single slot(s) in the wrong style"));

	Ok(())
}

#[test]
fn check_style_flag_overrides_config() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("slotstyle.toml"), "style = \"with-wrapper\"\n")?;
	std::fs::write(tmp.path().join("app.vue"), common::INLINE)?;

	let mut cmd = common::slotstyle_cmd();
	let _ = cmd
		.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(1)
		.stderr(predicates::str::contains(
			"Expected single slot to be in a <template> wrapper.",
		));

	let mut cmd = common::slotstyle_cmd();
	let _ = cmd
		.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.arg("--style")
		.arg("without-wrapper")
		.assert()
		.success();

	Ok(())
}

#[test]
fn check_json_output() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("app.vue"), common::WRAPPED)?;

	let mut cmd = common::slotstyle_cmd();
	let output = cmd
		.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.arg("--format")
		.arg("json")
		.output()?;

	assert_eq!(output.status.code(), Some(1));

	let json: Value = serde_json::from_slice(&output.stdout)?;
	assert_eq!(json["ok"], Value::Bool(false));

	let entry = &json["diagnostics"][0];
	assert_eq!(entry["file"], "app.vue");
	assert_eq!(entry["line"], 2);
	assert_eq!(entry["column"], 17);
	assert_eq!(entry["endColumn"], 54);
	assert_eq!(entry["messageId"], "expectedWithoutWrapper");
	assert_eq!(entry["slot"], "default");
	assert_eq!(entry["fixable"], true);

	Ok(())
}

#[test]
fn check_github_output() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("app.vue"), common::INLINE)?;

	let mut cmd = common::slotstyle_cmd();
	let _ = cmd
		.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.arg("--format")
		.arg("github")
		.arg("--named-slot-style")
		.arg("without-wrapper")
		.arg("--default-slot-style")
		.arg("with-wrapper")
		.assert()
		.code(1)
		.stdout(predicates::str::contains(
			"::warning file=app.vue,line=2,col=17,endLine=2,endColumn=25::Expected single slot to \
			 be in a <template> wrapper.",
		));

	Ok(())
}

#[test]
fn check_diff_shows_fixed_content() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("app.vue"), common::WRAPPED)?;

	let mut cmd = common::slotstyle_cmd();
	let _ = cmd
		.arg("check")
		.arg("--diff")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(1)
		.stderr(predicates::str::contains(
			"-  <my-component><template #default>Content</template></my-component>",
		))
		.stderr(predicates::str::contains(
			"+  <my-component #default>Content</my-component>",
		));

	// Checking never writes.
	assert_eq!(std::fs::read_to_string(tmp.path().join("app.vue"))?, common::WRAPPED);

	Ok(())
}

#[test]
fn check_only_given_files() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("bad.vue"), common::WRAPPED)?;
	std::fs::write(tmp.path().join("good.vue"), common::INLINE)?;

	let mut cmd = common::slotstyle_cmd();
	let _ = cmd
		.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.arg(tmp.path().join("good.vue"))
		.assert()
		.success();

	Ok(())
}

#[test]
fn check_respects_comment_significance() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(
		tmp.path().join("app.vue"),
		"<template><my-component><!-- note --><template #default>x</template></my-component></template>\n",
	)?;

	let mut cmd = common::slotstyle_cmd();
	let _ = cmd
		.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();

	let mut cmd = common::slotstyle_cmd();
	let _ = cmd
		.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.arg("--treat-comments-as-insignificant")
		.assert()
		.code(1);

	Ok(())
}

#[test]
fn check_reports_unterminated_tags() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("app.vue"), "<template><my-comp")?;

	let mut cmd = common::slotstyle_cmd();
	let _ = cmd
		.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicates::str::contains("unterminated start tag at byte 10"));

	Ok(())
}

#[test]
fn check_reports_invalid_config() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("slotstyle.toml"), "style = \"sometimes\"\n")?;

	let mut cmd = common::slotstyle_cmd();
	let _ = cmd
		.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicates::str::contains("failed to parse config file"));

	Ok(())
}

#[test]
fn cli_flags_layer_over_config_options() {
	let cli = SlotStyleCli::parse_from([
		"slotstyle",
		"--style",
		"with-wrapper",
		"--default-slot-style",
		"without-wrapper",
		"check",
		"--format",
		"github",
	]);

	assert!(matches!(
		cli.command,
		Some(Commands::Check {
			format: OutputFormat::Github,
			diff: false,
			..
		})
	));
	assert_eq!(
		cli.apply_options(None),
		SlotStyleOptions {
			named_slot_style: SlotStyle::WithWrapper,
			default_slot_style: SlotStyle::WithoutWrapper,
			treat_comments_as_insignificant: false,
		}
	);
}

#[test]
fn named_slot_style_flag_sets_default_slot_style_when_unset() -> AnyEmptyResult {
	let cli = SlotStyleCli::parse_from(["slotstyle", "--named-slot-style", "with-wrapper", "check"]);
	let from_config = RawSlotStyleOptions::from_json(r#"{"namedSlotStyle":"with-wrapper"}"#)?;

	assert_eq!(cli.apply_options(None), SlotStyleOptions::from(from_config));
	assert_eq!(
		cli.apply_options(None),
		SlotStyleOptions {
			named_slot_style: SlotStyle::WithWrapper,
			default_slot_style: SlotStyle::WithWrapper,
			treat_comments_as_insignificant: false,
		}
	);

	// A default slot style written in config still wins over the fallback.
	let raw = RawSlotStyleOptions::from_json(r#"{"defaultSlotStyle":"without-wrapper"}"#)?;
	assert_eq!(
		cli.apply_options(Some(&raw)),
		SlotStyleOptions {
			named_slot_style: SlotStyle::WithWrapper,
			default_slot_style: SlotStyle::WithoutWrapper,
			treat_comments_as_insignificant: false,
		}
	);

	Ok(())
}

#[test]
fn check_named_slot_style_flag_matches_config_table() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("app.vue"), common::INLINE)?;

	let mut cmd = common::slotstyle_cmd();
	let _ = cmd
		.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.arg("--named-slot-style")
		.arg("with-wrapper")
		.assert()
		.code(1)
		.stderr(predicates::str::contains(
			"Expected single slot to be in a <template> wrapper.",
		));

	std::fs::write(
		tmp.path().join("slotstyle.toml"),
		"[style]\nnamedSlotStyle = \"with-wrapper\"\n",
	)?;

	let mut cmd = common::slotstyle_cmd();
	let _ = cmd
		.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(1)
		.stderr(predicates::str::contains(
			"Expected single slot to be in a <template> wrapper.",
		));

	Ok(())
}
