mod common;

use slotstyle_core::AnyEmptyResult;

#[test]
fn fix_unwraps_single_slot() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("app.vue"), common::WRAPPED)?;

	let mut cmd = common::slotstyle_cmd();
	let _ = cmd
		.arg("fix")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("Fixed 1 slot(s) in 1 file(s)."));

	assert_eq!(std::fs::read_to_string(tmp.path().join("app.vue"))?, common::INLINE);

	Ok(())
}

#[test]
fn fix_wraps_single_slot_with_config_style() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join(".slotstyle.toml"), "style = \"with-wrapper\"\n")?;
	std::fs::write(tmp.path().join("app.vue"), common::INLINE)?;

	let mut cmd = common::slotstyle_cmd();
	let _ = cmd
		.arg("fix")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();

	assert_eq!(std::fs::read_to_string(tmp.path().join("app.vue"))?, common::WRAPPED);

	Ok(())
}

#[test]
fn fix_dry_run_does_not_write() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("app.vue"), common::WRAPPED)?;

	let mut cmd = common::slotstyle_cmd();
	let _ = cmd
		.arg("fix")
		.arg("--dry-run")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains(
			"Dry run: would fix 1 slot(s) in 1 file(s):",
		))
		.stdout(predicates::str::contains("app.vue"))
		.stderr(predicates::str::contains(
			"+  <my-component #default>Content</my-component>",
		));

	assert_eq!(std::fs::read_to_string(tmp.path().join("app.vue"))?, common::WRAPPED);

	Ok(())
}

#[test]
fn fix_is_a_noop_when_clean() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("app.vue"), common::INLINE)?;

	let mut cmd = common::slotstyle_cmd();
	let _ = cmd
		.arg("fix")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains(
			"All single slots already use the configured style.",
		));

	Ok(())
}

#[test]
fn fix_handles_nested_components() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(
		tmp.path().join("app.vue"),
		"<template><outer-comp #default><inner-comp #item>y</inner-comp></outer-comp></template>",
	)?;

	let mut cmd = common::slotstyle_cmd();
	let _ = cmd
		.arg("fix")
		.arg("--style")
		.arg("with-wrapper")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("Fixed 2 slot(s) in 1 file(s)."));

	assert_eq!(
		std::fs::read_to_string(tmp.path().join("app.vue"))?,
		"<template><outer-comp><template #default><inner-comp><template \
		 #item>y</template></inner-comp></template></outer-comp></template>"
	);

	Ok(())
}

#[test]
fn fix_skips_excluded_files() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(
		tmp.path().join("slotstyle.toml"),
		"[exclude]\npatterns = [\"generated/\"]\n",
	)?;
	std::fs::create_dir_all(tmp.path().join("generated"))?;
	std::fs::write(tmp.path().join("generated/app.vue"), common::WRAPPED)?;
	std::fs::write(tmp.path().join("app.vue"), common::INLINE)?;

	let mut cmd = common::slotstyle_cmd();
	let _ = cmd
		.arg("fix")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();

	assert_eq!(
		std::fs::read_to_string(tmp.path().join("generated/app.vue"))?,
		common::WRAPPED
	);

	Ok(())
}
