use std::collections::HashMap;
use std::path::PathBuf;

use crate::LineIndex;
use crate::Point;
use crate::SlotDiagnostic;
use crate::SlotStyleOptions;
use crate::SlotStyleResult;
use crate::SlotStyleRule;
use crate::VueHost;
use crate::apply_patches;
use crate::parse;
use crate::project::ProjectContext;

/// Re-linting stops after this many passes even if fixes keep applying.
pub const MAX_FIX_PASSES: usize = 10;

/// Result of fixing a single source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixOutcome {
	/// The source after all passes.
	pub output: String,
	/// Total number of patches applied across passes.
	pub applied: usize,
	/// Number of lint passes that applied at least one patch.
	pub passes: usize,
	/// Diagnostics still reported against `output`.
	pub remaining: Vec<SlotDiagnostic>,
}

impl FixOutcome {
	pub fn is_changed(&self) -> bool {
		self.applied > 0
	}
}

/// Parse `source` as a Vue template and report every single slot written in
/// the wrong style.
pub fn check_source(source: &str, options: &SlotStyleOptions) -> SlotStyleResult<Vec<SlotDiagnostic>> {
	let document = parse(source)?;
	let host = VueHost;

	Ok(SlotStyleRule::new(*options, &host).check_document(&document))
}

/// Apply every fix to `source`. Components nested inside another component's
/// rewritten region are picked up on a later pass.
pub fn fix_source(source: &str, options: &SlotStyleOptions) -> SlotStyleResult<FixOutcome> {
	let mut output = source.to_string();
	let mut applied = 0;
	let mut passes = 0;

	loop {
		let diagnostics = check_source(&output, options)?;

		if passes == MAX_FIX_PASSES {
			tracing::warn!(passes, "fix passes exhausted");
			return Ok(FixOutcome {
				output,
				applied,
				passes,
				remaining: diagnostics,
			});
		}

		let result = apply_patches(
			&output,
			diagnostics
				.iter()
				.filter_map(|diagnostic| diagnostic.patch.as_ref()),
		)?;

		if result.applied == 0 {
			return Ok(FixOutcome {
				output,
				applied,
				passes,
				remaining: diagnostics,
			});
		}

		tracing::debug!(pass = passes + 1, applied = result.applied, deferred = result.deferred, "applied fixes");

		output = result.output;
		applied += result.applied;
		passes += 1;
	}
}

/// A diagnostic located in a file.
#[derive(Debug, Clone)]
pub struct FileDiagnostic {
	pub file: PathBuf,
	pub diagnostic: SlotDiagnostic,
	/// Where the diagnostic starts.
	pub start: Point,
	/// Where the diagnostic ends.
	pub end: Point,
}

impl FileDiagnostic {
	fn locate(file: PathBuf, source: &str, lines: &LineIndex, diagnostic: SlotDiagnostic) -> Self {
		let start = lines.point(source, diagnostic.span.start);
		let end = lines.point(source, diagnostic.span.end);

		Self {
			file,
			diagnostic,
			start,
			end,
		}
	}
}

/// Result of checking a project.
#[derive(Debug, Default)]
pub struct CheckResult {
	/// Every diagnostic, grouped by file in scan order and in document order
	/// within a file.
	pub diagnostics: Vec<FileDiagnostic>,
	/// Number of files checked.
	pub file_count: usize,
}

impl CheckResult {
	/// Returns true if no single slot is written in the wrong style.
	pub fn is_ok(&self) -> bool {
		self.diagnostics.is_empty()
	}
}

/// Result of fixing a project.
#[derive(Debug, Default)]
pub struct UpdateResult {
	/// Files that were modified and their new content.
	pub updated_files: HashMap<PathBuf, String>,
	/// Number of patches applied across all files.
	pub fixed_count: usize,
	/// Diagnostics that survive fixing, located against the fixed content.
	pub remaining: Vec<FileDiagnostic>,
	/// Number of files checked.
	pub file_count: usize,
}

/// Check every file of a scanned project.
pub fn check_project(ctx: &ProjectContext) -> SlotStyleResult<CheckResult> {
	let mut result = CheckResult::default();

	for file in &ctx.files {
		let source = ctx.read_file(file)?;
		let lines = LineIndex::new(&source);

		for diagnostic in check_source(&source, &ctx.options)? {
			result
				.diagnostics
				.push(FileDiagnostic::locate(file.clone(), &source, &lines, diagnostic));
		}

		result.file_count += 1;
	}

	Ok(result)
}

/// Compute the fixed contents of every file in a scanned project without
/// writing anything.
pub fn compute_fixes(ctx: &ProjectContext) -> SlotStyleResult<UpdateResult> {
	let mut result = UpdateResult::default();

	for file in &ctx.files {
		let source = ctx.read_file(file)?;
		let outcome = fix_source(&source, &ctx.options)?;
		let lines = LineIndex::new(&outcome.output);

		for diagnostic in outcome.remaining {
			result
				.remaining
				.push(FileDiagnostic::locate(file.clone(), &outcome.output, &lines, diagnostic));
		}

		if outcome.applied > 0 {
			result.fixed_count += outcome.applied;
			result.updated_files.insert(file.clone(), outcome.output);
		}

		result.file_count += 1;
	}

	Ok(result)
}

/// Write the updated files to disk.
pub fn write_updates(result: &UpdateResult) -> SlotStyleResult<()> {
	for (path, content) in &result.updated_files {
		std::fs::write(path, content)?;
	}

	Ok(())
}
