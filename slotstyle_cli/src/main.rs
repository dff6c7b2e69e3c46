use std::path::Path;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use owo_colors::OwoColorize;
use similar::ChangeTag;
use similar::TextDiff;
use slotstyle_cli::Commands;
use slotstyle_cli::OutputFormat;
use slotstyle_cli::SlotStyleCli;
use slotstyle_core::AnyResult;
use slotstyle_core::CheckResult;
use slotstyle_core::FileDiagnostic;
use slotstyle_core::check_project;
use slotstyle_core::compute_fixes;
use slotstyle_core::project::ProjectContext;
use slotstyle_core::project::scan_project_with_config;
use slotstyle_core::write_updates;
use tracing_subscriber::EnvFilter;

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
	let args = SlotStyleCli::parse();

	// Respect NO_COLOR env var, --no-color flag and terminals without color.
	let use_color = !args.no_color
		&& std::env::var_os("NO_COLOR").is_none()
		&& supports_color::on(supports_color::Stream::Stderr).is_some();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	init_tracing(args.verbose);

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

	let result = match &args.command {
		Some(Commands::Check {
			files,
			diff,
			format,
		}) => run_check(&args, files, *diff, *format),
		Some(Commands::Fix { files, dry_run }) => run_fix(&args, files, *dry_run),
		None => {
			eprintln!("No subcommand specified. Run `slotstyle --help` for usage.");
			process::exit(2);
		}
	};

	match result {
		Ok(true) => {}
		Ok(false) => process::exit(1),
		Err(e) => {
			// Try to render through miette for rich diagnostics with help text
			// and error codes.
			match e.downcast::<slotstyle_core::SlotStyleError>() {
				Ok(err) => {
					let report: miette::Report = (*err).into();
					eprintln!("{report:?}");
				}
				Err(e) => {
					eprintln!("{} {e}", colored!("error:", red));
				}
			}
			process::exit(2);
		}
	}
}

/// Logs go to stderr. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
	let default_level = if verbose { "slotstyle_core=debug" } else { "warn" };
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

	let _ = tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(color_enabled())
		.without_time()
		.try_init();
}

fn resolve_root(args: &SlotStyleCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

fn scan(args: &SlotStyleCli, files: &[PathBuf]) -> AnyResult<ProjectContext> {
	let root = resolve_root(args);
	let mut ctx = scan_project_with_config(&root)?;
	let options = args.apply_options(ctx.config.style.as_ref());
	ctx = ctx.with_options(options);

	if !files.is_empty() {
		ctx = ctx.with_files(files.to_vec());
	}

	if args.verbose {
		println!(
			"Scanned project: {} file(s), named slots {}, default slot {}",
			ctx.files.len(),
			ctx.options.named_slot_style,
			ctx.options.default_slot_style
		);
	}

	Ok(ctx)
}

/// Returns `Ok(true)` when no single slot is in the wrong style.
fn run_check(
	args: &SlotStyleCli,
	files: &[PathBuf],
	show_diff: bool,
	format: OutputFormat,
) -> AnyResult<bool> {
	let ctx = scan(args, files)?;
	let root = resolve_root(args);
	let result = check_project(&ctx)?;

	if result.is_ok() {
		match format {
			OutputFormat::Json => {
				println!("{{\"ok\":true,\"diagnostics\":[]}}");
			}
			OutputFormat::Github | OutputFormat::Text => {
				println!(
					"Check passed: {} file(s), all single slots use the configured style.",
					result.file_count
				);
			}
		}
		return Ok(true);
	}

	match format {
		OutputFormat::Json => {
			let entries: Vec<serde_json::Value> = result
				.diagnostics
				.iter()
				.map(|entry| {
					serde_json::json!({
						"file": make_relative(&entry.file, &root),
						"line": entry.start.line,
						"column": entry.start.column,
						"endLine": entry.end.line,
						"endColumn": entry.end.column,
						"messageId": entry.diagnostic.kind.id(),
						"message": entry.diagnostic.message(),
						"slot": entry.diagnostic.slot_name,
						"fixable": entry.diagnostic.patch.is_some(),
					})
				})
				.collect();
			let output = serde_json::json!({
				"ok": false,
				"diagnostics": entries,
			});
			println!("{output}");
		}
		OutputFormat::Github => {
			for entry in &result.diagnostics {
				println!(
					"::warning file={},line={},col={},endLine={},endColumn={}::{}",
					make_relative(&entry.file, &root),
					entry.start.line,
					entry.start.column,
					entry.end.line,
					entry.end.column,
					entry.diagnostic.message()
				);
			}
			eprintln!("{}", check_summary(&result));
		}
		OutputFormat::Text => {
			eprintln!("Check failed.");
			eprintln!();

			for entry in &result.diagnostics {
				let location = format!(
					"{}:{}",
					make_relative(&entry.file, &root),
					entry.start
				);
				eprintln!(
					"  {} {} (slot `{}`)",
					colored!(location, bold),
					colored!(entry.diagnostic.message(), yellow),
					entry.diagnostic.slot_name
				);
			}

			if show_diff {
				let fixes = compute_fixes(&ctx)?;
				let mut paths: Vec<_> = fixes.updated_files.keys().collect();
				paths.sort();

				for path in paths {
					let current = ctx.read_file(path)?;
					eprintln!();
					eprintln!("{}", colored!(make_relative(path, &root), bold));
					print_diff(&current, &fixes.updated_files[path]);
				}
			}

			eprintln!();
			eprintln!("{}", check_summary(&result));
		}
	}

	Ok(false)
}

fn check_summary(result: &CheckResult) -> String {
	format!(
		"{} single slot(s) in the wrong style. Run `slotstyle fix` to fix.",
		result.diagnostics.len()
	)
}

/// Returns `Ok(true)` when nothing is left to report after fixing.
fn run_fix(
	args: &SlotStyleCli,
	files: &[PathBuf],
	dry_run: bool,
) -> AnyResult<bool> {
	let ctx = scan(args, files)?;
	let root = resolve_root(args);
	let fixes = compute_fixes(&ctx)?;

	let mut paths: Vec<_> = fixes.updated_files.keys().collect();
	paths.sort();

	if fixes.fixed_count == 0 {
		println!("All single slots already use the configured style.");
	} else if dry_run {
		println!(
			"Dry run: would fix {} slot(s) in {} file(s):",
			fixes.fixed_count,
			fixes.updated_files.len()
		);
		for path in paths {
			let current = ctx.read_file(path)?;
			println!("  {}", make_relative(path, &root));
			print_diff(&current, &fixes.updated_files[path]);
		}
	} else {
		write_updates(&fixes)?;
		println!(
			"Fixed {} slot(s) in {} file(s).",
			fixes.fixed_count,
			fixes.updated_files.len()
		);

		if args.verbose {
			for path in paths {
				println!("  {}", make_relative(path, &root));
			}
		}
	}

	if fixes.remaining.is_empty() {
		return Ok(true);
	}

	print_remaining(&fixes.remaining, &root);
	Ok(false)
}

fn print_remaining(remaining: &[FileDiagnostic], root: &Path) {
	eprintln!();
	eprintln!(
		"{}",
		colored!(format!("{} slot(s) could not be fixed:", remaining.len()), red)
	);
	for entry in remaining {
		eprintln!(
			"  {}:{} {}",
			make_relative(&entry.file, root),
			entry.start,
			entry.diagnostic.message()
		);
	}
}

fn print_diff(current: &str, expected: &str) {
	let diff = TextDiff::from_lines(current, expected);
	for change in diff.iter_all_changes() {
		match change.tag() {
			ChangeTag::Delete => {
				eprint!("  {}", colored!(format!("-{change}"), red));
			}
			ChangeTag::Insert => {
				eprint!("  {}", colored!(format!("+{change}"), green));
			}
			ChangeTag::Equal => {
				eprint!("   {change}");
			}
		}
	}
}

fn make_relative(path: &Path, root: &Path) -> String {
	path.strip_prefix(root)
		.unwrap_or(path)
		.display()
		.to_string()
}
