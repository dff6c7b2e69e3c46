use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use slotstyle_core::RawSlotStyleOptions;
use slotstyle_core::SlotStyle;
use slotstyle_core::SlotStyleOptions;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Keep single slot content in one consistent style across your Vue templates.",
	long_about = "slotstyle checks Vue templates for components whose only content goes to a \
	              single slot, and makes sure that slot is written one way everywhere: either \
	              directly on the component (`<comp #item>`) or inside a `<template #item>` \
	              wrapper.\n\nQuick start:\n  slotstyle check  Report slots in the wrong \
	              style\n  slotstyle fix    Rewrite them in place"
)]
pub struct SlotStyleCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Path to the project root directory.
	#[arg(long, short, global = true)]
	pub path: Option<PathBuf>,

	/// Enable verbose output.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,

	/// Style for every single slot. Overrides `style` in `slotstyle.toml`.
	#[arg(long, global = true, value_enum)]
	pub style: Option<StyleArg>,

	/// Style for single slots with a static name other than `default`.
	#[arg(long, global = true, value_enum)]
	pub named_slot_style: Option<StyleArg>,

	/// Style for the default slot, including slots with a dynamic name.
	#[arg(long, global = true, value_enum)]
	pub default_slot_style: Option<StyleArg>,

	/// Unwrap slots even when comments sit between the component and its
	/// `<template>` wrapper.
	#[arg(long, global = true, default_value_t = false)]
	pub treat_comments_as_insignificant: bool,
}

impl SlotStyleCli {
	/// Layer the command-line style flags over the options written in config,
	/// then normalize. A default slot style set by neither still follows the
	/// named slot style.
	pub fn apply_options(&self, raw: Option<&RawSlotStyleOptions>) -> SlotStyleOptions {
		let mut detailed = raw
			.cloned()
			.map(RawSlotStyleOptions::into_detailed)
			.unwrap_or_default();

		if let Some(style) = self.style {
			detailed.named_slot_style = Some(style.into());
			detailed.default_slot_style = Some(style.into());
		}

		if let Some(style) = self.named_slot_style {
			detailed.named_slot_style = Some(style.into());
		}

		if let Some(style) = self.default_slot_style {
			detailed.default_slot_style = Some(style.into());
		}

		if self.treat_comments_as_insignificant {
			detailed.treat_comments_as_insignificant = Some(true);
		}

		RawSlotStyleOptions::Detailed(detailed).into()
	}
}

#[derive(Subcommand)]
pub enum Commands {
	/// Check that every single slot is written in the configured style.
	///
	/// Scans `.vue` and `.html` files in the project (or only the given
	/// files) and reports each component whose single slot is written the
	/// other way. Exits with a non-zero status code if any are found.
	Check {
		/// Files to check instead of scanning the project.
		files: Vec<PathBuf>,

		/// Show a unified diff of the fix for each file with violations.
		#[arg(long, default_value_t = false)]
		diff: bool,

		/// Output format for check results. Use `text` for human-readable
		/// output, `json` for programmatic consumption, or `github` for
		/// GitHub Actions annotations that appear inline on PRs.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
	/// Rewrite every single slot into the configured style.
	///
	/// Moves slot directives onto components or into `<template>` wrappers,
	/// keeping the slot content byte for byte. Wrappers with comments around
	/// them are left alone unless `--treat-comments-as-insignificant` is set.
	Fix {
		/// Files to fix instead of scanning the project.
		files: Vec<PathBuf>,

		/// Preview changes without writing files. Prints a diff of every
		/// file that would be modified.
		#[arg(long, default_value_t = false)]
		dry_run: bool,
	},
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
	/// Human-readable text output with colors and formatting.
	Text,
	/// JSON output for programmatic consumption. Each entry includes the file
	/// path, position, slot name and message.
	Json,
	/// GitHub Actions annotation format. Emits `::warning` annotations that
	/// appear inline on pull request diffs.
	Github,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StyleArg {
	/// `<comp><template #slot>content</template></comp>`
	WithWrapper,
	/// `<comp #slot>content</comp>`
	WithoutWrapper,
}

impl From<StyleArg> for SlotStyle {
	fn from(value: StyleArg) -> Self {
		match value {
			StyleArg::WithWrapper => SlotStyle::WithWrapper,
			StyleArg::WithoutWrapper => SlotStyle::WithoutWrapper,
		}
	}
}
