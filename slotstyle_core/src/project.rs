use std::path::Path;
use std::path::PathBuf;

use globset::Glob;
use globset::GlobSet;
use globset::GlobSetBuilder;
use ignore::gitignore::Gitignore;
use ignore::gitignore::GitignoreBuilder;

use crate::SlotStyleConfig;
use crate::SlotStyleError;
use crate::SlotStyleOptions;
use crate::SlotStyleResult;

/// A project ready to be checked or fixed: its configuration, the options the
/// rule runs with, and the files in scope.
#[derive(Debug)]
pub struct ProjectContext {
	pub root: PathBuf,
	pub config: SlotStyleConfig,
	pub options: SlotStyleOptions,
	pub files: Vec<PathBuf>,
}

impl ProjectContext {
	/// Replace the options loaded from config, e.g. with command-line flags.
	#[must_use]
	pub fn with_options(mut self, options: SlotStyleOptions) -> Self {
		self.options = options;
		self
	}

	/// Restrict the project to explicit files instead of discovered ones.
	#[must_use]
	pub fn with_files(mut self, files: Vec<PathBuf>) -> Self {
		self.files = files;
		self
	}

	/// Read a file, refusing anything over the configured size limit.
	pub fn read_file(&self, path: &Path) -> SlotStyleResult<String> {
		let size = std::fs::metadata(path)?.len();
		if size > self.config.max_file_size {
			return Err(SlotStyleError::FileTooLarge {
				path: path.display().to_string(),
				size,
				limit: self.config.max_file_size,
			});
		}

		Ok(std::fs::read_to_string(path)?)
	}
}

/// Load the config at `root` (if any) and discover every template file.
pub fn scan_project_with_config(root: &Path) -> SlotStyleResult<ProjectContext> {
	let config = SlotStyleConfig::load(root)?.unwrap_or_default();
	let files = scan_project(root, &config)?;
	let options = config.options();

	tracing::debug!(root = %root.display(), files = files.len(), "scanned project");

	Ok(ProjectContext {
		root: root.to_path_buf(),
		config,
		options,
		files,
	})
}

/// Collect all `.vue` and `.html` files under `root`, plus any matching the
/// `[include]` patterns, sorted for deterministic output.
pub fn scan_project(root: &Path, config: &SlotStyleConfig) -> SlotStyleResult<Vec<PathBuf>> {
	let gitignore = if config.disable_gitignore {
		Gitignore::empty()
	} else {
		build_gitignore(root)
	};
	let exclude = build_exclude_matcher(root, &config.exclude.patterns)?;
	let include = build_glob_set(&config.include.patterns)?;

	let mut files = Vec::new();
	walk_dir(
		root,
		root,
		&Matchers {
			gitignore: &gitignore,
			exclude: &exclude,
			include: &include,
		},
		&mut files,
	)?;

	files.sort();
	files.dedup();

	Ok(files)
}

struct Matchers<'a> {
	gitignore: &'a Gitignore,
	exclude: &'a Gitignore,
	include: &'a GlobSet,
}

fn walk_dir(
	root: &Path,
	dir: &Path,
	matchers: &Matchers<'_>,
	files: &mut Vec<PathBuf>,
) -> SlotStyleResult<()> {
	for entry in std::fs::read_dir(dir)? {
		let path = entry?.path();
		let file_type = std::fs::symlink_metadata(&path)?.file_type();

		// Symlinks are never followed.
		if file_type.is_symlink() {
			continue;
		}

		let is_dir = file_type.is_dir();

		if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
			if is_dir && is_ignored_directory_name(name) {
				continue;
			}
		}

		if matchers.gitignore.matched(&path, is_dir).is_ignore()
			|| matchers.exclude.matched(&path, is_dir).is_ignore()
		{
			continue;
		}

		if is_dir {
			walk_dir(root, &path, matchers, files)?;
			continue;
		}

		let included = path
			.strip_prefix(root)
			.is_ok_and(|relative| matchers.include.is_match(relative));

		if included || is_template_file(&path) {
			files.push(path);
		}
	}

	Ok(())
}

fn is_ignored_directory_name(name: &str) -> bool {
	name.starts_with('.') || name == "node_modules" || name == "target"
}

/// Check if a file holds templates this tool understands.
pub fn is_template_file(path: &Path) -> bool {
	path.extension()
		.and_then(|ext| ext.to_str())
		.is_some_and(|ext| matches!(ext, "vue" | "html"))
}

/// Build a `Gitignore` matcher from `[exclude]` patterns, applied on top of
/// any `.gitignore` rules.
fn build_exclude_matcher(root: &Path, patterns: &[String]) -> SlotStyleResult<Gitignore> {
	let mut builder = GitignoreBuilder::new(root);
	for pattern in patterns {
		builder.add_line(None, pattern).map_err(|e| {
			SlotStyleError::InvalidPattern {
				pattern: pattern.clone(),
				reason: e.to_string(),
			}
		})?;
	}

	builder.build().map_err(|e| {
		SlotStyleError::InvalidPattern {
			pattern: patterns.join(", "),
			reason: e.to_string(),
		}
	})
}

/// Build a `Gitignore` matcher from the project's `.gitignore` file (if any).
fn build_gitignore(root: &Path) -> Gitignore {
	let mut builder = GitignoreBuilder::new(root);
	let gitignore_path = root.join(".gitignore");
	if gitignore_path.exists() {
		let _ = builder.add(gitignore_path);
	}

	builder.build().unwrap_or_else(|_| Gitignore::empty())
}

fn build_glob_set(patterns: &[String]) -> SlotStyleResult<GlobSet> {
	let mut builder = GlobSetBuilder::new();
	for pattern in patterns {
		let glob = Glob::new(pattern).map_err(|e| {
			SlotStyleError::InvalidPattern {
				pattern: pattern.clone(),
				reason: e.to_string(),
			}
		})?;
		builder.add(glob);
	}

	builder.build().map_err(|e| {
		SlotStyleError::InvalidPattern {
			pattern: patterns.join(", "),
			reason: e.to_string(),
		}
	})
}
