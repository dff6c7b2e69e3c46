use std::fmt::Display;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use crate::DEFAULT_SLOT;
use crate::SlotStyleError;
use crate::SlotStyleResult;

/// Default maximum file size in bytes (10 MB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] = [
	"slotstyle.toml",
	".slotstyle.toml",
	".config/slotstyle.toml",
];

/// Where single slot content should live.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SlotStyle {
	/// `<my-component><template #slot>content</template></my-component>`
	WithWrapper,
	/// `<my-component #slot>content</my-component>`
	#[default]
	WithoutWrapper,
}

impl Display for SlotStyle {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::WithWrapper => write!(f, "with-wrapper"),
			Self::WithoutWrapper => write!(f, "without-wrapper"),
		}
	}
}

/// Options as written by the user: either a bare style applied to every slot,
/// or a table naming each option.
///
/// ```toml
/// style = "with-wrapper"
/// ```
///
/// ```toml
/// [style]
/// namedSlotStyle = "without-wrapper"
/// defaultSlotStyle = "with-wrapper"
/// treatCommentsAsInsignificant = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
#[non_exhaustive]
pub enum RawSlotStyleOptions {
	Style(SlotStyle),
	Detailed(DetailedSlotStyleOptions),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DetailedSlotStyleOptions {
	#[serde(default)]
	pub named_slot_style: Option<SlotStyle>,
	#[serde(default)]
	pub default_slot_style: Option<SlotStyle>,
	#[serde(default)]
	pub treat_comments_as_insignificant: Option<bool>,
}

impl RawSlotStyleOptions {
	/// Parse options from their JSON form, e.g. `"with-wrapper"` or
	/// `{"namedSlotStyle": "with-wrapper"}`.
	pub fn from_json(json: &str) -> SlotStyleResult<Self> {
		serde_json::from_str(json).map_err(|e| SlotStyleError::ConfigParse(e.to_string()))
	}

	/// The table form of these options. A bare style sets both slot styles.
	pub fn into_detailed(self) -> DetailedSlotStyleOptions {
		match self {
			Self::Style(style) => {
				DetailedSlotStyleOptions {
					named_slot_style: Some(style),
					default_slot_style: Some(style),
					treat_comments_as_insignificant: None,
				}
			}
			Self::Detailed(detailed) => detailed,
		}
	}
}

/// Fully defaulted options the rule runs with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotStyleOptions {
	pub named_slot_style: SlotStyle,
	pub default_slot_style: SlotStyle,
	/// When set, comments between the component and its wrapper never block
	/// unwrapping.
	pub treat_comments_as_insignificant: bool,
}

impl SlotStyleOptions {
	/// The style a slot with this resolved name should be written in.
	pub fn desired_style(&self, slot_name: &str) -> SlotStyle {
		if slot_name == DEFAULT_SLOT {
			self.default_slot_style
		} else {
			self.named_slot_style
		}
	}
}

/// An unset `defaultSlotStyle` follows `namedSlotStyle`, which itself
/// defaults to `without-wrapper`.
impl From<RawSlotStyleOptions> for SlotStyleOptions {
	fn from(raw: RawSlotStyleOptions) -> Self {
		match raw {
			RawSlotStyleOptions::Style(style) => {
				Self {
					named_slot_style: style,
					default_slot_style: style,
					treat_comments_as_insignificant: false,
				}
			}
			RawSlotStyleOptions::Detailed(detailed) => {
				let named_slot_style = detailed.named_slot_style.unwrap_or_default();
				Self {
					named_slot_style,
					default_slot_style: detailed.default_slot_style.unwrap_or(named_slot_style),
					treat_comments_as_insignificant: detailed
						.treat_comments_as_insignificant
						.unwrap_or(false),
				}
			}
		}
	}
}

impl From<Option<RawSlotStyleOptions>> for SlotStyleOptions {
	fn from(raw: Option<RawSlotStyleOptions>) -> Self {
		raw.map(Self::from).unwrap_or_default()
	}
}

/// Configuration loaded from a `slotstyle.toml` file.
///
/// ```toml
/// style = "with-wrapper"
///
/// [exclude]
/// patterns = ["dist/", "*.generated.vue"]
///
/// [include]
/// patterns = ["docs/**/*.htm"]
///
/// disable_gitignore = false
/// ```
#[derive(Debug, Deserialize)]
pub struct SlotStyleConfig {
	/// The rule options, as a bare style or a table.
	#[serde(default)]
	pub style: Option<RawSlotStyleOptions>,
	/// Exclusion configuration using gitignore-style patterns.
	#[serde(default)]
	pub exclude: ExcludeConfig,
	/// Inclusion configuration: additional glob patterns to scan.
	#[serde(default)]
	pub include: IncludeConfig,
	/// Maximum file size in bytes to scan. Defaults to 10 MB.
	#[serde(default = "default_max_file_size")]
	pub max_file_size: u64,
	/// When true, `.gitignore` files are not used for filtering.
	#[serde(default)]
	pub disable_gitignore: bool,
}

impl Default for SlotStyleConfig {
	fn default() -> Self {
		Self {
			style: None,
			exclude: ExcludeConfig::default(),
			include: IncludeConfig::default(),
			max_file_size: DEFAULT_MAX_FILE_SIZE,
			disable_gitignore: false,
		}
	}
}

fn default_max_file_size() -> u64 {
	DEFAULT_MAX_FILE_SIZE
}

/// Configuration for excluding files and directories from scanning.
///
/// Patterns follow gitignore syntax and are applied on top of any `.gitignore`
/// rules (unless `disable_gitignore` is set).
#[derive(Debug, Default, Deserialize)]
pub struct ExcludeConfig {
	#[serde(default)]
	pub patterns: Vec<String>,
}

/// Configuration for including additional files in scanning.
#[derive(Debug, Default, Deserialize)]
pub struct IncludeConfig {
	/// Additional glob patterns for files to scan, relative to the project
	/// root.
	#[serde(default)]
	pub patterns: Vec<String>,
}

impl SlotStyleConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if no config file exists.
	pub fn load(root: &Path) -> SlotStyleResult<Option<SlotStyleConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		let content = std::fs::read_to_string(&config_path)?;
		let config = Self::from_toml(&content)?;

		tracing::debug!(path = %config_path.display(), "loaded config");

		Ok(Some(config))
	}

	pub fn from_toml(content: &str) -> SlotStyleResult<SlotStyleConfig> {
		toml::from_str(content).map_err(|e| SlotStyleError::ConfigParse(e.to_string()))
	}

	/// The normalized rule options.
	pub fn options(&self) -> SlotStyleOptions {
		self.style.clone().into()
	}
}
