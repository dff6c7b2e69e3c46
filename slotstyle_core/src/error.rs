use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum SlotStyleError {
	#[error(transparent)]
	#[diagnostic(code(slotstyle::io_error))]
	Io(#[from] std::io::Error),

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(slotstyle::config_parse),
		help(
			"`style` must be \"with-wrapper\", \"without-wrapper\", or a table with \
			 namedSlotStyle, defaultSlotStyle and treatCommentsAsInsignificant"
		)
	)]
	ConfigParse(String),

	#[error("invalid file pattern `{pattern}`: {reason}")]
	#[diagnostic(
		code(slotstyle::invalid_pattern),
		help("exclude patterns use gitignore syntax, include patterns use glob syntax")
	)]
	InvalidPattern { pattern: String, reason: String },

	#[error("unterminated start tag at byte {0}")]
	#[diagnostic(
		code(slotstyle::unterminated_tag),
		help("close the tag with `>` or `/>`")
	)]
	UnterminatedTag(usize),

	#[error("unterminated comment at byte {0}")]
	#[diagnostic(code(slotstyle::unterminated_comment), help("close the comment with `-->`"))]
	UnterminatedComment(usize),

	#[error("unterminated interpolation at byte {0}")]
	#[diagnostic(
		code(slotstyle::unterminated_interpolation),
		help("close the interpolation with `}}}}`")
	)]
	UnterminatedInterpolation(usize),

	#[error("edits {first:?} and {second:?} overlap within a single patch")]
	#[diagnostic(code(slotstyle::overlapping_edits))]
	OverlappingEdits {
		first: std::ops::Range<usize>,
		second: std::ops::Range<usize>,
	},

	#[error("invalid edit range {start}..{end} for text length {len}")]
	#[diagnostic(code(slotstyle::invalid_edit_range))]
	InvalidEditRange { start: usize, end: usize, len: usize },

	#[error("file too large: `{path}` is {size} bytes (limit: {limit} bytes)")]
	#[diagnostic(
		code(slotstyle::file_too_large),
		help("increase `max_file_size` in slotstyle.toml or exclude this file")
	)]
	FileTooLarge { path: String, size: u64, limit: u64 },
}

pub type SlotStyleResult<T> = Result<T, SlotStyleError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
