use std::fmt::Display;
use std::ops::Range;

use serde::Deserialize;
use serde::Serialize;

/// A half-open byte range into the original source buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Span {
	pub start: usize,
	pub end: usize,
}

impl Span {
	pub const fn new(start: usize, end: usize) -> Self {
		Self { start, end }
	}

	/// A zero-width span at `offset`.
	pub const fn empty(offset: usize) -> Self {
		Self {
			start: offset,
			end: offset,
		}
	}

	pub const fn len(&self) -> usize {
		self.end - self.start
	}

	pub fn range(&self) -> Range<usize> {
		self.start..self.end
	}
}

impl From<Range<usize>> for Span {
	fn from(range: Range<usize>) -> Self {
		Self::new(range.start, range.end)
	}
}

impl Display for Span {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}..{}", self.start, self.end)
	}
}

/// A 1-indexed line and column together with the byte offset they describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
	pub line: usize,
	pub column: usize,
	pub offset: usize,
}

impl Point {
	pub const fn new(line: usize, column: usize, offset: usize) -> Self {
		Self {
			line,
			column,
			offset,
		}
	}
}

impl Display for Point {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}:{}", self.line, self.column)
	}
}

/// Byte offsets of every line start in a source buffer, used to turn offsets
/// into [`Point`]s.
#[derive(Debug, Clone)]
pub struct LineIndex {
	line_starts: Vec<usize>,
}

impl LineIndex {
	pub fn new(source: &str) -> Self {
		let mut line_starts = vec![0];
		line_starts.extend(
			source
				.bytes()
				.enumerate()
				.filter(|(_, byte)| *byte == b'\n')
				.map(|(index, _)| index + 1),
		);

		Self { line_starts }
	}

	/// Columns count characters, not bytes.
	pub fn point(&self, source: &str, offset: usize) -> Point {
		let offset = offset.min(source.len());
		let line = self.line_starts.partition_point(|start| *start <= offset) - 1;
		let line_start = self.line_starts[line];
		let column = source
			.get(line_start..offset)
			.map_or(offset - line_start, |prefix| prefix.chars().count());

		Point::new(line + 1, column + 1, offset)
	}
}
