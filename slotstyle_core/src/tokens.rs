use std::fmt::Display;

use derive_more::Deref;
use serde::Serialize;

use crate::Span;

/// Classification of a lexical unit in a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
	/// `<name`
	HtmlTagOpen,
	/// `</name`
	HtmlEndTagOpen,
	/// `>`
	HtmlTagClose,
	/// `/>`
	HtmlSelfClosingTagClose,
	/// An attribute name, e.g. `v-slot:item` or `#default`
	HtmlIdentifier,
	/// `=`
	HtmlAssociation,
	/// An attribute value, quoted or not
	HtmlLiteral,
	/// Character data between tags
	HtmlText,
	/// The body of a `<script>`, `<style>`, `<textarea>` or `<title>` element
	HtmlRawText,
	/// `<!-- ... -->`
	HtmlComment,
	/// `{{`
	VExpressionStart,
	/// The expression inside `{{ }}`
	VExpressionBody,
	/// `}}`
	VExpressionEnd,
	/// `/* ... */` inside an interpolation
	Block,
	/// `// ...` inside an interpolation
	Line,
}

impl TokenKind {
	/// Markup comments and the script comments found inside interpolations.
	pub const fn is_comment(self) -> bool {
		matches!(self, Self::HtmlComment | Self::Block | Self::Line)
	}
}

impl Display for TokenKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{self:?}")
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Token {
	pub kind: TokenKind,
	pub span: Span,
}

impl Token {
	pub const fn new(kind: TokenKind, start: usize, end: usize) -> Self {
		Self {
			kind,
			span: Span::new(start, end),
		}
	}

	pub const fn is_comment(&self) -> bool {
		self.kind.is_comment()
	}
}

/// Every token of a document, ordered by position.
#[derive(Debug, Clone, Default, Deref)]
pub struct TokenIndex(Vec<Token>);

impl TokenIndex {
	/// Builds an index, sorting tokens by start offset. The lexer already
	/// produces them in order so this is usually a no-op.
	pub fn new(mut tokens: Vec<Token>) -> Self {
		tokens.sort_by_key(|token| (token.span.start, token.span.end));
		Self(tokens)
	}

	/// All tokens lying strictly between two boundaries: starting at or after
	/// `after` and ending at or before `before`.
	pub fn between(&self, after: usize, before: usize) -> &[Token] {
		if after > before {
			return &[];
		}

		let first = self.0.partition_point(|token| token.span.start < after);
		let tail = &self.0[first..];
		let count = tail.partition_point(|token| token.span.start < before);

		// A token may start inside the window but run past `before`.
		let mut slice = &tail[..count];
		while let Some((last, rest)) = slice.split_last() {
			if last.span.end <= before {
				break;
			}
			slice = rest;
		}

		slice
	}

	/// Comment tokens between two boundaries.
	pub fn comments_between(&self, after: usize, before: usize) -> impl Iterator<Item = &Token> {
		self.between(after, before)
			.iter()
			.filter(|token| token.is_comment())
	}

	/// The last token ending at or before `offset`.
	pub fn before(&self, offset: usize) -> Option<&Token> {
		let index = self.0.partition_point(|token| token.span.start < offset);
		self.0[..index]
			.iter()
			.rev()
			.find(|token| token.span.end <= offset)
	}
}
