use logos::Lexer;
use logos::Logos;

use crate::SlotStyleError;
use crate::SlotStyleResult;
use crate::tokens::Token;
use crate::tokens::TokenKind;

/// Tokens recognised between tags.
#[derive(Logos, Debug, PartialEq)]
enum ContentToken {
	#[token("<!--")]
	CommentOpen,
	#[regex(r"</[a-zA-Z][^\s/>]*")]
	EndTagOpen,
	#[regex(r"<[a-zA-Z][^\s/>]*")]
	TagOpen,
	#[token("{{")]
	InterpolationOpen,
	#[regex(r"[^<{]+")]
	Text,
	#[token("<")]
	#[token("{")]
	Stray,
}

/// Tokens recognised inside a start or end tag.
#[derive(Logos, Debug, PartialEq)]
#[logos(skip r"[ \t\r\n\x0C]+")]
enum TagToken {
	#[token(">")]
	Close,
	#[token("/>")]
	SelfClose,
	#[token("=")]
	Association,
	#[regex(r#""[^"]*""#)]
	#[regex(r"'[^']*'")]
	Quoted,
	#[regex(r#"[^ \t\r\n\x0C"'>/=]+"#)]
	Name,
	#[token("/")]
	Slash,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagEnd {
	Close,
	SelfClose,
}

/// Elements whose body is never parsed as markup.
const RAW_TEXT_ELEMENTS: [&str; 4] = ["script", "style", "textarea", "title"];

/// Walks the content lexer, morphing into the tag lexer whenever a tag opens,
/// and collects a flat, ordered token list for the whole source.
struct TokenWalker<'a> {
	/// The full template source.
	source: &'a str,
	/// Collected tokens.
	tokens: Vec<Token>,
}

impl<'a> TokenWalker<'a> {
	fn new(source: &'a str) -> Self {
		Self {
			source,
			tokens: Vec::new(),
		}
	}

	fn push(&mut self, kind: TokenKind, start: usize, end: usize) {
		self.tokens.push(Token::new(kind, start, end));
	}

	/// Adjacent runs of character data collapse into a single text token.
	fn push_text(&mut self, start: usize, end: usize) {
		if let Some(last) = self.tokens.last_mut() {
			if last.kind == TokenKind::HtmlText && last.span.end == start {
				last.span.end = end;
				return;
			}
		}

		self.push(TokenKind::HtmlText, start, end);
	}

	fn process(mut self) -> SlotStyleResult<Vec<Token>> {
		let source = self.source;
		let mut content = ContentToken::lexer(source);

		while let Some(result) = content.next() {
			let span = content.span();

			match result {
				Ok(ContentToken::CommentOpen) => {
					let remainder = content.remainder();
					// `<!-->` and `<!--->` close immediately.
					let length = if remainder.starts_with('>') {
						1
					} else if remainder.starts_with("->") {
						2
					} else {
						let Some(close) = memstr(remainder.as_bytes(), b"-->") else {
							return Err(SlotStyleError::UnterminatedComment(span.start));
						};
						close + 3
					};
					content.bump(length);
					self.push(TokenKind::HtmlComment, span.start, content.span().end);
				}
				Ok(ContentToken::InterpolationOpen) => {
					let Some(close) = memstr(content.remainder().as_bytes(), b"}}") else {
						return Err(SlotStyleError::UnterminatedInterpolation(span.start));
					};
					let body_start = span.end;
					let body_end = body_start + close;
					content.bump(close + 2);
					self.push(TokenKind::VExpressionStart, span.start, span.end);
					self.push_expression_body(body_start, body_end);
					self.push(TokenKind::VExpressionEnd, body_end, body_end + 2);
				}
				Ok(ContentToken::TagOpen) => {
					let name = &source[span.start + 1..span.end];
					self.push(TokenKind::HtmlTagOpen, span.start, span.end);

					let mut tag = content.morph::<TagToken>();
					let end = self.process_tag(&mut tag, span.start)?;
					content = tag.morph();

					if end == TagEnd::Close && is_raw_text_element(name) {
						self.consume_raw_text(&mut content, name);
					}
				}
				Ok(ContentToken::EndTagOpen) => {
					self.push(TokenKind::HtmlEndTagOpen, span.start, span.end);

					let mut tag = content.morph::<TagToken>();
					self.process_tag(&mut tag, span.start)?;
					content = tag.morph();
				}
				Ok(ContentToken::Text | ContentToken::Stray) | Err(()) => {
					self.push_text(span.start, span.end);
				}
			}
		}

		Ok(self.tokens)
	}

	/// Consume the inside of a tag up to and including its closing delimiter.
	fn process_tag(
		&mut self,
		tag: &mut Lexer<'a, TagToken>,
		tag_start: usize,
	) -> SlotStyleResult<TagEnd> {
		while let Some(result) = tag.next() {
			let span = tag.span();

			match result {
				Ok(TagToken::Close) => {
					self.push(TokenKind::HtmlTagClose, span.start, span.end);
					return Ok(TagEnd::Close);
				}
				Ok(TagToken::SelfClose) => {
					self.push(TokenKind::HtmlSelfClosingTagClose, span.start, span.end);
					return Ok(TagEnd::SelfClose);
				}
				Ok(TagToken::Association) => {
					self.push(TokenKind::HtmlAssociation, span.start, span.end);
					self.consume_unquoted_value(tag);
				}
				Ok(TagToken::Quoted) => {
					self.push(TokenKind::HtmlLiteral, span.start, span.end);
				}
				Ok(TagToken::Name) => {
					self.push(TokenKind::HtmlIdentifier, span.start, span.end);
				}
				// Stray slashes and unbalanced quotes carry no structure.
				Ok(TagToken::Slash) | Err(()) => {}
			}
		}

		Err(SlotStyleError::UnterminatedTag(tag_start))
	}

	/// Unquoted attribute values run until whitespace or `>`, which the tag
	/// lexer cannot express without also swallowing attribute names.
	fn consume_unquoted_value(&mut self, tag: &mut Lexer<'a, TagToken>) {
		let remainder = tag.remainder();
		let rest = remainder.trim_start_matches(is_html_whitespace);
		let leading = remainder.len() - rest.len();

		if rest.starts_with(['"', '\'', '>']) {
			return;
		}

		let value_len = rest
			.find(|ch: char| is_html_whitespace(ch) || ch == '>')
			.unwrap_or(rest.len());

		if value_len == 0 {
			return;
		}

		let start = tag.span().end + leading;
		tag.bump(leading + value_len);
		self.push(TokenKind::HtmlLiteral, start, start + value_len);
	}

	/// Skip the body of a raw text element up to its end tag.
	fn consume_raw_text(&mut self, content: &mut Lexer<'a, ContentToken>, name: &str) {
		let remainder = content.remainder();
		let needle = format!("</{}", name.to_ascii_lowercase());
		let length = remainder
			.to_ascii_lowercase()
			.find(&needle)
			.unwrap_or(remainder.len());

		if length == 0 {
			return;
		}

		let start = content.span().end;
		content.bump(length);
		self.push(TokenKind::HtmlRawText, start, start + length);
	}

	/// Split an interpolation body into expression segments and the script
	/// comments embedded in it.
	fn push_expression_body(&mut self, start: usize, end: usize) {
		let bytes = self.source.as_bytes();
		let mut segment_start = start;
		let mut cursor = start;
		let mut quote: Option<u8> = None;

		while cursor < end {
			let byte = bytes[cursor];

			if let Some(delimiter) = quote {
				if byte == b'\\' {
					cursor += 2;
					continue;
				}
				if byte == delimiter {
					quote = None;
				}
				cursor += 1;
				continue;
			}

			if matches!(byte, b'"' | b'\'' | b'`') {
				quote = Some(byte);
				cursor += 1;
				continue;
			}

			let next = bytes.get(cursor + 1).copied();
			let comment = match (byte, next) {
				(b'/', Some(b'*')) => {
					let close = memstr(&bytes[cursor + 2..end], b"*/").map_or(end, |at| cursor + 2 + at + 2);
					Some((TokenKind::Block, close))
				}
				(b'/', Some(b'/')) => {
					let close = memstr(&bytes[cursor + 2..end], b"\n").map_or(end, |at| cursor + 2 + at);
					Some((TokenKind::Line, close))
				}
				_ => None,
			};

			let Some((kind, close)) = comment else {
				cursor += 1;
				continue;
			};

			if segment_start < cursor {
				self.push(TokenKind::VExpressionBody, segment_start, cursor);
			}
			self.push(kind, cursor, close);
			cursor = close;
			segment_start = close;
		}

		if segment_start < end {
			self.push(TokenKind::VExpressionBody, segment_start, end);
		}
	}
}

fn is_html_whitespace(ch: char) -> bool {
	matches!(ch, ' ' | '\t' | '\r' | '\n' | '\x0C')
}

fn is_raw_text_element(name: &str) -> bool {
	RAW_TEXT_ELEMENTS
		.iter()
		.any(|raw| raw.eq_ignore_ascii_case(name))
}

/// Tokenize a template into an ordered, non-overlapping token list.
pub fn tokenize(source: &str) -> SlotStyleResult<Vec<Token>> {
	TokenWalker::new(source).process()
}

pub fn memstr(haystack: &[u8], needle: &[u8]) -> Option<usize> {
	haystack
		.windows(needle.len())
		.position(|window| window == needle)
}
