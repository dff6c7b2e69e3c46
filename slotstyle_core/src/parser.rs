use serde::Serialize;

use crate::SlotStyleResult;
use crate::Span;
use crate::lexer::tokenize;
use crate::tokens::Token;
use crate::tokens::TokenIndex;
use crate::tokens::TokenKind;

/// HTML void elements never have content or an end tag.
const VOID_ELEMENTS: [&str; 14] = [
	"area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
	"track", "wbr",
];

/// A single attribute as written on a start tag. Whether it is a directive is
/// decided by the [`MarkupHost`](crate::MarkupHost).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
	/// The attribute name exactly as authored, e.g. `v-slot:item` or `#default`.
	pub name: String,
	/// The unquoted value, if one was written.
	pub value: Option<String>,
	/// The whole attribute, name through value.
	pub span: Span,
}

/// The markup vocabulary an element belongs to. `<svg>` and `<math>` open a
/// foreign subtree; `<foreignObject>` hands its children back to HTML.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Namespace {
	#[default]
	Html,
	Svg,
	MathMl,
}

impl Namespace {
	/// The namespace of an element named `name` (lowercased) whose parent is
	/// `parent`, or a root when `parent` is `None`.
	fn resolve(name: &str, parent: Option<&Element>) -> Self {
		match parent {
			Some(parent) if parent.namespace != Self::Html && parent.name != "foreignobject" => {
				parent.namespace
			}
			_ => {
				match name {
					"svg" => Self::Svg,
					"math" => Self::MathMl,
					_ => Self::Html,
				}
			}
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StartTag {
	pub span: Span,
	/// `true` when the tag ends with `/>`.
	pub self_closing: bool,
}

/// An element of the template tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Element {
	/// ASCII-lowercased tag name.
	pub name: String,
	/// The tag name exactly as authored.
	pub raw_name: String,
	pub namespace: Namespace,
	pub attributes: Vec<Attribute>,
	pub children: Vec<Node>,
	/// From the start of the start tag to the end of the end tag (or the last
	/// piece of content when there is no end tag).
	pub span: Span,
	pub start_tag: StartTag,
	pub end_tag: Option<Span>,
}

impl Element {
	/// The attribute with the given name, if present.
	pub fn attribute(&self, name: &str) -> Option<&Attribute> {
		self.attributes.iter().find(|attribute| attribute.name == name)
	}

	/// The span between the end of the start tag and the start of the end
	/// tag. Elements without an end tag own everything up to their own end.
	pub fn content_span(&self) -> Span {
		let end = self.end_tag.map_or(self.span.end, |end_tag| end_tag.start);
		Span::new(self.start_tag.span.end, end)
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Text {
	pub value: String,
	pub span: Span,
}

/// A child of an element. Comments are never children; they only exist in the
/// [`TokenIndex`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Node {
	Element(Element),
	Text(Text),
	/// A `{{ expression }}` interpolation.
	Interpolation(Span),
}

impl Node {
	pub fn span(&self) -> Span {
		match self {
			Node::Element(element) => element.span,
			Node::Text(text) => text.span,
			Node::Interpolation(span) => *span,
		}
	}
}

/// A parsed template together with its source and token index.
#[derive(Debug, Clone)]
pub struct Document<'a> {
	source: &'a str,
	roots: Vec<Node>,
	tokens: TokenIndex,
}

impl<'a> Document<'a> {
	pub fn source(&self) -> &'a str {
		self.source
	}

	pub fn roots(&self) -> &[Node] {
		&self.roots
	}

	pub fn tokens(&self) -> &TokenIndex {
		&self.tokens
	}

	/// The source text covered by `span`.
	pub fn text(&self, span: Span) -> &'a str {
		&self.source[span.range()]
	}

	/// The nodes to lint. In a single-file component this is the root
	/// `<template>` element; otherwise the whole fragment.
	pub fn template_body(&self) -> &[Node] {
		let template = self.roots.iter().find_map(|node| {
			match node {
				Node::Element(element) if element.name == "template" => Some(node),
				_ => None,
			}
		});

		match template {
			Some(node) => std::slice::from_ref(node),
			None => &self.roots,
		}
	}

	/// Visit every element of the template body depth first, parents before
	/// their children, in document order.
	pub fn walk<'d>(&'d self, visitor: &mut impl FnMut(&'d Element)) {
		walk_nodes(self.template_body(), visitor);
	}
}

fn walk_nodes<'d>(nodes: &'d [Node], visitor: &mut impl FnMut(&'d Element)) {
	for node in nodes {
		if let Node::Element(element) = node {
			visitor(element);
			walk_nodes(&element.children, visitor);
		}
	}
}

/// Parse a template into a [`Document`].
pub fn parse(source: &str) -> SlotStyleResult<Document<'_>> {
	let tokens = tokenize(source)?;
	let roots = TreeBuilder::new(source, &tokens).build();

	Ok(Document {
		source,
		roots,
		tokens: TokenIndex::new(tokens),
	})
}

/// Builds the element tree from a flat token list with a stack of open
/// elements.
struct TreeBuilder<'a> {
	source: &'a str,
	tokens: &'a [Token],
	cursor: usize,
	stack: Vec<Element>,
	roots: Vec<Node>,
}

impl<'a> TreeBuilder<'a> {
	fn new(source: &'a str, tokens: &'a [Token]) -> Self {
		Self {
			source,
			tokens,
			cursor: 0,
			stack: Vec::new(),
			roots: Vec::new(),
		}
	}

	fn text(&self, span: Span) -> &'a str {
		&self.source[span.range()]
	}

	fn peek(&self) -> Option<&'a Token> {
		self.tokens.get(self.cursor)
	}

	fn advance(&mut self) -> Option<&'a Token> {
		let token = self.tokens.get(self.cursor)?;
		self.cursor += 1;
		Some(token)
	}

	fn build(mut self) -> Vec<Node> {
		while let Some(token) = self.advance() {
			match token.kind {
				TokenKind::HtmlTagOpen => self.start_tag(token),
				TokenKind::HtmlEndTagOpen => self.end_tag(token),
				TokenKind::HtmlText | TokenKind::HtmlRawText => {
					self.push_node(Node::Text(Text {
						value: self.text(token.span).to_string(),
						span: token.span,
					}));
				}
				TokenKind::VExpressionStart => self.interpolation(token),
				_ => {}
			}
		}

		while let Some(element) = self.stack.pop() {
			self.close_implicitly(element);
		}

		self.roots
	}

	fn push_node(&mut self, node: Node) {
		match self.stack.last_mut() {
			Some(parent) => parent.children.push(node),
			None => self.roots.push(node),
		}
	}

	fn start_tag(&mut self, open: &Token) {
		let raw_name = self.text(open.span)[1..].to_string();
		let mut attributes: Vec<Attribute> = Vec::new();
		let mut end = open.span.end;
		let mut self_closing = false;

		while let Some(token) = self.advance() {
			end = token.span.end;

			match token.kind {
				TokenKind::HtmlTagClose => break,
				TokenKind::HtmlSelfClosingTagClose => {
					self_closing = true;
					break;
				}
				TokenKind::HtmlIdentifier => {
					attributes.push(Attribute {
						name: self.text(token.span).to_string(),
						value: None,
						span: token.span,
					});
				}
				TokenKind::HtmlAssociation => {
					let Some(literal) = self.peek().filter(|next| next.kind == TokenKind::HtmlLiteral)
					else {
						continue;
					};
					self.cursor += 1;
					end = literal.span.end;

					if let Some(attribute) = attributes.last_mut() {
						attribute.value = Some(unquote(self.text(literal.span)).to_string());
						attribute.span.end = literal.span.end;
					}
				}
				_ => {}
			}
		}

		let name = raw_name.to_ascii_lowercase();
		let namespace = Namespace::resolve(&name, self.stack.last());
		let start_tag = StartTag {
			span: Span::new(open.span.start, end),
			self_closing,
		};
		let element = Element {
			name,
			raw_name,
			namespace,
			attributes,
			children: Vec::new(),
			span: start_tag.span,
			start_tag,
			end_tag: None,
		};

		if self_closing || VOID_ELEMENTS.contains(&element.name.as_str()) {
			self.push_node(Node::Element(element));
		} else {
			self.stack.push(element);
		}
	}

	fn end_tag(&mut self, open: &Token) {
		let name = self.text(open.span)[2..].to_ascii_lowercase();
		let mut end = open.span.end;

		while let Some(token) = self.advance() {
			end = token.span.end;
			if matches!(
				token.kind,
				TokenKind::HtmlTagClose | TokenKind::HtmlSelfClosingTagClose
			) {
				break;
			}
		}

		// Unmatched end tags are dropped.
		let Some(index) = self.stack.iter().rposition(|element| element.name == name) else {
			return;
		};

		while self.stack.len() > index + 1 {
			if let Some(element) = self.stack.pop() {
				self.close_implicitly(element);
			}
		}

		if let Some(mut element) = self.stack.pop() {
			let end_tag = Span::new(open.span.start, end);
			element.span.end = end_tag.end;
			element.end_tag = Some(end_tag);
			self.push_node(Node::Element(element));
		}
	}

	fn interpolation(&mut self, open: &Token) {
		let mut end = open.span.end;

		while let Some(token) = self.advance() {
			end = token.span.end;
			if token.kind == TokenKind::VExpressionEnd {
				break;
			}
		}

		self.push_node(Node::Interpolation(Span::new(open.span.start, end)));
	}

	/// An element left open ends where its last piece of content ends.
	fn close_implicitly(&mut self, mut element: Element) {
		if let Some(last) = element.children.last() {
			element.span.end = last.span().end;
		}
		self.push_node(Node::Element(element));
	}
}

fn unquote(literal: &str) -> &str {
	for quote in ['"', '\''] {
		if let Some(inner) = literal
			.strip_prefix(quote)
			.and_then(|rest| rest.strip_suffix(quote))
		{
			return inner;
		}
	}

	literal
}
