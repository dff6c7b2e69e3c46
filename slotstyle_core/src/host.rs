use serde::Serialize;

use crate::Attribute;
use crate::Element;
use crate::Span;

/// The name every slot without a static argument resolves to.
pub const DEFAULT_SLOT: &str = "default";

/// The directive key that selects slot content.
pub const SLOT_DIRECTIVE: &str = "slot";

/// The argument of a directive, e.g. `item` in `v-slot:item`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum DirectiveArgument {
	/// A literal identifier.
	Static(String),
	/// Anything computed, e.g. `v-slot:[name]`.
	Dynamic(String),
}

/// A binding-style attribute as understood by the host markup language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Directive {
	/// The directive name without prefix or shorthand, e.g. `slot` for both
	/// `v-slot:item` and `#item`.
	pub key: String,
	pub argument: Option<DirectiveArgument>,
	pub modifiers: Vec<String>,
	/// The whole attribute including any value.
	pub span: Span,
}

impl Directive {
	/// The slot this directive selects. Only a static argument names a slot;
	/// an absent or dynamic argument falls back to `default`.
	pub fn slot_name(&self) -> &str {
		match &self.argument {
			Some(DirectiveArgument::Static(name)) => name,
			Some(DirectiveArgument::Dynamic(_)) | None => DEFAULT_SLOT,
		}
	}

	pub fn is_slot(&self) -> bool {
		self.key == SLOT_DIRECTIVE
	}
}

/// Capabilities supplied by the surrounding markup language.
pub trait MarkupHost {
	/// Whether the element invokes a user-defined component rather than a
	/// built-in element.
	fn is_custom_component(&self, element: &Element) -> bool;

	/// Interpret an attribute as a directive.
	fn directive(&self, attribute: &Attribute) -> Option<Directive>;

	/// Every slot directive on the element's start tag, in source order.
	fn slot_directives(&self, element: &Element) -> Vec<Directive> {
		element
			.attributes
			.iter()
			.filter_map(|attribute| self.directive(attribute))
			.filter(Directive::is_slot)
			.collect()
	}
}
