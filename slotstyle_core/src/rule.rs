use std::fmt::Display;

use serde::Serialize;

use crate::Document;
use crate::Element;
use crate::MarkupHost;
use crate::Patch;
use crate::SlotShape;
use crate::SlotStyle;
use crate::SlotStyleOptions;
use crate::Span;
use crate::classify;
use crate::has_significant_comments;
use crate::unwrap_patch;
use crate::wrap_patch;

/// The two ways a single slot can be written in the wrong style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SlotDiagnosticKind {
	/// A wrapper is present but the slot should sit on the component.
	ExpectedWithoutWrapper,
	/// The slot sits on the component but should be inside a wrapper.
	ExpectedWithWrapper,
}

impl SlotDiagnosticKind {
	pub fn message(self) -> &'static str {
		match self {
			Self::ExpectedWithoutWrapper => "Expected single slot to be directly on the component.",
			Self::ExpectedWithWrapper => "Expected single slot to be in a <template> wrapper.",
		}
	}

	/// A stable identifier for machine-readable output.
	pub fn id(self) -> &'static str {
		match self {
			Self::ExpectedWithoutWrapper => "expectedWithoutWrapper",
			Self::ExpectedWithWrapper => "expectedWithWrapper",
		}
	}
}

impl Display for SlotDiagnosticKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.message())
	}
}

/// A single slot written in the wrong style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotDiagnostic {
	pub kind: SlotDiagnosticKind,
	/// The offending directive (inline) or wrapper element (wrapped).
	pub span: Span,
	/// The resolved slot name.
	pub slot_name: String,
	/// The fix, applied as one unit.
	pub patch: Option<Patch>,
}

impl SlotDiagnostic {
	pub fn message(&self) -> &'static str {
		self.kind.message()
	}
}

/// Enforces one style for single slot content.
#[derive(Debug, Clone, Copy)]
pub struct SlotStyleRule<'h, H> {
	options: SlotStyleOptions,
	host: &'h H,
}

impl<'h, H: MarkupHost> SlotStyleRule<'h, H> {
	pub fn new(options: SlotStyleOptions, host: &'h H) -> Self {
		Self { options, host }
	}

	/// Check every component in the document, in document order.
	#[tracing::instrument(level = "debug", skip_all)]
	pub fn check_document(&self, document: &Document<'_>) -> Vec<SlotDiagnostic> {
		let mut diagnostics = Vec::new();

		document.walk(&mut |element| {
			if let Some(diagnostic) = self.check_element(document, element) {
				diagnostics.push(diagnostic);
			}
		});

		tracing::debug!(count = diagnostics.len(), "checked document");

		diagnostics
	}

	/// Report or skip a single element.
	pub fn check_element(
		&self,
		document: &Document<'_>,
		element: &Element,
	) -> Option<SlotDiagnostic> {
		if !self.host.is_custom_component(element) {
			return None;
		}

		match classify(element, self.host) {
			SlotShape::Inline(directive) => {
				let slot_name = directive.slot_name().to_string();
				if self.options.desired_style(&slot_name) != SlotStyle::WithWrapper {
					return None;
				}

				tracing::debug!(component = %element.raw_name, slot = %slot_name, "slot should be wrapped");

				let patch = wrap_patch(document.source(), element, &directive, document.tokens());
				Some(SlotDiagnostic {
					kind: SlotDiagnosticKind::ExpectedWithWrapper,
					span: directive.span,
					slot_name,
					patch: Some(patch),
				})
			}
			SlotShape::Wrapped(wrapper) => {
				if has_significant_comments(
					element,
					wrapper,
					document.tokens(),
					self.options.treat_comments_as_insignificant,
				) {
					tracing::debug!(component = %element.raw_name, "comments around wrapper, skipping");
					return None;
				}

				let directive = self.host.slot_directives(wrapper).into_iter().next()?;
				let slot_name = directive.slot_name().to_string();
				if self.options.desired_style(&slot_name) != SlotStyle::WithoutWrapper {
					return None;
				}

				let Some(patch) = unwrap_patch(document.source(), element, wrapper, self.host) else {
					tracing::trace!(component = %element.raw_name, "wrapper lost its directive");
					return None;
				};

				tracing::debug!(component = %element.raw_name, slot = %slot_name, "slot should be unwrapped");

				Some(SlotDiagnostic {
					kind: SlotDiagnosticKind::ExpectedWithoutWrapper,
					span: wrapper.span,
					slot_name,
					patch: Some(patch),
				})
			}
			SlotShape::None => None,
		}
	}
}
