use serde::Serialize;

use crate::Directive;
use crate::Element;
use crate::MarkupHost;
use crate::SlotStyleError;
use crate::SlotStyleResult;
use crate::Span;
use crate::WRAPPER_TAG;
use crate::tokens::TokenIndex;

/// Replace the bytes covered by `span` with `replacement`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edit {
	pub span: Span,
	pub replacement: String,
}

impl Edit {
	pub fn replace(span: Span, replacement: impl Into<String>) -> Self {
		Self {
			span,
			replacement: replacement.into(),
		}
	}

	pub fn insert(offset: usize, text: impl Into<String>) -> Self {
		Self::replace(Span::empty(offset), text)
	}

	pub fn remove(span: Span) -> Self {
		Self::replace(span, String::new())
	}
}

/// Edits that must be applied together. Always sorted by position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Patch {
	edits: Vec<Edit>,
}

impl Patch {
	pub fn new(mut edits: Vec<Edit>) -> Self {
		edits.sort_by_key(|edit| (edit.span.start, edit.span.end));
		Self { edits }
	}

	pub fn edits(&self) -> &[Edit] {
		&self.edits
	}

	/// The smallest span covering every edit.
	pub fn span(&self) -> Option<Span> {
		let first = self.edits.first()?;
		let end = self.edits.iter().map(|edit| edit.span.end).max()?;
		Some(Span::new(first.span.start, end))
	}

	/// Check every edit fits in a buffer of `len` bytes and no two overlap.
	pub fn validate(&self, len: usize) -> SlotStyleResult<()> {
		for edit in &self.edits {
			if edit.span.start > edit.span.end || edit.span.end > len {
				return Err(SlotStyleError::InvalidEditRange {
					start: edit.span.start,
					end: edit.span.end,
					len,
				});
			}
		}

		for pair in self.edits.windows(2) {
			if pair[0].span.end > pair[1].span.start {
				return Err(SlotStyleError::OverlappingEdits {
					first: pair[0].span.range(),
					second: pair[1].span.range(),
				});
			}
		}

		Ok(())
	}

	/// Apply this patch on its own.
	pub fn apply(&self, source: &str) -> SlotStyleResult<String> {
		apply_patches(source, [self]).map(|applied| applied.output)
	}
}

/// The result of applying a batch of patches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
	pub output: String,
	/// Patches written into `output`.
	pub applied: usize,
	/// Patches skipped because they overlap one applied earlier in the batch.
	pub deferred: usize,
}

/// Apply patches against the original `source`. Patches are taken in order of
/// position and each one is applied whole or not at all; a patch that
/// overlaps an already accepted one is deferred, which happens when a
/// component nests inside another component's content.
pub fn apply_patches<'p>(
	source: &str,
	patches: impl IntoIterator<Item = &'p Patch>,
) -> SlotStyleResult<Applied> {
	let mut candidates: Vec<(Span, &Patch)> = Vec::new();
	for patch in patches {
		patch.validate(source.len())?;
		if let Some(span) = patch.span() {
			candidates.push((span, patch));
		}
	}
	candidates.sort_by_key(|(span, _)| (span.start, span.end));

	let mut accepted: Vec<&Edit> = Vec::new();
	let mut last_end: Option<usize> = None;
	let mut applied = 0;
	let mut deferred = 0;

	for (span, patch) in candidates {
		if last_end.is_some_and(|end| span.start <= end) {
			deferred += 1;
			continue;
		}
		last_end = Some(span.end);
		accepted.extend(patch.edits());
		applied += 1;
	}

	let mut output = String::with_capacity(source.len());
	let mut cursor = 0;
	for edit in accepted {
		output.push_str(&source[cursor..edit.span.start]);
		output.push_str(&edit.replacement);
		cursor = edit.span.end;
	}
	output.push_str(&source[cursor..]);

	Ok(Applied {
		output,
		applied,
		deferred,
	})
}

/// Start of the removal range for `directive`: the end of the preceding token
/// on the start tag, so the separating whitespace goes with it.
fn removal_start(component: &Element, directive: &Directive, tokens: &TokenIndex) -> usize {
	tokens
		.before(directive.span.start)
		.map_or(directive.span.start, |token| token.span.end)
		.clamp(component.start_tag.span.start, directive.span.start)
}

/// Move an inline slot directive onto a new wrapper around the component's
/// content.
///
/// `<comp #item>content</comp>` becomes
/// `<comp><template #item>content</template></comp>`. A self-closing
/// component is rewritten whole, since it has no content region to target.
pub fn wrap_patch(
	source: &str,
	component: &Element,
	directive: &Directive,
	tokens: &TokenIndex,
) -> Patch {
	let directive_text = &source[directive.span.range()];
	let removal = Span::new(removal_start(component, directive, tokens), directive.span.end);
	let start_tag = component.start_tag.span;

	if component.start_tag.self_closing {
		let mut head = String::with_capacity(start_tag.len());
		head.push_str(&source[start_tag.start..removal.start]);
		head.push_str(&source[removal.end..start_tag.end]);
		let head = head.strip_suffix("/>").unwrap_or(&head).trim_end();

		let replacement = format!(
			"{head}><{WRAPPER_TAG} {directive_text}></{WRAPPER_TAG}></{}>",
			component.raw_name
		);

		return Patch::new(vec![Edit::replace(component.span, replacement)]);
	}

	let content_span = component.content_span();
	let content = &source[content_span.range()];

	Patch::new(vec![
		Edit::remove(removal),
		Edit::replace(
			content_span,
			format!("<{WRAPPER_TAG} {directive_text}>{content}</{WRAPPER_TAG}>"),
		),
	])
}

/// Move the wrapper's slot directive onto the component and drop the
/// wrapper's own tags, keeping its content byte for byte.
///
/// Returns `None` when the wrapper has no slot directive, which the
/// classifier never produces.
pub fn unwrap_patch(
	source: &str,
	component: &Element,
	wrapper: &Element,
	host: &impl MarkupHost,
) -> Option<Patch> {
	let directive = host.slot_directives(wrapper).into_iter().next()?;
	let directive_text = &source[directive.span.range()];

	let start_tag = component.start_tag;
	let delimiter = if start_tag.self_closing { 2 } else { 1 };
	let insert_at = start_tag.span.end.checked_sub(delimiter)?;

	let content = &source[wrapper.content_span().range()];

	Some(Patch::new(vec![
		Edit::insert(insert_at, format!(" {directive_text}")),
		Edit::replace(wrapper.span, content),
	]))
}
