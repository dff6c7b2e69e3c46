use crate::Element;
use crate::tokens::TokenIndex;

/// Whether comments around a slot wrapper would be lost or moved by
/// unwrapping it.
///
/// Only comments between the component's start tag and the wrapper, or
/// between the wrapper and the component's end tag, count. A component
/// without an end tag has nowhere to keep such comments.
pub fn has_significant_comments(
	component: &Element,
	wrapper: &Element,
	tokens: &TokenIndex,
	treat_comments_as_insignificant: bool,
) -> bool {
	if treat_comments_as_insignificant {
		return false;
	}

	let Some(end_tag) = component.end_tag else {
		return false;
	};

	let before = tokens
		.comments_between(component.start_tag.span.end, wrapper.span.start)
		.next()
		.is_some();

	before
		|| tokens
			.comments_between(wrapper.span.end, end_tag.start)
			.next()
			.is_some()
}
