use crate::Directive;
use crate::Element;
use crate::MarkupHost;
use crate::Node;

/// The tag of the dedicated element that wraps slot content.
pub const WRAPPER_TAG: &str = "template";

/// How a component invocation passes its content, as far as a single slot is
/// concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotShape<'a> {
	/// The component's own start tag carries the one slot directive.
	Inline(Directive),
	/// All content sits inside exactly one slot wrapper.
	Wrapped(&'a Element),
	/// Anything else: no slot, several slots, mixed or dynamic content.
	None,
}

/// Classify a component invocation.
pub fn classify<'a>(component: &'a Element, host: &impl MarkupHost) -> SlotShape<'a> {
	let mut inline = host.slot_directives(component);

	match inline.len() {
		0 => single_slot_wrapper(component, host).map_or(SlotShape::None, SlotShape::Wrapped),
		1 => inline.pop().map_or(SlotShape::None, SlotShape::Inline),
		_ => SlotShape::None,
	}
}

/// The only child of `component` when that child is a slot wrapper and
/// nothing else but whitespace surrounds it.
pub fn single_slot_wrapper<'a>(component: &'a Element, host: &impl MarkupHost) -> Option<&'a Element> {
	let mut wrapper = None;

	for child in &component.children {
		match child {
			Node::Text(text) => {
				if !text.value.trim().is_empty() {
					return None;
				}
			}
			Node::Interpolation(_) => return None,
			Node::Element(element) => {
				if !is_slot_wrapper(element, host) || wrapper.is_some() {
					return None;
				}
				wrapper = Some(element);
			}
		}
	}

	wrapper
}

/// A `<template>` whose attributes are all slot directives, and at least one.
pub fn is_slot_wrapper(element: &Element, host: &impl MarkupHost) -> bool {
	element.name == WRAPPER_TAG
		&& !element.attributes.is_empty()
		&& element.attributes.iter().all(|attribute| {
			host.directive(attribute)
				.as_ref()
				.is_some_and(Directive::is_slot)
		})
}
