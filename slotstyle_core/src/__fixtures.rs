use crate::Attribute;
use crate::SlotStyle;
use crate::SlotStyleOptions;
use crate::Span;

pub fn without_wrapper() -> SlotStyleOptions {
	SlotStyleOptions::default()
}

pub fn with_wrapper() -> SlotStyleOptions {
	SlotStyleOptions {
		named_slot_style: SlotStyle::WithWrapper,
		default_slot_style: SlotStyle::WithWrapper,
		treat_comments_as_insignificant: false,
	}
}

/// Named slots inline, the default slot wrapped.
pub fn mixed_styles() -> SlotStyleOptions {
	SlotStyleOptions {
		named_slot_style: SlotStyle::WithoutWrapper,
		default_slot_style: SlotStyle::WithWrapper,
		treat_comments_as_insignificant: false,
	}
}

pub fn comments_insignificant() -> SlotStyleOptions {
	SlotStyleOptions {
		treat_comments_as_insignificant: true,
		..SlotStyleOptions::default()
	}
}

/// Wrap a fragment in a single-file component `<template>` block.
pub fn sfc(body: &str) -> String {
	format!("<template>{body}</template>")
}

/// An attribute as the tree builder would produce it, spanning its own name.
pub fn attribute(name: &str) -> Attribute {
	Attribute {
		name: name.to_string(),
		value: None,
		span: Span::new(0, name.len()),
	}
}
