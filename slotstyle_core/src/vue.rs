use crate::Attribute;
use crate::Directive;
use crate::DirectiveArgument;
use crate::Element;
use crate::MarkupHost;
use crate::Namespace;

/// Well-known HTML element names. Anything else is a component.
const HTML_ELEMENT_NAMES: &[&str] = &[
	"a", "abbr", "address", "area", "article", "aside", "audio", "b", "base", "bdi", "bdo",
	"blockquote", "body", "br", "button", "canvas", "caption", "cite", "code", "col", "colgroup",
	"data", "datalist", "dd", "del", "details", "dfn", "dialog", "div", "dl", "dt", "em", "embed",
	"fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6",
	"head", "header", "hgroup", "hr", "html", "i", "iframe", "img", "input", "ins", "kbd", "label",
	"legend", "li", "link", "main", "map", "mark", "menu", "meta", "meter", "nav", "noscript",
	"object", "ol", "optgroup", "option", "output", "p", "param", "picture", "pre", "progress",
	"q", "rp", "rt", "ruby", "s", "samp", "script", "search", "section", "select", "slot", "small",
	"source", "span", "strong", "style", "sub", "summary", "sup", "table", "tbody", "td",
	"template", "textarea", "tfoot", "th", "thead", "time", "title", "tr", "track", "u", "ul",
	"var", "video", "wbr",
];

/// Well-known SVG element names, only consulted inside `<svg>`.
const SVG_ELEMENT_NAMES: &[&str] = &[
	"a", "animate", "animateMotion", "animateTransform", "circle", "clipPath", "defs", "desc",
	"ellipse", "feBlend", "feColorMatrix", "feComponentTransfer", "feComposite", "feFlood",
	"feGaussianBlur", "feImage", "feMerge", "feMergeNode", "feMorphology", "feOffset", "feTile",
	"feTurbulence", "filter", "foreignObject", "g", "image", "line", "linearGradient", "marker",
	"mask", "metadata", "mpath", "path", "pattern", "polygon", "polyline", "radialGradient",
	"rect", "script", "set", "stop", "style", "svg", "switch", "symbol", "text", "textPath",
	"title", "tspan", "use", "view",
];

/// Well-known MathML element names, only consulted inside `<math>`.
const MATH_ELEMENT_NAMES: &[&str] = &[
	"annotation", "annotation-xml", "maction", "math", "menclose", "merror", "mfenced", "mfrac",
	"mi", "mmultiscripts", "mn", "mo", "mover", "mpadded", "mphantom", "mprescripts", "mroot",
	"mrow", "ms", "mspace", "msqrt", "mstyle", "msub", "msubsup", "msup", "mtable", "mtd",
	"mtext", "mtr", "munder", "munderover", "semantics",
];

/// Vue template conventions: component detection and `v-` directive syntax
/// including the `:`, `@`, `#` and `.` shorthands.
#[derive(Debug, Clone, Copy, Default)]
pub struct VueHost;

impl VueHost {
	/// Names are only well known within their own namespace: a `<view>` in
	/// plain HTML is a component, inside `<svg>` it is not.
	fn is_well_known_element(element: &Element) -> bool {
		let names = match element.namespace {
			Namespace::Html => HTML_ELEMENT_NAMES,
			Namespace::Svg => SVG_ELEMENT_NAMES,
			Namespace::MathMl => MATH_ELEMENT_NAMES,
		};

		names.contains(&element.raw_name.as_str())
	}

	fn has_is_binding(&self, element: &Element) -> bool {
		element.attribute("is").is_some()
			|| element.attributes.iter().any(|attribute| {
				self.directive(attribute).is_some_and(|directive| {
					directive.key == "is"
						|| (directive.key == "bind"
							&& directive.argument == Some(DirectiveArgument::Static("is".into())))
				})
			})
	}
}

impl MarkupHost for VueHost {
	fn is_custom_component(&self, element: &Element) -> bool {
		!Self::is_well_known_element(element) || self.has_is_binding(element)
	}

	fn directive(&self, attribute: &Attribute) -> Option<Directive> {
		let name = attribute.name.as_str();
		let mut modifiers = Vec::new();

		let (key, argument_source) = match name.as_bytes().first()? {
			b'#' => ("slot", Some(&name[1..])),
			b':' => ("bind", Some(&name[1..])),
			b'@' => ("on", Some(&name[1..])),
			b'.' => {
				modifiers.push("prop".to_string());
				("bind", Some(&name[1..]))
			}
			_ => {
				let rest = name.strip_prefix("v-")?;
				let end = rest.find([':', '.']).unwrap_or(rest.len());
				let (key, tail) = rest.split_at(end);
				if key.is_empty() {
					return None;
				}
				match tail.strip_prefix(':') {
					Some(argument) => (key, Some(argument)),
					None => {
						modifiers.extend(split_modifiers(tail));
						(key, None)
					}
				}
			}
		};

		let argument = argument_source.and_then(|source| {
			let (argument, tail) = parse_argument(source);
			modifiers.extend(split_modifiers(tail));
			argument
		});

		Some(Directive {
			key: key.to_string(),
			argument,
			modifiers,
			span: attribute.span,
		})
	}
}

/// Split `[expr].mods` or `name.mods` into the argument and the modifier tail.
fn parse_argument(source: &str) -> (Option<DirectiveArgument>, &str) {
	if let Some(rest) = source.strip_prefix('[') {
		return match rest.find(']') {
			Some(close) => {
				(
					Some(DirectiveArgument::Dynamic(rest[..close].to_string())),
					&rest[close + 1..],
				)
			}
			None => (Some(DirectiveArgument::Dynamic(rest.to_string())), ""),
		};
	}

	let end = source.find('.').unwrap_or(source.len());
	let (name, tail) = source.split_at(end);
	let argument = (!name.is_empty()).then(|| DirectiveArgument::Static(name.to_string()));

	(argument, tail)
}

fn split_modifiers(tail: &str) -> impl Iterator<Item = String> + '_ {
	tail.split('.')
		.filter(|modifier| !modifier.is_empty())
		.map(str::to_string)
}
