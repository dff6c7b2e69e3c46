//! `slotstyle_core` is the core library for [slotstyle](https://github.com/ifiokjr/slotstyle), a checker that keeps single slot content in Vue templates written in one consistent style. It provides the template lexer, the tree builder, the single slot classifier, and the fix generator.
//!
//! A component whose only content goes to one slot can be written two ways:
//!
//! ```html
//! <my-component #item>content</my-component>
//! <my-component><template #item>content</template></my-component>
//! ```
//!
//! ## Processing Pipeline
//!
//! ```text
//! Template source
//!   -> Lexer (tokenizes tags, attributes, text, comments and interpolations)
//!   -> Parser (builds the element tree and a position-ordered token index)
//!   -> Classifier (inline slot, wrapped slot, or neither)
//!   -> Rule (compares against the configured style, emits diagnostics with patches)
//!   -> Engine (applies patches atomically, re-lints until stable)
//! ```
//!
//! ## Modules
//!
//! - [`config`]: Options and `slotstyle.toml` loading.
//! - [`project`]: Project scanning for `.vue` and `.html` files.
//!
//! ## Key Types
//!
//! - [`SlotStyleOptions`]: The normalized options the rule runs with.
//! - [`SlotStyleRule`]: Checks a parsed [`Document`] against the options.
//! - [`SlotDiagnostic`]: A single slot written in the wrong style, with its [`Patch`].
//! - [`MarkupHost`]: What the rule needs from the markup language. [`VueHost`] implements it for Vue.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use slotstyle_core::project::scan_project_with_config;
//! use slotstyle_core::{check_project, compute_fixes, write_updates};
//! use std::path::Path;
//!
//! let ctx = scan_project_with_config(Path::new(".")).unwrap();
//!
//! let result = check_project(&ctx).unwrap();
//! if !result.is_ok() {
//!     eprintln!("{} slot(s) in the wrong style", result.diagnostics.len());
//! }
//!
//! let fixes = compute_fixes(&ctx).unwrap();
//! write_updates(&fixes).unwrap();
//! ```

pub use config::*;
pub use engine::*;
pub use error::*;
pub use fix::*;
pub use host::*;
pub use parser::*;
pub use position::*;
pub use project::*;
pub use rule::*;
pub use shape::*;
pub use significance::*;
pub use tokens::Token;
pub use tokens::TokenIndex;
pub use tokens::TokenKind;
pub use vue::*;

pub mod config;
mod engine;
#[allow(unused_assignments)]
mod error;
mod fix;
mod host;
pub(crate) mod lexer;
mod parser;
mod position;
pub mod project;
mod rule;
mod shape;
mod significance;
pub(crate) mod tokens;
mod vue;

#[cfg(test)]
mod __fixtures;
