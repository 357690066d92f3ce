//! Seni IR - shared data model for the Seni-script pipeline.
//!
//! This crate holds the types every phase agrees on:
//! - [`Span`] for source locations
//! - [`Name`] for identifiers
//! - [`Token`] and [`TokenKind`] for lexer output
//! - [`Node`] and [`NodeKind`] for the front AST, which keeps the provenance
//!   of alterable literals so a script can be rewritten from a genotype
//! - [`Form`], [`SpecialForm`] and [`Gene`] for compiled (back AST) output
//!
//! The front AST is built once by the parser and only read afterwards. The
//! back AST is produced by the compiler and shared read-only by every
//! evaluation of the script.

mod form;
mod name;
mod node;
mod span;
mod token;

pub use form::{ArgMap, Atom, Form, Gene, GeneId, SpecialForm};
pub use name::Name;
pub use node::{gene_count, is_map_generator, Node, NodeKind};
pub use span::Span;
pub use token::{Literal, Token, TokenKind};
