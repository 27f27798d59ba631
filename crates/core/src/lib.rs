//! jtree-core: token-stream parser for a JSON-like grammar.
//!
//! Turns a sequence of pre-extracted tokens into a concrete syntax tree.
//! Parsing never aborts: the first grammar violation is recorded and the
//! parser unwinds, returning the partial tree alongside the diagnostic.
//!
//! # Public API
//!
//! - [`lex()`] -- read `<TYPE, VALUE>` token records
//! - [`TokenStream`] -- read-once token sequence with an end-of-input tail
//! - [`Parser`] -- recursive-descent parser; [`parse_tokens()`] and
//!   [`parse_records()`] wrap it for one-shot use
//! - [`Node`] / [`NodeKind`] -- the tree and its pre-order rendering
//! - [`ErrorLog`] / [`ParseError`] -- recorded diagnostics

pub mod error;
pub mod lexer;
pub mod parser;
pub mod stream;
pub mod token;
pub mod tree;

// ── Convenience re-exports ───────────────────────────────────────────

pub use error::{ErrorLog, ParseError};
pub use lexer::{lex, lex_record};
pub use parser::{parse_records, parse_tokens, Parse, Parser, ParserConfig, DEFAULT_MAX_DEPTH};
pub use stream::TokenStream;
pub use token::{Token, TokenType, UnknownTokenType};
pub use tree::{Node, NodeKind, DEFAULT_INDENT};
