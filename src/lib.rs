//! Prose Grammar — procedural text generation from stochastic grammars.
//!
//! Expands a context-free-grammar-like tree of boxes, categories,
//! substitutions, and choices into an ordered sequence of terminal strings,
//! with chance-gated suppression and named post-expansion filters.

pub mod core;

pub use crate::core::expand::expand;
pub use crate::core::filter::FilterRegistry;
pub use crate::core::grammar::{GrammarDocument, GrammarError, Node};
pub use crate::core::random::{RandomSource, StdRandom};
