//! Markdown front end for the layout pipeline.
//!
//! Lexes markdown text into an ordered sequence of block tokens, strips
//! inline markup to plain text, and serializes tokens back to markdown for
//! the `.md` export path.

mod inline;
mod lexer;
mod tokens;
mod writer;

pub use lexer::lex;
pub use tokens::{kind_sequence, Block, BlockKind, List, ListItem, Table};
pub use writer::write;
