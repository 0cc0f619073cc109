//! # Section layer
//!
//! Turns raw heading spans into typed headers ([`header`]) and an ordered
//! sequence of headers into word-sense entries ([`lexer`]).

pub mod header;
pub mod lexer;

pub use header::Header;
pub use lexer::{Entries, Entry, assemble};
