//! adfmark-core - document tree, Markdown rendering and parsing
//!
//! This crate provides the typed document tree used by issue-tracker
//! rich-text fields, a renderer from that tree to Markdown, a best-effort
//! parser from Markdown back to a tree, and the JSON wire codec for the
//! document store. It is used by `adfmark` (service and sub-task
//! extraction) and `adfmark-cli`.
//!
//! # Architecture
//!
//! ```text
//! Store JSON ──decode──▶ ┌───────────────┐ ──render──▶ Markdown
//!                        │ Document tree │
//! Store JSON ◀──encode── └───────────────┘ ◀──parse─── Markdown / LLM text
//! ```
//!
//! # Example
//!
//! ```rust
//! use adfmark_core::{parse, render, Block, Document, Text};
//!
//! let doc = Document::new(vec![
//!     Block::heading(1, vec![Text::plain("Hello World")]),
//!     Block::Paragraph(vec![
//!         Text::plain("This is "),
//!         Text::bold("bold"),
//!         Text::plain(" text."),
//!     ]),
//! ]);
//!
//! let markdown = render(&doc);
//! assert_eq!(markdown, "# Hello World\n\nThis is **bold** text.\n\n");
//! assert_eq!(parse(&markdown), doc);
//! ```

mod ast;
mod options;
mod parse;
mod render;
mod wire;

pub use ast::{Block, Document, ListItem, Mark, Marks, Text};
pub use options::{Options, DEFAULT_MAX_DEPTH};
pub use parse::{parse, parse_with};
pub use render::{render, render_with};
pub use wire::WireError;
