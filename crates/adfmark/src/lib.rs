//! # adfmark
//!
//! Convert issue-tracker rich text to and from Markdown, and pull
//! structured sub-tasks out of LLM-written solution text.
//!
//! ## Design
//!
//! Everything here is a pure function over owned values. Conversions never
//! fail on odd input: unknown nodes degrade to their children, empty text
//! parses to a placeholder paragraph, and extraction returns an empty list
//! when nothing matches. The only error is malformed JSON on the wire.
//!
//! Sub-task extraction is an ordered list of [`Tier`]s. The first tier
//! that yields at least one item wins; later tiers are not consulted.
//!
//! ## Example
//!
//! ```rust
//! use adfmark::DocumentService;
//!
//! let service = DocumentService::new();
//!
//! let doc = service.from_markdown("# Plan\n\n- **Add** login API");
//! assert_eq!(service.to_markdown(&doc), "# Plan\n\n* **Add** login API");
//!
//! let items = service.extract_subtasks(
//!     "Suggested sub-tasks:\nAdd login API | Implement POST /auth/login.\n",
//! );
//! assert_eq!(items[0].summary(), "Add login API");
//! assert_eq!(items[0].description(), Some("Implement POST /auth/login."));
//! ```

mod service;
pub mod subtasks;
mod utilities;

pub use adfmark_core::{
    parse, parse_with, render, render_with, Block, Document, ListItem, Mark, Marks, Options, Text,
    WireError,
};
pub use service::DocumentService;
pub use subtasks::{
    extract, extract_or_fallback, fallback_subtask, fill_descriptions, Extractor, Scope,
    SubtaskItem, Tier,
};
pub use utilities::SUMMARY_LIMIT;

/// Error type for adfmark operations
#[derive(Debug, thiserror::Error)]
pub enum AdfError {
    #[error("Wire error: {0}")]
    Wire(#[from] WireError),
}

pub type Result<T> = std::result::Result<T, AdfError>;
