//! DocumentService - the main entry point for document conversion and
//! sub-task extraction.

use adfmark_core::{Document, Options};

use crate::subtasks::{fallback_subtask, fill_descriptions, Extractor, SubtaskItem};
use crate::Result;

/// Converts between store documents and Markdown, and extracts sub-tasks
pub struct DocumentService {
    options: Options,
    extractor: Extractor,
}

impl DocumentService {
    /// Create a new DocumentService with default options
    pub fn new() -> Self {
        Self {
            options: Options::default(),
            extractor: Extractor::new(),
        }
    }

    /// Create a DocumentService with custom options
    pub fn with_options(options: Options) -> Self {
        Self {
            options,
            extractor: Extractor::new(),
        }
    }

    /// Render a document as Markdown for display, trimmed
    pub fn to_markdown(&self, doc: &Document) -> String {
        let markdown = adfmark_core::render_with(doc, &self.options);
        tracing::debug!(
            blocks = doc.content.len(),
            bytes = markdown.len(),
            "rendered document"
        );
        markdown.trim().to_string()
    }

    /// Decode store JSON and render it as Markdown
    pub fn json_to_markdown(&self, json: &str) -> Result<String> {
        let doc = Document::from_json_str_with(json, &self.options)?;
        Ok(self.to_markdown(&doc))
    }

    /// Parse Markdown into a document
    pub fn from_markdown(&self, text: &str) -> Document {
        let doc = adfmark_core::parse_with(text, &self.options);
        tracing::debug!(blocks = doc.content.len(), "parsed markdown");
        doc
    }

    /// Parse Markdown and encode it as store JSON, ready for write-back
    pub fn markdown_to_json(&self, text: &str) -> String {
        self.from_markdown(text)
            .to_value_with(&self.options)
            .to_string()
    }

    /// Extract sub-tasks from solution text
    pub fn extract_subtasks(&self, text: &str) -> Vec<SubtaskItem> {
        self.extractor.extract(text)
    }

    /// Extract sub-tasks, or synthesize one from the text when none are found
    pub fn subtasks_or_fallback(&self, text: &str) -> Vec<SubtaskItem> {
        let items = self.extract_subtasks(text);
        if !items.is_empty() {
            return items;
        }
        tracing::info!("no sub-tasks found, using first line as summary");
        vec![fallback_subtask(text)]
    }

    /// Sub-tasks ready to be filed: extracted or synthesized, and each
    /// with a description
    pub fn subtasks_for_filing(&self, text: &str) -> Vec<SubtaskItem> {
        fill_descriptions(self.subtasks_or_fallback(text), text)
    }

    /// Get the current options
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Get mutable access to options
    pub fn options_mut(&mut self) -> &mut Options {
        &mut self.options
    }

    /// Get mutable access to the extraction tiers
    pub fn extractor_mut(&mut self) -> &mut Extractor {
        &mut self.extractor
    }
}

impl Default for DocumentService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subtasks::Tier;

    #[test]
    fn test_json_to_markdown() {
        let service = DocumentService::new();
        let json = r#"{"type": "doc", "version": 1, "content": [
            {"type": "paragraph", "content": [{"type": "text", "text": "Hello World"}]}
        ]}"#;
        assert_eq!(service.json_to_markdown(json).unwrap(), "Hello World");
    }

    #[test]
    fn test_json_to_markdown_invalid() {
        let service = DocumentService::new();
        assert!(service.json_to_markdown("[1, 2").is_err());
    }

    #[test]
    fn test_markdown_to_json() {
        let service = DocumentService::new();
        let json: serde_json::Value =
            serde_json::from_str(&service.markdown_to_json("# Title")).unwrap();
        assert_eq!(json["type"], "doc");
        assert_eq!(json["version"], 1);
        assert_eq!(json["content"][0]["type"], "heading");
        assert_eq!(json["content"][0]["attrs"]["level"], 1);
    }

    #[test]
    fn test_markdown_to_json_empty_uses_placeholder() {
        let mut service = DocumentService::new();
        service.options_mut().empty_placeholder = "n/a".to_string();
        let json: serde_json::Value =
            serde_json::from_str(&service.markdown_to_json("")).unwrap();
        assert_eq!(json["content"][0]["content"][0]["text"], "n/a");
    }

    #[test]
    fn test_code_language_fallback_option() {
        let mut service = DocumentService::new();
        service.options_mut().code_language_fallback = "text".to_string();
        let json: serde_json::Value =
            serde_json::from_str(&service.markdown_to_json("```\nx\n```")).unwrap();
        assert_eq!(json["content"][0]["attrs"]["language"], "text");
    }

    #[test]
    fn test_subtasks_or_fallback() {
        let service = DocumentService::new();
        let items = service.subtasks_or_fallback("Rewrite the parser\nbecause reasons");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].summary(), "Rewrite the parser");
    }

    #[test]
    fn test_subtasks_for_filing() {
        let service = DocumentService::new();
        let text = "Suggested sub-tasks:\n1. Add index\n2. Backfill\n   in batches\n";
        let items = service.subtasks_for_filing(text);
        assert_eq!(
            items,
            vec![
                SubtaskItem::new("Add index", Some(text.trim())),
                SubtaskItem::new("Backfill", Some("in batches")),
            ]
        );

        let items = service.subtasks_for_filing("");
        assert_eq!(items[0].summary(), "Implement solution");
        assert_eq!(
            items[0].description(),
            Some("See parent story and solution comment for context.")
        );
    }

    #[test]
    fn test_custom_extractor() {
        let mut service = DocumentService::new();
        service
            .extractor_mut()
            .add_tier("everything", Tier::for_document(|t| vec![SubtaskItem::new(t, None)]));
        let items = service.extract_subtasks("prose");
        assert_eq!(items, vec![SubtaskItem::new("prose", None)]);
    }
}
