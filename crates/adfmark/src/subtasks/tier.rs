//! Tier and Scope types for sub-task extraction.

use super::SubtaskItem;

/// Type alias for tier extraction functions
pub type ExtractFn = Box<dyn Fn(&str) -> Vec<SubtaskItem> + Send + Sync>;

/// What text a tier is handed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// The text following a located sub-task section header.
    /// Skipped when no header was found.
    Section,
    /// The whole input text
    Document,
}

/// A tier is one fallback strategy in the extraction order
pub struct Tier {
    /// Which slice of the input this tier scans
    pub scope: Scope,
    /// Extraction function; must be total
    pub extract: ExtractFn,
}

impl Tier {
    /// Create a new tier
    pub fn new<F>(scope: Scope, extract: F) -> Self
    where
        F: Fn(&str) -> Vec<SubtaskItem> + Send + Sync + 'static,
    {
        Self {
            scope,
            extract: Box::new(extract),
        }
    }

    /// Create a tier that scans the located section
    pub fn for_section<F>(extract: F) -> Self
    where
        F: Fn(&str) -> Vec<SubtaskItem> + Send + Sync + 'static,
    {
        Self::new(Scope::Section, extract)
    }

    /// Create a tier that scans the whole text
    pub fn for_document<F>(extract: F) -> Self
    where
        F: Fn(&str) -> Vec<SubtaskItem> + Send + Sync + 'static,
    {
        Self::new(Scope::Document, extract)
    }

    /// Apply this tier to `text`, or to `section` for section-scoped tiers
    pub fn apply(&self, text: &str, section: Option<&str>) -> Vec<SubtaskItem> {
        match (self.scope, section) {
            (Scope::Document, _) => (self.extract)(text),
            (Scope::Section, Some(section)) => (self.extract)(section),
            (Scope::Section, None) => Vec::new(),
        }
    }
}
