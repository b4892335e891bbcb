//! Sub-task extraction from free-form solution text.

mod builtin;
mod tier;

pub use builtin::{
    approach_plan, builtin_tiers, locate_section, multi_line_blocks, pipe_delimited,
    APPROACH_PLAN_TIER, BLOCKS_TIER, PIPE_TIER,
};
pub use tier::{ExtractFn, Scope, Tier};

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde::Serialize;

use crate::utilities::{
    truncate_chars, FALLBACK_DESCRIPTION_LIMIT, SOLUTION_DESCRIPTION_LIMIT, SUMMARY_LIMIT,
};

const FALLBACK_SUMMARY: &str = "Implement solution";
const PLACEHOLDER_DESCRIPTION: &str = "See parent story and solution comment for context.";

static DEFAULT_EXTRACTOR: Lazy<Extractor> = Lazy::new(Extractor::new);

/// One suggested sub-task: a short summary and an optional description
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubtaskItem {
    summary: String,
    description: Option<String>,
}

impl SubtaskItem {
    /// Create an item. The summary is cut to 255 characters; a blank
    /// description becomes `None`.
    pub fn new(summary: &str, description: Option<&str>) -> Self {
        Self {
            summary: truncate_chars(summary, SUMMARY_LIMIT).to_string(),
            description: description
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string),
        }
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Whether the summary has any non-whitespace text
    pub fn has_summary(&self) -> bool {
        !self.summary.trim().is_empty()
    }

    pub fn into_parts(self) -> (String, Option<String>) {
        (self.summary, self.description)
    }
}

/// Ordered collection of extraction tiers
pub struct Extractor {
    tiers: IndexMap<String, Tier>,
}

impl Extractor {
    /// Create an extractor with the built-in tiers
    pub fn new() -> Self {
        let mut extractor = Self::empty();
        for (name, tier) in builtin_tiers() {
            extractor.add_tier(name, tier);
        }
        extractor
    }

    /// Create an extractor with no tiers
    pub fn empty() -> Self {
        Self {
            tiers: IndexMap::new(),
        }
    }

    /// Append a tier, or replace an existing tier of the same name in place
    pub fn add_tier(&mut self, name: &str, tier: Tier) -> &mut Self {
        self.tiers.insert(name.to_string(), tier);
        self
    }

    /// Remove a tier, keeping the order of the rest
    pub fn remove_tier(&mut self, name: &str) -> Option<Tier> {
        self.tiers.shift_remove(name)
    }

    /// Tier names in evaluation order
    pub fn tier_names(&self) -> impl Iterator<Item = &str> {
        self.tiers.keys().map(String::as_str)
    }

    /// Extract sub-tasks; empty when no tier finds anything
    pub fn extract(&self, text: &str) -> Vec<SubtaskItem> {
        self.extract_with_tier(text)
            .map(|(_, items)| items)
            .unwrap_or_default()
    }

    /// Extract sub-tasks and report which tier produced them.
    ///
    /// Items with a blank summary are dropped; a tier that yields only
    /// such items counts as having found nothing.
    pub fn extract_with_tier(&self, text: &str) -> Option<(&str, Vec<SubtaskItem>)> {
        let section = locate_section(text);
        if section.is_none() {
            tracing::trace!("no sub-task section header found");
        }

        for (name, tier) in &self.tiers {
            let mut items = tier.apply(text, section);
            items.retain(SubtaskItem::has_summary);
            if !items.is_empty() {
                tracing::debug!(tier = %name, count = items.len(), "sub-task tier matched");
                return Some((name.as_str(), items));
            }
        }

        tracing::debug!("no sub-task tier matched");
        None
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract sub-tasks with the built-in tiers
pub fn extract(text: &str) -> Vec<SubtaskItem> {
    DEFAULT_EXTRACTOR.extract(text)
}

/// Single item synthesized from the text itself, for when extraction
/// finds nothing: the first line as summary, the head of the text as
/// description.
pub fn fallback_subtask(text: &str) -> SubtaskItem {
    let first_line = text.split('\n').next().unwrap_or("").trim();
    let summary = if first_line.is_empty() {
        FALLBACK_SUMMARY
    } else {
        first_line
    };

    let description = truncate_chars(text, FALLBACK_DESCRIPTION_LIMIT);
    SubtaskItem {
        summary: truncate_chars(summary, SUMMARY_LIMIT).to_string(),
        description: (!description.is_empty()).then(|| description.to_string()),
    }
}

/// Give every item without a description one taken from the solution
/// text: its first 5000 characters after trimming, or a pointer back to
/// the parent issue when the text is blank.
pub fn fill_descriptions(items: Vec<SubtaskItem>, text: &str) -> Vec<SubtaskItem> {
    let solution = truncate_chars(text.trim(), SOLUTION_DESCRIPTION_LIMIT);
    let default = if solution.is_empty() {
        PLACEHOLDER_DESCRIPTION
    } else {
        solution
    };

    items
        .into_iter()
        .map(|mut item| {
            let blank = item.description().map_or(true, |d| d.trim().is_empty());
            if blank {
                item.description = Some(default.to_string());
            }
            item
        })
        .collect()
}

/// Extract sub-tasks, falling back to a single synthesized item
pub fn extract_or_fallback(text: &str) -> Vec<SubtaskItem> {
    let items = extract(text);
    if items.is_empty() {
        vec![fallback_subtask(text)]
    } else {
        items
    }
}
