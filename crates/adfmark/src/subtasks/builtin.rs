//! Built-in extraction tiers.
//!
//! Evaluated in this order, first non-empty result wins:
//!
//! 1. `pipe` - `Summary | Description` lines in the sub-task section
//! 2. `blocks` - numbered or bulleted items in the section, with the
//!    following plain lines as description
//! 3. `approach-plan` - the lines of an `APPROACH PLAN` section as
//!    summary-only items

use once_cell::sync::Lazy;
use regex::Regex;

use super::{SubtaskItem, Tier};
use crate::utilities::{char_len, is_list_line, strip_bullet, strip_number, SUMMARY_LIMIT};

pub const PIPE_TIER: &str = "pipe";
pub const BLOCKS_TIER: &str = "blocks";
pub const APPROACH_PLAN_TIER: &str = "approach-plan";

/// Section headers, tried in order; the first pattern with a match wins
static SECTION_HEADERS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)(?:Suggested\s+sub-tasks|Sub-tasks\s+to\s+create|SUGGESTED\s+SUB-TASKS|Tasks\s+to\s+create|Recommended\s+(?:sub-?)?tasks):\s*\n",
        r"(?i)\n3\)\s*SUGGESTED\s+SUB-TASKS:\s*\n",
        r"(?i)\n3\.\s*SUGGESTED\s+SUB-TASKS:\s*\n",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static SECTION_END: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:Solution|Approach)\s*:?\s*$").unwrap());

static APPROACH_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:APPROACH\s+PLAN|1\)\s*APPROACH)\s*:?\s*\n").unwrap());

static APPROACH_END: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\n\s*(?:2\)|2\.|SOLUTION|Suggested)").unwrap());

/// Create the built-in tiers in evaluation order
pub fn builtin_tiers() -> Vec<(&'static str, Tier)> {
    vec![
        (PIPE_TIER, Tier::for_section(pipe_delimited)),
        (BLOCKS_TIER, Tier::for_section(multi_line_blocks)),
        (APPROACH_PLAN_TIER, Tier::for_document(approach_plan)),
    ]
}

/// Find the sub-task section and return the text after its header line
pub fn locate_section(text: &str) -> Option<&str> {
    SECTION_HEADERS
        .iter()
        .find_map(|header| header.find(text))
        .map(|m| &text[m.end()..])
}

/// `Summary | Description` per line.
///
/// Stops at the first blank line or a bare `Solution`/`Approach` header.
/// Lines without a pipe are ignored.
pub fn pipe_delimited(section: &str) -> Vec<SubtaskItem> {
    let mut items = Vec::new();

    for line in section.split('\n') {
        let line = line.trim();
        if line.is_empty() || SECTION_END.is_match(line) {
            break;
        }

        let raw = strip_number(strip_bullet(line));
        let Some((summary, description)) = raw.split_once('|') else {
            continue;
        };

        let summary = summary.trim();
        if !summary.is_empty() {
            items.push(SubtaskItem::new(summary, Some(description)));
        }
    }

    items
}

/// Numbered or bulleted items, each followed by optional description lines.
///
/// A marker line starts a new item when its text fits a summary; plain
/// non-blank lines after it accumulate as its description. Blank lines are
/// skipped without ending the item.
pub fn multi_line_blocks(section: &str) -> Vec<SubtaskItem> {
    let mut items = Vec::new();
    let mut current: Option<(&str, Vec<&str>)> = None;

    for line in section.split('\n') {
        let stripped = line.trim();
        if stripped.is_empty() {
            continue;
        }

        if is_list_line(line) {
            let summary = strip_bullet(strip_number(stripped));
            if !summary.is_empty() && char_len(summary) <= SUMMARY_LIMIT {
                if let Some((summary, description)) = current.take() {
                    items.push(finish_block(summary, &description));
                }
                current = Some((summary, Vec::new()));
            }
        } else if let Some((_, description)) = current.as_mut() {
            description.push(stripped);
        }
    }

    if let Some((summary, description)) = current {
        items.push(finish_block(summary, &description));
    }

    items
}

fn finish_block(summary: &str, description: &[&str]) -> SubtaskItem {
    SubtaskItem::new(summary, Some(&description.join("\n")))
}

/// Lines of an `APPROACH PLAN` (or `1) APPROACH`) section as summaries.
///
/// The section runs until the next `2)`, `2.`, `SOLUTION` or `Suggested`
/// line, or the end of the text.
pub fn approach_plan(text: &str) -> Vec<SubtaskItem> {
    let Some(header) = APPROACH_HEADER.find(text) else {
        return Vec::new();
    };

    let rest = &text[header.end()..];
    let block = match APPROACH_END.find(rest) {
        Some(end) => &rest[..end.start()],
        None => rest,
    };

    block
        .trim()
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| strip_bullet(strip_number(line)))
        .filter(|summary| !summary.is_empty() && char_len(summary) <= SUMMARY_LIMIT)
        .map(|summary| SubtaskItem::new(summary, None))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summaries(items: &[SubtaskItem]) -> Vec<&str> {
        items.iter().map(|i| i.summary()).collect()
    }

    #[test]
    fn test_locate_section_case_insensitive() {
        let text = "Intro\nsuggested SUB-TASKS:\nA | b\n";
        assert_eq!(locate_section(text), Some("A | b\n"));
    }

    #[test]
    fn test_locate_section_variants() {
        assert!(locate_section("Sub-tasks to create:\nx").is_some());
        assert!(locate_section("Recommended tasks:\nx").is_some());
        assert!(locate_section("Recommended subtasks:\nx").is_some());
        assert!(locate_section("Tasks to create:\nx").is_some());
        assert!(locate_section("\n3) SUGGESTED SUB-TASKS:\nx").is_some());
        assert!(locate_section("Suggested sub-tasks: inline").is_none());
        assert!(locate_section("no header here").is_none());
    }

    #[test]
    fn test_locate_section_skips_blank_lines_after_header() {
        let text = "Suggested sub-tasks:\n\n\nA | b";
        assert_eq!(locate_section(text), Some("A | b"));
    }

    #[test]
    fn test_pipe_delimited() {
        let items = pipe_delimited(
            "Add login API | Implement POST /auth/login with JWT validation.\n\
             Add logout API | Implement POST /auth/logout.\n",
        );
        assert_eq!(
            items,
            vec![
                SubtaskItem::new(
                    "Add login API",
                    Some("Implement POST /auth/login with JWT validation.")
                ),
                SubtaskItem::new("Add logout API", Some("Implement POST /auth/logout.")),
            ]
        );
    }

    #[test]
    fn test_pipe_delimited_strips_markers_and_skips_plain_lines() {
        let items = pipe_delimited("- First | one\nnot a task\n2) Second |\n* | orphan\n");
        assert_eq!(
            items,
            vec![
                SubtaskItem::new("First", Some("one")),
                SubtaskItem::new("Second", None),
            ]
        );
    }

    #[test]
    fn test_pipe_delimited_splits_on_first_pipe() {
        let items = pipe_delimited("A | b | c");
        assert_eq!(items, vec![SubtaskItem::new("A", Some("b | c"))]);
    }

    #[test]
    fn test_pipe_delimited_stops_at_blank_and_header() {
        let items = pipe_delimited("A | a\n\nB | b");
        assert_eq!(summaries(&items), vec!["A"]);

        let items = pipe_delimited("A | a\nSolution:\nB | b");
        assert_eq!(summaries(&items), vec!["A"]);

        let items = pipe_delimited("A | a\napproach\nB | b");
        assert_eq!(summaries(&items), vec!["A"]);
    }

    #[test]
    fn test_pipe_delimited_truncates_summary() {
        let long = "x".repeat(300);
        let items = pipe_delimited(&format!("{long} | desc"));
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].summary().chars().count(), 255);
    }

    #[test]
    fn test_multi_line_blocks() {
        let section = "1. Add login API\n   Implement POST /auth/login.\n   Validate JWT.\n\n\
                       2. Add logout API\n- Write docs\n";
        let items = multi_line_blocks(section);
        assert_eq!(
            items,
            vec![
                SubtaskItem::new(
                    "Add login API",
                    Some("Implement POST /auth/login.\nValidate JWT.")
                ),
                SubtaskItem::new("Add logout API", None),
                SubtaskItem::new("Write docs", None),
            ]
        );
    }

    #[test]
    fn test_multi_line_blocks_ignores_leading_plain_lines() {
        let items = multi_line_blocks("preamble\n1) Only\ndetail");
        assert_eq!(items, vec![SubtaskItem::new("Only", Some("detail"))]);
    }

    #[test]
    fn test_multi_line_blocks_skips_oversized_markers() {
        let long = "y".repeat(256);
        let section = format!("1. Keep\n2. {long}\nmore");
        let items = multi_line_blocks(&section);
        assert_eq!(items, vec![SubtaskItem::new("Keep", Some("more"))]);
    }

    #[test]
    fn test_multi_line_blocks_continues_past_solution_header() {
        let items = multi_line_blocks("1. A\nSolution:\n2. B");
        assert_eq!(
            items,
            vec![
                SubtaskItem::new("A", Some("Solution:")),
                SubtaskItem::new("B", None),
            ]
        );
    }

    #[test]
    fn test_approach_plan() {
        let text = "APPROACH PLAN:\n1. Design schema\n- Write migration\n\n2) SOLUTION:\nignored";
        let items = approach_plan(text);
        assert_eq!(summaries(&items), vec!["Design schema", "Write migration"]);
        assert!(items.iter().all(|i| i.description().is_none()));
    }

    #[test]
    fn test_approach_plan_numbered_header() {
        let text = "1) APPROACH\nStep one\nStep two\nSuggested next steps";
        assert_eq!(summaries(&approach_plan(text)), vec!["Step one", "Step two"]);
    }

    #[test]
    fn test_approach_plan_runs_to_end() {
        let text = "approach plan\n  a\n  b\n";
        assert_eq!(summaries(&approach_plan(text)), vec!["a", "b"]);
    }

    #[test]
    fn test_approach_plan_stops_at_second_numbered_line() {
        let text = "APPROACH PLAN:\n1. a\n2. b";
        assert_eq!(summaries(&approach_plan(text)), vec!["a"]);
    }

    #[test]
    fn test_approach_plan_missing() {
        assert!(approach_plan("nothing to see").is_empty());
    }
}
