//! End-to-end checks of the conversion and extraction contracts.

use adfmark::{extract, parse, render, Block, Document, DocumentService, SubtaskItem, Text};

const CANONICAL: &str = "# Release notes\n\
\n\
Some **bold** text and more.\n\
\n\
- first **item**\n\
- second item\n\
\n\
1. step one\n\
2. step **two**\n\
\n\
```rust\n\
fn main() {}\n\
```\n\
\n\
## Closing\n";

#[test]
fn render_reproduces_canonical_constructs() {
    let markdown = render(&parse(CANONICAL));
    assert_eq!(
        markdown,
        "# Release notes\n\n\
         Some **bold** text and more.\n\n\
         * first **item**\n\
         * second item\n\n\
         1. step one\n\
         2. step **two**\n\n\
         ```rust\nfn main() {}\n```\n\n\
         ## Closing\n\n"
    );
}

#[test]
fn parse_render_parse_is_idempotent() {
    let inputs = [
        CANONICAL,
        "plain line\nsecond line",
        "* a\n* b\n\n1. c\n10. d",
        "```\n```",
        "**only bold**",
        "- **x** and **y**\n  - nested marker becomes a sibling",
        "####### not a heading\n#tag",
    ];

    for input in inputs {
        let once = parse(input);
        let twice = parse(&render(&once));
        assert_eq!(twice, once, "not idempotent for {input:?}");
    }
}

#[test]
fn ordered_numbering_resets_per_list() {
    let markdown = render(&parse("1. a\n2. b\n\nSome text\n\n1. c"));
    assert_eq!(markdown, "1. a\n2. b\n\nSome text\n\n1. c\n\n");
    assert!(!markdown.contains("3."));
}

#[test]
fn empty_input_parses_to_placeholder() {
    let doc = parse("");
    assert_eq!(
        doc,
        Document::new(vec![Block::Paragraph(vec![Text::plain("(No content)")])])
    );
}

#[test]
fn extractor_example() {
    let items = extract(
        "Suggested sub-tasks:\n\
         Add login API | Implement POST /auth/login with JWT validation.\n\
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
fn extractor_prefers_pipe_section_over_approach_plan() {
    let text = "1) APPROACH PLAN:\n\
                - Investigate the bug\n\
                - Patch the handler\n\
                \n\
                2) SOLUTION:\n\
                Change the handler.\n\
                \n\
                3) SUGGESTED SUB-TASKS:\n\
                - Fix handler | Return 404 instead of 500.\n\
                - Add test | Cover the missing-record path.\n";

    let items = extract(text);
    let summaries: Vec<&str> = items.iter().map(|i| i.summary()).collect();
    assert_eq!(summaries, vec!["Fix handler", "Add test"]);
}

#[test]
fn extractor_truncates_long_summary_to_255_chars() {
    let summary = "s".repeat(300);
    let items = extract(&format!("Suggested sub-tasks:\n{summary} | details\n"));
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].summary().chars().count(), 255);
    assert_eq!(items[0].description(), Some("details"));
}

#[test]
fn extractor_returns_empty_without_structure() {
    assert!(extract("We should probably fix this at some point.").is_empty());
}

#[test]
fn store_json_round_trip_through_service() {
    let service = DocumentService::new();
    let json = service.markdown_to_json(CANONICAL);
    let markdown = service.json_to_markdown(&json).unwrap();
    assert_eq!(parse(&markdown), parse(CANONICAL));
}

#[test]
fn concurrent_use_needs_no_coordination() {
    let handles: Vec<_> = (0..8)
        .map(|i| {
            std::thread::spawn(move || {
                let text = format!("Suggested sub-tasks:\nTask {i} | Do {i}\n");
                let items = extract(&text);
                let rendered = render(&parse(&format!("- item {i}")));
                (items, rendered)
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let (items, rendered) = handle.join().unwrap();
        assert_eq!(items[0].summary(), format!("Task {i}"));
        assert_eq!(rendered, format!("* item {i}\n\n"));
    }
}
