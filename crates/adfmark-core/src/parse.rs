//! Markdown parsing
//!
//! A line-oriented scanner that upgrades plain LLM or user text into a
//! document tree. It recognizes fenced code, ATX headings, bullet and
//! ordered lists, and paragraphs. The only inline mark it picks up is
//! `**bold**`; italic, code and links stay as plain text.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ast::{Block, Document, ListItem, Text};
use crate::options::Options;

static HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(#{1,6})\s+(.*)$").unwrap());
static BULLET_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-*]\s+").unwrap());
static ORDERED_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)\.\s+(.*)$").unwrap());
static BOLD_SPAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*.*?\*\*").unwrap());

const FENCE: &str = "```";

/// Parse Markdown into a document with default options
pub fn parse(text: &str) -> Document {
    parse_with(text, &Options::default())
}

/// Parse Markdown into a document.
///
/// Never fails. Input that yields no blocks produces a single paragraph
/// holding [`Options::empty_placeholder`].
pub fn parse_with(text: &str, options: &Options) -> Document {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut blocks = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i].trim();

        if line.is_empty() {
            i += 1;
            continue;
        }

        if let Some(language) = line.strip_prefix(FENCE) {
            let (block, next) = parse_code_block(language.trim(), &lines, i + 1);
            blocks.push(block);
            i = next;
            continue;
        }

        if let Some(caps) = HEADING.captures(line) {
            blocks.push(Block::heading(
                caps[1].len() as u8,
                vec![Text::plain(&caps[2])],
            ));
            i += 1;
            continue;
        }

        if is_bullet_line(line) {
            let mut items = Vec::new();
            while i < lines.len() && is_bullet_line(lines[i].trim()) {
                let item_text = BULLET_MARKER.replace(lines[i].trim(), "");
                items.push(list_item(&item_text));
                i += 1;
            }
            blocks.push(Block::BulletList(items));
            continue;
        }

        if ORDERED_ITEM.is_match(line) {
            let mut items = Vec::new();
            while i < lines.len() {
                let Some(caps) = ORDERED_ITEM.captures(lines[i].trim()) else {
                    break;
                };
                items.push(list_item(&caps[2]));
                i += 1;
            }
            blocks.push(Block::OrderedList(items));
            continue;
        }

        blocks.push(Block::Paragraph(split_bold(line)));
        i += 1;
    }

    if blocks.is_empty() {
        return Document::placeholder(&options.empty_placeholder);
    }
    Document::new(blocks)
}

/// Consume a fenced block starting at `start` (the line after the opening
/// fence). Returns the block and the index of the first line after it.
fn parse_code_block(language: &str, lines: &[&str], start: usize) -> (Block, usize) {
    let mut i = start;
    let mut code_lines = Vec::new();

    while i < lines.len() && !lines[i].trim().starts_with(FENCE) {
        code_lines.push(lines[i]);
        i += 1;
    }

    let mut code = code_lines.join("\n");
    if code.is_empty() {
        code.push(' ');
    }

    // Skip the closing fence, if there is one
    (Block::code_block(Some(language), &code), i + 1)
}

fn is_bullet_line(line: &str) -> bool {
    line.starts_with("- ") || line.starts_with("* ")
}

fn list_item(text: &str) -> ListItem {
    let mut inlines = split_bold(text);
    if inlines.is_empty() {
        inlines.push(Text::plain(" "));
    }
    ListItem::from_inlines(inlines)
}

/// Split a line into text runs, marking `**...**` spans bold
fn split_bold(text: &str) -> Vec<Text> {
    let mut inlines = Vec::new();
    let mut last = 0;

    for span in BOLD_SPAN.find_iter(text) {
        if span.start() > last {
            inlines.push(Text::plain(&text[last..span.start()]));
        }
        let s = span.as_str();
        if s.len() > 4 {
            inlines.push(Text::bold(&s[2..s.len() - 2]));
        } else {
            inlines.push(Text::plain(s));
        }
        last = span.end();
    }

    if last < text.len() {
        inlines.push(Text::plain(&text[last..]));
    }

    inlines
}
