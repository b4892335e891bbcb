//! Document tree rendering
//!
//! Converts a document tree into Markdown text. Rendering is total: every
//! tree produces some output, and subtrees nested deeper than
//! [`Options::max_depth`] are skipped.

use crate::ast::{Block, Document, ListItem, Mark, Text};
use crate::options::Options;

/// Render a document to Markdown with default options
pub fn render(doc: &Document) -> String {
    render_with(doc, &Options::default())
}

/// Render a document to Markdown
pub fn render_with(doc: &Document, options: &Options) -> String {
    let mut output = String::with_capacity(1024);
    render_blocks(&doc.content, options, 0, &mut output);
    output
}

fn render_blocks(blocks: &[Block], options: &Options, depth: usize, out: &mut String) {
    for block in blocks {
        render_block(block, options, depth, out);
    }
}

fn render_block(block: &Block, options: &Options, depth: usize, out: &mut String) {
    if depth >= options.max_depth {
        return;
    }

    match block {
        Block::Paragraph(inlines) => {
            render_inlines(inlines, out);
            out.push_str("\n\n");
        }

        Block::Heading { level, content } => {
            for _ in 0..*level {
                out.push('#');
            }
            out.push(' ');
            render_inlines(content, out);
            out.push_str("\n\n");
        }

        Block::BulletList(items) => render_list(items, false, options, depth, out),

        Block::OrderedList(items) => render_list(items, true, options, depth, out),

        Block::CodeBlock { language, code } => {
            out.push_str("```");
            out.push_str(language.as_deref().unwrap_or(""));
            out.push('\n');
            out.push_str(code.trim());
            out.push_str("\n```\n\n");
        }

        Block::Rule => out.push_str("---\n\n"),

        Block::Container(blocks) => render_blocks(blocks, options, depth + 1, out),
    }
}

fn render_list(
    items: &[ListItem],
    ordered: bool,
    options: &Options,
    depth: usize,
    out: &mut String,
) {
    for (i, item) in items.iter().enumerate() {
        // Numbering belongs to this list only; nested lists start over
        if ordered {
            out.push_str(&(i + 1).to_string());
            out.push_str(". ");
        } else {
            out.push_str("* ");
        }
        render_list_item(item, options, depth + 1, out);
    }

    out.push('\n');
}

fn render_list_item(item: &ListItem, options: &Options, depth: usize, out: &mut String) {
    let start_len = out.len();
    render_blocks(&item.content, options, depth, out);

    // Indent continuation lines under the marker
    let content = out[start_len..].trim().replace('\n', "\n  ");
    out.truncate(start_len);
    out.push_str(&content);
    out.push('\n');
}

fn render_inlines(inlines: &[Text], out: &mut String) {
    for inline in inlines {
        render_text(inline, out);
    }
}

fn render_text(text: &Text, out: &mut String) {
    if text.marks.is_empty() {
        out.push_str(&text.text);
        return;
    }

    let mut rendered = text.text.clone();
    for mark in text.marks.iter() {
        rendered = match mark {
            Mark::Bold => format!("**{rendered}**"),
            Mark::Italic => format!("*{rendered}*"),
            Mark::Code => format!("`{rendered}`"),
            Mark::Link(href) => format!("[{rendered}]({href})"),
        };
    }
    out.push_str(&rendered);
}
