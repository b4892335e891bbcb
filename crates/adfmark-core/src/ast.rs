//! Document tree
//!
//! This module defines the typed nodes of a rich-text document. A tree is
//! built fresh for every conversion and owns all of its children; there are
//! no shared or back references.

/// Root of a document tree. The only valid root.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    pub content: Vec<Block>,
}

impl Document {
    pub fn new(content: Vec<Block>) -> Self {
        Self { content }
    }

    /// A document holding a single paragraph with `text`
    pub fn placeholder(text: &str) -> Self {
        Self {
            content: vec![Block::Paragraph(vec![Text::plain(text)])],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// A block-level node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Paragraph containing inline content
    Paragraph(Vec<Text>),

    /// Heading with level (1-6) and inline content
    Heading { level: u8, content: Vec<Text> },

    /// Unordered list, rendered with `* ` markers
    BulletList(Vec<ListItem>),

    /// Ordered list, numbered from 1 per list
    OrderedList(Vec<ListItem>),

    /// Fenced code block; the code is opaque text
    CodeBlock {
        language: Option<String>,
        code: String,
    },

    /// Horizontal divider
    Rule,

    /// Passthrough for blockquotes, panels and other wrappers
    Container(Vec<Block>),
}

impl Block {
    /// Build a heading, clamping the level into 1..=6
    pub fn heading(level: u8, content: Vec<Text>) -> Self {
        Block::Heading {
            level: level.clamp(1, 6),
            content,
        }
    }

    pub fn code_block(language: Option<&str>, code: &str) -> Self {
        Block::CodeBlock {
            language: language.filter(|l| !l.is_empty()).map(str::to_string),
            code: code.to_string(),
        }
    }
}

/// A list item containing blocks
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListItem {
    pub content: Vec<Block>,
}

impl ListItem {
    pub fn new(content: Vec<Block>) -> Self {
        Self { content }
    }

    pub fn from_inlines(inlines: Vec<Text>) -> Self {
        Self {
            content: vec![Block::Paragraph(inlines)],
        }
    }
}

/// Inline text leaf with its marks
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Text {
    pub text: String,
    pub marks: Marks,
}

impl Text {
    pub fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            marks: Marks::default(),
        }
    }

    pub fn bold(text: &str) -> Self {
        Self {
            text: text.to_string(),
            marks: Marks {
                bold: true,
                ..Marks::default()
            },
        }
    }

    pub fn with_marks(text: &str, marks: Marks) -> Self {
        Self {
            text: text.to_string(),
            marks,
        }
    }
}

/// The set of marks on a text leaf.
///
/// Each mark appears at most once. Marks are always applied in the order
/// bold, italic, code, link regardless of how they were collected.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Marks {
    pub bold: bool,
    pub italic: bool,
    pub code: bool,
    pub link: Option<String>,
}

/// A single mark, borrowed from [`Marks`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark<'a> {
    Bold,
    Italic,
    Code,
    Link(&'a str),
}

impl Marks {
    pub fn is_empty(&self) -> bool {
        !self.bold && !self.italic && !self.code && self.link.is_none()
    }

    /// Marks in application order
    pub fn iter(&self) -> impl Iterator<Item = Mark<'_>> {
        [
            self.bold.then_some(Mark::Bold),
            self.italic.then_some(Mark::Italic),
            self.code.then_some(Mark::Code),
            self.link.as_deref().map(Mark::Link),
        ]
        .into_iter()
        .flatten()
    }
}
