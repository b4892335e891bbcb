//! Document store wire format
//!
//! Decodes and encodes the JSON document tree used by the issue tracker's
//! rich-text fields: `{"type": "doc", "version": 1, "content": [...]}`.
//!
//! Decoding is lenient. Only malformed JSON is an error; unknown node
//! types degrade to containers, unknown inline nodes contribute their
//! children, and unknown marks are ignored. Nodes are unpacked one level
//! at a time, so nesting past [`Options::max_depth`] is dropped rather
//! than rejected.

use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::ast::{Block, Document, ListItem, Mark, Marks, Text};
use crate::options::Options;

/// Error type for wire decoding
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    #[error("Invalid document JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Inline node types of the store format
const INLINE_KINDS: &[&str] = &[
    "text",
    "hardBreak",
    "mention",
    "emoji",
    "inlineCard",
    "date",
    "status",
];

/// One store node with its children still as raw JSON
#[derive(Debug, Default)]
struct RawNode {
    kind: String,
    attrs: Option<Value>,
    content: Vec<Value>,
    text: Option<String>,
    marks: Vec<Value>,
}

impl RawNode {
    /// Anything that is not an object, or has no string `type`, becomes a
    /// node of unknown kind.
    fn from_value(value: Value) -> Self {
        let Value::Object(mut map) = value else {
            return Self::default();
        };

        Self {
            kind: take_string(&mut map, "type").unwrap_or_default(),
            attrs: map.remove("attrs").filter(Value::is_object),
            content: take_array(&mut map, "content"),
            text: take_string(&mut map, "text"),
            marks: take_array(&mut map, "marks"),
        }
    }

    fn children(&mut self) -> Vec<RawNode> {
        std::mem::take(&mut self.content)
            .into_iter()
            .map(RawNode::from_value)
            .collect()
    }

    fn attr(&self, name: &str) -> Option<&Value> {
        self.attrs.as_ref()?.get(name)
    }

    fn is_inline(&self) -> bool {
        INLINE_KINDS.contains(&self.kind.as_str())
    }
}

fn take_string(map: &mut Map<String, Value>, key: &str) -> Option<String> {
    match map.remove(key)? {
        Value::String(s) => Some(s),
        _ => None,
    }
}

fn take_array(map: &mut Map<String, Value>, key: &str) -> Vec<Value> {
    match map.remove(key) {
        Some(Value::Array(items)) => items,
        _ => Vec::new(),
    }
}

/// Parse JSON text of any nesting depth into a value
fn parse_value(json: &str) -> Result<Value, serde_json::Error> {
    let mut de = serde_json::Deserializer::from_str(json);
    de.disable_recursion_limit();
    let value = Value::deserialize(serde_stacker::Deserializer::new(&mut de))?;
    de.end()?;
    Ok(value)
}

impl Document {
    /// Decode a document from store JSON with default options
    pub fn from_json_str(json: &str) -> Result<Self, WireError> {
        Self::from_json_str_with(json, &Options::default())
    }

    pub fn from_json_str_with(json: &str, options: &Options) -> Result<Self, WireError> {
        let value = parse_value(json)?;
        Ok(Self::from_value_with(value, options))
    }

    /// Decode a document from an already-parsed JSON value. Never fails.
    pub fn from_value(value: Value) -> Self {
        Self::from_value_with(value, &Options::default())
    }

    pub fn from_value_with(value: Value, options: &Options) -> Self {
        Decoder { options }.document(RawNode::from_value(value))
    }

    /// Encode as store JSON with default options
    pub fn to_value(&self) -> Value {
        self.to_value_with(&Options::default())
    }

    pub fn to_value_with(&self, options: &Options) -> Value {
        let encoder = Encoder { options };
        json!({
            "type": "doc",
            "version": 1,
            "content": encoder.blocks(&self.content),
        })
    }

    pub fn to_json_string(&self) -> String {
        self.to_value().to_string()
    }
}

struct Decoder<'a> {
    options: &'a Options,
}

impl Decoder<'_> {
    fn document(&self, mut root: RawNode) -> Document {
        let content = if root.kind == "doc" {
            self.blocks(root.children(), 0)
        } else {
            self.blocks(vec![root], 0)
        };
        Document::new(content)
    }

    fn blocks(&self, nodes: Vec<RawNode>, depth: usize) -> Vec<Block> {
        if depth >= self.options.max_depth {
            return Vec::new();
        }

        let mut blocks = Vec::with_capacity(nodes.len());
        let mut stray_inlines = Vec::new();

        for node in nodes {
            if node.is_inline() {
                stray_inlines.extend(self.inline(node, depth));
                continue;
            }
            if !stray_inlines.is_empty() {
                blocks.push(Block::Paragraph(std::mem::take(&mut stray_inlines)));
            }
            blocks.push(self.block(node, depth));
        }

        if !stray_inlines.is_empty() {
            blocks.push(Block::Paragraph(stray_inlines));
        }
        blocks
    }

    fn block(&self, mut node: RawNode, depth: usize) -> Block {
        let kind = std::mem::take(&mut node.kind);
        match kind.as_str() {
            "paragraph" => Block::Paragraph(self.inlines(node.children(), depth + 1)),

            "heading" => {
                let level = node
                    .attr("level")
                    .and_then(Value::as_u64)
                    .unwrap_or(1)
                    .min(6) as u8;
                Block::heading(level, self.inlines(node.children(), depth + 1))
            }

            "bulletList" => Block::BulletList(self.list_items(node.children(), depth + 1)),

            "orderedList" => Block::OrderedList(self.list_items(node.children(), depth + 1)),

            "codeBlock" => {
                let language = node
                    .attr("language")
                    .and_then(Value::as_str)
                    .map(str::to_string);
                let code: String = node
                    .children()
                    .into_iter()
                    .filter_map(|child| child.text)
                    .collect();
                Block::code_block(language.as_deref(), &code)
            }

            "rule" => Block::Rule,

            // doc, blockquote, panel, listItem outside a list, and unknown types
            _ => Block::Container(self.blocks(node.children(), depth + 1)),
        }
    }

    fn list_items(&self, nodes: Vec<RawNode>, depth: usize) -> Vec<ListItem> {
        if depth >= self.options.max_depth {
            return Vec::new();
        }

        nodes
            .into_iter()
            .map(|mut node| {
                if node.kind == "listItem" {
                    ListItem::new(self.blocks(node.children(), depth + 1))
                } else {
                    ListItem::new(self.blocks(vec![node], depth + 1))
                }
            })
            .collect()
    }

    fn inlines(&self, nodes: Vec<RawNode>, depth: usize) -> Vec<Text> {
        nodes
            .into_iter()
            .flat_map(|node| self.inline(node, depth))
            .collect()
    }

    fn inline(&self, mut node: RawNode, depth: usize) -> Vec<Text> {
        if depth >= self.options.max_depth {
            return Vec::new();
        }

        if node.kind == "text" {
            let marks = decode_marks(std::mem::take(&mut node.marks));
            return vec![Text {
                text: node.text.unwrap_or_default(),
                marks,
            }];
        }

        self.inlines(node.children(), depth + 1)
    }
}

fn decode_marks(raw: Vec<Value>) -> Marks {
    let mut marks = Marks::default();
    for mark in raw.into_iter().map(RawNode::from_value) {
        match mark.kind.as_str() {
            "strong" => marks.bold = true,
            "em" => marks.italic = true,
            "code" => marks.code = true,
            "link" => {
                let href = mark.attr("href").and_then(Value::as_str).unwrap_or("");
                marks.link = Some(href.to_string());
            }
            _ => {}
        }
    }
    marks
}

struct Encoder<'a> {
    options: &'a Options,
}

impl Encoder<'_> {
    fn blocks(&self, blocks: &[Block]) -> Vec<Value> {
        let mut out = Vec::with_capacity(blocks.len());
        for block in blocks {
            self.block(block, &mut out);
        }
        out
    }

    fn block(&self, block: &Block, out: &mut Vec<Value>) {
        match block {
            Block::Paragraph(inlines) => out.push(json!({
                "type": "paragraph",
                "content": encode_inlines(inlines),
            })),

            Block::Heading { level, content } => out.push(json!({
                "type": "heading",
                "attrs": { "level": level },
                "content": encode_inlines(content),
            })),

            Block::BulletList(items) => out.push(json!({
                "type": "bulletList",
                "content": self.list_items(items),
            })),

            Block::OrderedList(items) => out.push(json!({
                "type": "orderedList",
                "content": self.list_items(items),
            })),

            Block::CodeBlock { language, code } => {
                let language = language
                    .as_deref()
                    .unwrap_or(&self.options.code_language_fallback);
                let content: Vec<Value> = if code.is_empty() {
                    Vec::new()
                } else {
                    vec![json!({ "type": "text", "text": code })]
                };
                out.push(json!({
                    "type": "codeBlock",
                    "attrs": { "language": language },
                    "content": content,
                }));
            }

            Block::Rule => out.push(json!({ "type": "rule" })),

            // The store has no passthrough node; splice the children in
            Block::Container(blocks) => {
                for child in blocks {
                    self.block(child, out);
                }
            }
        }
    }

    fn list_items(&self, items: &[ListItem]) -> Vec<Value> {
        items
            .iter()
            .map(|item| {
                json!({
                    "type": "listItem",
                    "content": self.blocks(&item.content),
                })
            })
            .collect()
    }
}

fn encode_inlines(inlines: &[Text]) -> Vec<Value> {
    // The store rejects empty text nodes
    inlines
        .iter()
        .filter(|t| !t.text.is_empty())
        .map(encode_text)
        .collect()
}

fn encode_text(text: &Text) -> Value {
    let mut node = Map::new();
    node.insert("type".to_string(), json!("text"));
    node.insert("text".to_string(), json!(text.text));

    if !text.marks.is_empty() {
        let marks: Vec<Value> = text
            .marks
            .iter()
            .map(|mark| match mark {
                Mark::Bold => json!({ "type": "strong" }),
                Mark::Italic => json!({ "type": "em" }),
                Mark::Code => json!({ "type": "code" }),
                Mark::Link(href) => {
                    json!({ "type": "link", "attrs": { "href": href } })
                }
            })
            .collect();
        node.insert("marks".to_string(), Value::Array(marks));
    }

    Value::Object(node)
}
