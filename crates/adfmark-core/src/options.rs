//! Configuration options for rendering, parsing and the wire codec

/// Default nesting cap for rendering and decoding
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Options shared by the renderer, the parser and the wire codec
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Maximum block nesting depth; deeper subtrees are dropped
    pub max_depth: usize,

    /// Text of the paragraph produced when parsing yields no blocks
    pub empty_placeholder: String,

    /// Language written to the wire for code blocks without one
    pub code_language_fallback: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            empty_placeholder: "(No content)".to_string(),
            code_language_fallback: "plain".to_string(),
        }
    }
}
