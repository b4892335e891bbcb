//! Conversion options from command-line flags and environment.

use adfmark::Options;
use clap::Args;

#[derive(Debug, Clone, Default, Args)]
pub struct ConfigArgs {
    /// Maximum document nesting depth
    #[arg(long, global = true, env = "ADFMARK_MAX_DEPTH")]
    pub max_depth: Option<usize>,

    /// Paragraph text used when parsing yields no content
    #[arg(long, global = true, env = "ADFMARK_PLACEHOLDER")]
    pub placeholder: Option<String>,

    /// Language written for code blocks without one
    #[arg(long, global = true, env = "ADFMARK_CODE_LANGUAGE")]
    pub code_language: Option<String>,
}

impl From<ConfigArgs> for Options {
    fn from(args: ConfigArgs) -> Self {
        let mut result = Options::default();

        if let Some(depth) = args.max_depth {
            result.max_depth = depth.max(1);
        }

        if let Some(placeholder) = args.placeholder {
            result.empty_placeholder = placeholder;
        }

        if let Some(language) = args.code_language.filter(|l| !l.trim().is_empty()) {
            result.code_language_fallback = language;
        }

        result
    }
}
