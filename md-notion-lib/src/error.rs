//! Defines custom error types for the converter.

use thiserror::Error;

#[derive(Error, Debug)]
/// Error type returned when a Markdown document cannot be converted.
pub enum ConvertError {
    #[error("Failed to parse Markdown: {0}")]
    MarkdownParse(String),
}

/// A Notion API limit that the converted output exceeded.
///
/// These are reported through [`NotionLimits::on_error`](crate::options::NotionLimits)
/// and never abort a conversion on their own.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LimitError {
    #[error("Resulting blocks array exceeds Notion limit ({limit}): got {len} blocks")]
    PayloadBlocks { len: usize, limit: usize },

    #[error("'{kind}' children array exceeds Notion limit ({limit}): got {len} children")]
    Children {
        kind: &'static str,
        len: usize,
        limit: usize,
    },

    #[error("Rich text array exceeds Notion limit ({limit}): got {len} items")]
    RichTextArray { len: usize, limit: usize },

    #[error("Link URL exceeds Notion limit ({limit}): got {len} characters")]
    LinkUrl { len: usize, limit: usize },

    #[error("Equation expression exceeds Notion limit ({limit}): got {len} characters")]
    EquationExpression { len: usize, limit: usize },
}
