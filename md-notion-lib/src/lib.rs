//! `md-notion-lib` converts Markdown documents into the block objects accepted
//! by the Notion API, and powers the `md-notion` CLI.
//!
//! The library parses Markdown into a syntax tree, maps each node onto a
//! Notion block (paragraphs, headings, lists, to-dos, quotes, callouts, code,
//! images, tables, equations), and enforces the Notion payload limits. Limit
//! violations are handed to an optional diagnostic sink; whether offending
//! content is truncated is controlled by [`options::NotionLimits::truncate`].
//!
//! # Example
//!
//! ```rust
//! use md_notion_lib::{markdown_to_blocks, ConvertOptions};
//!
//! # fn demo() -> Result<(), md_notion_lib::error::ConvertError> {
//! let options = ConvertOptions::default()
//!     .with_emoji_callouts(true)
//!     .with_error_sink(|err| eprintln!("{err}"));
//!
//! let blocks = markdown_to_blocks("# Tasks\n\n- [ ] Write docs\n", &options)?;
//!
//! assert_eq!(blocks[0].kind(), "heading_1");
//! assert_eq!(blocks[1].kind(), "to_do");
//! # Ok(())
//! # }
//! # demo().unwrap();
//! ```

pub mod blocks;
mod convert;
pub mod error;
pub mod language;
mod limits;
pub mod options;

pub use crate::blocks::{Block, RichText};
pub use crate::convert::{markdown_to_blocks, markdown_to_rich_text};
pub use crate::error::{ConvertError, LimitError};
pub use crate::options::{ConvertOptions, NotionLimits};
