use crate::error::LimitError;
use std::fmt;

/// Size limits enforced by the Notion API on a block payload.
pub mod api_limits {
    /// Maximum number of blocks in a single top-level payload.
    pub const PAYLOAD_BLOCKS: usize = 1000;
    /// Maximum number of children nested directly under one block.
    pub const CHILDREN: usize = 100;
    /// Maximum number of rich text objects in one rich text array.
    pub const RICH_TEXT_ARRAYS: usize = 100;
    /// Maximum characters in one text run.
    pub const TEXT_CONTENT: usize = 2000;
    /// Maximum characters in a link URL.
    pub const LINK_URL: usize = 1000;
    /// Maximum characters in an equation expression.
    pub const EQUATION_EXPRESSION: usize = 1000;
}

/// Receives non-fatal limit diagnostics raised during a conversion.
pub type ErrorSink = Box<dyn Fn(&LimitError)>;

/// Controls how the converter reacts to content exceeding Notion limits.
pub struct NotionLimits {
    /// Cut arrays and strings down to the limit when set.
    pub truncate: bool,
    /// Called once for every limit violation, whether or not it is truncated.
    pub on_error: Option<ErrorSink>,
}

impl Default for NotionLimits {
    fn default() -> Self {
        Self {
            truncate: true,
            on_error: None,
        }
    }
}

impl fmt::Debug for NotionLimits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotionLimits")
            .field("truncate", &self.truncate)
            .field("on_error", &self.on_error.as_ref().map(|_| "<sink>"))
            .finish()
    }
}

impl NotionLimits {
    pub(crate) fn report(&self, error: LimitError) {
        log::debug!("Notion limit exceeded: {error}");
        if let Some(sink) = self.on_error.as_ref() {
            sink(&error);
        }
    }
}

/// Options accepted by [`markdown_to_blocks`](crate::markdown_to_blocks).
#[derive(Debug, Default)]
pub struct ConvertOptions {
    /// Turn block quotes that open with an emoji into callouts.
    pub enable_emoji_callouts: bool,
    /// Emit image blocks even when the image URL fails validation.
    pub strict_image_urls: bool,
    pub notion_limits: NotionLimits,
}

impl ConvertOptions {
    pub fn with_emoji_callouts(mut self, enabled: bool) -> Self {
        self.enable_emoji_callouts = enabled;
        self
    }

    pub fn with_strict_image_urls(mut self, enabled: bool) -> Self {
        self.strict_image_urls = enabled;
        self
    }

    pub fn with_truncate(mut self, enabled: bool) -> Self {
        self.notion_limits.truncate = enabled;
        self
    }

    pub fn with_error_sink<F>(mut self, sink: F) -> Self
    where
        F: Fn(&LimitError) + 'static,
    {
        self.notion_limits.on_error = Some(Box::new(sink));
        self
    }
}
