//! Builds converter options from `MARTIAN_*` environment variables.

use md_notion_lib::{ConvertOptions, LimitError};

pub const EMOJI_CALLOUTS_VAR: &str = "MARTIAN_EMOJI_CALLOUTS";
pub const STRICT_IMAGE_URLS_VAR: &str = "MARTIAN_STRICT_IMAGE_URLS";
pub const TRUNCATE_VAR: &str = "MARTIAN_TRUNCATE";

/// Converter switches resolved from the environment.
///
/// Values are compared literally: the two opt-in switches are on only for
/// `"1"`, and truncation is off only for `"0"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertConfig {
    pub emoji_callouts: bool,
    pub strict_image_urls: bool,
    pub truncate: bool,
}

impl ConvertConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            emoji_callouts: lookup(EMOJI_CALLOUTS_VAR).as_deref() == Some("1"),
            strict_image_urls: lookup(STRICT_IMAGE_URLS_VAR).as_deref() == Some("1"),
            truncate: lookup(TRUNCATE_VAR).as_deref() != Some("0"),
        }
    }

    /// Converter options whose limit diagnostics go to stderr.
    pub fn into_options(self) -> ConvertOptions {
        ConvertOptions::default()
            .with_emoji_callouts(self.emoji_callouts)
            .with_strict_image_urls(self.strict_image_urls)
            .with_truncate(self.truncate)
            .with_error_sink(report_limit_error)
    }
}

fn report_limit_error(err: &LimitError) {
    eprintln!("{err}");
}
