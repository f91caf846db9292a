//! Defines the command-line interface for the application.

use clap::Parser;
use std::ffi::OsString;
use std::path::Path;

/// The first-argument token that selects stdin.
pub const STDIN_TOKEN: &str = "--stdin";

#[derive(Parser, Debug)]
#[command(
    name = "md-notion",
    version,
    about = "Convert Markdown into Notion API block JSON.",
    override_usage = "md-notion [FILE_PATH | --stdin]",
    after_help = "Environment:\n  MARTIAN_EMOJI_CALLOUTS=1     Turn emoji-led block quotes into callouts\n  MARTIAN_STRICT_IMAGE_URLS=1  Emit image blocks even for invalid image URLs\n  MARTIAN_TRUNCATE=0           Keep content that exceeds Notion limits"
)]
pub struct Cli {
    /// The Markdown file to convert, or `--stdin` to read the document from
    /// stdin. [default: reads from stdin]
    #[arg(value_name = "FILE_PATH", allow_hyphen_values = true)]
    pub input: Option<OsString>,

    /// Anything after the first argument is ignored.
    #[arg(hide = true, allow_hyphen_values = true, trailing_var_arg = true)]
    pub ignored: Vec<OsString>,
}

impl Cli {
    /// The file to read, if any.
    ///
    /// Only the first argument counts: when it is absent, empty or `--stdin`
    /// the document comes from stdin.
    pub fn input_path(&self) -> Option<&Path> {
        self.input
            .as_deref()
            .filter(|arg| !arg.is_empty() && arg.to_str() != Some(STDIN_TOKEN))
            .map(Path::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::no_arguments(&["md-notion"])]
    #[case::stdin_token(&["md-notion", "--stdin"])]
    #[case::empty_path(&["md-notion", ""])]
    #[case::stdin_token_before_path(&["md-notion", "--stdin", "notes.md"])]
    fn reads_stdin(#[case] argv: &[&str]) {
        let cli = Cli::try_parse_from(argv).unwrap();
        assert_eq!(cli.input_path(), None);
    }

    #[rstest]
    #[case::single(&["md-notion", "notes.md"])]
    #[case::path_before_stdin_token(&["md-notion", "notes.md", "--stdin"])]
    #[case::extra_paths_ignored(&["md-notion", "notes.md", "other.md"])]
    fn first_argument_is_the_path(#[case] argv: &[&str]) {
        let cli = Cli::try_parse_from(argv).unwrap();
        assert_eq!(cli.input_path(), Some(Path::new("notes.md")));
    }

    #[test]
    fn unknown_flag_is_taken_as_a_path() {
        let cli = Cli::try_parse_from(["md-notion", "--bogus"]).unwrap();
        assert_eq!(cli.input_path(), Some(Path::new("--bogus")));
    }
}
