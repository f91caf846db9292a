//! Maps fenced code block info strings onto Notion's code languages.

/// Languages accepted by the Notion API for `code` blocks.
const NOTION_LANGUAGES: &[&str] = &[
    "abap",
    "agda",
    "arduino",
    "assembly",
    "bash",
    "basic",
    "bnf",
    "c",
    "c#",
    "c++",
    "clojure",
    "coffeescript",
    "coq",
    "css",
    "dart",
    "dhall",
    "diff",
    "docker",
    "ebnf",
    "elixir",
    "elm",
    "erlang",
    "f#",
    "flow",
    "fortran",
    "gherkin",
    "glsl",
    "go",
    "graphql",
    "groovy",
    "haskell",
    "html",
    "idris",
    "java",
    "javascript",
    "json",
    "julia",
    "kotlin",
    "latex",
    "less",
    "lisp",
    "livescript",
    "llvm ir",
    "lua",
    "makefile",
    "markdown",
    "markup",
    "matlab",
    "mathematica",
    "mermaid",
    "nix",
    "notion formula",
    "objective-c",
    "ocaml",
    "pascal",
    "perl",
    "php",
    "plain text",
    "powershell",
    "prolog",
    "protobuf",
    "purescript",
    "python",
    "r",
    "racket",
    "reason",
    "ruby",
    "rust",
    "sass",
    "scala",
    "scheme",
    "scss",
    "shell",
    "solidity",
    "sql",
    "swift",
    "toml",
    "typescript",
    "vb.net",
    "verilog",
    "vhdl",
    "visual basic",
    "webassembly",
    "xml",
    "yaml",
    "java/c/c++/c#",
];

pub const PLAIN_TEXT: &str = "plain text";

fn alias(name: &str) -> Option<&'static str> {
    let canonical = match name {
        "js" | "jsx" | "mjs" | "cjs" | "node" => "javascript",
        "ts" | "tsx" | "mts" => "typescript",
        "py" | "python3" => "python",
        "rb" => "ruby",
        "rs" => "rust",
        "sh" | "zsh" | "console" | "shell-session" => "shell",
        "yml" => "yaml",
        "md" => "markdown",
        "cs" | "csharp" => "c#",
        "cpp" | "cc" | "cxx" | "hpp" => "c++",
        "h" => "c",
        "kt" | "kts" => "kotlin",
        "ps1" | "pwsh" => "powershell",
        "dockerfile" => "docker",
        "hs" => "haskell",
        "ex" | "exs" => "elixir",
        "erl" => "erlang",
        "fs" | "fsharp" => "f#",
        "golang" => "go",
        "gql" => "graphql",
        "tex" => "latex",
        "make" | "mk" => "makefile",
        "objc" | "objectivec" => "objective-c",
        "ml" => "ocaml",
        "pl" => "perl",
        "proto" => "protobuf",
        "scm" => "scheme",
        "vb" => "visual basic",
        "wasm" | "wat" => "webassembly",
        "text" | "txt" | "plaintext" | "plain" => PLAIN_TEXT,
        "svg" => "xml",
        "sol" => "solidity",
        "jl" => "julia",
        "clj" | "cljs" => "clojure",
        "coffee" => "coffeescript",
        "ll" => "llvm ir",
        "htm" | "xhtml" => "html",
        _ => return None,
    };
    Some(canonical)
}

/// Resolves a fence info string (e.g. `"rust ignore"`) to a Notion language.
///
/// Only the first word is considered. Unknown or missing languages become
/// `plain text`.
pub fn notion_language(info: Option<&str>) -> &'static str {
    let Some(name) = info.and_then(|info| info.split_whitespace().next()) else {
        return PLAIN_TEXT;
    };
    let name = name.to_lowercase();

    NOTION_LANGUAGES
        .iter()
        .copied()
        .find(|lang| *lang == name)
        .or_else(|| alias(&name))
        .unwrap_or_else(|| {
            log::debug!("Unknown code language '{name}', using plain text");
            PLAIN_TEXT
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some("rust"), "rust")]
    #[case(Some("Rust"), "rust")]
    #[case(Some("rs"), "rust")]
    #[case(Some("ts"), "typescript")]
    #[case(Some("c++"), "c++")]
    #[case(Some("python extra words"), "python")]
    #[case(Some("yml"), "yaml")]
    #[case(Some("brainfuck"), "plain text")]
    #[case(Some(""), "plain text")]
    #[case(None, "plain text")]
    fn resolves_info_strings(#[case] info: Option<&str>, #[case] expected: &str) {
        assert_eq!(notion_language(info), expected);
    }
}
