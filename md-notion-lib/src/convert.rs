//! Walks the Markdown AST and builds Notion blocks.

use crate::blocks::{Annotations, Block, Color, Icon, RichText, RichTextContent};
use crate::error::ConvertError;
use crate::language::notion_language;
use crate::limits::{enforce_blocks, enforce_rich_text};
use crate::options::ConvertOptions;
use markdown_ppp::ast::{
    Block as MdBlock, CodeBlock, CodeBlockKind, GitHubAlertType, HeadingKind, Inline, List,
    ListKind, SetextHeading, Table, TaskState,
};
use markdown_ppp::parser::{parse_markdown, MarkdownParserState};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

static EMOJI_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(\p{Extended_Pictographic}[\x{FE0F}\x{1F3FB}-\x{1F3FF}]?(?:\x{200D}\p{Extended_Pictographic}[\x{FE0F}\x{1F3FB}-\x{1F3FF}]?)*)\s*",
    )
    .expect("emoji pattern is valid")
});

static ALERT_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[!(?i)(note|tip|important|warning|caution)\]\s*")
        .expect("alert pattern is valid")
});

static DISPLAY_MATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^\s*\$\$(.+?)\$\$\s*$").expect("math pattern is valid"));

static INLINE_MATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\$([^$]+?)\$\$|\$([^\s$](?:[^$]*[^\s$])?)\$")
        .expect("inline math pattern is valid")
});

/// Converts a Markdown document into Notion blocks.
///
/// Limit violations are reported through `options.notion_limits.on_error` and,
/// when truncation is enabled, cut down to size. Only a Markdown parse failure
/// makes this return an error.
pub fn markdown_to_blocks(
    markdown: &str,
    options: &ConvertOptions,
) -> Result<Vec<Block>, ConvertError> {
    let document = parse_markdown(MarkdownParserState::default(), markdown)
        .map_err(|err| ConvertError::MarkdownParse(err.to_string()))?;

    let converter = Converter::new(&document.blocks, options);
    let blocks = converter.convert_blocks(&document.blocks);
    log::debug!("Converted Markdown into {} top-level blocks", blocks.len());

    Ok(enforce_blocks(blocks, &options.notion_limits))
}

/// Converts Markdown into the rich text of its first text-bearing block.
///
/// Intended for single-paragraph snippets such as page titles or table cells.
pub fn markdown_to_rich_text(
    markdown: &str,
    options: &ConvertOptions,
) -> Result<Vec<RichText>, ConvertError> {
    let document = parse_markdown(MarkdownParserState::default(), markdown)
        .map_err(|err| ConvertError::MarkdownParse(err.to_string()))?;

    let converter = Converter::new(&document.blocks, options);
    let mut rich_text = converter
        .convert_blocks(&document.blocks)
        .into_iter()
        .find_map(|block| block.rich_text().map(<[RichText]>::to_vec))
        .unwrap_or_default();

    enforce_rich_text(&mut rich_text, &options.notion_limits);
    Ok(rich_text)
}

struct Converter<'a> {
    options: &'a ConvertOptions,
    definitions: HashMap<String, String>,
}

#[derive(Debug, Clone, Default)]
struct Style {
    annotations: Annotations,
    link: Option<String>,
}

impl Style {
    fn with(&self, apply: impl FnOnce(&mut Annotations)) -> Style {
        let mut style = self.clone();
        apply(&mut style.annotations);
        style
    }

    fn linked(&self, link: Option<String>) -> Style {
        Style {
            annotations: self.annotations,
            link,
        }
    }
}

#[derive(Debug)]
struct ImageRef {
    url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AlertKind {
    Note,
    Tip,
    Important,
    Warning,
    Caution,
}

impl AlertKind {
    fn from_marker(marker: &str) -> Option<Self> {
        match marker.to_ascii_lowercase().as_str() {
            "note" => Some(AlertKind::Note),
            "tip" => Some(AlertKind::Tip),
            "important" => Some(AlertKind::Important),
            "warning" => Some(AlertKind::Warning),
            "caution" => Some(AlertKind::Caution),
            _ => None,
        }
    }

    fn icon_and_color(self) -> (&'static str, Color) {
        match self {
            AlertKind::Note => ("ℹ️", Color::BlueBackground),
            AlertKind::Tip => ("💡", Color::GreenBackground),
            AlertKind::Important => ("☝️", Color::PurpleBackground),
            AlertKind::Warning => ("⚠️", Color::YellowBackground),
            AlertKind::Caution => ("❗", Color::RedBackground),
        }
    }

    fn callout(self, rich_text: Vec<RichText>, children: Vec<Block>) -> Block {
        let (emoji, color) = self.icon_and_color();
        Block::callout(rich_text, Icon::emoji(emoji), color, children)
    }
}

impl From<&GitHubAlertType> for AlertKind {
    fn from(alert_type: &GitHubAlertType) -> Self {
        match alert_type {
            GitHubAlertType::Note => AlertKind::Note,
            GitHubAlertType::Tip => AlertKind::Tip,
            GitHubAlertType::Important => AlertKind::Important,
            GitHubAlertType::Warning => AlertKind::Warning,
            GitHubAlertType::Caution => AlertKind::Caution,
            GitHubAlertType::Custom(label) => {
                AlertKind::from_marker(label).unwrap_or(AlertKind::Note)
            }
        }
    }
}

impl<'a> Converter<'a> {
    fn new(blocks: &[MdBlock], options: &'a ConvertOptions) -> Self {
        let mut definitions = HashMap::new();
        collect_definitions(blocks, &mut definitions);
        Self {
            options,
            definitions,
        }
    }

    fn convert_blocks(&self, blocks: &[MdBlock]) -> Vec<Block> {
        let mut out = Vec::with_capacity(blocks.len());
        for block in blocks {
            self.convert_block(block, &mut out);
        }
        out
    }

    fn convert_block(&self, block: &MdBlock, out: &mut Vec<Block>) {
        match block {
            MdBlock::Paragraph(inlines) => self.paragraph(inlines, out),
            MdBlock::Heading(heading) => {
                let rich_text = self.rich_text(&heading.content);
                out.push(Block::heading(heading_level(&heading.kind), rich_text));
            }
            MdBlock::ThematicBreak => out.push(Block::divider()),
            MdBlock::BlockQuote(children) => self.block_quote(children, out),
            MdBlock::List(list) => self.list(list, out),
            MdBlock::CodeBlock(code) => self.code_block(code, out),
            MdBlock::Table(table) => self.table(table, out),
            MdBlock::GitHubAlert(alert) => {
                let (rich_text, children) = self.leading_text(&alert.blocks);
                out.push(AlertKind::from(&alert.alert_type).callout(rich_text, children));
            }
            MdBlock::FootnoteDefinition(footnote) => {
                for inner in &footnote.blocks {
                    self.convert_block(inner, out);
                }
            }
            MdBlock::HtmlBlock(_) => log::debug!("Skipping raw HTML block"),
            MdBlock::Definition(_) | MdBlock::Empty => {}
        }
    }

    fn paragraph(&self, inlines: &[Inline], out: &mut Vec<Block>) {
        if let Some(expression) = display_math(inlines) {
            out.push(Block::equation(expression));
            return;
        }

        let mut runs = Vec::new();
        let mut images = Vec::new();
        self.collect_inlines(inlines, &Style::default(), &mut runs, &mut images);
        let runs = extract_inline_math(runs);

        if runs.iter().any(|run| !run.as_str().trim().is_empty()) {
            out.push(Block::paragraph(runs));
        }
        for image in images {
            out.push(self.image_block(image));
        }
    }

    fn block_quote(&self, children: &[MdBlock], out: &mut Vec<Block>) {
        let (mut rich_text, children) = self.leading_text(children);

        if let Some(marker) = strip_prefix(&mut rich_text, &ALERT_MARKER) {
            if let Some(kind) = AlertKind::from_marker(&marker) {
                out.push(kind.callout(rich_text, children));
                return;
            }
        }

        if self.options.enable_emoji_callouts {
            if let Some(emoji) = strip_prefix(&mut rich_text, &EMOJI_PREFIX) {
                out.push(Block::callout(
                    rich_text,
                    Icon::emoji(emoji),
                    Color::Default,
                    children,
                ));
                return;
            }
        }

        out.push(Block::quote(rich_text, children));
    }

    fn list(&self, list: &List, out: &mut Vec<Block>) {
        let ordered = matches!(list.kind, ListKind::Ordered(_));

        for item in &list.items {
            let (rich_text, children) = self.leading_text(&item.blocks);
            let block = match item.task {
                Some(TaskState::Complete) => Block::to_do(rich_text, true, children),
                Some(TaskState::Incomplete) => Block::to_do(rich_text, false, children),
                None if ordered => Block::numbered_list_item(rich_text, children),
                None => Block::bulleted_list_item(rich_text, children),
            };
            out.push(block);
        }
    }

    fn code_block(&self, code: &CodeBlock, out: &mut Vec<Block>) {
        let info = match &code.kind {
            CodeBlockKind::Fenced { info } => info.as_deref(),
            CodeBlockKind::Indented => None,
        };
        let literal = code.literal.strip_suffix('\n').unwrap_or(&code.literal);

        let is_math = info
            .and_then(|info| info.split_whitespace().next())
            .is_some_and(|lang| lang.eq_ignore_ascii_case("math"));
        if is_math {
            out.push(Block::equation(literal.trim()));
            return;
        }

        out.push(Block::code(
            vec![RichText::plain_text(literal)],
            notion_language(info),
        ));
    }

    fn table(&self, table: &Table, out: &mut Vec<Block>) {
        let width = table.rows.iter().map(|row| row.len()).max().unwrap_or(0);
        if width == 0 {
            return;
        }

        let rows = table
            .rows
            .iter()
            .map(|row| {
                let mut cells: Vec<Vec<RichText>> =
                    row.iter().map(|cell| self.rich_text(cell)).collect();
                cells.resize_with(width, Vec::new);
                Block::table_row(cells)
            })
            .collect();

        out.push(Block::table(width, rows));
    }

    /// Splits converted content into the rich text of a leading paragraph and
    /// the remaining blocks, which become children of the container.
    fn leading_text(&self, blocks: &[MdBlock]) -> (Vec<RichText>, Vec<Block>) {
        let mut converted = self.convert_blocks(blocks);
        if converted.is_empty() {
            return (Vec::new(), converted);
        }

        match converted.remove(0).into_paragraph_text() {
            Ok(rich_text) => (rich_text, converted),
            Err(first) => {
                converted.insert(0, first);
                (Vec::new(), converted)
            }
        }
    }

    fn image_block(&self, image: ImageRef) -> Block {
        if self.options.strict_image_urls || is_valid_url(&image.url) {
            Block::image(image.url)
        } else {
            log::debug!("Image URL '{}' is not a valid http(s) URL", image.url);
            Block::paragraph(vec![RichText::plain_text(image.url)])
        }
    }

    /// Rich text for contexts that cannot hold image blocks.
    fn rich_text(&self, inlines: &[Inline]) -> Vec<RichText> {
        let mut runs = Vec::new();
        let mut images = Vec::new();
        self.collect_inlines(inlines, &Style::default(), &mut runs, &mut images);
        if !images.is_empty() {
            log::debug!("Dropping {} inline image(s) outside a paragraph", images.len());
        }
        extract_inline_math(runs)
    }

    fn collect_inlines(
        &self,
        inlines: &[Inline],
        style: &Style,
        runs: &mut Vec<RichText>,
        images: &mut Vec<ImageRef>,
    ) {
        for inline in inlines {
            match inline {
                Inline::Text(text) | Inline::Html(text) => push_run(runs, text, style),
                Inline::Code(code) => push_run(runs, code, &style.with(|a| a.code = true)),
                Inline::LineBreak => push_run(runs, "\n", style),
                Inline::Emphasis(children) => {
                    self.collect_inlines(children, &style.with(|a| a.italic = true), runs, images)
                }
                Inline::Strong(children) => {
                    self.collect_inlines(children, &style.with(|a| a.bold = true), runs, images)
                }
                Inline::Strikethrough(children) => self.collect_inlines(
                    children,
                    &style.with(|a| a.strikethrough = true),
                    runs,
                    images,
                ),
                Inline::Link(link) => {
                    let target = valid_link(&link.destination);
                    self.collect_inlines(&link.children, &style.linked(target), runs, images);
                }
                Inline::LinkReference(reference) => {
                    let label = normalize_label(&inlines_to_text(&reference.label));
                    let text = if reference.text.is_empty() {
                        &reference.label
                    } else {
                        &reference.text
                    };
                    match self.definitions.get(&label) {
                        Some(destination) => {
                            let target = valid_link(destination);
                            self.collect_inlines(text, &style.linked(target), runs, images);
                        }
                        None => {
                            push_run(runs, "[", style);
                            self.collect_inlines(text, style, runs, images);
                            push_run(runs, "]", style);
                        }
                    }
                }
                Inline::Autolink(url) => push_run(runs, url, &style.linked(valid_link(url))),
                Inline::Image(image) => images.push(ImageRef {
                    url: image.destination.clone(),
                }),
                Inline::FootnoteReference(label) => {
                    push_run(runs, &format!("[^{label}]"), style)
                }
                Inline::Empty => {}
            }
        }
    }
}

/// Appends text to the last run when its styling matches, otherwise starts a new run.
fn push_run(runs: &mut Vec<RichText>, content: &str, style: &Style) {
    if content.is_empty() {
        return;
    }

    if let Some(last) = runs.last_mut() {
        if last.annotations == style.annotations && last.link_url() == style.link.as_deref() {
            if let RichTextContent::Text { text } = &mut last.content {
                text.content.push_str(content);
                return;
            }
        }
    }

    runs.push(RichText::text(content, style.annotations, style.link.clone()));
}

/// Splits `$...$` and `$$...$$` spans out of text runs as inline equations.
///
/// A closing `$` followed by a digit is left alone so prices like `$5 and $6`
/// stay text. Code runs are never scanned.
fn extract_inline_math(runs: Vec<RichText>) -> Vec<RichText> {
    let mut out = Vec::with_capacity(runs.len());

    for run in runs {
        let pieces = match &run.content {
            RichTextContent::Text { text } if !run.annotations.code => {
                split_math_spans(&text.content, &run, text.link.as_ref().map(|l| &l.url))
            }
            _ => Vec::new(),
        };

        if pieces.is_empty() {
            out.push(run);
        } else {
            out.extend(pieces);
        }
    }

    out
}

fn split_math_spans(content: &str, run: &RichText, link: Option<&String>) -> Vec<RichText> {
    let mut pieces = Vec::new();
    let mut last = 0;

    for captures in INLINE_MATH.captures_iter(content) {
        let Some(span) = captures.get(0) else {
            continue;
        };
        if content[span.end()..].starts_with(|c: char| c.is_ascii_digit()) {
            continue;
        }
        let Some(expression) = captures.get(1).or_else(|| captures.get(2)) else {
            continue;
        };
        let expression = expression.as_str().trim();
        if expression.is_empty() {
            continue;
        }

        if span.start() > last {
            pieces.push(RichText::text(
                &content[last..span.start()],
                run.annotations,
                link.cloned(),
            ));
        }
        let mut equation = RichText::equation(expression);
        equation.annotations = run.annotations;
        pieces.push(equation);
        last = span.end();
    }

    if pieces.is_empty() {
        return pieces;
    }
    if last < content.len() {
        pieces.push(RichText::text(&content[last..], run.annotations, link.cloned()));
    }
    pieces
}

/// Removes a leading match of `pattern` from the first run, returning capture group 1.
fn strip_prefix(rich_text: &mut Vec<RichText>, pattern: &Regex) -> Option<String> {
    let first = rich_text.first_mut()?;
    let RichTextContent::Text { text } = &mut first.content else {
        return None;
    };

    let (matched_len, captured) = {
        let captures = pattern.captures(&text.content)?;
        (captures.get(0)?.end(), captures.get(1)?.as_str().to_string())
    };

    text.content.replace_range(..matched_len, "");
    if text.content.is_empty() {
        rich_text.remove(0);
    }
    Some(captured)
}

/// A paragraph made only of `$$ ... $$` is a display equation.
fn display_math(inlines: &[Inline]) -> Option<String> {
    let mut source = String::new();
    for inline in inlines {
        match inline {
            Inline::Text(text) => source.push_str(text),
            Inline::LineBreak => source.push('\n'),
            _ => return None,
        }
    }

    let captures = DISPLAY_MATH.captures(&source)?;
    let expression = captures.get(1)?.as_str().trim();
    (!expression.is_empty()).then(|| expression.to_string())
}

fn heading_level(kind: &HeadingKind) -> u8 {
    match kind {
        HeadingKind::Atx(level) => *level,
        HeadingKind::Setext(SetextHeading::Level1) => 1,
        HeadingKind::Setext(SetextHeading::Level2) => 2,
    }
}

/// Notion only accepts absolute http(s) URLs for links and external files.
pub(crate) fn is_valid_url(candidate: &str) -> bool {
    url::Url::parse(candidate)
        .map(|parsed| matches!(parsed.scheme(), "http" | "https") && parsed.has_host())
        .unwrap_or(false)
}

fn valid_link(destination: &str) -> Option<String> {
    if is_valid_url(destination) {
        Some(destination.to_string())
    } else {
        log::debug!("Dropping link to '{destination}': not a valid http(s) URL");
        None
    }
}

fn collect_definitions(blocks: &[MdBlock], definitions: &mut HashMap<String, String>) {
    for block in blocks {
        match block {
            MdBlock::Definition(definition) => {
                let label = normalize_label(&inlines_to_text(&definition.label));
                // The first definition of a label wins.
                definitions
                    .entry(label)
                    .or_insert_with(|| definition.destination.clone());
            }
            MdBlock::BlockQuote(children) => collect_definitions(children, definitions),
            MdBlock::List(list) => {
                for item in &list.items {
                    collect_definitions(&item.blocks, definitions);
                }
            }
            MdBlock::FootnoteDefinition(footnote) => {
                collect_definitions(&footnote.blocks, definitions)
            }
            MdBlock::GitHubAlert(alert) => collect_definitions(&alert.blocks, definitions),
            _ => {}
        }
    }
}

fn normalize_label(label: &str) -> String {
    label
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn inlines_to_text(inlines: &[Inline]) -> String {
    inlines
        .iter()
        .map(|inline| match inline {
            Inline::Text(s) | Inline::Code(s) | Inline::Html(s) | Inline::Autolink(s) => {
                s.clone()
            }
            Inline::Emphasis(children)
            | Inline::Strong(children)
            | Inline::Strikethrough(children) => inlines_to_text(children),
            Inline::Link(link) => inlines_to_text(&link.children),
            Inline::LinkReference(reference) => inlines_to_text(&reference.text),
            Inline::Image(image) => image.alt.clone(),
            _ => String::new(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::BlockContent;
    use crate::error::LimitError;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn convert(markdown: &str) -> Vec<Block> {
        markdown_to_blocks(markdown, &ConvertOptions::default()).unwrap()
    }

    fn kinds(blocks: &[Block]) -> Vec<&'static str> {
        blocks.iter().map(Block::kind).collect()
    }

    fn text_of(block: &Block) -> String {
        block
            .rich_text()
            .unwrap_or_default()
            .iter()
            .map(RichText::as_str)
            .collect()
    }

    #[test]
    fn converts_common_block_types() {
        let blocks = convert(
            "# Title\n\nSome text.\n\n---\n\n- one\n- two\n\n1. first\n\n```rust\nfn main() {}\n```\n",
        );

        assert_eq!(
            kinds(&blocks),
            vec![
                "heading_1",
                "paragraph",
                "divider",
                "bulleted_list_item",
                "bulleted_list_item",
                "numbered_list_item",
                "code",
            ]
        );
        assert_eq!(text_of(&blocks[0]), "Title");
        assert_eq!(text_of(&blocks[6]), "fn main() {}");
    }

    #[rstest]
    #[case("# h", "heading_1")]
    #[case("## h", "heading_2")]
    #[case("### h", "heading_3")]
    #[case("##### h", "heading_3")]
    #[case("h\n===", "heading_1")]
    #[case("h\n---", "heading_2")]
    fn maps_heading_levels(#[case] markdown: &str, #[case] expected: &str) {
        assert_eq!(kinds(&convert(markdown)), vec![expected]);
    }

    #[test]
    fn empty_input_yields_no_blocks() {
        assert!(convert("").is_empty());
    }

    #[test]
    fn inline_styles_become_annotations() {
        let blocks = convert("plain **bold** *italic* ~~gone~~ `code`\n");
        let runs = blocks[0].rich_text().unwrap();

        let bold = runs.iter().find(|r| r.as_str() == "bold").unwrap();
        assert!(bold.annotations.bold);
        let italic = runs.iter().find(|r| r.as_str() == "italic").unwrap();
        assert!(italic.annotations.italic);
        let struck = runs.iter().find(|r| r.as_str() == "gone").unwrap();
        assert!(struck.annotations.strikethrough);
        let code = runs.iter().find(|r| r.as_str() == "code").unwrap();
        assert!(code.annotations.code);
        assert!(!runs[0].annotations.bold);
    }

    #[test]
    fn valid_links_keep_their_url() {
        let blocks = convert("See [the docs](https://example.com/docs).\n");
        let runs = blocks[0].rich_text().unwrap();
        let link = runs.iter().find(|r| r.as_str() == "the docs").unwrap();
        assert_eq!(link.link_url(), Some("https://example.com/docs"));
    }

    #[test]
    fn relative_links_become_plain_text() {
        let blocks = convert("See [notes](./notes.md).\n");
        let runs = blocks[0].rich_text().unwrap();
        assert!(runs.iter().all(|r| r.link_url().is_none()));
        assert_eq!(text_of(&blocks[0]), "See notes.");
    }

    #[test]
    fn reference_links_resolve_through_definitions() {
        let blocks = convert("Read [the guide][guide].\n\n[guide]: https://example.com/guide\n");
        assert_eq!(kinds(&blocks), vec!["paragraph"]);
        let runs = blocks[0].rich_text().unwrap();
        assert!(runs
            .iter()
            .any(|r| r.link_url() == Some("https://example.com/guide")));
    }

    #[test]
    fn adjacent_runs_with_same_style_are_merged() {
        let mut runs = Vec::new();
        let style = Style::default();
        push_run(&mut runs, "a", &style);
        push_run(&mut runs, "b", &style);
        push_run(&mut runs, "c", &style.with(|a| a.bold = true));
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].as_str(), "ab");
    }

    #[test]
    fn task_items_become_to_dos() {
        let blocks = convert("- [ ] open\n- [x] done\n");
        assert_eq!(kinds(&blocks), vec!["to_do", "to_do"]);

        let checked: Vec<bool> = blocks
            .iter()
            .map(|b| match &b.content {
                BlockContent::ToDo { to_do } => to_do.checked,
                _ => panic!("expected to_do"),
            })
            .collect();
        assert_eq!(checked, vec![false, true]);
    }

    #[test]
    fn nested_lists_become_children() {
        let blocks = convert("- parent\n  - child\n");
        assert_eq!(kinds(&blocks), vec!["bulleted_list_item"]);
        assert_eq!(text_of(&blocks[0]), "parent");

        let children = blocks[0].children().unwrap();
        assert_eq!(kinds(children), vec!["bulleted_list_item"]);
        assert_eq!(text_of(&children[0]), "child");
    }

    #[test]
    fn block_quote_is_quote_by_default() {
        let blocks = convert("> 💡 Remember this\n");
        assert_eq!(kinds(&blocks), vec!["quote"]);
        assert!(text_of(&blocks[0]).starts_with("💡"));
    }

    #[test]
    fn emoji_quote_becomes_callout_when_enabled() {
        let options = ConvertOptions::default().with_emoji_callouts(true);
        let blocks = markdown_to_blocks("> 💡 Remember this\n", &options).unwrap();

        assert_eq!(kinds(&blocks), vec!["callout"]);
        let BlockContent::Callout { callout } = &blocks[0].content else {
            panic!("expected callout");
        };
        assert_eq!(callout.icon, Icon::emoji("💡"));
        assert_eq!(text_of(&blocks[0]), "Remember this");
    }

    #[test]
    fn quote_without_emoji_stays_quote_when_enabled() {
        let options = ConvertOptions::default().with_emoji_callouts(true);
        let blocks = markdown_to_blocks("> Just a quote\n", &options).unwrap();
        assert_eq!(kinds(&blocks), vec!["quote"]);
    }

    #[test]
    fn github_alert_becomes_callout() {
        let blocks = convert("> [!TIP]\n> Use the shortcut.\n");

        assert_eq!(kinds(&blocks), vec!["callout"]);
        let BlockContent::Callout { callout } = &blocks[0].content else {
            panic!("expected callout");
        };
        assert_eq!(callout.icon, Icon::emoji("💡"));
        assert_eq!(callout.color, Color::GreenBackground);
    }

    #[rstest]
    #[case(GitHubAlertType::Caution, AlertKind::Caution)]
    #[case(GitHubAlertType::Custom("Warning".to_string()), AlertKind::Warning)]
    #[case(GitHubAlertType::Custom("aside".to_string()), AlertKind::Note)]
    fn alert_types_map_to_callout_styles(
        #[case] alert_type: GitHubAlertType,
        #[case] expected: AlertKind,
    ) {
        assert_eq!(AlertKind::from(&alert_type), expected);
    }

    #[test]
    fn valid_images_are_hoisted_out_of_paragraphs() {
        let blocks = convert("Look: ![chart](https://example.com/chart.png)\n");
        assert_eq!(kinds(&blocks), vec!["paragraph", "image"]);
    }

    #[test]
    fn image_only_paragraph_yields_only_image() {
        let blocks = convert("![chart](https://example.com/chart.png)\n");
        assert_eq!(kinds(&blocks), vec!["image"]);
    }

    #[test]
    fn invalid_images_fall_back_to_text() {
        let blocks = convert("![local](images/local.png)\n");
        assert_eq!(kinds(&blocks), vec!["paragraph"]);
        assert_eq!(text_of(&blocks[0]), "images/local.png");
    }

    #[test]
    fn strict_image_urls_keep_invalid_images() {
        let options = ConvertOptions::default().with_strict_image_urls(true);
        let blocks = markdown_to_blocks("![local](images/local.png)\n", &options).unwrap();
        assert_eq!(kinds(&blocks), vec!["image"]);
    }

    #[test]
    fn tables_pad_rows_to_width() {
        let blocks = convert("| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert_eq!(kinds(&blocks), vec!["table"]);

        let BlockContent::Table { table } = &blocks[0].content else {
            panic!("expected table");
        };
        assert_eq!(table.table_width, 2);
        assert!(table.has_column_header);
        assert_eq!(table.children.len(), 2);
        assert_eq!(kinds(&table.children), vec!["table_row", "table_row"]);
    }

    #[test]
    fn math_fence_becomes_equation() {
        let blocks = convert("```math\nE = mc^2\n```\n");
        assert_eq!(kinds(&blocks), vec!["equation"]);
    }

    #[test]
    fn display_math_paragraph_becomes_equation() {
        let blocks = convert("$$ a^2 + b^2 = c^2 $$\n");
        let BlockContent::Equation { equation } = &blocks[0].content else {
            panic!("expected equation");
        };
        assert_eq!(equation.expression, "a^2 + b^2 = c^2");
    }

    #[test]
    fn inline_math_becomes_equation_run() {
        let blocks = convert("Energy $E=mc^2$ here\n");
        let runs = blocks[0].rich_text().unwrap();

        assert_eq!(runs.len(), 3);
        assert_eq!(runs[0].as_str(), "Energy ");
        assert!(matches!(
            &runs[1].content,
            RichTextContent::Equation { equation } if equation.expression == "E=mc^2"
        ));
        assert_eq!(runs[2].as_str(), " here");
    }

    #[rstest]
    #[case("It costs $5 and $6 today.\n")]
    #[case("Use `$x$` literally.\n")]
    fn dollar_text_without_math_stays_text(#[case] markdown: &str) {
        let blocks = convert(markdown);
        let runs = blocks[0].rich_text().unwrap();
        assert!(runs
            .iter()
            .all(|run| matches!(run.content, RichTextContent::Text { .. })));
    }

    #[test]
    fn overlong_inline_equation_is_reported_and_cut() {
        let markdown = format!("Sum ${}$\n", "x".repeat(1100));
        let seen = Rc::new(RefCell::new(Vec::new()));
        let captured = Rc::clone(&seen);
        let options = ConvertOptions::default()
            .with_error_sink(move |err| captured.borrow_mut().push(err.clone()));

        let blocks = markdown_to_blocks(&markdown, &options).unwrap();

        let runs = blocks[0].rich_text().unwrap();
        assert_eq!(runs[1].as_str().len(), 1000);
        assert_eq!(
            *seen.borrow(),
            vec![LimitError::EquationExpression { len: 1100, limit: 1000 }]
        );
    }

    #[test]
    fn unknown_code_language_is_plain_text() {
        let blocks = convert("```klingon\nqapla'\n```\n");
        let BlockContent::Code { code } = &blocks[0].content else {
            panic!("expected code");
        };
        assert_eq!(code.language, "plain text");
    }

    #[test]
    fn truncation_caps_payload_and_reports() {
        let markdown: String = (0..1001).map(|i| format!("p{i}\n\n")).collect();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let captured = Rc::clone(&seen);
        let options = ConvertOptions::default()
            .with_error_sink(move |err| captured.borrow_mut().push(err.clone()));

        let blocks = markdown_to_blocks(&markdown, &options).unwrap();

        assert_eq!(blocks.len(), 1000);
        assert_eq!(
            *seen.borrow(),
            vec![LimitError::PayloadBlocks { len: 1001, limit: 1000 }]
        );
    }

    #[test]
    fn disabling_truncation_keeps_everything() {
        let markdown: String = (0..1001).map(|i| format!("p{i}\n\n")).collect();
        let options = ConvertOptions::default().with_truncate(false);
        assert_eq!(markdown_to_blocks(&markdown, &options).unwrap().len(), 1001);
    }

    #[test]
    fn rich_text_of_first_paragraph() {
        let runs = markdown_to_rich_text("Hello **world**", &ConvertOptions::default()).unwrap();
        let text: String = runs.iter().map(RichText::as_str).collect();
        assert_eq!(text, "Hello world");
        assert!(runs.last().unwrap().annotations.bold);
    }

    #[rstest]
    #[case("https://example.com", true)]
    #[case("http://example.com/a?b=c", true)]
    #[case("ftp://example.com", false)]
    #[case("mailto:someone@example.com", false)]
    #[case("/relative/path", false)]
    #[case("", false)]
    fn validates_urls(#[case] candidate: &str, #[case] expected: bool) {
        assert_eq!(is_valid_url(candidate), expected);
    }
}
