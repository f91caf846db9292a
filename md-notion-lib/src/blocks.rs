//! The Notion block model produced by the converter.
//!
//! Every type here serializes to the JSON shape accepted by the Notion API's
//! "append block children" endpoint, e.g.
//!
//! ```json
//! {"object":"block","type":"paragraph","paragraph":{"rich_text":[...]}}
//! ```

use serde::Serialize;

/// A single Notion block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Block {
    object: &'static str,
    #[serde(flatten)]
    pub content: BlockContent,
}

/// The typed payload of a [`Block`], keyed by its Notion block type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockContent {
    Paragraph {
        paragraph: TextBlock,
    },
    #[serde(rename = "heading_1")]
    Heading1 {
        heading_1: TextBlock,
    },
    #[serde(rename = "heading_2")]
    Heading2 {
        heading_2: TextBlock,
    },
    #[serde(rename = "heading_3")]
    Heading3 {
        heading_3: TextBlock,
    },
    BulletedListItem {
        bulleted_list_item: TextBlock,
    },
    NumberedListItem {
        numbered_list_item: TextBlock,
    },
    ToDo {
        to_do: ToDoBlock,
    },
    Quote {
        quote: TextBlock,
    },
    Callout {
        callout: CalloutBlock,
    },
    Code {
        code: CodeBlock,
    },
    Image {
        image: ExternalFile,
    },
    Divider {
        divider: EmptyObject,
    },
    Table {
        table: TableBlock,
    },
    TableRow {
        table_row: TableRowBlock,
    },
    Equation {
        equation: Equation,
    },
}

/// Rich text plus optional nested children.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TextBlock {
    pub rich_text: Vec<RichText>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToDoBlock {
    pub rich_text: Vec<RichText>,
    pub checked: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalloutBlock {
    pub rich_text: Vec<RichText>,
    pub icon: Icon,
    pub color: Color,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CodeBlock {
    pub rich_text: Vec<RichText>,
    pub language: &'static str,
}

/// A file hosted outside Notion, referenced by URL.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExternalFile {
    #[serde(rename = "type")]
    kind: &'static str,
    pub external: Url,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Url {
    pub url: String,
}

/// Serializes as `{}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct EmptyObject {}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableBlock {
    pub table_width: usize,
    pub has_column_header: bool,
    pub has_row_header: bool,
    pub children: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRowBlock {
    pub cells: Vec<Vec<RichText>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Equation {
    pub expression: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Icon {
    Emoji { emoji: String },
}

impl Icon {
    pub fn emoji(emoji: impl Into<String>) -> Self {
        Icon::Emoji {
            emoji: emoji.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    #[default]
    Default,
    Gray,
    Brown,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
    Pink,
    Red,
    GrayBackground,
    BrownBackground,
    OrangeBackground,
    YellowBackground,
    GreenBackground,
    BlueBackground,
    PurpleBackground,
    PinkBackground,
    RedBackground,
}

/// A styled run of text (or an inline equation) inside a block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RichText {
    #[serde(flatten)]
    pub content: RichTextContent,
    pub annotations: Annotations,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RichTextContent {
    Text { text: TextContent },
    Equation { equation: Equation },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextContent {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<Url>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Annotations {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub underline: bool,
    pub code: bool,
    pub color: Color,
}

impl RichText {
    /// A text run with the given styling and optional link target.
    pub fn text(
        content: impl Into<String>,
        annotations: Annotations,
        link: Option<String>,
    ) -> Self {
        Self {
            content: RichTextContent::Text {
                text: TextContent {
                    content: content.into(),
                    link: link.map(|url| Url { url }),
                },
            },
            annotations,
        }
    }

    /// An unstyled text run.
    pub fn plain_text(content: impl Into<String>) -> Self {
        Self::text(content, Annotations::default(), None)
    }

    pub fn equation(expression: impl Into<String>) -> Self {
        Self {
            content: RichTextContent::Equation {
                equation: Equation {
                    expression: expression.into(),
                },
            },
            annotations: Annotations::default(),
        }
    }

    /// The text carried by this run, or the expression for an equation.
    pub fn as_str(&self) -> &str {
        match &self.content {
            RichTextContent::Text { text } => &text.content,
            RichTextContent::Equation { equation } => &equation.expression,
        }
    }

    pub fn link_url(&self) -> Option<&str> {
        match &self.content {
            RichTextContent::Text { text } => text.link.as_ref().map(|link| link.url.as_str()),
            RichTextContent::Equation { .. } => None,
        }
    }
}

impl Block {
    fn new(content: BlockContent) -> Self {
        Self {
            object: "block",
            content,
        }
    }

    pub fn paragraph(rich_text: Vec<RichText>) -> Self {
        Self::new(BlockContent::Paragraph {
            paragraph: TextBlock {
                rich_text,
                children: Vec::new(),
            },
        })
    }

    /// Notion only has three heading levels; deeper headings become `heading_3`.
    pub fn heading(level: u8, rich_text: Vec<RichText>) -> Self {
        let heading = TextBlock {
            rich_text,
            children: Vec::new(),
        };
        Self::new(match level {
            0 | 1 => BlockContent::Heading1 { heading_1: heading },
            2 => BlockContent::Heading2 { heading_2: heading },
            _ => BlockContent::Heading3 { heading_3: heading },
        })
    }

    pub fn bulleted_list_item(rich_text: Vec<RichText>, children: Vec<Block>) -> Self {
        Self::new(BlockContent::BulletedListItem {
            bulleted_list_item: TextBlock { rich_text, children },
        })
    }

    pub fn numbered_list_item(rich_text: Vec<RichText>, children: Vec<Block>) -> Self {
        Self::new(BlockContent::NumberedListItem {
            numbered_list_item: TextBlock { rich_text, children },
        })
    }

    pub fn to_do(rich_text: Vec<RichText>, checked: bool, children: Vec<Block>) -> Self {
        Self::new(BlockContent::ToDo {
            to_do: ToDoBlock {
                rich_text,
                checked,
                children,
            },
        })
    }

    pub fn quote(rich_text: Vec<RichText>, children: Vec<Block>) -> Self {
        Self::new(BlockContent::Quote {
            quote: TextBlock { rich_text, children },
        })
    }

    pub fn callout(
        rich_text: Vec<RichText>,
        icon: Icon,
        color: Color,
        children: Vec<Block>,
    ) -> Self {
        Self::new(BlockContent::Callout {
            callout: CalloutBlock {
                rich_text,
                icon,
                color,
                children,
            },
        })
    }

    pub fn code(rich_text: Vec<RichText>, language: &'static str) -> Self {
        Self::new(BlockContent::Code {
            code: CodeBlock {
                rich_text,
                language,
            },
        })
    }

    pub fn image(url: impl Into<String>) -> Self {
        Self::new(BlockContent::Image {
            image: ExternalFile {
                kind: "external",
                external: Url { url: url.into() },
            },
        })
    }

    pub fn divider() -> Self {
        Self::new(BlockContent::Divider {
            divider: EmptyObject {},
        })
    }

    /// A table whose rows are `table_row` blocks; the first row is the header.
    pub fn table(table_width: usize, rows: Vec<Block>) -> Self {
        Self::new(BlockContent::Table {
            table: TableBlock {
                table_width,
                has_column_header: true,
                has_row_header: false,
                children: rows,
            },
        })
    }

    pub fn table_row(cells: Vec<Vec<RichText>>) -> Self {
        Self::new(BlockContent::TableRow {
            table_row: TableRowBlock { cells },
        })
    }

    pub fn equation(expression: impl Into<String>) -> Self {
        Self::new(BlockContent::Equation {
            equation: Equation {
                expression: expression.into(),
            },
        })
    }

    /// The Notion type name, as written in the `type` field.
    pub fn kind(&self) -> &'static str {
        match &self.content {
            BlockContent::Paragraph { .. } => "paragraph",
            BlockContent::Heading1 { .. } => "heading_1",
            BlockContent::Heading2 { .. } => "heading_2",
            BlockContent::Heading3 { .. } => "heading_3",
            BlockContent::BulletedListItem { .. } => "bulleted_list_item",
            BlockContent::NumberedListItem { .. } => "numbered_list_item",
            BlockContent::ToDo { .. } => "to_do",
            BlockContent::Quote { .. } => "quote",
            BlockContent::Callout { .. } => "callout",
            BlockContent::Code { .. } => "code",
            BlockContent::Image { .. } => "image",
            BlockContent::Divider { .. } => "divider",
            BlockContent::Table { .. } => "table",
            BlockContent::TableRow { .. } => "table_row",
            BlockContent::Equation { .. } => "equation",
        }
    }

    pub fn rich_text(&self) -> Option<&[RichText]> {
        match &self.content {
            BlockContent::Paragraph { paragraph: b }
            | BlockContent::Heading1 { heading_1: b }
            | BlockContent::Heading2 { heading_2: b }
            | BlockContent::Heading3 { heading_3: b }
            | BlockContent::BulletedListItem {
                bulleted_list_item: b,
            }
            | BlockContent::NumberedListItem {
                numbered_list_item: b,
            }
            | BlockContent::Quote { quote: b } => Some(b.rich_text.as_slice()),
            BlockContent::ToDo { to_do } => Some(to_do.rich_text.as_slice()),
            BlockContent::Callout { callout } => Some(callout.rich_text.as_slice()),
            BlockContent::Code { code } => Some(code.rich_text.as_slice()),
            BlockContent::Image { .. }
            | BlockContent::Divider { .. }
            | BlockContent::Table { .. }
            | BlockContent::TableRow { .. }
            | BlockContent::Equation { .. } => None,
        }
    }

    pub fn rich_text_mut(&mut self) -> Option<&mut Vec<RichText>> {
        match &mut self.content {
            BlockContent::Paragraph { paragraph: b }
            | BlockContent::Heading1 { heading_1: b }
            | BlockContent::Heading2 { heading_2: b }
            | BlockContent::Heading3 { heading_3: b }
            | BlockContent::BulletedListItem {
                bulleted_list_item: b,
            }
            | BlockContent::NumberedListItem {
                numbered_list_item: b,
            }
            | BlockContent::Quote { quote: b } => Some(&mut b.rich_text),
            BlockContent::ToDo { to_do } => Some(&mut to_do.rich_text),
            BlockContent::Callout { callout } => Some(&mut callout.rich_text),
            BlockContent::Code { code } => Some(&mut code.rich_text),
            BlockContent::Image { .. }
            | BlockContent::Divider { .. }
            | BlockContent::Table { .. }
            | BlockContent::TableRow { .. }
            | BlockContent::Equation { .. } => None,
        }
    }

    /// Nested children of container blocks (list items, quotes, callouts, tables).
    pub fn children(&self) -> Option<&[Block]> {
        match &self.content {
            BlockContent::BulletedListItem {
                bulleted_list_item: b,
            }
            | BlockContent::NumberedListItem {
                numbered_list_item: b,
            }
            | BlockContent::Quote { quote: b } => Some(b.children.as_slice()),
            BlockContent::ToDo { to_do } => Some(to_do.children.as_slice()),
            BlockContent::Callout { callout } => Some(callout.children.as_slice()),
            BlockContent::Table { table } => Some(table.children.as_slice()),
            _ => None,
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Block>> {
        match &mut self.content {
            BlockContent::BulletedListItem {
                bulleted_list_item: b,
            }
            | BlockContent::NumberedListItem {
                numbered_list_item: b,
            }
            | BlockContent::Quote { quote: b } => Some(&mut b.children),
            BlockContent::ToDo { to_do } => Some(&mut to_do.children),
            BlockContent::Callout { callout } => Some(&mut callout.children),
            BlockContent::Table { table } => Some(&mut table.children),
            _ => None,
        }
    }

    /// Consumes a paragraph and returns its rich text; any other block is handed back.
    pub fn into_paragraph_text(self) -> Result<Vec<RichText>, Block> {
        match self.content {
            BlockContent::Paragraph { paragraph } => Ok(paragraph.rich_text),
            content => Err(Block::new(content)),
        }
    }
}
