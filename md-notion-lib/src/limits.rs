//! Enforces the Notion API size limits on converted blocks.

use crate::blocks::{Block, BlockContent, RichText, RichTextContent};
use crate::error::LimitError;
use crate::options::{api_limits, NotionLimits};

/// Applies every limit to a top-level block list.
pub(crate) fn enforce_blocks(mut blocks: Vec<Block>, notion_limits: &NotionLimits) -> Vec<Block> {
    for block in blocks.iter_mut() {
        enforce_block(block, notion_limits);
    }

    if blocks.len() > api_limits::PAYLOAD_BLOCKS {
        notion_limits.report(LimitError::PayloadBlocks {
            len: blocks.len(),
            limit: api_limits::PAYLOAD_BLOCKS,
        });
        if notion_limits.truncate {
            blocks.truncate(api_limits::PAYLOAD_BLOCKS);
        }
    }

    blocks
}

fn enforce_block(block: &mut Block, notion_limits: &NotionLimits) {
    let kind = block.kind();

    if let Some(rich_text) = block.rich_text_mut() {
        enforce_rich_text(rich_text, notion_limits);
    }

    match &mut block.content {
        BlockContent::TableRow { table_row } => {
            for cell in table_row.cells.iter_mut() {
                enforce_rich_text(cell, notion_limits);
            }
        }
        BlockContent::Equation { equation } => {
            enforce_expression(&mut equation.expression, notion_limits);
        }
        _ => {}
    }

    if let Some(children) = block.children_mut() {
        for child in children.iter_mut() {
            enforce_block(child, notion_limits);
        }

        if children.len() > api_limits::CHILDREN {
            notion_limits.report(LimitError::Children {
                kind,
                len: children.len(),
                limit: api_limits::CHILDREN,
            });
            if notion_limits.truncate {
                children.truncate(api_limits::CHILDREN);
            }
        }
    }
}

/// Splits over-long runs, then checks link, equation and array limits.
pub(crate) fn enforce_rich_text(rich_text: &mut Vec<RichText>, notion_limits: &NotionLimits) {
    if rich_text
        .iter()
        .any(|run| run.as_str().chars().count() > api_limits::TEXT_CONTENT)
    {
        *rich_text = std::mem::take(rich_text)
            .into_iter()
            .flat_map(split_run)
            .collect();
    }

    for run in rich_text.iter_mut() {
        match &mut run.content {
            RichTextContent::Text { text } => {
                let url_len = text
                    .link
                    .as_ref()
                    .map_or(0, |link| link.url.chars().count());
                if url_len > api_limits::LINK_URL {
                    notion_limits.report(LimitError::LinkUrl {
                        len: url_len,
                        limit: api_limits::LINK_URL,
                    });
                    if notion_limits.truncate {
                        text.link = None;
                    }
                }
            }
            RichTextContent::Equation { equation } => {
                enforce_expression(&mut equation.expression, notion_limits);
            }
        }
    }

    if rich_text.len() > api_limits::RICH_TEXT_ARRAYS {
        notion_limits.report(LimitError::RichTextArray {
            len: rich_text.len(),
            limit: api_limits::RICH_TEXT_ARRAYS,
        });
        if notion_limits.truncate {
            rich_text.truncate(api_limits::RICH_TEXT_ARRAYS);
        }
    }
}

fn enforce_expression(expression: &mut String, notion_limits: &NotionLimits) {
    let len = expression.chars().count();
    if len > api_limits::EQUATION_EXPRESSION {
        notion_limits.report(LimitError::EquationExpression {
            len,
            limit: api_limits::EQUATION_EXPRESSION,
        });
        if notion_limits.truncate {
            *expression = expression
                .chars()
                .take(api_limits::EQUATION_EXPRESSION)
                .collect();
        }
    }
}

/// Notion rejects text runs over the content limit regardless of truncation,
/// so long runs are always cut into consecutive runs with the same styling.
fn split_run(run: RichText) -> Vec<RichText> {
    let RichTextContent::Text { text } = &run.content else {
        return vec![run];
    };
    if text.content.chars().count() <= api_limits::TEXT_CONTENT {
        return vec![run];
    }

    let chars: Vec<char> = text.content.chars().collect();
    chars
        .chunks(api_limits::TEXT_CONTENT)
        .map(|chunk| {
            RichText::text(
                chunk.iter().collect::<String>(),
                run.annotations,
                text.link.as_ref().map(|link| link.url.clone()),
            )
        })
        .collect()
}
