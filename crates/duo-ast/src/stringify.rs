//! Plain-text rendering of Pandoc content.
//!
//! Used for figure alt text, where markup must be flattened to a single line.

use serde_json::Value;

use crate::block::{Block, Inline};

/// Flatten inline content to plain text.
///
/// Breaks become single spaces so the result always fits on one line.
/// Footnotes and raw inlines contribute nothing.
#[must_use]
pub fn stringify(inlines: &[Inline]) -> String {
    let mut out = String::new();
    for inline in inlines {
        push_inline(inline, &mut out);
    }
    out
}

/// Flatten a list of blocks to plain text, joining blocks with a space.
#[must_use]
pub fn stringify_blocks(blocks: &[Block]) -> String {
    blocks
        .iter()
        .map(stringify_block)
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn stringify_block(block: &Block) -> String {
    match block {
        Block::Plain(inlines) | Block::Para(inlines) | Block::Header(_, _, inlines) => {
            stringify(inlines)
        }
        Block::LineBlock(lines) => lines
            .iter()
            .map(|line| stringify(line))
            .collect::<Vec<_>>()
            .join(" "),
        Block::CodeBlock(_, text) => text.clone(),
        Block::BlockQuote(blocks) | Block::Div(_, blocks) | Block::Figure(_, _, blocks) => {
            stringify_blocks(blocks)
        }
        Block::OrderedList(_, items) | Block::BulletList(items) => items
            .iter()
            .map(|item| stringify_blocks(item))
            .collect::<Vec<_>>()
            .join(" "),
        Block::DefinitionList(entries) => entries
            .iter()
            .map(|(term, definitions)| {
                let mut parts = vec![stringify(term)];
                parts.extend(definitions.iter().map(|d| stringify_blocks(d)));
                parts.join(" ")
            })
            .collect::<Vec<_>>()
            .join(" "),
        Block::RawBlock(..) | Block::HorizontalRule | Block::Table(..) => String::new(),
    }
}

fn push_inline(inline: &Value, out: &mut String) {
    let Some(tag) = inline.get("t").and_then(Value::as_str) else {
        return;
    };
    let content = inline.get("c");

    match tag {
        "Str" => {
            if let Some(text) = content.and_then(Value::as_str) {
                out.push_str(text);
            }
        }
        "Space" | "SoftBreak" | "LineBreak" => out.push(' '),
        // [attr, text] and [mathType, text]
        "Code" | "Math" => {
            if let Some(text) = content.and_then(|c| c.get(1)).and_then(Value::as_str) {
                out.push_str(text);
            }
        }
        "Quoted" => {
            let (open, close) = match content
                .and_then(|c| c.get(0))
                .and_then(|q| q.get("t"))
                .and_then(Value::as_str)
            {
                Some("SingleQuote") => ('\'', '\''),
                _ => ('"', '"'),
            };
            out.push(open);
            if let Some(inner) = content.and_then(|c| c.get(1)) {
                push_nested(inner, out);
            }
            out.push(close);
        }
        "Note" | "RawInline" => {}
        _ => {
            if let Some(inner) = content {
                push_nested(inner, out);
            }
        }
    }
}

/// Walk arbitrary JSON looking for inline elements.
///
/// Attributes and link targets are plain strings, never tagged objects, so
/// they are skipped naturally.
fn push_nested(value: &Value, out: &mut String) {
    match value {
        Value::Array(items) => {
            for item in items {
                push_nested(item, out);
            }
        }
        Value::Object(_) => push_inline(value, out),
        _ => {}
    }
}
