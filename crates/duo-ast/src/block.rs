//! Block-level Pandoc AST types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Inline content, kept as raw Pandoc JSON.
///
/// The filter never rewrites inlines, so they round-trip as opaque values.
pub type Inline = Value;

/// Element attributes: identifier, classes, key-value pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attr(pub String, pub Vec<String>, pub Vec<(String, String)>);

impl Attr {
    /// Attributes carrying only the given classes.
    #[must_use]
    pub fn with_classes(classes: &[&str]) -> Self {
        Self(
            String::new(),
            classes.iter().map(|&c| c.to_owned()).collect(),
            Vec::new(),
        )
    }

    /// Element identifier (empty when absent).
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.0
    }

    /// Element classes.
    #[must_use]
    pub fn classes(&self) -> &[String] {
        &self.1
    }

    /// Whether the element carries `class`.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.1.iter().any(|c| c == class)
    }
}

/// Raw content format tag (e.g., `latex`, `html`, `markdown`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Format(pub String);

impl Format {
    /// Create a format tag.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Format name as written in the AST.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is LaTeX source (`latex` or `tex`).
    #[must_use]
    pub fn is_latex(&self) -> bool {
        matches!(self.0.as_str(), "latex" | "tex")
    }
}

/// Figure or table caption: optional short caption plus body blocks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Caption(pub Option<Vec<Inline>>, pub Vec<Block>);

/// A Pandoc block element.
///
/// Serialized in Pandoc's adjacently tagged form: `{"t": "Para", "c": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "t", content = "c")]
pub enum Block {
    Plain(Vec<Inline>),
    Para(Vec<Inline>),
    LineBlock(Vec<Vec<Inline>>),
    CodeBlock(Attr, String),
    RawBlock(Format, String),
    BlockQuote(Vec<Block>),
    OrderedList(Value, Vec<Vec<Block>>),
    BulletList(Vec<Vec<Block>>),
    DefinitionList(Vec<(Vec<Inline>, Vec<Vec<Block>>)>),
    Header(u32, Attr, Vec<Inline>),
    HorizontalRule,
    /// Table contents are passed through opaquely; cells are not walked.
    Table(Attr, Value, Value, Value, Value, Value),
    Figure(Attr, Caption, Vec<Block>),
    Div(Attr, Vec<Block>),
}

impl Block {
    /// Create a raw block in the given format.
    #[must_use]
    pub fn raw(format: &str, text: impl Into<String>) -> Self {
        Self::RawBlock(Format::new(format), text.into())
    }

    /// Mutable access to every block list nested directly inside this block.
    ///
    /// Figure captions are not included; only the figure body is.
    pub fn child_lists_mut(&mut self) -> Vec<&mut Vec<Block>> {
        match self {
            Self::BlockQuote(blocks) | Self::Div(_, blocks) | Self::Figure(_, _, blocks) => {
                vec![blocks]
            }
            Self::OrderedList(_, items) | Self::BulletList(items) => items.iter_mut().collect(),
            Self::DefinitionList(entries) => entries
                .iter_mut()
                .flat_map(|(_, definitions)| definitions.iter_mut())
                .collect(),
            Self::Plain(_)
            | Self::Para(_)
            | Self::LineBlock(_)
            | Self::CodeBlock(..)
            | Self::RawBlock(..)
            | Self::Header(..)
            | Self::HorizontalRule
            | Self::Table(..) => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_raw_block_json_shape() {
        let block = Block::raw("markdown", "text");
        let value = serde_json::to_value(&block).unwrap();
        assert_eq!(value, json!({"t": "RawBlock", "c": ["markdown", "text"]}));
    }

    #[test]
    fn test_figure_json_shape() {
        let value = json!({
            "t": "Figure",
            "c": [
                ["fig:circuit1", [], []],
                [null, [{"t": "Plain", "c": [{"t": "Str", "c": "Circuit"}]}]],
                [{"t": "RawBlock", "c": ["latex", "\\begin{circuitikz}\\end{circuitikz}"]}]
            ]
        });
        let block: Block = serde_json::from_value(value.clone()).unwrap();

        let Block::Figure(attr, caption, body) = &block else {
            panic!("expected Figure");
        };
        assert_eq!(attr.identifier(), "fig:circuit1");
        assert!(caption.0.is_none());
        assert_eq!(caption.1.len(), 1);
        assert_eq!(body.len(), 1);
        assert_eq!(serde_json::to_value(&block).unwrap(), value);
    }

    #[test]
    fn test_table_passes_through() {
        let value = json!({
            "t": "Table",
            "c": [
                ["", [], []],
                [null, []],
                [[{"t": "AlignDefault"}, {"t": "ColWidthDefault"}]],
                [["", [], []], []],
                [],
                [["", [], []], []]
            ]
        });
        let block: Block = serde_json::from_value(value.clone()).unwrap();
        assert!(matches!(block, Block::Table(..)));
        assert_eq!(serde_json::to_value(&block).unwrap(), value);
    }

    #[test]
    fn test_attr_accessors() {
        let attr = Attr(
            "fig:a".to_owned(),
            vec!["center".to_owned(), "wide".to_owned()],
            vec![("width".to_owned(), "50%".to_owned())],
        );
        assert_eq!(attr.identifier(), "fig:a");
        assert!(attr.has_class("center"));
        assert!(!attr.has_class("left"));
        assert_eq!(attr.classes().len(), 2);
        assert!(Attr::with_classes(&["center"]).has_class("center"));
    }

    #[test]
    fn test_format_is_latex() {
        assert!(Format::new("latex").is_latex());
        assert!(Format::new("tex").is_latex());
        assert!(!Format::new("html").is_latex());
        assert_eq!(Format::new("gfm").as_str(), "gfm");
    }

    #[test]
    fn test_child_lists_mut() {
        let para = Block::Para(vec![json!({"t": "Str", "c": "x"})]);
        let mut list = Block::BulletList(vec![vec![para.clone()], vec![para.clone(), para.clone()]]);
        let lists = list.child_lists_mut();
        assert_eq!(lists.len(), 2);
        assert_eq!(lists[1].len(), 2);

        let mut deflist = Block::DefinitionList(vec![(
            vec![json!({"t": "Str", "c": "term"})],
            vec![vec![para.clone()], vec![para.clone()]],
        )]);
        assert_eq!(deflist.child_lists_mut().len(), 2);

        let mut header = Block::Header(1, Attr::default(), Vec::new());
        assert!(header.child_lists_mut().is_empty());
    }
}
