//! Classification of blocks by how the rewriter treats them.

use duo_ast::Block;
use duo_diagrams::mentions_diagram;

/// Class marking a centering container.
pub const CENTER_CLASS: &str = "center";

/// The block shapes the rewriter distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeShape {
    /// Heading of the given level.
    Heading(u32),
    /// Figure whose body holds a raw block mentioning a diagram.
    Figure,
    /// Div carrying the `center` class.
    Centering,
    /// LaTeX raw block mentioning a diagram.
    RawMarkup,
    /// Anything else; only its nested block lists are visited.
    Other,
}

/// Classify a block.
#[must_use]
pub fn classify(block: &Block) -> NodeShape {
    match block {
        Block::Header(level, _, _) => NodeShape::Heading(*level),
        Block::Figure(_, _, body) if figure_diagram(body).is_some() => NodeShape::Figure,
        Block::Div(attr, _) if attr.has_class(CENTER_CLASS) => NodeShape::Centering,
        Block::RawBlock(format, text) if format.is_latex() && mentions_diagram(text) => {
            NodeShape::RawMarkup
        }
        _ => NodeShape::Other,
    }
}

/// Text of the first raw block in a figure body that mentions a diagram.
#[must_use]
pub fn figure_diagram(body: &[Block]) -> Option<&str> {
    body.iter().find_map(|block| match block {
        Block::RawBlock(_, text) if mentions_diagram(text) => Some(text.as_str()),
        _ => None,
    })
}
