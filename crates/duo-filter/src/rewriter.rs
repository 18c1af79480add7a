//! Document rewriting.

use duo_ast::{Attr, Block, Caption, Document, stringify_blocks};
use duo_diagrams::{
    DiagramSource, MediaCache, RenderedPair, Toolchain, extract_diagram, mentions_diagram,
};

use crate::markup::{figure_block, is_theme_block, theme_blocks};
use crate::numbering::NumberingTracker;
use crate::shape::{NodeShape, classify, figure_diagram};

/// Replaces diagram source in a document with theme-toggled images.
///
/// Blocks are visited in document order. Headings drive image numbering;
/// figures, centering divs and LaTeX raw blocks holding a diagram are
/// rendered through the media cache and replaced with MyST markup. Directly
/// inside a centering div, raw blocks of any format are rendered. A block
/// that is replaced, or whose render failed, is not visited further.
///
/// Render failures never abort the pass: the block is left unchanged and one
/// warning is recorded per block.
#[derive(Debug)]
pub struct DiagramFilter<T> {
    cache: MediaCache<T>,
    numbering: NumberingTracker,
    warnings: Vec<String>,
}

impl<T: Toolchain> DiagramFilter<T> {
    /// Create a filter rendering through `cache`.
    #[must_use]
    pub fn new(cache: MediaCache<T>) -> Self {
        Self {
            cache,
            numbering: NumberingTracker::new(),
            warnings: Vec::new(),
        }
    }

    /// The media cache used for rendering.
    #[must_use]
    pub fn cache(&self) -> &MediaCache<T> {
        &self.cache
    }

    /// Warnings collected so far, one per failed block.
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Rewrite a whole document.
    ///
    /// Numbering starts fresh for every document.
    #[must_use]
    pub fn apply(&mut self, mut document: Document) -> Document {
        self.numbering = NumberingTracker::new();
        document.blocks = self.rewrite_blocks(std::mem::take(&mut document.blocks));
        document
    }

    fn rewrite_blocks(&mut self, blocks: Vec<Block>) -> Vec<Block> {
        let mut out = Vec::with_capacity(blocks.len());
        for block in blocks {
            out.extend(self.rewrite_block(block));
        }
        out
    }

    fn rewrite_block(&mut self, mut block: Block) -> Vec<Block> {
        match classify(&block) {
            NodeShape::Heading(level) => {
                self.numbering.on_heading(level);
                vec![block]
            }
            NodeShape::Figure => match block {
                Block::Figure(attr, caption, body) => self.rewrite_figure(attr, caption, body),
                other => vec![other],
            },
            NodeShape::Centering => match block {
                Block::Div(attr, children) => self.rewrite_centering(attr, children),
                other => vec![other],
            },
            NodeShape::RawMarkup => self.rewrite_raw(block),
            NodeShape::Other => {
                for list in block.child_lists_mut() {
                    *list = self.rewrite_blocks(std::mem::take(list));
                }
                vec![block]
            }
        }
    }

    fn rewrite_figure(&mut self, attr: Attr, caption: Caption, body: Vec<Block>) -> Vec<Block> {
        let source = figure_diagram(&body).and_then(extract_diagram);
        let rendered = source.and_then(|source| self.render(&source));

        match rendered {
            Some(pair) => {
                let caption_text = stringify_blocks(&caption.1);
                vec![figure_block(&pair, attr.identifier(), &caption_text)]
            }
            None => vec![Block::Figure(attr, caption, body)],
        }
    }

    /// Rewrite the children of a centering div, dissolving the div when it
    /// ends up holding theme blocks.
    fn rewrite_centering(&mut self, attr: Attr, children: Vec<Block>) -> Vec<Block> {
        let mut rewritten = Vec::with_capacity(children.len());
        for child in children {
            if is_centered_raw(&child) {
                rewritten.extend(self.rewrite_raw(child));
            } else {
                rewritten.extend(self.rewrite_block(child));
            }
        }
        let children = rewritten;
        if children.iter().any(is_theme_block) {
            tracing::debug!("splitting centering div around theme blocks");
            children
        } else {
            vec![Block::Div(attr, children)]
        }
    }

    fn rewrite_raw(&mut self, block: Block) -> Vec<Block> {
        let Block::RawBlock(_, text) = &block else {
            return vec![block];
        };
        match extract_diagram(text).and_then(|source| self.render(&source)) {
            Some(pair) => theme_blocks(&pair).into(),
            None => vec![block],
        }
    }

    fn render(&mut self, source: &DiagramSource) -> Option<RenderedPair> {
        let number = self.numbering.next_image();
        let base = number.base_filename(&source.content_hash());

        match self.cache.ensure_rendered(source, &base) {
            Ok(pair) => Some(pair),
            Err(failure) => {
                tracing::debug!(base = %failure.base_filename, "render failed");
                self.warnings.push(failure.to_string());
                None
            }
        }
    }
}

/// Raw child of a centering div rendered regardless of its format.
///
/// Theme blocks from an earlier run are left to the normal rules.
fn is_centered_raw(block: &Block) -> bool {
    matches!(block, Block::RawBlock(_, text) if mentions_diagram(text)) && !is_theme_block(block)
}
