//! Pandoc document rewriting for duo.
//!
//! Walks a [`duo_ast::Document`] and replaces embedded TikZ, `circuitikz`
//! and `picture` diagrams with MyST theme-toggle blocks pointing at rendered
//! images:
//!
//! - Labeled figures become a `::::{figure}` directive with both images and
//!   the caption
//! - Centering divs are dissolved so the theme blocks become siblings
//! - Bare LaTeX raw blocks become two theme blocks
//!
//! Image filenames carry the chapter/section position of the diagram (see
//! [`NumberingTracker`]) and the content hash of its source.
//!
//! # Example
//!
//! ```ignore
//! use duo_diagrams::{DiagramRenderer, LatexToolchain, MediaCache};
//! use duo_filter::DiagramFilter;
//!
//! let cache = MediaCache::new(DiagramRenderer::new(LatexToolchain::default()), "media", "media");
//! let mut filter = DiagramFilter::new(cache);
//! let document = filter.apply(document);
//! for warning in filter.warnings() {
//!     eprintln!("{warning}");
//! }
//! ```

mod markup;
mod numbering;
mod rewriter;
mod shape;

pub use markup::{figure_block, is_theme_block, theme_blocks};
pub use numbering::{ImageNumber, NumberingTracker};
pub use rewriter::DiagramFilter;
pub use shape::{NodeShape, classify};
