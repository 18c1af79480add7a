//! Theme-aware TikZ diagram rendering for duo.
//!
//! This crate turns LaTeX picture environments embedded in documents into
//! image files:
//! - Extraction of the first `tikzpicture`, `circuitikz` or `picture` environment
//! - Standalone document synthesis with a per-theme color directive
//! - Compilation and rasterization through external programs
//! - A content-addressed media cache that only renders missing images
//!
//! # Architecture
//!
//! The crate is organized into modules:
//! - [`extract`]: Locating diagram environments in raw text
//! - [`DiagramSource`]: Extracted source and its SHA-1 content hash
//! - [`DocumentTemplate`]: Standalone document around one diagram
//! - [`Toolchain`]: Seam over the compiler and rasterizer subprocesses
//! - [`DiagramRenderer`]: One diagram, one theme, one file
//! - [`MediaCache`]: Both themes, skipping images that already exist
//!
//! # Example
//!
//! ```ignore
//! use duo_diagrams::{DiagramRenderer, LatexToolchain, MediaCache, extract_diagram};
//!
//! let source = extract_diagram(r"\begin{tikzpicture}\draw (0,0) -- (1,1);\end{tikzpicture}")
//!     .expect("diagram");
//! let cache = MediaCache::new(DiagramRenderer::new(LatexToolchain::default()), "media", "media");
//! let base = format!("0_0_1_{}", source.content_hash());
//! let pair = cache.ensure_rendered(&source, &base)?;
//! ```

mod cache;
mod consts;
mod error;
pub mod extract;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod renderer;
mod source;
mod template;
mod theme;
mod toolchain;

pub use cache::{MediaCache, RenderedPair};
pub use error::{RenderError, RenderFailure};
pub use extract::{DiagramEnvironment, extract_diagram, mentions_diagram};
#[cfg(any(test, feature = "mock"))]
pub use mock::MockToolchain;
pub use renderer::DiagramRenderer;
pub use source::DiagramSource;
pub use template::DocumentTemplate;
pub use theme::{ImageFormat, Theme};
pub use toolchain::{LatexToolchain, Toolchain};
