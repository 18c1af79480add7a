//! Internal constants for diagram rendering.

/// Maximum number of trailing characters of tool output kept in diagnostics.
pub const DIAGNOSTIC_TAIL_CHARS: usize = 400;

/// Prefix for per-render temporary working directories.
pub const TEMP_DIR_PREFIX: &str = "duo_";

/// Name of the synthesized LaTeX document inside the working directory.
pub const TEX_FILENAME: &str = "diagram.tex";

/// Stem of the rasterizer output inside the working directory.
///
/// Distinct from the TeX stem so PDF-to-PDF conversion never overwrites its input.
pub const IMAGE_STEM: &str = "image";
