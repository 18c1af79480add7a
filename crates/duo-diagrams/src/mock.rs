//! Mock toolchain implementation for testing.
//!
//! Provides [`MockToolchain`] for exercising rendering and caching without a
//! TeX installation.

use std::cell::{Cell, RefCell};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::RenderError;
use crate::theme::{ImageFormat, Theme};
use crate::toolchain::Toolchain;

/// Toolchain that writes the synthesized document back out as the "image".
///
/// The produced file therefore contains the theme directive and diagram
/// source, which lets tests check what was compiled. Invocations are counted.
///
/// # Example
///
/// ```ignore
/// use duo_diagrams::{DiagramRenderer, MockToolchain};
///
/// let renderer = DiagramRenderer::new(MockToolchain::new().failing_on("\\broken"));
/// ```
#[derive(Debug, Default)]
pub struct MockToolchain {
    fail_marker: Option<String>,
    fail_theme: Option<Theme>,
    fail_rasterize: bool,
    compiles: Cell<usize>,
    rasterizes: Cell<usize>,
    last_work_dir: RefCell<Option<PathBuf>>,
}

impl MockToolchain {
    /// Create a mock that always succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail compilation of any document containing `marker`.
    #[must_use]
    pub fn failing_on(mut self, marker: impl Into<String>) -> Self {
        self.fail_marker = Some(marker.into());
        self
    }

    /// Fail compilation of every document rendered in `theme`.
    #[must_use]
    pub fn failing_theme(mut self, theme: Theme) -> Self {
        self.fail_theme = Some(theme);
        self
    }

    /// Fail every rasterization.
    #[must_use]
    pub fn failing_rasterize(mut self) -> Self {
        self.fail_rasterize = true;
        self
    }

    /// Number of compiler invocations so far.
    pub fn compile_count(&self) -> usize {
        self.compiles.get()
    }

    /// Number of rasterizer invocations so far.
    pub fn rasterize_count(&self) -> usize {
        self.rasterizes.get()
    }

    /// Working directory of the most recent compile.
    pub fn last_work_dir(&self) -> Option<PathBuf> {
        self.last_work_dir.borrow().clone()
    }
}

impl Toolchain for MockToolchain {
    fn compile(&self, tex: &Path, work_dir: &Path) -> Result<PathBuf, RenderError> {
        self.compiles.set(self.compiles.get() + 1);
        self.last_work_dir.replace(Some(work_dir.to_path_buf()));

        let document = fs::read_to_string(tex)?;
        let marker_hit = self
            .fail_marker
            .as_deref()
            .is_some_and(|marker| document.contains(marker));
        let theme_hit = self
            .fail_theme
            .is_some_and(|theme| document.contains(theme.style_directive()));
        if marker_hit || theme_hit {
            return Err(RenderError::Compile {
                status: "exit status: 1".to_owned(),
                output: "! Undefined control sequence.".to_owned(),
            });
        }

        let pdf = work_dir.join("diagram.pdf");
        fs::write(&pdf, document)?;
        Ok(pdf)
    }

    fn rasterize(
        &self,
        pdf: &Path,
        output: &Path,
        format: ImageFormat,
    ) -> Result<(), RenderError> {
        self.rasterizes.set(self.rasterizes.get() + 1);
        if self.fail_rasterize {
            return Err(RenderError::Rasterize {
                status: "exit status: 99".to_owned(),
                output: "Syntax Error: Couldn't read xref table".to_owned(),
            });
        }

        let document = fs::read_to_string(pdf)?;
        fs::write(output, format!("mock {}\n{document}", format.extension()))?;
        Ok(())
    }
}
