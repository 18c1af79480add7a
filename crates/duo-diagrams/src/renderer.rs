//! Uncached single-theme rendering.

use std::fs::{self, File};
use std::io;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::consts::{IMAGE_STEM, TEMP_DIR_PREFIX, TEX_FILENAME};
use crate::error::RenderError;
use crate::source::DiagramSource;
use crate::template::DocumentTemplate;
use crate::theme::{ImageFormat, Theme};
use crate::toolchain::Toolchain;

/// Renders one diagram in one theme to a target file.
///
/// Every call works in a fresh temporary directory that is removed on return,
/// whether the render succeeded or not. The target file only ever appears
/// complete: output is staged next to it and renamed into place.
#[derive(Debug)]
pub struct DiagramRenderer<T> {
    toolchain: T,
    template: DocumentTemplate,
    format: ImageFormat,
}

impl<T: Toolchain> DiagramRenderer<T> {
    /// Create a renderer producing SVG with the built-in template.
    #[must_use]
    pub fn new(toolchain: T) -> Self {
        Self {
            toolchain,
            template: DocumentTemplate::new(),
            format: ImageFormat::default(),
        }
    }

    /// Set the document template.
    #[must_use]
    pub fn template(mut self, template: DocumentTemplate) -> Self {
        self.template = template;
        self
    }

    /// Set the output image format.
    #[must_use]
    pub fn format(mut self, format: ImageFormat) -> Self {
        self.format = format;
        self
    }

    /// The configured output image format.
    #[must_use]
    pub fn image_format(&self) -> ImageFormat {
        self.format
    }

    /// The underlying toolchain.
    #[must_use]
    pub fn toolchain(&self) -> &T {
        &self.toolchain
    }

    /// Render `source` in `theme` and write the image to `target`.
    ///
    /// On error nothing is written to `target`.
    pub fn render(
        &self,
        source: &DiagramSource,
        theme: Theme,
        target: &Path,
    ) -> Result<(), RenderError> {
        let work_dir = tempfile::Builder::new()
            .prefix(TEMP_DIR_PREFIX)
            .tempdir()?;

        let tex = work_dir.path().join(TEX_FILENAME);
        fs::write(&tex, self.template.render(source, theme))?;

        let pdf = self.toolchain.compile(&tex, work_dir.path())?;

        let image = work_dir
            .path()
            .join(format!("{IMAGE_STEM}.{}", self.format.extension()));
        self.toolchain.rasterize(&pdf, &image, self.format)?;

        persist(&image, target)?;
        Ok(())
    }
}

/// Copy `produced` next to `target` and atomically rename it into place.
///
/// Staging in the target directory keeps the final rename on one filesystem,
/// which a rename straight out of the system temp directory cannot guarantee.
fn persist(produced: &Path, target: &Path) -> io::Result<()> {
    let dir = target
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let mut staged = NamedTempFile::new_in(dir)?;
    io::copy(&mut File::open(produced)?, staged.as_file_mut())?;
    staged.persist(target).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::DiagramEnvironment;
    use crate::mock::MockToolchain;

    fn source(body: &str) -> DiagramSource {
        DiagramSource::new(
            format!("\\begin{{tikzpicture}}{body}\\end{{tikzpicture}}"),
            DiagramEnvironment::TikzPicture,
        )
    }

    #[test]
    fn test_render_writes_target() {
        let tmp = tempfile::tempdir().unwrap();
        let target = tmp.path().join("out_black.svg");
        let renderer = DiagramRenderer::new(MockToolchain::new());

        renderer
            .render(&source("\\draw (0,0);"), Theme::Black, &target)
            .unwrap();

        let content = fs::read_to_string(&target).unwrap();
        assert!(content.contains(Theme::Black.style_directive()));
        assert!(content.contains("\\draw (0,0);"));
        assert_eq!(renderer.toolchain().compile_count(), 1);
        assert_eq!(renderer.toolchain().rasterize_count(), 1);
    }

    #[test]
    fn test_render_failure_leaves_no_target() {
        let tmp = tempfile::tempdir().unwrap();
        let target = tmp.path().join("out_white.svg");
        let renderer = DiagramRenderer::new(MockToolchain::new().failing_on("\\broken"));

        let err = renderer
            .render(&source("\\broken"), Theme::White, &target)
            .unwrap_err();

        assert!(matches!(err, RenderError::Compile { .. }));
        assert!(!target.exists());
        assert_eq!(renderer.toolchain().rasterize_count(), 0);
        // Only the (empty) target directory remains, no staged leftovers
        assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_rasterize_failure_leaves_no_target() {
        let tmp = tempfile::tempdir().unwrap();
        let target = tmp.path().join("out_black.svg");
        let renderer = DiagramRenderer::new(MockToolchain::new().failing_rasterize());

        let err = renderer
            .render(&source("x"), Theme::Black, &target)
            .unwrap_err();

        assert!(matches!(err, RenderError::Rasterize { .. }));
        assert!(!target.exists());
    }

    #[test]
    fn test_work_dir_is_removed() {
        let tmp = tempfile::tempdir().unwrap();
        let renderer = DiagramRenderer::new(MockToolchain::new());

        renderer
            .render(&source("x"), Theme::Black, &tmp.path().join("a.svg"))
            .unwrap();

        let work_dir = renderer.toolchain().last_work_dir().unwrap();
        assert!(!work_dir.exists());
        assert!(
            work_dir
                .file_name()
                .unwrap()
                .to_string_lossy()
                .starts_with(TEMP_DIR_PREFIX)
        );
    }

    #[test]
    fn test_pdf_format_uses_distinct_output_name() {
        let tmp = tempfile::tempdir().unwrap();
        let target = tmp.path().join("a_black.pdf");
        let renderer = DiagramRenderer::new(MockToolchain::new()).format(ImageFormat::Pdf);

        renderer.render(&source("x"), Theme::Black, &target).unwrap();

        assert!(target.exists());
        assert_eq!(renderer.image_format(), ImageFormat::Pdf);
    }
}
