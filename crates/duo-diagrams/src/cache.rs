//! Content-addressed media cache.
//!
//! Provides [`MediaCache`], which maps a diagram and its base filename to a
//! pair of theme images in the media directory, rendering only the images
//! that do not exist yet.

use std::fs;
use std::path::PathBuf;

use crate::error::{RenderError, RenderFailure};
use crate::renderer::DiagramRenderer;
use crate::source::DiagramSource;
use crate::theme::Theme;
use crate::toolchain::Toolchain;

/// Links to both theme images of one diagram.
///
/// Links always use forward slashes so they can be embedded in markup as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPair {
    /// Image with black strokes, shown on light pages.
    pub black: String,
    /// Image with white strokes, shown on dark pages.
    pub white: String,
}

/// Append-only image cache keyed by filename.
///
/// The base filename embeds the content hash, so an existing file is always
/// a valid rendering of the same source and is never rewritten.
#[derive(Debug)]
pub struct MediaCache<T> {
    renderer: DiagramRenderer<T>,
    media_dir: PathBuf,
    link_prefix: String,
}

impl<T: Toolchain> MediaCache<T> {
    /// Create a cache writing to `media_dir`, linking images as `{link_prefix}/{file}`.
    #[must_use]
    pub fn new(
        renderer: DiagramRenderer<T>,
        media_dir: impl Into<PathBuf>,
        link_prefix: impl Into<String>,
    ) -> Self {
        let link_prefix = link_prefix.into().replace('\\', "/");
        Self {
            renderer,
            media_dir: media_dir.into(),
            link_prefix: link_prefix.trim_end_matches('/').to_owned(),
        }
    }

    /// The renderer used on cache misses.
    #[must_use]
    pub fn renderer(&self) -> &DiagramRenderer<T> {
        &self.renderer
    }

    /// Image filename for `base_filename` in `theme`.
    #[must_use]
    pub fn file_name(&self, base_filename: &str, theme: Theme) -> String {
        format!(
            "{base_filename}_{}.{}",
            theme.name(),
            self.renderer.image_format().extension()
        )
    }

    /// Filesystem path of the image for `base_filename` in `theme`.
    #[must_use]
    pub fn path_for(&self, base_filename: &str, theme: Theme) -> PathBuf {
        self.media_dir.join(self.file_name(base_filename, theme))
    }

    /// Ensure both theme images exist, rendering whichever are missing.
    ///
    /// Themes are attempted independently: a failure in one does not skip the
    /// other, and an image that rendered successfully is kept even when its
    /// sibling fails.
    pub fn ensure_rendered(
        &self,
        source: &DiagramSource,
        base_filename: &str,
    ) -> Result<RenderedPair, RenderFailure> {
        let black = self.ensure_theme(source, base_filename, Theme::Black);
        let white = self.ensure_theme(source, base_filename, Theme::White);

        match (black, white) {
            (Ok(()), Ok(())) => Ok(RenderedPair {
                black: self.link_for(base_filename, Theme::Black),
                white: self.link_for(base_filename, Theme::White),
            }),
            (black, white) => Err(RenderFailure {
                base_filename: base_filename.to_owned(),
                errors: [(Theme::Black, black), (Theme::White, white)]
                    .into_iter()
                    .filter_map(|(theme, result)| result.err().map(|e| (theme, e)))
                    .collect(),
            }),
        }
    }

    fn ensure_theme(
        &self,
        source: &DiagramSource,
        base_filename: &str,
        theme: Theme,
    ) -> Result<(), RenderError> {
        let target = self.path_for(base_filename, theme);
        if target.exists() {
            tracing::debug!("cache hit: {}", target.display());
            return Ok(());
        }

        fs::create_dir_all(&self.media_dir)?;
        self.renderer.render(source, theme, &target)?;
        tracing::info!(
            environment = source.environment().name(),
            "rendered {}",
            target.display()
        );
        Ok(())
    }

    fn link_for(&self, base_filename: &str, theme: Theme) -> String {
        let file_name = self.file_name(base_filename, theme);
        if self.link_prefix.is_empty() {
            file_name
        } else {
            format!("{}/{file_name}", self.link_prefix)
        }
    }
}
