//! Rendering themes and output image formats.

/// Color variant of a rendered diagram.
///
/// `Black` draws strokes and text in black for light pages; `White` draws
/// them in white for dark pages. Both leave fills transparent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Theme {
    Black,
    White,
}

impl Theme {
    /// Both themes, in rendering order.
    pub const ALL: [Self; 2] = [Self::Black, Self::White];

    /// Theme name used as filename suffix.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::White => "white",
        }
    }

    /// TikZ style directive forcing every node and path to this theme's color.
    #[must_use]
    pub fn style_directive(self) -> &'static str {
        match self {
            Self::Black => {
                r"\tikzset{every node/.style={text=black,fill=none},every path/.style={draw=black,fill=none}}"
            }
            Self::White => {
                r"\tikzset{every node/.style={text=white,fill=none},every path/.style={draw=white,fill=none}}"
            }
        }
    }
}

/// Final image format written to the media directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageFormat {
    /// Scalable vector graphics (default, for HTML-like targets).
    #[default]
    Svg,
    /// PDF, for targets that are typeset by LaTeX.
    Pdf,
}

impl ImageFormat {
    /// Pick the image format for a Pandoc output format.
    ///
    /// PDF-based targets (`latex`, `beamer`, `context`, `pdf`, `ms`) get PDF
    /// images; everything else gets SVG.
    #[must_use]
    pub fn for_target(target: &str) -> Self {
        // Pandoc passes writer names possibly carrying extensions ("latex+raw_tex")
        let writer = target
            .split(['+', '-'])
            .next()
            .unwrap_or(target);
        match writer {
            "latex" | "beamer" | "context" | "pdf" | "ms" => Self::Pdf,
            _ => Self::Svg,
        }
    }

    /// File extension without the dot.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Pdf => "pdf",
        }
    }

    /// Output-mode flag for `pdftocairo`.
    #[must_use]
    pub fn rasterizer_flag(self) -> &'static str {
        match self {
            Self::Svg => "-svg",
            Self::Pdf => "-pdf",
        }
    }
}
