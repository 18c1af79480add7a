//! Diagram environment detection and extraction.
//!
//! Finds the first complete `\begin{env} ... \end{env}` span for the supported
//! LaTeX drawing environments.

use std::sync::LazyLock;

use regex::Regex;

use crate::source::DiagramSource;

static BEGIN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\begin\{(tikzpicture|circuitikz|picture)\}").unwrap());

/// Keywords that cheaply indicate a text may hold a diagram.
const KEYWORDS: [&str; 3] = ["tikzpicture", "circuitikz", "begin{picture}"];

/// Supported LaTeX drawing environments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagramEnvironment {
    TikzPicture,
    CircuiTikz,
    Picture,
}

impl DiagramEnvironment {
    /// Parse an environment name.
    ///
    /// Returns None if the name is not a supported drawing environment.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "tikzpicture" => Some(Self::TikzPicture),
            "circuitikz" => Some(Self::CircuiTikz),
            "picture" => Some(Self::Picture),
            _ => None,
        }
    }

    /// Environment name as written in LaTeX.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::TikzPicture => "tikzpicture",
            Self::CircuiTikz => "circuitikz",
            Self::Picture => "picture",
        }
    }

    fn end_marker(self) -> &'static str {
        match self {
            Self::TikzPicture => r"\end{tikzpicture}",
            Self::CircuiTikz => r"\end{circuitikz}",
            Self::Picture => r"\end{picture}",
        }
    }
}

/// Whether `text` mentions any supported diagram environment.
///
/// This is a keyword pre-check; a positive result does not guarantee that
/// [`extract_diagram`] finds a complete environment.
#[must_use]
pub fn mentions_diagram(text: &str) -> bool {
    KEYWORDS.iter().any(|keyword| text.contains(keyword))
}

/// Extract the first complete diagram environment from `text`.
///
/// The earliest `\begin{env}` that is followed by a matching `\end{env}` wins,
/// and the span ends at the first such `\end{env}`. Begin and end names must
/// agree; `\begin{tikzpicture}` is never closed by `\end{circuitikz}`.
///
/// Returns the exact substring including both markers, or None if no
/// complete environment exists.
#[must_use]
pub fn extract_diagram(text: &str) -> Option<DiagramSource> {
    for caps in BEGIN_PATTERN.captures_iter(text) {
        let (Some(begin), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let Some(environment) = DiagramEnvironment::parse(name.as_str()) else {
            continue;
        };
        let end_marker = environment.end_marker();
        if let Some(offset) = text[begin.end()..].find(end_marker) {
            let end = begin.end() + offset + end_marker.len();
            return Some(DiagramSource::new(&text[begin.start()..end], environment));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extracts_tikzpicture() {
        let text = "Before\n\\begin{tikzpicture}\n\\draw (0,0) -- (1,1);\n\\end{tikzpicture}\nAfter";
        let source = extract_diagram(text).unwrap();
        assert_eq!(
            source.as_str(),
            "\\begin{tikzpicture}\n\\draw (0,0) -- (1,1);\n\\end{tikzpicture}"
        );
        assert_eq!(source.environment(), DiagramEnvironment::TikzPicture);
    }

    #[test]
    fn test_extracts_circuitikz_and_picture() {
        let circuit = extract_diagram("\\begin{circuitikz}\\draw (0,0) to[R] (2,0);\\end{circuitikz}")
            .unwrap();
        assert_eq!(circuit.environment(), DiagramEnvironment::CircuiTikz);

        let picture =
            extract_diagram("\\begin{picture}(10,10)\\put(0,0){x}\\end{picture}").unwrap();
        assert_eq!(picture.environment(), DiagramEnvironment::Picture);
    }

    #[test]
    fn test_returns_only_first_pair() {
        let text = "\\begin{tikzpicture}A\\end{tikzpicture} text \\begin{tikzpicture}B\\end{tikzpicture}";
        let source = extract_diagram(text).unwrap();
        assert_eq!(source.as_str(), "\\begin{tikzpicture}A\\end{tikzpicture}");
    }

    #[test]
    fn test_nested_same_name_stops_at_first_end() {
        let text = "\\begin{tikzpicture}\\begin{tikzpicture}X\\end{tikzpicture}\\end{tikzpicture}";
        let source = extract_diagram(text).unwrap();
        assert_eq!(
            source.as_str(),
            "\\begin{tikzpicture}\\begin{tikzpicture}X\\end{tikzpicture}"
        );
    }

    #[test]
    fn test_mismatched_end_is_not_a_match() {
        assert!(extract_diagram("\\begin{tikzpicture}A\\end{circuitikz}").is_none());
    }

    #[test]
    fn test_skips_unclosed_begin_for_later_pair() {
        let text = "\\begin{tikzpicture} unclosed \\begin{circuitikz}C\\end{circuitikz}";
        let source = extract_diagram(text).unwrap();
        assert_eq!(source.as_str(), "\\begin{circuitikz}C\\end{circuitikz}");
    }

    #[test]
    fn test_no_environment() {
        assert!(extract_diagram("plain text").is_none());
        assert!(extract_diagram("").is_none());
        assert!(extract_diagram("\\begin{figure}\\end{figure}").is_none());
    }

    #[test]
    fn test_mentions_diagram() {
        assert!(mentions_diagram("\\begin{tikzpicture}"));
        assert!(mentions_diagram("uses circuitikz"));
        assert!(mentions_diagram("\\begin{picture}(1,1)"));
        assert!(!mentions_diagram("a picture of a cat"));
    }

    #[test]
    fn test_environment_names_roundtrip() {
        for env in [
            DiagramEnvironment::TikzPicture,
            DiagramEnvironment::CircuiTikz,
            DiagramEnvironment::Picture,
        ] {
            assert_eq!(DiagramEnvironment::parse(env.name()), Some(env));
        }
        assert_eq!(DiagramEnvironment::parse("figure"), None);
    }
}
