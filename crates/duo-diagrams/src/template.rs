//! Standalone LaTeX document synthesis.

use crate::source::DiagramSource;
use crate::theme::Theme;

/// Packages and libraries every diagram is compiled with.
const BASE_PREAMBLE: &str = r"\documentclass[border=2pt]{standalone}
\usepackage{tikz}
\usepackage[siunitx, straight voltages, european]{circuitikz}
\usetikzlibrary{automata, positioning, arrows, circuits.ee.IEC}
\ctikzset{>=latex, tripoles/european not symbol=ieee circle}
";

/// Builds the standalone document compiled for one diagram and theme.
#[derive(Debug, Clone, Default)]
pub struct DocumentTemplate {
    extra_preamble: String,
}

impl DocumentTemplate {
    /// Template with the built-in preamble only.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append user preamble lines (extra packages, macros) after the built-in ones.
    #[must_use]
    pub fn with_preamble(mut self, preamble: impl Into<String>) -> Self {
        self.extra_preamble = preamble.into();
        self
    }

    /// Render the full document for `source` in `theme`.
    #[must_use]
    pub fn render(&self, source: &DiagramSource, theme: Theme) -> String {
        let mut doc = String::with_capacity(
            BASE_PREAMBLE.len() + self.extra_preamble.len() + source.as_str().len() + 200,
        );
        doc.push_str(BASE_PREAMBLE);
        let extra = self.extra_preamble.trim_end();
        if !extra.is_empty() {
            doc.push_str(extra);
            doc.push('\n');
        }
        doc.push('\n');
        doc.push_str(theme.style_directive());
        doc.push_str("\n\\begin{document}\n");
        doc.push_str(source.as_str());
        doc.push_str("\n\\end{document}\n");
        doc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::DiagramEnvironment;
    use pretty_assertions::assert_eq;

    fn source() -> DiagramSource {
        DiagramSource::new(
            "\\begin{tikzpicture}\\draw (0,0) -- (1,0);\\end{tikzpicture}",
            DiagramEnvironment::TikzPicture,
        )
    }

    #[test]
    fn test_render_structure() {
        let doc = DocumentTemplate::new().render(&source(), Theme::Black);

        assert!(doc.starts_with("\\documentclass[border=2pt]{standalone}\n"));
        assert!(doc.contains("\\usepackage[siunitx, straight voltages, european]{circuitikz}"));
        assert!(doc.ends_with(
            "\\begin{document}\n\\begin{tikzpicture}\\draw (0,0) -- (1,0);\\end{tikzpicture}\n\\end{document}\n"
        ));
    }

    #[test]
    fn test_theme_directive_precedes_document() {
        let doc = DocumentTemplate::new().render(&source(), Theme::White);
        let directive = doc.find(Theme::White.style_directive()).unwrap();
        let begin = doc.find("\\begin{document}").unwrap();
        assert!(directive < begin);
        assert!(!doc.contains("text=black"));
    }

    #[test]
    fn test_extra_preamble() {
        let template = DocumentTemplate::new().with_preamble("\\usetikzlibrary{calc}\n\n");
        let doc = template.render(&source(), Theme::Black);

        let lines: Vec<&str> = doc.lines().collect();
        let ctikzset = lines.iter().position(|l| l.starts_with("\\ctikzset")).unwrap();
        assert_eq!(lines[ctikzset + 1], "\\usetikzlibrary{calc}");
    }
}
