//! Render error types.

use std::fmt::Write as _;
use std::path::PathBuf;

use crate::consts::DIAGNOSTIC_TAIL_CHARS;
use crate::theme::Theme;

/// Single render attempt error.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The LaTeX compiler exited with a non-zero status.
    #[error("compile error ({status}):\n{output}")]
    Compile {
        /// Exit status as reported by the OS.
        status: String,
        /// Trailing portion of the compiler's diagnostic output.
        output: String,
    },
    /// The rasterizer exited with a non-zero status.
    #[error("rasterize error ({status}):\n{output}")]
    Rasterize {
        /// Exit status as reported by the OS.
        status: String,
        /// Trailing portion of the rasterizer's diagnostic output.
        output: String,
    },
    /// A tool reported success but its output file is missing.
    #[error("expected output {} was not produced", .0.display())]
    MissingOutput(PathBuf),
    /// A tool could not be started at all.
    #[error("failed to run {program}: {source}")]
    Spawn {
        /// Program name or path.
        program: String,
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
    },
    /// Filesystem error while preparing or persisting files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Every theme that failed for one diagram.
#[derive(Debug, thiserror::Error)]
#[error("failed to render {base_filename}: {}", summarize(.errors))]
pub struct RenderFailure {
    /// Base filename shared by both theme images.
    pub base_filename: String,
    /// Failed themes with their errors, in rendering order.
    pub errors: Vec<(Theme, RenderError)>,
}

fn summarize(errors: &[(Theme, RenderError)]) -> String {
    let mut out = String::new();
    for (i, (theme, error)) in errors.iter().enumerate() {
        if i > 0 {
            out.push_str("; ");
        }
        let _ = write!(out, "[{}] {error}", theme.name());
    }
    out
}

/// Keep the last `DIAGNOSTIC_TAIL_CHARS` characters of tool output.
///
/// Prefers stderr; falls back to stdout because TeX engines report
/// errors on stdout in non-interactive mode.
pub(crate) fn diagnostic_tail(stderr: &[u8], stdout: &[u8]) -> String {
    let stream = if stderr.iter().any(|b| !b.is_ascii_whitespace()) {
        stderr
    } else {
        stdout
    };
    let text = String::from_utf8_lossy(stream);
    let text = text.trim_end();
    let start = text
        .char_indices()
        .rev()
        .nth(DIAGNOSTIC_TAIL_CHARS - 1)
        .map_or(0, |(i, _)| i);
    text[start..].to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_tail_truncates() {
        let long = "x".repeat(1000) + "END";
        let tail = diagnostic_tail(long.as_bytes(), b"");
        assert_eq!(tail.chars().count(), DIAGNOSTIC_TAIL_CHARS);
        assert!(tail.ends_with("END"));
    }

    #[test]
    fn test_diagnostic_tail_short_output_kept() {
        assert_eq!(diagnostic_tail(b"! Missing $ inserted.\n", b""), "! Missing $ inserted.");
    }

    #[test]
    fn test_diagnostic_tail_falls_back_to_stdout() {
        assert_eq!(
            diagnostic_tail(b"  \n", b"! Undefined control sequence.\n"),
            "! Undefined control sequence."
        );
    }

    #[test]
    fn test_diagnostic_tail_multibyte_boundary() {
        let text = "é".repeat(500);
        let tail = diagnostic_tail(text.as_bytes(), b"");
        assert_eq!(tail.chars().count(), DIAGNOSTIC_TAIL_CHARS);
    }

    #[test]
    fn test_render_failure_message_lists_themes() {
        let failure = RenderFailure {
            base_filename: "1_0_1_abc".to_owned(),
            errors: vec![
                (
                    Theme::Black,
                    RenderError::Compile {
                        status: "exit status: 1".to_owned(),
                        output: "boom".to_owned(),
                    },
                ),
                (Theme::White, RenderError::MissingOutput(PathBuf::from("x.svg"))),
            ],
        };
        let msg = failure.to_string();
        assert!(msg.starts_with("failed to render 1_0_1_abc: [black] compile error"));
        assert!(msg.contains("; [white] expected output x.svg was not produced"));
    }
}
