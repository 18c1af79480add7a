//! External compiler and rasterizer invocation.
//!
//! [`Toolchain`] is the seam between rendering logic and the subprocesses it
//! drives. [`LatexToolchain`] runs a TeX engine to produce a PDF, then
//! `pdftocairo` to convert it into the final image.

use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use crate::error::{RenderError, diagnostic_tail};
use crate::theme::ImageFormat;

/// The two external steps of a diagram render.
pub trait Toolchain {
    /// Compile the LaTeX file `tex` inside `work_dir`, returning the PDF path.
    fn compile(&self, tex: &Path, work_dir: &Path) -> Result<PathBuf, RenderError>;

    /// Convert `pdf` into `output` using the given image format.
    fn rasterize(&self, pdf: &Path, output: &Path, format: ImageFormat)
    -> Result<(), RenderError>;
}

/// Subprocess-backed toolchain (`lualatex` + `pdftocairo` by default).
#[derive(Debug, Clone)]
pub struct LatexToolchain {
    compiler: String,
    compiler_args: Vec<String>,
    rasterizer: String,
}

impl Default for LatexToolchain {
    fn default() -> Self {
        Self {
            compiler: "lualatex".to_owned(),
            compiler_args: Vec::new(),
            rasterizer: "pdftocairo".to_owned(),
        }
    }
}

impl LatexToolchain {
    /// Create a toolchain with the given compiler and rasterizer programs.
    #[must_use]
    pub fn new(compiler: impl Into<String>, rasterizer: impl Into<String>) -> Self {
        Self {
            compiler: compiler.into(),
            compiler_args: Vec::new(),
            rasterizer: rasterizer.into(),
        }
    }

    /// Extra compiler arguments, passed before the input file.
    #[must_use]
    pub fn compiler_args(mut self, args: &[String]) -> Self {
        self.compiler_args = args.to_vec();
        self
    }

    fn run(program: &str, command: &mut Command) -> Result<Output, RenderError> {
        tracing::debug!(program, "running {command:?}");
        command
            .stdin(Stdio::null())
            .output()
            .map_err(|source| RenderError::Spawn {
                program: program.to_owned(),
                source,
            })
    }
}

impl Toolchain for LatexToolchain {
    fn compile(&self, tex: &Path, work_dir: &Path) -> Result<PathBuf, RenderError> {
        let output = Self::run(
            &self.compiler,
            Command::new(&self.compiler)
                .arg("-halt-on-error")
                .arg("-interaction=nonstopmode")
                .arg("-output-directory")
                .arg(work_dir)
                .args(&self.compiler_args)
                .arg(tex)
                .current_dir(work_dir),
        )?;

        if !output.status.success() {
            return Err(RenderError::Compile {
                status: output.status.to_string(),
                output: diagnostic_tail(&output.stderr, &output.stdout),
            });
        }

        let pdf = work_dir.join(tex.with_extension("pdf").file_name().unwrap_or_default());
        if !pdf.exists() {
            return Err(RenderError::MissingOutput(pdf));
        }
        Ok(pdf)
    }

    fn rasterize(
        &self,
        pdf: &Path,
        output: &Path,
        format: ImageFormat,
    ) -> Result<(), RenderError> {
        let result = Self::run(
            &self.rasterizer,
            Command::new(&self.rasterizer)
                .arg(format.rasterizer_flag())
                .arg(pdf)
                .arg(output),
        )?;

        if !result.status.success() {
            return Err(RenderError::Rasterize {
                status: result.status.to_string(),
                output: diagnostic_tail(&result.stderr, &result.stdout),
            });
        }
        if !output.exists() {
            return Err(RenderError::MissingOutput(output.to_path_buf()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_compiler_is_spawn_error() {
        let tmp = tempfile::tempdir().unwrap();
        let toolchain = LatexToolchain::new("duo-no-such-compiler", "pdftocairo");
        let tex = tmp.path().join("diagram.tex");
        std::fs::write(&tex, "").unwrap();

        let err = toolchain.compile(&tex, tmp.path()).unwrap_err();

        assert!(matches!(err, RenderError::Spawn { ref program, .. } if program == "duo-no-such-compiler"));
    }

    #[test]
    fn test_missing_rasterizer_is_spawn_error() {
        let tmp = tempfile::tempdir().unwrap();
        let toolchain = LatexToolchain::new("lualatex", "duo-no-such-rasterizer");

        let err = toolchain
            .rasterize(
                &tmp.path().join("in.pdf"),
                &tmp.path().join("out.svg"),
                ImageFormat::Svg,
            )
            .unwrap_err();

        assert!(matches!(err, RenderError::Spawn { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_compiler_reports_output_tail() {
        let tmp = tempfile::tempdir().unwrap();
        // `false` ignores its arguments and exits 1
        let toolchain = LatexToolchain::new("false", "pdftocairo");
        let tex = tmp.path().join("diagram.tex");
        std::fs::write(&tex, "").unwrap();

        let err = toolchain.compile(&tex, tmp.path()).unwrap_err();

        assert!(matches!(err, RenderError::Compile { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_successful_compiler_without_pdf_is_missing_output() {
        let tmp = tempfile::tempdir().unwrap();
        // `true` exits 0 but writes nothing
        let toolchain = LatexToolchain::new("true", "pdftocairo");
        let tex = tmp.path().join("diagram.tex");
        std::fs::write(&tex, "").unwrap();

        let err = toolchain.compile(&tex, tmp.path()).unwrap_err();

        assert!(matches!(err, RenderError::MissingOutput(ref p) if p.ends_with("diagram.pdf")));
    }
}
