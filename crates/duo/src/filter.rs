//! Filter run: read a Pandoc document, rewrite it, write it back.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::PathBuf;

use clap::{Args, ValueEnum};
use duo_ast::Document;
use duo_config::{CliSettings, Config, RenderFormat};
use duo_diagrams::{
    DiagramRenderer, DocumentTemplate, ImageFormat, LatexToolchain, MediaCache, Toolchain,
};
use duo_filter::DiagramFilter;

use crate::error::CliError;
use crate::output::Output;

/// Image format accepted on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub(crate) enum FormatArg {
    Auto,
    Svg,
    Pdf,
}

impl From<FormatArg> for RenderFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Auto => Self::Auto,
            FormatArg::Svg => Self::Svg,
            FormatArg::Pdf => Self::Pdf,
        }
    }
}

/// Arguments of a filter run.
#[derive(Args)]
pub(crate) struct FilterArgs {
    /// Pandoc output format, passed by pandoc as the first argument.
    target: Option<String>,

    /// Read the document from a file instead of stdin.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Write the document to a file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover duo.toml).
    #[arg(short, long, env = "DUO_CONFIG")]
    config: Option<PathBuf>,

    /// Directory for rendered images (overrides config).
    #[arg(long, env = "DUO_MEDIA_DIR")]
    media_dir: Option<PathBuf>,

    /// Image format (overrides config).
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// LaTeX compiler program (overrides config).
    #[arg(long)]
    compiler: Option<String>,

    /// PDF rasterizer program (overrides config).
    #[arg(long)]
    rasterizer: Option<String>,

    /// Enable verbose output (log every rendered image).
    #[arg(short, long)]
    pub verbose: bool,
}

impl FilterArgs {
    /// Execute the filter.
    ///
    /// Render failures are reported as warnings and do not fail the run.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the document cannot be
    /// read or written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            media_dir: self.media_dir,
            format: self.format.map(RenderFormat::from),
            compiler: self.compiler,
            rasterizer: self.rasterizer,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let format = image_format(config.render.format, self.target.as_deref());
        tracing::debug!(?format, media_dir = %config.media_resolved.dir.display(), "starting");

        let toolchain =
            LatexToolchain::new(&config.toolchain.compiler, &config.toolchain.rasterizer)
                .compiler_args(&config.toolchain.compiler_args);
        let mut filter = build_filter(&config, toolchain, format);

        let reader: Box<dyn Read> = match &self.input {
            Some(path) => Box::new(BufReader::new(File::open(path)?)),
            None => Box::new(io::stdin().lock()),
        };
        let writer: Box<dyn Write> = match &self.output {
            Some(path) => Box::new(BufWriter::new(File::create(path)?)),
            None => Box::new(BufWriter::new(io::stdout().lock())),
        };

        run(&mut filter, reader, writer)?;

        for line in warning_lines(filter.warnings()) {
            output.warning(&line);
        }
        Ok(())
    }
}

/// Stderr lines for render failures, one per failed diagram.
fn warning_lines(warnings: &[String]) -> Vec<String> {
    warnings.iter().map(|warning| format!("Warning: {warning}")).collect()
}

/// Resolve the configured format against the Pandoc target.
fn image_format(format: RenderFormat, target: Option<&str>) -> ImageFormat {
    match format {
        RenderFormat::Svg => ImageFormat::Svg,
        RenderFormat::Pdf => ImageFormat::Pdf,
        RenderFormat::Auto => target.map_or_else(ImageFormat::default, ImageFormat::for_target),
    }
}

fn build_filter<T: Toolchain>(
    config: &Config,
    toolchain: T,
    format: ImageFormat,
) -> DiagramFilter<T> {
    let renderer = DiagramRenderer::new(toolchain)
        .format(format)
        .template(DocumentTemplate::new().with_preamble(config.template.preamble.as_str()));
    let cache = MediaCache::new(
        renderer,
        config.media_resolved.dir.clone(),
        config.media_resolved.link_prefix.clone(),
    );
    DiagramFilter::new(cache)
}

fn run<T: Toolchain>(
    filter: &mut DiagramFilter<T>,
    reader: impl Read,
    mut writer: impl Write,
) -> Result<(), CliError> {
    let document = Document::from_reader(reader)?;
    let document = filter.apply(document);
    document.to_writer(&mut writer)?;
    writer.flush()?;
    Ok(())
}
