//! `mdlive render` command implementation.

use std::fmt::Write as _;
use std::io::Write as _;
use std::path::PathBuf;

use clap::{Args, ValueEnum};
use mdlive_config::{CliSettings, Config, OutputFormat};
use mdlive_renderer::{MarkdownParser, ParserConfig, escape_html};

use super::read_input;
use crate::error::CliError;
use crate::output::Output;

/// Output format accepted on the command line.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub(crate) enum FormatArg {
    /// Bare HTML fragment.
    Fragment,
    /// Minimal HTML5 page around the fragment.
    Document,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Fragment => Self::Fragment,
            FormatArg::Document => Self::Document,
        }
    }
}

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Markdown file to render (default: stdin).
    file: Option<PathBuf>,

    /// Write HTML to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover mdlive.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Skip HTML sanitization.
    #[arg(long)]
    no_sanitize: bool,

    /// Output format (overrides config).
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// Page title for the document format (overrides config).
    #[arg(long)]
    title: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or input/output cannot be
    /// read or written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            sanitize_html: self.no_sanitize.then_some(false),
            format: self.format.map(OutputFormat::from),
            title: self.title,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        if let Some(path) = &config.config_path {
            tracing::info!(path = %path.display(), "Loaded configuration");
        }

        let markdown = read_input(self.file.as_deref())?;
        let parser = MarkdownParser::with_default_sanitizer(parser_config(&config));
        tracing::debug!(
            sanitize_html = parser.config().sanitize_html,
            allowed_tags = parser.config().allowed_tags.len(),
            "Created parser"
        );
        let html = render(&parser, &markdown, &config);

        match &self.output {
            Some(path) => {
                std::fs::write(path, &html)?;
                Output::new().success(&format!("Wrote {}", path.display()));
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(html.as_bytes())?;
                stdout.write_all(b"\n")?;
            }
        }
        Ok(())
    }
}

/// Build the renderer configuration from the loaded config.
fn parser_config(config: &Config) -> ParserConfig {
    let defaults = ParserConfig::default();
    ParserConfig {
        sanitize_html: config.parser.sanitize_html,
        allowed_tags: config
            .parser
            .allowed_tags
            .clone()
            .unwrap_or(defaults.allowed_tags),
    }
}

/// Render markdown and apply the configured output format.
fn render(parser: &MarkdownParser, markdown: &str, config: &Config) -> String {
    let fragment = parser.parse(markdown);
    match config.output.format {
        OutputFormat::Fragment => fragment,
        OutputFormat::Document => wrap_document(&fragment, &config.output.title),
    }
}

/// Wrap an HTML fragment in a minimal HTML5 page.
fn wrap_document(fragment: &str, title: &str) -> String {
    let mut page = String::with_capacity(fragment.len() + 128);
    page.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    writeln!(page, "<title>{}</title>", escape_html(title)).unwrap();
    page.push_str("</head>\n<body>\n");
    if !fragment.is_empty() {
        page.push_str(fragment);
        page.push('\n');
    }
    page.push_str("</body>\n</html>");
    page
}
