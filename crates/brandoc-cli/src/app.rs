//! CLI Application logic
//!
//! Contains the command-line interface implementation.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use brandoc_ast::DocumentMeta;
use brandoc_ooxml::{embed_font_file, DocxWriter, PackageReport};

use crate::config::Settings;
use crate::job::RenderInput;

/// Output format for package inspection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable outline
    #[default]
    Text,
    /// JSON report
    Json,
}

#[derive(Parser)]
#[command(name = "brandoc")]
#[command(author, version, about = "Branded DOCX reports from markdown-like text", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render report text (or a JSON job file) to DOCX
    Render {
        /// Input text or job file
        input: PathBuf,

        /// Output DOCX file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Page header title
        #[arg(long)]
        title: Option<String>,

        /// Page footer recipient
        #[arg(long)]
        recipient: Option<String>,

        /// Display font to embed
        #[arg(long)]
        font: Option<PathBuf>,

        /// Skip font embedding
        #[arg(long)]
        no_embed: bool,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Embed the display font into an existing DOCX
    EmbedFont {
        /// DOCX file to patch in place
        package: PathBuf,

        /// TrueType font file
        #[arg(long)]
        font: PathBuf,
    },

    /// Print the outline and font status of a DOCX
    Inspect {
        /// DOCX file to read
        package: PathBuf,

        /// Output format (text or json)
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

/// Options for [`render_command`]
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub title: Option<String>,
    pub recipient: Option<String>,
    pub font: Option<PathBuf>,
    pub no_embed: bool,
    pub config: Option<PathBuf>,
}

/// Run the CLI application
///
/// Parses arguments, installs the log subscriber and dispatches to the
/// appropriate command.
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    match cli.command {
        Commands::Render {
            input,
            output,
            title,
            recipient,
            font,
            no_embed,
            config,
        } => {
            let options = RenderOptions {
                input,
                output,
                title,
                recipient,
                font,
                no_embed,
                config,
            };
            let path = render_command(&options)?;
            println!("Rendered: {}", path.display());
        }
        Commands::EmbedFont { package, font } => {
            embed_font_command(&package, &font)?;
        }
        Commands::Inspect { package, format } => {
            print!("{}", inspect_command(&package, format)?);
        }
    }

    Ok(())
}

/// Install the stderr log subscriber (`RUST_LOG` overrides the default level)
pub fn init_logging() {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(log_filter(directives.as_deref()))
        .with_writer(std::io::stderr)
        .try_init();
}

/// Filter from `RUST_LOG`-style directives, `info` when unset or invalid
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

/// Render an input file to a DOCX package and embed the display font.
///
/// Returns the path of the written package. A missing font only skips
/// embedding; read and write failures are errors.
pub fn render_command(options: &RenderOptions) -> Result<PathBuf> {
    let input_path = options.input.as_path();
    if !input_path.exists() {
        anyhow::bail!("Input file not found: {}", input_path.display());
    }
    let input_dir = input_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let settings = match &options.config {
        Some(path) => Settings::load(path)?,
        None => Settings::discover(input_dir)?,
    };
    let input = RenderInput::load(input_path)?;

    let meta = DocumentMeta::new(
        options
            .title
            .clone()
            .or(input.title)
            .or(settings.document.title)
            .unwrap_or_else(|| input.stem.clone()),
        options
            .recipient
            .clone()
            .or(input.recipient)
            .or(settings.document.recipient)
            .unwrap_or_default(),
    );

    let output_path = match &options.output {
        Some(path) => path.clone(),
        None => settings
            .output
            .dir
            .clone()
            .unwrap_or_else(|| input_dir.to_path_buf())
            .join(format!("{}.docx", input.stem)),
    };
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| {
            format!("Failed to create output directory: {}", parent.display())
        })?;
    }

    tracing::info!("Rendering {}", input_path.display());
    let doc = brandoc_core::render(&input.content);

    DocxWriter::new(meta)
        .write_to_path(&doc, &output_path)
        .with_context(|| format!("Failed to write DOCX: {}", output_path.display()))?;

    if options.no_embed || !settings.font.embed {
        tracing::info!("Font embedding disabled");
        return Ok(output_path);
    }

    let font_path = options.font.clone().unwrap_or(settings.font.path);
    let embedded = embed_font_file(&output_path, &font_path)
        .with_context(|| format!("Failed to embed font into {}", output_path.display()))?;
    if !embedded {
        tracing::warn!(
            "Display font unavailable ({}); package uses a substitute font",
            font_path.display()
        );
    }

    Ok(output_path)
}

/// Embed a font into an existing package
pub fn embed_font_command(package: &Path, font: &Path) -> Result<bool> {
    if !package.exists() {
        anyhow::bail!("Package not found: {}", package.display());
    }

    let embedded = embed_font_file(package, font)
        .with_context(|| format!("Failed to embed font into {}", package.display()))?;
    if embedded {
        println!("Embedded {} into {}", font.display(), package.display());
    } else {
        println!("Font not found: {} (package unchanged)", font.display());
    }
    Ok(embedded)
}

/// Describe a package's outline and font status
pub fn inspect_command(package: &Path, format: OutputFormat) -> Result<String> {
    let bytes = fs::read(package)
        .with_context(|| format!("Failed to read package: {}", package.display()))?;
    let report = PackageReport::from_bytes(&bytes)
        .with_context(|| format!("Failed to inspect package: {}", package.display()))?;

    match format {
        OutputFormat::Json => Ok(format!("{}\n", report.to_json()?)),
        OutputFormat::Text => {
            let mut out = String::new();
            out.push_str(&format!("{}\n", package.display()));
            out.push_str(&format!("  Parts: {}\n", report.parts));
            out.push_str(&format!(
                "  Font: {} (declared: {}, embedded: {})\n",
                report.font_family,
                yes_no(report.font_declared),
                yes_no(report.font_embedded)
            ));
            out.push_str("  Outline:\n");
            for item in &report.outline {
                out.push_str(&format!("    {}\n", item));
            }
            Ok(out)
        }
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_log_filter_levels() {
        use tracing::level_filters::LevelFilter;

        assert_eq!(log_filter(None).max_level_hint(), Some(LevelFilter::INFO));
        assert_eq!(log_filter(Some("")).max_level_hint(), Some(LevelFilter::INFO));
        assert_eq!(
            log_filter(Some("debug")).max_level_hint(),
            Some(LevelFilter::DEBUG)
        );
        assert_eq!(
            log_filter(Some("brandoc_ooxml=trace")).max_level_hint(),
            Some(LevelFilter::TRACE)
        );
    }

    #[test]
    fn test_parse_render_flags() {
        let cli = Cli::try_parse_from([
            "brandoc",
            "render",
            "report.md",
            "-o",
            "out.docx",
            "--title",
            "Audit",
            "--no-embed",
        ])
        .unwrap();
        match cli.command {
            Commands::Render {
                input,
                output,
                title,
                no_embed,
                ..
            } => {
                assert_eq!(input, PathBuf::from("report.md"));
                assert_eq!(output, Some(PathBuf::from("out.docx")));
                assert_eq!(title.as_deref(), Some("Audit"));
                assert!(no_embed);
            }
            _ => panic!("expected render"),
        }
    }

    #[test]
    fn test_parse_inspect_json() {
        let cli = Cli::try_parse_from(["brandoc", "inspect", "a.docx", "--format", "json"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Inspect {
                format: OutputFormat::Json,
                ..
            }
        ));
    }

    #[test]
    fn test_embed_font_requires_font() {
        assert!(Cli::try_parse_from(["brandoc", "embed-font", "a.docx"]).is_err());
    }
}
