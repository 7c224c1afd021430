//! pdf2word CLI - PDF to editable Word document converter

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdf2word::{
    output_file_name, Converter, FontScale, JsonFormat, LayoutOptions, LopdfProvider, OutputFormat,
    PipelineOptions, TextRunProvider,
};

#[derive(Parser)]
#[command(name = "pdf2word")]
#[command(version)]
#[command(about = "Convert PDF files to editable Word documents", long_about = None)]
struct Cli {
    /// Input PDF file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    #[command(flatten)]
    convert: ConvertArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a PDF to a Word document (default)
    Convert {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        args: ConvertArgs,
    },

    /// Show document information
    Info {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print metadata as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

#[derive(Args, Clone, Default)]
struct ConvertArgs {
    /// Output file (defaults to the input name with a .doc extension)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Write the document model as JSON instead of a Word document
    #[arg(long)]
    json: bool,

    /// Output compact JSON
    #[arg(long, requires = "json")]
    compact: bool,

    /// Fail on the first page that cannot be extracted
    #[arg(long)]
    strict: bool,

    /// Process pages one at a time
    #[arg(long)]
    sequential: bool,

    /// Maximum baseline distance for runs on the same line
    #[arg(long, value_name = "PT")]
    y_tolerance: Option<f32>,

    /// Centering threshold as a fraction of page width
    #[arg(long, value_name = "FRACTION")]
    center_threshold: Option<f32>,

    /// Font size multiplier
    #[arg(long, value_name = "FACTOR")]
    font_scale: Option<f32>,

    /// Smallest output font size, in half-points
    #[arg(long, value_name = "HALF_POINTS")]
    min_font_size: Option<f32>,

    /// Print the extracted text after converting
    #[arg(long)]
    preview: bool,
}

impl ConvertArgs {
    fn layout_options(&self) -> LayoutOptions {
        let defaults = FontScale::default();
        let font_scale = FontScale::calibrated(self.font_scale.unwrap_or(defaults.factor))
            .with_min_size(self.min_font_size.unwrap_or(defaults.min_size));

        let mut layout = LayoutOptions::new().with_font_scale(font_scale);
        if let Some(tolerance) = self.y_tolerance {
            layout = layout.with_y_tolerance(tolerance);
        }
        if let Some(threshold) = self.center_threshold {
            layout = layout.with_center_threshold(threshold);
        }
        layout
    }

    fn converter(&self) -> Converter {
        let options = PipelineOptions::new()
            .with_layout(self.layout_options())
            .with_parallel(!self.sequential);
        let options = if self.strict { options.strict() } else { options };

        let format = if self.json {
            OutputFormat::Json(if self.compact {
                JsonFormat::Compact
            } else {
                JsonFormat::Pretty
            })
        } else {
            OutputFormat::WordHtml
        };

        Converter::new().with_options(options).with_format(format)
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Convert { input, args }) => cmd_convert(&input, &args),
        Some(Commands::Info { input, json }) => cmd_info(&input, json),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert if input is provided
            if let Some(input) = cli.input {
                cmd_convert(&input, &cli.convert)
            } else {
                println!("{}", "Usage: pdf2word <FILE> [-o OUTPUT]".yellow());
                println!("       pdf2word --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Output path next to the input: `report.pdf` becomes `report.doc`.
fn default_output_path(input: &Path, json: bool) -> PathBuf {
    if json {
        return input.with_extension("json");
    }
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    input.with_file_name(output_file_name(&name))
}

fn cmd_convert(input: &Path, args: &ConvertArgs) -> Result<(), Box<dyn std::error::Error>> {
    let data = fs::read(input)?;
    let converter = args.converter();

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );
    pb.set_message("Converting pages...");

    let report = |_page: u32, total: u32| {
        pb.set_length(u64::from(total));
        pb.inc(1);
    };
    let result = match converter.convert_bytes_with_progress(&data, &report) {
        Ok(result) => result,
        Err(e) => {
            pb.abandon();
            return Err(e.into());
        }
    };
    pb.finish_with_message("Done!");

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(input, args.json));
    result.write_to(&output)?;
    log::debug!("Wrote {} bytes ({})", result.bytes.len(), result.mime_type);

    let doc = &result.document;
    println!(
        "\n{} {} ({} pages, {} paragraphs)",
        "Saved to".green().bold(),
        output.display(),
        doc.page_count(),
        doc.paragraph_count()
    );

    if args.preview {
        println!();
        println!("{}", "Preview".cyan().bold());
        println!("{}", "─".repeat(40).dimmed());
        println!("{}", result.plain_text());
    }

    Ok(())
}

fn cmd_info(input: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let provider = LopdfProvider::open(input)?;
    let result = Converter::new().convert_provider(&provider)?;
    let doc = &result.document;

    if json {
        println!("{}", serde_json::to_string_pretty(&doc.metadata)?);
        return Ok(());
    }

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: PDF {}", "Format".bold(), provider.version());
    println!("{}: {}", "Pages".bold(), provider.page_count());

    if let Some(ref title) = doc.metadata.title {
        println!("{}: {}", "Title".bold(), title);
    }
    if let Some(ref created) = doc.metadata.created {
        println!("{}: {}", "Created".bold(), created);
    }

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let text = doc.plain_text();
    println!("{}: {}", "Paragraphs".bold(), doc.paragraph_count());
    println!("{}: {}", "Page breaks".bold(), doc.page_break_count());
    println!("{}: {}", "Words".bold(), text.split_whitespace().count());
    println!("{}: {}", "Characters".bold(), text.chars().count());

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "pdf2word".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF to editable Word document converter");
    println!();
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Path::new("dir/report.pdf"), false),
            PathBuf::from("dir/report.doc")
        );
        assert_eq!(
            default_output_path(Path::new("dir/report.pdf"), true),
            PathBuf::from("dir/report.json")
        );
    }

    #[test]
    fn test_parse_default_convert() {
        let cli = Cli::try_parse_from([
            "pdf2word",
            "in.pdf",
            "--strict",
            "--y-tolerance",
            "3",
        ])
        .unwrap();
        assert_eq!(cli.input, Some(PathBuf::from("in.pdf")));
        assert!(cli.convert.strict);

        let converter = cli.convert.converter();
        assert_eq!(converter.options().layout.y_tolerance, 3.0);
        assert_eq!(
            converter.options().error_mode,
            pdf2word::ErrorMode::Strict
        );
    }

    #[test]
    fn test_parse_info_subcommand() {
        let cli = Cli::try_parse_from(["pdf2word", "info", "in.pdf"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Info { json: false, .. })));
    }

    #[test]
    fn test_layout_options_from_flags() {
        let args = ConvertArgs {
            font_scale: Some(2.0),
            min_font_size: Some(10.0),
            center_threshold: Some(0.2),
            ..Default::default()
        };
        let layout = args.layout_options();
        assert_eq!(layout.font_scale.factor, 2.0);
        assert_eq!(layout.font_scale.min_size, 10.0);
        assert_eq!(layout.center_threshold, 0.2);
        assert_eq!(layout.y_tolerance, 5.0);
    }
}
