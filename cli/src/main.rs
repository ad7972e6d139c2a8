//! canondoc CLI - canonical document rendering tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use canondoc::render::{self, RenderStats};
use canondoc::{Canondoc, JsonFormat, OutputFormat};

#[derive(Parser)]
#[command(name = "canondoc")]
#[command(version)]
#[command(about = "Render canonical JSON documents to Markdown, HTML, text, and slides", long_about = None)]
struct Cli {
    /// Input canonical JSON file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render documents to every format
    Convert {
        /// Input canonical JSON files
        #[arg(value_name = "FILE", required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// Render a document to Markdown
    #[command(alias = "md")]
    Markdown {
        /// Input canonical JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Include YAML frontmatter
        #[arg(short, long)]
        frontmatter: bool,

        /// Marker for unordered list items
        #[arg(long, default_value = "-")]
        list_marker: char,

        /// Maximum heading level (1-6)
        #[arg(long, default_value = "6")]
        max_heading: u8,
    },

    /// Render a document to an HTML fragment
    Html {
        /// Input canonical JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Emit text without escaping HTML special characters
        #[arg(long)]
        no_escape: bool,
    },

    /// Render a document to slide descriptors
    #[command(alias = "pptx")]
    Slides {
        /// Input canonical JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Render a document to plain text
    Text {
        /// Input canonical JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Validate and normalize a document
    Json {
        /// Input canonical JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show document information
    Info {
        /// Input canonical JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print statistics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Convert { inputs, output }) => cmd_convert(&inputs, output.as_deref()),
        Some(Commands::Markdown {
            input,
            output,
            frontmatter,
            list_marker,
            max_heading,
        }) => cmd_markdown(
            &input,
            output.as_deref(),
            frontmatter,
            list_marker,
            max_heading,
        ),
        Some(Commands::Html {
            input,
            output,
            no_escape,
        }) => cmd_html(&input, output.as_deref(), no_escape),
        Some(Commands::Slides {
            input,
            output,
            compact,
        }) => cmd_slides(&input, output.as_deref(), compact),
        Some(Commands::Text { input, output }) => cmd_text(&input, output.as_deref()),
        Some(Commands::Json {
            input,
            output,
            compact,
        }) => cmd_json(&input, output.as_deref(), compact),
        Some(Commands::Info { input, json }) => cmd_info(&input, json),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert if input is provided
            if let Some(input) = cli.input {
                cmd_convert(&[input], cli.output.as_deref())
            } else {
                println!("{}", "Usage: canondoc <FILE> [OUTPUT]".yellow());
                println!("       canondoc --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Write to `output` if given, otherwise print to stdout.
fn emit(content: &str, input: &Path, output: Option<&Path>) -> CliResult {
    if let Some(path) = output {
        refuse_input_overwrite(path, &[input.to_path_buf()])?;
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

/// Fail if `target` already exists and is one of `inputs`.
fn refuse_input_overwrite(target: &Path, inputs: &[PathBuf]) -> CliResult {
    let Ok(target) = fs::canonicalize(target) else {
        return Ok(());
    };
    for input in inputs {
        if fs::canonicalize(input).is_ok_and(|input| input == target) {
            return Err(format!("refusing to overwrite input {}", input.display()).into());
        }
    }
    Ok(())
}

/// File stem of `input`, used to name converted outputs.
fn output_stem(input: &Path) -> String {
    input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "document".to_string())
}

fn cmd_convert(inputs: &[PathBuf], output: Option<&Path>) -> CliResult {
    let output_dir = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("canondoc_output"));

    fs::create_dir_all(&output_dir)?;

    // Check every target up front so a refused run writes nothing.
    for input in inputs {
        let stem = output_stem(input);
        for format in OutputFormat::ALL {
            let target = output_dir.join(format!("{}.{}", stem, format.extension()));
            refuse_input_overwrite(&target, inputs)?;
        }
    }

    let steps = inputs.len() * OutputFormat::ALL.len();
    let pb = ProgressBar::new(steps as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let mut written = Vec::new();
    let mut totals = RenderStats::default();
    for input in inputs {
        pb.set_message(format!("Loading {}", input.display()));
        let result = Canondoc::new().with_frontmatter().parse_file(input)?;
        let stem = output_stem(input);

        let mut stats = RenderStats::collect(result.document());
        stats.count_text(&result.to_text());
        totals.merge(&stats);

        for format in OutputFormat::ALL {
            pb.set_message(format!("Rendering {} as {}", stem, format));
            let content = result.render(format)?;
            let filename = format!("{}.{}", stem, format.extension());
            fs::write(output_dir.join(&filename), &content)?;
            written.push((filename, format.mime_type()));
            pb.inc(1);
        }
    }

    pb.finish_with_message("Done!");

    println!("\n{} {}", "Output files in".green().bold(), output_dir.display());
    let last = written.len().saturating_sub(1);
    for (i, (filename, mime)) in written.iter().enumerate() {
        let branch = if i == last { "└─" } else { "├─" };
        println!("  {} {} {}", branch.dimmed(), filename, format!("({})", mime).dimmed());
    }
    println!(
        "{} document(s): {} sections, {} words",
        inputs.len(),
        totals.section_count,
        totals.word_count
    );

    Ok(())
}

fn cmd_markdown(
    input: &Path,
    output: Option<&Path>,
    frontmatter: bool,
    list_marker: char,
    max_heading: u8,
) -> CliResult {
    let mut builder = Canondoc::new()
        .with_list_marker(list_marker)
        .with_max_heading(max_heading);
    if frontmatter {
        builder = builder.with_frontmatter();
    }

    let markdown = builder.parse_file(input)?.to_markdown();
    emit(&markdown, input, output)
}

fn cmd_html(input: &Path, output: Option<&Path>, no_escape: bool) -> CliResult {
    let html = Canondoc::new()
        .with_html_escaping(!no_escape)
        .parse_file(input)?
        .to_html();
    emit(&html, input, output)
}

fn cmd_slides(input: &Path, output: Option<&Path>, compact: bool) -> CliResult {
    let slides = Canondoc::new().parse_file(input)?.to_slides();
    let json = render::slides_to_json(&slides, json_format(compact))?;
    emit(&json, input, output)
}

fn cmd_text(input: &Path, output: Option<&Path>) -> CliResult {
    let text = Canondoc::new().parse_file(input)?.to_text();
    emit(&text, input, output)
}

fn cmd_json(input: &Path, output: Option<&Path>, compact: bool) -> CliResult {
    let json = Canondoc::new()
        .parse_file(input)?
        .to_json(json_format(compact))?;
    emit(&json, input, output)
}

fn json_format(compact: bool) -> JsonFormat {
    if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    }
}

fn cmd_info(input: &Path, as_json: bool) -> CliResult {
    let result = Canondoc::new().parse_file(input)?;
    let doc = result.document();

    let mut stats = RenderStats::collect(doc);
    stats.count_text(&result.to_text());

    if as_json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Schema".bold(), doc.version);

    let meta = &doc.metadata;
    if let Some(ref title) = meta.title {
        println!("{}: {}", "Title".bold(), title);
    }
    if let Some(ref author) = meta.author {
        println!("{}: {}", "Author".bold(), author);
    }
    if let Some(ref source) = meta.source_url {
        println!("{}: {}", "Source".bold(), source);
    }
    if let Some(scraped) = meta.scraped_at() {
        println!("{}: {}", "Scraped".bold(), scraped.to_rfc3339());
    }
    if let Some(published) = meta.published_at() {
        println!("{}: {}", "Published".bold(), published.to_rfc3339());
    }

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Sections".bold(), stats.section_count);
    println!("{}: {}", "Headings".bold(), stats.heading_count);
    println!("{}: {}", "Paragraphs".bold(), stats.paragraph_count);
    println!(
        "{}: {} ({} items)",
        "Lists".bold(),
        stats.list_count,
        stats.list_item_count
    );
    println!("{}: {}", "Tables".bold(), stats.table_count);
    println!("{}: {}", "Images".bold(), stats.image_count);
    if stats.unresolved_image_count > 0 {
        println!(
            "{}: {}",
            "Unresolved images".yellow(),
            stats.unresolved_image_count
        );
    }
    if stats.skipped_block_count > 0 {
        println!(
            "{}: {}",
            "Skipped blocks".yellow(),
            stats.skipped_block_count
        );
    }
    println!("{}: {}", "Words".bold(), stats.word_count);
    println!("{}: {}", "Characters".bold(), stats.char_count);
    println!("{}: {}", "Slides".bold(), result.to_slides().len());

    if !doc.image_resources.is_empty() {
        println!();
        println!("{}", "Image Resources".cyan().bold());
        println!("{}", "─".repeat(40).dimmed());
        for image in &doc.image_resources {
            let location = if image.is_data_uri() {
                "inline data URI"
            } else {
                image.display_url()
            };
            println!(
                "{} [{}] {}",
                image.id.bold(),
                image.extension().unwrap_or("?"),
                location
            );
        }
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "canondoc".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Canonical document rendering tool");
    println!();
    println!(
        "Formats: {}",
        OutputFormat::ALL
            .iter()
            .map(|f| format!("{} ({})", f.name(), f.mime_type()))
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!("License: MIT");
}
