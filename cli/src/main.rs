//! pmwiki2md CLI - PmWiki to Markdown migration tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pmwiki2md::batch::{convert_directory_with_progress, list_input_files};
use pmwiki2md::render::{render_page, to_json};
use pmwiki2md::{
    convert_file, detect_format_from_path, parse_file, to_markdown, CleanupPreset,
    ConvertOptions, JsonFormat, WriteOptions,
};

/// Default output directory when none is given.
const DEFAULT_OUTPUT_DIR: &str = "markdown";

#[derive(Parser)]
#[command(name = "pmwiki2md")]
#[command(version)]
#[command(about = "Migrate PmWiki page records to Markdown", long_about = None)]
struct Cli {
    /// Input page record file or wiki.d directory
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Rewrite png/jpg/gif image references to webp
    #[arg(long, global = true, env = "PMWIKI2MD_WEBP")]
    webp: bool,

    /// Post-processing preset
    #[arg(long, global = true, value_enum)]
    cleanup: Option<CleanupLevel>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a page record or a whole wiki.d directory into per-site files
    Convert {
        /// Input page record file or directory
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Omit YAML frontmatter
        #[arg(long)]
        no_frontmatter: bool,

        /// Output file extension
        #[arg(long, default_value = "md")]
        extension: String,
    },

    /// Convert a single page record to Markdown
    #[command(alias = "md")]
    Markdown {
        /// Input page record file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Include YAML frontmatter
        #[arg(short, long)]
        frontmatter: bool,
    },

    /// Show page record information
    Info {
        /// Input page record file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum CleanupLevel {
    /// Unicode normalization only, no reflow
    Minimal,
    /// Whitespace trim and paragraph reflow (default)
    Standard,
}

impl From<CleanupLevel> for CleanupPreset {
    fn from(level: CleanupLevel) -> Self {
        match level {
            CleanupLevel::Minimal => CleanupPreset::Minimal,
            CleanupLevel::Standard => CleanupPreset::Standard,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let options = convert_options(cli.webp, cli.cleanup);
    log::debug!("Conversion options: {:?}", options);

    let result = match cli.command {
        Some(Commands::Convert {
            input,
            output,
            no_frontmatter,
            extension,
        }) => {
            let write_options = WriteOptions::new()
                .with_frontmatter(!no_frontmatter)
                .with_extension(extension);
            cmd_convert(&input, output.as_deref(), &options, &write_options)
        }
        Some(Commands::Markdown {
            input,
            output,
            frontmatter,
        }) => cmd_markdown(&input, output.as_deref(), frontmatter, &options),
        Some(Commands::Info { input, json }) => cmd_info(&input, json, &options),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert if input is provided
            if let Some(input) = cli.input {
                cmd_convert(
                    &input,
                    cli.output.as_deref(),
                    &options,
                    &WriteOptions::default(),
                )
            } else {
                println!("{}", "Usage: pmwiki2md <INPUT> [OUTPUT]".yellow());
                println!("       pmwiki2md --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn convert_options(webp: bool, cleanup: Option<CleanupLevel>) -> ConvertOptions {
    let mut options = ConvertOptions::new().with_webp_images(webp);
    if let Some(level) = cleanup {
        options = options.with_cleanup_preset(level.into());
    }
    options
}

fn cmd_convert(
    input: &Path,
    output: Option<&Path>,
    options: &ConvertOptions,
    write_options: &WriteOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

    if !input.is_dir() {
        let path = convert_file(input, &output_dir, options, write_options)?;
        println!("{} {}", "Saved to".green(), path.display());
        return Ok(());
    }

    let total = list_input_files(input)?.len() as u64;
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );
    pb.set_message("Converting pages...");

    let report = convert_directory_with_progress(input, &output_dir, options, write_options, |_| {
        pb.inc(1)
    })?;
    pb.finish_with_message("Done!");

    println!("\n{}", "Summary:".green().bold());
    println!(
        "  {} {} converted",
        "├─".dimmed(),
        report.converted.len().to_string().green()
    );
    println!(
        "  {} {} skipped",
        "├─".dimmed(),
        report.skipped.len().to_string().yellow()
    );
    println!(
        "  {} {} failed",
        "└─".dimmed(),
        report.failed.len().to_string().red()
    );

    for (path, message) in &report.failed {
        eprintln!("{} {}: {}", "Failed".red(), path.display(), message);
    }
    println!("{} {}", "Output:".bold(), output_dir.display());

    Ok(())
}

fn cmd_markdown(
    input: &Path,
    output: Option<&Path>,
    frontmatter: bool,
    options: &ConvertOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let record = parse_file(input)?;

    let markdown = if frontmatter {
        render_page(&record, options, &WriteOptions::default())
    } else {
        to_markdown(&record.body, options)
    };

    if let Some(path) = output {
        fs::write(path, &markdown)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", markdown);
    }

    Ok(())
}

fn cmd_info(
    input: &Path,
    json: bool,
    options: &ConvertOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let format = detect_format_from_path(input)?;
    let record = parse_file(input)?;
    let markdown = to_markdown(&record.body, options);

    let words = markdown.split_whitespace().count();
    let lines = markdown.lines().count();

    if json {
        let metadata: serde_json::Value = serde_json::from_str(&to_json(
            &record.metadata,
            JsonFormat::Compact,
        )?)?;
        let info = serde_json::json!({
            "file": input.display().to_string(),
            "version": format.version,
            "urlencoded": format.urlencoded,
            "metadata": metadata,
            "words": words,
            "lines": lines,
        });
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    let metadata = &record.metadata;
    println!("{}", "Page Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Format".bold(), format);
    println!("{}: {}", "Name".bold(), metadata.name);
    println!("{}: {}", "Site".bold(), metadata.site);
    println!("{}: {}", "Title".bold(), metadata.title);

    if let Some(ref author) = metadata.author {
        println!("{}: {}", "Author".bold(), author);
    }
    if let Some(ref created) = metadata.created {
        println!("{}: {}", "Created".bold(), created);
    }
    if let Some(ref updated) = metadata.updated {
        println!("{}: {}", "Updated".bold(), updated);
    }

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Words".bold(), words);
    println!("{}: {}", "Lines".bold(), lines);
    println!("{}: {}", "Characters".bold(), markdown.chars().count());

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "pmwiki2md".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PmWiki to Markdown migration tool");
    println!();
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECORD: &str = "version=pmwiki-2.2.130 ordered=1 urlencoded=1\n\
        name=Main.HomePage\n\
        text=!Welcome%0aHello\n";

    #[test]
    fn test_cli_parses_default_form() {
        let cli = Cli::try_parse_from(["pmwiki2md", "wiki.d", "out", "--webp"]).unwrap();
        assert_eq!(cli.input, Some(PathBuf::from("wiki.d")));
        assert_eq!(cli.output, Some(PathBuf::from("out")));
        assert!(cli.webp);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_parses_info_json() {
        let cli = Cli::try_parse_from(["pmwiki2md", "info", "Main.HomePage", "--json"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Info { json: true, .. })));
    }

    #[test]
    fn test_convert_options_from_flags() {
        let options = convert_options(true, Some(CleanupLevel::Minimal));
        assert!(options.prefer_webp_images);
        assert!(!options.cleanup.paragraph_breaks);
    }

    #[test]
    fn test_cmd_markdown_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("Main.HomePage");
        let output = dir.path().join("home.md");
        fs::write(&input, RECORD).unwrap();

        cmd_markdown(&input, Some(&output), false, &ConvertOptions::default()).unwrap();
        assert_eq!(fs::read_to_string(output).unwrap(), "# Welcome\nHello");
    }

    #[test]
    fn test_cmd_convert_directory() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("wiki.d");
        let output = dir.path().join("out");
        fs::create_dir(&input).unwrap();
        fs::write(input.join("Main.HomePage"), RECORD).unwrap();

        cmd_convert(
            &input,
            Some(&output),
            &ConvertOptions::default(),
            &WriteOptions::default(),
        )
        .unwrap();
        assert!(output.join("Main").join("HomePage.md").exists());
    }
}
