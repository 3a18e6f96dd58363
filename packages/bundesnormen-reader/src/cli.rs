//! Command-line interface for the reader.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::batch::{read_index, run_batch, BatchSummary};
use crate::config::ReaderConfig;
use crate::error::Result;
use crate::loader::{load_content_section, locate};
use crate::reader::read_document;
use crate::types::FieldName;

/// Bundesnormen Reader - Read Austrian federal law records from RIS XML.
#[derive(Parser)]
#[command(name = "bundesnormen-reader")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Output format of `show`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Yaml,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Read one document and print its record.
    Show {
        /// Document identifier (e.g., NOR40000001)
        docid: String,

        /// Root of the sharded document store (default: $BUNDESNORMEN_DIR or bundesnormen/)
        #[arg(short, long)]
        base_dir: Option<PathBuf>,

        /// Output format of the record
        #[arg(short, long, value_enum, default_value_t = Format::Yaml)]
        format: Format,

        /// Print a single field instead of the whole record
        #[arg(long)]
        field: Option<String>,

        /// Print the raw element tree of the content section
        #[arg(long, conflicts_with = "field")]
        outline: bool,
    },

    /// Print the storage path of a document.
    Locate {
        /// Document identifier (e.g., NOR40000001)
        docid: String,

        /// Root of the sharded document store
        #[arg(short, long)]
        base_dir: Option<PathBuf>,
    },

    /// Read every document of an index file into JSON lines.
    Import {
        /// Index file listing one document per line
        #[arg(short, long)]
        index: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Root of the sharded document store
        #[arg(short, long)]
        base_dir: Option<PathBuf>,

        /// Failed documents tolerated before the import stops
        #[arg(long)]
        max_failures: Option<usize>,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Show {
            docid,
            base_dir,
            format,
            field,
            outline,
        } => {
            let config = load_config(base_dir, None)?;
            if outline {
                outline_command(&config, &docid)
            } else {
                show_command(&config, &docid, format, field.as_deref())
            }
        }
        Commands::Locate { docid, base_dir } => {
            let config = load_config(base_dir, None)?;
            println!("{}", locate(&config, &docid)?.display());
            Ok(())
        }
        Commands::Import {
            index,
            output,
            base_dir,
            max_failures,
        } => {
            let config = load_config(base_dir, max_failures)?;
            import_command(&config, &index, output.as_deref())
        }
    }
}

/// Environment configuration with command-line overrides applied.
fn load_config(base_dir: Option<PathBuf>, max_failures: Option<usize>) -> Result<ReaderConfig> {
    let mut config = ReaderConfig::from_env()?;
    if let Some(base_dir) = base_dir {
        config = config.with_base_dir(base_dir);
    }
    if let Some(max_failures) = max_failures {
        config = config.with_max_failures(max_failures.max(1));
    }
    Ok(config)
}

/// Execute the show command.
fn show_command(
    config: &ReaderConfig,
    docid: &str,
    format: Format,
    field: Option<&str>,
) -> Result<()> {
    // Validate the field name before reading the document
    let field = field.map(str::parse::<FieldName>).transpose()?;
    let record = read_document(config, docid)?;

    if let Some(field) = field {
        let value = record.get(field);
        if value.is_null() {
            println!("{}", style("null").dim());
        } else {
            println!("{value}");
        }
        return Ok(());
    }

    match format {
        Format::Yaml => print!("{}", serde_yaml_ng::to_string(&record)?),
        Format::Json => println!("{}", serde_json::to_string_pretty(&record)?),
    }

    if record.errors > 0 {
        eprintln!(
            "{} {} recoverable anomalies",
            style("Warning:").yellow().bold(),
            record.errors
        );
    }
    Ok(())
}

/// Execute the show command in outline mode.
fn outline_command(config: &ReaderConfig, docid: &str) -> Result<()> {
    let section = load_content_section(config, docid)?;
    print!("{}", section.outline());
    Ok(())
}

/// Execute the import command.
fn import_command(config: &ReaderConfig, index: &Path, output: Option<&Path>) -> Result<()> {
    let ids = read_index(index)?;

    eprintln!(
        "{} {} documents from {}",
        style("Importing").bold(),
        style(ids.len()).cyan(),
        style(config.base_dir.display()).green()
    );

    let pb = ProgressBar::new(ids.len() as u64);
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40} {pos}/{len} {msg}")
            .expect("valid template")
            .progress_chars("=> "),
    );

    let mut sink: Box<dyn Write> = match output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let result = run_batch(config, &ids, &mut sink, |docid, summary| {
        pb.set_message(format!("{docid} ({} failed)", summary.failed));
        pb.inc(1);
    });
    pb.finish_and_clear();
    let summary = result?;

    print_summary(&summary, output);
    Ok(())
}

fn print_summary(summary: &BatchSummary, output: Option<&Path>) {
    eprintln!();
    eprintln!("  Done: {}", style(summary.done).green());
    eprintln!("  Failed: {}", style(summary.failed).red());
    if summary.anomalies > 0 {
        eprintln!("  Anomalies: {}", style(summary.anomalies).yellow().bold());
    }
    if summary.stopped_early {
        eprintln!("{}", style("Stopped: too many failures").red().bold());
    }
    if let Some(path) = output {
        eprintln!("{} {}", style("Saved to:").green().bold(), path.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_show() {
        let cli = Cli::parse_from(["bundesnormen-reader", "show", "NOR40000001"]);

        let Commands::Show {
            docid,
            base_dir,
            format,
            field,
            outline,
        } = cli.command
        else {
            panic!("expected show command");
        };
        assert_eq!(docid, "NOR40000001");
        assert!(base_dir.is_none());
        assert_eq!(format, Format::Yaml);
        assert!(field.is_none());
        assert!(!outline);
    }

    #[test]
    fn test_cli_parse_show_with_options() {
        let cli = Cli::parse_from([
            "bundesnormen-reader",
            "show",
            "NOR40000001",
            "--format",
            "json",
            "--field",
            "valid_from",
            "--base-dir",
            "/data/ris",
        ]);

        let Commands::Show {
            format,
            field,
            base_dir,
            ..
        } = cli.command
        else {
            panic!("expected show command");
        };
        assert_eq!(format, Format::Json);
        assert_eq!(field.as_deref(), Some("valid_from"));
        assert_eq!(base_dir, Some(PathBuf::from("/data/ris")));
    }

    #[test]
    fn test_cli_outline_conflicts_with_field() {
        let result = Cli::try_parse_from([
            "bundesnormen-reader",
            "show",
            "NOR1",
            "--outline",
            "--field",
            "title",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parse_import() {
        let cli = Cli::parse_from([
            "bundesnormen-reader",
            "import",
            "--index",
            "index.txt",
            "--max-failures",
            "5",
        ]);

        let Commands::Import {
            index,
            output,
            max_failures,
            ..
        } = cli.command
        else {
            panic!("expected import command");
        };
        assert_eq!(index, PathBuf::from("index.txt"));
        assert!(output.is_none());
        assert_eq!(max_failures, Some(5));
    }

    #[test]
    fn test_load_config_overrides() {
        let config = load_config(Some(PathBuf::from("/tmp/ris")), Some(0)).unwrap();
        assert_eq!(config.base_dir, PathBuf::from("/tmp/ris"));
        assert_eq!(config.max_failures, 1);
    }
}
