//! Metadata scrubbing CLI.
//!
//! This binary provides a command-line interface for the metascrub library,
//! supporting single-file and directory batch modes with proper error
//! handling and per-file reporting.

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};

use metascrub::{dispatch, Document};

const BANNER: &str = " -  -- ---=[  metascrub (pdf, exif, openxml, etc.)  ]=--- --  - ";

/// Metadata extraction and scrubbing tool
///
/// Reads embedded metadata from documents and media files and, when an
/// output path is given, writes a scrubbed copy with that metadata removed.
#[derive(Parser)]
#[command(name = "metascrub")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Input file path (not needed with --directory)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Process an entire directory instead of a single file
    #[arg(short, long, value_name = "DIR", conflicts_with = "input")]
    directory: Option<PathBuf>,

    /// Output filename, or target directory in --directory mode
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Quiet some output
    #[arg(short, long)]
    quiet: bool,
}

/// Per-file orchestration around the dispatcher.
struct ScrubHandler {
    quiet: bool,
}

impl ScrubHandler {
    fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    /// Prints a document's metadata as ` - Key: Value` lines.
    fn print_metadata(&self, document: &Document) -> Result<()> {
        let metadata = document.metadata().with_context(|| {
            format!(
                "Failed to read metadata from {}",
                document.path().display()
            )
        })?;
        for (key, value) in &metadata {
            println!(" - {}: {}", key, value);
        }
        Ok(())
    }

    /// Single-file mode: print metadata, optionally scrub, then verify the
    /// scrubbed output by re-reading its metadata.
    fn process_file(&self, input: &Path, output: Option<&Path>) -> Result<()> {
        let document = dispatch(input)
            .ok_or_else(|| anyhow::anyhow!("File format is not supported: {}", input.display()))?;

        if !self.quiet {
            println!("Reading metadata from input \"{}\":", input.display());
        }
        self.print_metadata(&document)?;

        let Some(output) = output else {
            return Ok(());
        };
        if !document.supports_scrubbing() {
            anyhow::bail!("Scrubbing is not supported with this document type");
        }

        if !self.quiet {
            println!("\nWriting scrubbed output file \"{}\" ...", output.display());
        }
        let scrubbed = document.scrub().with_context(|| "Scrubbing failed")?;
        fs::write(output, &scrubbed)
            .with_context(|| format!("Failed to write {}", output.display()))?;

        if self.quiet {
            return Ok(());
        }
        println!("Done");
        println!("\nReading metadata from output \"{}\":", output.display());
        if let Some(verification) = dispatch(output) {
            self.print_metadata(&verification)?;
        }
        Ok(())
    }

    /// Batch mode: process every file in the directory, reporting per-file
    /// errors without aborting the remaining entries.
    fn process_directory(&self, directory: &Path, output: Option<&Path>) -> Result<()> {
        println!("Processing directory '{}':", directory.display());
        let entries = fs::read_dir(directory)
            .with_context(|| format!("Failed to read directory {}", directory.display()))?;

        for entry in entries {
            let path = entry?.path();
            if path.is_dir() {
                continue;
            }
            println!("Processing '{}' ...", path.display());
            if let Err(error) = self.process_entry(&path, output) {
                eprintln!("ERROR: {error:#}");
            }
        }
        Ok(())
    }

    /// One batch entry: print metadata and scrub into the output directory.
    fn process_entry(&self, path: &Path, output: Option<&Path>) -> Result<()> {
        let document =
            dispatch(path).ok_or_else(|| anyhow::anyhow!("Document type is unsupported"))?;
        self.print_metadata(&document)?;

        let Some(output_dir) = output else {
            return Ok(());
        };
        if !document.supports_scrubbing() {
            anyhow::bail!("Scrubbing is not supported with this document type");
        }

        let target = output_dir.join(scrubbed_name(document.path()));
        let scrubbed = document.scrub()?;
        fs::write(&target, &scrubbed)
            .with_context(|| format!("Failed to write {}", target.display()))?;
        println!("Scrubbed -> {}", target.display());
        Ok(())
    }
}

/// Batch output files are the original name prefixed with `scrubbed_`.
fn scrubbed_name(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    format!("scrubbed_{name}")
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if !cli.quiet {
        println!("\n{BANNER}\n");
    }

    let handler = ScrubHandler::new(cli.quiet);
    match (&cli.input, &cli.directory) {
        (_, Some(directory)) => handler.process_directory(directory, cli.output.as_deref()),
        (Some(input), None) => handler.process_file(input, cli.output.as_deref()),
        (None, None) => {
            anyhow::bail!("Provide an input file or --directory. See --help for usage.")
        }
    }
}
