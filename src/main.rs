//! revlines - print or time a file read from its last line to its first
//!
//! Thin command-line wrapper around [`revlines::ReversedReader`].

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use revlines::{ReaderConfig, ReversedReader};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

fn build_cli() -> Command {
    let command = Command::new("revlines")
        .version(revlines::VERSION)
        .about("Read a text file line by line, starting with the last line")
        .long_about(
            "revlines reads a text file backward in fixed-size chunks and reports how \
             long it took. Lines can optionally be echoed in reverse order.",
        )
        .arg(
            Arg::new("file")
                .help("Path to the text file to read")
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .index(1),
        )
        .arg(
            Arg::new("print-reversed")
                .short('p')
                .long("print-reversed")
                .help("Print each line in reversed order")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("chunk-size")
                .long("chunk-size")
                .value_name("BYTES")
                .help("Bytes loaded from the file per chunk")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("max-line-bytes")
                .long("max-line-bytes")
                .value_name("BYTES")
                .help("Longest line accepted before failing")
                .value_parser(value_parser!(usize)),
        );

    #[cfg(feature = "config")]
    let command = command.arg(
        Arg::new("config")
            .long("config")
            .value_name("PATH")
            .help("TOML file with chunk_size and max_line_bytes")
            .value_parser(value_parser!(PathBuf)),
    );

    command
}

/// Resolve the reader configuration: config file (if enabled), then CLI overrides
fn reader_config(matches: &ArgMatches) -> Result<ReaderConfig> {
    #[cfg(feature = "config")]
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => ReaderConfig::from_file(path)?,
        None => ReaderConfig::load_user_config()?,
    };
    #[cfg(not(feature = "config"))]
    let mut config = ReaderConfig::default();

    if let Some(&chunk_size) = matches.get_one::<usize>("chunk-size") {
        config.chunk_size = chunk_size;
    }
    if let Some(&max_line_bytes) = matches.get_one::<usize>("max-line-bytes") {
        config.max_line_bytes = max_line_bytes;
    }

    config.validate().context("Invalid reader configuration")?;
    Ok(config)
}

/// Read every line of `path` in reverse, echoing them to `out` when `print` is set
///
/// Returns the number of lines read. The reader is closed explicitly on success
/// and dropped on the error path. Read failures and output failures carry
/// separate context so a closed pipe is not reported as a bad input file.
fn reverse_file<W: Write>(
    path: &Path,
    config: ReaderConfig,
    print: bool,
    mut out: W,
) -> Result<u64> {
    let mut reader = ReversedReader::open_with_config(path, config)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let mut count = 0u64;
    while let Some(line) = reader
        .next_line_bytes()
        .with_context(|| format!("Failed to read {}", path.display()))?
    {
        if print {
            out.write_all(line)
                .and_then(|()| out.write_all(b"\n"))
                .context("Failed to write to stdout")?;
        }
        count += 1;
    }
    out.flush().context("Failed to write to stdout")?;

    reader.close();
    Ok(count)
}

fn main() -> Result<()> {
    // Initialize logging (RUST_LOG=debug shows reader lifecycle, trace shows chunks)
    env_logger::init();

    let matches = build_cli().get_matches();

    let file_path = matches
        .get_one::<PathBuf>("file")
        .expect("file argument is required")
        .clone();
    let print = matches.get_flag("print-reversed");
    let config = reader_config(&matches)?;

    println!("Reading {}", file_path.display());
    println!("Print each line in reversed order: {print}");

    let start = Instant::now();
    let result = {
        let stdout = io::stdout();
        reverse_file(&file_path, config, print, BufWriter::new(stdout.lock()))
    };
    println!("execution time: {}ms", start.elapsed().as_millis());

    let lines = result?;
    log::info!("Read {lines} lines from {}", file_path.display());

    Ok(())
}
