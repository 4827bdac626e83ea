//! # gostmt
//!
//! A CLI tool for counting statements in Go source trees.
//!
//! ## Overview
//!
//! gostmt is built on top of gostmtlib. It walks a directory, parses every
//! `.go` file and prints how many statements each file holds, or rolls the
//! counts up per directory.
//!
//! ## Usage
//!
//! ```bash
//! # Statements per file, then the total
//! gostmt ./src
//!
//! # Direct and recursive statements per directory
//! gostmt --by-dir ./src
//! gostmt --aggregation dir ./src
//!
//! # Skip tests and vendored code
//! gostmt . --exclude "**/*_test.go" --exclude "**/vendor/**"
//!
//! # Output as JSON
//! gostmt . --output json
//! ```

use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Arg, ArgAction, ArgMatches, Command};
use gostmtlib::{
    count_directory, walk, Aggregation, CountOptions, FilterConfig, Reporter, WalkEntry,
};
use tracing::level_filters::LevelFilter;

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("gostmt")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Arthur Debert")
        .about("Counts statements in Go source files, per file or per directory")
        .arg(
            Arg::new("path")
                .value_name("DIRECTORY")
                .help("Directory to analyze"),
        )
        .arg(
            Arg::new("by-dir")
                .short('d')
                .long("by-dir")
                .action(ArgAction::SetTrue)
                .help("Show direct and recursive counts per directory"),
        )
        .arg(
            Arg::new("aggregation")
                .short('a')
                .long("aggregation")
                .value_name("LEVEL")
                .value_parser(|s: &str| s.parse::<Aggregation>())
                .conflicts_with("by-dir")
                .help("Aggregation level: file or dir"),
        )
        .arg(
            Arg::new("include")
                .short('i')
                .long("include")
                .action(ArgAction::Append)
                .help("Include files matching glob pattern"),
        )
        .arg(
            Arg::new("exclude")
                .short('e')
                .long("exclude")
                .action(ArgAction::Append)
                .help("Exclude files matching glob pattern"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_parser(["text", "json"])
                .default_value("text")
                .help("Output format"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("Log progress to stderr (repeat for more detail)"),
        )
}

/// Extract glob patterns for one filter flag
fn extract_patterns<'a>(matches: &'a ArgMatches, id: &str) -> Vec<&'a str> {
    matches
        .get_many::<String>(id)
        .map(|v| v.map(|s| s.as_str()).collect())
        .unwrap_or_default()
}

/// Build filter config from matches
fn build_filter(matches: &ArgMatches) -> anyhow::Result<FilterConfig> {
    Ok(FilterConfig::new()
        .include_many(&extract_patterns(matches, "include"))?
        .exclude_many(&extract_patterns(matches, "exclude"))?)
}

/// Resolve the aggregation level from `--aggregation` or the `--by-dir` shorthand
fn extract_aggregation(matches: &ArgMatches) -> Aggregation {
    if matches.get_flag("by-dir") {
        return Aggregation::ByDirectory;
    }
    matches
        .get_one::<Aggregation>("aggregation")
        .copied()
        .unwrap_or_default()
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::OFF,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Print each file as soon as it is counted, then the total.
///
/// Lines already written stay on stdout when a later file fails; the total
/// is only written after the whole tree was counted.
fn run_flat(path: &str, filter: FilterConfig) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut reporter = Reporter::new(stdout.lock());
    let mut total = 0u64;
    let mut files = 0usize;

    let walker = walk(path, filter).with_context(|| format!("failed to walk '{path}'"))?;
    for entry in walker {
        let entry = entry.with_context(|| format!("failed to walk '{path}'"))?;
        if let WalkEntry::File(file) = entry {
            total += file.stats.count();
            files += 1;
            reporter.write_file(&file)?;
        }
    }

    reporter.write_total(Path::new(path), total)?;
    reporter.flush()?;
    tracing::info!(files, total, "done");
    Ok(())
}

fn run_collected(path: &str, options: CountOptions, json: bool) -> anyhow::Result<()> {
    let aggregation = options.aggregation;
    let result =
        count_directory(path, &options).with_context(|| format!("failed to walk '{path}'"))?;
    tracing::info!(
        files = result.files.len(),
        directories = result.directories.len(),
        total = result.total.count(),
        "done"
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if json {
        serde_json::to_writer_pretty(&mut out, &result)?;
        writeln!(out)?;
    } else {
        let mut reporter = Reporter::new(&mut out);
        reporter.write_result(&result, aggregation)?;
    }
    out.flush()?;
    Ok(())
}

fn run(path: &str, matches: &ArgMatches) -> anyhow::Result<()> {
    let filter = build_filter(matches)?;
    let aggregation = extract_aggregation(matches);
    let json = matches
        .get_one::<String>("output")
        .is_some_and(|o| o == "json");

    tracing::debug!(path, %aggregation, json, "starting");

    if aggregation == Aggregation::ByFile && !json {
        return run_flat(path, filter);
    }

    let options = CountOptions::new().filter(filter).aggregation(aggregation);
    run_collected(path, options, json)
}

fn main() -> ExitCode {
    let mut cmd = build_command();
    let matches = cmd.clone().get_matches();

    init_logging(matches.get_count("verbose"));

    let Some(path) = matches.get_one::<String>("path") else {
        println!("{}", cmd.render_usage());
        return ExitCode::FAILURE;
    };

    match run(path, &matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
