//! CLI entry point for tfind

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;
use std::time::Instant;

use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};
use log::LevelFilter;
use tfind::config::FS_ROOT;
use tfind::{
    DEFAULT_CONCURRENCY, OutputConfig, OutputFormat, ParallelSearcher, SearchConfig, TreeFormatter,
    WriterSink, build_tree, print_matches,
};

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // Respect NO_COLOR environment variable (https://no-color.org/)
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            std::io::stdout().is_terminal()
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "tfind")]
#[command(about = "Find files by name using a bounded number of parallel search threads")]
#[command(version)]
struct Args {
    /// File name to look for (exact, case-sensitive)
    #[arg(required_unless_present = "tree")]
    filename: Option<String>,

    /// Directory to start the search from
    #[arg(long = "path", default_value = FS_ROOT)]
    path: PathBuf,

    /// Maximum number of concurrently running search threads [1; 200]
    #[arg(
        short = 'n',
        long = "num-threads",
        alias = "num_threads",
        default_value_t = DEFAULT_CONCURRENCY
    )]
    num_threads: usize,

    /// Print matches as a JSON array
    #[arg(long = "json")]
    json: bool,

    /// Sort matches before printing
    #[arg(long = "sort")]
    sort: bool,

    /// Print the directory snapshot instead of searching (hidden entries omitted)
    #[arg(long = "tree")]
    tree: bool,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,

    /// Log more about what the search is doing (repeat for more detail)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn run(args: &Args) -> tfind::Result<()> {
    let sink = WriterSink::stderr();
    let output_config = OutputConfig {
        use_color: should_use_color(args.color),
        format: if args.json {
            OutputFormat::Json
        } else {
            OutputFormat::Plain
        },
        sort: args.sort,
    };

    let config = SearchConfig::new(&args.path, args.filename.clone().unwrap_or_default())
        .with_max_concurrency(args.num_threads);
    let max_concurrency = config.validate()?;

    let started = Instant::now();
    let tree = build_tree(&config.root, &sink)?;
    let tree_stats = tree.stats();
    log::debug!(
        "snapshot took {:?}: {} directories, {} files, {} symlinks, {} other",
        started.elapsed(),
        tree_stats.directories,
        tree_stats.files,
        tree_stats.symlinks,
        tree_stats.other
    );

    if args.tree {
        TreeFormatter::new(output_config).print(&tree)?;
        return Ok(());
    }

    let started = Instant::now();
    let outcome = ParallelSearcher::new(&sink).search(&tree, &config.filename, max_concurrency);
    log::debug!(
        "search took {:?}: {} tasks spawned, {} inline, peak {} of {} active",
        started.elapsed(),
        outcome.stats.tasks_spawned,
        outcome.stats.inline_continuations,
        outcome.stats.peak_active,
        max_concurrency
    );

    eprintln!("found {} file(s)", outcome.matches.len());
    print_matches(outcome.matches, &output_config)
}

fn main() {
    let args = Args::try_parse().unwrap_or_else(|e| match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
        _ => {
            eprintln!("tfind: argument parsing error: {}", e);
            process::exit(1);
        }
    });
    init_logging(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("tfind: {}", e);
        process::exit(1);
    }
}
