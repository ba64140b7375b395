//! Writing search results and tree listings
//!
//! - `config` - Output configuration types
//! - `json` - JSON array of matches
//! - `tree` - Colored breadth-first listing of a snapshot

mod config;
mod json;
mod tree;

use std::io::{self, Write};

pub use config::{OutputConfig, OutputFormat};
pub use json::{print_json, write_json};
pub use tree::TreeFormatter;

use crate::error::Result;
use crate::search::MatchSet;

/// Write matches one path per line.
pub fn write_matches<W: Write>(matches: &MatchSet, out: &mut W) -> io::Result<()> {
    for path in matches {
        writeln!(out, "{}", path.display())?;
    }
    out.flush()
}

/// Write matches to stdout in the configured format.
pub fn print_matches(mut matches: MatchSet, config: &OutputConfig) -> Result<()> {
    if config.sort {
        matches.sort();
    }
    match config.format {
        OutputFormat::Json => print_json(&matches),
        OutputFormat::Plain => {
            let stdout = io::stdout();
            write_matches(&matches, &mut stdout.lock())?;
            Ok(())
        }
    }
}
