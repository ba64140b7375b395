//! JSON output formatting

use std::io::{self, Write};

use crate::error::Result;
use crate::search::MatchSet;

/// Write matches as a pretty-printed JSON array.
pub fn write_json<W: Write>(matches: &MatchSet, out: &mut W) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, matches)?;
    writeln!(out)?;
    Ok(())
}

/// Print matches as pretty-printed JSON to stdout.
pub fn print_json(matches: &MatchSet) -> Result<()> {
    let stdout = io::stdout();
    let mut lock = stdout.lock();
    write_json(matches, &mut lock)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::ResultCollector;
    use std::path::Path;

    #[test]
    fn test_write_json() {
        let collector = ResultCollector::new();
        collector.append(Path::new("/a/b.txt"));
        collector.append(Path::new("/c/b.txt"));

        let mut out = Vec::new();
        write_json(&collector.into_matches(), &mut out).unwrap();
        let parsed: Vec<String> = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed, vec!["/a/b.txt", "/c/b.txt"]);
    }

    #[test]
    fn test_write_json_empty() {
        let mut out = Vec::new();
        write_json(&MatchSet::default(), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "[]\n");
    }
}
