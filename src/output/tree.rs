//! Colored listing of a tree snapshot

use std::io::{self, Write};

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::tree::{Tree, block_header, entry_name};

use super::config::OutputConfig;

/// Formatter for the breadth-first directory listing.
pub struct TreeFormatter {
    config: OutputConfig,
}

impl TreeFormatter {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Write the listing to any color-aware writer.
    pub fn write<W: WriteColor>(&self, tree: &Tree, out: &mut W) -> io::Result<()> {
        let dir_color = ColorSpec::new().set_fg(Some(Color::Blue)).set_bold(true).clone();

        for (i, block) in tree.listing().enumerate() {
            if i > 0 {
                writeln!(out)?;
            }
            out.set_color(&dir_color)?;
            write!(out, "{}", block_header(tree, block.dir))?;
            out.reset()?;
            writeln!(out)?;

            if block.entries.is_empty() {
                continue;
            }
            for (j, &id) in block.entries.iter().enumerate() {
                if j > 0 {
                    write!(out, "\t")?;
                }
                if tree[id].is_dir() {
                    out.set_color(&dir_color)?;
                    write!(out, "{}", entry_name(tree, id))?;
                    out.reset()?;
                } else {
                    write!(out, "{}", entry_name(tree, id))?;
                }
            }
            writeln!(out)?;
        }
        Ok(())
    }

    /// Print the listing to stdout, colored if configured.
    pub fn print(&self, tree: &Tree) -> io::Result<()> {
        let choice = if self.config.use_color {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        let mut stdout = StandardStream::stdout(choice);
        self.write(tree, &mut stdout)?;
        stdout.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::NullSink;
    use crate::tree::build_tree;
    use std::fs;
    use tempfile::TempDir;
    use termcolor::{Ansi, NoColor};

    fn fixture() -> TempDir {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("src")).unwrap();
        fs::create_dir_all(tmp.path().join(".git")).unwrap();
        fs::write(tmp.path().join("src/lib.rs"), "").unwrap();
        tmp
    }

    #[test]
    fn test_plain_matches_display() {
        let tmp = fixture();
        let tree = build_tree(tmp.path(), &NullSink).unwrap();

        let mut out = NoColor::new(Vec::new());
        TreeFormatter::new(OutputConfig::default())
            .write(&tree, &mut out)
            .unwrap();
        assert_eq!(String::from_utf8(out.into_inner()).unwrap(), tree.to_string());
    }

    #[test]
    fn test_colored_directories() {
        let tmp = fixture();
        let tree = build_tree(tmp.path(), &NullSink).unwrap();

        let mut out = Ansi::new(Vec::new());
        TreeFormatter::new(OutputConfig::default())
            .write(&tree, &mut out)
            .unwrap();
        let text = String::from_utf8(out.into_inner()).unwrap();
        assert!(text.contains("\x1b["), "expected ANSI escapes: {text:?}");
        assert!(text.contains("lib.rs"));
        assert!(!text.contains(".git"));
    }
}
