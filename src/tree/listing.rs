//! Breadth-first listing of a snapshot, skipping hidden entries

use std::collections::VecDeque;
use std::fmt;

use super::node::{NodeId, Tree};

/// One directory of a listing and its visible children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingBlock {
    pub dir: NodeId,
    pub entries: Vec<NodeId>,
}

/// Iterator over the directories of a tree in breadth-first order.
///
/// Hidden children are left out of each block and hidden directories are
/// never descended into.
pub struct Listing<'a> {
    tree: &'a Tree,
    pending: VecDeque<NodeId>,
}

impl<'a> Listing<'a> {
    pub fn new(tree: &'a Tree) -> Self {
        Self {
            tree,
            pending: VecDeque::from([tree.root()]),
        }
    }
}

impl Iterator for Listing<'_> {
    type Item = ListingBlock;

    fn next(&mut self) -> Option<ListingBlock> {
        let dir = self.pending.pop_front()?;
        let mut entries = Vec::new();
        for (id, child) in self.tree.children(dir) {
            if child.has_hidden_name() {
                continue;
            }
            entries.push(id);
            if child.is_dir() {
                self.pending.push_back(id);
            }
        }
        Some(ListingBlock { dir, entries })
    }
}

impl Tree {
    pub fn listing(&self) -> Listing<'_> {
        Listing::new(self)
    }
}

/// Header line for a listed directory: its path followed by `/:`.
pub fn block_header(tree: &Tree, dir: NodeId) -> String {
    let path = tree[dir].path().to_string_lossy();
    if path.ends_with(std::path::MAIN_SEPARATOR) {
        format!("{path}:")
    } else {
        format!("{path}/:")
    }
}

/// Display name of a listed entry.
pub fn entry_name(tree: &Tree, id: NodeId) -> String {
    tree[id]
        .name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| ".".to_string())
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, block) in self.listing().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{}", block_header(self, block.dir))?;
            if !block.entries.is_empty() {
                let names: Vec<String> =
                    block.entries.iter().map(|&id| entry_name(self, id)).collect();
                writeln!(f, "{}", names.join("\t"))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::NodeKind;
    use std::path::PathBuf;

    fn sample() -> Tree {
        let mut tree = Tree::with_root(PathBuf::from("/r"));
        let src = tree.push_child(NodeId::ROOT, PathBuf::from("/r/src"), NodeKind::Directory);
        let git = tree.push_child(NodeId::ROOT, PathBuf::from("/r/.git"), NodeKind::Directory);
        tree.push_child(NodeId::ROOT, PathBuf::from("/r/README"), NodeKind::File);
        tree.push_child(src, PathBuf::from("/r/src/main.rs"), NodeKind::File);
        tree.push_child(src, PathBuf::from("/r/src/.hidden"), NodeKind::File);
        tree.push_child(git, PathBuf::from("/r/.git/HEAD"), NodeKind::File);
        tree
    }

    #[test]
    fn test_listing_skips_hidden() {
        let tree = sample();
        let blocks: Vec<ListingBlock> = tree.listing().collect();
        assert_eq!(blocks.len(), 2, "hidden .git must not be descended into");
        assert_eq!(blocks[0].dir, tree.root());
        assert_eq!(blocks[0].entries.len(), 2);
        assert_eq!(blocks[1].entries.len(), 1);
    }

    #[test]
    fn test_display() {
        let tree = sample();
        assert_eq!(tree.to_string(), "/r/:\nsrc\tREADME\n\n/r/src/:\nmain.rs\n");
    }

    #[test]
    fn test_header_for_filesystem_root() {
        let tree = Tree::with_root(PathBuf::from(std::path::MAIN_SEPARATOR_STR));
        let header = block_header(&tree, tree.root());
        assert!(header.ends_with(':'));
        assert_eq!(header.matches(std::path::MAIN_SEPARATOR).count(), 1);
        assert_eq!(entry_name(&tree, tree.root()), ".");
    }

    #[test]
    fn test_empty_directory_block() {
        let tree = Tree::with_root(PathBuf::from("/empty"));
        assert_eq!(tree.to_string(), "/empty/:\n");
    }
}
