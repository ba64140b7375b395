//! TreeBuilder - takes one breadth-first snapshot of a directory hierarchy

use std::collections::VecDeque;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::error::{Result, TfindError};

use super::node::{NodeId, NodeKind, Tree};

/// One entry yielded while listing a directory.
#[derive(Debug)]
pub struct ListedEntry {
    pub path: PathBuf,
    /// Kind of the entry itself, links not followed.
    pub kind: io::Result<NodeKind>,
}

/// Entries of one directory, each of which may fail on its own.
pub type DirEntries<'a> = Box<dyn Iterator<Item = io::Result<ListedEntry>> + 'a>;

/// Source of directory listings for [`TreeBuilder`].
pub trait DirLister {
    fn list(&self, dir: &Path) -> io::Result<DirEntries<'_>>;
}

/// Lists directories straight from the filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsLister;

impl DirLister for FsLister {
    fn list(&self, dir: &Path) -> io::Result<DirEntries<'_>> {
        let entries = fs::read_dir(dir)?;
        Ok(Box::new(entries.map(|entry| {
            let entry = entry?;
            let path = entry.path();
            let kind = entry
                .file_type()
                .or_else(|_| fs::symlink_metadata(&path).map(|m| m.file_type()))
                .map(NodeKind::from_file_type);
            Ok(ListedEntry { path, kind })
        })))
    }
}

/// Builds a [`Tree`] by listing every regular directory below a root.
///
/// Symbolic links are recorded as leaves and never followed. Directories
/// that cannot be listed are reported to the sink and kept without children.
pub struct TreeBuilder<'a, L: DirLister = FsLister> {
    sink: &'a dyn DiagnosticSink,
    lister: L,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(sink: &'a dyn DiagnosticSink) -> Self {
        Self::with_lister(sink, FsLister)
    }
}

impl<'a, L: DirLister> TreeBuilder<'a, L> {
    pub fn with_lister(sink: &'a dyn DiagnosticSink, lister: L) -> Self {
        Self { sink, lister }
    }

    /// Snapshot the hierarchy under `root`.
    ///
    /// Fails only when `root` itself is missing, is not a directory, or
    /// cannot be listed. A symlink given as the root is resolved.
    pub fn build(&self, root: &Path) -> Result<Tree> {
        let metadata = fs::metadata(root).map_err(|source| TfindError::RootUnavailable {
            path: root.to_path_buf(),
            source,
        })?;
        if !metadata.is_dir() {
            return Err(TfindError::NotADirectory {
                path: root.to_path_buf(),
            });
        }
        let entries = self
            .lister
            .list(root)
            .map_err(|source| TfindError::RootUnavailable {
                path: root.to_path_buf(),
                source,
            })?;

        let mut tree = Tree::with_root(root.to_path_buf());
        let mut pending = VecDeque::new();
        self.expand(&mut tree, NodeId::ROOT, entries, &mut pending);

        while let Some(dir) = pending.pop_front() {
            let path = tree[dir].path().to_path_buf();
            match self.lister.list(&path) {
                Ok(entries) => self.expand(&mut tree, dir, entries, &mut pending),
                Err(source) => self
                    .sink
                    .report(&Diagnostic::DirectoryUnreadable { path, source }),
            }
        }

        log::debug!(
            "snapshot of '{}' holds {} entries",
            root.display(),
            tree.len()
        );
        Ok(tree)
    }

    /// Attach every listed entry to `parent`, queueing regular directories.
    fn expand(
        &self,
        tree: &mut Tree,
        parent: NodeId,
        entries: DirEntries<'_>,
        pending: &mut VecDeque<NodeId>,
    ) {
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(source) => {
                    self.sink.report(&Diagnostic::EntryUnreadable {
                        parent: tree[parent].path().to_path_buf(),
                        source,
                    });
                    continue;
                }
            };

            let kind = match entry.kind {
                Ok(kind) => kind,
                Err(source) => {
                    self.sink.report(&Diagnostic::FileTypeUnreadable {
                        path: entry.path.clone(),
                        source,
                    });
                    NodeKind::Unknown
                }
            };

            let child = tree.push_child(parent, entry.path, kind);
            if kind == NodeKind::Directory {
                pending.push_back(child);
            }
        }

        if tree[parent].is_empty() {
            log::trace!("'{}' has no entries", tree[parent].path().display());
        }
    }
}

/// Snapshot `root`, reporting per-entry problems to `sink`.
pub fn build_tree(root: &Path, sink: &dyn DiagnosticSink) -> Result<Tree> {
    TreeBuilder::new(sink).build(root)
}
