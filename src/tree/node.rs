//! Arena-backed snapshot of a directory hierarchy

use std::ffi::OsStr;
use std::fs::FileType;
use std::ops::Index;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;

/// Handle to a node inside a [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// The root node of every tree.
    pub const ROOT: NodeId = NodeId(0);

    pub fn index(self) -> usize {
        self.0
    }
}

/// What a node was when it was discovered. Determined once, never re-read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// A directory that is not a symbolic link.
    Directory,
    File,
    Symlink,
    /// Sockets, fifos, devices.
    Other,
    /// The entry's type could not be read.
    Unknown,
}

impl NodeKind {
    /// Classify without following symbolic links.
    pub fn from_file_type(file_type: FileType) -> Self {
        if file_type.is_symlink() {
            NodeKind::Symlink
        } else if file_type.is_dir() {
            NodeKind::Directory
        } else if file_type.is_file() {
            NodeKind::File
        } else {
            NodeKind::Other
        }
    }
}

/// One filesystem entry of the snapshot.
#[derive(Debug)]
pub struct TreeNode {
    path: PathBuf,
    kind: NodeKind,
    children: Vec<NodeId>,
}

impl TreeNode {
    fn new(path: PathBuf, kind: NodeKind) -> Self {
        Self {
            path,
            kind,
            children: Vec::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Last path component, `None` for roots such as `/`.
    pub fn name(&self) -> Option<&OsStr> {
        self.path.file_name()
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// True for regular directories: never for symlinks, whatever they point at.
    pub fn is_dir(&self) -> bool {
        self.kind == NodeKind::Directory
    }

    pub fn is_symlink(&self) -> bool {
        self.kind == NodeKind::Symlink
    }

    /// True if any component of the path starts with a dot.
    ///
    /// Components above the search root count too, so every node of a tree
    /// rooted inside a dot-directory is hidden. Use [`has_hidden_name`]
    /// to look only at the entry itself.
    ///
    /// [`has_hidden_name`]: TreeNode::has_hidden_name
    pub fn is_hidden(&self) -> bool {
        self.path.components().any(|c| match c {
            Component::Normal(part) => is_hidden_name(part),
            _ => false,
        })
    }

    /// True if this entry's own name starts with a dot.
    pub fn has_hidden_name(&self) -> bool {
        self.name().is_some_and(is_hidden_name)
    }

    /// Exact, case-sensitive comparison of the file name against `filename`.
    pub fn name_equals(&self, filename: &OsStr) -> bool {
        self.name() == Some(filename)
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

fn is_hidden_name(name: &OsStr) -> bool {
    name.as_encoded_bytes().first() == Some(&b'.')
}

/// Counts of what a snapshot contains below its root.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TreeStats {
    pub entries: usize,
    pub directories: usize,
    pub files: usize,
    pub symlinks: usize,
    pub other: usize,
}

/// Point-in-time snapshot of a directory hierarchy.
///
/// Nodes live in one flat arena and refer to their children by [`NodeId`],
/// so the tree is freed as a single vector no matter how deep it is.
/// A tree never changes after [`TreeBuilder`](super::TreeBuilder) returns it.
#[derive(Debug)]
pub struct Tree {
    nodes: Vec<TreeNode>,
}

impl Tree {
    pub(crate) fn with_root(root: PathBuf) -> Self {
        Self {
            nodes: vec![TreeNode::new(root, NodeKind::Directory)],
        }
    }

    /// Append a node and register it as the last child of `parent`.
    pub(crate) fn push_child(&mut self, parent: NodeId, path: PathBuf, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(TreeNode::new(path, kind));
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    pub fn root_path(&self) -> &Path {
        self.nodes[0].path()
    }

    pub fn get(&self, id: NodeId) -> Option<&TreeNode> {
        self.nodes.get(id.0)
    }

    /// Number of entries below the root.
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    /// True when the root directory had nothing in it.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Children of `id` together with their handles.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = (NodeId, &TreeNode)> + '_ {
        self[id].children.iter().map(move |&child| (child, &self[child]))
    }

    /// Every node in discovery (breadth-first) order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &TreeNode)> + '_ {
        self.nodes.iter().enumerate().map(|(i, node)| (NodeId(i), node))
    }

    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats::default();
        for node in &self.nodes[1..] {
            stats.entries += 1;
            match node.kind {
                NodeKind::Directory => stats.directories += 1,
                NodeKind::File => stats.files += 1,
                NodeKind::Symlink => stats.symlinks += 1,
                NodeKind::Other | NodeKind::Unknown => stats.other += 1,
            }
        }
        stats
    }
}

impl Index<NodeId> for Tree {
    type Output = TreeNode;

    fn index(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id.0]
    }
}
