//! In-memory directory snapshot
//!
//! - `TreeBuilder`: lists a hierarchy once, breadth-first, into a `Tree`
//! - `Tree`: arena of `TreeNode`s, read-only once built and safe to share across threads
//! - `Listing`: breadth-first view of the tree that leaves out hidden entries

mod builder;
mod listing;
mod node;

pub use builder::{DirEntries, DirLister, FsLister, ListedEntry, TreeBuilder, build_tree};
pub use listing::{Listing, ListingBlock, block_header, entry_name};
pub use node::{NodeId, NodeKind, Tree, TreeNode, TreeStats};
