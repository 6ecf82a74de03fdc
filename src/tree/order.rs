//! Sibling ordering policy.
//!
//! Produces the display order of a folder's children: folders before items,
//! system folders first when enabled, then name or reverse-chronological
//! tie-breaks. The comparator is a strict weak ordering and depends only on
//! node attributes, so re-sorting is deterministic and idempotent.

use super::node::{FolderNode, ItemNode, MirrorNode};
use std::cmp::Ordering;

/// Comparator over sibling nodes.
#[derive(Debug, Clone, Copy)]
pub struct NodeSorter {
    system_first: bool,
}

impl Default for NodeSorter {
    fn default() -> Self {
        Self { system_first: true }
    }
}

impl NodeSorter {
    pub fn new(system_first: bool) -> Self {
        Self { system_first }
    }

    pub fn system_folders_first(&self) -> bool {
        self.system_first
    }

    pub fn set_system_folders_first(&mut self, enabled: bool) {
        self.system_first = enabled;
    }

    /// Total order over siblings.
    ///
    /// 1. Folders sort before items.
    /// 2. Among folders, system-role folders first when enabled.
    /// 3. Folder ties by name; item ties by newest `created_at`, then name.
    pub fn compare(&self, a: &MirrorNode, b: &MirrorNode) -> Ordering {
        match (a, b) {
            (MirrorNode::Folder(x), MirrorNode::Folder(y)) => self.compare_folders(x, y),
            (MirrorNode::Folder(_), MirrorNode::Item(_)) => Ordering::Less,
            (MirrorNode::Item(_), MirrorNode::Folder(_)) => Ordering::Greater,
            (MirrorNode::Item(x), MirrorNode::Item(y)) => Self::compare_items(x, y),
        }
    }

    fn compare_folders(&self, x: &FolderNode, y: &FolderNode) -> Ordering {
        if self.system_first {
            match (x.role.is_system(), y.role.is_system()) {
                (true, false) => return Ordering::Less,
                (false, true) => return Ordering::Greater,
                _ => {}
            }
        }
        x.name.cmp(&y.name)
    }

    fn compare_items(x: &ItemNode, y: &ItemNode) -> Ordering {
        // Newest first
        y.created_at
            .cmp(&x.created_at)
            .then_with(|| x.name.cmp(&y.name))
    }
}
