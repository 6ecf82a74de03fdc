//! Node Index
//!
//! Bidirectional mapping between stable identifiers and mirror nodes, plus
//! the ordered child lists the Ordering Policy maintains. The index
//! exclusively owns all [`MirrorNode`] instances; every mutation flows
//! through the synchronization engine or the edit/move coordinator.

use crate::error::{MirrorError, Result};
use crate::tree::node::{FolderNode, MirrorNode};
use crate::tree::order::NodeSorter;
use crate::types::{NodeId, OwnerId};
use std::collections::HashMap;
use tracing::warn;

/// Local mirror of the remote inventory forest, rooted at a single
/// synthetic root folder.
pub struct NodeIndex {
    nodes: HashMap<NodeId, MirrorNode>,
    /// Ordered children per folder id. Order is recomputed from node
    /// attributes after any membership or name change.
    children: HashMap<NodeId, Vec<NodeId>>,
    root_id: NodeId,
    sorter: NodeSorter,
}

impl NodeIndex {
    /// Create an index holding only the root folder.
    pub fn new(mut root: FolderNode, sorter: NodeSorter) -> Self {
        root.parent_id = None;
        let root_id = root.id;
        let mut nodes = HashMap::new();
        nodes.insert(root_id, MirrorNode::Folder(root));
        let mut children = HashMap::new();
        children.insert(root_id, Vec::new());
        Self {
            nodes,
            children,
            root_id,
            sorter,
        }
    }

    pub fn root_id(&self) -> NodeId {
        self.root_id
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn lookup(&self, id: NodeId) -> Option<&MirrorNode> {
        self.nodes.get(&id)
    }

    /// Current parent of a node, `None` for the root or unknown ids.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(&id).and_then(|n| n.parent_id())
    }

    /// Ordered children of a folder. Empty for items and unknown ids.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.children.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn node_ids(&self) -> Vec<NodeId> {
        self.nodes.keys().copied().collect()
    }

    /// Whether `id` names a folder currently present in the index.
    pub fn has_folder(&self, id: NodeId) -> bool {
        matches!(self.nodes.get(&id), Some(MirrorNode::Folder(_)))
    }

    /// Owner of a folder, used when issuing content fetches.
    pub fn owner_of(&self, id: NodeId) -> Option<OwnerId> {
        self.nodes
            .get(&id)
            .and_then(|n| n.as_folder())
            .map(|f| f.owner_id)
    }

    /// Insert or update a node under `parent_id`.
    ///
    /// Upsert semantics: an existing node is updated in place; a changed
    /// parent detaches it from its old sibling set first, and fails with
    /// [`MirrorError::InvalidMove`] if the new parent lies inside the
    /// node's own subtree. Re-delivering an identical payload is a no-op,
    /// so insertion is idempotent.
    pub fn insert(&mut self, parent_id: NodeId, mut node: MirrorNode) -> Result<()> {
        let id = node.id();
        if id == self.root_id {
            return Err(MirrorError::Protected(id));
        }
        if !self.has_folder(parent_id) {
            return Err(MirrorError::NotFound(parent_id));
        }
        node.set_parent(parent_id);

        if let Some(existing) = self.nodes.get(&id) {
            if *existing == node {
                return Ok(());
            }
            let old_parent = existing.parent_id();
            if old_parent != Some(parent_id) {
                // An update that changes the parent is a move and needs the
                // same cycle guard as reparent: remote echoes can arrive out
                // of order.
                if parent_id == id || self.is_descendant(parent_id, id) {
                    return Err(MirrorError::InvalidMove {
                        node: id,
                        target: parent_id,
                    });
                }
                if let Some(old_parent) = old_parent {
                    self.detach(old_parent, id);
                    self.resort(old_parent);
                }
                self.children.entry(parent_id).or_default().push(id);
            }
            self.nodes.insert(id, node);
        } else {
            if node.is_folder() {
                self.children.entry(id).or_default();
            }
            self.nodes.insert(id, node);
            self.children.entry(parent_id).or_default().push(id);
        }
        self.resort(parent_id);
        Ok(())
    }

    /// Remove a node and its entire descendant subtree.
    ///
    /// Returns the ids that were removed, the requested node first.
    pub fn remove(&mut self, id: NodeId) -> Result<Vec<NodeId>> {
        if id == self.root_id {
            return Err(MirrorError::Protected(id));
        }
        if !self.nodes.contains_key(&id) {
            return Err(MirrorError::NotFound(id));
        }
        let parent = self.parent_of(id);

        let mut removed = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(child_ids) = self.children.remove(&current) {
                stack.extend(child_ids);
            }
            if self.nodes.remove(&current).is_some() {
                removed.push(current);
            }
        }

        if let Some(parent) = parent {
            self.detach(parent, id);
            self.resort(parent);
        }
        Ok(removed)
    }

    /// Move a node under a new parent folder.
    ///
    /// Fails with [`MirrorError::NotFound`] if either id is absent and with
    /// [`MirrorError::InvalidMove`] if the move would create a cycle or the
    /// target is not a folder. The index is left unchanged on failure.
    pub fn reparent(&mut self, id: NodeId, new_parent_id: NodeId) -> Result<()> {
        if id == self.root_id {
            return Err(MirrorError::Protected(id));
        }
        if !self.nodes.contains_key(&id) {
            return Err(MirrorError::NotFound(id));
        }
        if !self.nodes.contains_key(&new_parent_id) {
            return Err(MirrorError::NotFound(new_parent_id));
        }
        if !self.has_folder(new_parent_id) {
            return Err(MirrorError::InvalidMove {
                node: id,
                target: new_parent_id,
            });
        }
        if new_parent_id == id || self.is_descendant(new_parent_id, id) {
            return Err(MirrorError::InvalidMove {
                node: id,
                target: new_parent_id,
            });
        }

        let old_parent = self.parent_of(id);
        if old_parent == Some(new_parent_id) {
            return Ok(());
        }
        if let Some(old_parent) = old_parent {
            self.detach(old_parent, id);
            self.resort(old_parent);
        }
        if let Some(node) = self.nodes.get_mut(&id) {
            node.set_parent(new_parent_id);
        }
        self.children.entry(new_parent_id).or_default().push(id);
        self.resort(new_parent_id);
        Ok(())
    }

    /// Change a node's display name and re-sort its sibling set.
    pub fn rename(&mut self, id: NodeId, name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(MirrorError::EmptyLabel);
        }
        let node = self
            .nodes
            .get_mut(&id)
            .ok_or(MirrorError::NotFound(id))?;
        node.set_name(name);
        if let Some(parent) = self.parent_of(id) {
            self.resort(parent);
        }
        Ok(())
    }

    /// Fill the cached creator name on every item created by `owner`.
    ///
    /// Returns how many items were touched. Does not affect ordering.
    pub fn set_creator_name(&mut self, creator_id: OwnerId, name: &str) -> usize {
        let mut touched = 0;
        for node in self.nodes.values_mut() {
            if let MirrorNode::Item(item) = node {
                if item.creator_id == creator_id && item.creator_name.as_deref() != Some(name) {
                    item.creator_name = Some(name.to_string());
                    touched += 1;
                }
            }
        }
        touched
    }

    /// True when `candidate`'s parent chain passes through `ancestor`.
    pub fn is_descendant(&self, candidate: NodeId, ancestor: NodeId) -> bool {
        let mut current = self.parent_of(candidate);
        let mut hops = 0usize;
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent_of(id);
            hops += 1;
            if hops > self.nodes.len() {
                // A cycle here means the forest invariant is already broken.
                warn!(candidate = %candidate, "parent chain did not terminate");
                return false;
            }
        }
        false
    }

    /// Toggle the "system folders first" policy and re-sort every folder.
    pub fn set_system_folders_first(&mut self, enabled: bool) {
        if self.sorter.system_folders_first() == enabled {
            return;
        }
        self.sorter.set_system_folders_first(enabled);
        let folders: Vec<NodeId> = self.children.keys().copied().collect();
        for folder in folders {
            self.resort(folder);
        }
    }

    fn detach(&mut self, parent: NodeId, id: NodeId) {
        if let Some(child_ids) = self.children.get_mut(&parent) {
            child_ids.retain(|c| *c != id);
        }
    }

    /// Recompute the display order of a folder's children.
    ///
    /// Ties in the comparator are broken by id so the result never depends
    /// on insertion order.
    fn resort(&mut self, parent: NodeId) {
        if let Some(mut child_ids) = self.children.remove(&parent) {
            let nodes = &self.nodes;
            let sorter = self.sorter;
            child_ids.sort_by(|a, b| match (nodes.get(a), nodes.get(b)) {
                (Some(x), Some(y)) => sorter.compare(x, y).then_with(|| a.cmp(b)),
                _ => a.cmp(b),
            });
            self.children.insert(parent, child_ids);
        }
    }
}
