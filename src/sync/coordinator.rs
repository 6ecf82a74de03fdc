//! Edit/Move Coordinator
//!
//! Tracks the single pending local creation and validates user-initiated
//! rename, move, and delete requests before anything is sent to the store.
//! The store remains the source of truth: local edits are optimistic at
//! most, and moves are finalized only by the store's own echo.

use crate::error::{MirrorError, Result};
use crate::tree::index::NodeIndex;
use crate::tree::node::MirrorNode;
use crate::types::NodeId;
use tracing::debug;

/// What the view should do after a locally created node appeared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTrigger {
    /// The parent is already expanded; enter rename/edit mode now.
    BeginEdit(NodeId),
    /// Expand the parent first; edit mode follows once the node is visible.
    ExpandParent { parent_id: NodeId, node_id: NodeId },
}

/// A validated move, ready to forward to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovePlan {
    pub node_id: NodeId,
    /// Always a folder; item drop targets are redirected to their parent.
    pub destination_id: NodeId,
    pub is_folder: bool,
    /// Name travels with the move request, unchanged.
    pub name: String,
}

/// Session state for local edit workflows. At most one creation can be
/// pending at a time.
#[derive(Debug, Default)]
pub struct EditMoveCoordinator {
    pending_creation: Option<String>,
}

impl EditMoveCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending_creation(&self) -> Option<&str> {
        self.pending_creation.as_deref()
    }

    /// Record the display name of a folder the user just asked to create.
    pub fn begin_creation(&mut self, name: impl Into<String>) {
        self.pending_creation = Some(name.into());
    }

    /// Inspect an applied add for a pending-creation match.
    ///
    /// A matching display name consumes the pending creation and yields the
    /// edit trigger, exactly once. A non-matching add also clears it: one
    /// synchronization cycle without a match means the creation was
    /// abandoned, which is not an error.
    pub fn observe_added(
        &mut self,
        node: &MirrorNode,
        parent_expanded: bool,
    ) -> Option<EditTrigger> {
        let pending = self.pending_creation.take()?;
        if node.name() != pending {
            debug!(pending = %pending, "pending creation cleared without a match");
            return None;
        }
        if parent_expanded {
            Some(EditTrigger::BeginEdit(node.id()))
        } else {
            node.parent_id().map(|parent_id| EditTrigger::ExpandParent {
                parent_id,
                node_id: node.id(),
            })
        }
    }

    /// Validate a rename before an edit affordance is offered or a request
    /// is sent.
    pub fn validate_rename(node: &MirrorNode, new_name: &str) -> Result<()> {
        if node.is_protected() {
            return Err(MirrorError::Protected(node.id()));
        }
        if new_name.trim().is_empty() {
            return Err(MirrorError::EmptyLabel);
        }
        Ok(())
    }

    /// Validate a drag-and-drop move and resolve its real destination.
    ///
    /// Returns `Ok(None)` when the drop lands on the source itself, which
    /// the view treats as a no-op rather than an error.
    pub fn plan_move(
        index: &NodeIndex,
        source_id: NodeId,
        target_id: NodeId,
    ) -> Result<Option<MovePlan>> {
        let source = index
            .lookup(source_id)
            .ok_or(MirrorError::NotFound(source_id))?;
        let target = index
            .lookup(target_id)
            .ok_or(MirrorError::NotFound(target_id))?;
        if source_id == target_id {
            return Ok(None);
        }
        if source.is_protected() || source_id == index.root_id() {
            return Err(MirrorError::Protected(source_id));
        }

        // Dropping onto an item lands in that item's folder.
        let destination_id = match target {
            MirrorNode::Item(item) => item.parent_id,
            MirrorNode::Folder(f) => f.id,
        };
        if !index.has_folder(destination_id) {
            return Err(MirrorError::NotFound(destination_id));
        }
        if destination_id == source_id || index.is_descendant(destination_id, source_id) {
            return Err(MirrorError::InvalidMove {
                node: source_id,
                target: destination_id,
            });
        }

        Ok(Some(MovePlan {
            node_id: source_id,
            destination_id,
            is_folder: source.is_folder(),
            name: source.name().to_string(),
        }))
    }
}
