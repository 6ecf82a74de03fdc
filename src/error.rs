//! Error types for the mirror engine.
//!
//! No failure here is fatal: the worst outcome is a locally stale mirror,
//! correctable by an explicit force-refresh.

use crate::tree::node::FolderRole;
use crate::types::NodeId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MirrorError {
    /// A referenced id is absent from the index. Benign for removals and
    /// updates, which treat it as a no-op.
    #[error("node not found: {0}")]
    NotFound(NodeId),

    /// The requested reparent would corrupt the forest (the target is a
    /// descendant of the moved node, or is not a folder).
    #[error("moving {node} under {target} would corrupt the tree")]
    InvalidMove { node: NodeId, target: NodeId },

    /// The node is the synthetic root or a system-role folder and cannot be
    /// renamed, deleted, or moved by the user.
    #[error("node {0} is protected")]
    Protected(NodeId),

    /// A rename or create was attempted with a blank display name.
    #[error("display name must not be empty")]
    EmptyLabel,

    /// A buffered add whose parent never resolved within the retry window.
    #[error("orphaned node {0} dropped after retry window")]
    OrphanTimeout(NodeId),

    /// The store knows no folder for a well-known system role.
    #[error("no folder registered for role {0:?}")]
    RoleUnresolved(FolderRole),

    /// The owner-context service loop has shut down.
    #[error("mirror service is not running")]
    ServiceClosed,

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, MirrorError>;
