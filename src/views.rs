//! Read-only node snapshots for the view layer.
//!
//! External collaborators never touch [`MirrorNode`] instances directly;
//! they receive detached copies and route every mutation back through the
//! engine's intent surface.

use crate::tree::node::{FolderRole, MirrorNode};
use crate::types::{AssetId, NodeId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Folder,
    Item,
}

/// Detached, render-ready copy of one mirror node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    pub id: NodeId,
    pub parent_id: Option<NodeId>,
    pub name: String,
    pub kind: NodeKind,
    /// Set for folders; `FolderRole::None` for user-created ones.
    pub role: Option<FolderRole>,
    /// Set for items.
    pub created_at: Option<DateTime<Utc>>,
    pub creator_name: Option<String>,
    pub asset_id: Option<AssetId>,
    /// Whether the user may rename, delete, or drag this node.
    pub protected: bool,
}

impl NodeSnapshot {
    /// JSON rendition for view layers living across a process boundary.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl From<&MirrorNode> for NodeSnapshot {
    fn from(node: &MirrorNode) -> Self {
        match node {
            MirrorNode::Folder(f) => NodeSnapshot {
                id: f.id,
                parent_id: f.parent_id,
                name: f.name.clone(),
                kind: NodeKind::Folder,
                role: Some(f.role),
                created_at: None,
                creator_name: None,
                asset_id: None,
                protected: f.role.is_system(),
            },
            MirrorNode::Item(i) => NodeSnapshot {
                id: i.id,
                parent_id: Some(i.parent_id),
                name: i.name.clone(),
                kind: NodeKind::Item,
                role: None,
                created_at: Some(i.created_at),
                creator_name: i.creator_name.clone(),
                asset_id: Some(i.asset_id),
                protected: false,
            },
        }
    }
}
