//! Inventory node types.

use crate::types::{AssetId, NodeId, OwnerId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// System-reserved folder role.
///
/// A folder whose role is anything other than `None` is protected: the user
/// cannot rename, delete, or drag it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FolderRole {
    None,
    Trash,
    LostAndFound,
}

impl FolderRole {
    /// Whether this role marks a system-reserved folder.
    pub fn is_system(self) -> bool {
        !matches!(self, FolderRole::None)
    }
}

/// Folder node representation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolderNode {
    pub id: NodeId,
    /// `None` only for the synthetic root.
    pub parent_id: Option<NodeId>,
    pub name: String,
    pub owner_id: OwnerId,
    pub role: FolderRole,
}

/// Item node representation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemNode {
    pub id: NodeId,
    pub parent_id: NodeId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub creator_id: OwnerId,
    /// Lazily resolved display name of the creator, cached once known.
    pub creator_name: Option<String>,
    pub asset_id: AssetId,
}

/// Inventory node type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MirrorNode {
    Folder(FolderNode),
    Item(ItemNode),
}

impl MirrorNode {
    pub fn id(&self) -> NodeId {
        match self {
            MirrorNode::Folder(f) => f.id,
            MirrorNode::Item(i) => i.id,
        }
    }

    /// Containing folder, or `None` for the synthetic root.
    pub fn parent_id(&self) -> Option<NodeId> {
        match self {
            MirrorNode::Folder(f) => f.parent_id,
            MirrorNode::Item(i) => Some(i.parent_id),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            MirrorNode::Folder(f) => &f.name,
            MirrorNode::Item(i) => &i.name,
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, MirrorNode::Folder(_))
    }

    /// System-role folders are not renamable, deletable, or user-movable.
    pub fn is_protected(&self) -> bool {
        match self {
            MirrorNode::Folder(f) => f.role.is_system(),
            MirrorNode::Item(_) => false,
        }
    }

    pub fn as_folder(&self) -> Option<&FolderNode> {
        match self {
            MirrorNode::Folder(f) => Some(f),
            MirrorNode::Item(_) => None,
        }
    }

    pub fn as_item(&self) -> Option<&ItemNode> {
        match self {
            MirrorNode::Item(i) => Some(i),
            MirrorNode::Folder(_) => None,
        }
    }

    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        match self {
            MirrorNode::Folder(f) => f.name = name.into(),
            MirrorNode::Item(i) => i.name = name.into(),
        }
    }

    pub(crate) fn set_parent(&mut self, parent_id: NodeId) {
        match self {
            MirrorNode::Folder(f) => f.parent_id = Some(parent_id),
            MirrorNode::Item(i) => i.parent_id = parent_id,
        }
    }
}
