//! External inventory store seam.
//!
//! The remote store is the source of truth. Every request here is a
//! fire-and-forget notification of intent: effects are observed only
//! through the [`Notification`] stream, never as return values, and a
//! request that the store silently drops is indistinguishable from one
//! still in flight.

use crate::tree::node::{FolderRole, MirrorNode};
use crate::types::{NodeId, OwnerId, SortOrder};
use async_trait::async_trait;

/// Remote-state change delivered by the store on the producer context.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    Added(MirrorNode),
    Removed(MirrorNode),
    Updated { old: MirrorNode, new: MirrorNode },
}

/// Request surface of the remote inventory store.
#[async_trait]
pub trait InventoryStore: Send + Sync {
    async fn request_folder_contents(
        &self,
        folder_id: NodeId,
        owner_id: OwnerId,
        fetch_folders: bool,
        fetch_items: bool,
        sort_order: SortOrder,
    );

    async fn create_folder(&self, parent_id: NodeId, name: &str);

    async fn move_folder(&self, folder_id: NodeId, new_parent_id: NodeId, new_name: &str);

    async fn move_item(&self, item_id: NodeId, new_parent_id: NodeId, new_name: &str);

    async fn empty_trash(&self);

    async fn empty_lost_and_found(&self);

    /// Resolve the well-known folder for a system role, if the store knows
    /// one. Synchronous: this consults the store's own cache, not the wire.
    fn find_folder_for_role(&self, role: FolderRole) -> Option<NodeId>;
}

/// An outbound request queued by the engine while it holds the mirror
/// lock, dispatched by the service loop once the lock is released.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreRequest {
    FolderContents {
        folder_id: NodeId,
        owner_id: OwnerId,
        fetch_folders: bool,
        fetch_items: bool,
        sort_order: SortOrder,
    },
    CreateFolder {
        parent_id: NodeId,
        name: String,
    },
    MoveFolder {
        folder_id: NodeId,
        new_parent_id: NodeId,
        new_name: String,
    },
    MoveItem {
        item_id: NodeId,
        new_parent_id: NodeId,
        new_name: String,
    },
    EmptyTrash,
    EmptyLostAndFound,
}

/// Forward a queued request to the store.
pub async fn dispatch(store: &dyn InventoryStore, request: StoreRequest) {
    match request {
        StoreRequest::FolderContents {
            folder_id,
            owner_id,
            fetch_folders,
            fetch_items,
            sort_order,
        } => {
            store
                .request_folder_contents(folder_id, owner_id, fetch_folders, fetch_items, sort_order)
                .await
        }
        StoreRequest::CreateFolder { parent_id, name } => {
            store.create_folder(parent_id, &name).await
        }
        StoreRequest::MoveFolder {
            folder_id,
            new_parent_id,
            new_name,
        } => store.move_folder(folder_id, new_parent_id, &new_name).await,
        StoreRequest::MoveItem {
            item_id,
            new_parent_id,
            new_name,
        } => store.move_item(item_id, new_parent_id, &new_name).await,
        StoreRequest::EmptyTrash => store.empty_trash().await,
        StoreRequest::EmptyLostAndFound => store.empty_lost_and_found().await,
    }
}
