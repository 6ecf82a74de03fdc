//! Synchronization Engine
//!
//! Applies remote add/update/remove notifications to the mirror and serves
//! user intents, all on a single owner context. Producers (the notification
//! stream and the view layer) never touch the index directly: they enqueue
//! commands through a [`MirrorHandle`], and one service loop applies them
//! strictly sequentially. Outbound store requests are queued while the
//! mirror lock is held and dispatched after it is released, so nothing in
//! the engine blocks the owner context.

pub mod coordinator;

use crate::config::EngineConfig;
use crate::error::{MirrorError, Result};
use crate::fetch::FetchTracker;
use crate::store::{self, InventoryStore, Notification, StoreRequest};
use crate::tree::index::NodeIndex;
use crate::tree::node::{FolderNode, FolderRole, MirrorNode};
use crate::tree::order::NodeSorter;
use crate::types::{NodeId, OwnerId};
use crate::views::NodeSnapshot;
use coordinator::{EditMoveCoordinator, EditTrigger};
use parking_lot::RwLock;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

/// Mirror-wide lifecycle phase.
///
/// Bootstrapping ends once the root node exists and its first-level
/// expansion has been issued; from then on the mirror is live and accepts
/// interleaved notifications indefinitely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MirrorPhase {
    Bootstrapping,
    Live,
}

/// Outbound event for the view layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MirrorEvent {
    /// A folder's child set or its ordering changed.
    ChildrenChanged(NodeId),
    /// A node (and its subtree) left the mirror.
    NodeRemoved(NodeId),
    /// The engine expanded a folder on the view's behalf.
    FolderExpanded(NodeId),
    /// The view should enter rename/edit mode on this node.
    BeginEdit(NodeId),
    /// The global sibling ordering policy changed; re-read everything.
    OrderingChanged,
}

/// A buffered add whose parent has not been observed yet.
struct PendingAdd {
    node: MirrorNode,
    /// Applied notifications left before the add is dropped as an
    /// unresolvable orphan. Only aged once the mirror is live.
    remaining: usize,
}

/// The mirror state machine. Every method runs on the owner context; the
/// service loop is the sole caller of anything `&mut`.
pub struct Mirror {
    index: NodeIndex,
    fetches: FetchTracker,
    coordinator: EditMoveCoordinator,
    phase: MirrorPhase,
    pending_adds: Vec<PendingAdd>,
    /// Folders the view currently shows expanded.
    expanded: HashSet<NodeId>,
    config: EngineConfig,
    store: Arc<dyn InventoryStore>,
    outbox: Vec<StoreRequest>,
    events: mpsc::UnboundedSender<MirrorEvent>,
    owner_id: OwnerId,
}

impl Mirror {
    pub fn new(
        root: FolderNode,
        store: Arc<dyn InventoryStore>,
        config: EngineConfig,
        events: mpsc::UnboundedSender<MirrorEvent>,
    ) -> Self {
        let owner_id = root.owner_id;
        let index = NodeIndex::new(root, NodeSorter::new(config.system_folders_first));
        Self {
            index,
            fetches: FetchTracker::new(),
            coordinator: EditMoveCoordinator::new(),
            phase: MirrorPhase::Bootstrapping,
            pending_adds: Vec::new(),
            expanded: HashSet::new(),
            config,
            store,
            outbox: Vec::new(),
            events,
            owner_id,
        }
    }

    pub fn phase(&self) -> MirrorPhase {
        self.phase
    }

    pub fn root_id(&self) -> NodeId {
        self.index.root_id()
    }

    pub fn is_expanded(&self, folder_id: NodeId) -> bool {
        self.expanded.contains(&folder_id)
    }

    /// Issue the root's first-level expansion and go live.
    pub fn bootstrap(&mut self) {
        if self.phase == MirrorPhase::Live {
            return;
        }
        let root = self.index.root_id();
        self.expand_folder(root, false);
        self.phase = MirrorPhase::Live;
        info!(root_id = %root, "mirror live");
    }

    /// Take the store requests queued since the last drain.
    pub fn drain_outbox(&mut self) -> Vec<StoreRequest> {
        std::mem::take(&mut self.outbox)
    }

    // ------------------------------------------------------------------
    // Notification application
    // ------------------------------------------------------------------

    /// Apply one remote notification. Idempotent under duplicate delivery.
    pub fn apply(&mut self, notification: Notification) {
        self.age_pending_adds();
        match notification {
            Notification::Added(node) => self.apply_added(node),
            Notification::Removed(node) => self.apply_removed(node),
            Notification::Updated { old, new } => self.apply_updated(old, new),
        }
    }

    fn apply_added(&mut self, node: MirrorNode) {
        let id = node.id();
        let Some(parent_id) = node.parent_id() else {
            debug!(node_id = %id, "ignoring parentless add");
            return;
        };
        if !self.index.has_folder(parent_id) {
            debug!(node_id = %id, parent_id = %parent_id, "deferring add until parent appears");
            self.pending_adds.retain(|p| p.node.id() != id);
            self.pending_adds.push(PendingAdd {
                node,
                remaining: self.config.orphan_retry_window,
            });
            return;
        }
        self.insert_and_notify(parent_id, node);
        self.drain_pending_adds();
    }

    fn apply_removed(&mut self, node: MirrorNode) {
        let id = node.id();
        let parent = self.index.parent_of(id);
        match self.index.remove(id) {
            Ok(removed) => {
                debug!(node_id = %id, subtree = removed.len(), "removed node");
                for rid in &removed {
                    self.fetches.forget(*rid);
                    self.expanded.remove(rid);
                }
                self.emit(MirrorEvent::NodeRemoved(id));
                if let Some(parent) = parent {
                    self.emit(MirrorEvent::ChildrenChanged(parent));
                }
            }
            Err(MirrorError::NotFound(_)) => {
                // Already removed or never observed
                debug!(node_id = %id, "remove for unknown node, ignoring");
            }
            Err(err) => warn!(node_id = %id, %err, "remove rejected"),
        }
        // A removed node can no longer adopt buffered orphans
        self.pending_adds.retain(|p| p.node.id() != id);
    }

    fn apply_updated(&mut self, old: MirrorNode, new: MirrorNode) {
        let id = new.id();
        let Some(new_parent) = new.parent_id() else {
            debug!(node_id = %id, "ignoring parentless update");
            return;
        };
        if !self.index.has_folder(new_parent) {
            // Data-consistency gap: the update cannot be placed
            warn!(node_id = %id, parent_id = %new_parent, "update with unresolvable parent, ignoring");
            return;
        }
        let current = match self.index.lookup(id) {
            None => {
                debug!(node_id = %id, "update for unknown node, treating as add");
                self.apply_added(new);
                return;
            }
            Some(current) => current,
        };
        if *current == new {
            debug!(node_id = %id, "duplicate update ignored");
            return;
        }
        let old_parent = current.parent_id();
        debug!(
            node_id = %id,
            old_name = %old.name(),
            new_name = %new.name(),
            moved = old_parent != Some(new_parent),
            "updating node"
        );
        if let Err(err) = self.index.insert(new_parent, new) {
            warn!(node_id = %id, %err, "update rejected");
            return;
        }
        self.emit(MirrorEvent::ChildrenChanged(new_parent));
        if let Some(old_parent) = old_parent {
            if old_parent != new_parent {
                self.emit(MirrorEvent::ChildrenChanged(old_parent));
            }
        }
    }

    /// Insert a node whose parent is known to be present, then run the
    /// pending-creation edit workflow.
    fn insert_and_notify(&mut self, parent_id: NodeId, node: MirrorNode) {
        let id = node.id();
        if self.index.lookup(id) == Some(&node) {
            debug!(node_id = %id, "duplicate add ignored");
            return;
        }
        if let Err(err) = self.index.insert(parent_id, node.clone()) {
            warn!(node_id = %id, %err, "add rejected");
            return;
        }
        debug!(node_id = %id, name = %node.name(), parent_id = %parent_id, "added node");
        self.emit(MirrorEvent::ChildrenChanged(parent_id));

        let parent_expanded = self.expanded.contains(&parent_id);
        match self.coordinator.observe_added(&node, parent_expanded) {
            Some(EditTrigger::BeginEdit(node_id)) => {
                self.emit(MirrorEvent::BeginEdit(node_id));
            }
            Some(EditTrigger::ExpandParent { parent_id, node_id }) => {
                self.expand_folder(parent_id, false);
                self.emit(MirrorEvent::BeginEdit(node_id));
            }
            None => {}
        }
    }

    /// Re-attempt buffered adds whose parents have since appeared, until a
    /// fixpoint is reached (an adopted folder may itself unblock others).
    fn drain_pending_adds(&mut self) {
        loop {
            let mut ready = Vec::new();
            let mut still_pending = Vec::new();
            for pending in std::mem::take(&mut self.pending_adds) {
                let resolvable = pending
                    .node
                    .parent_id()
                    .map_or(false, |pid| self.index.has_folder(pid));
                if resolvable {
                    ready.push(pending.node);
                } else {
                    still_pending.push(pending);
                }
            }
            self.pending_adds = still_pending;
            if ready.is_empty() {
                break;
            }
            for node in ready {
                if let Some(parent_id) = node.parent_id() {
                    self.insert_and_notify(parent_id, node);
                }
            }
        }
    }

    /// Count down buffered orphans; drop the ones whose window expired.
    fn age_pending_adds(&mut self) {
        if self.phase != MirrorPhase::Live {
            return;
        }
        self.pending_adds.retain_mut(|pending| {
            if pending.remaining <= 1 {
                let err = MirrorError::OrphanTimeout(pending.node.id());
                warn!(name = %pending.node.name(), %err, "dropping buffered add");
                false
            } else {
                pending.remaining -= 1;
                true
            }
        });
    }

    // ------------------------------------------------------------------
    // User intents
    // ------------------------------------------------------------------

    pub fn handle_intent(&mut self, intent: Intent) -> Result<()> {
        match intent {
            Intent::Expand(folder_id) => self.request_expand(folder_id),
            Intent::Collapse(folder_id) => self.request_collapse(folder_id),
            Intent::Refresh(folder_id) => self.request_refresh(folder_id),
            Intent::Rename { node_id, new_name } => self.request_rename(node_id, &new_name),
            Intent::Move {
                source_id,
                target_id,
            } => self.request_move(source_id, target_id),
            Intent::CreateFolder { parent_id } => self.request_create_folder(parent_id),
            Intent::Delete(node_id) => self.request_delete(node_id),
            Intent::EmptyTrash => {
                self.outbox.push(StoreRequest::EmptyTrash);
                Ok(())
            }
            Intent::EmptyLostAndFound => {
                self.outbox.push(StoreRequest::EmptyLostAndFound);
                Ok(())
            }
            Intent::OwnerName { owner_id, name } => {
                self.note_owner_name(owner_id, &name);
                Ok(())
            }
            Intent::SetSystemFoldersFirst(enabled) => {
                self.set_system_folders_first(enabled);
                Ok(())
            }
            Intent::Flush => Ok(()),
        }
    }

    /// First-time expansion triggers a content fetch; later ones are
    /// deduplicated by the fetch tracker.
    pub fn request_expand(&mut self, folder_id: NodeId) -> Result<()> {
        if !self.index.has_folder(folder_id) {
            return Err(MirrorError::NotFound(folder_id));
        }
        self.expand_folder(folder_id, false);
        Ok(())
    }

    pub fn request_collapse(&mut self, folder_id: NodeId) -> Result<()> {
        self.expanded.remove(&folder_id);
        Ok(())
    }

    /// Force-refresh: drop the folder's current children so stale entries
    /// disappear, then re-request contents regardless of fetch state.
    pub fn request_refresh(&mut self, folder_id: NodeId) -> Result<()> {
        if !self.index.has_folder(folder_id) {
            return Err(MirrorError::NotFound(folder_id));
        }
        let child_ids: Vec<NodeId> = self.index.children(folder_id).to_vec();
        for child_id in child_ids {
            if let Ok(removed) = self.index.remove(child_id) {
                for rid in &removed {
                    self.fetches.forget(*rid);
                    self.expanded.remove(rid);
                }
                self.emit(MirrorEvent::NodeRemoved(child_id));
            }
        }
        self.emit(MirrorEvent::ChildrenChanged(folder_id));
        self.fetches.should_fetch(folder_id, true);
        self.push_contents_request(folder_id);
        info!(folder_id = %folder_id, "refreshing folder");
        Ok(())
    }

    /// Optimistic rename: the local node is updated immediately and the
    /// store is asked to move the node in place (same parent, new name).
    /// The authoritative update echo is a no-op when it matches.
    pub fn request_rename(&mut self, node_id: NodeId, new_name: &str) -> Result<()> {
        let node = self
            .index
            .lookup(node_id)
            .ok_or(MirrorError::NotFound(node_id))?;
        EditMoveCoordinator::validate_rename(node, new_name)?;
        let is_folder = node.is_folder();
        let Some(parent_id) = node.parent_id() else {
            return Err(MirrorError::Protected(node_id));
        };

        self.index.rename(node_id, new_name)?;
        self.emit(MirrorEvent::ChildrenChanged(parent_id));
        let request = if is_folder {
            StoreRequest::MoveFolder {
                folder_id: node_id,
                new_parent_id: parent_id,
                new_name: new_name.to_string(),
            }
        } else {
            StoreRequest::MoveItem {
                item_id: node_id,
                new_parent_id: parent_id,
                new_name: new_name.to_string(),
            }
        };
        self.outbox.push(request);
        info!(node_id = %node_id, new_name, "rename requested");
        Ok(())
    }

    /// Drag-and-drop reparent. The index is not touched: the move becomes
    /// visible when the store echoes the corresponding update.
    pub fn request_move(&mut self, source_id: NodeId, target_id: NodeId) -> Result<()> {
        let Some(plan) = EditMoveCoordinator::plan_move(&self.index, source_id, target_id)?
        else {
            debug!(source_id = %source_id, "move onto itself ignored");
            return Ok(());
        };
        let request = if plan.is_folder {
            StoreRequest::MoveFolder {
                folder_id: plan.node_id,
                new_parent_id: plan.destination_id,
                new_name: plan.name,
            }
        } else {
            StoreRequest::MoveItem {
                item_id: plan.node_id,
                new_parent_id: plan.destination_id,
                new_name: plan.name,
            }
        };
        self.outbox.push(request);
        info!(source_id = %source_id, destination_id = %plan.destination_id, "move requested");
        Ok(())
    }

    /// Ask the store for a new folder and arm the pending-creation
    /// workflow: the matching add echo jumps straight into edit mode.
    pub fn request_create_folder(&mut self, parent_id: NodeId) -> Result<()> {
        if !self.index.has_folder(parent_id) {
            return Err(MirrorError::NotFound(parent_id));
        }
        let name = self.config.new_folder_name.clone();
        self.coordinator.begin_creation(name.clone());
        self.outbox.push(StoreRequest::CreateFolder { parent_id, name });
        info!(parent_id = %parent_id, "folder creation requested");
        Ok(())
    }

    /// Soft delete: a move to the well-known Trash folder. The node stays
    /// in the index until the store echoes the move, so a dropped request
    /// cannot diverge the mirror. Recovery from a silently dropped request
    /// is an explicit refresh.
    pub fn request_delete(&mut self, node_id: NodeId) -> Result<()> {
        let node = self
            .index
            .lookup(node_id)
            .ok_or(MirrorError::NotFound(node_id))?;
        if node.is_protected() || node_id == self.index.root_id() {
            return Err(MirrorError::Protected(node_id));
        }
        let is_folder = node.is_folder();
        let name = node.name().to_string();
        let trash = self
            .store
            .find_folder_for_role(FolderRole::Trash)
            .ok_or(MirrorError::RoleUnresolved(FolderRole::Trash))?;

        let request = if is_folder {
            StoreRequest::MoveFolder {
                folder_id: node_id,
                new_parent_id: trash,
                new_name: name,
            }
        } else {
            StoreRequest::MoveItem {
                item_id: node_id,
                new_parent_id: trash,
                new_name: name,
            }
        };
        self.outbox.push(request);
        info!(node_id = %node_id, trash_id = %trash, "delete requested as move to trash");
        Ok(())
    }

    /// Fill the cached creator name on items created by `owner_id`.
    pub fn note_owner_name(&mut self, owner_id: OwnerId, name: &str) {
        let touched = self.index.set_creator_name(owner_id, name);
        if touched > 0 {
            debug!(owner_id = %owner_id, touched, "cached resolved owner name");
        }
    }

    pub fn set_system_folders_first(&mut self, enabled: bool) {
        self.index.set_system_folders_first(enabled);
        self.emit(MirrorEvent::OrderingChanged);
    }

    // ------------------------------------------------------------------
    // Read access
    // ------------------------------------------------------------------

    pub fn snapshot(&self, id: NodeId) -> Option<NodeSnapshot> {
        self.index.lookup(id).map(NodeSnapshot::from)
    }

    /// Ordered snapshots of a folder's children.
    pub fn children_of(&self, id: NodeId) -> Vec<NodeSnapshot> {
        self.index
            .children(id)
            .iter()
            .filter_map(|cid| self.index.lookup(*cid))
            .map(NodeSnapshot::from)
            .collect()
    }

    fn expand_folder(&mut self, folder_id: NodeId, force: bool) {
        self.expanded.insert(folder_id);
        if self.fetches.should_fetch(folder_id, force) {
            self.push_contents_request(folder_id);
        }
        self.emit(MirrorEvent::FolderExpanded(folder_id));
    }

    fn push_contents_request(&mut self, folder_id: NodeId) {
        let owner_id = self.index.owner_of(folder_id).unwrap_or(self.owner_id);
        debug!(folder_id = %folder_id, "requesting folder contents");
        self.outbox.push(StoreRequest::FolderContents {
            folder_id,
            owner_id,
            fetch_folders: true,
            fetch_items: true,
            sort_order: self.config.fetch_sort_order,
        });
    }

    fn emit(&self, event: MirrorEvent) {
        // The view layer may not be listening; that is fine.
        let _ = self.events.send(event);
    }
}

/// User-initiated request, validated on the owner context.
#[derive(Debug)]
pub enum Intent {
    Expand(NodeId),
    Collapse(NodeId),
    Refresh(NodeId),
    Rename { node_id: NodeId, new_name: String },
    Move { source_id: NodeId, target_id: NodeId },
    CreateFolder { parent_id: NodeId },
    Delete(NodeId),
    EmptyTrash,
    EmptyLostAndFound,
    OwnerName { owner_id: OwnerId, name: String },
    SetSystemFoldersFirst(bool),
    /// No-op barrier: resolves once every earlier command has been applied.
    Flush,
}

enum Command {
    Notify(Notification),
    Intent {
        intent: Intent,
        reply: Option<oneshot::Sender<Result<()>>>,
    },
    Shutdown,
}

/// Owner-context service loop. Sole writer of the mirror.
pub struct MirrorService {
    mirror: Arc<RwLock<Mirror>>,
    store: Arc<dyn InventoryStore>,
    rx: mpsc::Receiver<Command>,
}

impl MirrorService {
    /// Build the mirror around `root`, spawn the service loop, and hand
    /// back the producer-side handle plus the view event stream.
    pub fn spawn(
        root: FolderNode,
        store: Arc<dyn InventoryStore>,
        config: EngineConfig,
    ) -> (
        MirrorHandle,
        mpsc::UnboundedReceiver<MirrorEvent>,
        tokio::task::JoinHandle<()>,
    ) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (tx, rx) = mpsc::channel(config.command_queue_capacity);
        let mirror = Arc::new(RwLock::new(Mirror::new(
            root,
            store.clone(),
            config,
            event_tx,
        )));
        let service = MirrorService {
            mirror: Arc::clone(&mirror),
            store,
            rx,
        };
        let join = tokio::spawn(service.run());
        (MirrorHandle { tx, mirror }, event_rx, join)
    }

    async fn run(mut self) {
        info!("mirror service started");
        let requests = {
            let mut mirror = self.mirror.write();
            mirror.bootstrap();
            mirror.drain_outbox()
        };
        self.dispatch_all(requests).await;

        while let Some(command) = self.rx.recv().await {
            match command {
                Command::Shutdown => break,
                Command::Notify(notification) => {
                    let requests = {
                        let mut mirror = self.mirror.write();
                        mirror.apply(notification);
                        mirror.drain_outbox()
                    };
                    self.dispatch_all(requests).await;
                }
                Command::Intent { intent, reply } => {
                    let (result, requests) = {
                        let mut mirror = self.mirror.write();
                        let result = mirror.handle_intent(intent);
                        (result, mirror.drain_outbox())
                    };
                    self.dispatch_all(requests).await;
                    if let Some(reply) = reply {
                        let _ = reply.send(result);
                    }
                }
            }
        }
        info!("mirror service stopped");
    }

    async fn dispatch_all(&self, requests: Vec<StoreRequest>) {
        for request in requests {
            store::dispatch(self.store.as_ref(), request).await;
        }
    }
}

/// Cloneable producer-side handle to the mirror service.
///
/// Notifications and intents are marshaled onto the owner context; reads
/// take a snapshot under a shared lock.
#[derive(Clone)]
pub struct MirrorHandle {
    tx: mpsc::Sender<Command>,
    mirror: Arc<RwLock<Mirror>>,
}

impl MirrorHandle {
    /// Enqueue a remote notification. Safe to call from any context.
    pub async fn notify(&self, notification: Notification) -> Result<()> {
        self.tx
            .send(Command::Notify(notification))
            .await
            .map_err(|_| MirrorError::ServiceClosed)
    }

    async fn intent(&self, intent: Intent) -> Result<()> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(Command::Intent {
                intent,
                reply: Some(reply_tx),
            })
            .await
            .map_err(|_| MirrorError::ServiceClosed)?;
        reply_rx.await.map_err(|_| MirrorError::ServiceClosed)?
    }

    pub async fn request_expand(&self, folder_id: NodeId) -> Result<()> {
        self.intent(Intent::Expand(folder_id)).await
    }

    pub async fn request_collapse(&self, folder_id: NodeId) -> Result<()> {
        self.intent(Intent::Collapse(folder_id)).await
    }

    pub async fn request_refresh(&self, folder_id: NodeId) -> Result<()> {
        self.intent(Intent::Refresh(folder_id)).await
    }

    pub async fn request_rename(&self, node_id: NodeId, new_name: &str) -> Result<()> {
        self.intent(Intent::Rename {
            node_id,
            new_name: new_name.to_string(),
        })
        .await
    }

    pub async fn request_move(&self, source_id: NodeId, target_id: NodeId) -> Result<()> {
        self.intent(Intent::Move {
            source_id,
            target_id,
        })
        .await
    }

    pub async fn request_create_folder(&self, parent_id: NodeId) -> Result<()> {
        self.intent(Intent::CreateFolder { parent_id }).await
    }

    pub async fn request_delete(&self, node_id: NodeId) -> Result<()> {
        self.intent(Intent::Delete(node_id)).await
    }

    pub async fn request_empty_trash(&self) -> Result<()> {
        self.intent(Intent::EmptyTrash).await
    }

    pub async fn request_empty_lost_and_found(&self) -> Result<()> {
        self.intent(Intent::EmptyLostAndFound).await
    }

    /// Report a resolved owner display name for caching on items.
    pub async fn note_owner_name(&self, owner_id: OwnerId, name: &str) -> Result<()> {
        self.intent(Intent::OwnerName {
            owner_id,
            name: name.to_string(),
        })
        .await
    }

    pub async fn set_system_folders_first(&self, enabled: bool) -> Result<()> {
        self.intent(Intent::SetSystemFoldersFirst(enabled)).await
    }

    /// Wait until every command enqueued before this call has been applied.
    pub async fn flush(&self) -> Result<()> {
        self.intent(Intent::Flush).await
    }

    pub async fn shutdown(&self) -> Result<()> {
        self.tx
            .send(Command::Shutdown)
            .await
            .map_err(|_| MirrorError::ServiceClosed)
    }

    pub fn root_id(&self) -> NodeId {
        self.mirror.read().root_id()
    }

    pub fn phase(&self) -> MirrorPhase {
        self.mirror.read().phase()
    }

    pub fn is_expanded(&self, folder_id: NodeId) -> bool {
        self.mirror.read().is_expanded(folder_id)
    }

    pub fn snapshot(&self, id: NodeId) -> Option<NodeSnapshot> {
        self.mirror.read().snapshot(id)
    }

    /// Ordered snapshots of a folder's children.
    pub fn children_of(&self, id: NodeId) -> Vec<NodeSnapshot> {
        self.mirror.read().children_of(id)
    }
}
