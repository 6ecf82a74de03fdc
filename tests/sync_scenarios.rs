//! End-to-end scenarios driven through the service loop: remote
//! notifications and user intents enqueued on a handle, applied
//! sequentially on the owner context, with outbound store requests
//! captured by a recording store double.

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use invmirror::config::EngineConfig;
use invmirror::error::MirrorError;
use invmirror::store::{InventoryStore, Notification, StoreRequest};
use invmirror::sync::{MirrorEvent, MirrorHandle, MirrorPhase, MirrorService};
use invmirror::tree::node::{FolderNode, FolderRole, ItemNode, MirrorNode};
use invmirror::types::{NodeId, OwnerId, SortOrder};
use tokio::sync::mpsc::UnboundedReceiver;

/// Store double that records every request it receives.
#[derive(Default)]
struct RecordingStore {
    calls: Mutex<Vec<StoreRequest>>,
    trash_id: Mutex<Option<NodeId>>,
}

impl RecordingStore {
    fn calls(&self) -> Vec<StoreRequest> {
        self.calls.lock().unwrap().clone()
    }

    fn set_trash(&self, id: NodeId) {
        *self.trash_id.lock().unwrap() = Some(id);
    }

    fn record(&self, request: StoreRequest) {
        self.calls.lock().unwrap().push(request);
    }
}

#[async_trait]
impl InventoryStore for RecordingStore {
    async fn request_folder_contents(
        &self,
        folder_id: NodeId,
        owner_id: OwnerId,
        fetch_folders: bool,
        fetch_items: bool,
        sort_order: SortOrder,
    ) {
        self.record(StoreRequest::FolderContents {
            folder_id,
            owner_id,
            fetch_folders,
            fetch_items,
            sort_order,
        });
    }

    async fn create_folder(&self, parent_id: NodeId, name: &str) {
        self.record(StoreRequest::CreateFolder {
            parent_id,
            name: name.to_string(),
        });
    }

    async fn move_folder(&self, folder_id: NodeId, new_parent_id: NodeId, new_name: &str) {
        self.record(StoreRequest::MoveFolder {
            folder_id,
            new_parent_id,
            new_name: new_name.to_string(),
        });
    }

    async fn move_item(&self, item_id: NodeId, new_parent_id: NodeId, new_name: &str) {
        self.record(StoreRequest::MoveItem {
            item_id,
            new_parent_id,
            new_name: new_name.to_string(),
        });
    }

    async fn empty_trash(&self) {
        self.record(StoreRequest::EmptyTrash);
    }

    async fn empty_lost_and_found(&self) {
        self.record(StoreRequest::EmptyLostAndFound);
    }

    fn find_folder_for_role(&self, role: FolderRole) -> Option<NodeId> {
        match role {
            FolderRole::Trash => *self.trash_id.lock().unwrap(),
            _ => None,
        }
    }
}

fn folder(name: &str, parent: NodeId, role: FolderRole) -> MirrorNode {
    MirrorNode::Folder(FolderNode {
        id: Uuid::new_v4(),
        parent_id: Some(parent),
        name: name.to_string(),
        owner_id: Uuid::new_v4(),
        role,
    })
}

fn item(name: &str, parent: NodeId, created_secs: i64) -> MirrorNode {
    MirrorNode::Item(ItemNode {
        id: Uuid::new_v4(),
        parent_id: parent,
        name: name.to_string(),
        created_at: Utc.timestamp_opt(created_secs, 0).unwrap(),
        creator_id: Uuid::new_v4(),
        creator_name: None,
        asset_id: Uuid::new_v4(),
    })
}

async fn setup() -> (
    MirrorHandle,
    UnboundedReceiver<MirrorEvent>,
    Arc<RecordingStore>,
    NodeId,
) {
    let store = Arc::new(RecordingStore::default());
    let root = FolderNode {
        id: Uuid::new_v4(),
        parent_id: None,
        name: "My Inventory".to_string(),
        owner_id: Uuid::new_v4(),
        role: FolderRole::None,
    };
    let root_id = root.id;
    let (handle, events, _join) =
        MirrorService::spawn(root, store.clone(), EngineConfig::default());
    handle.flush().await.unwrap();
    (handle, events, store, root_id)
}

fn drain(events: &mut UnboundedReceiver<MirrorEvent>) -> Vec<MirrorEvent> {
    let mut out = Vec::new();
    while let Ok(event) = events.try_recv() {
        out.push(event);
    }
    out
}

fn contents_requests(store: &RecordingStore, folder: NodeId) -> usize {
    store
        .calls()
        .iter()
        .filter(|c| matches!(c, StoreRequest::FolderContents { folder_id, .. } if *folder_id == folder))
        .count()
}

#[tokio::test]
async fn bootstrap_goes_live_and_fetches_root() {
    let (handle, _events, store, root_id) = setup().await;
    assert_eq!(handle.phase(), MirrorPhase::Live);
    assert!(handle.is_expanded(root_id));
    assert_eq!(contents_requests(&store, root_id), 1);
}

#[tokio::test]
async fn added_folder_and_item_are_linked() {
    let (handle, _events, _store, root_id) = setup().await;
    let clothing = folder("Clothing", root_id, FolderRole::None);
    let f1 = clothing.id();
    let shirt = item("Shirt", f1, 100);
    let i1 = shirt.id();

    handle.notify(Notification::Added(clothing)).await.unwrap();
    handle.notify(Notification::Added(shirt)).await.unwrap();
    handle.flush().await.unwrap();

    let snapshot = handle.snapshot(i1).unwrap();
    assert_eq!(snapshot.parent_id, Some(f1));
    let children: Vec<NodeId> = handle.children_of(f1).iter().map(|c| c.id).collect();
    assert_eq!(children, vec![i1]);
}

#[tokio::test]
async fn duplicate_notifications_are_idempotent() {
    let (handle, _events, _store, root_id) = setup().await;
    let clothing = folder("Clothing", root_id, FolderRole::None);
    let f1 = clothing.id();
    let shirt = item("Shirt", f1, 100);

    for _ in 0..2 {
        handle
            .notify(Notification::Added(clothing.clone()))
            .await
            .unwrap();
    }
    for _ in 0..2 {
        handle
            .notify(Notification::Added(shirt.clone()))
            .await
            .unwrap();
    }
    handle.flush().await.unwrap();
    assert_eq!(handle.children_of(f1).len(), 1);
    let root_children = handle.children_of(root_id);
    assert_eq!(root_children.len(), 1);

    // Duplicate removes are a benign no-op
    for _ in 0..2 {
        handle
            .notify(Notification::Removed(clothing.clone()))
            .await
            .unwrap();
    }
    handle.flush().await.unwrap();
    assert!(handle.snapshot(f1).is_none());
    assert!(handle.children_of(root_id).is_empty());
}

#[tokio::test]
async fn orphan_is_adopted_when_parent_arrives() {
    let (handle, _events, _store, root_id) = setup().await;
    let parent = folder("Late", root_id, FolderRole::None);
    let pid = parent.id();
    let child = item("Early", pid, 100);
    let cid = child.id();

    handle.notify(Notification::Added(child)).await.unwrap();
    handle.flush().await.unwrap();
    assert!(handle.snapshot(cid).is_none());

    handle.notify(Notification::Added(parent)).await.unwrap();
    handle.flush().await.unwrap();
    let snapshot = handle.snapshot(cid).unwrap();
    assert_eq!(snapshot.parent_id, Some(pid));
}

#[tokio::test]
async fn orphan_is_discarded_after_retry_window() {
    let (handle, _events, _store, root_id) = setup().await;
    let missing_parent = Uuid::new_v4();
    let child = item("Lost", missing_parent, 100);
    let cid = child.id();

    handle.notify(Notification::Added(child)).await.unwrap();
    // Ten subsequent notifications with no matching parent
    for n in 0..10 {
        let unrelated = item(&format!("Noise {}", n), root_id, n);
        handle.notify(Notification::Added(unrelated)).await.unwrap();
    }
    handle.flush().await.unwrap();
    assert!(handle.snapshot(cid).is_none());

    // Even if the parent shows up now, the buffered add is gone
    let late_parent = MirrorNode::Folder(FolderNode {
        id: missing_parent,
        parent_id: Some(root_id),
        name: "Too late".to_string(),
        owner_id: Uuid::new_v4(),
        role: FolderRole::None,
    });
    handle.notify(Notification::Added(late_parent)).await.unwrap();
    handle.flush().await.unwrap();
    assert!(handle.snapshot(cid).is_none());
}

#[tokio::test]
async fn pending_creation_triggers_edit_exactly_once() {
    let (handle, mut events, store, root_id) = setup().await;
    handle.request_create_folder(root_id).await.unwrap();
    assert!(store.calls().contains(&StoreRequest::CreateFolder {
        parent_id: root_id,
        name: "New folder".to_string(),
    }));

    let created = folder("New folder", root_id, FolderRole::None);
    let f2 = created.id();
    handle
        .notify(Notification::Added(created.clone()))
        .await
        .unwrap();
    // Echo of the same add must not re-trigger edit mode
    handle.notify(Notification::Added(created)).await.unwrap();
    handle.flush().await.unwrap();

    let edits: Vec<_> = drain(&mut events)
        .into_iter()
        .filter(|e| matches!(e, MirrorEvent::BeginEdit(id) if *id == f2))
        .collect();
    assert_eq!(edits.len(), 1);
}

#[tokio::test]
async fn pending_creation_under_collapsed_folder_expands_first() {
    let (handle, mut events, store, root_id) = setup().await;
    let sub = folder("Sub", root_id, FolderRole::None);
    let sub_id = sub.id();
    handle.notify(Notification::Added(sub)).await.unwrap();
    handle.request_create_folder(sub_id).await.unwrap();

    let created = folder("New folder", sub_id, FolderRole::None);
    let f2 = created.id();
    handle.notify(Notification::Added(created)).await.unwrap();
    handle.flush().await.unwrap();

    assert!(handle.is_expanded(sub_id));
    // Expansion issued a fetch for the parent
    assert_eq!(contents_requests(&store, sub_id), 1);
    let events = drain(&mut events);
    let expand_pos = events
        .iter()
        .position(|e| *e == MirrorEvent::FolderExpanded(sub_id))
        .expect("parent expanded");
    let edit_pos = events
        .iter()
        .position(|e| *e == MirrorEvent::BeginEdit(f2))
        .expect("edit triggered");
    assert!(expand_pos < edit_pos);
}

#[tokio::test]
async fn abandoned_creation_clears_without_edit() {
    let (handle, mut events, _store, root_id) = setup().await;
    handle.request_create_folder(root_id).await.unwrap();

    // A non-matching add arrives first: the creation is treated as abandoned
    let unrelated = item("Unrelated", root_id, 5);
    handle.notify(Notification::Added(unrelated)).await.unwrap();
    let matching = folder("New folder", root_id, FolderRole::None);
    handle.notify(Notification::Added(matching)).await.unwrap();
    handle.flush().await.unwrap();

    assert!(!drain(&mut events)
        .iter()
        .any(|e| matches!(e, MirrorEvent::BeginEdit(_))));
}

#[tokio::test]
async fn update_with_new_parent_moves_node() {
    let (handle, _events, _store, root_id) = setup().await;
    let f1 = folder("F1", root_id, FolderRole::None);
    let f3 = folder("F3", root_id, FolderRole::None);
    let (f1_id, f3_id) = (f1.id(), f3.id());
    let shirt = item("Shirt", f1_id, 100);
    let i1 = shirt.id();

    handle.notify(Notification::Added(f1)).await.unwrap();
    handle.notify(Notification::Added(f3)).await.unwrap();
    handle.notify(Notification::Added(shirt.clone())).await.unwrap();

    let mut moved = shirt.clone();
    if let MirrorNode::Item(ref mut inner) = moved {
        inner.parent_id = f3_id;
    }
    handle
        .notify(Notification::Updated {
            old: shirt,
            new: moved,
        })
        .await
        .unwrap();
    handle.flush().await.unwrap();

    assert!(handle.children_of(f1_id).is_empty());
    let children: Vec<NodeId> = handle.children_of(f3_id).iter().map(|c| c.id).collect();
    assert_eq!(children, vec![i1]);
    assert_eq!(handle.snapshot(i1).unwrap().parent_id, Some(f3_id));
}

#[tokio::test]
async fn update_with_unresolvable_parent_is_ignored() {
    let (handle, _events, _store, root_id) = setup().await;
    let shirt = item("Shirt", root_id, 100);
    let i1 = shirt.id();
    handle.notify(Notification::Added(shirt.clone())).await.unwrap();

    let mut moved = shirt.clone();
    if let MirrorNode::Item(ref mut inner) = moved {
        inner.parent_id = Uuid::new_v4();
    }
    handle
        .notify(Notification::Updated {
            old: shirt,
            new: moved,
        })
        .await
        .unwrap();
    handle.flush().await.unwrap();

    // Still where it was
    assert_eq!(handle.snapshot(i1).unwrap().parent_id, Some(root_id));
}

#[tokio::test]
async fn out_of_order_move_echo_cannot_corrupt_the_tree() {
    let (handle, _events, _store, root_id) = setup().await;
    let a = folder("A", root_id, FolderRole::None);
    let a_id = a.id();
    handle.notify(Notification::Added(a.clone())).await.unwrap();
    let b = folder("B", a_id, FolderRole::None);
    let b_id = b.id();
    handle.notify(Notification::Added(b)).await.unwrap();
    handle.flush().await.unwrap();

    // Echo of "move B to root, then A under B", delivered out of order:
    // the first update alone would re-parent A under its own child.
    let mut moved = a.clone();
    if let MirrorNode::Folder(ref mut inner) = moved {
        inner.parent_id = Some(b_id);
    }
    handle
        .notify(Notification::Updated { old: a, new: moved })
        .await
        .unwrap();
    handle.flush().await.unwrap();

    // Rejected and ignored: the forest is untouched
    assert_eq!(handle.snapshot(a_id).unwrap().parent_id, Some(root_id));
    assert_eq!(handle.snapshot(b_id).unwrap().parent_id, Some(a_id));
    let root_children: Vec<NodeId> = handle.children_of(root_id).iter().map(|c| c.id).collect();
    assert_eq!(root_children, vec![a_id]);
}

#[tokio::test]
async fn delete_is_a_move_to_trash_not_a_removal() {
    let (handle, _events, store, root_id) = setup().await;
    let trash = folder("Trash", root_id, FolderRole::Trash);
    let trash_id = trash.id();
    store.set_trash(trash_id);
    handle.notify(Notification::Added(trash)).await.unwrap();
    let doomed = item("Doomed", root_id, 100);
    let x = doomed.id();
    handle.notify(Notification::Added(doomed.clone())).await.unwrap();
    handle.flush().await.unwrap();

    handle.request_delete(x).await.unwrap();
    assert!(store.calls().contains(&StoreRequest::MoveItem {
        item_id: x,
        new_parent_id: trash_id,
        new_name: "Doomed".to_string(),
    }));
    // Not removed until the store echoes the move
    assert!(handle.snapshot(x).is_some());
    assert_eq!(handle.snapshot(x).unwrap().parent_id, Some(root_id));

    let mut trashed = doomed.clone();
    if let MirrorNode::Item(ref mut inner) = trashed {
        inner.parent_id = trash_id;
    }
    handle
        .notify(Notification::Updated {
            old: doomed,
            new: trashed,
        })
        .await
        .unwrap();
    handle.flush().await.unwrap();
    assert_eq!(handle.snapshot(x).unwrap().parent_id, Some(trash_id));
}

#[tokio::test]
async fn protected_folders_reject_edits() {
    let (handle, _events, store, root_id) = setup().await;
    let trash = folder("Trash", root_id, FolderRole::Trash);
    let trash_id = trash.id();
    store.set_trash(trash_id);
    let dest = folder("Dest", root_id, FolderRole::None);
    let dest_id = dest.id();
    handle.notify(Notification::Added(trash)).await.unwrap();
    handle.notify(Notification::Added(dest)).await.unwrap();
    handle.flush().await.unwrap();

    assert_eq!(
        handle.request_rename(trash_id, "Junk").await,
        Err(MirrorError::Protected(trash_id))
    );
    assert_eq!(
        handle.request_delete(trash_id).await,
        Err(MirrorError::Protected(trash_id))
    );
    assert_eq!(
        handle.request_move(trash_id, dest_id).await,
        Err(MirrorError::Protected(trash_id))
    );
    // No move request ever left the engine
    assert!(!store
        .calls()
        .iter()
        .any(|c| matches!(c, StoreRequest::MoveFolder { folder_id, .. } if *folder_id == trash_id)));
}

#[tokio::test]
async fn rename_is_optimistic_and_echo_is_a_no_op() {
    let (handle, _events, store, root_id) = setup().await;
    let shirt = item("Shirt", root_id, 100);
    let i1 = shirt.id();
    handle.notify(Notification::Added(shirt.clone())).await.unwrap();
    handle.flush().await.unwrap();

    handle.request_rename(i1, "Blue Shirt").await.unwrap();
    assert_eq!(handle.snapshot(i1).unwrap().name, "Blue Shirt");
    assert!(store.calls().contains(&StoreRequest::MoveItem {
        item_id: i1,
        new_parent_id: root_id,
        new_name: "Blue Shirt".to_string(),
    }));

    // Authoritative echo matching the optimistic state changes nothing
    let mut renamed = shirt.clone();
    if let MirrorNode::Item(ref mut inner) = renamed {
        inner.name = "Blue Shirt".to_string();
    }
    handle
        .notify(Notification::Updated {
            old: shirt,
            new: renamed,
        })
        .await
        .unwrap();
    handle.flush().await.unwrap();
    assert_eq!(handle.snapshot(i1).unwrap().name, "Blue Shirt");
    assert_eq!(handle.children_of(root_id).len(), 1);
}

#[tokio::test]
async fn empty_rename_is_rejected_before_any_request() {
    let (handle, _events, store, root_id) = setup().await;
    let shirt = item("Shirt", root_id, 100);
    let i1 = shirt.id();
    handle.notify(Notification::Added(shirt)).await.unwrap();
    handle.flush().await.unwrap();

    let before = store.calls().len();
    assert_eq!(
        handle.request_rename(i1, "   ").await,
        Err(MirrorError::EmptyLabel)
    );
    assert_eq!(handle.snapshot(i1).unwrap().name, "Shirt");
    assert_eq!(store.calls().len(), before);
}

#[tokio::test]
async fn expansion_fetches_once_refresh_forces_and_clears() {
    let (handle, _events, store, root_id) = setup().await;
    let f1 = folder("F1", root_id, FolderRole::None);
    let f1_id = f1.id();
    handle.notify(Notification::Added(f1)).await.unwrap();
    let stale = item("Stale", f1_id, 100);
    let stale_id = stale.id();
    handle.notify(Notification::Added(stale)).await.unwrap();
    handle.flush().await.unwrap();

    handle.request_expand(f1_id).await.unwrap();
    handle.request_expand(f1_id).await.unwrap();
    assert_eq!(contents_requests(&store, f1_id), 1);

    handle.request_refresh(f1_id).await.unwrap();
    assert_eq!(contents_requests(&store, f1_id), 2);
    // Stale entries are gone until the store streams fresh contents
    assert!(handle.snapshot(stale_id).is_none());
    assert!(handle.children_of(f1_id).is_empty());
}

#[tokio::test]
async fn cycle_creating_move_is_rejected_and_index_unchanged() {
    let (handle, _events, _store, root_id) = setup().await;
    let a = folder("A", root_id, FolderRole::None);
    let a_id = a.id();
    handle.notify(Notification::Added(a)).await.unwrap();
    let b = folder("B", a_id, FolderRole::None);
    let b_id = b.id();
    handle.notify(Notification::Added(b)).await.unwrap();
    handle.flush().await.unwrap();

    assert_eq!(
        handle.request_move(a_id, b_id).await,
        Err(MirrorError::InvalidMove {
            node: a_id,
            target: b_id
        })
    );
    assert_eq!(handle.snapshot(a_id).unwrap().parent_id, Some(root_id));
    assert_eq!(handle.snapshot(b_id).unwrap().parent_id, Some(a_id));
}

#[tokio::test]
async fn move_onto_item_targets_its_folder() {
    let (handle, _events, store, root_id) = setup().await;
    let dest = folder("Dest", root_id, FolderRole::None);
    let dest_id = dest.id();
    handle.notify(Notification::Added(dest)).await.unwrap();
    let target = item("Target", dest_id, 100);
    let target_id = target.id();
    handle.notify(Notification::Added(target)).await.unwrap();
    let source = item("Source", root_id, 50);
    let source_id = source.id();
    handle.notify(Notification::Added(source)).await.unwrap();
    handle.flush().await.unwrap();

    handle.request_move(source_id, target_id).await.unwrap();
    assert!(store.calls().contains(&StoreRequest::MoveItem {
        item_id: source_id,
        new_parent_id: dest_id,
        new_name: "Source".to_string(),
    }));
    // The index stays put until the echo lands
    assert_eq!(handle.snapshot(source_id).unwrap().parent_id, Some(root_id));
}

#[tokio::test]
async fn owner_names_are_cached_on_items() {
    let (handle, _events, _store, root_id) = setup().await;
    let creator = Uuid::new_v4();
    let mut shirt = item("Shirt", root_id, 100);
    if let MirrorNode::Item(ref mut inner) = shirt {
        inner.creator_id = creator;
    }
    let i1 = shirt.id();
    handle.notify(Notification::Added(shirt)).await.unwrap();
    handle.note_owner_name(creator, "Philip Linden").await.unwrap();

    assert_eq!(
        handle.snapshot(i1).unwrap().creator_name.as_deref(),
        Some("Philip Linden")
    );
}

#[tokio::test]
async fn empty_trash_and_lost_and_found_are_forwarded() {
    let (handle, _events, store, _root_id) = setup().await;
    handle.request_empty_trash().await.unwrap();
    handle.request_empty_lost_and_found().await.unwrap();
    let calls = store.calls();
    assert!(calls.contains(&StoreRequest::EmptyTrash));
    assert!(calls.contains(&StoreRequest::EmptyLostAndFound));
}

#[tokio::test]
async fn shutdown_closes_the_service() {
    let (handle, _events, _store, root_id) = setup().await;
    handle.shutdown().await.unwrap();
    // Commands after shutdown fail once the loop has exited
    let mut last = Ok(());
    for _ in 0..100 {
        last = handle.request_collapse(root_id).await;
        if last.is_err() {
            break;
        }
        tokio::task::yield_now().await;
    }
    assert_eq!(last, Err(MirrorError::ServiceClosed));
}
