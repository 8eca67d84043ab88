use freezer_tracker::{
    Freezer, Inventory, InventoryError, Item, JsonFileStore, MemoryStore, MovePolicy, NewItem,
    State, StateStore,
};
use std::sync::Arc;
use tempfile::TempDir;
use tokio_test::{assert_err, assert_ok};

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn household() -> State {
    State {
        containers: strings(&["lid-3", "bag-9"]),
        freezers: vec![
            Freezer {
                name: "A".to_string(),
                contents: vec![Item::new("Pie", "2021", strings(&["c1", "c2"]))],
            },
            Freezer {
                name: "B".to_string(),
                contents: vec![
                    Item::new("Soup", "2022-11", strings(&["s1"])),
                    Item::new("Bread", "", strings(&["b1", "b2", "b3"])),
                ],
            },
        ],
    }
}

async fn file_inventory(dir: &TempDir, policy: MovePolicy) -> (Arc<JsonFileStore>, Inventory) {
    let store = Arc::new(JsonFileStore::new(dir.path().join("contents.json")));
    store.save(&household()).await.unwrap();
    let inventory = Inventory::with_move_policy(store.clone(), policy);
    (store, inventory)
}

#[tokio::test]
async fn test_round_trip_preserves_order_and_values() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::new(dir.path().join("contents.json"));

    let original = household();
    assert_ok!(store.save(&original).await);
    let loaded = store.load().await.unwrap();

    assert_eq!(loaded, original);
    let names: Vec<&str> = loaded.freezers[1]
        .contents
        .iter()
        .map(|item| item.name.as_str())
        .collect();
    assert_eq!(names, vec!["Soup", "Bread"]);
}

#[tokio::test]
async fn test_remove_walkthrough_on_disk() {
    let dir = TempDir::new().unwrap();
    let (store, inventory) = file_inventory(&dir, MovePolicy::Strict).await;

    inventory.remove_container("c1").await.unwrap();
    assert_eq!(
        store.load().await.unwrap().freezers[0].contents,
        vec![Item::new("Pie", "2021", strings(&["c2"]))]
    );

    inventory.remove_container("c2").await.unwrap();
    let state = store.load().await.unwrap();
    assert!(state.freezers[0].contents.is_empty());
    assert_eq!(state.containers, strings(&["lid-3", "bag-9"]));
}

#[tokio::test]
async fn test_failed_add_keeps_file_bytes() {
    let dir = TempDir::new().unwrap();
    let (store, inventory) = file_inventory(&dir, MovePolicy::Strict).await;
    let before = std::fs::read(store.path()).unwrap();

    let item = NewItem {
        name: "Ice".to_string(),
        date: "2025".to_string(),
        containers: strings(&["i1"]),
    };
    let err = assert_err!(inventory.add_item("Z", item).await);
    assert!(matches!(err, InventoryError::FreezerNotFound { .. }));

    assert_eq!(std::fs::read(store.path()).unwrap(), before);
}

#[tokio::test]
async fn test_lossy_move_to_missing_freezer_loses_container() {
    let dir = TempDir::new().unwrap();
    let (store, inventory) = file_inventory(&dir, MovePolicy::Lossy).await;

    let state = inventory.move_container("s1", "Z").await.unwrap();

    assert_eq!(state, store.load().await.unwrap());
    assert!(state.item_holding("s1").is_none());
    assert_eq!(
        state.freezers[1].contents,
        vec![Item::new("Bread", "", strings(&["b1", "b2", "b3"]))]
    );
    assert_eq!(state.freezers[0], household().freezers[0]);
}

#[tokio::test]
async fn test_concurrent_adds_are_not_lost() {
    let store = Arc::new(MemoryStore::with_state(household()));
    let inventory = Arc::new(Inventory::new(store.clone()));

    let mut handles = Vec::new();
    for i in 0..16 {
        let inventory = inventory.clone();
        handles.push(tokio::spawn(async move {
            let item = NewItem {
                name: format!("Batch {}", i),
                date: "2025-01".to_string(),
                containers: vec![format!("batch-{}", i)],
            };
            inventory.add_item("A", item).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let state = store.load().await.unwrap();
    assert_eq!(state.freezers[0].contents.len(), 17);
    assert_eq!(store.save_count(), 16);
    for i in 0..16 {
        assert!(state.item_holding(&format!("batch-{}", i)).is_some());
    }
}

#[tokio::test]
async fn test_moves_keep_each_container_in_one_item() {
    let store = Arc::new(MemoryStore::with_state(household()));
    let inventory = Inventory::new(store.clone());

    inventory.move_container("b2", "A").await.unwrap();
    inventory.move_container("b2", "B").await.unwrap();
    inventory.move_container("c1", "B").await.unwrap();

    let state = store.load().await.unwrap();
    for container in ["c1", "c2", "s1", "b1", "b2", "b3"] {
        let holders = state
            .freezers
            .iter()
            .flat_map(|f| f.contents.iter())
            .filter(|item| item.holds(container))
            .count();
        assert_eq!(holders, 1, "container {container} should live in exactly one item");
    }
    assert_eq!(state.container_count(), household().container_count());
}
