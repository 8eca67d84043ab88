//! In-memory mutations of the inventory tree.
//!
//! Every function here works on a loaded [`State`] and never touches storage.
//! On error the state is left exactly as it was passed in.

use crate::domain::model::{Freezer, Item, MoveOutcome, MovePolicy, NewItem, State};
use crate::utils::error::{InventoryError, Result};

/// Append a new item to the first freezer named `freezer`.
///
/// No duplicate check is made: adding the same name and date twice yields two
/// items.
pub fn add_item(state: &mut State, freezer: &str, item: NewItem) -> Result<()> {
    let target = state
        .freezer_mut(freezer)
        .ok_or_else(|| InventoryError::FreezerNotFound {
            freezer: freezer.to_string(),
        })?;

    target.contents.push(item.into());
    Ok(())
}

/// Remove every occurrence of `container` and prune the items it emptied.
///
/// Returns how many occurrences were removed. An unknown container is not an
/// error and leaves the state untouched, including items that were already
/// empty.
pub fn remove_container(state: &mut State, container: &str) -> usize {
    let mut removed = 0;

    for freezer in &mut state.freezers {
        freezer.contents.retain_mut(|item| {
            let before = item.containers.len();
            item.containers.retain(|c| c != container);
            let lost = before - item.containers.len();
            removed += lost;
            lost == 0 || !item.containers.is_empty()
        });
    }

    removed
}

/// Move `container` into the freezer named `destination`.
///
/// The container joins an existing item with the same name and date as the
/// item it left, or a new single-container item. See [`MovePolicy`] for how
/// unknown containers and destinations are handled.
pub fn move_container(
    state: &mut State,
    container: &str,
    destination: &str,
    policy: MovePolicy,
) -> Result<MoveOutcome> {
    let source = state
        .item_holding(container)
        .map(|item| Item::new(item.name.clone(), item.date.clone(), Vec::new()));

    let identity = match policy {
        MovePolicy::Strict => {
            if state.freezer(destination).is_none() {
                return Err(InventoryError::DestinationFreezerNotFound {
                    freezer: destination.to_string(),
                });
            }
            source.ok_or_else(|| InventoryError::ContainerNotFound {
                container: container.to_string(),
            })?
        }
        MovePolicy::Lossy => match source {
            Some(identity) => identity,
            None if state.freezer(destination).is_none() => return Ok(MoveOutcome::Untracked),
            // 找不到容器時沿用空白名稱與日期
            None => Item::default(),
        },
    };

    remove_container(state, container);

    let Some(target) = state.freezer_mut(destination) else {
        return Ok(MoveOutcome::Dropped);
    };

    Ok(place(target, &identity, container))
}

fn place(freezer: &mut Freezer, identity: &Item, container: &str) -> MoveOutcome {
    if let Some(existing) = freezer
        .contents
        .iter_mut()
        .find(|item| item.same_identity(identity))
    {
        existing.containers.push(container.to_string());
        return MoveOutcome::Merged;
    }

    freezer.contents.push(Item::new(
        identity.name.clone(),
        identity.date.clone(),
        vec![container.to_string()],
    ));
    MoveOutcome::Created
}
