// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Single-item repositioning: relative moves and explicit indexes.

use stagehand_scene_port::{Compositor, OrderMovement, SceneHandle, SceneItemId, SceneTxn};
use tracing::{info, warn};

use crate::{resolve, ItemRef, OrderError};

pub(crate) fn move_item<C: Compositor>(
    compositor: &C,
    scene: &SceneHandle,
    item: &ItemRef,
    movement: OrderMovement,
) -> Result<(), OrderError> {
    reposition(compositor, scene, item, "move", |txn, id| {
        txn.move_relative(id, movement)
    })
    .inspect(|_| info!(scene = %scene.name(), item = %item, %movement, "moved scene item"))
}

pub(crate) fn set_index<C: Compositor>(
    compositor: &C,
    scene: &SceneHandle,
    item: &ItemRef,
    index: i64,
) -> Result<(), OrderError> {
    reposition(compositor, scene, item, "index change", |txn, id| {
        txn.set_index(id, index)
    })
    .inspect(|_| info!(scene = %scene.name(), item = %item, index, "set scene item index"))
}

/// Resolve `item` and apply `mutate` inside one region.
fn reposition<C, F>(
    compositor: &C,
    scene: &SceneHandle,
    item: &ItemRef,
    what: &'static str,
    mutate: F,
) -> Result<(), OrderError>
where
    C: Compositor,
    F: FnOnce(&mut dyn SceneTxn, SceneItemId) -> bool,
{
    compositor
        .atomic_update(scene, |txn| {
            let id = resolve(txn.items(), item)?.id;
            if mutate(txn, id) {
                Ok(())
            } else {
                Err(OrderError::MutationRejected(what))
            }
        })
        .map_err(OrderError::from)
        .inspect_err(|err| warn!(scene = %scene.name(), item = %item, code = err.code(), %err, "{what} failed"))
}
