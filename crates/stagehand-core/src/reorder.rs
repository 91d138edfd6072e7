// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Atomic full-list reorder.

use stagehand_scene_port::{Compositor, SceneHandle, SceneItem, SceneItemId};
use tracing::{debug, info, warn};

use crate::{resolve, ItemRef, OrderError};

/// Replace the order of the listed items as one indivisible change.
///
/// Every identifier is resolved against the order at region entry. The first
/// failure aborts the region with nothing applied. The resolved ids are then
/// handed to the compositor exactly as supplied; a rejection there is also a
/// [`OrderError::ReorderValidationFailed`] and also leaves the order intact.
pub(crate) fn reorder<C: Compositor>(
    compositor: &C,
    scene: &SceneHandle,
    refs: &[ItemRef],
) -> Result<(), OrderError> {
    if refs.is_empty() {
        debug!(scene = %scene.name(), "empty reorder list; nothing to do");
        return Ok(());
    }

    compositor
        .atomic_update(scene, |txn| {
            let order = resolve_all(txn.items(), refs)?;
            if txn.apply_full_order(&order) {
                Ok(())
            } else {
                Err(OrderError::ReorderValidationFailed {
                    index: None,
                    reason: "compositor rejected the resulting order".into(),
                })
            }
        })
        .map_err(OrderError::from)
        .inspect(|_| info!(scene = %scene.name(), count = refs.len(), "reordered scene items"))
        .inspect_err(|err| warn!(scene = %scene.name(), code = err.code(), %err, "reorder rejected"))
}

fn resolve_all(items: &[SceneItem], refs: &[ItemRef]) -> Result<Vec<SceneItemId>, OrderError> {
    refs.iter()
        .enumerate()
        .map(|(index, item)| {
            resolve(items, item)
                .map(|found| found.id)
                .map_err(|cause| OrderError::ReorderValidationFailed {
                    index: Some(index),
                    reason: cause.to_string(),
                })
        })
        .collect()
}
