// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Compositor port traits defining the ordering contract.

use std::sync::Arc;

use thiserror::Error;

use crate::{OrderMovement, SceneHandle, SceneItem, SceneItemId, SceneName};

/// Exclusive view of one scene's order inside an atomic-update region.
///
/// A `SceneTxn` only exists for the duration of the closure passed to
/// [`Compositor::atomic_update`]. Mutating methods return `false` when the
/// compositor refuses the change; a refused change leaves the order as it was.
pub trait SceneTxn {
    /// Scene this region is scoped to.
    fn scene(&self) -> &SceneHandle;

    /// Current order inside the region, front-most first.
    ///
    /// Reflects the order at region entry plus any edits already made
    /// through this transaction.
    fn items(&self) -> &[SceneItem];

    /// Replace the order of the listed items.
    ///
    /// `order` is applied as given: the first id ends up front-most among the
    /// slots it rearranges. Rejects duplicate or unknown ids as a whole.
    fn apply_full_order(&mut self, order: &[SceneItemId]) -> bool;

    /// Move one item relative to its current position.
    fn move_relative(&mut self, item: SceneItemId, movement: OrderMovement) -> bool;

    /// Move one item to an explicit index. Range policy belongs to the
    /// implementation (clamp or reject).
    fn set_index(&mut self, item: SceneItemId, index: i64) -> bool;
}

/// Why an atomic-update region did not produce a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpdateError<E> {
    /// The scene vanished between lookup and region entry.
    #[error("scene '{0}' no longer exists")]
    SceneGone(SceneName),
    /// The closure returned an error; nothing it staged was published.
    #[error("{0}")]
    Aborted(E),
}

/// Compositor port.
///
/// Implementors own scenes and their item order. Reads may happen from any
/// thread at any time; writes only happen inside [`atomic_update`].
///
/// # Concurrency
///
/// `atomic_update` must provide mutual exclusion against other regions on the
/// same scene, and readers calling [`list_items`] must observe either the
/// order before the region or the order after it.
///
/// [`atomic_update`]: Compositor::atomic_update
/// [`list_items`]: Compositor::list_items
pub trait Compositor: Send + Sync {
    /// Look up a scene by exact name.
    fn find_scene(&self, name: &str) -> Option<SceneHandle>;

    /// The scene currently being shown.
    fn current_scene(&self) -> SceneHandle;

    /// All scenes, in the compositor's listing order.
    fn scenes(&self) -> Vec<SceneHandle>;

    /// Snapshot of a scene's order, front-most first. `None` if the scene is gone.
    fn list_items(&self, scene: &SceneHandle) -> Option<Vec<SceneItem>>;

    /// Make `scene` the current scene. Returns `false` if it no longer exists.
    fn set_current_scene(&self, scene: &SceneHandle) -> bool;

    /// Run `update` with exclusive access to the scene's order.
    ///
    /// Changes made through the transaction are published only if `update`
    /// returns `Ok`. The region is released on every exit path, including
    /// unwinding.
    fn atomic_update<R, E, F>(&self, scene: &SceneHandle, update: F) -> Result<R, UpdateError<E>>
    where
        F: FnOnce(&mut dyn SceneTxn) -> Result<R, E>;
}

impl<C: Compositor> Compositor for Arc<C> {
    fn find_scene(&self, name: &str) -> Option<SceneHandle> {
        (**self).find_scene(name)
    }

    fn current_scene(&self) -> SceneHandle {
        (**self).current_scene()
    }

    fn scenes(&self) -> Vec<SceneHandle> {
        (**self).scenes()
    }

    fn list_items(&self, scene: &SceneHandle) -> Option<Vec<SceneItem>> {
        (**self).list_items(scene)
    }

    fn set_current_scene(&self, scene: &SceneHandle) -> bool {
        (**self).set_current_scene(scene)
    }

    fn atomic_update<R, E, F>(&self, scene: &SceneHandle, update: F) -> Result<R, UpdateError<E>>
    where
        F: FnOnce(&mut dyn SceneTxn) -> Result<R, E>,
    {
        (**self).atomic_update(scene, update)
    }
}
