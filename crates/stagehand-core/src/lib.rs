// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Scene item ordering engine.
//!
//! `stagehand-core` resolves scenes and items and applies ordering changes
//! through the [`Compositor`] port:
//!
//! - [`locate`] finds a scene by name or falls back to the current scene.
//! - [`resolve`] finds an item by id or name inside a snapshot.
//! - [`OrderEngine::reorder`] replaces the order of a list of items atomically.
//! - [`OrderEngine::move_item`] moves one item up, down, to the top or bottom.
//! - [`OrderEngine::set_index`] moves one item to an explicit index.
//!
//! Every mutation runs inside a single [`Compositor::atomic_update`] region
//! covering both validation and application, so a concurrent reader never
//! sees a half-applied order and a failed operation leaves nothing behind.
//!
//! # Ordering convention
//!
//! Listings are front-most first. Index 0 is the top of the stack. Reorder
//! lists are applied as supplied: the first identifier becomes front-most.
//!
//! # Groups
//!
//! Items nested in groups are not reorderable here. Identifiers resolving to
//! a grouped item are rejected rather than moved across group boundaries.

mod error;
mod item_ref;
mod locate;
mod position;
mod reorder;

pub use error::OrderError;
pub use item_ref::{resolve, ItemRef};
pub use locate::locate;
pub use stagehand_scene_port::{
    Compositor, OrderMovement, SceneHandle, SceneItem, SceneItemId, SceneName,
};

/// Ordering operations bound to one compositor.
#[derive(Clone, Debug)]
pub struct OrderEngine<C> {
    compositor: C,
}

impl<C: Compositor> OrderEngine<C> {
    /// Wrap a compositor.
    pub fn new(compositor: C) -> Self {
        Self { compositor }
    }

    /// Borrow the underlying compositor (for pass-through operations such
    /// as switching the current scene).
    pub fn compositor(&self) -> &C {
        &self.compositor
    }

    /// See [`locate`].
    pub fn locate(&self, name: Option<&str>) -> Result<SceneHandle, OrderError> {
        locate(&self.compositor, name)
    }

    /// Current order of `scene`, front-most first.
    pub fn items(&self, scene: &SceneHandle) -> Result<Vec<SceneItem>, OrderError> {
        self.compositor
            .list_items(scene)
            .ok_or_else(|| OrderError::SceneNotFound(scene.name().to_string()))
    }

    /// Current scene and every scene with its order.
    ///
    /// Scenes removed while the listing is assembled are skipped.
    pub fn scene_list(&self) -> (SceneHandle, Vec<(SceneHandle, Vec<SceneItem>)>) {
        let current = self.compositor.current_scene();
        let scenes = self
            .compositor
            .scenes()
            .into_iter()
            .filter_map(|scene| {
                let items = self.compositor.list_items(&scene)?;
                Some((scene, items))
            })
            .collect();
        (current, scenes)
    }

    /// Replace the order of the listed items in one atomic step.
    ///
    /// All-or-nothing: if any identifier fails to resolve, or the compositor
    /// rejects the arrangement, the scene keeps its previous order and
    /// [`OrderError::ReorderValidationFailed`] is returned. Items not listed
    /// keep their positions. An empty list changes nothing.
    pub fn reorder(&self, scene: &SceneHandle, items: &[ItemRef]) -> Result<(), OrderError> {
        reorder::reorder(&self.compositor, scene, items)
    }

    /// Move one item relative to its position. Moving past an edge is a
    /// successful no-op.
    pub fn move_item(
        &self,
        scene: &SceneHandle,
        item: &ItemRef,
        movement: OrderMovement,
    ) -> Result<(), OrderError> {
        position::move_item(&self.compositor, scene, item, movement)
    }

    /// Like [`move_item`](Self::move_item), parsing `token` first.
    ///
    /// The token is checked before the item is resolved, so an unknown token
    /// is [`OrderError::InvalidOrderToken`] even for a missing item.
    pub fn move_item_by_token(
        &self,
        scene: &SceneHandle,
        item: &ItemRef,
        token: &str,
    ) -> Result<(), OrderError> {
        let movement = token
            .parse::<OrderMovement>()
            .map_err(|err| OrderError::InvalidOrderToken(err.0))?;
        self.move_item(scene, item, movement)
    }

    /// Move one item to `index`. Out-of-range handling is the compositor's;
    /// its verdict is propagated as [`OrderError::MutationRejected`].
    pub fn set_index(
        &self,
        scene: &SceneHandle,
        item: &ItemRef,
        index: i64,
    ) -> Result<(), OrderError> {
        position::set_index(&self.compositor, scene, item, index)
    }
}
