// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! [`MemoryCompositor`] and its per-scene region bookkeeping.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use stagehand_scene_port::{
    Compositor, SceneHandle, SceneItem, SceneItemId, SceneName, SceneTxn, UpdateError,
};
use tracing::trace;

use crate::builder::{CompositorBuilder, ItemDraft, SceneBuilder};
use crate::txn::MemoryTxn;

/// Published order of one scene.
#[derive(Default)]
struct Published {
    items: Vec<SceneItem>,
    revision: u64,
    /// Set once the scene leaves the registry. Nothing publishes after that.
    removed: bool,
}

struct SceneSlot {
    name: SceneName,
    /// Held for the whole of a region; serializes writers.
    region: Mutex<()>,
    published: RwLock<Published>,
    next_id: Mutex<u64>,
}

impl SceneSlot {
    fn new(name: SceneName) -> Self {
        Self {
            name,
            region: Mutex::new(()),
            published: RwLock::new(Published::default()),
            next_id: Mutex::new(1),
        }
    }

    fn snapshot(&self) -> Vec<SceneItem> {
        self.published
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .items
            .clone()
    }

    fn is_removed(&self) -> bool {
        self.published
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .removed
    }

    fn mark_removed(&self) {
        self.published
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .removed = true;
    }

    fn revision(&self) -> u64 {
        self.published
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .revision
    }

    /// Append an item behind every existing one. Creation is the compositor's
    /// own business, so it takes the region like any other writer. `None` once
    /// the scene is removed.
    fn append(&self, draft: ItemDraft) -> Option<SceneItemId> {
        let _region = self.region.lock().unwrap_or_else(PoisonError::into_inner);
        let mut published = self
            .published
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if published.removed {
            return None;
        }
        let id = {
            let mut next = self.next_id.lock().unwrap_or_else(PoisonError::into_inner);
            let id = SceneItemId(*next);
            *next += 1;
            id
        };
        published.items.push(SceneItem {
            id,
            name: draft.name,
            kind: draft.kind,
            visible: draft.visible,
            locked: draft.locked,
            group: draft.group,
        });
        published.revision += 1;
        Some(id)
    }
}

struct Registry {
    scenes: Vec<Arc<SceneSlot>>,
    current: SceneName,
}

/// In-memory [`Compositor`] adapter.
///
/// Scenes are listed in insertion order. Item ids are assigned per scene,
/// starting at 1, and never reused.
pub struct MemoryCompositor {
    registry: RwLock<Registry>,
}

impl fmt::Debug for MemoryCompositor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.registry.read().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("MemoryCompositor")
            .field(
                "scenes",
                &registry.scenes.iter().map(|slot| slot.name.as_str()).collect::<Vec<_>>(),
            )
            .field("current", &registry.current.as_str())
            .finish()
    }
}

impl MemoryCompositor {
    /// Start building a compositor.
    pub fn builder() -> CompositorBuilder {
        CompositorBuilder::default()
    }

    pub(crate) fn from_parts(scenes: Vec<(String, SceneBuilder)>, current: String) -> Self {
        let slots = scenes
            .into_iter()
            .map(|(name, scene)| {
                let slot = SceneSlot::new(SceneName::new(name));
                for draft in scene.items {
                    slot.append(draft);
                }
                Arc::new(slot)
            })
            .collect();
        Self {
            registry: RwLock::new(Registry {
                scenes: slots,
                current: SceneName::new(current),
            }),
        }
    }

    fn slot(&self, name: &SceneName) -> Option<Arc<SceneSlot>> {
        self.registry
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .scenes
            .iter()
            .find(|slot| &slot.name == name)
            .cloned()
    }

    /// Add an empty scene. Returns `None` if the name is taken.
    pub fn add_scene(&self, name: impl Into<SceneName>) -> Option<SceneHandle> {
        let name = name.into();
        let mut registry = self
            .registry
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if registry.scenes.iter().any(|slot| slot.name == name) {
            return None;
        }
        registry
            .scenes
            .push(Arc::new(SceneSlot::new(name.clone())));
        Some(SceneHandle::new(name))
    }

    /// Remove a scene. The last remaining scene cannot be removed; removing
    /// the current scene makes the first remaining scene current.
    pub fn remove_scene(&self, name: &str) -> bool {
        let mut registry = self
            .registry
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if registry.scenes.len() <= 1 {
            return false;
        }
        let Some(index) = registry
            .scenes
            .iter()
            .position(|slot| slot.name.as_str() == name)
        else {
            return false;
        };
        // Flagged under the scene's publish lock: an open region on it will
        // report the scene gone instead of committing.
        registry.scenes.remove(index).mark_removed();
        if registry.current.as_str() == name {
            registry.current = registry.scenes[0].name.clone();
        }
        true
    }

    /// Append an item at the back of a scene. Returns `None` if the scene is gone.
    pub fn add_item(&self, scene: &SceneHandle, draft: ItemDraft) -> Option<SceneItemId> {
        self.slot(scene.name()).and_then(|slot| slot.append(draft))
    }

    /// Number of published changes to a scene's order since creation.
    pub fn revision(&self, scene: &SceneHandle) -> Option<u64> {
        self.slot(scene.name()).map(|slot| slot.revision())
    }
}

impl Compositor for MemoryCompositor {
    fn find_scene(&self, name: &str) -> Option<SceneHandle> {
        self.registry
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .scenes
            .iter()
            .find(|slot| slot.name.as_str() == name)
            .map(|slot| SceneHandle::new(slot.name.clone()))
    }

    fn current_scene(&self) -> SceneHandle {
        let registry = self.registry.read().unwrap_or_else(PoisonError::into_inner);
        SceneHandle::new(registry.current.clone())
    }

    fn scenes(&self) -> Vec<SceneHandle> {
        self.registry
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .scenes
            .iter()
            .map(|slot| SceneHandle::new(slot.name.clone()))
            .collect()
    }

    fn list_items(&self, scene: &SceneHandle) -> Option<Vec<SceneItem>> {
        self.slot(scene.name()).map(|slot| slot.snapshot())
    }

    fn set_current_scene(&self, scene: &SceneHandle) -> bool {
        let mut registry = self
            .registry
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if !registry.scenes.iter().any(|slot| &slot.name == scene.name()) {
            return false;
        }
        registry.current = scene.name().clone();
        true
    }

    fn atomic_update<R, E, F>(&self, scene: &SceneHandle, update: F) -> Result<R, UpdateError<E>>
    where
        F: FnOnce(&mut dyn SceneTxn) -> Result<R, E>,
    {
        let slot = self
            .slot(scene.name())
            .ok_or_else(|| UpdateError::SceneGone(scene.name().clone()))?;

        // A poisoned region only means an earlier closure panicked; its
        // staged copy was dropped unpublished.
        let _region = slot.region.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.is_removed() {
            return Err(UpdateError::SceneGone(scene.name().clone()));
        }
        let mut txn = MemoryTxn::new(scene.clone(), slot.snapshot());
        let value = update(&mut txn).map_err(UpdateError::Aborted)?;

        let mut published = slot
            .published
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        // The scene may have been removed while the closure ran.
        if published.removed {
            return Err(UpdateError::SceneGone(scene.name().clone()));
        }
        if let Some(staged) = txn.into_staged() {
            if published.items != staged {
                published.items = staged;
                published.revision += 1;
                trace!(scene = %slot.name, revision = published.revision, "published scene order");
            }
        }
        Ok(value)
    }
}
