// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Builder for seeding a [`MemoryCompositor`].

use std::collections::HashSet;

use thiserror::Error;

use crate::MemoryCompositor;

/// Source kind used when a draft does not name one.
pub const DEFAULT_KIND: &str = "source";

/// Error returned by [`CompositorBuilder::build`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// A compositor needs at least one scene to have a current scene.
    #[error("scene collection is empty")]
    NoScenes,
    /// Two scenes share a name.
    #[error("duplicate scene name '{0}'")]
    DuplicateScene(String),
    /// The requested current scene is not part of the collection.
    #[error("current scene '{0}' is not in the collection")]
    UnknownCurrent(String),
}

/// Description of an item to create. Ids are assigned by the compositor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDraft {
    /// Source name.
    pub name: String,
    /// Source kind.
    pub kind: String,
    /// Whether the item is rendered.
    pub visible: bool,
    /// Whether the item is locked.
    pub locked: bool,
    /// Enclosing group, if any.
    pub group: Option<String>,
}

impl ItemDraft {
    /// Visible, unlocked, ungrouped item of the default kind.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: DEFAULT_KIND.to_owned(),
            visible: true,
            locked: false,
            group: None,
        }
    }
}

/// Items of one scene, listed front-most first.
#[derive(Debug, Default)]
pub struct SceneBuilder {
    pub(crate) items: Vec<ItemDraft>,
}

impl SceneBuilder {
    /// Append an item with the default kind.
    pub fn item(self, name: impl Into<String>) -> Self {
        self.push(ItemDraft::new(name))
    }

    /// Append an item wrapping a source of the given kind.
    pub fn source(self, name: impl Into<String>, kind: impl Into<String>) -> Self {
        self.push(ItemDraft {
            kind: kind.into(),
            ..ItemDraft::new(name)
        })
    }

    /// Append an item nested inside `group`.
    pub fn grouped(self, name: impl Into<String>, group: impl Into<String>) -> Self {
        self.push(ItemDraft {
            group: Some(group.into()),
            ..ItemDraft::new(name)
        })
    }

    /// Append a fully described item.
    pub fn push(mut self, draft: ItemDraft) -> Self {
        self.items.push(draft);
        self
    }
}

/// Builder returned by [`MemoryCompositor::builder`].
#[derive(Debug, Default)]
pub struct CompositorBuilder {
    scenes: Vec<(String, SceneBuilder)>,
    current: Option<String>,
}

impl CompositorBuilder {
    /// Add a scene populated by `populate`.
    pub fn scene(
        self,
        name: impl Into<String>,
        populate: impl FnOnce(SceneBuilder) -> SceneBuilder,
    ) -> Self {
        self.scene_with(name, populate(SceneBuilder::default()))
    }

    /// Add a scene from an already populated [`SceneBuilder`].
    pub fn scene_with(mut self, name: impl Into<String>, scene: SceneBuilder) -> Self {
        self.scenes.push((name.into(), scene));
        self
    }

    /// Choose the current scene. Defaults to the first scene added.
    pub fn current(mut self, name: impl Into<String>) -> Self {
        self.current = Some(name.into());
        self
    }

    /// Validate the collection and build the compositor.
    pub fn build(self) -> Result<MemoryCompositor, BuildError> {
        let mut seen = HashSet::new();
        for (name, _) in &self.scenes {
            if !seen.insert(name.as_str()) {
                return Err(BuildError::DuplicateScene(name.clone()));
            }
        }
        let current = match self.current {
            Some(name) if seen.contains(name.as_str()) => name,
            Some(name) => return Err(BuildError::UnknownCurrent(name)),
            None => self
                .scenes
                .first()
                .map(|(name, _)| name.clone())
                .ok_or(BuildError::NoScenes)?,
        };
        Ok(MemoryCompositor::from_parts(self.scenes, current))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_collection_is_rejected() {
        assert_eq!(
            MemoryCompositor::builder().build().err(),
            Some(BuildError::NoScenes)
        );
    }

    #[test]
    fn duplicate_scene_names_are_rejected() {
        let err = MemoryCompositor::builder()
            .scene("Main", |s| s)
            .scene("Main", |s| s.item("A"))
            .build()
            .err();
        assert_eq!(err, Some(BuildError::DuplicateScene("Main".into())));
    }

    #[test]
    fn current_must_name_a_known_scene() {
        let err = MemoryCompositor::builder()
            .scene("Main", |s| s)
            .current("Backstage")
            .build()
            .err();
        assert_eq!(err, Some(BuildError::UnknownCurrent("Backstage".into())));
    }
}
