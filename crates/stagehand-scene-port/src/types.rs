// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Core scene types for the compositor port contract.
//!
//! These types are plain domain objects. JSON payloads are produced by
//! stagehand-proto.

use std::fmt;

/// Compositor-assigned item id, unique within the owning scene.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SceneItemId(pub u64);

impl fmt::Display for SceneItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Scene name. Unique across a compositor.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SceneName(String);

impl SceneName {
    /// Wrap a scene name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Borrow the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SceneName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SceneName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for SceneName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Handle to a scene, valid for the duration of one operation.
///
/// Handles are cheap values. Holding one does not keep the scene alive; a
/// scene removed by the compositor between lookup and use surfaces as
/// [`UpdateError::SceneGone`](crate::UpdateError::SceneGone) or a `None`
/// listing.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SceneHandle {
    name: SceneName,
}

impl SceneHandle {
    /// Create a handle for the named scene. Only compositors should call this.
    pub fn new(name: impl Into<SceneName>) -> Self {
        Self { name: name.into() }
    }

    /// Name of the scene this handle refers to.
    pub fn name(&self) -> &SceneName {
        &self.name
    }
}

/// One entry in a scene's item order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SceneItem {
    /// Id unique within the owning scene.
    pub id: SceneItemId,
    /// Name of the wrapped source. Not unique: a source may appear twice.
    pub name: String,
    /// Source kind reported by the compositor (e.g. "image_source").
    pub kind: String,
    /// Whether the item is rendered.
    pub visible: bool,
    /// Whether the item is locked against interactive edits.
    pub locked: bool,
    /// Name of the group this item is nested in, if any.
    pub group: Option<String>,
}

impl SceneItem {
    /// Whether the item lives inside a group rather than at scene level.
    pub fn is_grouped(&self) -> bool {
        self.group.is_some()
    }
}
