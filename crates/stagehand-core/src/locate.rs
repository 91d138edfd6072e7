// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Scene lookup.

use stagehand_scene_port::{Compositor, SceneHandle};
use tracing::debug;

use crate::OrderError;

/// Find the named scene, or the current scene when no name is given.
///
/// An empty name counts as "no name". A name that does not exist is always
/// [`OrderError::SceneNotFound`]; it never falls back to the current scene.
pub fn locate<C: Compositor>(compositor: &C, name: Option<&str>) -> Result<SceneHandle, OrderError> {
    match name.filter(|name| !name.is_empty()) {
        Some(name) => compositor
            .find_scene(name)
            .ok_or_else(|| OrderError::SceneNotFound(name.to_owned())),
        None => {
            let scene = compositor.current_scene();
            debug!(scene = %scene.name(), "no scene named; using current scene");
            Ok(scene)
        }
    }
}
