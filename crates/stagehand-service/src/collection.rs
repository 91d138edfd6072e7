// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Scene collection files used to seed the in-memory compositor.
//!
//! ```json
//! {
//!   "current": "Main",
//!   "scenes": [
//!     { "name": "Main", "items": [ { "name": "Camera", "type": "v4l2_input" }, { "name": "Logo", "group": "Branding" } ] }
//!   ]
//! }
//! ```
//!
//! Items are listed front-most first.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use stagehand_compositor_mem::{ItemDraft, MemoryCompositor, SceneBuilder, DEFAULT_KIND};

/// Scene used when no collection file is given.
pub(crate) const DEFAULT_SCENE: &str = "Scene";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct SceneCollection {
    #[serde(default)]
    current: Option<String>,
    scenes: Vec<SceneEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SceneEntry {
    name: String,
    #[serde(default)]
    items: Vec<ItemEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ItemEntry {
    name: String,
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default = "visible_by_default")]
    render: bool,
    #[serde(default)]
    locked: bool,
    #[serde(default)]
    group: Option<String>,
}

fn visible_by_default() -> bool {
    true
}

impl SceneCollection {
    /// One empty scene named [`DEFAULT_SCENE`].
    pub(crate) fn fallback() -> Self {
        Self {
            current: None,
            scenes: vec![SceneEntry {
                name: DEFAULT_SCENE.to_owned(),
                items: Vec::new(),
            }],
        }
    }

    pub(crate) fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("parse scene collection")
    }

    pub(crate) fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read scene collection {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("load {}", path.display()))
    }

    pub(crate) fn into_compositor(self) -> Result<MemoryCompositor> {
        let mut builder = MemoryCompositor::builder();
        for scene in self.scenes {
            let populated = scene
                .items
                .into_iter()
                .fold(SceneBuilder::default(), |s, item| s.push(item.into_draft()));
            builder = builder.scene_with(scene.name, populated);
        }
        if let Some(current) = self.current {
            builder = builder.current(current);
        }
        builder.build().context("build compositor from scene collection")
    }
}

impl ItemEntry {
    fn into_draft(self) -> ItemDraft {
        ItemDraft {
            name: self.name,
            kind: self.kind.unwrap_or_else(|| DEFAULT_KIND.to_owned()),
            visible: self.render,
            locked: self.locked,
            group: self.group,
        }
    }
}
