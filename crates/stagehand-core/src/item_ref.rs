// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Item identifiers and their resolution against a scene snapshot.

use std::fmt;

use stagehand_scene_port::{SceneItem, SceneItemId};
use tracing::debug;

use crate::OrderError;

/// Identifier for one item inside a scene.
///
/// # Resolution policy
///
/// - `id` present: authoritative, exact match. `name` is ignored.
/// - only `name` present: the first item with that name in the current
///   front-most-first order. When several items wrap the same source this
///   picks the front-most one; send an id to address any other.
/// - neither present: [`OrderError::MissingParameter`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ItemRef {
    /// Compositor-assigned id.
    pub id: Option<SceneItemId>,
    /// Source name.
    pub name: Option<String>,
}

impl ItemRef {
    /// Refer to an item by id.
    pub fn by_id(id: u64) -> Self {
        Self {
            id: Some(SceneItemId(id)),
            name: None,
        }
    }

    /// Refer to an item by source name.
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
        }
    }
}

impl fmt::Display for ItemRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.id, &self.name) {
            (Some(id), _) => write!(f, "id {id}"),
            (None, Some(name)) => write!(f, "name '{name}'"),
            (None, None) => f.write_str("<empty identifier>"),
        }
    }
}

/// Resolve `item` against a front-most-first snapshot.
///
/// Pure: repeated calls against the same slice give the same answer, which
/// the reorder executor relies on while validating a whole list.
pub fn resolve<'a>(items: &'a [SceneItem], item: &ItemRef) -> Result<&'a SceneItem, OrderError> {
    let found = match (&item.id, &item.name) {
        (Some(id), _) => items.iter().find(|candidate| candidate.id == *id),
        (None, Some(name)) => items.iter().find(|candidate| &candidate.name == name),
        (None, None) => return Err(OrderError::MissingParameter("item")),
    };
    let found = found.ok_or_else(|| OrderError::ItemNotFound(item.to_string()))?;
    if found.is_grouped() {
        return Err(OrderError::GroupedItem(item.to_string()));
    }
    debug!(item = %item, id = found.id.0, "resolved scene item");
    Ok(found)
}
