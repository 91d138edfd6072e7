// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Staged order edits for one atomic-update region.

use std::collections::HashSet;

use stagehand_scene_port::{OrderMovement, SceneHandle, SceneItem, SceneItemId, SceneTxn};

/// Working copy of a scene's order, edited inside a region.
pub(crate) struct MemoryTxn {
    scene: SceneHandle,
    items: Vec<SceneItem>,
    dirty: bool,
}

impl MemoryTxn {
    pub(crate) fn new(scene: SceneHandle, items: Vec<SceneItem>) -> Self {
        Self {
            scene,
            items,
            dirty: false,
        }
    }

    /// Staged order, if anything was edited.
    pub(crate) fn into_staged(self) -> Option<Vec<SceneItem>> {
        self.dirty.then_some(self.items)
    }

    fn position(&self, id: SceneItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }
}

impl SceneTxn for MemoryTxn {
    fn scene(&self) -> &SceneHandle {
        &self.scene
    }

    fn items(&self) -> &[SceneItem] {
        &self.items
    }

    fn apply_full_order(&mut self, order: &[SceneItemId]) -> bool {
        match reordered(&self.items, order) {
            Some(items) => {
                self.items = items;
                self.dirty = true;
                true
            }
            None => false,
        }
    }

    fn move_relative(&mut self, item: SceneItemId, movement: OrderMovement) -> bool {
        let Some(from) = self.position(item) else {
            return false;
        };
        let last = self.items.len() - 1;
        let to = match movement {
            OrderMovement::Up => from.saturating_sub(1),
            OrderMovement::Down => (from + 1).min(last),
            OrderMovement::Top => 0,
            OrderMovement::Bottom => last,
        };
        relocate(&mut self.items, from, to);
        self.dirty = true;
        true
    }

    fn set_index(&mut self, item: SceneItemId, index: i64) -> bool {
        let Some(from) = self.position(item) else {
            return false;
        };
        let last = self.items.len() - 1;
        // Out-of-range indexes clamp to the nearest end.
        let to = usize::try_from(index.max(0)).map_or(last, |i| i.min(last));
        relocate(&mut self.items, from, to);
        self.dirty = true;
        true
    }
}

fn relocate(items: &mut Vec<SceneItem>, from: usize, to: usize) {
    if from != to {
        let item = items.remove(from);
        items.insert(to, item);
    }
}

/// Rearrange the listed ids into the slots they currently occupy.
///
/// Unlisted items keep their exact index. Returns `None` for unknown or
/// duplicate ids.
fn reordered(items: &[SceneItem], order: &[SceneItemId]) -> Option<Vec<SceneItem>> {
    let mut seen = HashSet::with_capacity(order.len());
    let mut slots = Vec::with_capacity(order.len());
    for id in order {
        if !seen.insert(*id) {
            return None;
        }
        slots.push(items.iter().position(|item| item.id == *id)?);
    }
    let sources = slots.clone();
    slots.sort_unstable();

    let mut out = items.to_vec();
    for (slot, source) in slots.into_iter().zip(sources) {
        out[slot] = items[source].clone();
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u64, name: &str) -> SceneItem {
        SceneItem {
            id: SceneItemId(id),
            name: name.into(),
            kind: "source".into(),
            visible: true,
            locked: false,
            group: None,
        }
    }

    fn txn(names: &[&str]) -> MemoryTxn {
        let items = names
            .iter()
            .zip(1..)
            .map(|(name, id)| item(id, name))
            .collect();
        MemoryTxn::new(SceneHandle::new("Main"), items)
    }

    fn names(txn: &MemoryTxn) -> Vec<&str> {
        txn.items().iter().map(|i| i.name.as_str()).collect()
    }

    fn ids(raw: &[u64]) -> Vec<SceneItemId> {
        raw.iter().copied().map(SceneItemId).collect()
    }

    #[test]
    fn full_order_is_applied_as_given() {
        let mut t = txn(&["A", "B", "C"]);
        assert!(t.apply_full_order(&ids(&[3, 1, 2])));
        assert_eq!(names(&t), ["C", "A", "B"]);
    }

    #[test]
    fn partial_order_fills_the_listed_slots() {
        let mut t = txn(&["A", "B", "C", "D"]);
        assert!(t.apply_full_order(&ids(&[4, 2])));
        assert_eq!(names(&t), ["A", "D", "C", "B"]);
    }

    #[test]
    fn duplicate_or_unknown_ids_reject_the_whole_order() {
        let mut t = txn(&["A", "B", "C"]);
        assert!(!t.apply_full_order(&ids(&[1, 1, 2])));
        assert!(!t.apply_full_order(&ids(&[3, 99])));
        assert_eq!(names(&t), ["A", "B", "C"]);
        assert!(t.into_staged().is_none());
    }

    #[test]
    fn relative_moves_stop_at_the_edges() {
        let mut t = txn(&["A", "B", "C"]);
        assert!(t.move_relative(SceneItemId(1), OrderMovement::Up));
        assert_eq!(names(&t), ["A", "B", "C"]);
        assert!(t.move_relative(SceneItemId(3), OrderMovement::Down));
        assert_eq!(names(&t), ["A", "B", "C"]);
        assert!(t.move_relative(SceneItemId(2), OrderMovement::Bottom));
        assert_eq!(names(&t), ["A", "C", "B"]);
        assert!(t.move_relative(SceneItemId(2), OrderMovement::Top));
        assert_eq!(names(&t), ["B", "A", "C"]);
        assert!(t.move_relative(SceneItemId(3), OrderMovement::Up));
        assert_eq!(names(&t), ["B", "C", "A"]);
    }

    #[test]
    fn set_index_clamps_out_of_range_values() {
        let mut t = txn(&["A", "B", "C"]);
        assert!(t.set_index(SceneItemId(1), 17));
        assert_eq!(names(&t), ["B", "C", "A"]);
        assert!(t.set_index(SceneItemId(1), -4));
        assert_eq!(names(&t), ["A", "B", "C"]);
        assert!(t.set_index(SceneItemId(3), 1));
        assert_eq!(names(&t), ["A", "C", "B"]);
    }

    #[test]
    fn unknown_ids_are_refused() {
        let mut t = txn(&["A"]);
        assert!(!t.move_relative(SceneItemId(9), OrderMovement::Top));
        assert!(!t.set_index(SceneItemId(9), 0));
        assert!(t.into_staged().is_none());
    }
}
