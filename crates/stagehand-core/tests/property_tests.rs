// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]
use proptest::prelude::*;
use stagehand_compositor_mem::MemoryCompositor;
use stagehand_core::{ItemRef, OrderEngine, OrderError, SceneHandle};

fn engine_with(count: u64) -> (OrderEngine<MemoryCompositor>, SceneHandle) {
    let compositor = MemoryCompositor::builder()
        .scene("Main", |mut s| {
            for i in 0..count {
                s = s.item(format!("item-{i}"));
            }
            s
        })
        .build()
        .expect("valid collection");
    let engine = OrderEngine::new(compositor);
    let scene = engine.locate(None).expect("current scene");
    (engine, scene)
}

fn ids(engine: &OrderEngine<MemoryCompositor>, scene: &SceneHandle) -> Vec<u64> {
    engine
        .items(scene)
        .expect("scene exists")
        .iter()
        .map(|item| item.id.0)
        .collect()
}

/// A scene size plus a random subset of its ids in random order.
fn scene_and_subset() -> impl Strategy<Value = (u64, Vec<u64>)> {
    (1u64..12).prop_flat_map(|count| {
        let all: Vec<u64> = (1..=count).collect();
        (Just(count), proptest::sample::subsequence(all, 0..=count as usize))
            .prop_flat_map(|(count, subset)| (Just(count), Just(subset).prop_shuffle()))
    })
}

proptest! {
    #[test]
    fn valid_reorder_matches_supplied_sequence((count, subset) in scene_and_subset()) {
        let (engine, scene) = engine_with(count);
        let before = ids(&engine, &scene);
        let refs: Vec<ItemRef> = subset.iter().copied().map(ItemRef::by_id).collect();

        engine.reorder(&scene, &refs).unwrap();
        let after = ids(&engine, &scene);

        // Listed ids appear in the supplied order.
        let listed: Vec<u64> = after.iter().copied().filter(|id| subset.contains(id)).collect();
        prop_assert_eq!(&listed, &subset);
        // Unlisted ids keep their exact positions.
        for (position, id) in before.iter().enumerate() {
            if !subset.contains(id) {
                prop_assert_eq!(after[position], *id);
            }
        }
    }

    #[test]
    fn reorder_with_any_unknown_id_leaves_order_untouched(
        (count, mut subset) in scene_and_subset(),
        bogus in 100u64..200,
        at in any::<prop::sample::Index>(),
    ) {
        let (engine, scene) = engine_with(count);
        let before = ids(&engine, &scene);
        let slot = at.index(subset.len() + 1);
        subset.insert(slot, bogus);
        let refs: Vec<ItemRef> = subset.iter().copied().map(ItemRef::by_id).collect();

        let err = engine.reorder(&scene, &refs).unwrap_err();
        let is_validation_failure = matches!(
            err,
            OrderError::ReorderValidationFailed { index: Some(i), .. } if i == slot
        );
        prop_assert!(is_validation_failure);
        prop_assert_eq!(ids(&engine, &scene), before);
    }

    #[test]
    fn set_index_round_trips_in_range(count in 1u64..12, pick in any::<prop::sample::Index>(), rank in any::<prop::sample::Index>()) {
        let (engine, scene) = engine_with(count);
        let len = usize::try_from(count).unwrap();
        let id = u64::try_from(pick.index(len)).unwrap() + 1;
        let k = rank.index(len);

        engine.set_index(&scene, &ItemRef::by_id(id), i64::try_from(k).unwrap()).unwrap();

        let after = ids(&engine, &scene);
        prop_assert_eq!(after[k], id);
        prop_assert_eq!(after.len(), len);
    }
}
