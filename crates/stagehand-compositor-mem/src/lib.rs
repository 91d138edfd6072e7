// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! In-memory compositor for Stagehand.
//!
//! [`MemoryCompositor`] implements the [`Compositor`] port with plain vectors
//! and no rendering. The session service runs on it, and the engine tests use
//! it to check ordering semantics and region isolation.
//!
//! # Region Model
//!
//! Each scene keeps a published order behind an `RwLock` and a separate
//! region mutex. A region copies the published order, lets the closure edit
//! the copy, and swaps it in only when the closure returns `Ok`. Readers only
//! ever take the published lock, so they see the order before or after a
//! region and are never blocked for the length of one.
//!
//! [`Compositor`]: stagehand_scene_port::Compositor

mod builder;
mod compositor;
mod txn;

pub use builder::{BuildError, CompositorBuilder, ItemDraft, SceneBuilder, DEFAULT_KIND};
pub use compositor::MemoryCompositor;
