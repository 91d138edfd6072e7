// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Compositor port contract for Stagehand.
//!
//! This crate defines the narrow contract between the ordering engine and
//! whatever compositor owns the scenes. It contains NO serialization logic;
//! the wire schema lives in stagehand-proto.
//!
//! # Design Principles
//!
//! - **The compositor owns the order.** Adapters hold the authoritative item
//!   sequence. The engine never keeps a copy across requests.
//! - **Mutations are regions.** Every write happens inside
//!   [`Compositor::atomic_update`]; readers see the order before or after a
//!   region, never in between.
//! - **Front-most first.** Item listings put the top of the stack at index 0.

mod movement;
mod port;
mod types;

pub use movement::{OrderMovement, UnknownMovement};
pub use port::{Compositor, SceneTxn, UpdateError};
pub use types::{SceneHandle, SceneItem, SceneItemId, SceneName};
