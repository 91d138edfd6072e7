// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Error taxonomy for ordering operations.

use stagehand_scene_port::UpdateError;
use thiserror::Error;

/// Failure of a scene or ordering operation.
///
/// Every variant is detected synchronously and returned to the caller; none
/// are retried. A failed mutation never leaves the scene partially changed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    /// A required input was absent. Reported before any lookup.
    #[error("missing request parameter '{0}'")]
    MissingParameter(&'static str),
    /// The named scene does not exist.
    #[error("scene '{0}' does not exist")]
    SceneNotFound(String),
    /// No item in the scene matches the identifier.
    #[error("no scene item matches {0}")]
    ItemNotFound(String),
    /// The identifier resolved to an item nested in a group.
    #[error("scene item {0} is inside a group; grouped items cannot be reordered")]
    GroupedItem(String),
    /// The movement token is not one of the recognized values.
    #[error("unknown order '{0}'")]
    InvalidOrderToken(String),
    /// A full reorder was rejected as a whole.
    #[error(
        "invalid scene item order{}: {reason}",
        .index.map_or_else(String::new, |i| format!(" at position {i}"))
    )]
    ReorderValidationFailed {
        /// Position in the supplied list that failed to resolve, if any.
        index: Option<usize>,
        /// Why the order was rejected.
        reason: String,
    },
    /// The compositor refused a single-item mutation.
    #[error("compositor rejected the {0}")]
    MutationRejected(&'static str),
}

impl OrderError {
    /// Stable identifier for logs and error payloads.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingParameter(_) => "E_MISSING_PARAMETER",
            Self::SceneNotFound(_) => "E_SCENE_NOT_FOUND",
            Self::ItemNotFound(_) => "E_ITEM_NOT_FOUND",
            Self::GroupedItem(_) => "E_GROUPED_ITEM",
            Self::InvalidOrderToken(_) => "E_INVALID_ORDER_TOKEN",
            Self::ReorderValidationFailed { .. } => "E_REORDER_VALIDATION_FAILED",
            Self::MutationRejected(_) => "E_MUTATION_REJECTED",
        }
    }
}

impl From<UpdateError<OrderError>> for OrderError {
    fn from(err: UpdateError<OrderError>) -> Self {
        match err {
            UpdateError::SceneGone(name) => Self::SceneNotFound(name.to_string()),
            UpdateError::Aborted(inner) => inner,
        }
    }
}
