// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Wire schema for the Stagehand scene ordering service.
//!
//! Every request is one JSON object naming its operation in `request-type`
//! and carrying a caller-chosen `message-id`. Every response echoes the
//! `message-id`, reports `status` (`"ok"` or `"error"`), and carries either
//! the operation's payload fields or an `error` string, never both.
//!
//! Keys are kebab-case. Required fields are `Option`s here on purpose: the
//! service reports an absent field as a missing-parameter error for that
//! operation instead of a generic parse failure.

use serde::{Deserialize, Serialize};

pub mod wire;

/// Item identifier as sent by clients.
///
/// Accepts a bare string (source name) or an object with `id` and/or `name`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ItemSpec {
    /// Source name only.
    Name(String),
    /// Explicit fields. `id` wins when both are present.
    Fields {
        /// Scene item id.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<u64>,
        /// Source name.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
}

/// Operation requested by a client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "request-type")]
pub enum Request {
    /// Current scene name and its items.
    GetCurrentScene {},
    /// Items of a named scene.
    GetScene {
        /// Scene to list.
        #[serde(rename = "scene-name", default)]
        scene_name: Option<String>,
    },
    /// Current scene name and every scene with its items.
    GetSceneList {},
    /// Switch the current scene.
    SetCurrentScene {
        /// Scene to show.
        #[serde(rename = "scene-name", default)]
        scene_name: Option<String>,
    },
    /// Replace the order of the listed items atomically.
    ReorderSceneItems {
        /// Scene to reorder; the current scene when absent or empty.
        #[serde(default)]
        scene: Option<String>,
        /// Desired order, front-most first.
        #[serde(default)]
        items: Option<Vec<ItemSpec>>,
    },
    /// Move one item to an explicit index.
    SetSceneItemIndex {
        /// Scene holding the item.
        #[serde(rename = "scene-name", default)]
        scene_name: Option<String>,
        /// Item to move.
        #[serde(default)]
        item: Option<ItemSpec>,
        /// Target index, 0 = front-most.
        #[serde(default)]
        index: Option<i64>,
    },
    /// Move one item up, down, to the top or to the bottom.
    SetSceneItemOrder {
        /// Scene holding the item.
        #[serde(rename = "scene-name", default)]
        scene_name: Option<String>,
        /// Item to move.
        #[serde(default)]
        item: Option<ItemSpec>,
        /// Movement token (`MOVE_UP`, `OBS_ORDER_MOVE_UP`, ...).
        #[serde(default)]
        order: Option<String>,
    },
}

impl Request {
    /// Wire name of this request.
    pub fn request_type(&self) -> &'static str {
        match self {
            Self::GetCurrentScene {} => "GetCurrentScene",
            Self::GetScene { .. } => "GetScene",
            Self::GetSceneList {} => "GetSceneList",
            Self::SetCurrentScene { .. } => "SetCurrentScene",
            Self::ReorderSceneItems { .. } => "ReorderSceneItems",
            Self::SetSceneItemIndex { .. } => "SetSceneItemIndex",
            Self::SetSceneItemOrder { .. } => "SetSceneItemOrder",
        }
    }
}

/// Request plus its correlation id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RequestEnvelope {
    /// Caller-chosen id echoed in the response.
    #[serde(rename = "message-id")]
    pub message_id: String,
    /// The operation.
    #[serde(flatten)]
    pub request: Request,
}

/// One scene item as reported to clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SceneItemPayload {
    /// Scene item id.
    pub id: u64,
    /// Source name.
    pub name: String,
    /// Source kind.
    #[serde(rename = "type")]
    pub kind: String,
    /// Whether the item is rendered.
    pub render: bool,
    /// Whether the item is locked.
    pub locked: bool,
    /// Enclosing group, if any.
    #[serde(
        rename = "parentGroupName",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub parent_group_name: Option<String>,
}

/// A scene and its items, front-most first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScenePayload {
    /// Scene name.
    pub name: String,
    /// Items, front-most first.
    pub sources: Vec<SceneItemPayload>,
}

/// Operation-specific success fields, flattened into the response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ResponsePayload {
    /// `GetCurrentScene`.
    CurrentScene {
        /// Current scene name.
        name: String,
        /// Its items.
        sources: Vec<SceneItemPayload>,
    },
    /// `GetScene`.
    Scene {
        /// Items of the requested scene.
        sources: Vec<SceneItemPayload>,
    },
    /// `GetSceneList`.
    SceneList {
        /// Current scene name.
        #[serde(rename = "current-scene")]
        current_scene: String,
        /// Every scene with its items.
        scenes: Vec<ScenePayload>,
    },
    /// `SetSceneItemOrder`: echoes what was moved.
    ItemOrder {
        /// Scene name as supplied.
        scene: String,
        /// Item identifier as supplied.
        item: ItemSpec,
    },
}

/// Outcome marker.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// The operation succeeded.
    Ok,
    /// The operation failed; see `error`.
    Error,
}

/// Response to one request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Response {
    /// Echo of the request's `message-id` (empty when unreadable).
    #[serde(rename = "message-id")]
    pub message_id: String,
    /// Outcome.
    pub status: Status,
    /// Failure description, only when `status` is `error`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Success fields, only when `status` is `ok`.
    #[serde(flatten)]
    pub payload: Option<ResponsePayload>,
}

impl Response {
    /// Successful response, optionally with payload fields.
    pub fn ok(message_id: impl Into<String>, payload: Option<ResponsePayload>) -> Self {
        Self {
            message_id: message_id.into(),
            status: Status::Ok,
            error: None,
            payload,
        }
    }

    /// Failed response. Never carries payload fields.
    pub fn error(message_id: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            message_id: message_id.into(),
            status: Status::Error,
            error: Some(error.into()),
            payload: None,
        }
    }

    /// Whether this response reports success.
    pub fn is_ok(&self) -> bool {
        self.status == Status::Ok
    }
}
