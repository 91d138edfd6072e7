// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! JSON text framing for requests and responses.
//!
//! One WebSocket text message carries exactly one JSON object. Decoding is
//! two-phase: the envelope keys (`message-id`, `request-type`) are read from a
//! generic value first, so that a request with an unknown type or a bad field
//! can still be answered under its own `message-id`.

use serde_json::Value;
use thiserror::Error;

use crate::{Request, RequestEnvelope, Response};

/// Request types this schema understands.
pub const REQUEST_TYPES: [&str; 7] = [
    "GetCurrentScene",
    "GetScene",
    "GetSceneList",
    "SetCurrentScene",
    "ReorderSceneItems",
    "SetSceneItemIndex",
    "SetSceneItemOrder",
];

/// Decode/encode failure.
#[derive(Debug, Error)]
pub enum ProtoError {
    /// The text is not JSON.
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[source] serde_json::Error),
    /// The JSON is not an object.
    #[error("request must be a JSON object")]
    NotAnObject,
    /// `message-id` absent or not a string.
    #[error("missing message-id")]
    MissingMessageId,
    /// `request-type` absent or not a string.
    #[error("missing request-type")]
    MissingRequestType {
        /// Correlation id of the offending request.
        message_id: String,
    },
    /// `request-type` names no known operation.
    #[error("invalid request type '{request_type}'")]
    UnknownRequest {
        /// Correlation id of the offending request.
        message_id: String,
        /// The unrecognized type.
        request_type: String,
    },
    /// A known request whose fields have the wrong shape.
    #[error("malformed {request_type} request: {source}")]
    Malformed {
        /// Correlation id of the offending request.
        message_id: String,
        /// Request type that failed to parse.
        request_type: String,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },
    /// Serializing a value failed.
    #[error("failed to encode: {0}")]
    Encode(#[source] serde_json::Error),
}

impl ProtoError {
    /// Correlation id to answer under, when one could be read.
    pub fn message_id(&self) -> Option<&str> {
        match self {
            Self::MissingRequestType { message_id }
            | Self::UnknownRequest { message_id, .. }
            | Self::Malformed { message_id, .. } => Some(message_id),
            Self::InvalidJson(_) | Self::NotAnObject | Self::MissingMessageId | Self::Encode(_) => {
                None
            }
        }
    }

    /// Error response for this failure, answered under the request's id when known.
    pub fn to_response(&self) -> Response {
        Response::error(self.message_id().unwrap_or_default(), self.to_string())
    }
}

/// Decode one request from JSON text.
pub fn decode_request(text: &str) -> Result<RequestEnvelope, ProtoError> {
    let value: Value = serde_json::from_str(text).map_err(ProtoError::InvalidJson)?;
    let Value::Object(fields) = &value else {
        return Err(ProtoError::NotAnObject);
    };
    let message_id = fields
        .get("message-id")
        .and_then(Value::as_str)
        .ok_or(ProtoError::MissingMessageId)?
        .to_owned();
    let Some(request_type) = fields.get("request-type").and_then(Value::as_str) else {
        return Err(ProtoError::MissingRequestType { message_id });
    };
    if !REQUEST_TYPES.contains(&request_type) {
        return Err(ProtoError::UnknownRequest {
            message_id,
            request_type: request_type.to_owned(),
        });
    }
    let request_type = request_type.to_owned();
    let request: Request = serde_json::from_value(value).map_err(|source| ProtoError::Malformed {
        message_id: message_id.clone(),
        request_type,
        source,
    })?;
    Ok(RequestEnvelope {
        message_id,
        request,
    })
}

/// Encode one request as JSON text (client side).
pub fn encode_request(envelope: &RequestEnvelope) -> Result<String, ProtoError> {
    serde_json::to_string(envelope).map_err(ProtoError::Encode)
}

/// Encode one response as JSON text.
pub fn encode_response(response: &Response) -> Result<String, ProtoError> {
    serde_json::to_string(response).map_err(ProtoError::Encode)
}

/// Decode one response from JSON text (client side).
pub fn decode_response(text: &str) -> Result<Response, ProtoError> {
    serde_json::from_str(text).map_err(ProtoError::InvalidJson)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ItemSpec, ResponsePayload, SceneItemPayload};
    use serde_json::json;

    #[test]
    fn decodes_reorder_with_mixed_identifiers() {
        let env = decode_request(
            r#"{"request-type":"ReorderSceneItems","message-id":"7",
                "items":[{"id":3},{"name":"Camera"},"Overlay"]}"#,
        )
        .unwrap();
        assert_eq!(env.message_id, "7");
        assert_eq!(
            env.request,
            Request::ReorderSceneItems {
                scene: None,
                items: Some(vec![
                    ItemSpec::Fields {
                        id: Some(3),
                        name: None
                    },
                    ItemSpec::Fields {
                        id: None,
                        name: Some("Camera".into())
                    },
                    ItemSpec::Name("Overlay".into()),
                ]),
            }
        );
    }

    #[test]
    fn absent_required_fields_decode_as_none() {
        let env =
            decode_request(r#"{"request-type":"SetSceneItemIndex","message-id":"1"}"#).unwrap();
        assert_eq!(
            env.request,
            Request::SetSceneItemIndex {
                scene_name: None,
                item: None,
                index: None,
            }
        );
    }

    #[test]
    fn unknown_type_keeps_the_message_id() {
        let err =
            decode_request(r#"{"request-type":"StartStreaming","message-id":"abc"}"#).unwrap_err();
        assert!(matches!(err, ProtoError::UnknownRequest { .. }));
        let response = err.to_response();
        assert_eq!(response.message_id, "abc");
        assert_eq!(
            response.error.as_deref(),
            Some("invalid request type 'StartStreaming'")
        );
    }

    #[test]
    fn wrongly_typed_field_is_malformed() {
        let err = decode_request(
            r#"{"request-type":"SetSceneItemIndex","message-id":"9","index":"two"}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ProtoError::Malformed { .. }));
        assert_eq!(err.message_id(), Some("9"));
    }

    #[test]
    fn envelope_errors_without_an_id() {
        assert!(matches!(
            decode_request("not json"),
            Err(ProtoError::InvalidJson(_))
        ));
        assert!(matches!(decode_request("[1,2]"), Err(ProtoError::NotAnObject)));
        assert!(matches!(
            decode_request(r#"{"request-type":"GetSceneList"}"#),
            Err(ProtoError::MissingMessageId)
        ));
        assert_eq!(
            decode_request("[]").unwrap_err().to_response().message_id,
            ""
        );
    }

    #[test]
    fn request_round_trips_through_text() {
        let env = RequestEnvelope {
            message_id: "42".into(),
            request: Request::SetSceneItemOrder {
                scene_name: Some("Main".into()),
                item: Some(ItemSpec::Name("B".into())),
                order: Some("MOVE_BOTTOM".into()),
            },
        };
        let text = encode_request(&env).unwrap();
        assert_eq!(decode_request(&text).unwrap(), env);
    }

    #[test]
    fn ok_response_flattens_payload_fields() {
        let response = Response::ok(
            "5",
            Some(ResponsePayload::CurrentScene {
                name: "Main".into(),
                sources: vec![SceneItemPayload {
                    id: 1,
                    name: "A".into(),
                    kind: "source".into(),
                    render: true,
                    locked: false,
                    parent_group_name: None,
                }],
            }),
        );
        let value: Value = serde_json::from_str(&encode_response(&response).unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "message-id": "5",
                "status": "ok",
                "name": "Main",
                "sources": [{"id": 1, "name": "A", "type": "source", "render": true, "locked": false}],
            })
        );
        assert_eq!(
            decode_response(&encode_response(&response).unwrap()).unwrap(),
            response
        );
    }

    #[test]
    fn error_response_has_no_payload_fields() {
        let response = Response::error("6", "scene 'Nope' does not exist");
        let value: Value = serde_json::from_str(&encode_response(&response).unwrap()).unwrap();
        assert_eq!(
            value,
            json!({"message-id": "6", "status": "error", "error": "scene 'Nope' does not exist"})
        );
        let decoded = decode_response(&encode_response(&response).unwrap()).unwrap();
        assert!(!decoded.is_ok());
        assert_eq!(decoded.payload, None);
    }

    #[test]
    fn scene_list_payload_uses_kebab_case_current_scene() {
        let response = Response::ok(
            "8",
            Some(ResponsePayload::SceneList {
                current_scene: "Main".into(),
                scenes: vec![],
            }),
        );
        let value: Value = serde_json::from_str(&encode_response(&response).unwrap()).unwrap();
        assert_eq!(value["current-scene"], "Main");
        assert_eq!(value["scenes"], json!([]));
    }
}
