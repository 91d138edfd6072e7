// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Request → engine → response.

use std::sync::Arc;

use stagehand_compositor_mem::MemoryCompositor;
use stagehand_core::{Compositor, ItemRef, OrderEngine, OrderError, SceneItem, SceneItemId};
use stagehand_proto::{
    wire::decode_request, ItemSpec, Request, RequestEnvelope, Response, ResponsePayload,
    SceneItemPayload, ScenePayload,
};
use tracing::{debug, error, info, warn};

/// Shared handle answering requests against one compositor.
#[derive(Clone, Debug)]
pub(crate) struct Dispatcher {
    engine: OrderEngine<Arc<MemoryCompositor>>,
}

impl Dispatcher {
    pub(crate) fn new(compositor: Arc<MemoryCompositor>) -> Self {
        Self {
            engine: OrderEngine::new(compositor),
        }
    }

    /// Answer one text frame off the async runtime.
    ///
    /// Decoding happens inline. Engine calls take blocking locks, so they run
    /// on the blocking pool.
    pub(crate) async fn handle_text(&self, text: String) -> Response {
        let envelope = match decode_request(&text) {
            Ok(envelope) => envelope,
            Err(err) => {
                warn!(message_id = err.message_id(), %err, "rejected request");
                return err.to_response();
            }
        };
        let message_id = envelope.message_id.clone();
        let this = self.clone();
        answer_blocking(message_id, move || this.dispatch(envelope)).await
    }

    pub(crate) fn dispatch(&self, envelope: RequestEnvelope) -> Response {
        let RequestEnvelope {
            message_id,
            request,
        } = envelope;
        let request_type = request.request_type();
        debug!(%message_id, request_type, "dispatching");
        match self.execute(request) {
            Ok(payload) => Response::ok(message_id, payload),
            Err(err) => {
                warn!(%message_id, request_type, code = err.code(), %err, "request failed");
                Response::error(message_id, err.to_string())
            }
        }
    }

    fn execute(&self, request: Request) -> Result<Option<ResponsePayload>, OrderError> {
        let engine = &self.engine;
        match request {
            Request::GetCurrentScene {} => {
                let scene = engine.locate(None)?;
                let sources = sources(&engine.items(&scene)?);
                Ok(Some(ResponsePayload::CurrentScene {
                    name: scene.name().to_string(),
                    sources,
                }))
            }
            Request::GetScene { scene_name } => {
                let name = required_scene(scene_name)?;
                let scene = engine.locate(Some(&name))?;
                Ok(Some(ResponsePayload::Scene {
                    sources: sources(&engine.items(&scene)?),
                }))
            }
            Request::GetSceneList {} => {
                let (current, scenes) = engine.scene_list();
                Ok(Some(ResponsePayload::SceneList {
                    current_scene: current.name().to_string(),
                    scenes: scenes
                        .into_iter()
                        .map(|(scene, items)| ScenePayload {
                            name: scene.name().to_string(),
                            sources: sources(&items),
                        })
                        .collect(),
                }))
            }
            Request::SetCurrentScene { scene_name } => {
                let name = required_scene(scene_name)?;
                let scene = engine.locate(Some(&name))?;
                if !engine.compositor().set_current_scene(&scene) {
                    return Err(OrderError::SceneNotFound(name));
                }
                info!(scene = %scene.name(), "switched current scene");
                Ok(None)
            }
            Request::ReorderSceneItems { scene, items } => {
                let items = required(items, "items")?;
                let scene = engine.locate(scene.as_deref())?;
                let refs: Vec<ItemRef> = items.iter().map(item_ref).collect();
                engine.reorder(&scene, &refs)?;
                Ok(None)
            }
            Request::SetSceneItemIndex {
                scene_name,
                item,
                index,
            } => {
                let name = required_scene(scene_name)?;
                let item = required(item, "item")?;
                let index = required(index, "index")?;
                let scene = engine.locate(Some(&name))?;
                engine.set_index(&scene, &item_ref(&item), index)?;
                Ok(None)
            }
            Request::SetSceneItemOrder {
                scene_name,
                item,
                order,
            } => {
                let name = required_scene(scene_name)?;
                let item = required(item, "item")?;
                let order = required(order, "order")?;
                let scene = engine.locate(Some(&name))?;
                engine.move_item_by_token(&scene, &item_ref(&item), &order)?;
                Ok(Some(ResponsePayload::ItemOrder { scene: name, item }))
            }
        }
    }
}

/// Run `work` on the blocking pool. A failed task is still answered under
/// `message_id`.
async fn answer_blocking<F>(message_id: String, work: F) -> Response
where
    F: FnOnce() -> Response + Send + 'static,
{
    match tokio::task::spawn_blocking(work).await {
        Ok(response) => response,
        Err(err) => {
            error!(%message_id, ?err, "dispatch task failed");
            Response::error(message_id, "internal error")
        }
    }
}

fn required<T>(value: Option<T>, field: &'static str) -> Result<T, OrderError> {
    value.ok_or(OrderError::MissingParameter(field))
}

/// `scene-name` for operations that never fall back to the current scene.
fn required_scene(value: Option<String>) -> Result<String, OrderError> {
    required(value.filter(|name| !name.is_empty()), "scene-name")
}

fn item_ref(spec: &ItemSpec) -> ItemRef {
    match spec {
        ItemSpec::Name(name) => ItemRef::by_name(name.clone()),
        ItemSpec::Fields { id, name } => ItemRef {
            id: id.map(SceneItemId),
            name: name.clone(),
        },
    }
}

fn sources(items: &[SceneItem]) -> Vec<SceneItemPayload> {
    items
        .iter()
        .map(|item| SceneItemPayload {
            id: item.id.0,
            name: item.name.clone(),
            kind: item.kind.clone(),
            render: item.visible,
            locked: item.locked,
            parent_group_name: item.group.clone(),
        })
        .collect()
}
