// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Stagehand scene ordering service.
//! Clients speak JSON over WebSocket text frames: one request in, one response out.

use std::{
    net::SocketAddr,
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use anyhow::Result;
use axum::{
    extract::ws::{close_code, CloseFrame, Message, WebSocket},
    extract::{ConnectInfo, State, WebSocketUpgrade},
    response::IntoResponse,
    routing::get,
    Router,
};
use axum_server::Handle;
use clap::Parser;
use stagehand_config::{ConfigService, FsConfigStore, ServicePrefs, SERVICE_PREFS_KEY};
use stagehand_proto::wire::encode_response;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

mod collection;
mod dispatch;

use collection::SceneCollection;
use dispatch::Dispatcher;

#[derive(Parser, Debug)]
#[command(author, version, about = "Stagehand scene item ordering service")]
struct Args {
    /// WebSocket listener (defaults to the saved preference, 127.0.0.1:4444)
    #[arg(long)]
    listen: Option<SocketAddr>,
    /// Scene collection JSON file; one empty scene named "Scene" when omitted
    #[arg(long)]
    scenes: Option<PathBuf>,
    /// Largest accepted text message in bytes (defaults to the saved preference)
    #[arg(long)]
    max_message_bytes: Option<usize>,
    /// Preferences directory (defaults to the platform config dir)
    #[arg(long)]
    config_dir: Option<PathBuf>,
}

impl Args {
    /// Command-line flags win over saved preferences.
    fn apply(&self, prefs: ServicePrefs) -> ServicePrefs {
        ServicePrefs {
            listen: self.listen.unwrap_or(prefs.listen),
            max_message_bytes: self.max_message_bytes.unwrap_or(prefs.max_message_bytes),
        }
    }
}

#[derive(Clone)]
struct AppState {
    dispatcher: Dispatcher,
    max_message_bytes: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let settings = args.apply(load_prefs(args.config_dir.as_deref()));
    let collection = match &args.scenes {
        Some(path) => SceneCollection::load(path)?,
        None => SceneCollection::fallback(),
    };
    let compositor = Arc::new(collection.into_compositor()?);

    let state = Arc::new(AppState {
        dispatcher: Dispatcher::new(compositor),
        max_message_bytes: settings.max_message_bytes,
    });
    let app = router(state);

    let handle = Handle::new();
    let shutdown = handle.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("shutting down");
                shutdown.graceful_shutdown(Some(Duration::from_secs(5)));
            }
            Err(err) => error!(?err, "failed to install ctrl-c handler"),
        }
    });

    info!(listen = %settings.listen, "stagehand service listening");
    axum_server::bind(settings.listen)
        .handle(handle)
        .serve(app.into_make_service_with_connect_info::<SocketAddr>())
        .await?;
    Ok(())
}

/// Saved prefs, written once with defaults when absent. Best effort.
fn load_prefs(config_dir: Option<&Path>) -> ServicePrefs {
    let store = match config_dir {
        Some(dir) => FsConfigStore::with_root(dir),
        None => FsConfigStore::new(),
    };
    match store
        .map(ConfigService::new)
        .and_then(|config| config.load_or_init::<ServicePrefs>(SERVICE_PREFS_KEY))
    {
        Ok(prefs) => prefs,
        Err(err) => {
            warn!(%err, "using default service preferences");
            ServicePrefs::default()
        }
    }
}

fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(ws_handler))
        .route("/ws", get(ws_handler))
        .with_state(state)
}

async fn ws_handler(
    State(state): State<Arc<AppState>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.max_message_size(state.max_message_bytes)
        .on_upgrade(move |socket| handle_socket(socket, state, peer))
}

/// What to do with one inbound frame.
#[derive(Debug, PartialEq, Eq)]
enum Inbound {
    Request(String),
    Reject(&'static str),
    Skip,
    Hangup,
}

fn classify(msg: Message) -> Inbound {
    match msg {
        Message::Text(text) => Inbound::Request(text.as_str().to_owned()),
        Message::Binary(_) => Inbound::Reject("binary frames are not supported"),
        // Pings are answered by the WebSocket layer.
        Message::Ping(_) | Message::Pong(_) => Inbound::Skip,
        Message::Close(_) => Inbound::Hangup,
    }
}

fn close_frame(reason: &'static str) -> Message {
    Message::Close(Some(CloseFrame {
        code: close_code::UNSUPPORTED,
        reason: reason.into(),
    }))
}

async fn handle_socket(mut socket: WebSocket, state: Arc<AppState>, peer: SocketAddr) {
    info!(?peer, "client connected");
    while let Some(msg) = socket.recv().await {
        let msg = match msg {
            Ok(msg) => msg,
            Err(err) => {
                warn!(?err, ?peer, "ws recv error");
                break;
            }
        };
        match classify(msg) {
            Inbound::Request(text) => {
                let response = state.dispatcher.handle_text(text).await;
                let text = match encode_response(&response) {
                    Ok(text) => text,
                    Err(err) => {
                        error!(%err, ?peer, "failed to encode response");
                        break;
                    }
                };
                if socket.send(Message::Text(text.into())).await.is_err() {
                    break;
                }
            }
            Inbound::Reject(reason) => {
                warn!(?peer, reason, "closing connection");
                if let Err(err) = socket.send(close_frame(reason)).await {
                    debug!(?err, ?peer, "failed to send close frame");
                }
                break;
            }
            Inbound::Skip => {}
            Inbound::Hangup => break,
        }
    }
    info!(?peer, "client disconnected");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Bytes;

    #[test]
    fn flags_override_saved_prefs() {
        let args = Args::try_parse_from([
            "stagehand-service",
            "--listen",
            "0.0.0.0:9000",
        ])
        .unwrap();
        let saved = ServicePrefs {
            listen: "127.0.0.1:4444".parse().unwrap(),
            max_message_bytes: 2048,
        };
        let settings = args.apply(saved);
        assert_eq!(settings.listen, "0.0.0.0:9000".parse().unwrap());
        assert_eq!(settings.max_message_bytes, 2048);
    }

    #[test]
    fn prefs_are_written_once_under_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = load_prefs(Some(dir.path()));
        assert_eq!(prefs, ServicePrefs::default());
        assert!(dir.path().join("service.json").is_file());

        std::fs::write(
            dir.path().join("service.json"),
            r#"{"listen":"127.0.0.1:5555","max_message_bytes":64}"#,
        )
        .unwrap();
        let prefs = load_prefs(Some(dir.path()));
        assert_eq!(prefs.max_message_bytes, 64);
    }

    #[test]
    fn binary_frames_are_rejected() {
        assert_eq!(
            classify(Message::Binary(Bytes::from_static(b"\x00\x01"))),
            Inbound::Reject("binary frames are not supported")
        );
        assert_eq!(
            classify(Message::Text("{}".into())),
            Inbound::Request("{}".to_owned())
        );
        assert_eq!(classify(Message::Ping(Bytes::new())), Inbound::Skip);
        assert_eq!(classify(Message::Close(None)), Inbound::Hangup);
    }

    #[test]
    fn rejection_closes_with_unsupported_data_code() {
        match close_frame("binary frames are not supported") {
            Message::Close(Some(frame)) => {
                assert_eq!(frame.code, close_code::UNSUPPORTED);
                assert_eq!(frame.reason.as_str(), "binary frames are not supported");
            }
            other => panic!("expected a close frame, got {other:?}"),
        }
    }
}
