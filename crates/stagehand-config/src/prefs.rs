// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Saved preferences for the ordering service.

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};

use serde::{Deserialize, Serialize};

/// Config key the service preferences live under.
pub const SERVICE_PREFS_KEY: &str = "service";

/// Loopback listener used when nothing else is configured.
pub const DEFAULT_LISTEN: SocketAddr = SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::LOCALHOST, 4444));

/// Largest accepted request text, 1 MiB.
pub const DEFAULT_MAX_MESSAGE_BYTES: usize = 1024 * 1024;

/// Listener settings for `stagehand-service`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServicePrefs {
    /// WebSocket listen address.
    pub listen: SocketAddr,
    /// Largest text message accepted from a client, in bytes.
    pub max_message_bytes: usize,
}

impl Default for ServicePrefs {
    fn default() -> Self {
        Self {
            listen: DEFAULT_LISTEN,
            max_message_bytes: DEFAULT_MAX_MESSAGE_BYTES,
        }
    }
}
