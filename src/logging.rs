//! Log messages forwarded to the connected MCP client.
//!
//! The tool handlers only see a [`LogSink`], so they run the same with a live
//! peer, with nothing attached, or under test with a recording sink.

use async_trait::async_trait;
use rmcp::RoleServer;
use rmcp::model::{LoggingLevel, LoggingMessageNotificationParam};
use rmcp::service::Peer;
use serde_json::Value;
use std::sync::{Arc, OnceLock};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Error,
}

impl From<LogLevel> for LoggingLevel {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Info => LoggingLevel::Info,
            LogLevel::Error => LoggingLevel::Error,
        }
    }
}

/// Receiver for client-visible log messages.
#[async_trait]
pub trait LogSink: Send + Sync {
    async fn log(&self, level: LogLevel, items: Vec<String>);
}

/// Renders a JSON value as a log item: strings as-is, anything else serialized.
pub fn log_item(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogSink;

#[async_trait]
impl LogSink for NoopLogSink {
    async fn log(&self, _level: LogLevel, _items: Vec<String>) {}
}

/// Sends `notifications/message` to the client once a peer is attached.
///
/// Messages logged before the transport is up are dropped.
#[derive(Clone, Default)]
pub struct PeerLogSink {
    peer: Arc<OnceLock<Peer<RoleServer>>>,
}

impl PeerLogSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches the connection's peer. Only the first call has an effect.
    pub fn attach(&self, peer: Peer<RoleServer>) {
        if self.peer.set(peer).is_err() {
            tracing::warn!("Log sink already attached to a peer, ignoring new peer");
        }
    }

    pub fn peer(&self) -> Option<Peer<RoleServer>> {
        self.peer.get().cloned()
    }
}

#[async_trait]
impl LogSink for PeerLogSink {
    async fn log(&self, level: LogLevel, items: Vec<String>) {
        let Some(peer) = self.peer.get() else {
            tracing::trace!("No client connected, dropping log message");
            return;
        };

        let param = LoggingMessageNotificationParam {
            level: level.into(),
            logger: Some(env!("CARGO_PKG_NAME").to_string()),
            data: Value::Array(items.into_iter().map(Value::String).collect()),
        };
        // rmcp drops the send acknowledgement on success, so a delivered
        // notification can still come back as a "disconnected" error.
        if let Err(e) = peer.notify_logging_message(param).await {
            tracing::debug!("Log notification not acknowledged: {}", e);
        }
    }
}
