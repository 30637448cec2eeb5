//! In-memory connector
//!
//! Keeps every message instead of sending it. Used by tests and by dry
//! runs on a bench without a broker.

use crate::{ConnectionStats, Connector, ConnectorError};

/// Connector that records messages
#[derive(Debug, Clone)]
pub struct MemoryConnector {
    messages: Vec<(String, Vec<u8>)>,
    connected: bool,
    stats: ConnectionStats,
}

impl Default for MemoryConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryConnector {
    /// Connected, empty
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            connected: true,
            stats: ConnectionStats::default(),
        }
    }

    /// Starts disconnected; every send fails
    pub fn disconnected() -> Self {
        Self {
            connected: false,
            ..Self::new()
        }
    }

    /// Simulate link loss or recovery
    pub fn set_connected(&mut self, connected: bool) {
        if connected && !self.connected {
            self.stats.reconnections += 1;
        }
        self.connected = connected;
    }

    /// `(topic, payload)` pairs in send order
    pub fn messages(&self) -> &[(String, Vec<u8>)] {
        &self.messages
    }

    /// Drop recorded messages
    pub fn clear(&mut self) {
        self.messages.clear();
    }
}

impl Connector for MemoryConnector {
    type Error = ConnectorError;

    fn send(&mut self, topic: &str, data: &[u8]) -> Result<(), Self::Error> {
        if !self.connected {
            self.stats.record_failure(&ConnectorError::NotConnected);
            return Err(ConnectorError::NotConnected);
        }

        self.messages.push((topic.to_owned(), data.to_vec()));
        self.stats.record_sent(data.len());
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    fn stats(&self) -> ConnectionStats {
        self.stats.clone()
    }
}
