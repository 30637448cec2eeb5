//! MQTT connector for FilterGuard
//!
//! Publishes through a blocking `rumqttc` client. The client's event loop
//! runs on its own thread and flips a shared flag on connect/disconnect,
//! so [`MqttConnector::send`](crate::Connector::send) never blocks the
//! monitor's poll loop: it queues the message or fails fast.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use rumqttc::{Client, ClientError, Connection, Event, MqttOptions, Packet};
use thiserror::Error;

pub use rumqttc::QoS;

use crate::{ConnectionStats, Connector, ConnectorError};

/// Outgoing messages buffered by the client before `send` starts failing
const REQUEST_CAPACITY: usize = 10;

/// Back-off between reconnect attempts
const RECONNECT_DELAY: Duration = Duration::from_secs(1);

/// MQTT-specific errors
#[derive(Debug, Error)]
pub enum MqttError {
    #[error("Broker not connected")]
    NotConnected,

    #[error("Client error: {0}")]
    Client(#[from] ClientError),
}

impl From<MqttError> for ConnectorError {
    fn from(err: MqttError) -> Self {
        match err {
            MqttError::NotConnected => ConnectorError::NotConnected,
            MqttError::Client(err) => ConnectorError::ProtocolError(err.to_string()),
        }
    }
}

/// Broker connection settings
#[derive(Debug, Clone, PartialEq)]
pub struct MqttConfig {
    pub host: String,
    pub port: u16,
    pub client_id: String,
    pub keep_alive_secs: u64,
    pub qos: QoS,
    /// Retain the last score on the broker for late subscribers
    pub retain: bool,
}

impl Default for MqttConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_owned(),
            port: 1883,
            client_id: "filterguard".to_owned(),
            keep_alive_secs: 30,
            qos: QoS::AtLeastOnce,
            retain: true,
        }
    }
}

impl MqttConfig {
    /// Defaults for `host:port`
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Self::default()
        }
    }

    pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = client_id.into();
        self
    }

    pub fn keep_alive_secs(mut self, secs: u64) -> Self {
        self.keep_alive_secs = secs;
        self
    }

    pub fn qos(mut self, qos: QoS) -> Self {
        self.qos = qos;
        self
    }

    pub fn retain(mut self, retain: bool) -> Self {
        self.retain = retain;
        self
    }

    fn options(&self) -> Result<MqttOptions, ConnectorError> {
        if self.client_id.is_empty() {
            return Err(ConnectorError::ConfigError("client id must not be empty".to_owned()));
        }
        if self.keep_alive_secs < 5 {
            return Err(ConnectorError::ConfigError(format!(
                "keep alive {}s below broker minimum of 5s",
                self.keep_alive_secs
            )));
        }

        let mut options = MqttOptions::new(&self.client_id, &self.host, self.port);
        options.set_keep_alive(Duration::from_secs(self.keep_alive_secs));
        Ok(options)
    }
}

/// Link state shared with the event-loop thread
#[derive(Debug, Default)]
struct LinkState {
    connected: AtomicBool,
    connects: AtomicU32,
}

/// Connector publishing to an MQTT broker
pub struct MqttConnector {
    client: Client,
    config: MqttConfig,
    link: Arc<LinkState>,
    stats: ConnectionStats,
}

impl MqttConnector {
    /// Start connecting in the background
    ///
    /// Returns immediately; [`is_connected`](Connector::is_connected) turns
    /// `true` once the broker acknowledges.
    pub fn connect(config: MqttConfig) -> Result<Self, ConnectorError> {
        let options = config.options()?;
        let (client, connection) = Client::new(options, REQUEST_CAPACITY);
        let link = Arc::new(LinkState::default());

        let worker = Arc::clone(&link);
        thread::Builder::new()
            .name("mqtt-event-loop".to_owned())
            .spawn(move || drive(connection, worker))
            .map_err(|err| ConnectorError::ProtocolError(err.to_string()))?;

        log::info!("MQTT connecting to {}:{}", config.host, config.port);
        Ok(Self {
            client,
            config,
            link,
            stats: ConnectionStats::default(),
        })
    }

    /// Connection settings
    pub fn config(&self) -> &MqttConfig {
        &self.config
    }

    /// Ask the broker to close the session
    pub fn disconnect(&mut self) -> Result<(), MqttError> {
        self.client.disconnect()?;
        Ok(())
    }
}

fn drive(mut connection: Connection, link: Arc<LinkState>) {
    for notification in connection.iter() {
        match notification {
            Ok(Event::Incoming(Packet::ConnAck(_))) => {
                link.connected.store(true, Ordering::Release);
                link.connects.fetch_add(1, Ordering::Relaxed);
                log::info!("MQTT connected");
            }
            Ok(Event::Incoming(Packet::Disconnect)) => {
                link.connected.store(false, Ordering::Release);
            }
            Ok(_) => {}
            Err(err) => {
                if link.connected.swap(false, Ordering::AcqRel) {
                    log::warn!("MQTT connection lost: {}", err);
                }
                thread::sleep(RECONNECT_DELAY);
            }
        }
    }
}

impl Connector for MqttConnector {
    type Error = MqttError;

    fn send(&mut self, topic: &str, data: &[u8]) -> Result<(), Self::Error> {
        if !self.is_connected() {
            self.stats.record_failure(&MqttError::NotConnected);
            return Err(MqttError::NotConnected);
        }

        match self
            .client
            .try_publish(topic, self.config.qos, self.config.retain, data.to_vec())
        {
            Ok(()) => {
                self.stats.record_sent(data.len());
                Ok(())
            }
            Err(err) => {
                self.stats.record_failure(&err);
                Err(err.into())
            }
        }
    }

    fn is_connected(&self) -> bool {
        self.link.connected.load(Ordering::Acquire)
    }

    fn stats(&self) -> ConnectionStats {
        let mut stats = self.stats.clone();
        stats.reconnections = self.link.connects.load(Ordering::Relaxed).saturating_sub(1);
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = MqttConfig::new("broker.local", 8883)
            .client_id("hood-1")
            .qos(QoS::AtMostOnce)
            .retain(false);

        assert_eq!(config.host, "broker.local");
        assert_eq!(config.port, 8883);
        assert_eq!(config.client_id, "hood-1");
        assert_eq!(config.keep_alive_secs, 30);
        assert!(!config.retain);
    }

    #[test]
    fn rejects_empty_client_id() {
        let config = MqttConfig::default().client_id("");
        assert!(matches!(config.options(), Err(ConnectorError::ConfigError(_))));
    }

    #[test]
    fn rejects_short_keep_alive() {
        let config = MqttConfig::default().keep_alive_secs(1);
        assert!(matches!(config.options(), Err(ConnectorError::ConfigError(_))));
    }

    #[test]
    fn not_connected_maps_to_connector_error() {
        let err: ConnectorError = MqttError::NotConnected.into();
        assert!(matches!(err, ConnectorError::NotConnected));
    }
}
