//! Telemetry connectors for FilterGuard
//!
//! ## Overview
//!
//! The core engine hands every valid score to a
//! [`ScorePublisher`](filterguard_core::ScorePublisher). This crate provides
//! the publisher that turns a score into a small JSON document and pushes
//! it through a transport [`Connector`]:
//!
//! ```text
//! Monitor ──measurement──▶ TelemetryPublisher ──JSON──▶ Connector ──▶ broker
//! ```
//!
//! ## Payload
//!
//! ```json
//! {"score":52.94,"status":"MODERATE","strategy":"Brown Score","sequence":7}
//! ```
//!
//! `strategy` is omitted when only the bare score is known. `sequence`
//! increases by one per attempted publish so gaps are visible downstream.
//!
//! ## Transports
//!
//! - [`mqtt::MqttConnector`] (feature `mqtt`, default): publishes with
//!   `rumqttc`, retained so late subscribers get the last score
//! - [`memory::MemoryConnector`]: keeps messages in memory, for tests and
//!   dry runs
//!
//! ## Example Usage
//!
//! ```no_run
//! use filterguard_connectors::{memory::MemoryConnector, TelemetryPublisher};
//! use filterguard_core::ScorePublisher;
//!
//! let mut publisher = TelemetryPublisher::new(MemoryConnector::new(), "filters/hood/saturation");
//! publisher.publish(42.0)?;
//! assert_eq!(publisher.connector().messages().len(), 1);
//! # Ok::<(), filterguard_connectors::ConnectorError>(())
//! ```

pub mod memory;

#[cfg(feature = "mqtt")]
pub mod mqtt;

// Re-export common types
#[cfg(feature = "mqtt")]
pub use mqtt::{MqttConfig, MqttConnector, MqttError};

use filterguard_core::{Measurement, SaturationStatus, ScorePublisher};
use serde::Serialize;
use thiserror::Error;

/// Common connector errors
#[derive(Debug, Error)]
pub enum ConnectorError {
    #[error("Not connected")]
    NotConnected,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Protocol error: {0}")]
    ProtocolError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Trait for all transport connectors
pub trait Connector {
    type Error: Into<ConnectorError>;

    /// Send one payload to `topic`
    fn send(&mut self, topic: &str, data: &[u8]) -> Result<(), Self::Error>;

    /// Check if connected
    fn is_connected(&self) -> bool;

    /// Get connection statistics
    fn stats(&self) -> ConnectionStats;
}

/// Connection statistics common to all connectors
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ConnectionStats {
    /// Total messages sent successfully
    pub messages_sent: u64,
    /// Total messages failed to send
    pub messages_failed: u64,
    /// Total bytes sent
    pub bytes_sent: u64,
    /// Number of reconnections
    pub reconnections: u32,
    /// Last error message
    pub last_error: Option<String>,
}

impl ConnectionStats {
    /// Count a delivered message
    pub fn record_sent(&mut self, bytes: usize) {
        self.messages_sent += 1;
        self.bytes_sent += bytes as u64;
    }

    /// Count a failed message and keep its error
    pub fn record_failure(&mut self, error: &impl ToString) {
        self.messages_failed += 1;
        self.last_error = Some(error.to_string());
    }
}

/// JSON document published per score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScorePayload {
    /// Saturation percentage, `[0, 100]`
    pub score: f64,
    /// Severity label
    pub status: &'static str,
    /// Strategy that produced the score
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<&'static str>,
    /// Publish counter
    pub sequence: u64,
}

/// [`ScorePublisher`] that serializes scores onto a [`Connector`]
#[derive(Debug)]
pub struct TelemetryPublisher<C> {
    connector: C,
    topic: String,
    sequence: u64,
}

impl<C: Connector> TelemetryPublisher<C> {
    /// Publish to `topic` through `connector`
    pub fn new(connector: C, topic: impl Into<String>) -> Self {
        Self {
            connector,
            topic: topic.into(),
            sequence: 0,
        }
    }

    /// Topic scores are published on
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Underlying transport
    pub fn connector(&self) -> &C {
        &self.connector
    }

    /// Underlying transport, mutably
    pub fn connector_mut(&mut self) -> &mut C {
        &mut self.connector
    }

    fn send(&mut self, score: f64, strategy: Option<&'static str>) -> Result<(), ConnectorError> {
        let payload = ScorePayload {
            score,
            status: SaturationStatus::from_score(score as f32).label(),
            strategy,
            sequence: self.sequence,
        };
        self.sequence += 1;

        if !self.connector.is_connected() {
            return Err(ConnectorError::NotConnected);
        }

        let data = serde_json::to_vec(&payload)?;
        self.connector.send(&self.topic, &data).map_err(Into::into)?;
        log::debug!("Published {} to {}", score, self.topic);
        Ok(())
    }
}

impl<C: Connector> ScorePublisher for TelemetryPublisher<C> {
    type Error = ConnectorError;

    fn publish(&mut self, score: f64) -> Result<(), Self::Error> {
        self.send(score, None)
    }

    fn publish_measurement(&mut self, measurement: &Measurement) -> Result<(), Self::Error> {
        self.send(measurement.score.value() as f64, Some(measurement.strategy.name()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryConnector;
    use filterguard_core::{ColorReading, RawColorSample, Score, StrategyKind};

    fn payload(data: &[u8]) -> serde_json::Value {
        serde_json::from_slice(data).unwrap()
    }

    #[test]
    fn bare_score_payload() {
        let mut publisher = TelemetryPublisher::new(MemoryConnector::new(), "filters/a");
        publisher.publish(85.5).unwrap();

        let (topic, data) = &publisher.connector().messages()[0];
        let json = payload(data);

        assert_eq!(topic, "filters/a");
        assert_eq!(json["score"], 85.5);
        assert_eq!(json["status"], "SATURATED");
        assert_eq!(json["sequence"], 0);
        assert!(json.get("strategy").is_none());
    }

    #[test]
    fn measurement_payload_names_strategy() {
        let mut publisher = TelemetryPublisher::new(MemoryConnector::new(), "filters/a");
        let measurement = Measurement {
            reading: ColorReading::new(RawColorSample::new(200, 150, 40)),
            strategy: StrategyKind::BrownScore,
            score: Score::valid(25.0),
        };

        publisher.publish(10.0).unwrap();
        publisher.publish_measurement(&measurement).unwrap();

        let json = payload(&publisher.connector().messages()[1].1);
        assert_eq!(json["strategy"], "Brown Score");
        assert_eq!(json["status"], "LIGHT");
        assert_eq!(json["sequence"], 1);
    }

    #[test]
    fn disconnected_transport_is_reported() {
        let mut publisher = TelemetryPublisher::new(MemoryConnector::disconnected(), "filters/a");

        let err = publisher.publish(50.0).unwrap_err();

        assert!(matches!(err, ConnectorError::NotConnected));
        assert!(publisher.connector().messages().is_empty());
    }

    #[test]
    fn stats_track_bytes() {
        let mut stats = ConnectionStats::default();
        stats.record_sent(12);
        stats.record_sent(8);
        stats.record_failure(&ConnectorError::NotConnected);

        assert_eq!(stats.messages_sent, 2);
        assert_eq!(stats.bytes_sent, 20);
        assert_eq!(stats.messages_failed, 1);
        assert_eq!(stats.last_error.as_deref(), Some("Not connected"));
    }
}
