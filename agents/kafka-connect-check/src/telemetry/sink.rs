//! Event sinks
//!
//! The host agent owns event transport. It hands the check an [`EventSink`]
//! and drains it on its own schedule.

use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

use super::{Result, TelemetryError};
use crate::contracts::HealthEvent;

/// Destination for emitted health events
pub trait EventSink: Send + Sync {
    /// Hand one event to the host; must not block
    fn emit(&self, event: HealthEvent) -> Result<()>;
}

/// Buffers events in memory until the host collects them
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    events: Arc<Mutex<Vec<HealthEvent>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take all buffered events, leaving the sink empty
    pub fn drain(&self) -> Vec<HealthEvent> {
        match self.events.lock() {
            Ok(mut events) => std::mem::take(&mut *events),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }

    pub fn len(&self) -> usize {
        self.events.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EventSink for MemorySink {
    fn emit(&self, event: HealthEvent) -> Result<()> {
        self.events
            .lock()
            .map_err(|_| TelemetryError::EmissionFailed("event buffer poisoned".to_string()))?
            .push(event);
        Ok(())
    }
}

/// Forwards events over a bounded channel to a host-side consumer
#[derive(Debug, Clone)]
pub struct ChannelSink {
    sender: mpsc::Sender<HealthEvent>,
}

impl ChannelSink {
    /// Create a sink and the receiver the host drains
    pub fn new(max_queue_size: usize) -> (Self, mpsc::Receiver<HealthEvent>) {
        let (sender, receiver) = mpsc::channel(max_queue_size);
        (Self { sender }, receiver)
    }
}

impl EventSink for ChannelSink {
    fn emit(&self, event: HealthEvent) -> Result<()> {
        self.sender.try_send(event).map_err(|e| {
            TelemetryError::EmissionFailed(format!("Failed to queue event: {}", e))
        })
    }
}
