use serde::{Deserialize, Serialize};

use crate::{
    models::SpinRecord,
    wheel::{SpinPlan, SpinState},
};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum SpinStatus {
    #[default]
    Idle,
    Spinning,
}

/// Controller-side view of the wheel on display and any spin still in flight.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpinTracker {
    pub spin: SpinState,
    pub pending: Option<SpinPlan>,
}

impl SpinTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> SpinStatus {
        if self.pending.is_some() {
            SpinStatus::Spinning
        } else {
            SpinStatus::Idle
        }
    }

    pub fn is_spinning(&self) -> bool {
        self.status() == SpinStatus::Spinning
    }

    /// Wheel the in-flight spin belongs to.
    pub fn spinning_wheel(&self) -> Option<&str> {
        self.pending.and(self.spin.wheel_id.as_deref())
    }

    /// Rotation to draw `wheel_id` at: its last target if it's the focused
    /// wheel, otherwise at rest.
    pub fn rotation_for(&self, wheel_id: &str) -> f64 {
        if self.spin.wheel_id.as_deref() == Some(wheel_id) {
            self.spin.rotation
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpinSnapshot {
    pub status: SpinStatus,
    pub state: SpinState,
    pub pending: Option<SpinPlan>,
}

impl From<&SpinTracker> for SpinSnapshot {
    fn from(tracker: &SpinTracker) -> Self {
        Self {
            status: tracker.status(),
            state: tracker.spin.clone(),
            pending: tracker.pending,
        }
    }
}

/// Broadcast to anyone watching the wheel.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SpinEvent {
    #[serde(rename_all = "camelCase")]
    Started { wheel_id: String, plan: SpinPlan },
    #[serde(rename_all = "camelCase")]
    Resolved { wheel_id: String, record: SpinRecord },
    #[serde(rename_all = "camelCase")]
    Cancelled { wheel_id: String },
    #[serde(rename_all = "camelCase")]
    Failed { wheel_id: String, message: String },
}

impl SpinEvent {
    pub fn wheel_id(&self) -> &str {
        match self {
            SpinEvent::Started { wheel_id, .. }
            | SpinEvent::Resolved { wheel_id, .. }
            | SpinEvent::Cancelled { wheel_id }
            | SpinEvent::Failed { wheel_id, .. } => wheel_id,
        }
    }

    /// Whether this event ends a spin.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, SpinEvent::Started { .. })
    }
}
