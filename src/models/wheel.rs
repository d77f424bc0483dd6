//! Wheel-related data models.
//!
//! - `Wheel`, `Label`: a named, ordered set of colored slots
//! - `SpinRecord`: one resolved spin in a wheel's history
//! - `WheelInput`: raw creation form data, validated by `Wheel::create`

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{error::WheelError, wheel::resolve};

use super::palette::assign_colors;

/// Upper bound on labels per wheel; the creation form stops offering new rows here.
pub const MAX_LABELS: usize = 13;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    pub id: String,
    pub text: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpinRecord {
    pub timestamp: DateTime<Utc>,
    pub index: usize,
    /// Label text at the time of the spin.
    #[serde(default)]
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wheel {
    pub id: String,
    pub name: String,
    pub labels: Vec<Label>,
    #[serde(default)]
    pub history: Vec<SpinRecord>,
}

/// Input data for creating a wheel
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WheelInput {
    pub name: String,
    pub labels: Vec<String>,
}

impl WheelInput {
    /// Trimmed name and the non-blank trimmed label texts, in order.
    pub fn normalize(&self) -> Result<(String, Vec<String>), WheelError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(WheelError::EmptyName);
        }

        let labels: Vec<String> = self
            .labels
            .iter()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect();

        if labels.is_empty() {
            return Err(WheelError::NoLabels);
        }
        if labels.len() > MAX_LABELS {
            return Err(WheelError::TooManyLabels {
                count: labels.len(),
                max: MAX_LABELS,
            });
        }

        Ok((name.to_string(), labels))
    }
}

impl Wheel {
    pub fn create(input: WheelInput) -> Result<Self, WheelError> {
        Self::create_with_rng(input, &mut rand::thread_rng())
    }

    pub fn create_with_rng<R: Rng + ?Sized>(
        input: WheelInput,
        rng: &mut R,
    ) -> Result<Self, WheelError> {
        let (name, texts) = input.normalize()?;
        let colors = assign_colors(texts.len(), rng);

        let labels = texts
            .into_iter()
            .zip(colors)
            .map(|(text, color)| Label {
                id: Uuid::new_v4().to_string(),
                text,
                color,
            })
            .collect();

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name,
            labels,
            history: Vec::new(),
        })
    }

    pub fn slot_count(&self) -> usize {
        self.labels.len()
    }

    /// Resolves the slot under the marker at `final_rotation` and appends it
    /// to the history.
    pub fn record_spin(
        &mut self,
        final_rotation: f64,
        timestamp: DateTime<Utc>,
    ) -> Result<SpinRecord, WheelError> {
        let index = resolve(final_rotation, self.slot_count())?;
        let record = SpinRecord {
            timestamp,
            index,
            label: self.labels[index].text.clone(),
        };
        self.history.push(record.clone());
        Ok(record)
    }

    pub fn last_result(&self) -> Option<&SpinRecord> {
        self.history.last()
    }
}
