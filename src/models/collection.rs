use serde::Serialize;

use crate::error::WheelError;

use super::Wheel;

/// The wheels a user keeps, in display order, and which one is on screen.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WheelCollection {
    wheels: Vec<Wheel>,
    selected: Option<usize>,
}

impl WheelCollection {
    pub fn new(wheels: Vec<Wheel>) -> Self {
        Self {
            wheels,
            selected: None,
        }
    }

    pub fn wheels(&self) -> &[Wheel] {
        &self.wheels
    }

    pub fn len(&self) -> usize {
        self.wheels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wheels.is_empty()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected(&self) -> Option<&Wheel> {
        self.selected.and_then(|i| self.wheels.get(i))
    }

    /// Appends a wheel and puts it on screen. Returns its index.
    pub fn add(&mut self, wheel: Wheel) -> usize {
        self.wheels.push(wheel);
        let index = self.wheels.len() - 1;
        self.selected = Some(index);
        index
    }

    pub fn select(&mut self, index: usize) -> Result<&Wheel, WheelError> {
        let len = self.wheels.len();
        let wheel = self
            .wheels
            .get(index)
            .ok_or(WheelError::IndexOutOfRange { index, len })?;
        self.selected = Some(index);
        Ok(wheel)
    }

    /// Removes the wheel at `index`. The selection follows the wheel it pointed
    /// at, and is cleared when that wheel is the one removed.
    pub fn remove(&mut self, index: usize) -> Result<Wheel, WheelError> {
        let len = self.wheels.len();
        if index >= len {
            return Err(WheelError::IndexOutOfRange { index, len });
        }

        let removed = self.wheels.remove(index);
        self.selected = match self.selected {
            Some(selected) if selected == index => None,
            Some(selected) if selected > index => Some(selected - 1),
            other => other,
        };
        Ok(removed)
    }

    pub fn position(&self, wheel_id: &str) -> Option<usize> {
        self.wheels.iter().position(|w| w.id == wheel_id)
    }

    pub fn get(&self, wheel_id: &str) -> Option<&Wheel> {
        self.wheels.iter().find(|w| w.id == wheel_id)
    }

    pub fn get_mut(&mut self, wheel_id: &str) -> Option<&mut Wheel> {
        self.wheels.iter_mut().find(|w| w.id == wheel_id)
    }
}
