use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::WheelError;

use super::resolver::resolve;

pub const DEFAULT_REVOLUTIONS_PER_SPIN: u32 = 5;

/// Uniform landing offset in `[0, 360)` degrees, drawn once per spin.
pub fn random_offset<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen_range(0.0..360.0)
}

/// Whole-turn bias added on spin number `count`. Grows with every spin so the
/// wheel always travels forward, even when two offsets repeat.
pub fn revolution_bias(count: u32, revolutions_per_spin: u32) -> f64 {
    360.0 * f64::from(revolutions_per_spin) * f64::from(count)
}

/// Rotation state of the wheel currently on display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpinState {
    pub wheel_id: Option<String>,
    pub count: u32,
    /// Cumulative rotation in degrees.
    pub rotation: f64,
}

/// Target of a single spin, before it resolves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpinPlan {
    pub count: u32,
    pub offset: f64,
    pub rotation: f64,
}

impl SpinPlan {
    /// Slot this plan lands on for a wheel of `slot_count` slots.
    pub fn landing_index(&self, slot_count: usize) -> Result<usize, WheelError> {
        resolve(self.rotation, slot_count)
    }
}

impl SpinState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Points the state at `wheel_id`, starting over when it's a different wheel.
    pub fn focus(&mut self, wheel_id: &str) {
        if self.wheel_id.as_deref() != Some(wheel_id) {
            *self = Self {
                wheel_id: Some(wheel_id.to_string()),
                count: 0,
                rotation: 0.0,
            };
        }
    }

    /// Advances to the next spin landing `offset` degrees past whole turns.
    pub fn begin(&mut self, offset: f64, revolutions_per_spin: u32) -> SpinPlan {
        self.count = self.count.saturating_add(1);
        self.rotation = offset + revolution_bias(self.count, revolutions_per_spin);
        SpinPlan {
            count: self.count,
            offset,
            rotation: self.rotation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_worked_example_plan() {
        let mut state = SpinState::new();
        state.focus("wheel");
        let plan = state.begin(10.0, DEFAULT_REVOLUTIONS_PER_SPIN);
        assert_eq!(plan.count, 1);
        assert_eq!(plan.rotation, 1810.0);
        assert_eq!(plan.landing_index(3).unwrap(), 2);
    }

    #[test]
    fn test_bias_strictly_increases() {
        let mut state = SpinState::new();
        let first = state.begin(359.9, DEFAULT_REVOLUTIONS_PER_SPIN);
        let second = state.begin(0.0, DEFAULT_REVOLUTIONS_PER_SPIN);
        assert!(
            revolution_bias(second.count, DEFAULT_REVOLUTIONS_PER_SPIN)
                > revolution_bias(first.count, DEFAULT_REVOLUTIONS_PER_SPIN)
        );
        assert!(second.rotation > first.rotation);
    }

    #[test]
    fn test_plan_decodes_to_offset_slot() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut state = SpinState::new();
        for _ in 0..200 {
            let offset = random_offset(&mut rng);
            assert!((0.0..360.0).contains(&offset));
            let plan = state.begin(offset, 3);
            // the bias is whole turns, so it must not change the landing slot
            assert_eq!(plan.landing_index(7).unwrap(), resolve(offset, 7).unwrap());
        }
    }

    #[test]
    fn test_focus_resets_for_other_wheel() {
        let mut state = SpinState::new();
        state.focus("a");
        state.begin(20.0, 5);
        state.focus("a");
        assert_eq!(state.count, 1);

        state.focus("b");
        assert_eq!(state.count, 0);
        assert_eq!(state.rotation, 0.0);
        assert_eq!(state.wheel_id.as_deref(), Some("b"));
    }
}
