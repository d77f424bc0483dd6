use crate::error::WheelError;

use super::layout::boundary;

const FULL_TURN_DEGREES: f64 = 360.0;

/// Residual rotation as a fraction of a turn, measured from the marker.
///
/// Whole turns are stripped first. The wheel turns clockwise, so the point now
/// under the marker started `rotation` degrees counter-clockwise from it, which
/// is `1 - residual/360` of a turn in layout terms.
pub fn tilt(final_rotation_degrees: f64) -> Result<f64, WheelError> {
    if !final_rotation_degrees.is_finite() {
        return Err(WheelError::InvalidRotation(final_rotation_degrees));
    }

    let residual = final_rotation_degrees.rem_euclid(FULL_TURN_DEGREES);
    let tilt = 1.0 - residual / FULL_TURN_DEGREES;
    // A residual of 0 (or a rounding to 360) lands exactly on the start.
    if tilt >= 1.0 || tilt < 0.0 {
        Ok(0.0)
    } else {
        Ok(tilt)
    }
}

/// Index of the slot under the marker after the wheel stops at
/// `final_rotation_degrees`.
///
/// Slots are half-open `[start, end)` ranges in label order, so a tilt sitting
/// exactly on a boundary belongs to the upper slot.
pub fn resolve(final_rotation_degrees: f64, slot_count: usize) -> Result<usize, WheelError> {
    if slot_count == 0 {
        return Err(WheelError::InvalidSlotCount(slot_count));
    }

    let tilt = tilt(final_rotation_degrees)?;
    let index = (0..slot_count)
        .find(|&i| boundary(i, slot_count) <= tilt && tilt < boundary(i + 1, slot_count))
        .unwrap_or(slot_count - 1);
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worked_example_three_labels() {
        // offset 10° plus one spin's worth of 5 revolutions
        let rotation = 10.0 + 1800.0;
        let tilt = tilt(rotation).unwrap();
        assert!((tilt - (1.0 - 10.0 / 360.0)).abs() < 1e-12);
        assert_eq!(resolve(rotation, 3).unwrap(), 2);
    }

    #[test]
    fn test_whole_turns_are_ignored() {
        for turns in 0..10 {
            let rotation = 100.0 + 360.0 * turns as f64;
            assert_eq!(resolve(rotation, 6).unwrap(), resolve(100.0, 6).unwrap());
        }
    }

    #[test]
    fn test_zero_rotation_is_first_slot() {
        assert_eq!(tilt(0.0).unwrap(), 0.0);
        assert_eq!(tilt(720.0).unwrap(), 0.0);
        assert_eq!(resolve(0.0, 4).unwrap(), 0);
    }

    #[test]
    fn test_boundary_goes_to_upper_slot() {
        // residual 90° on a 4-slot wheel puts tilt exactly at 3/4
        assert_eq!(tilt(90.0).unwrap(), 0.75);
        assert_eq!(resolve(90.0, 4).unwrap(), 3);
        // residual 180° on a 2-slot wheel puts tilt exactly at 1/2
        assert_eq!(resolve(180.0, 2).unwrap(), 1);
    }

    #[test]
    fn test_every_tilt_maps_to_one_contiguous_slot() {
        for n in 1..=13 {
            let mut last = 0;
            for step in 0..3600 {
                let rotation = 360.0 - step as f64 / 10.0;
                let index = resolve(rotation, n).unwrap();
                assert!(index < n);
                assert!(index >= last, "slots must be contiguous as tilt grows");
                last = index;
            }
            assert_eq!(last, n - 1);
        }
    }

    #[test]
    fn test_negative_rotation_wraps() {
        assert_eq!(resolve(-10.0, 3).unwrap(), resolve(350.0, 3).unwrap());
    }

    #[test]
    fn test_rejects_zero_slots() {
        assert_eq!(resolve(10.0, 0), Err(WheelError::InvalidSlotCount(0)));
    }

    #[test]
    fn test_rejects_non_finite_rotation() {
        assert!(matches!(
            resolve(f64::NAN, 3),
            Err(WheelError::InvalidRotation(_))
        ));
        assert!(matches!(
            resolve(f64::INFINITY, 3),
            Err(WheelError::InvalidRotation(_))
        ));
    }
}
