use crate::calibration::AccelCalibration;

/// Degrees between an axis and the gravity axis, both in g, `0.0` when both are zero
pub fn tilt_angle(axis: f32, gravity: f32) -> f32 {
    if axis == 0.0 && gravity == 0.0 {
        return 0.0;
    }

    libm::atan2f(axis, gravity).to_degrees().clamp(-180.0, 180.0)
}

/// Rotation about the Y axis from raw X and Z
pub fn roll(calibration: &AccelCalibration, accel_x: u16, accel_z: u16) -> f32 {
    tilt_angle(calibration.normalize(accel_x), calibration.normalize(accel_z))
}

/// Rotation about the X axis from raw Y and Z
pub fn pitch(calibration: &AccelCalibration, accel_y: u16, accel_z: u16) -> f32 {
    tilt_angle(calibration.normalize(accel_y), calibration.normalize(accel_z))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-3;

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < EPSILON,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_tilt_angle_quadrants() {
        assert_close(tilt_angle(0.0, 1.0), 0.0);
        assert_close(tilt_angle(1.0, 0.0), 90.0);
        assert_close(tilt_angle(-1.0, 0.0), -90.0);
        assert_close(tilt_angle(1.0, 1.0), 45.0);
        assert_close(tilt_angle(0.0, -1.0).abs(), 180.0);
    }

    #[test]
    fn test_tilt_angle_degenerate_is_zero() {
        assert_eq!(tilt_angle(0.0, 0.0), 0.0);
        assert_eq!(tilt_angle(-0.0, -0.0), 0.0);
    }

    #[test]
    fn test_level_controller_reads_zero() {
        let calibration = AccelCalibration::default();
        let zero = calibration.zero_g();
        let one = calibration.one_g();

        assert_close(roll(&calibration, zero, one), 0.0);
        assert_close(pitch(&calibration, zero, one), 0.0);
    }

    #[test]
    fn test_on_side_reads_ninety() {
        let calibration = AccelCalibration::new(500, 700);

        // x carries gravity, z at rest
        assert_close(roll(&calibration, 700, 500), 90.0);
        assert_close(roll(&calibration, 300, 500), -90.0);
        assert_close(pitch(&calibration, 700, 500), 90.0);
    }

    #[test]
    fn test_extremes_stay_in_range() {
        let calibration = AccelCalibration::default();

        for &(a, z) in &[(0, 0), (1023, 0), (0, 1023), (1023, 1023), (511, 0), (0, 511)] {
            let r = roll(&calibration, a, z);
            assert!((-180.0..=180.0).contains(&r), "roll {r} out of range");
            let p = pitch(&calibration, a, z);
            assert!((-180.0..=180.0).contains(&p), "pitch {p} out of range");
        }
    }
}
