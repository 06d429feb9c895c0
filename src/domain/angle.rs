// Angle helpers shared by hull, barrel and projectile headings.
//
// Orientations are degrees with 0 = up (-Y) and positive turning clockwise in
// +Y-down screen coordinates.

use glam::Vec2;

/// Wraps an angle into `[-180, 180)`.
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = (angle + 180.0).rem_euclid(360.0) - 180.0;
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if wrapped >= 180.0 { wrapped - 360.0 } else { wrapped }
}

/// Angle of the line from `from` to `to`, in degrees, measured from +X.
pub fn angle_between(from: Vec2, to: Vec2) -> f32 {
    let delta = to - from;
    delta.y.atan2(delta.x).to_degrees()
}

/// Angle of a velocity vector in degrees, measured from +X.
pub fn velocity_angle(velocity: Vec2) -> f32 {
    velocity.y.atan2(velocity.x).to_degrees()
}

/// Unit vector for a heading (0 = up / -Y).
pub fn heading_vector(heading_deg: f32) -> Vec2 {
    let rad = heading_deg.to_radians();
    Vec2::new(rad.sin(), -rad.cos())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn when_angle_is_half_turn_then_wraps_to_negative_half_turn() {
        assert_eq!(wrap_degrees(180.0), -180.0);
        assert_eq!(wrap_degrees(-180.0), -180.0);
    }

    #[test]
    fn when_angle_is_outside_range_then_wraps_by_full_turns() {
        assert_abs_diff_eq!(wrap_degrees(270.0), -90.0, epsilon = 1e-4);
        assert_abs_diff_eq!(wrap_degrees(-270.0), 90.0, epsilon = 1e-4);
        assert_abs_diff_eq!(wrap_degrees(725.0), 5.0, epsilon = 1e-4);
        assert_eq!(wrap_degrees(90.0), 90.0);
    }

    #[test]
    fn when_target_is_right_of_origin_then_angle_between_is_zero() {
        let angle = angle_between(Vec2::new(10.0, 10.0), Vec2::new(50.0, 10.0));
        assert_eq!(angle, 0.0);
    }

    #[test]
    fn when_target_is_below_origin_then_angle_between_is_ninety() {
        let angle = angle_between(Vec2::ZERO, Vec2::new(0.0, 25.0));
        assert_eq!(angle, 90.0);
    }

    #[test]
    fn when_heading_is_ninety_then_vector_points_right() {
        let dir = heading_vector(90.0);
        assert_abs_diff_eq!(dir.x, 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(dir.y, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn when_heading_is_zero_then_vector_points_up() {
        let dir = heading_vector(0.0);
        assert_abs_diff_eq!(dir.x, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(dir.y, -1.0, epsilon = 1e-6);
    }
}
