// Hull rotation: velocity-to-orientation resolution and the timed turn that
// carries the chassis toward it.

use super::angle::{velocity_angle, wrap_degrees};
use glam::Vec2;
use std::f32::consts::PI;
use std::time::Duration;

/// Fixed length of every hull turn.
pub const HULL_TURN_DURATION: Duration = Duration::from_millis(350);

/// Resolves the hull angle a tank moving with `velocity` should face.
///
/// Returns `None` when the tank is not moving; the hull then holds its last
/// orientation. The target is kept in the range the hull is rendered in, so a
/// tank facing right (90) that starts moving down gets 180 instead of -180 and
/// turns a quarter instead of spinning three quarters the other way.
pub fn hull_target(velocity: Vec2, current_hull: f32) -> Option<f32> {
    if velocity == Vec2::ZERO {
        return None;
    }

    let velocity_deg = velocity_angle(velocity);
    let mut target = if velocity_deg >= 90.0 {
        velocity_deg - 270.0
    } else {
        velocity_deg + 90.0
    };

    if current_hull == 90.0 && target == -180.0 {
        target = 180.0;
    }

    Some(target)
}

/// Sine ease-in/ease-out over `t` in `[0, 1]`.
pub fn ease_in_out_sine(t: f32) -> f32 {
    -((PI * t).cos() - 1.0) / 2.0
}

/// Interpolation state for the chassis turn.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum HullRotation {
    #[default]
    Idle,
    Rotating {
        start: f32,
        target: f32,
        started_at: Duration,
        duration: Duration,
    },
}

impl HullRotation {
    pub fn is_rotating(&self) -> bool {
        matches!(self, HullRotation::Rotating { .. })
    }

    /// Starts a turn from `start` to `target` unless one is already running.
    pub fn try_begin(&mut self, start: f32, target: f32, now: Duration) -> bool {
        if self.is_rotating() {
            return false;
        }
        *self = HullRotation::Rotating {
            start,
            target,
            started_at: now,
            duration: HULL_TURN_DURATION,
        };
        true
    }

    /// Advances the turn to `now` and returns the wrapped hull angle to store.
    ///
    /// Returns `None` while idle. The final step lands exactly on the target.
    pub fn advance(&mut self, now: Duration) -> Option<f32> {
        let HullRotation::Rotating {
            start,
            target,
            started_at,
            duration,
        } = *self
        else {
            return None;
        };

        let elapsed = now.saturating_sub(started_at);
        if elapsed >= duration {
            *self = HullRotation::Idle;
            return Some(wrap_degrees(target));
        }

        let t = elapsed.as_secs_f32() / duration.as_secs_f32();
        Some(wrap_degrees(start + (target - start) * ease_in_out_sine(t)))
    }

    /// Drops an in-flight turn, leaving the hull where it is.
    pub fn cancel(&mut self) {
        *self = HullRotation::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::angle::heading_vector;
    use approx::assert_abs_diff_eq;

    fn velocity_at(angle_deg: f32) -> Vec2 {
        let rad = angle_deg.to_radians();
        Vec2::new(rad.cos(), rad.sin()) * 150.0
    }

    #[test]
    fn when_velocity_angle_is_ninety_five_then_target_is_minus_one_seventy_five() {
        let target = hull_target(velocity_at(95.0), 0.0).expect("moving tank has a target");
        assert_abs_diff_eq!(target, -175.0, epsilon = 1e-3);
    }

    #[test]
    fn when_velocity_angle_is_forty_five_then_target_is_one_thirty_five() {
        let target = hull_target(velocity_at(45.0), 0.0).expect("moving tank has a target");
        assert_abs_diff_eq!(target, 135.0, epsilon = 1e-3);
    }

    #[test]
    fn when_velocity_is_zero_then_no_target() {
        assert_eq!(hull_target(Vec2::ZERO, 90.0), None);
    }

    #[test]
    fn when_hull_faces_right_and_tank_moves_down_then_target_is_positive_half_turn() {
        let target = hull_target(Vec2::new(0.0, 150.0), 90.0);
        assert_eq!(target, Some(180.0));
    }

    #[test]
    fn when_hull_faces_elsewhere_and_tank_moves_down_then_target_stays_negative() {
        let target = hull_target(Vec2::new(0.0, 150.0), 0.0);
        assert_eq!(target, Some(-180.0));
    }

    #[test]
    fn when_target_is_resolved_then_hull_heading_matches_travel_direction() {
        for velocity in [
            Vec2::new(150.0, 0.0),
            Vec2::new(-150.0, 0.0),
            Vec2::new(0.0, -150.0),
            Vec2::new(150.0, 150.0),
            Vec2::new(-150.0, 150.0),
        ] {
            let target = hull_target(velocity, 0.0).expect("moving tank has a target");
            let dir = heading_vector(target);
            let expected = velocity.normalize();
            assert_abs_diff_eq!(dir.x, expected.x, epsilon = 1e-5);
            assert_abs_diff_eq!(dir.y, expected.y, epsilon = 1e-5);
        }
    }

    #[test]
    fn when_ease_is_sampled_then_endpoints_and_midpoint_hold() {
        assert_abs_diff_eq!(ease_in_out_sine(0.0), 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(ease_in_out_sine(0.5), 0.5, epsilon = 1e-6);
        assert_abs_diff_eq!(ease_in_out_sine(1.0), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn when_rotation_is_running_then_a_second_begin_is_rejected() {
        let mut rotation = HullRotation::default();
        assert!(rotation.try_begin(0.0, 90.0, Duration::ZERO));
        assert!(!rotation.try_begin(0.0, -90.0, Duration::from_millis(10)));
        assert!(matches!(
            rotation,
            HullRotation::Rotating { target, .. } if target == 90.0
        ));
    }

    #[test]
    fn when_rotation_is_half_way_then_angle_is_half_way() {
        let mut rotation = HullRotation::default();
        rotation.try_begin(0.0, 90.0, Duration::from_millis(100));
        let angle = rotation
            .advance(Duration::from_millis(100 + 175))
            .expect("rotation in flight");
        assert_abs_diff_eq!(angle, 45.0, epsilon = 1e-3);
        assert!(rotation.is_rotating());
    }

    #[test]
    fn when_duration_elapses_then_angle_lands_on_target_and_goes_idle() {
        let mut rotation = HullRotation::default();
        rotation.try_begin(-90.0, 180.0, Duration::ZERO);
        let angle = rotation.advance(HULL_TURN_DURATION).expect("final step");
        assert_eq!(angle, -180.0);
        assert_eq!(rotation, HullRotation::Idle);
        assert_eq!(rotation.advance(Duration::from_secs(1)), None);
    }

    #[test]
    fn when_cancelled_then_rotation_is_idle() {
        let mut rotation = HullRotation::default();
        rotation.try_begin(0.0, 90.0, Duration::ZERO);
        rotation.cancel();
        assert!(!rotation.is_rotating());
    }
}
