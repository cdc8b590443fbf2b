//! Camera auto-rotation
//!
//! The renderer draws the cube at `current` rotation, which eases toward
//! `target` a little every tick. Where `target` comes from depends on the
//! [`CameraMode`].

use super::state::GridPosition;
use super::topology;

/// Distances below the smallest step snap straight to the target
pub const MIN_ROTATION_STEP: f64 = 0.5;
/// Step used for a half-turn distance
pub const MAX_ROTATION_STEP: f64 = 10.0;
const MAX_ROTATION_DISTANCE: f64 = 180.0;

/// Normalize an angle in degrees to (-180, 180]
pub fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Shortest angular distance between two angles, considering wraparound
pub fn angular_distance(from: f64, to: f64) -> f64 {
    let diff = from - to;
    diff.abs().min((diff - 360.0).abs()).min((diff + 360.0).abs())
}

/// Which way to turn from `from` to reach `to` along the shorter arc
///
/// Returns `1` for increasing angles, `-1` for decreasing ones and `0` when
/// the angles are equal. Both inputs are expected in (-180, 180].
pub fn rotation_sign(from: f64, to: f64) -> i32 {
    if from == to {
        return 0;
    }

    let increasing = if (from >= 0.0 && to >= 0.0) || (from <= 0.0 && to <= 0.0) {
        to > from
    } else if from > 0.0 {
        // from positive, to negative: going down crosses 0, going up crosses 180
        from - to > MAX_ROTATION_DISTANCE
    } else {
        to - from <= MAX_ROTATION_DISTANCE
    };

    if increasing { 1 } else { -1 }
}

/// Linear map of `value` from one range onto another
fn project_to_range(value: f64, from: [f64; 2], to: [f64; 2]) -> f64 {
    let ratio = (value - from[0]) / (from[1] - from[0]);
    to[0] + (to[1] - to[0]) * ratio
}

/// Move `current` one easing step toward `target`
///
/// Far targets are approached quickly, near ones slowly, and anything closer
/// than [`MIN_ROTATION_STEP`] is reached immediately.
pub fn make_rotation_step(current: f64, target: f64) -> f64 {
    let distance = angular_distance(current, target);
    if distance < MIN_ROTATION_STEP {
        return target;
    }

    let step = project_to_range(
        distance,
        [0.0, MAX_ROTATION_DISTANCE],
        [MIN_ROTATION_STEP, MAX_ROTATION_STEP],
    );

    normalize_degrees(current + step * f64::from(rotation_sign(current, target)))
}

/// Tilt around the X axis and spin around the Y axis, in degrees
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CameraRotation {
    pub x: f64,
    pub y: f64,
}

impl CameraRotation {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// What drives the target rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraMode {
    /// Slow constant spin
    #[default]
    Overview,
    /// Keep the snake's head centred
    FollowSnake,
    /// Target is set by dragging
    ManualControl,
}

/// Rotation state of the cube as seen by the renderer
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Camera {
    pub current: CameraRotation,
    pub target: CameraRotation,
    pub mode: CameraMode,
    pub is_dragging: bool,
}

impl Camera {
    /// Update the target for the current mode, then ease toward it
    pub fn auto_rotate(&mut self, head: GridPosition, grid_size: usize, spin_step: f64) {
        match self.mode {
            CameraMode::Overview => {
                self.target.y = normalize_degrees(self.target.y - spin_step);
            }
            CameraMode::FollowSnake => {
                self.target = topology::rotation_for_position(head, grid_size);
            }
            CameraMode::ManualControl => {}
        }

        if self.current.x != self.target.x {
            self.current.x = make_rotation_step(self.current.x, self.target.x);
        }
        if self.current.y != self.target.y {
            self.current.y = make_rotation_step(self.current.y, self.target.y);
        }
    }

    /// Whether the rendered rotation still has to move
    pub fn is_settled(&self) -> bool {
        self.current == self.target
    }

    pub fn begin_drag(&mut self) {
        self.is_dragging = true;
        self.mode = CameraMode::ManualControl;
    }

    pub fn end_drag(&mut self) {
        self.is_dragging = false;
    }

    /// Rotate by a pointer movement of (`dx`, `dy`) pixels
    ///
    /// Deltas are previous minus current pointer position. Dragging skips the
    /// easing so the cube sticks to the pointer.
    pub fn drag(&mut self, dx: f64, dy: f64, velocity: f64) {
        if !self.is_dragging {
            return;
        }

        self.target.x = normalize_degrees(self.target.x - dy * velocity);
        self.target.y = normalize_degrees(self.target.y - dx * velocity);
        self.current = self.target;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::state::Face;
    use proptest::prelude::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert_eq!(normalize_degrees(180.0), 180.0);
        assert_eq!(normalize_degrees(-180.0), 180.0);
        assert_eq!(normalize_degrees(190.0), -170.0);
        assert_eq!(normalize_degrees(-190.0), 170.0);
        assert_eq!(normalize_degrees(720.0), 0.0);
        assert_eq!(normalize_degrees(-90.0), -90.0);
    }

    #[test]
    fn test_angular_distance_wraps() {
        assert_eq!(angular_distance(10.0, 30.0), 20.0);
        assert_eq!(angular_distance(170.0, -170.0), 20.0);
        assert_eq!(angular_distance(-170.0, 170.0), 20.0);
        assert_eq!(angular_distance(90.0, -90.0), 180.0);
    }

    #[test]
    fn test_rotation_sign() {
        assert_eq!(rotation_sign(10.0, 10.0), 0);
        assert_eq!(rotation_sign(10.0, 30.0), 1);
        assert_eq!(rotation_sign(30.0, 10.0), -1);
        assert_eq!(rotation_sign(-30.0, -10.0), 1);
        assert_eq!(rotation_sign(0.0, -10.0), -1);
        assert_eq!(rotation_sign(0.0, 10.0), 1);
        // shorter arc through zero
        assert_eq!(rotation_sign(10.0, -10.0), -1);
        assert_eq!(rotation_sign(-10.0, 10.0), 1);
        // shorter arc through 180
        assert_eq!(rotation_sign(170.0, -170.0), 1);
        assert_eq!(rotation_sign(-170.0, 170.0), -1);
        // exactly half a turn apart
        assert_eq!(rotation_sign(90.0, -90.0), -1);
        assert_eq!(rotation_sign(-90.0, 90.0), 1);
    }

    #[test]
    fn test_rotation_step_snaps_when_close() {
        assert_eq!(make_rotation_step(0.0, 0.3), 0.3);
        assert_eq!(make_rotation_step(-179.8, 179.9), 179.9);
    }

    #[test]
    fn test_rotation_step_scales_with_distance() {
        // 0.5 + 9.5 * 90 / 180
        assert_close(make_rotation_step(0.0, 90.0), 5.25);
        assert_close(make_rotation_step(0.0, -90.0), -5.25);
        // 20 degrees apart across the 180 seam
        assert_close(make_rotation_step(170.0, -170.0), 170.0 + 0.5 + 9.5 * 20.0 / 180.0);
        assert_close(
            make_rotation_step(179.5, -179.5),
            normalize_degrees(179.5 + 0.5 + 9.5 / 180.0),
        );
    }

    #[test]
    fn test_overview_spins_target() {
        let mut camera = Camera::default();
        let head = GridPosition::new(Face::Front, 0, 0);

        camera.auto_rotate(head, 16, 0.3);
        assert_close(camera.target.y, -0.3);
        assert_eq!(camera.target.x, 0.0);
        assert!(camera.is_settled());

        for _ in 0..1000 {
            camera.auto_rotate(head, 16, 0.3);
        }
        assert!(camera.target.y > -180.0 && camera.target.y <= 180.0);
    }

    #[test]
    fn test_follow_converges_on_head() {
        let mut camera = Camera {
            mode: CameraMode::FollowSnake,
            ..Default::default()
        };
        let head = GridPosition::new(Face::Back, 8, 8);

        camera.auto_rotate(head, 16, 0.3);
        assert_eq!(camera.target, CameraRotation::new(4.0, 176.0));
        assert!(!camera.is_settled());

        for _ in 0..200 {
            camera.auto_rotate(head, 16, 0.3);
        }
        assert!(camera.is_settled());
    }

    #[test]
    fn test_manual_mode_keeps_target() {
        let mut camera = Camera::default();
        camera.begin_drag();
        assert_eq!(camera.mode, CameraMode::ManualControl);

        camera.drag(-40.0, 20.0, 0.25);
        assert_eq!(camera.target, CameraRotation::new(-5.0, 10.0));
        assert_eq!(camera.current, camera.target);

        camera.end_drag();
        camera.drag(100.0, 100.0, 0.25);
        assert_eq!(camera.target, CameraRotation::new(-5.0, 10.0));

        camera.auto_rotate(GridPosition::new(Face::Up, 3, 3), 16, 0.3);
        assert_eq!(camera.target, CameraRotation::new(-5.0, 10.0));
    }

    proptest! {
        #[test]
        fn rotation_sign_is_antisymmetric(a in -179.0f64..=180.0, b in -179.0f64..=180.0) {
            if a == b {
                prop_assert_eq!(rotation_sign(a, b), 0);
            } else {
                prop_assert_eq!(rotation_sign(a, b), -rotation_sign(b, a));
            }
        }

        #[test]
        fn rotation_step_never_overshoots(a in -179.0f64..=180.0, b in -179.0f64..=180.0) {
            let before = angular_distance(a, b);
            let next = make_rotation_step(a, b);
            prop_assert!(next > -180.0 && next <= 180.0);
            prop_assert!(angular_distance(next, b) < before || next == b);
        }
    }
}
