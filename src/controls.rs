use std::f32::consts::PI;

use glam::{Mat4, Vec3};

const MIN_DISTANCE: f32 = 0.5;
const MAX_DISTANCE: f32 = 50.0;
const ROTATE_SENSITIVITY: f32 = 0.005;
const ZOOM_SENSITIVITY: f32 = 0.1;

/// Orbit camera controller around a fixed target.
///
/// Yaw and pitch describe the camera position on a sphere of `distance`
/// around the target; the camera always looks at the target.
#[derive(Debug, Clone, Copy)]
pub struct OrbitControls {
    target: Vec3,
    distance: f32,
    yaw: f32,
    pitch: f32,
}

impl OrbitControls {
    pub fn new(distance: f32) -> Self {
        Self {
            target: Vec3::ZERO,
            distance,
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    /// Applies a mouse drag delta in pixels.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * ROTATE_SENSITIVITY;
        self.pitch = (self.pitch + dy * ROTATE_SENSITIVITY).clamp(PI * -0.49, PI * 0.49);
    }

    /// Applies a scroll delta in wheel lines; positive zooms in.
    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance - delta * ZOOM_SENSITIVITY).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Camera position on the orbit sphere. Yaw and pitch of zero place
    /// the camera on the +Z axis.
    pub fn eye(&self) -> Vec3 {
        let direction = Vec3::new(
            self.yaw.sin() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.cos() * self.pitch.cos(),
        );
        self.target + direction * self.distance
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, Vec3::Y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_orbit_sits_on_the_z_axis() {
        let controls = OrbitControls::new(3.0);
        let eye = controls.eye();
        assert!((eye - Vec3::new(0.0, 0.0, 3.0)).length() < 1e-6);
    }

    #[test]
    fn rotation_preserves_distance() {
        let mut controls = OrbitControls::new(3.0);
        controls.rotate(120.0, -45.0);
        assert!((controls.eye().length() - 3.0).abs() < 1e-5);
    }

    #[test]
    fn pitch_is_clamped_away_from_the_poles() {
        let mut controls = OrbitControls::new(3.0);
        controls.rotate(0.0, 10_000.0);
        let eye = controls.eye();
        // Still usable as a look-at with a Y up vector.
        assert!(eye.x.abs() + eye.z.abs() > 1e-3);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut controls = OrbitControls::new(3.0);
        controls.zoom(1_000.0);
        assert_eq!(controls.distance(), MIN_DISTANCE);
        controls.zoom(-10_000.0);
        assert_eq!(controls.distance(), MAX_DISTANCE);
    }

    #[test]
    fn view_matrix_is_finite() {
        let mut controls = OrbitControls::new(3.0);
        controls.rotate(37.0, 11.0);
        let view = controls.view_matrix();
        assert!(view.to_cols_array().iter().all(|v| v.is_finite()));
    }
}
