use glam::Mat4;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::controls::OrbitControls;

/// Vertical field of view of the perspective camera, in degrees.
pub const FOV_DEGREES: f32 = 70.0;
/// Near clip plane distance.
pub const NEAR_PLANE: f32 = 0.01;
/// Far clip plane distance.
pub const FAR_PLANE: f32 = 1000.0;
/// Initial distance between the camera and the torus.
pub const CAMERA_DISTANCE: f32 = 3.0;

/// Amount the animation clock advances per tick. Frame-count-based on
/// purpose: playback speed follows the achieved frame rate.
pub const TIME_STEP: f32 = 0.05;
/// Divisor turning the frame counter into the X rotation angle.
pub const ROTATION_X_DIVISOR: f32 = 2000.0;
/// Divisor turning the frame counter into the Y rotation angle.
pub const ROTATION_Y_DIVISOR: f32 = 1000.0;

/// Torus dimensions and tessellation used by the renderer.
pub const TORUS_RADIUS: f32 = 1.0;
pub const TORUS_TUBE_RADIUS: f32 = 0.3;
pub const TORUS_RADIAL_SEGMENTS: u32 = 1000;
pub const TORUS_TUBULAR_SEGMENTS: u32 = 1000;

/// Bloom pass tuning.
pub const BLOOM_STRENGTH: f32 = 1.4;
pub const BLOOM_RADIUS: f32 = 0.0001;
pub const BLOOM_THRESHOLD: f32 = 0.01;

/// Errors produced while constructing the sketch.
#[derive(Debug, Error)]
pub enum SketchError {
    #[error("viewport has zero extent ({width}x{height})")]
    EmptyViewport { width: u32, height: u32 },
}

/// Initial viewport dimensions for the sketch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SketchConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

/// One stage of the per-frame pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PassKind {
    /// Base scene render into the offscreen color target.
    Render,
    /// Bloom composite onto the displayed output.
    Bloom,
}

/// Fixed pass order applied once per tick.
pub const POST_CHAIN: [PassKind; 2] = [PassKind::Render, PassKind::Bloom];

/// Snapshot of the animation state produced by one tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameState {
    pub frame: u64,
    pub time: f32,
    pub rotation_x: f32,
    pub rotation_y: f32,
    pub passes: [PassKind; 2],
}

/// Perspective camera. Aspect follows the viewport; everything else is
/// fixed at construction.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    fn new(aspect: f32) -> Self {
        Self {
            fov: FOV_DEGREES.to_radians(),
            aspect,
            near: NEAR_PLANE,
            far: FAR_PLANE,
        }
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }
}

/// The animated torus viewport.
///
/// Owns the camera, orbit controls, animation clock, and frame counter.
/// Rendering is deliberately kept outside of this type: `tick` returns a
/// [`FrameState`] snapshot the renderer consumes, so the whole animation
/// contract is testable without a window or GPU.
#[derive(Debug)]
pub struct Sketch {
    width: u32,
    height: u32,
    camera: Camera,
    controls: OrbitControls,
    time: f32,
    frame: u64,
    rotation_x: f32,
    rotation_y: f32,
}

impl Sketch {
    /// Creates the sketch and performs the initial size synchronization.
    pub fn new(config: SketchConfig) -> Result<Self, SketchError> {
        if config.width == 0 || config.height == 0 {
            return Err(SketchError::EmptyViewport {
                width: config.width,
                height: config.height,
            });
        }
        let aspect = config.width as f32 / config.height as f32;
        Ok(Self {
            width: config.width,
            height: config.height,
            camera: Camera::new(aspect),
            controls: OrbitControls::new(CAMERA_DISTANCE),
            time: 0.0,
            frame: 0,
            rotation_x: 0.0,
            rotation_y: 0.0,
        })
    }

    /// Pushes new viewport dimensions to the camera.
    ///
    /// Zero dimensions are ignored; window systems report transient zero
    /// sizes while minimizing. Repeated calls with identical dimensions
    /// leave the state unchanged.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.width = width;
        self.height = height;
        self.camera.aspect = width as f32 / height as f32;
    }

    /// Advances the animation by one frame and returns the new state.
    ///
    /// The clock gains a fixed step per call and the rotation angles are
    /// recomputed from the frame counter, so N ticks always produce the
    /// same state regardless of wall time.
    pub fn tick(&mut self) -> FrameState {
        self.time += TIME_STEP;
        self.frame += 1;
        self.rotation_x = self.frame as f32 / ROTATION_X_DIVISOR;
        self.rotation_y = self.frame as f32 / ROTATION_Y_DIVISOR;
        FrameState {
            frame: self.frame,
            time: self.time,
            rotation_x: self.rotation_x,
            rotation_y: self.rotation_y,
            passes: POST_CHAIN,
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn aspect(&self) -> f32 {
        self.camera.aspect
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn controls(&self) -> &OrbitControls {
        &self.controls
    }

    pub fn controls_mut(&mut self) -> &mut OrbitControls {
        &mut self.controls
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn rotation(&self) -> (f32, f32) {
        (self.rotation_x, self.rotation_y)
    }

    /// Model matrix for the torus at the current rotation.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_y(self.rotation_y) * Mat4::from_rotation_x(self.rotation_x)
    }

    /// Combined view-projection matrix for the current camera orbit.
    pub fn view_projection(&self) -> Mat4 {
        self.camera.projection_matrix() * self.controls.view_matrix()
    }
}

/// Viewport size shared between the event loop and the frame path.
#[derive(Debug)]
pub struct SharedViewport {
    size: RwLock<(u32, u32)>,
}

impl SharedViewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: RwLock::new((width.max(1), height.max(1))),
        }
    }

    pub fn update(&self, width: u32, height: u32) {
        *self.size.write() = (width.max(1), height.max(1));
    }

    pub fn size(&self) -> (u32, u32) {
        *self.size.read()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sketch_800x600() -> Sketch {
        Sketch::new(SketchConfig {
            width: 800,
            height: 600,
        })
        .unwrap()
    }

    #[test]
    fn construction_sets_aspect_from_config() {
        let sketch = sketch_800x600();
        assert_eq!(sketch.aspect(), 800.0 / 600.0);
        assert_eq!(sketch.size(), (800, 600));
    }

    #[test]
    fn zero_extent_is_rejected() {
        let result = Sketch::new(SketchConfig {
            width: 0,
            height: 600,
        });
        assert!(matches!(
            result,
            Err(SketchError::EmptyViewport {
                width: 0,
                height: 600
            })
        ));
    }

    #[test]
    fn resize_updates_aspect() {
        let mut sketch = sketch_800x600();
        sketch.resize(1920, 1080);
        assert_eq!(sketch.aspect(), 1920.0 / 1080.0);
        assert_eq!(sketch.size(), (1920, 1080));
    }

    #[test]
    fn resize_is_idempotent() {
        let mut sketch = sketch_800x600();
        sketch.resize(1024, 768);
        let aspect = sketch.aspect();
        let size = sketch.size();
        sketch.resize(1024, 768);
        assert_eq!(sketch.aspect(), aspect);
        assert_eq!(sketch.size(), size);
    }

    #[test]
    fn resize_ignores_zero_dimensions() {
        let mut sketch = sketch_800x600();
        sketch.resize(0, 0);
        assert_eq!(sketch.size(), (800, 600));
        sketch.resize(800, 0);
        assert_eq!(sketch.size(), (800, 600));
    }

    #[test]
    fn clock_advances_by_fixed_step() {
        let mut sketch = sketch_800x600();
        let mut previous = sketch.time();
        for _ in 0..200 {
            let state = sketch.tick();
            let delta = state.time - previous;
            assert!(state.time > previous);
            assert!((delta - TIME_STEP).abs() < 1e-6);
            previous = state.time;
        }
    }

    #[test]
    fn rotation_is_a_function_of_the_frame_counter() {
        let mut sketch = sketch_800x600();
        for expected_frame in 1..=100u64 {
            let state = sketch.tick();
            assert_eq!(state.frame, expected_frame);
            assert_eq!(state.rotation_x, expected_frame as f32 / 2000.0);
            assert_eq!(state.rotation_y, expected_frame as f32 / 1000.0);
        }
    }

    #[test]
    fn ten_ticks_match_the_reference_scenario() {
        let mut sketch = sketch_800x600();
        let mut last = None;
        for _ in 0..10 {
            last = Some(sketch.tick());
        }
        let state = last.unwrap();
        assert!((state.time - 0.5).abs() < 1e-6);
        assert_eq!(state.rotation_x, 0.005);
        assert_eq!(state.rotation_y, 0.01);
    }

    #[test]
    fn every_tick_reports_the_fixed_pass_order() {
        let mut sketch = sketch_800x600();
        for _ in 0..25 {
            let state = sketch.tick();
            assert_eq!(state.passes, [PassKind::Render, PassKind::Bloom]);
        }
    }

    #[test]
    fn shared_viewport_clamps_to_one() {
        let viewport = SharedViewport::new(0, 0);
        assert_eq!(viewport.size(), (1, 1));
        viewport.update(640, 480);
        assert_eq!(viewport.size(), (640, 480));
    }
}
