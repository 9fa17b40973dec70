//! Animated torus viewport with a bloom post-processing chain.
//!
//! The crate splits the sketch into a GPU-free core (viewport, camera,
//! animation clock, frame counter, orbit controls, torus geometry) and a
//! wgpu renderer that consumes per-frame snapshots of that core.  The
//! split keeps the whole animation contract testable in headless tools
//! without a window or a GPU.

pub mod controls;
pub mod mesh;
pub mod render;
pub mod sketch;

pub use controls::OrbitControls;
pub use mesh::{TorusMesh, Vertex};
pub use render::Renderer;
pub use sketch::{
    FrameState, PassKind, Sketch, SketchConfig, SketchError, SharedViewport, POST_CHAIN,
};
