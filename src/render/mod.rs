mod bloom;
mod renderer;
mod shaders;
mod targets;

pub use renderer::Renderer;
