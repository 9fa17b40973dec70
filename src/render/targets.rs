/// Offscreen render targets for the scene pass and the bloom chain.
///
/// The scene renders into an HDR color target; the bloom chain works at a
/// quarter of the surface resolution. All targets are recreated on resize.
pub(crate) struct FrameTargets {
    pub scene_color_view: wgpu::TextureView,
    pub depth_view: wgpu::TextureView,
    pub bright_view: wgpu::TextureView,
    pub blur_ping_view: wgpu::TextureView,
    pub blur_pong_view: wgpu::TextureView,
}

impl FrameTargets {
    pub const COLOR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;
    pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24Plus;

    pub fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let bloom_width = (width / 4).max(1);
        let bloom_height = (height / 4).max(1);

        Self {
            scene_color_view: create_color_target(device, "scene-color", width, height),
            depth_view: create_depth_target(device, width, height),
            bright_view: create_color_target(device, "bloom-bright", bloom_width, bloom_height),
            blur_ping_view: create_color_target(device, "bloom-blur-ping", bloom_width, bloom_height),
            blur_pong_view: create_color_target(device, "bloom-blur-pong", bloom_width, bloom_height),
        }
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        *self = Self::new(device, width, height);
    }
}

fn create_color_target(
    device: &wgpu::Device,
    label: &str,
    width: u32,
    height: u32,
) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: FrameTargets::COLOR_FORMAT,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

fn create_depth_target(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("scene-depth"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: FrameTargets::DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}
