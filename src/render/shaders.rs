//! WGSL sources embedded as opaque strings. The only coupling between the
//! frame loop and the torus shader is the `u_time` scalar written once per
//! tick.

pub(crate) const TORUS_SHADER: &str = r#"
struct Globals {
    view_proj: mat4x4<f32>,
    model: mat4x4<f32>,
    u_time: f32,
}

@group(0) @binding(0)
var<uniform> globals: Globals;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
}

struct VertexOutput {
    @builtin(position) position: vec4<f32>,
    @location(0) world_pos: vec3<f32>,
    @location(1) normal: vec3<f32>,
}

@vertex
fn vs_main(input: VertexInput) -> VertexOutput {
    var out: VertexOutput;

    let wobble = sin(globals.u_time + input.position.x * 3.0 + input.position.y * 2.0) * 0.1;
    let displaced = input.position + input.normal * wobble;

    let world_pos = globals.model * vec4<f32>(displaced, 1.0);
    out.position = globals.view_proj * world_pos;
    out.world_pos = world_pos.xyz;
    out.normal = normalize((globals.model * vec4<f32>(input.normal, 0.0)).xyz);
    return out;
}

@fragment
fn fs_main(input: VertexOutput) -> @location(0) vec4<f32> {
    let normal = normalize(input.normal);
    let base = normal * 0.5 + vec3<f32>(0.5);
    let pulse = 0.5 + 0.5 * sin(globals.u_time * 0.5 + input.world_pos.x * 4.0);
    // Intentionally exceeds 1.0 so the bright pass has energy to pick up.
    let color = base * (0.35 + 2.2 * pulse);
    return vec4<f32>(color, 1.0);
}
"#;

pub(crate) const BRIGHT_SHADER: &str = r#"
struct BloomParams {
    strength: f32,
    radius: f32,
    threshold: f32,
}

@group(0) @binding(0)
var<uniform> params: BloomParams;
@group(0) @binding(1)
var scene_texture: texture_2d<f32>;
@group(0) @binding(2)
var scene_sampler: sampler;

struct VertexOutput {
    @builtin(position) position: vec4<f32>,
    @location(0) uv: vec2<f32>,
}

@vertex
fn vs_main(@builtin(vertex_index) index: u32) -> VertexOutput {
    var out: VertexOutput;
    let x = f32((index << 1u) & 2u) * 2.0 - 1.0;
    let y = f32(index & 2u) * 2.0 - 1.0;
    out.position = vec4<f32>(x, y, 0.0, 1.0);
    out.uv = vec2<f32>(x * 0.5 + 0.5, 0.5 - y * 0.5);
    return out;
}

@fragment
fn fs_main(input: VertexOutput) -> @location(0) vec4<f32> {
    let color = textureSample(scene_texture, scene_sampler, input.uv).rgb;
    let luma = dot(color, vec3<f32>(0.2126, 0.7152, 0.0722));
    let contribution = max(luma - params.threshold, 0.0) / max(luma, 1e-4);
    return vec4<f32>(color * contribution, 1.0);
}
"#;

pub(crate) const BLUR_SHADER: &str = r#"
struct BlurParams {
    direction: vec2<f32>,
    spread: f32,
}

@group(0) @binding(0)
var<uniform> params: BlurParams;
@group(0) @binding(1)
var source_texture: texture_2d<f32>;
@group(0) @binding(2)
var source_sampler: sampler;

struct VertexOutput {
    @builtin(position) position: vec4<f32>,
    @location(0) uv: vec2<f32>,
}

@vertex
fn vs_main(@builtin(vertex_index) index: u32) -> VertexOutput {
    var out: VertexOutput;
    let x = f32((index << 1u) & 2u) * 2.0 - 1.0;
    let y = f32(index & 2u) * 2.0 - 1.0;
    out.position = vec4<f32>(x, y, 0.0, 1.0);
    out.uv = vec2<f32>(x * 0.5 + 0.5, 0.5 - y * 0.5);
    return out;
}

@fragment
fn fs_main(input: VertexOutput) -> @location(0) vec4<f32> {
    let size = vec2<f32>(textureDimensions(source_texture));
    let texel = params.direction * params.spread / size;

    // 9-tap separable gaussian.
    var weights = array<f32, 5>(0.227027, 0.1945946, 0.1216216, 0.054054, 0.016216);

    var color = textureSample(source_texture, source_sampler, input.uv).rgb * weights[0];
    for (var i = 1; i < 5; i = i + 1) {
        let offset = texel * f32(i);
        color += textureSample(source_texture, source_sampler, input.uv + offset).rgb * weights[i];
        color += textureSample(source_texture, source_sampler, input.uv - offset).rgb * weights[i];
    }
    return vec4<f32>(color, 1.0);
}
"#;

pub(crate) const COMPOSITE_SHADER: &str = r#"
struct BloomParams {
    strength: f32,
    radius: f32,
    threshold: f32,
}

@group(0) @binding(0)
var<uniform> params: BloomParams;
@group(0) @binding(1)
var scene_texture: texture_2d<f32>;
@group(0) @binding(2)
var bloom_texture: texture_2d<f32>;
@group(0) @binding(3)
var chain_sampler: sampler;

struct VertexOutput {
    @builtin(position) position: vec4<f32>,
    @location(0) uv: vec2<f32>,
}

@vertex
fn vs_main(@builtin(vertex_index) index: u32) -> VertexOutput {
    var out: VertexOutput;
    let x = f32((index << 1u) & 2u) * 2.0 - 1.0;
    let y = f32(index & 2u) * 2.0 - 1.0;
    out.position = vec4<f32>(x, y, 0.0, 1.0);
    out.uv = vec2<f32>(x * 0.5 + 0.5, 0.5 - y * 0.5);
    return out;
}

@fragment
fn fs_main(input: VertexOutput) -> @location(0) vec4<f32> {
    let base = textureSample(scene_texture, chain_sampler, input.uv).rgb;
    let glow = textureSample(bloom_texture, chain_sampler, input.uv).rgb;
    let color = base + glow * params.strength;
    // Reinhard keeps the HDR chain inside the presentable range.
    let mapped = color / (color + vec3<f32>(1.0));
    return vec4<f32>(mapped, 1.0);
}
"#;
