use bytemuck::{Pod, Zeroable};

/// Instanced circle shader: one screen-aligned quad per circle, with the
/// circle cut out and anti-aliased in the fragment stage.
///
/// Positions arrive in device pixels with the origin at the top-left; the
/// vertex stage maps them to clip space using the viewport size.
pub const CIRCLE_SHADER: &str = r#"
struct Uniforms {
    viewport: vec2<f32>,
    _padding: vec2<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
    @location(1) offset: vec2<f32>,
    @location(2) radius: f32,
};

@vertex
fn vs_main(
    @builtin(vertex_index) vertex_index: u32,
    @location(0) center: vec2<f32>,
    @location(1) radius: f32,
    @location(2) color: vec4<f32>,
) -> VertexOutput {
    var quad_vertices = array<vec2<f32>, 6>(
        vec2<f32>(-1.0, -1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>( 1.0,  1.0),
    );

    // One extra pixel for the anti-aliased rim
    let extent = radius + 1.0;
    let offset = quad_vertices[vertex_index] * extent;
    let pixel = center + offset;
    let ndc = vec2<f32>(
        pixel.x / uniforms.viewport.x * 2.0 - 1.0,
        1.0 - pixel.y / uniforms.viewport.y * 2.0,
    );

    var out: VertexOutput;
    out.clip_position = vec4<f32>(ndc, 0.0, 1.0);
    out.color = color;
    out.offset = offset;
    out.radius = radius;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let dist = length(in.offset);
    let coverage = clamp(in.radius + 0.5 - dist, 0.0, 1.0) * min(in.radius * 2.0, 1.0);
    if coverage <= 0.0 {
        discard;
    }
    return vec4<f32>(in.color.rgb, in.color.a * coverage);
}
"#;

/// Per-instance circle data, in device pixels.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct CircleInstance {
    pub center: [f32; 2],
    pub radius: f32,
    pub _pad: f32,
    pub color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
pub struct Uniforms {
    pub viewport: [f32; 2],
    pub _padding: [f32; 2],
}
