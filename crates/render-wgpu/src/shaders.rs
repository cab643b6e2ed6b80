/// Name of the shader the mesh pipeline is built from.
pub const UBER_SHADER_NAME: &str = "uber";

/// Built-in WGSL for textured renderables.
///
/// Used whenever the context has no non-empty `uber` shader, or the
/// context's source fails validation. `globals.mode.x` selects the shading:
/// 0 lit, 1 unlit, 2 normals.
pub const MESH_SHADER: &str = r#"
struct Globals {
    view_proj: mat4x4<f32>,
    eye: vec4<f32>,
    mode: vec4<u32>,
};

@group(0) @binding(0)
var<uniform> globals: Globals;

@group(1) @binding(0)
var t_albedo: texture_2d<f32>;
@group(1) @binding(1)
var s_albedo: sampler;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec4<f32>,
    @location(2) tangent: vec4<f32>,
    @location(3) uv: vec2<f32>,
};

struct InstanceInput {
    @location(4) model_0: vec4<f32>,
    @location(5) model_1: vec4<f32>,
    @location(6) model_2: vec4<f32>,
    @location(7) model_3: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_pos: vec3<f32>,
    @location(1) world_normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

@vertex
fn vs_main(vertex: VertexInput, instance: InstanceInput) -> VertexOutput {
    let model = mat4x4<f32>(
        instance.model_0,
        instance.model_1,
        instance.model_2,
        instance.model_3,
    );
    let world_pos = model * vec4<f32>(vertex.position, 1.0);
    // Normals are packed into unorm bytes.
    let normal = vertex.normal.xyz * 2.0 - 1.0;

    var out: VertexOutput;
    out.clip_position = globals.view_proj * world_pos;
    out.world_pos = world_pos.xyz;
    out.world_normal = normalize((model * vec4<f32>(normal, 0.0)).xyz);
    out.uv = vertex.uv;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let albedo = textureSample(t_albedo, s_albedo, in.uv);
    let n = normalize(in.world_normal);
    switch globals.mode.x {
        case 1u: {
            return albedo;
        }
        case 2u: {
            return vec4<f32>(n * 0.5 + 0.5, 1.0);
        }
        default: {
            let light_dir = normalize(vec3<f32>(0.3, 1.0, 0.5));
            let view_dir = normalize(globals.eye.xyz - in.world_pos);
            let half_dir = normalize(light_dir + view_dir);
            let diffuse = max(dot(n, light_dir), 0.0);
            let specular = pow(max(dot(n, half_dir), 0.0), 32.0) * 0.25;
            let lighting = 0.3 + diffuse * 0.7;
            return vec4<f32>(albedo.rgb * lighting + vec3<f32>(specular), albedo.a);
        }
    }
}
"#;

/// WGSL shader for the grid floor.
pub const GRID_SHADER: &str = r#"
struct Globals {
    view_proj: mat4x4<f32>,
    eye: vec4<f32>,
    mode: vec4<u32>,
};

@group(0) @binding(0)
var<uniform> globals: Globals;

struct GridVertex {
    @location(0) position: vec3<f32>,
    @location(1) color: vec4<f32>,
};

struct GridOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
};

@vertex
fn vs_grid(vertex: GridVertex) -> GridOutput {
    var out: GridOutput;
    out.clip_position = globals.view_proj * vec4<f32>(vertex.position, 1.0);
    out.color = vertex.color;
    return out;
}

@fragment
fn fs_grid(in: GridOutput) -> @location(0) vec4<f32> {
    return in.color;
}
"#;
