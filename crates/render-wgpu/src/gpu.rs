use crate::shaders;
use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use orbitview_common::CameraHandle;
use orbitview_render::{RenderContext, RenderError, Texture, Vertex};
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Globals {
    view_proj: [[f32; 4]; 4],
    eye: [f32; 4],
    mode: [u32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct InstanceData {
    model_0: [f32; 4],
    model_1: [f32; 4],
    model_2: [f32; 4],
    model_3: [f32; 4],
}

impl InstanceData {
    fn from_matrix(model: &Mat4) -> Self {
        let cols = model.to_cols_array_2d();
        Self {
            model_0: cols[0],
            model_1: cols[1],
            model_2: cols[2],
            model_3: cols[3],
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct GridVertex {
    position: [f32; 3],
    color: [f32; 4],
}

struct GpuGeometry {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

/// Generate grid floor line vertices.
fn grid_mesh(half_extent: i32, spacing: f32) -> Vec<GridVertex> {
    let mut verts = Vec::new();
    let color = [0.4, 0.4, 0.4, 1.0];
    let extent = half_extent as f32 * spacing;

    for i in -half_extent..=half_extent {
        let offset = i as f32 * spacing;
        // Lines along X
        verts.push(GridVertex {
            position: [-extent, 0.0, offset],
            color,
        });
        verts.push(GridVertex {
            position: [extent, 0.0, offset],
            color,
        });
        // Lines along Z
        verts.push(GridVertex {
            position: [offset, 0.0, -extent],
            color,
        });
        verts.push(GridVertex {
            position: [offset, 0.0, extent],
            color,
        });
    }
    verts
}

fn depth_state() -> wgpu::DepthStencilState {
    wgpu::DepthStencilState {
        format: wgpu::TextureFormat::Depth32Float,
        depth_write_enabled: true,
        depth_compare: wgpu::CompareFunction::Less,
        stencil: Default::default(),
        bias: Default::default(),
    }
}

/// wgpu renderer for a [`RenderContext`].
pub struct WgpuRenderer {
    mesh_pipeline: wgpu::RenderPipeline,
    mesh_layout: wgpu::PipelineLayout,
    grid_pipeline: wgpu::RenderPipeline,
    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    texture_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    fallback_texture: wgpu::BindGroup,
    geometries: Vec<GpuGeometry>,
    textures: Vec<wgpu::BindGroup>,
    grid_vertex_buffer: wgpu::Buffer,
    grid_vertex_count: u32,
    instance_buffer: wgpu::Buffer,
    max_instances: u32,
    depth_texture: wgpu::TextureView,
    surface_format: wgpu::TextureFormat,
    shader_generation: Option<u64>,
}

impl WgpuRenderer {
    /// Render systems this backend contributes.
    pub const SYSTEMS: [&'static str; 2] = ["grid", "mesh"];

    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Self {
        let globals_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("globals_buffer"),
            contents: bytemuck::bytes_of(&Globals {
                view_proj: Mat4::IDENTITY.to_cols_array_2d(),
                eye: [0.0; 4],
                mode: [0; 4],
            }),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let globals_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bind_group"),
            layout: &globals_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });

        let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("albedo_bind_group_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let grid_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("grid_pipeline_layout"),
            bind_group_layouts: &[&globals_layout],
            push_constant_ranges: &[],
        });
        let mesh_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("mesh_pipeline_layout"),
            bind_group_layouts: &[&globals_layout, &texture_layout],
            push_constant_ranges: &[],
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("albedo_sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let white = Texture {
            width: 1,
            height: 1,
            format: orbitview_render::TextureFormat::Rgba8,
            data: vec![255; 4],
        };
        let fallback_texture =
            Self::create_texture_bind_group(device, queue, &texture_layout, &sampler, &white);

        let mesh_pipeline =
            Self::create_mesh_pipeline(device, &mesh_layout, surface_format, shaders::MESH_SHADER);
        let grid_pipeline = Self::create_grid_pipeline(device, &grid_layout, surface_format);

        // Grid mesh
        let grid_verts = grid_mesh(50, 1.0);
        let grid_vertex_count = grid_verts.len() as u32;
        let grid_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("grid_vertex_buffer"),
            contents: bytemuck::cast_slice(&grid_verts),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let max_instances = 64u32;
        let instance_buffer = Self::create_instance_buffer(device, max_instances);
        let depth_texture = Self::create_depth_texture(device, width, height);

        Self {
            mesh_pipeline,
            mesh_layout,
            grid_pipeline,
            globals_buffer,
            globals_bind_group,
            texture_layout,
            sampler,
            fallback_texture,
            geometries: Vec::new(),
            textures: Vec::new(),
            grid_vertex_buffer,
            grid_vertex_count,
            instance_buffer,
            max_instances,
            depth_texture,
            surface_format,
            shader_generation: None,
        }
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_texture = Self::create_depth_texture(device, width, height);
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface_format
    }

    /// Upload resources added to `ctx` since the last frame and rebuild the
    /// mesh pipeline if the shaders changed.
    pub fn sync(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, ctx: &RenderContext) {
        for geometry in ctx.geometries().iter().skip(self.geometries.len()) {
            let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("geometry_vertex_buffer"),
                contents: bytemuck::cast_slice(&geometry.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
            let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("geometry_index_buffer"),
                contents: bytemuck::cast_slice(&geometry.indices),
                usage: wgpu::BufferUsages::INDEX,
            });
            self.geometries.push(GpuGeometry {
                vertex_buffer,
                index_buffer,
                index_count: geometry.indices.len() as u32,
            });
        }

        for texture in ctx.textures().iter().skip(self.textures.len()) {
            let bind_group = Self::create_texture_bind_group(
                device,
                queue,
                &self.texture_layout,
                &self.sampler,
                texture,
            );
            self.textures.push(bind_group);
        }

        let generation = ctx.shader_generation();
        if self.shader_generation != Some(generation) {
            self.shader_generation = Some(generation);
            self.rebuild_mesh_pipeline(device, ctx);
        }
    }

    fn rebuild_mesh_pipeline(&mut self, device: &wgpu::Device, ctx: &RenderContext) {
        let source = ctx
            .shader(shaders::UBER_SHADER_NAME)
            .map(|s| s.source.as_str())
            .filter(|s| !s.trim().is_empty());
        let Some(source) = source else {
            self.mesh_pipeline = Self::create_mesh_pipeline(
                device,
                &self.mesh_layout,
                self.surface_format,
                shaders::MESH_SHADER,
            );
            return;
        };

        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let pipeline =
            Self::create_mesh_pipeline(device, &self.mesh_layout, self.surface_format, source);
        match pollster::block_on(device.pop_error_scope()) {
            None => {
                tracing::info!(shader = shaders::UBER_SHADER_NAME, "mesh pipeline rebuilt");
                self.mesh_pipeline = pipeline;
            }
            Some(err) => {
                tracing::error!(
                    shader = shaders::UBER_SHADER_NAME,
                    "shader failed to build, keeping built-in: {err}"
                );
                self.mesh_pipeline = Self::create_mesh_pipeline(
                    device,
                    &self.mesh_layout,
                    self.surface_format,
                    shaders::MESH_SHADER,
                );
            }
        }
    }

    /// Render one frame through `camera`: grid floor plus every renderable.
    ///
    /// Returns the number of draw calls issued.
    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        view: &wgpu::TextureView,
        ctx: &RenderContext,
        camera: CameraHandle,
    ) -> Result<u32, RenderError> {
        let cam = ctx
            .camera(camera)
            .ok_or(RenderError::CameraNotFound(camera))?;
        self.sync(device, queue, ctx);

        let settings = ctx.settings();
        let eye = cam.pose().position;
        queue.write_buffer(
            &self.globals_buffer,
            0,
            bytemuck::bytes_of(&Globals {
                view_proj: cam.view_projection().to_cols_array_2d(),
                eye: eye.extend(1.0).to_array(),
                mode: [settings.renderer.shader_mode(), 0, 0, 0],
            }),
        );

        let renderables = ctx.renderables();
        if renderables.len() as u32 > self.max_instances {
            self.max_instances = (renderables.len() as u32).next_power_of_two();
            self.instance_buffer = Self::create_instance_buffer(device, self.max_instances);
        }
        let instances: Vec<InstanceData> = renderables
            .iter()
            .map(|(_, r)| InstanceData::from_matrix(&r.transform))
            .collect();
        if !instances.is_empty() {
            queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&instances));
        }

        let [r, g, b, a] = settings.clear_color_rgba();
        let mut draw_calls = 0u32;
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("render_encoder"),
        });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("main_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: r as f64,
                            g: g as f64,
                            b: b as f64,
                            a: a as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            // Draw grid floor
            pass.set_pipeline(&self.grid_pipeline);
            pass.set_bind_group(0, &self.globals_bind_group, &[]);
            pass.set_vertex_buffer(0, self.grid_vertex_buffer.slice(..));
            pass.draw(0..self.grid_vertex_count, 0..1);
            draw_calls += 1;

            // Draw renderables, one instance each
            pass.set_pipeline(&self.mesh_pipeline);
            pass.set_bind_group(0, &self.globals_bind_group, &[]);
            pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
            for (i, (_, renderable)) in renderables.iter().enumerate() {
                let Some(geometry) = self.geometries.get(renderable.geometry.0 as usize) else {
                    continue;
                };
                let albedo = ctx
                    .material(renderable.material)
                    .and_then(|m| m.texture("u_albedo"))
                    .and_then(|t| self.textures.get(t.0 as usize))
                    .unwrap_or(&self.fallback_texture);
                pass.set_bind_group(1, albedo, &[]);
                pass.set_vertex_buffer(0, geometry.vertex_buffer.slice(..));
                pass.set_index_buffer(geometry.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
                let instance = i as u32;
                pass.draw_indexed(0..geometry.index_count, 0, instance..instance + 1);
                draw_calls += 1;
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
        Ok(draw_calls)
    }

    fn create_mesh_pipeline(
        device: &wgpu::Device,
        layout: &wgpu::PipelineLayout,
        surface_format: wgpu::TextureFormat,
        source: &str,
    ) -> wgpu::RenderPipeline {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("mesh_shader"),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        });

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("mesh_pipeline"),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<Vertex>() as u64,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &wgpu::vertex_attr_array![
                            0 => Float32x3,
                            1 => Unorm8x4,
                            2 => Unorm8x4,
                            3 => Snorm16x2,
                        ],
                    },
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<InstanceData>() as u64,
                        step_mode: wgpu::VertexStepMode::Instance,
                        attributes: &wgpu::vertex_attr_array![
                            4 => Float32x4,
                            5 => Float32x4,
                            6 => Float32x4,
                            7 => Float32x4,
                        ],
                    },
                ],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: Some(wgpu::Face::Back),
                ..Default::default()
            },
            depth_stencil: Some(depth_state()),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        })
    }

    fn create_grid_pipeline(
        device: &wgpu::Device,
        layout: &wgpu::PipelineLayout,
        surface_format: wgpu::TextureFormat,
    ) -> wgpu::RenderPipeline {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("grid_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::GRID_SHADER.into()),
        });

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("grid_pipeline"),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_grid"),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<GridVertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![
                        0 => Float32x3,
                        1 => Float32x4,
                    ],
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_grid"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                ..Default::default()
            },
            depth_stencil: Some(depth_state()),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        })
    }

    fn create_texture_bind_group(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
        texture: &Texture,
    ) -> wgpu::BindGroup {
        let gpu_texture = device.create_texture_with_data(
            queue,
            &wgpu::TextureDescriptor {
                label: Some("albedo_texture"),
                size: wgpu::Extent3d {
                    width: texture.width.max(1),
                    height: texture.height.max(1),
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba8UnormSrgb,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            },
            wgpu::util::TextureDataOrder::LayerMajor,
            &texture.data,
        );
        let view = gpu_texture.create_view(&Default::default());
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("albedo_bind_group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        })
    }

    fn create_instance_buffer(device: &wgpu::Device, max_instances: u32) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("instance_buffer"),
            size: (max_instances as u64) * std::mem::size_of::<InstanceData>() as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    fn create_depth_texture(
        device: &wgpu::Device,
        width: u32,
        height: u32,
    ) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth_texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&Default::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_has_two_lines_per_step() {
        let verts = grid_mesh(2, 1.0);
        // 5 steps, 2 lines each, 2 vertices per line
        assert_eq!(verts.len(), 20);
        assert!(verts.iter().all(|v| v.position[1] == 0.0));
    }

    #[test]
    fn gpu_structs_match_shader_layout() {
        assert_eq!(std::mem::size_of::<Globals>(), 96);
        assert_eq!(std::mem::size_of::<InstanceData>(), 64);
        assert_eq!(std::mem::size_of::<Vertex>(), 24);
    }

    #[test]
    fn instance_columns_follow_matrix() {
        let m = Mat4::from_translation(glam::Vec3::new(1.0, 2.0, 3.0));
        let inst = InstanceData::from_matrix(&m);
        assert_eq!(inst.model_3, [1.0, 2.0, 3.0, 1.0]);
    }
}
