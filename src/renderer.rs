use std::collections::HashMap;
use std::mem::size_of;
use std::ops::Range;
use std::sync::Arc;

use anyhow::Context;
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::core::GpuContext;
use crate::display::{RenderTarget, RenderTargetDescriptor};
use crate::mesh::{axes_lines, build_shape, light_marker, MeshData};
use crate::scene::{Camera, SceneGraph, SceneNode, SceneObject, Shape};
use crate::types::{InstanceData, LineVertex, MeshVertex, SceneUniform};

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
const MSAA_SAMPLES: u32 = 4;
const INITIAL_INSTANCES: usize = 64;
const INITIAL_LINE_VERTICES: usize = 64;

/// Cache key for tessellated shapes; dimensions compared bitwise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum ShapeKey {
    Cuboid([u32; 3]),
    Sphere(u32, u32, u32),
}

impl From<&Shape> for ShapeKey {
    fn from(shape: &Shape) -> Self {
        match *shape {
            Shape::Cuboid {
                width,
                height,
                depth,
            } => ShapeKey::Cuboid([width.to_bits(), height.to_bits(), depth.to_bits()]),
            Shape::Sphere {
                radius,
                width_segments,
                height_segments,
            } => ShapeKey::Sphere(radius.to_bits(), width_segments, height_segments),
        }
    }
}

struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

/// Growable vertex buffer rewritten every frame
struct DynamicBuffer {
    buffer: wgpu::Buffer,
    capacity: usize,
    stride: usize,
    label: &'static str,
}

impl DynamicBuffer {
    fn new(device: &wgpu::Device, label: &'static str, stride: usize, capacity: usize) -> Self {
        Self {
            buffer: Self::allocate(device, label, stride, capacity),
            capacity,
            stride,
            label,
        }
    }

    fn allocate(device: &wgpu::Device, label: &str, stride: usize, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: (stride * capacity) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    fn write<T: bytemuck::Pod>(&mut self, gpu: &GpuContext, items: &[T]) {
        if items.is_empty() {
            return;
        }
        if items.len() > self.capacity {
            self.capacity = items.len().next_power_of_two();
            self.buffer = Self::allocate(gpu.device(), self.label, self.stride, self.capacity);
            log::debug!("Grew {} to {} entries", self.label, self.capacity);
        }
        gpu.queue().write_buffer(&self.buffer, 0, bytemuck::cast_slice(items));
    }
}

/// wgpu render target drawing Lambert-shaded meshes and helper lines
pub struct MeshRenderer {
    gpu: GpuContext,
    surface: wgpu::Surface<'static>,
    surface_config: wgpu::SurfaceConfiguration,
    sample_count: u32,
    clear_color: wgpu::Color,
    mesh_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    scene_buffer: wgpu::Buffer,
    scene_bind_group: wgpu::BindGroup,
    depth_view: wgpu::TextureView,
    msaa_view: Option<wgpu::TextureView>,
    meshes: HashMap<ShapeKey, Option<GpuMesh>>,
    instances: DynamicBuffer,
    lines: DynamicBuffer,
}

impl MeshRenderer {
    pub async fn new(window: Arc<Window>, descriptor: &RenderTargetDescriptor) -> anyhow::Result<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window)
            .context("Failed to create surface")?;
        let gpu = GpuContext::new_with_surface(&instance, &surface).await?;

        let surface_config = Self::create_surface_config(
            &surface,
            gpu.adapter(),
            descriptor.width.max(1),
            descriptor.height.max(1),
        )?;
        surface.configure(gpu.device(), &surface_config);

        let sample_count = Self::pick_sample_count(gpu.adapter(), surface_config.format, descriptor.antialias);
        let device = gpu.device();

        let scene_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Scene Uniform Buffer"),
            size: size_of::<SceneUniform>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let scene_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bind_group_layout"),
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

        let scene_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bind_group"),
            layout: &scene_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: scene_buffer.as_entire_binding(),
            }],
        });

        let (mesh_pipeline, line_pipeline) =
            Self::create_pipelines(device, &scene_layout, surface_config.format, sample_count);

        let depth_view = Self::create_depth_view(device, &surface_config, sample_count);
        let msaa_view = Self::create_msaa_view(device, &surface_config, sample_count);

        let instances = DynamicBuffer::new(
            device,
            "Instance Buffer",
            size_of::<InstanceData>(),
            INITIAL_INSTANCES,
        );
        let lines = DynamicBuffer::new(
            device,
            "Line Buffer",
            size_of::<LineVertex>(),
            INITIAL_LINE_VERTICES,
        );

        let [r, g, b] = descriptor.clear_color.to_linear();
        let clear_color = wgpu::Color {
            r: f64::from(r),
            g: f64::from(g),
            b: f64::from(b),
            a: 1.0,
        };

        log::info!(
            "Renderer initialized: {}x{} {:?}, {}x MSAA",
            surface_config.width,
            surface_config.height,
            surface_config.format,
            sample_count
        );

        Ok(Self {
            gpu,
            surface,
            surface_config,
            sample_count,
            clear_color,
            mesh_pipeline,
            line_pipeline,
            scene_buffer,
            scene_bind_group,
            depth_view,
            msaa_view,
            meshes: HashMap::new(),
            instances,
            lines,
        })
    }

    fn create_surface_config(
        surface: &wgpu::Surface,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
    ) -> anyhow::Result<wgpu::SurfaceConfiguration> {
        let surface_caps = surface.get_capabilities(adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .context("Surface is incompatible with the adapter")?;

        Ok(wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        })
    }

    fn pick_sample_count(adapter: &wgpu::Adapter, format: wgpu::TextureFormat, antialias: bool) -> u32 {
        if !antialias {
            return 1;
        }
        let flags = adapter.get_texture_format_features(format).flags;
        if flags.sample_count_supported(MSAA_SAMPLES) {
            MSAA_SAMPLES
        } else {
            log::warn!("{}x MSAA unsupported for {:?}, antialiasing disabled", MSAA_SAMPLES, format);
            1
        }
    }

    fn create_pipelines(
        device: &wgpu::Device,
        scene_layout: &wgpu::BindGroupLayout,
        format: wgpu::TextureFormat,
        sample_count: u32,
    ) -> (wgpu::RenderPipeline, wgpu::RenderPipeline) {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Scene Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("scene.wgsl").into()),
        });

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Scene Pipeline Layout"),
            bind_group_layouts: &[scene_layout],
            push_constant_ranges: &[],
        });

        let mesh = Self::create_pipeline(
            device,
            &layout,
            &shader,
            PipelineSpec {
                label: "Mesh Pipeline",
                vs_entry: "vs_mesh",
                fs_entry: "fs_mesh",
                buffers: &[MeshVertex::layout(), InstanceData::layout()],
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: Some(wgpu::Face::Back),
                format,
                sample_count,
            },
        );

        let line = Self::create_pipeline(
            device,
            &layout,
            &shader,
            PipelineSpec {
                label: "Line Pipeline",
                vs_entry: "vs_line",
                fs_entry: "fs_line",
                buffers: &[LineVertex::layout()],
                topology: wgpu::PrimitiveTopology::LineList,
                cull_mode: None,
                format,
                sample_count,
            },
        );

        (mesh, line)
    }

    fn create_pipeline(
        device: &wgpu::Device,
        layout: &wgpu::PipelineLayout,
        shader: &wgpu::ShaderModule,
        spec: PipelineSpec<'_>,
    ) -> wgpu::RenderPipeline {
        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(spec.label),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some(spec.vs_entry),
                buffers: spec.buffers,
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some(spec.fs_entry),
                targets: &[Some(wgpu::ColorTargetState {
                    format: spec.format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: spec.topology,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: spec.cull_mode,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: spec.sample_count,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        })
    }

    fn create_depth_view(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
        sample_count: u32,
    ) -> wgpu::TextureView {
        Self::create_attachment(device, "Depth Texture", config, DEPTH_FORMAT, sample_count)
    }

    fn create_msaa_view(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
        sample_count: u32,
    ) -> Option<wgpu::TextureView> {
        (sample_count > 1).then(|| {
            Self::create_attachment(device, "MSAA Color Texture", config, config.format, sample_count)
        })
    }

    fn create_attachment(
        device: &wgpu::Device,
        label: &str,
        config: &wgpu::SurfaceConfiguration,
        format: wgpu::TextureFormat,
        sample_count: u32,
    ) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width: config.width,
                height: config.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    fn upload_mesh(device: &wgpu::Device, data: &MeshData) -> Option<GpuMesh> {
        if data.is_empty() {
            return None;
        }

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Vertex Buffer"),
            contents: bytemuck::cast_slice(&data.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Index Buffer"),
            contents: bytemuck::cast_slice(&data.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Some(GpuMesh {
            vertex_buffer,
            index_buffer,
            index_count: data.indices.len() as u32,
        })
    }

    /// Group mesh nodes by shape and upload one instance per node
    fn prepare_instances(&mut self, graph: &SceneGraph) -> Vec<(ShapeKey, Range<u32>)> {
        let device = self.gpu.device();
        let mut groups: Vec<(ShapeKey, Vec<InstanceData>)> = Vec::new();
        let mut slots: HashMap<ShapeKey, usize> = HashMap::new();

        for object in graph.meshes() {
            let key = ShapeKey::from(&object.shape);
            let uploaded = self
                .meshes
                .entry(key)
                .or_insert_with(|| Self::upload_mesh(device, &build_shape(&object.shape)));
            if uploaded.is_none() {
                continue;
            }

            let slot = *slots.entry(key).or_insert_with(|| {
                groups.push((key, Vec::new()));
                groups.len() - 1
            });
            groups[slot].1.push(instance_data(object));
        }

        let mut batches = Vec::with_capacity(groups.len());
        let mut flat = Vec::new();
        for (key, instances) in groups {
            let start = flat.len() as u32;
            flat.extend(instances);
            batches.push((key, start..flat.len() as u32));
        }

        self.instances.write(&self.gpu, &flat);
        batches
    }

    fn write_scene_uniform(&self, graph: &SceneGraph, camera: &Camera) {
        let (light_position, light_radiance) = graph
            .point_lights()
            .next()
            .map(|light| (light.position.as_vec3().to_array(), light.radiance()))
            .unwrap_or(([0.0; 3], [0.0; 3]));

        let uniform = SceneUniform {
            view_proj: camera.view_projection().as_mat4().to_cols_array_2d(),
            light_position,
            _pad1: 0.0,
            light_radiance,
            _pad2: 0.0,
        };
        self.gpu
            .queue()
            .write_buffer(&self.scene_buffer, 0, bytemuck::cast_slice(&[uniform]));
    }

    fn reconfigure(&mut self) {
        self.surface.configure(self.gpu.device(), &self.surface_config);
        self.depth_view = Self::create_depth_view(self.gpu.device(), &self.surface_config, self.sample_count);
        self.msaa_view = Self::create_msaa_view(self.gpu.device(), &self.surface_config, self.sample_count);
    }

    fn draw(&mut self, graph: &SceneGraph, camera: &Camera) -> anyhow::Result<()> {
        let batches = self.prepare_instances(graph);
        let lines = helper_lines(graph);
        self.lines.write(&self.gpu, &lines);
        self.write_scene_uniform(graph, camera);

        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost or outdated, reconfiguring");
                self.reconfigure();
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("Surface timed out, skipping frame");
                return Ok(());
            }
            Err(e) => return Err(e).context("Failed to acquire surface texture"),
        };

        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let (color_view, resolve_target) = match &self.msaa_view {
            Some(msaa) => (msaa, Some(&view)),
            None => (&view, None),
        };

        let mut encoder = self
            .gpu
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Scene Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: color_view,
                    resolve_target,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_bind_group(0, &self.scene_bind_group, &[]);

            if !batches.is_empty() {
                render_pass.set_pipeline(&self.mesh_pipeline);
                render_pass.set_vertex_buffer(1, self.instances.buffer.slice(..));
                for (key, range) in &batches {
                    if let Some(Some(mesh)) = self.meshes.get(key) {
                        render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                        render_pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                        render_pass.draw_indexed(0..mesh.index_count, 0, range.clone());
                    }
                }
            }

            if !lines.is_empty() {
                render_pass.set_pipeline(&self.line_pipeline);
                render_pass.set_vertex_buffer(0, self.lines.buffer.slice(..));
                render_pass.draw(0..lines.len() as u32, 0..1);
            }
        }

        self.gpu.queue().submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }

    /// Resize the surface and its attachments
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.surface_config.width = width;
        self.surface_config.height = height;
        self.reconfigure();
    }
}

impl RenderTarget for MeshRenderer {
    fn render(&mut self, graph: &SceneGraph, camera: &Camera) -> anyhow::Result<()> {
        self.draw(graph, camera)
    }

    fn resize(&mut self, width: u32, height: u32) {
        MeshRenderer::resize(self, width, height);
    }
}

struct PipelineSpec<'a> {
    label: &'a str,
    vs_entry: &'a str,
    fs_entry: &'a str,
    buffers: &'a [wgpu::VertexBufferLayout<'a>],
    topology: wgpu::PrimitiveTopology,
    cull_mode: Option<wgpu::Face>,
    format: wgpu::TextureFormat,
    sample_count: u32,
}

fn instance_data(object: &SceneObject) -> InstanceData {
    let [r, g, b] = object.material.color.to_linear();
    InstanceData {
        model: object.model_matrix().as_mat4().to_cols_array_2d(),
        color: [r, g, b, 1.0],
    }
}

/// Line vertices for every helper node in the graph
fn helper_lines(graph: &SceneGraph) -> Vec<LineVertex> {
    graph
        .iter()
        .flat_map(|(_, node)| match node {
            SceneNode::AxesHelper(axes) => axes_lines(axes.size),
            SceneNode::PointLightHelper(helper) => graph
                .light(helper.light)
                .map(|light| {
                    light_marker(
                        light.position.as_vec3(),
                        helper.sphere_size,
                        light.color.to_linear(),
                    )
                })
                .unwrap_or_default(),
            _ => Vec::new(),
        })
        .collect()
}
