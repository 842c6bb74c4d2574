use crate::params::EffectiveParameters;

/// GPU renderer bound to one off-screen surface of fixed dimensions.
///
/// Construction attempts adapter/device acquisition and pipeline
/// validation once. When that fails the instance stays permanently inert:
/// `set_image` and `render` become silent no-ops and only `read_pixels`
/// reports the condition. A fresh instance is required to try again on a
/// capable context.
pub struct Renderer {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) state: Option<GpuContext>,
}

/// Everything the renderer exclusively owns on the device. Dropped with
/// the renderer; nothing here is shared across instances.
pub(crate) struct GpuContext {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub pipeline: wgpu::RenderPipeline,
    pub bind_group_layout: wgpu::BindGroupLayout,
    pub vertex_buffer: wgpu::Buffer,
    pub uniform_buffer: wgpu::Buffer,
    pub sampler: wgpu::Sampler,
    pub target: wgpu::Texture,
    pub target_view: wgpu::TextureView,
    pub source: Option<SourceTexture>,
}

/// The bound image plus the bind group that references it. Replaced as a
/// unit on every `set_image`, so at most one source texture is alive per
/// renderer. The texture handle is held for ownership, not read directly.
pub(crate) struct SourceTexture {
    #[allow(unused)]
    pub texture: wgpu::Texture,
    pub bind_group: wgpu::BindGroup,
}

impl Renderer {
    /// Surface dimensions chosen at construction.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// False when GPU initialization failed and this instance is inert.
    pub fn is_ready(&self) -> bool {
        self.state.is_some()
    }

    /// True once an image has been bound with `set_image`.
    pub fn has_image(&self) -> bool {
        self.state
            .as_ref()
            .is_some_and(|ctx| ctx.source.is_some())
    }
}

/// Uniform block consumed by the film shader. Field order and the padding
/// around the vec3 matrix rows mirror the WGSL struct layout exactly
/// (vec3 members align to 16 bytes).
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct FilterParams {
    pub saturation: f32,
    pub contrast: f32,
    pub brightness: f32,
    pub warmth: f32,
    pub tint: f32,
    pub vignette: f32,
    pub grain: f32,
    pub grain_seed: f32,
    pub grayscale: u32,
    pub _pad0: [f32; 3],
    pub mix_r: [f32; 3],
    pub _pad1: f32,
    pub mix_g: [f32; 3],
    pub _pad2: f32,
    pub mix_b: [f32; 3],
    pub _pad3: f32,
}

impl FilterParams {
    pub fn new(params: &EffectiveParameters, grain_seed: f32) -> Self {
        FilterParams {
            saturation: params.saturation,
            contrast: params.contrast,
            brightness: params.brightness,
            warmth: params.warmth,
            tint: params.tint,
            vignette: params.vignette,
            grain: params.grain,
            grain_seed,
            grayscale: params.grayscale as u32,
            _pad0: [0.0; 3],
            mix_r: params.channel_mix.r,
            _pad1: 0.0,
            mix_g: params.channel_mix.g,
            _pad2: 0.0,
            mix_b: params.channel_mix.b,
            _pad3: 0.0,
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct Vertex {
    pub position: [f32; 2],
    pub tex_coords: [f32; 2],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x2];

    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &Self::ATTRIBUTES,
    };
}

/// Two triangles covering the whole surface, texcoords mapping the source
/// 1:1 onto it. Fixed geometry: framing is decided by surface dimensions,
/// never by transforming vertices.
pub(crate) const FULL_SURFACE_VERTICES: [Vertex; 6] = [
    Vertex { position: [-1.0, -1.0], tex_coords: [0.0, 1.0] },
    Vertex { position: [1.0, -1.0], tex_coords: [1.0, 1.0] },
    Vertex { position: [-1.0, 1.0], tex_coords: [0.0, 0.0] },
    Vertex { position: [-1.0, 1.0], tex_coords: [0.0, 0.0] },
    Vertex { position: [1.0, -1.0], tex_coords: [1.0, 1.0] },
    Vertex { position: [1.0, 1.0], tex_coords: [1.0, 0.0] },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_block_layout() {
        // the WGSL struct is 96 bytes with mix rows at 48/64/80
        assert_eq!(std::mem::size_of::<FilterParams>(), 96);
        assert_eq!(std::mem::offset_of!(FilterParams, grayscale), 32);
        assert_eq!(std::mem::offset_of!(FilterParams, mix_r), 48);
        assert_eq!(std::mem::offset_of!(FilterParams, mix_g), 64);
        assert_eq!(std::mem::offset_of!(FilterParams, mix_b), 80);
    }

    #[test]
    fn test_uniform_from_effective_parameters() {
        let preset = crate::presets::find_preset("acros");
        let params = FilterParams::new(&preset.at_intensity(1.0), 0.5);
        assert_eq!(params.grayscale, 1);
        assert_eq!(params.mix_r, [0.3, 0.6, 0.1]);
        assert_eq!(params.grain_seed, 0.5);

        let off = FilterParams::new(&preset.at_intensity(0.25), 0.0);
        assert_eq!(off.grayscale, 0);
    }

    #[test]
    fn test_full_surface_geometry() {
        assert_eq!(FULL_SURFACE_VERTICES.len(), 6);
        // corners of clip space are all covered
        let has = |p: [f32; 2]| FULL_SURFACE_VERTICES.iter().any(|v| v.position == p);
        assert!(has([-1.0, -1.0]) && has([1.0, -1.0]) && has([-1.0, 1.0]) && has([1.0, 1.0]));
        // top-left vertex samples the first texel row
        let top_left = FULL_SURFACE_VERTICES
            .iter()
            .find(|v| v.position == [-1.0, 1.0])
            .unwrap();
        assert_eq!(top_left.tex_coords, [0.0, 0.0]);
    }
}
