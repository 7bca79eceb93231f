//! The seam between the renderer and a concrete graphics API.

use prism_core::{DrawMode, ShaderStage, SurfaceSize};

/// Name of the vertex attribute fed from the vertex buffer.
pub const POSITION_ATTRIBUTE: &str = "position";

/// The subset of a GL-style API the renderer needs.
///
/// Failures carry the API's diagnostic text; the renderer decides which
/// user-facing error they become.
pub trait GraphicsBackend {
    type Shader;
    type Program;
    type Buffer;

    /// Pixel size of the bound drawing surface.
    fn surface_size(&self) -> SurfaceSize;

    /// Create and compile a shader. `Err` holds the info log.
    fn compile_shader(&mut self, stage: ShaderStage, source: &str) -> Result<Self::Shader, String>;

    /// Link two compiled shaders. `Err` holds the info log.
    fn link_program(
        &mut self,
        vertex: &Self::Shader,
        fragment: &Self::Shader,
    ) -> Result<Self::Program, String>;

    fn use_program(&mut self, program: &Self::Program);

    /// Upload positions into a static array buffer and leave it bound.
    fn upload_vertices(&mut self, data: &[f32]) -> Result<Self::Buffer, String>;

    /// Upload indices into a static element buffer and leave it bound.
    fn upload_indices(&mut self, data: &[u16]) -> Result<Self::Buffer, String>;

    /// Location of a vertex attribute, if the program declares it.
    fn attrib_location(&mut self, program: &Self::Program, name: &str) -> Option<u32>;

    /// Point `location` at the bound array buffer as tightly packed floats.
    fn bind_vertex_attrib(&mut self, location: u32, components: i32);

    fn viewport(&mut self, size: SurfaceSize);

    /// Clear colour and depth buffers.
    fn clear(&mut self, color: [f32; 4]);

    fn enable_depth_test(&mut self);

    /// Draw `count` 16-bit indices from the bound element buffer.
    fn draw_indexed(&mut self, mode: DrawMode, count: usize);
}

/// Something that can hand out a graphics context, such as a canvas.
pub trait RenderSurface {
    type Backend: GraphicsBackend;

    /// Obtain a context bound to this surface, or `None` if unsupported.
    fn acquire(&self) -> Option<Self::Backend>;
}
