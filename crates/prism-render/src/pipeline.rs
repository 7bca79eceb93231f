//! Linear pipeline setup: validate, compile, link, upload, draw.

use prism_core::{
    strip_version_directives, DrawMode, Mesh, RenderError, ShaderProgramDescription, ShaderStage,
};

use crate::backend::{GraphicsBackend, RenderSurface, POSITION_ATTRIBUTE};

/// Renderer configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RendererOptions {
    /// Colour the surface is cleared to before drawing.
    pub clear_color: [f32; 4],
    /// Strip `#version` lines before compiling.
    pub strip_version: bool,
}

impl Default for RendererOptions {
    fn default() -> Self {
        Self {
            clear_color: [0.0, 0.0, 0.0, 1.0],
            strip_version: true,
        }
    }
}

impl RendererOptions {
    pub fn with_clear_color(mut self, color: [f32; 4]) -> Self {
        self.clear_color = color;
        self
    }

    /// Pass shader sources to the backend untouched when `strip` is false.
    pub fn with_strip_version(mut self, strip: bool) -> Self {
        self.strip_version = strip;
        self
    }
}

/// What a successful render did.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderReport {
    pub draw_mode: DrawMode,
    pub vertex_count: usize,
    pub index_count: usize,
    /// Whether the `position` attribute was found and bound.
    pub position_bound: bool,
    /// Non-fatal problems encountered along the way.
    pub warnings: Vec<String>,
}

/// Builds and draws a shader program in one pass.
#[derive(Debug, Clone, Default)]
pub struct ShaderRenderer {
    options: RendererOptions,
}

impl ShaderRenderer {
    pub fn new(options: RendererOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RendererOptions {
        &self.options
    }

    /// Acquire a context from `surface` and render `desc` into it.
    pub fn render<S: RenderSurface>(
        &self,
        surface: &S,
        desc: &ShaderProgramDescription,
    ) -> Result<RenderReport, RenderError> {
        let mut backend = surface.acquire().ok_or(RenderError::GraphicsUnsupported)?;
        self.render_with(&mut backend, desc)
    }

    /// Render `desc` with an already acquired backend.
    ///
    /// The first failing step aborts the render; whatever the backend already did
    /// stays done.
    pub fn render_with<B: GraphicsBackend>(
        &self,
        backend: &mut B,
        desc: &ShaderProgramDescription,
    ) -> Result<RenderReport, RenderError> {
        let parts = desc.parts().ok_or(RenderError::ShaderDataIncomplete)?;
        let mesh = Mesh::from_raw(parts.vertices, parts.indices);

        let dropped = parts.indices.len() - mesh.index_count();
        if dropped > 0 {
            log::debug!("dropped {} out-of-range indices", dropped);
        }

        let vertex = self.compile(backend, ShaderStage::Vertex, parts.vertex_shader_code)?;
        let fragment = self.compile(backend, ShaderStage::Fragment, parts.fragment_shader_code)?;

        let program = backend
            .link_program(&vertex, &fragment)
            .map_err(|log| RenderError::LinkFailed { log })?;
        backend.use_program(&program);

        backend
            .upload_vertices(&mesh.positions)
            .map_err(|reason| RenderError::Backend { reason })?;
        backend
            .upload_indices(&mesh.indices)
            .map_err(|reason| RenderError::Backend { reason })?;

        let mut warnings = Vec::new();
        let position_bound = match backend.attrib_location(&program, POSITION_ATTRIBUTE) {
            Some(location) => {
                backend.bind_vertex_attrib(location, 3);
                true
            }
            None => {
                let warning = format!("Attribute '{}' not found in vertex shader.", POSITION_ATTRIBUTE);
                log::warn!("{}", warning);
                warnings.push(warning);
                false
            }
        };

        let size = backend.surface_size();
        backend.viewport(size);
        backend.clear(self.options.clear_color);
        backend.enable_depth_test();
        backend.draw_indexed(parts.draw_mode, mesh.index_count());

        Ok(RenderReport {
            draw_mode: parts.draw_mode,
            vertex_count: mesh.vertex_count(),
            index_count: mesh.index_count(),
            position_bound,
            warnings,
        })
    }

    fn compile<B: GraphicsBackend>(
        &self,
        backend: &mut B,
        stage: ShaderStage,
        source: &str,
    ) -> Result<B::Shader, RenderError> {
        log::debug!("compiling {} shader", stage.label());
        let source = if self.options.strip_version {
            strip_version_directives(source)
        } else {
            source.to_string()
        };

        backend.compile_shader(stage, &source).map_err(|info_log| {
            log::error!("{} shader compilation failed:\n{}", stage.label(), info_log);
            RenderError::CompileFailed { stage, log: info_log }
        })
    }
}
