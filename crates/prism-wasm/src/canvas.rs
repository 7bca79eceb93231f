//! WebGL rendering for generated shaders.
//!
//! Provides a [`GraphicsBackend`] over a WebGL 1 context and a canvas wrapper that
//! JavaScript can hand generated programs to.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    HtmlCanvasElement, WebGlBuffer, WebGlProgram, WebGlRenderingContext as GL, WebGlShader,
};

use prism_core::{DrawMode, RenderError, ShaderProgramDescription, ShaderStage, SurfaceSize};
use prism_render::{GraphicsBackend, RenderSurface, ShaderRenderer};

use crate::types::RenderReportJs;

/// Context ids tried in order when acquiring a context.
const CONTEXT_IDS: [&str; 2] = ["webgl", "experimental-webgl"];

/// A WebGL 1 context and the pixel size of its canvas.
pub struct WebGlBackend {
    gl: GL,
    size: SurfaceSize,
}

impl WebGlBackend {
    pub fn new(gl: GL, size: SurfaceSize) -> Self {
        Self { gl, size }
    }
}

impl GraphicsBackend for WebGlBackend {
    type Shader = WebGlShader;
    type Program = WebGlProgram;
    type Buffer = WebGlBuffer;

    fn surface_size(&self) -> SurfaceSize {
        self.size
    }

    fn compile_shader(&mut self, stage: ShaderStage, source: &str) -> Result<WebGlShader, String> {
        let kind = match stage {
            ShaderStage::Vertex => GL::VERTEX_SHADER,
            ShaderStage::Fragment => GL::FRAGMENT_SHADER,
        };
        let shader = self
            .gl
            .create_shader(kind)
            .ok_or_else(|| "Unable to create shader object".to_string())?;
        self.gl.shader_source(&shader, source);
        self.gl.compile_shader(&shader);

        let compiled = self
            .gl
            .get_shader_parameter(&shader, GL::COMPILE_STATUS)
            .as_bool()
            .unwrap_or(false);
        if compiled {
            Ok(shader)
        } else {
            let info = self.gl.get_shader_info_log(&shader).unwrap_or_default();
            self.gl.delete_shader(Some(&shader));
            Err(info)
        }
    }

    fn link_program(&mut self, vertex: &WebGlShader, fragment: &WebGlShader) -> Result<WebGlProgram, String> {
        let program = self
            .gl
            .create_program()
            .ok_or_else(|| "Unable to create program object".to_string())?;
        self.gl.attach_shader(&program, vertex);
        self.gl.attach_shader(&program, fragment);
        self.gl.link_program(&program);

        let linked = self
            .gl
            .get_program_parameter(&program, GL::LINK_STATUS)
            .as_bool()
            .unwrap_or(false);
        if linked {
            Ok(program)
        } else {
            let info = self.gl.get_program_info_log(&program).unwrap_or_default();
            self.gl.delete_program(Some(&program));
            Err(info)
        }
    }

    fn use_program(&mut self, program: &WebGlProgram) {
        self.gl.use_program(Some(program));
    }

    fn upload_vertices(&mut self, data: &[f32]) -> Result<WebGlBuffer, String> {
        let buffer = self
            .gl
            .create_buffer()
            .ok_or_else(|| "Unable to create vertex buffer".to_string())?;
        self.gl.bind_buffer(GL::ARRAY_BUFFER, Some(&buffer));
        let array = js_sys::Float32Array::from(data);
        self.gl
            .buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &array, GL::STATIC_DRAW);
        Ok(buffer)
    }

    fn upload_indices(&mut self, data: &[u16]) -> Result<WebGlBuffer, String> {
        let buffer = self
            .gl
            .create_buffer()
            .ok_or_else(|| "Unable to create index buffer".to_string())?;
        self.gl.bind_buffer(GL::ELEMENT_ARRAY_BUFFER, Some(&buffer));
        let array = js_sys::Uint16Array::from(data);
        self.gl
            .buffer_data_with_array_buffer_view(GL::ELEMENT_ARRAY_BUFFER, &array, GL::STATIC_DRAW);
        Ok(buffer)
    }

    fn attrib_location(&mut self, program: &WebGlProgram, name: &str) -> Option<u32> {
        let location = self.gl.get_attrib_location(program, name);
        u32::try_from(location).ok()
    }

    fn bind_vertex_attrib(&mut self, location: u32, components: i32) {
        self.gl
            .vertex_attrib_pointer_with_i32(location, components, GL::FLOAT, false, 0, 0);
        self.gl.enable_vertex_attrib_array(location);
    }

    fn viewport(&mut self, size: SurfaceSize) {
        self.gl.viewport(0, 0, size.width as i32, size.height as i32);
    }

    fn clear(&mut self, color: [f32; 4]) {
        let [r, g, b, a] = color;
        self.gl.clear_color(r, g, b, a);
        self.gl.clear(GL::COLOR_BUFFER_BIT | GL::DEPTH_BUFFER_BIT);
    }

    fn enable_depth_test(&mut self) {
        self.gl.enable(GL::DEPTH_TEST);
    }

    fn draw_indexed(&mut self, mode: DrawMode, count: usize) {
        self.gl
            .draw_elements_with_i32(mode.gl_enum(), count as i32, GL::UNSIGNED_SHORT, 0);
    }
}

/// A canvas that yields a fresh WebGL backend on every acquisition.
#[derive(Clone)]
pub struct WebGlSurface {
    canvas: HtmlCanvasElement,
}

impl WebGlSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self { canvas }
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl RenderSurface for WebGlSurface {
    type Backend = WebGlBackend;

    fn acquire(&self) -> Option<WebGlBackend> {
        let size = SurfaceSize::new(self.canvas.width(), self.canvas.height());
        CONTEXT_IDS
            .iter()
            .find_map(|id| self.canvas.get_context(id).ok().flatten())
            .and_then(|context| context.dyn_into::<GL>().ok())
            .map(|gl| WebGlBackend::new(gl, size))
    }
}

/// Canvas that draws generated shader programs.
#[wasm_bindgen]
pub struct ShaderCanvas {
    surface: WebGlSurface,
    renderer: ShaderRenderer,
}

#[wasm_bindgen]
impl ShaderCanvas {
    /// Wrap an existing canvas element.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement) -> ShaderCanvas {
        ShaderCanvas {
            surface: WebGlSurface::new(canvas),
            renderer: ShaderRenderer::default(),
        }
    }

    /// Create a detached 500x500 canvas.
    pub fn create() -> Result<ShaderCanvas, JsError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsError::new("No document available"))?;
        let canvas = document
            .create_element("canvas")
            .map_err(|_| JsError::new("Failed to create canvas element"))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| JsError::new("Failed to cast to HtmlCanvasElement"))?;

        let size = SurfaceSize::CANVAS;
        canvas.set_width(size.width);
        canvas.set_height(size.height);
        Ok(ShaderCanvas::new(canvas))
    }

    /// The underlying canvas element.
    #[wasm_bindgen(getter)]
    pub fn element(&self) -> HtmlCanvasElement {
        self.surface.canvas().clone()
    }

    /// Render a shader program description, returning a render report.
    ///
    /// A payload that does not deserialize is reported the same way as one with
    /// missing fields.
    pub fn render(&self, program: JsValue) -> Result<JsValue, JsError> {
        let desc: ShaderProgramDescription = serde_wasm_bindgen::from_value(program).map_err(|e| {
            log::warn!("malformed shader program: {}", e);
            JsError::new(&RenderError::ShaderDataIncomplete.to_string())
        })?;

        let report = self
            .renderer
            .render(&self.surface, &desc)
            .map_err(|e| JsError::new(&e.to_string()))?;

        serde_wasm_bindgen::to_value(&RenderReportJs::from(&report))
            .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
    }
}

impl ShaderCanvas {
    pub(crate) fn surface(&self) -> &WebGlSurface {
        &self.surface
    }

    pub(crate) fn renderer(&self) -> &ShaderRenderer {
        &self.renderer
    }
}
