//! An in-memory backend that records calls instead of drawing.
//!
//! Clones share one call log, so a test can hand a clone to the renderer (or to a
//! [`RecordingSurface`]) and inspect the log afterwards.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use prism_core::{DrawMode, ShaderStage, SurfaceSize};

use crate::backend::{GraphicsBackend, RenderSurface, POSITION_ATTRIBUTE};

/// One recorded backend call.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CompileShader { stage: ShaderStage, source: String },
    LinkProgram,
    UseProgram,
    UploadVertices(Vec<f32>),
    UploadIndices(Vec<u16>),
    BindAttrib { location: u32, components: i32 },
    Viewport(SurfaceSize),
    Clear([f32; 4]),
    EnableDepthTest,
    DrawIndexed { mode: DrawMode, count: usize },
}

impl Call {
    /// Short name of the call, for asserting on order.
    pub fn kind(&self) -> &'static str {
        match self {
            Call::CompileShader { .. } => "compile",
            Call::LinkProgram => "link",
            Call::UseProgram => "use",
            Call::UploadVertices(_) => "upload_vertices",
            Call::UploadIndices(_) => "upload_indices",
            Call::BindAttrib { .. } => "bind_attrib",
            Call::Viewport(_) => "viewport",
            Call::Clear(_) => "clear",
            Call::EnableDepthTest => "depth_test",
            Call::DrawIndexed { .. } => "draw",
        }
    }
}

/// Records every call; failures can be scripted per stage.
#[derive(Debug, Clone)]
pub struct RecordingBackend {
    calls: Rc<RefCell<Vec<Call>>>,
    size: SurfaceSize,
    compile_failure: Option<(ShaderStage, String)>,
    link_failure: Option<String>,
    attributes: Vec<String>,
    next_id: u32,
}

impl Default for RecordingBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingBackend {
    /// A backend whose programs expose only the `position` attribute.
    pub fn new() -> Self {
        Self {
            calls: Rc::new(RefCell::new(Vec::new())),
            size: SurfaceSize::CANVAS,
            compile_failure: None,
            link_failure: None,
            attributes: vec![POSITION_ATTRIBUTE.to_string()],
            next_id: 0,
        }
    }

    pub fn with_size(mut self, size: SurfaceSize) -> Self {
        self.size = size;
        self
    }

    /// Make compilation of `stage` fail with `log`.
    pub fn failing_compile(mut self, stage: ShaderStage, log: impl Into<String>) -> Self {
        self.compile_failure = Some((stage, log.into()));
        self
    }

    /// Make linking fail with `log`.
    pub fn failing_link(mut self, log: impl Into<String>) -> Self {
        self.link_failure = Some(log.into());
        self
    }

    pub fn without_attribute(mut self, name: &str) -> Self {
        self.attributes.retain(|a| a != name);
        self
    }

    /// Snapshot of the shared call log.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn next(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }
}

impl GraphicsBackend for RecordingBackend {
    type Shader = u32;
    type Program = u32;
    type Buffer = u32;

    fn surface_size(&self) -> SurfaceSize {
        self.size
    }

    fn compile_shader(&mut self, stage: ShaderStage, source: &str) -> Result<u32, String> {
        self.record(Call::CompileShader {
            stage,
            source: source.to_string(),
        });
        match &self.compile_failure {
            Some((failing, log)) if *failing == stage => Err(log.clone()),
            _ => Ok(self.next()),
        }
    }

    fn link_program(&mut self, _vertex: &u32, _fragment: &u32) -> Result<u32, String> {
        self.record(Call::LinkProgram);
        match &self.link_failure {
            Some(log) => Err(log.clone()),
            None => Ok(self.next()),
        }
    }

    fn use_program(&mut self, _program: &u32) {
        self.record(Call::UseProgram);
    }

    fn upload_vertices(&mut self, data: &[f32]) -> Result<u32, String> {
        self.record(Call::UploadVertices(data.to_vec()));
        Ok(self.next())
    }

    fn upload_indices(&mut self, data: &[u16]) -> Result<u32, String> {
        self.record(Call::UploadIndices(data.to_vec()));
        Ok(self.next())
    }

    fn attrib_location(&mut self, _program: &u32, name: &str) -> Option<u32> {
        self.attributes
            .iter()
            .position(|a| a == name)
            .map(|i| i as u32)
    }

    fn bind_vertex_attrib(&mut self, location: u32, components: i32) {
        self.record(Call::BindAttrib { location, components });
    }

    fn viewport(&mut self, size: SurfaceSize) {
        self.record(Call::Viewport(size));
    }

    fn clear(&mut self, color: [f32; 4]) {
        self.record(Call::Clear(color));
    }

    fn enable_depth_test(&mut self) {
        self.record(Call::EnableDepthTest);
    }

    fn draw_indexed(&mut self, mode: DrawMode, count: usize) {
        self.record(Call::DrawIndexed { mode, count });
    }
}

/// A surface that hands out clones of one recording backend.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    backend: Option<RecordingBackend>,
    acquisitions: Rc<Cell<usize>>,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::with_backend(RecordingBackend::new())
    }

    pub fn with_backend(backend: RecordingBackend) -> Self {
        Self {
            backend: Some(backend),
            acquisitions: Rc::new(Cell::new(0)),
        }
    }

    /// A surface with no graphics support.
    pub fn unsupported() -> Self {
        Self {
            backend: None,
            acquisitions: Rc::new(Cell::new(0)),
        }
    }

    /// The backend handed out on acquisition (a fresh one if unsupported).
    pub fn backend(&self) -> RecordingBackend {
        self.backend.clone().unwrap_or_default()
    }

    /// How many times a context was handed out.
    pub fn acquisitions(&self) -> usize {
        self.acquisitions.get()
    }
}

impl RenderSurface for RecordingSurface {
    type Backend = RecordingBackend;

    fn acquire(&self) -> Option<RecordingBackend> {
        let backend = self.backend.clone()?;
        self.acquisitions.set(self.acquisitions.get() + 1);
        Some(backend)
    }
}
