//! Text-to-shader panel.

use std::cell::RefCell;
use std::rc::Weak;

use prism_core::{RenderError, ServiceError};
use prism_render::{RenderReport, RenderSurface, ShaderRenderer};
use prism_service::{GeneratedShader, ShaderService, ShaderTransport};

/// Button label while idle.
pub const GENERATE_LABEL: &str = "Generate Shader";
/// Button label while a request is in flight.
pub const GENERATING_LABEL: &str = "Generating...";

/// What happened to a generate request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOutcome {
    /// Blank description or a request already in flight; nothing was sent.
    Rejected,
    Succeeded,
    /// The request finished with an error, now shown in the panel.
    Failed,
    /// The panel was unmounted while the request was outstanding.
    Discarded,
}

/// Description input, request status, error slot, and the last generated shader.
#[derive(Debug, Default)]
pub struct ShaderPanel {
    description: String,
    in_flight: bool,
    error: Option<String>,
    shader: Option<GeneratedShader>,
}

impl ShaderPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn shader(&self) -> Option<&GeneratedShader> {
        self.shader.as_ref()
    }

    pub fn can_generate(&self) -> bool {
        !self.in_flight && !self.description.trim().is_empty()
    }

    pub fn button_label(&self) -> &'static str {
        if self.in_flight {
            GENERATING_LABEL
        } else {
            GENERATE_LABEL
        }
    }

    /// Mark a request as started and return the description to send.
    ///
    /// Clears the previous error and shader. Returns `None`, changing nothing, if a
    /// request may not start now.
    pub fn begin_request(&mut self) -> Option<String> {
        if !self.can_generate() {
            return None;
        }
        self.in_flight = true;
        self.error = None;
        self.shader = None;
        Some(self.description.clone())
    }

    /// Store the result of the request started by [`begin_request`](Self::begin_request).
    pub fn finish_request(&mut self, result: Result<GeneratedShader, ServiceError>) {
        self.in_flight = false;
        match result {
            Ok(shader) => self.shader = Some(shader),
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    /// Show a failure raised while drawing the current shader.
    pub fn report_render_error(&mut self, error: &RenderError) {
        self.error = Some(error.to_string());
    }

    /// Draw the current shader onto `surface`, reporting any failure in the error slot.
    pub fn render_into<S: RenderSurface>(
        &mut self,
        renderer: &ShaderRenderer,
        surface: &S,
    ) -> Option<RenderReport> {
        let shader = self.shader.as_ref()?;
        match renderer.render(surface, &shader.program) {
            Ok(report) => Some(report),
            Err(e) => {
                self.report_render_error(&e);
                None
            }
        }
    }

    /// The raw reply of the current shader, pretty-printed.
    pub fn raw_json_pretty(&self) -> Option<String> {
        self.shader.as_ref().map(GeneratedShader::pretty_json)
    }
}

/// Send the panel's description to `service` and store the outcome in the panel.
///
/// No borrow of the panel is held across the request.
pub async fn generate_shader<T: ShaderTransport>(
    panel: Weak<RefCell<ShaderPanel>>,
    service: &ShaderService<T>,
) -> RequestOutcome {
    let Some(mounted) = panel.upgrade() else {
        return RequestOutcome::Rejected;
    };
    let description = mounted.borrow_mut().begin_request();
    drop(mounted);
    let Some(description) = description else {
        return RequestOutcome::Rejected;
    };

    let result = service.generate(&description).await;

    let Some(panel) = panel.upgrade() else {
        log::debug!("shader panel unmounted before the request finished");
        return RequestOutcome::Discarded;
    };
    let outcome = if result.is_ok() {
        RequestOutcome::Succeeded
    } else {
        RequestOutcome::Failed
    };
    panel.borrow_mut().finish_request(result);
    outcome
}
