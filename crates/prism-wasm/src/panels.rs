//! The tab shell exported to JavaScript.

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{future_to_promise, spawn_local};

use prism_calc::Calculator;
use prism_service::{ReqwestTransport, ServiceConfig, ShaderService};
use prism_ui::{generate_shader, load_evaluator, App, RequestOutcome, Tab};

use crate::canvas::ShaderCanvas;
use crate::types::{RenderReportJs, ServiceConfigJs, ShaderPanelViewJs};

/// Calculator and text-to-shader tabs.
#[wasm_bindgen]
pub struct PrismApp {
    app: App<Calculator>,
    service: Rc<ShaderService<ReqwestTransport>>,
}

#[wasm_bindgen]
impl PrismApp {
    /// Create the app on the calculator tab. `config` is an optional
    /// `{ baseUrl, path }` object.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<PrismApp, JsError> {
        let config = if config.is_undefined() || config.is_null() {
            ServiceConfig::default()
        } else {
            serde_wasm_bindgen::from_value::<ServiceConfigJs>(config)
                .map_err(|e| JsError::new(&format!("Invalid service config: {}", e)))?
                .into_core()
        };
        log::debug!("shader service endpoint: {}", config.endpoint());

        let app = PrismApp {
            app: App::new(),
            service: Rc::new(ShaderService::new(config, ReqwestTransport::new())),
        };
        app.load_calculator();
        Ok(app)
    }

    /// Id of the active tab: `"calculator"` or `"shader"`.
    #[wasm_bindgen(getter, js_name = activeTab)]
    pub fn active_tab(&self) -> String {
        self.app.active_tab().id().to_string()
    }

    /// Switch tabs. Returns `false` if the tab was already active.
    #[wasm_bindgen(js_name = switchTab)]
    pub fn switch_tab(&mut self, id: &str) -> Result<bool, JsError> {
        let tab = Tab::from_id(id).ok_or_else(|| JsError::new(&format!("Unknown tab: {}", id)))?;
        let switched = self.app.switch_to(tab);
        if switched && tab == Tab::Calculator {
            self.load_calculator();
        }
        Ok(switched)
    }

    #[wasm_bindgen(js_name = setExpression)]
    pub fn set_expression(&self, expression: &str) -> Result<(), JsError> {
        let panel = self.app.calculator().ok_or_else(calculator_inactive)?;
        panel.borrow_mut().set_expression(expression);
        Ok(())
    }

    /// Evaluate the current expression and return the text shown as the result.
    pub fn calculate(&self) -> Result<String, JsError> {
        let panel = self.app.calculator().ok_or_else(calculator_inactive)?;
        let mut panel = panel.borrow_mut();
        if let Err(e) = panel.calculate() {
            log::debug!("calculate: {}", e);
        }
        Ok(panel.result().to_string())
    }

    #[wasm_bindgen(getter, js_name = calculatorLoaded)]
    pub fn calculator_loaded(&self) -> bool {
        self.app
            .calculator()
            .map_or(false, |panel| panel.borrow().is_loaded())
    }

    /// `{ expression, result }` of the calculator, saved or live.
    #[wasm_bindgen(js_name = calculatorState)]
    pub fn calculator_state(&self) -> Result<JsValue, JsError> {
        serde_wasm_bindgen::to_value(&self.app.calculator_state())
            .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
    }

    #[wasm_bindgen(js_name = setDescription)]
    pub fn set_description(&self, description: &str) -> Result<(), JsError> {
        let panel = self.app.shader_panel().ok_or_else(shader_inactive)?;
        panel.borrow_mut().set_description(description);
        Ok(())
    }

    /// Snapshot of the shader panel for display.
    #[wasm_bindgen(js_name = shaderView)]
    pub fn shader_view(&self) -> Result<JsValue, JsError> {
        let panel = self.app.shader_panel().ok_or_else(shader_inactive)?;
        let view = ShaderPanelViewJs::from(&*panel.borrow());
        serde_wasm_bindgen::to_value(&view)
            .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
    }

    /// Request a shader for the current description.
    ///
    /// Resolves to `"rejected"`, `"succeeded"`, `"failed"`, or `"discarded"`.
    #[wasm_bindgen(js_name = generateShader)]
    pub fn request_shader(&self) -> Result<js_sys::Promise, JsError> {
        let panel = self.app.shader_panel().ok_or_else(shader_inactive)?;
        let panel = Rc::downgrade(&panel);
        let service = Rc::clone(&self.service);

        Ok(future_to_promise(async move {
            let outcome = generate_shader(panel, &service).await;
            Ok(JsValue::from_str(outcome_label(&outcome)))
        }))
    }

    /// Draw the current shader onto `canvas`.
    ///
    /// Returns the render report, or `null` when there is nothing to draw or the
    /// render failed (the failure then shows up in `shaderView().error`).
    #[wasm_bindgen(js_name = renderShader)]
    pub fn render_shader(&self, canvas: &ShaderCanvas) -> Result<JsValue, JsError> {
        let panel = self.app.shader_panel().ok_or_else(shader_inactive)?;
        let report = panel
            .borrow_mut()
            .render_into(canvas.renderer(), canvas.surface());

        match report {
            Some(report) => serde_wasm_bindgen::to_value(&RenderReportJs::from(&report))
                .map_err(|e| JsError::new(&format!("Serialization error: {}", e))),
            None => Ok(JsValue::NULL),
        }
    }
}

impl PrismApp {
    fn load_calculator(&self) {
        let Some(panel) = self.app.calculator() else {
            return;
        };
        let panel = Rc::downgrade(&panel);
        spawn_local(async move {
            load_evaluator(panel, async { Ok(Calculator::new()) }).await;
        });
    }
}

fn outcome_label(outcome: &RequestOutcome) -> &'static str {
    match outcome {
        RequestOutcome::Rejected => "rejected",
        RequestOutcome::Succeeded => "succeeded",
        RequestOutcome::Failed => "failed",
        RequestOutcome::Discarded => "discarded",
    }
}

fn calculator_inactive() -> JsError {
    JsError::new("Calculator tab is not active")
}

fn shader_inactive() -> JsError {
    JsError::new("Shader tab is not active")
}
