//! WebAssembly bindings for the Prism demos.
//!
//! This crate exposes the calculator evaluator, the shader canvas, and the tab
//! shell to JavaScript.
//!
//! ## Example
//!
//! ```js
//! import init, { PrismApp, ShaderCanvas, evaluate_expression } from 'prism-wasm';
//!
//! await init();
//! evaluate_expression('2 + 2'); // 4
//!
//! const app = new PrismApp({ baseUrl: 'http://localhost:5000' });
//! app.switchTab('shader');
//! app.setDescription('a red triangle');
//! await app.generateShader();
//!
//! const canvas = ShaderCanvas.create();
//! document.body.appendChild(canvas.element);
//! app.renderShader(canvas);
//! ```

use wasm_bindgen::prelude::*;

mod canvas;
mod logging;
mod panels;
mod types;

pub use canvas::*;
pub use logging::*;
pub use panels::*;
pub use types::*;

/// Install the panic hook and the console logger.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(debug_assertions)]
    console_error_panic_hook::set_once();

    init_logging(LoggingConfig::default());
}

/// Evaluate an arithmetic expression, throwing on invalid input.
#[wasm_bindgen]
pub fn evaluate_expression(expression: &str) -> Result<f64, JsError> {
    prism_calc::evaluate_expression(expression).map_err(|e| JsError::new(&e.to_string()))
}

/// Get the version of the bindings.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
