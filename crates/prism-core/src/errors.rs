//! Error types for the Prism demos.
//!
//! Every failure is terminal for the operation that raised it and is shown to the
//! user as inline text, so the `Display` strings here are user-facing.

use thiserror::Error;

/// Shown when the evaluator rejects an expression.
pub const INVALID_EXPRESSION_MESSAGE: &str = "Not a valid expression to calculate.";
/// Shown when the calculator is used before its module has loaded.
pub const MODULE_NOT_LOADED_MESSAGE: &str = "Error: WASM module not loaded yet.";
/// Fallback for a non-success response without an `error` field.
pub const SHADER_REQUEST_FAILED_MESSAGE: &str = "Failed to generate shader.";
/// Fallback for transport failures with no message.
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred.";

/// Top-level error type for the Prism crates.
#[derive(Debug, Error)]
pub enum PrismError {
    #[error(transparent)]
    Eval(#[from] EvalError),

    #[error(transparent)]
    Calculator(#[from] CalculatorError),

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Errors raised by the expression evaluator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("Empty expression")]
    Empty,

    #[error("Unexpected input at offset {offset}: {found:?}")]
    Syntax { offset: usize, found: String },

    #[error("Unknown variable: {name}")]
    UnknownVariable { name: String },

    #[error("Unknown function: {name}")]
    UnknownFunction { name: String },

    #[error("Function {name} expects {expected} argument(s), got {got}")]
    ArgumentCount {
        name: String,
        expected: String,
        got: usize,
    },

    #[error("Expression is nested more than {limit} levels deep")]
    TooDeep { limit: usize },
}

/// Errors raised by the calculator panel.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalculatorError {
    #[error("{}", MODULE_NOT_LOADED_MESSAGE)]
    ModuleNotReady,

    #[error("{}", INVALID_EXPRESSION_MESSAGE)]
    Evaluation(#[from] EvalError),
}

/// Errors raised while requesting a shader from the generation service.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ServiceError {
    /// The request never produced a response, or the body could not be decoded.
    #[error("{}", non_empty_or(.0, UNEXPECTED_ERROR_MESSAGE))]
    Transport(String),

    /// The service answered with a non-success status.
    #[error("{}", .message.as_deref().unwrap_or(SHADER_REQUEST_FAILED_MESSAGE))]
    Service { status: u16, message: Option<String> },

    /// The service succeeded but omitted a mandatory field.
    #[error("Incomplete shader data received from the backend.")]
    PayloadIncomplete,
}

/// Errors raised while rendering a shader program.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    #[error("WebGL is not supported in this browser.")]
    GraphicsUnsupported,

    #[error("Shader data is incomplete.")]
    ShaderDataIncomplete,

    /// The info log is kept for diagnostics but not shown to the user.
    #[error("Shader compilation failed.")]
    CompileFailed { stage: ShaderStage, log: String },

    #[error("Program linking failed: {log}")]
    LinkFailed { log: String },

    /// The backend could not allocate a GL object.
    #[error("Graphics backend error: {reason}")]
    Backend { reason: String },
}

/// The two programmable pipeline stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub fn label(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "VERTEX",
            ShaderStage::Fragment => "FRAGMENT",
        }
    }
}

fn non_empty_or<'a>(message: &'a str, fallback: &'a str) -> &'a str {
    if message.trim().is_empty() {
        fallback
    } else {
        message
    }
}
