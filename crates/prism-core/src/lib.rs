//! Core types, errors, and pure helpers shared by the Prism crates.
//!
//! This crate provides the foundational pieces used by every other crate:
//! - The shader program description received from the generation service
//! - Draw modes and the calculator state carried across tab switches
//! - Mesh sanitization (vertex padding, index filtering) and shader source cleanup
//! - Error types for every failing operation

pub mod errors;
pub mod mesh;
pub mod source;
pub mod types;

pub use errors::*;
pub use mesh::{filter_indices, pad_vertices, Mesh};
pub use source::strip_version_directives;
pub use types::*;

/// A pure function from expression text to a number.
///
/// Implemented by the calculator crate; the UI layer only sees this trait so that
/// tests can substitute a scripted evaluator.
pub trait ExpressionEvaluator {
    /// Evaluate `expression`, failing if it is not a valid arithmetic expression.
    fn evaluate(&self, expression: &str) -> Result<f64, EvalError>;
}

impl<E: ExpressionEvaluator + ?Sized> ExpressionEvaluator for &E {
    fn evaluate(&self, expression: &str) -> Result<f64, EvalError> {
        (**self).evaluate(expression)
    }
}
