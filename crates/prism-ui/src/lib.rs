//! UI state holders for the Prism demos.
//!
//! Each panel is a plain struct owned through `Rc<RefCell<_>>` by whatever hosts it.
//! The async handlers ([`load_evaluator`], [`generate_shader`]) take a `Weak`
//! handle and re-upgrade it after every await, so a panel that was unmounted in
//! the meantime is simply left alone.

pub mod app;
pub mod calculator;
pub mod shader_panel;

pub use app::{App, Tab};
pub use calculator::{format_number, load_evaluator, CalculatorPanel, LoadOutcome};
pub use shader_panel::{
    generate_shader, RequestOutcome, ShaderPanel, GENERATE_LABEL, GENERATING_LABEL,
};
