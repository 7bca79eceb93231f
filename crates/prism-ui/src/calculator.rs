//! Calculator panel.

use std::cell::{OnceCell, RefCell};
use std::future::Future;
use std::rc::Weak;

use prism_core::{CalculatorError, CalculatorState, ExpressionEvaluator};

/// Render a number the way a browser prints a JS number.
///
/// Integers print without a fractional part, exponents appear outside
/// `1e-7 < |v| < 1e21` with an explicit sign, and non-finite values print as
/// `NaN`, `Infinity`, `-Infinity`.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let scientific = format!("{:e}", value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => return value.to_string(),
    };

    if (-6..21).contains(&exponent) {
        value.to_string()
    } else if exponent < 0 {
        format!("{}e{}", mantissa, exponent)
    } else {
        format!("{}e+{}", mantissa, exponent)
    }
}

/// How an evaluator load ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Installed,
    /// An evaluator was already present; the new one was dropped.
    AlreadyLoaded,
    /// The panel was unmounted before the load finished.
    Discarded,
    Failed(String),
}

/// Expression input, last result, and the evaluator once it has loaded.
#[derive(Debug)]
pub struct CalculatorPanel<E> {
    evaluator: OnceCell<E>,
    state: CalculatorState,
}

impl<E> Default for CalculatorPanel<E> {
    fn default() -> Self {
        Self::restore(CalculatorState::default())
    }
}

impl<E> CalculatorPanel<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount a panel showing a previously saved state. The evaluator is not carried over.
    pub fn restore(state: CalculatorState) -> Self {
        Self {
            evaluator: OnceCell::new(),
            state,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.evaluator.get().is_some()
    }

    /// Install the evaluator. Returns `false` if one was already installed.
    pub fn install(&self, evaluator: E) -> bool {
        self.evaluator.set(evaluator).is_ok()
    }

    pub fn expression(&self) -> &str {
        &self.state.expression
    }

    pub fn set_expression(&mut self, expression: impl Into<String>) {
        self.state.expression = expression.into();
    }

    /// Text in the result slot: a number or an error message.
    pub fn result(&self) -> &str {
        &self.state.result
    }

    pub fn snapshot(&self) -> CalculatorState {
        self.state.clone()
    }
}

impl<E: ExpressionEvaluator> CalculatorPanel<E> {
    /// Evaluate the current expression and store the outcome in the result slot.
    pub fn calculate(&mut self) -> Result<f64, CalculatorError> {
        let outcome = match self.evaluator.get() {
            Some(evaluator) => evaluator
                .evaluate(&self.state.expression)
                .map_err(CalculatorError::from),
            None => Err(CalculatorError::ModuleNotReady),
        };

        self.state.result = match &outcome {
            Ok(value) => format_number(*value),
            Err(e) => {
                log::debug!("calculation of {:?} failed: {:?}", self.state.expression, e);
                e.to_string()
            }
        };
        outcome
    }
}

/// Await `loader` and install its evaluator into `panel` if the panel still exists.
pub async fn load_evaluator<E, F>(panel: Weak<RefCell<CalculatorPanel<E>>>, loader: F) -> LoadOutcome
where
    F: Future<Output = Result<E, String>>,
{
    let loaded = loader.await;

    let Some(panel) = panel.upgrade() else {
        log::debug!("calculator unmounted before the evaluator loaded");
        return LoadOutcome::Discarded;
    };

    match loaded {
        Ok(evaluator) => {
            if panel.borrow().install(evaluator) {
                log::debug!("evaluator loaded");
                LoadOutcome::Installed
            } else {
                LoadOutcome::AlreadyLoaded
            }
        }
        Err(reason) => {
            log::error!("failed to load evaluator: {}", reason);
            LoadOutcome::Failed(reason)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_calc::Calculator;
    use prism_core::{EvalError, INVALID_EXPRESSION_MESSAGE, MODULE_NOT_LOADED_MESSAGE};
    use std::rc::Rc;

    fn loaded() -> CalculatorPanel<Calculator> {
        let panel = CalculatorPanel::new();
        assert!(panel.install(Calculator::new()));
        panel
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(4.0), "4");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(-12.25), "-12.25");
        assert_eq!(format_number(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(1e20), "100000000000000000000");
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(1.5e-7), "1.5e-7");
        assert_eq!(format_number(0.000001), "0.000001");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(format_number(f64::NAN), "NaN");
    }

    #[test]
    fn test_calculate_before_load() {
        let mut panel = CalculatorPanel::<Calculator>::new();
        for expr in ["2+2", "", "(("] {
            panel.set_expression(expr);
            assert_eq!(panel.calculate(), Err(CalculatorError::ModuleNotReady));
            assert_eq!(panel.result(), MODULE_NOT_LOADED_MESSAGE);
        }
    }

    #[test]
    fn test_calculate_after_load() {
        let mut panel = loaded();
        panel.set_expression("2 + 2");
        assert_eq!(panel.calculate(), Ok(4.0));
        assert_eq!(panel.result(), "4");

        panel.set_expression("1 / 0");
        panel.calculate().unwrap();
        assert_eq!(panel.result(), "Infinity");
    }

    #[test]
    fn test_invalid_expression_message() {
        let mut panel = loaded();
        panel.set_expression("2 +* 3");
        assert!(matches!(panel.calculate(), Err(CalculatorError::Evaluation(EvalError::Syntax { .. }))));
        assert_eq!(panel.result(), INVALID_EXPRESSION_MESSAGE);
    }

    #[test]
    fn test_second_install_ignored() {
        let panel = loaded();
        assert!(!panel.install(Calculator::new()));
        assert!(panel.is_loaded());
    }

    #[test]
    fn test_restore_keeps_state_but_not_evaluator() {
        let mut panel = loaded();
        panel.set_expression("3 * 3");
        panel.calculate().unwrap();

        let restored = CalculatorPanel::<Calculator>::restore(panel.snapshot());
        assert_eq!(restored.expression(), "3 * 3");
        assert_eq!(restored.result(), "9");
        assert!(!restored.is_loaded());
    }

    #[test]
    fn test_load_installs() {
        let panel = Rc::new(RefCell::new(CalculatorPanel::new()));
        let outcome = pollster::block_on(load_evaluator(Rc::downgrade(&panel), async {
            Ok(Calculator::new())
        }));
        assert_eq!(outcome, LoadOutcome::Installed);

        panel.borrow_mut().set_expression("sqrt(16)");
        assert_eq!(panel.borrow_mut().calculate(), Ok(4.0));
    }

    #[test]
    fn test_load_after_unmount_discarded() {
        let panel = Rc::new(RefCell::new(CalculatorPanel::<Calculator>::new()));
        let weak = Rc::downgrade(&panel);
        drop(panel);

        let outcome = pollster::block_on(load_evaluator(weak, async { Ok(Calculator::new()) }));
        assert_eq!(outcome, LoadOutcome::Discarded);
    }

    #[test]
    fn test_failed_load_leaves_panel_unloaded() {
        let panel = Rc::new(RefCell::new(CalculatorPanel::<Calculator>::new()));
        let outcome = pollster::block_on(load_evaluator(Rc::downgrade(&panel), async {
            Err::<Calculator, _>("fetch failed".to_string())
        }));
        assert_eq!(outcome, LoadOutcome::Failed("fetch failed".into()));

        let mut panel = panel.borrow_mut();
        panel.set_expression("1");
        assert_eq!(panel.calculate(), Err(CalculatorError::ModuleNotReady));
    }

    #[test]
    fn test_second_load_already_loaded() {
        let panel = Rc::new(RefCell::new(loaded()));
        let outcome = pollster::block_on(load_evaluator(Rc::downgrade(&panel), async {
            Ok(Calculator::new())
        }));
        assert_eq!(outcome, LoadOutcome::AlreadyLoaded);
    }
}
