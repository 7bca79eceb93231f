//! Tab shell hosting the two panels.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use prism_core::CalculatorState;

use crate::calculator::CalculatorPanel;
use crate::shader_panel::ShaderPanel;

/// The two demo tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Calculator,
    Shader,
}

impl Tab {
    pub const ALL: [Tab; 2] = [Tab::Calculator, Tab::Shader];

    pub fn id(self) -> &'static str {
        match self {
            Tab::Calculator => "calculator",
            Tab::Shader => "shader",
        }
    }

    pub fn from_id(id: &str) -> Option<Tab> {
        Tab::ALL.into_iter().find(|t| t.id() == id)
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Owns whichever panel is mounted and the calculator state saved across switches.
///
/// Only the active tab's panel is mounted; switching drops the other one, which
/// also ends any async work still holding a weak handle to it.
#[derive(Debug)]
pub struct App<E> {
    active: Tab,
    saved_calculator: CalculatorState,
    calculator: Option<Rc<RefCell<CalculatorPanel<E>>>>,
    shader: Option<Rc<RefCell<ShaderPanel>>>,
}

impl<E> Default for App<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> App<E> {
    /// Start on the calculator tab with an empty calculator.
    pub fn new() -> Self {
        Self {
            active: Tab::Calculator,
            saved_calculator: CalculatorState::default(),
            calculator: Some(Rc::new(RefCell::new(CalculatorPanel::new()))),
            shader: None,
        }
    }

    pub fn active_tab(&self) -> Tab {
        self.active
    }

    /// The mounted calculator panel, if the calculator tab is active.
    pub fn calculator(&self) -> Option<Rc<RefCell<CalculatorPanel<E>>>> {
        self.calculator.clone()
    }

    /// The mounted shader panel, if the shader tab is active.
    pub fn shader_panel(&self) -> Option<Rc<RefCell<ShaderPanel>>> {
        self.shader.clone()
    }

    /// Calculator state as last saved or as currently shown.
    pub fn calculator_state(&self) -> CalculatorState {
        match &self.calculator {
            Some(panel) => panel.borrow().snapshot(),
            None => self.saved_calculator.clone(),
        }
    }

    /// Make `tab` active. Returns `false` if it already was.
    ///
    /// A freshly mounted calculator has no evaluator; the host is expected to start
    /// a load for it.
    pub fn switch_to(&mut self, tab: Tab) -> bool {
        if tab == self.active {
            return false;
        }

        if let Some(panel) = self.calculator.take() {
            self.saved_calculator = panel.borrow().snapshot();
        }
        self.shader = None;

        match tab {
            Tab::Calculator => {
                let panel = CalculatorPanel::restore(self.saved_calculator.clone());
                self.calculator = Some(Rc::new(RefCell::new(panel)));
            }
            Tab::Shader => {
                self.shader = Some(Rc::new(RefCell::new(ShaderPanel::new())));
            }
        }

        log::debug!("switched to {} tab", tab);
        self.active = tab;
        true
    }
}
