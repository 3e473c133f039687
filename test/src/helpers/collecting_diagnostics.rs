use std::cell::RefCell;
use std::rc::Rc;

use histmux_shared::{Diagnostic, DiagnosticsSink};

/// A diagnostics sink that collects everything it is handed, so tests can
/// assert on warnings instead of scraping log output.
#[derive(Clone, Default)]
pub struct CollectingDiagnostics {
    diagnostics: Rc<RefCell<Vec<Diagnostic>>>,
}

impl CollectingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.borrow().is_empty()
    }
}

impl DiagnosticsSink for CollectingDiagnostics {
    fn emit(&self, diagnostic: Diagnostic) {
        self.diagnostics.borrow_mut().push(diagnostic);
    }
}
