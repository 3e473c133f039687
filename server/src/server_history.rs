use std::rc::Rc;

use histmux_shared::{Action, ConsumerHistoryCore, ConsumerId, Diagnostic, Location, Unregister};

/// A consumer's private history for one server-rendered request.
///
/// Behaves like its browser counterpart for push, replace, and blocking,
/// but has no external navigation source: nothing ever POPs, and stepping
/// (even probing with [`can_go`](Self::can_go)) is unsupported.
pub struct ServerHistory {
    core: Rc<ConsumerHistoryCore>,
}

impl ServerHistory {
    pub(crate) fn new(core: ConsumerHistoryCore) -> Self {
        Self {
            core: Rc::new(core),
        }
    }

    pub fn consumer_id(&self) -> &ConsumerId {
        self.core.consumer_id()
    }

    pub fn len(&self) -> usize {
        self.core.len()
    }

    pub fn is_empty(&self) -> bool {
        self.core.is_empty()
    }

    /// Index of the current entry in this consumer's private stack.
    pub fn index(&self) -> usize {
        self.core.stack().index()
    }

    /// All entries of this consumer's private stack, oldest first.
    pub fn entries(&self) -> Vec<Location> {
        self.core.stack().entries()
    }

    pub fn action(&self) -> Action {
        self.core.action()
    }

    pub fn location(&self) -> Location {
        self.core.location()
    }

    pub fn push(&self, to: impl Into<Location>) {
        self.core.push(to);
    }

    pub fn replace(&self, to: impl Into<Location>) {
        self.core.replace(to);
    }

    /// Unsupported; warns and changes nothing.
    pub fn go(&self, delta: isize) {
        self.core.go(delta);
    }

    /// Unsupported; warns and changes nothing.
    pub fn go_back(&self) {
        self.core.go_back();
    }

    /// Unsupported; warns and changes nothing.
    pub fn go_forward(&self) {
        self.core.go_forward();
    }

    /// Unsupported on the server; warns and reports `false`.
    pub fn can_go(&self, _delta: isize) -> bool {
        self.core.diagnostics().emit(Diagnostic::UnsupportedOperation {
            consumer_id: self.core.consumer_id().clone(),
            operation: "memoryHistory.canGo()",
        });

        false
    }

    pub fn block(&self, hook: impl FnMut(&Location, Action) -> bool + 'static) -> Unregister {
        self.core.block(hook)
    }

    /// Registers a listener for this consumer's own transitions. The
    /// returned unregister is also run by [`destroy`](Self::destroy).
    pub fn listen(&self, listener: impl FnMut(&Location, Action) + 'static) -> Unregister {
        let unregister = self.core.stack().listen(listener);
        self.core.record_teardown(unregister.clone());

        unregister
    }

    pub fn create_href(&self, location: &Location) -> String {
        self.core.create_href(location)
    }

    /// Tears down all subscriptions and removes this consumer from the
    /// root location via a replace.
    pub fn destroy(&self) {
        self.core.destroy();
    }
}
