use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::diagnostics::{Diagnostic, DiagnosticsSink};
use crate::location::{Action, ConsumerId, Location, LocationKey};
use crate::memory::MemoryHistory;
use crate::root_history::RootHistory;
use crate::root_location::RootLocationTransformer;
use crate::unregister::Unregister;

/// The per-consumer history adapter core, shared by both shared-location
/// flavors.
///
/// Owns the consumer's private navigation stack, mirrors every local push
/// and replace onto the root history through the transformer, and stamps
/// each private entry with the root key assigned to the root transition
/// committed in lock-step with it.
///
/// The ordering inside [`push`](Self::push)/[`replace`](Self::replace) is
/// load-bearing: the root history commits first, because the correlation
/// key for the private entry only exists once the root has assigned one.
pub struct ConsumerHistoryCore {
    consumer_id: ConsumerId,
    root_history: Rc<dyn RootHistory>,
    transformer: Rc<dyn RootLocationTransformer>,
    diagnostics: Rc<dyn DiagnosticsSink>,
    consumer_history: MemoryHistory<Option<LocationKey>>,
    teardown: RefCell<Vec<Unregister>>,
    destroyed: Cell<bool>,
}

impl ConsumerHistoryCore {
    /// Seeds the private stack from whatever path the root location
    /// currently encodes for this consumer, or a default `/` entry.
    pub fn new(
        consumer_id: ConsumerId,
        root_history: Rc<dyn RootHistory>,
        transformer: Rc<dyn RootLocationTransformer>,
        diagnostics: Rc<dyn DiagnosticsSink>,
    ) -> Self {
        let root_location = root_history.location();

        let initial = transformer
            .consumer_path_from_root_location(&root_location, &consumer_id)
            .map(|path| Location::from_path(&path))
            .unwrap_or_default();

        // The initial entry correlates with the root location as it is now.
        let consumer_history = MemoryHistory::new(initial, root_location.key);

        Self {
            consumer_id,
            root_history,
            transformer,
            diagnostics,
            consumer_history,
            teardown: RefCell::new(Vec::new()),
            destroyed: Cell::new(false),
        }
    }

    pub fn consumer_id(&self) -> &ConsumerId {
        &self.consumer_id
    }

    pub fn len(&self) -> usize {
        self.consumer_history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.consumer_history.is_empty()
    }

    pub fn action(&self) -> Action {
        self.consumer_history.action()
    }

    pub fn location(&self) -> Location {
        self.consumer_history.location()
    }

    pub fn push(&self, to: impl Into<Location>) {
        self.persist(to.into(), Action::Push);
    }

    pub fn replace(&self, to: impl Into<Location>) {
        self.persist(to.into(), Action::Replace);
    }

    /// Unsupported: a numeric delta on the root history can not be mapped
    /// to a safe, consumer-scoped delta. Warns and changes nothing.
    pub fn go(&self, _delta: isize) {
        self.unsupported("history.go()");
    }

    pub fn go_back(&self) {
        self.unsupported("history.goBack()");
    }

    pub fn go_forward(&self) {
        self.unsupported("history.goForward()");
    }

    /// Installs a transition hook on the private stack. A pending
    /// transition only ever concerns this consumer; a veto leaves both the
    /// private stack and the root location untouched.
    pub fn block(&self, hook: impl FnMut(&Location, Action) -> bool + 'static) -> Unregister {
        self.consumer_history.block(hook)
    }

    /// Renders the root location that would result from navigating this
    /// consumer to the given location, without committing anything.
    pub fn create_href(&self, location: &Location) -> String {
        self.root_history
            .create_href(&self.create_root_location(Some(location)))
    }

    /// Runs all recorded teardown callbacks, then erases this consumer
    /// from the root location via a replace, leaving the root history
    /// length untouched. Idempotent.
    pub fn destroy(&self) {
        if self.destroyed.replace(true) {
            return;
        }

        let callbacks: Vec<Unregister> = self.teardown.borrow_mut().drain(..).collect();

        for unregister in callbacks {
            unregister.call();
        }

        self.root_history.replace(self.create_root_location(None));
    }

    /// Records an unregister callback to be run by [`destroy`](Self::destroy).
    pub fn record_teardown(&self, unregister: Unregister) {
        self.teardown.borrow_mut().push(unregister);
    }

    /// Handle to the private stack, for flavor-specific listening and POP
    /// correlation.
    pub fn stack(&self) -> &MemoryHistory<Option<LocationKey>> {
        &self.consumer_history
    }

    pub fn root_history(&self) -> &Rc<dyn RootHistory> {
        &self.root_history
    }

    pub fn transformer(&self) -> &Rc<dyn RootLocationTransformer> {
        &self.transformer
    }

    pub fn diagnostics(&self) -> &Rc<dyn DiagnosticsSink> {
        &self.diagnostics
    }

    fn persist(&self, consumer_location: Location, action: Action) {
        // Consult this consumer's transition hook before anything commits:
        // a vetoed transition must leave the root location untouched too.
        if !self.consumer_history.confirm(&consumer_location, action) {
            return;
        }

        let root_location = self.create_root_location(Some(&consumer_location));

        // Root first: the correlation key is only known after the root
        // commit has assigned it.
        match action {
            Action::Push => self.root_history.push(root_location),
            Action::Replace => self.root_history.replace(root_location),
            Action::Pop => return,
        }

        let key = self.root_history.location().key;

        match action {
            Action::Push => self.consumer_history.commit_push(consumer_location, key),
            Action::Replace => self.consumer_history.commit_replace(consumer_location, key),
            Action::Pop => {}
        }
    }

    fn create_root_location(&self, consumer_location: Option<&Location>) -> Location {
        self.transformer.create_root_location(
            consumer_location,
            &self.root_history.location(),
            &self.consumer_id,
        )
    }

    fn unsupported(&self, operation: &'static str) {
        self.diagnostics.emit(Diagnostic::UnsupportedOperation {
            consumer_id: self.consumer_id.clone(),
            operation,
        });
    }
}
