use std::rc::Rc;

use log::debug;

use histmux_shared::{
    ConsumerHistoryCore, ConsumerId, ConsumerPathsTransformer, ConsumerRegistry, DiagnosticsSink,
    Location, LogDiagnostics, RegistryError, RootHistory, RootLocationOptions,
    RootLocationTransformer,
};

use crate::browser_history::BrowserHistory;

/// Hands out at most one live [`BrowserHistory`] per consumer over one
/// shared root history.
pub struct HistoryService {
    root_history: Rc<dyn RootHistory>,
    transformer: Rc<dyn RootLocationTransformer>,
    diagnostics: Rc<dyn DiagnosticsSink>,
    registry: ConsumerRegistry,
}

impl HistoryService {
    pub fn new(options: RootLocationOptions, root_history: Rc<dyn RootHistory>) -> Self {
        Self::with_collaborators(
            root_history,
            Rc::new(ConsumerPathsTransformer::new(options)),
            Rc::new(LogDiagnostics),
        )
    }

    /// Like [`new`](Self::new), but with a caller-provided location
    /// transformer and diagnostics sink.
    pub fn with_collaborators(
        root_history: Rc<dyn RootHistory>,
        transformer: Rc<dyn RootLocationTransformer>,
        diagnostics: Rc<dyn DiagnosticsSink>,
    ) -> Self {
        Self {
            root_history,
            transformer,
            diagnostics,
            registry: ConsumerRegistry::new(),
        }
    }

    /// The root history's current location, with all consumer paths still
    /// encoded.
    pub fn root_location(&self) -> Location {
        self.root_history.location()
    }

    /// Creates the consumer's history adapter, seeded from the current
    /// root location. Fails while the consumer already owns a live
    /// adapter; destroying that adapter frees the id again.
    pub fn create_browser_history(
        &self,
        consumer_id: impl Into<ConsumerId>,
    ) -> Result<BrowserHistory, RegistryError> {
        let consumer_id = consumer_id.into();

        self.registry.bind(&consumer_id)?;
        debug!("creating browser history for consumer \"{consumer_id}\"");

        let core = ConsumerHistoryCore::new(
            consumer_id.clone(),
            Rc::clone(&self.root_history),
            Rc::clone(&self.transformer),
            Rc::clone(&self.diagnostics),
        );

        core.record_teardown(self.registry.unbinder(consumer_id));

        Ok(BrowserHistory::new(core))
    }
}
