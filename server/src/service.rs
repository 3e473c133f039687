use std::cell::RefCell;
use std::rc::Rc;

use log::debug;

use histmux_shared::{
    ConsumerHistoryCore, ConsumerId, ConsumerPathsTransformer, ConsumerRegistry, DiagnosticsSink,
    InMemoryRootHistory, Location, LogDiagnostics, RootHistory, RootLocationOptions,
    RootLocationTransformer,
};

use crate::error::ServerHistoryError;
use crate::server_history::ServerHistory;
use crate::server_request::ServerRequest;

/// Hands out at most one [`ServerHistory`] per consumer for one
/// server-rendered request.
///
/// The root history is created lazily from the request's URL on the first
/// adapter creation, so a service constructed without a request (e.g.
/// during a build step) is fine as long as no consumer ever asks for a
/// history.
pub struct HistoryService {
    server_request: Option<ServerRequest>,
    transformer: Rc<dyn RootLocationTransformer>,
    diagnostics: Rc<dyn DiagnosticsSink>,
    registry: ConsumerRegistry,
    root_history: RefCell<Option<Rc<InMemoryRootHistory>>>,
}

impl HistoryService {
    pub fn new(options: RootLocationOptions, server_request: Option<ServerRequest>) -> Self {
        Self::with_collaborators(
            server_request,
            Rc::new(ConsumerPathsTransformer::new(options)),
            Rc::new(LogDiagnostics),
        )
    }

    /// Like [`new`](Self::new), but with a caller-provided location
    /// transformer and diagnostics sink.
    pub fn with_collaborators(
        server_request: Option<ServerRequest>,
        transformer: Rc<dyn RootLocationTransformer>,
        diagnostics: Rc<dyn DiagnosticsSink>,
    ) -> Self {
        Self {
            server_request,
            transformer,
            diagnostics,
            registry: ConsumerRegistry::new(),
            root_history: RefCell::new(None),
        }
    }

    /// The root location with all consumer paths encoded, ready to be
    /// rendered into the response. `None` until the first adapter has been
    /// created.
    pub fn root_location(&self) -> Option<Location> {
        self.root_history
            .borrow()
            .as_ref()
            .map(|root| root.location())
    }

    /// Creates the consumer's history adapter, seeded from the request
    /// URL. Fails without a server request, or while the consumer already
    /// owns a live adapter.
    pub fn create_server_history(
        &self,
        consumer_id: impl Into<ConsumerId>,
    ) -> Result<ServerHistory, ServerHistoryError> {
        let root_history = self.root_history()?;
        let consumer_id = consumer_id.into();

        self.registry.bind(&consumer_id)?;

        let core = ConsumerHistoryCore::new(
            consumer_id.clone(),
            root_history,
            Rc::clone(&self.transformer),
            Rc::clone(&self.diagnostics),
        );

        core.record_teardown(self.registry.unbinder(consumer_id));

        Ok(ServerHistory::new(core))
    }

    fn root_history(&self) -> Result<Rc<dyn RootHistory>, ServerHistoryError> {
        let mut slot = self.root_history.borrow_mut();

        if let Some(root) = slot.as_ref() {
            return Ok(Rc::clone(root) as Rc<dyn RootHistory>);
        }

        let request = self
            .server_request
            .as_ref()
            .ok_or(ServerHistoryError::MissingServerRequest)?;

        debug!("creating root history from server request path {:?}", request.path);

        let root = Rc::new(InMemoryRootHistory::new(Location::from_path(&request.path)));
        *slot = Some(Rc::clone(&root));

        Ok(root)
    }
}
