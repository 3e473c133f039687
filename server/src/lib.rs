//! # Histmux Server
//! The static, request-scoped flavor of the multiplexed history service:
//! per-consumer [`ServerHistory`] adapters over an in-memory root history
//! that is created lazily from the incoming request's URL, and a
//! [`HistoryService`] registry handing out one adapter per consumer.
//!
//! There is no external navigation source on the server, so adapters never
//! observe POP events; pushes and replaces still multiplex onto the shared
//! root location exactly as in the browser flavor, so the final root
//! location can be rendered into the response.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

pub mod shared {
    pub use histmux_shared::{
        Action, ConsumerId, ConsumerPathsTransformer, Diagnostic, DiagnosticsSink,
        InMemoryRootHistory, Location, LocationKey, LogDiagnostics, MemoryHistory, RegistryError,
        RootHistory, RootLocationOptions, RootLocationTransformer, Unregister,
    };
}

mod error;
mod server_history;
mod server_request;
mod service;

pub use error::ServerHistoryError;
pub use server_history::ServerHistory;
pub use server_request::ServerRequest;
pub use service::HistoryService;
