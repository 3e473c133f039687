//! # Histmux Browser
//! The live/navigable flavor of the multiplexed history service: per-consumer
//! [`BrowserHistory`] adapters over a shared root history that reports
//! externally-originated navigations (back/forward) as POP events, and a
//! [`HistoryService`] registry handing out one adapter per consumer.
//!
//! On every POP the adapter correlates the new root location back to its
//! own private stack via the stamped root key, and replays the change as a
//! native back/forward step for this consumer alone.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

pub mod shared {
    pub use histmux_shared::{
        Action, ConsumerId, ConsumerPathsTransformer, Diagnostic, DiagnosticsSink,
        InMemoryRootHistory, Location, LocationKey, LogDiagnostics, MemoryHistory, RegistryError,
        RootHistory, RootLocationOptions, RootLocationTransformer, Unregister,
    };
}

mod browser_history;
mod service;

pub use browser_history::BrowserHistory;
pub use service::HistoryService;
