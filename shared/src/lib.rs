//! # Histmux Shared
//! Common functionality shared between the histmux-browser & histmux-server
//! crates: the location model, the consumer-paths codec, the root-location
//! transformer, the in-memory navigation stack, and the per-consumer
//! history adapter core.
//!
//! Multiple independent consumers each see and control a private
//! navigation history while all of them share exactly one underlying root
//! location. Non-primary consumers' paths are multiplexed through a single
//! reserved query parameter; an optional primary consumer occupies the
//! root pathname and search directly.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

mod consumer;
pub mod consumer_paths;
mod diagnostics;
mod key_generator;
mod location;
mod memory;
mod registry;
mod root_history;
mod root_location;
mod search_params;
mod unregister;

pub use consumer::ConsumerHistoryCore;
pub use diagnostics::{Diagnostic, DiagnosticsSink, LogDiagnostics};
pub use key_generator::KeyGenerator;
pub use location::{Action, ConsumerId, Location, LocationKey};
pub use memory::{LocationListener, MemoryHistory, MemoryHistoryError, TransitionHook};
pub use registry::{ConsumerRegistry, RegistryError};
pub use root_history::{InMemoryRootHistory, RootHistory};
pub use root_location::{ConsumerPathsTransformer, RootLocationOptions, RootLocationTransformer};
pub use search_params::SearchParams;
pub use unregister::Unregister;
