use log::warn;

use crate::location::{ConsumerId, Location};

/// A recoverable inconsistency or unsupported operation, reported by the
/// history adapters instead of throwing. No diagnostic ever implies a state
/// change.
#[derive(Clone, Debug, PartialEq)]
pub enum Diagnostic {
    /// A navigation verb that can not be mapped onto the shared root
    /// history was called and ignored.
    UnsupportedOperation {
        consumer_id: ConsumerId,
        operation: &'static str,
    },

    /// A POP event carried a root key that no entry of the consumer's
    /// private stack was stamped with.
    InconsistentHistory {
        consumer_id: ConsumerId,
        location: Location,
        entries: Vec<Location>,
    },

    /// A POP event correlated to an entry the private stack can not step
    /// to.
    CannotStep {
        consumer_id: ConsumerId,
        delta: isize,
    },
}

/// Receives diagnostics from history adapters.
///
/// Hosts can inject their own sink to route diagnostics into their
/// observability pipeline; [`LogDiagnostics`] is the default.
pub trait DiagnosticsSink {
    fn emit(&self, diagnostic: Diagnostic);
}

/// Default sink that forwards every diagnostic to `log::warn!`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogDiagnostics;

impl DiagnosticsSink for LogDiagnostics {
    fn emit(&self, diagnostic: Diagnostic) {
        match diagnostic {
            Diagnostic::UnsupportedOperation { operation, .. } => {
                warn!("{operation} is not supported.");
            }
            Diagnostic::InconsistentHistory {
                consumer_id,
                location,
                entries,
            } => {
                warn!(
                    "Inconsistent consumer history for \"{consumer_id}\". Can not apply popstate event for location: {:?} (entries: {:?})",
                    location.path(),
                    entries.iter().map(Location::path).collect::<Vec<_>>(),
                );
            }
            Diagnostic::CannotStep { consumer_id, delta } => {
                warn!(
                    "Inconsistent consumer history for \"{consumer_id}\". Can not move by {delta} to apply popstate event.",
                );
            }
        }
    }
}
