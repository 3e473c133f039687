use histmux_shared::RegistryError;
use thiserror::Error;

/// Errors that can occur when creating a server-side history adapter
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServerHistoryError {
    /// The service was constructed without a server request, e.g. during a
    /// build step that runs outside of any request
    #[error("memory history can not be created without a server request")]
    MissingServerRequest,
    /// The consumer already owns a live history adapter
    #[error(transparent)]
    Registry(#[from] RegistryError),
}
