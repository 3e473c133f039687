use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The slice of an incoming HTTP request the history service needs.
///
/// Only `path` feeds the root history; cookies and headers ride along so
/// request-scoped collaborators built next to a history adapter can share
/// one request value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerRequest {
    /// Path plus query string, e.g. `/app?---=%7B...%7D`.
    pub path: String,
    #[serde(default)]
    pub cookies: HashMap<String, String>,
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

impl ServerRequest {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            cookies: HashMap::new(),
            headers: HashMap::new(),
        }
    }
}
