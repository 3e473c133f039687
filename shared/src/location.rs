use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Opaque identifier of a history consumer.
///
/// The set of consumer ids is dynamic; consumers attach and detach at
/// runtime. At most one id may be designated as the primary consumer via
/// [`RootLocationOptions`](crate::RootLocationOptions).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConsumerId(String);

impl ConsumerId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ConsumerId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for ConsumerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for ConsumerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Key assigned by a root history to every committed location.
///
/// Consumer stacks stamp the root's key onto the entry created in lock-step
/// with the root transition; POP correlation later matches on it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocationKey(String);

impl LocationKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for LocationKey {
    fn from(key: &str) -> Self {
        Self(key.to_owned())
    }
}

impl From<String> for LocationKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl fmt::Display for LocationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The navigation action that produced the current location of a history.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    Pop,
    Push,
    Replace,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Pop => "POP",
            Action::Push => "PUSH",
            Action::Replace => "REPLACE",
        };

        f.write_str(name)
    }
}

/// A single navigation entry.
///
/// `search` is either empty or starts with `?`; `hash` is either empty or
/// starts with `#`. `state` is arbitrary consumer-supplied JSON. `key` is
/// only ever assigned by a root history, never by a consumer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub pathname: String,
    pub search: String,
    pub hash: String,
    pub state: Value,
    pub key: Option<LocationKey>,
}

impl Location {
    /// Parses a path string like `/foo?bar=1#baz` into a location.
    ///
    /// An empty path yields the default pathname `/`. A lone `?` or `#`
    /// is treated as absent.
    pub fn from_path(path: &str) -> Self {
        let (rest, hash) = match path.find('#') {
            Some(at) => (&path[..at], &path[at..]),
            None => (path, ""),
        };

        let (pathname, search) = match rest.find('?') {
            Some(at) => (&rest[..at], &rest[at..]),
            None => (rest, ""),
        };

        Self {
            pathname: if pathname.is_empty() {
                "/".to_owned()
            } else {
                pathname.to_owned()
            },
            search: if search == "?" {
                String::new()
            } else {
                search.to_owned()
            },
            hash: if hash == "#" {
                String::new()
            } else {
                hash.to_owned()
            },
            state: Value::Null,
            key: None,
        }
    }

    /// Returns the same location with the given consumer state attached.
    pub fn with_state(mut self, state: Value) -> Self {
        self.state = state;
        self
    }

    /// Renders the location back into a path string.
    pub fn path(&self) -> String {
        format!("{}{}{}", self.pathname, self.search, self.hash)
    }
}

impl Default for Location {
    fn default() -> Self {
        Self {
            pathname: "/".to_owned(),
            search: String::new(),
            hash: String::new(),
            state: Value::Null,
            key: None,
        }
    }
}

impl From<&str> for Location {
    fn from(path: &str) -> Self {
        Self::from_path(path)
    }
}
