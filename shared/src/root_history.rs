use crate::key_generator::KeyGenerator;
use crate::location::{Action, Location};
use crate::memory::{LocationListener, MemoryHistory, MemoryHistoryError, TransitionHook};
use crate::unregister::Unregister;

/// The shared history collaborator: the single physical navigation stack
/// that all consumers are multiplexed onto.
///
/// Implementations must assign a fresh [`LocationKey`](crate::LocationKey)
/// to every location committed through `push` or `replace`, synchronously:
/// by the time either method returns, `location()` already carries the new
/// key. POP correlation depends on this ordering.
///
/// Listeners are notified for every committed transition with the new
/// location and the action that caused it; externally-originated
/// navigations (back/forward) arrive as [`Action::Pop`].
pub trait RootHistory {
    fn location(&self) -> Location;

    fn action(&self) -> Action;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn push(&self, location: Location);

    fn replace(&self, location: Location);

    fn listen(&self, listener: LocationListener) -> Unregister;

    fn block(&self, hook: TransitionHook) -> Unregister;

    /// Renders a hypothetical location to a display string without
    /// committing it.
    fn create_href(&self, location: &Location) -> String;
}

/// A root history backed by a plain in-memory stack.
///
/// Serves as the shared location when no real navigable environment exists
/// (server-computed rendering), and as a navigable stand-in for one in
/// tests and embedded hosts: [`InMemoryRootHistory::go`], `back` and
/// `forward` replay an existing entry with its original key and notify
/// listeners with [`Action::Pop`], exactly like an address-bar back/forward.
pub struct InMemoryRootHistory {
    history: MemoryHistory<()>,
    keys: KeyGenerator,
}

impl InMemoryRootHistory {
    pub fn new(initial: impl Into<Location>) -> Self {
        let keys = KeyGenerator::new();

        let mut initial = initial.into();
        initial.key = Some(keys.generate());

        Self {
            history: MemoryHistory::new(initial, ()),
            keys,
        }
    }

    pub fn index(&self) -> usize {
        self.history.index()
    }

    pub fn entries(&self) -> Vec<Location> {
        self.history.entries()
    }

    /// Steps through existing entries like an external back/forward
    /// navigation, firing POP listeners.
    pub fn go(&self, delta: isize) -> Result<(), MemoryHistoryError> {
        self.history.go(delta)
    }

    pub fn back(&self) -> Result<(), MemoryHistoryError> {
        self.go(-1)
    }

    pub fn forward(&self) -> Result<(), MemoryHistoryError> {
        self.go(1)
    }
}

impl RootHistory for InMemoryRootHistory {
    fn location(&self) -> Location {
        self.history.location()
    }

    fn action(&self) -> Action {
        self.history.action()
    }

    fn len(&self) -> usize {
        self.history.len()
    }

    fn push(&self, mut location: Location) {
        location.key = Some(self.keys.generate());
        self.history.push(location, ());
    }

    fn replace(&self, mut location: Location) {
        location.key = Some(self.keys.generate());
        self.history.replace(location, ());
    }

    fn listen(&self, listener: LocationListener) -> Unregister {
        self.history.listen(listener)
    }

    fn block(&self, hook: TransitionHook) -> Unregister {
        self.history.block(hook)
    }

    fn create_href(&self, location: &Location) -> String {
        location.path()
    }
}
