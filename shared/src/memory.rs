use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use thiserror::Error;

use crate::location::{Action, Location};
use crate::unregister::Unregister;

/// Callback invoked after a history transition has been committed.
pub type LocationListener = Box<dyn FnMut(&Location, Action)>;

/// Hook consulted before a transition commits. Returning `false` blocks the
/// transition: no state changes and no listeners fire.
pub type TransitionHook = Box<dyn FnMut(&Location, Action) -> bool>;

/// Errors that can occur when stepping through an in-memory history
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemoryHistoryError {
    /// The requested step leaves the bounds of the entry list
    #[error("can not move by {delta} steps from entry {index} of {len}")]
    OutOfRange {
        delta: isize,
        index: usize,
        len: usize,
    },

    /// The active transition hook vetoed the step
    #[error("transition to {path} was blocked")]
    Blocked { path: String },
}

struct Entries<M> {
    list: Vec<(Location, M)>,
    index: usize,
    action: Action,
}

struct MemoryInner<M> {
    entries: RefCell<Entries<M>>,
    listeners: RefCell<Vec<(u64, Rc<RefCell<LocationListener>>)>>,
    blocker: RefCell<Option<(u64, Rc<RefCell<TransitionHook>>)>>,
    next_registration_id: Cell<u64>,
}

/// A standalone in-memory navigation stack.
///
/// Entries carry a location plus per-entry metadata `M`; consumer stacks use
/// `M = Option<LocationKey>` to store the correlation token of the root
/// transition committed in lock-step with each entry, root stacks use
/// `M = ()`.
///
/// The handle is cheap to clone; clones share the same stack. All methods
/// take `&self`, mutation happens through interior mutability. The initial
/// action is [`Action::Pop`], matching a freshly loaded history.
pub struct MemoryHistory<M = ()> {
    inner: Rc<MemoryInner<M>>,
}

impl<M> Clone for MemoryHistory<M> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<M: 'static> MemoryHistory<M> {
    pub fn new(initial: Location, meta: M) -> Self {
        Self {
            inner: Rc::new(MemoryInner {
                entries: RefCell::new(Entries {
                    list: vec![(initial, meta)],
                    index: 0,
                    action: Action::Pop,
                }),
                listeners: RefCell::new(Vec::new()),
                blocker: RefCell::new(None),
                next_registration_id: Cell::new(0),
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.entries.borrow().list.len()
    }

    /// Always `false`; a history holds at least its initial entry.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn index(&self) -> usize {
        self.inner.entries.borrow().index
    }

    pub fn action(&self) -> Action {
        self.inner.entries.borrow().action
    }

    pub fn location(&self) -> Location {
        let entries = self.inner.entries.borrow();

        entries.list[entries.index].0.clone()
    }

    pub fn entries(&self) -> Vec<Location> {
        self.inner
            .entries
            .borrow()
            .list
            .iter()
            .map(|(location, _)| location.clone())
            .collect()
    }

    /// Index of the first entry whose metadata matches the predicate.
    pub fn find_index(&self, predicate: impl Fn(&M) -> bool) -> Option<usize> {
        self.inner
            .entries
            .borrow()
            .list
            .iter()
            .position(|(_, meta)| predicate(meta))
    }

    /// Appends an entry after the current one, discarding any forward
    /// entries, and notifies listeners with [`Action::Push`].
    pub fn push(&self, location: Location, meta: M) {
        if !self.confirm(&location, Action::Push) {
            return;
        }

        self.commit_push(location, meta);
    }

    /// Replaces the current entry and notifies listeners with
    /// [`Action::Replace`].
    pub fn replace(&self, location: Location, meta: M) {
        if !self.confirm(&location, Action::Replace) {
            return;
        }

        self.commit_replace(location, meta);
    }

    /// Commits a push that has already passed the transition hook.
    pub(crate) fn commit_push(&self, location: Location, meta: M) {
        {
            let mut entries = self.inner.entries.borrow_mut();
            let next = entries.index + 1;
            entries.list.truncate(next);
            entries.list.push((location.clone(), meta));
            entries.index = next;
            entries.action = Action::Push;
        }

        self.notify(&location, Action::Push);
    }

    /// Commits a replace that has already passed the transition hook.
    pub(crate) fn commit_replace(&self, location: Location, meta: M) {
        {
            let mut entries = self.inner.entries.borrow_mut();
            let index = entries.index;
            entries.list[index] = (location.clone(), meta);
            entries.action = Action::Replace;
        }

        self.notify(&location, Action::Replace);
    }

    /// Whether a step by `delta` stays within the entry list.
    pub fn can_go(&self, delta: isize) -> bool {
        let entries = self.inner.entries.borrow();

        match (entries.index as isize).checked_add(delta) {
            Some(next) => next >= 0 && (next as usize) < entries.list.len(),
            None => false,
        }
    }

    /// Moves the current index by exactly `delta` entries and notifies
    /// listeners with [`Action::Pop`], mimicking an external back/forward
    /// navigation.
    pub fn go(&self, delta: isize) -> Result<(), MemoryHistoryError> {
        let (location, next) = {
            let entries = self.inner.entries.borrow();

            // Overflowing deltas are just as out of range as any other.
            let next = match (entries.index as isize).checked_add(delta) {
                Some(next) if next >= 0 && (next as usize) < entries.list.len() => next as usize,
                _ => {
                    return Err(MemoryHistoryError::OutOfRange {
                        delta,
                        index: entries.index,
                        len: entries.list.len(),
                    });
                }
            };

            (entries.list[next].0.clone(), next)
        };

        if !self.confirm(&location, Action::Pop) {
            return Err(MemoryHistoryError::Blocked {
                path: location.path(),
            });
        }

        {
            let mut entries = self.inner.entries.borrow_mut();
            entries.index = next;
            entries.action = Action::Pop;
        }

        self.notify(&location, Action::Pop);

        Ok(())
    }

    /// Registers a listener for committed transitions.
    pub fn listen(&self, listener: impl FnMut(&Location, Action) + 'static) -> Unregister {
        let id = self.next_registration_id();

        self.inner
            .listeners
            .borrow_mut()
            .push((id, Rc::new(RefCell::new(Box::new(listener) as LocationListener))));

        let inner = Rc::downgrade(&self.inner);

        Unregister::new(move || {
            if let Some(inner) = Weak::upgrade(&inner) {
                inner
                    .listeners
                    .borrow_mut()
                    .retain(|(listener_id, _)| *listener_id != id);
            }
        })
    }

    /// Installs the transition hook. Only one hook is active at a time; a
    /// new hook replaces the previous one.
    pub fn block(&self, hook: impl FnMut(&Location, Action) -> bool + 'static) -> Unregister {
        let id = self.next_registration_id();

        *self.inner.blocker.borrow_mut() =
            Some((id, Rc::new(RefCell::new(Box::new(hook) as TransitionHook))));

        let inner = Rc::downgrade(&self.inner);

        Unregister::new(move || {
            if let Some(inner) = Weak::upgrade(&inner) {
                let mut blocker = inner.blocker.borrow_mut();

                if matches!(*blocker, Some((hook_id, _)) if hook_id == id) {
                    *blocker = None;
                }
            }
        })
    }

    fn next_registration_id(&self) -> u64 {
        let id = self.inner.next_registration_id.get();
        self.inner.next_registration_id.set(id + 1);

        id
    }

    /// Consults the active transition hook without committing anything.
    pub(crate) fn confirm(&self, location: &Location, action: Action) -> bool {
        let hook = self
            .inner
            .blocker
            .borrow()
            .as_ref()
            .map(|(_, hook)| Rc::clone(hook));

        match hook {
            Some(hook) => (hook.borrow_mut())(location, action),
            None => true,
        }
    }

    fn notify(&self, location: &Location, action: Action) {
        // Snapshot so listeners may register/unregister re-entrantly.
        let snapshot: Vec<(u64, Rc<RefCell<LocationListener>>)> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(id, listener)| (*id, Rc::clone(listener)))
            .collect();

        for (id, listener) in snapshot {
            let still_registered = self
                .inner
                .listeners
                .borrow()
                .iter()
                .any(|(listener_id, _)| *listener_id == id);

            if still_registered {
                (listener.borrow_mut())(location, action);
            }
        }
    }
}
