use std::rc::Rc;

use histmux_shared::{
    Action, ConsumerHistoryCore, ConsumerId, Diagnostic, Location, Unregister,
};

/// A consumer's private history over a live, navigable root history.
///
/// Push and replace are mirrored onto the root location; externally
/// triggered root navigations (POP) are correlated back and replayed as a
/// bounded step on this consumer's private stack only.
pub struct BrowserHistory {
    core: Rc<ConsumerHistoryCore>,
}

impl BrowserHistory {
    pub(crate) fn new(core: ConsumerHistoryCore) -> Self {
        Self {
            core: Rc::new(core),
        }
    }

    pub fn consumer_id(&self) -> &ConsumerId {
        self.core.consumer_id()
    }

    pub fn len(&self) -> usize {
        self.core.len()
    }

    pub fn is_empty(&self) -> bool {
        self.core.is_empty()
    }

    pub fn action(&self) -> Action {
        self.core.action()
    }

    pub fn location(&self) -> Location {
        self.core.location()
    }

    pub fn push(&self, to: impl Into<Location>) {
        self.core.push(to);
    }

    pub fn replace(&self, to: impl Into<Location>) {
        self.core.replace(to);
    }

    /// Unsupported; warns and changes nothing.
    pub fn go(&self, delta: isize) {
        self.core.go(delta);
    }

    /// Unsupported; warns and changes nothing.
    pub fn go_back(&self) {
        self.core.go_back();
    }

    /// Unsupported; warns and changes nothing.
    pub fn go_forward(&self) {
        self.core.go_forward();
    }

    pub fn block(&self, hook: impl FnMut(&Location, Action) -> bool + 'static) -> Unregister {
        self.core.block(hook)
    }

    /// Registers a listener for this consumer's own transitions and, on the
    /// first matching POP of the root history, replays the navigation on
    /// this consumer's stack. The returned unregister tears down both
    /// subscriptions and is also run by [`destroy`](Self::destroy).
    pub fn listen(&self, listener: impl FnMut(&Location, Action) + 'static) -> Unregister {
        let consumer_unregister = self.core.stack().listen(listener);

        let core = Rc::clone(&self.core);
        let root_unregister = self.core.root_history().listen(Box::new(
            move |root_location, action| {
                if action == Action::Pop {
                    handle_pop(&core, root_location);
                }
            },
        ));

        let unregister = Unregister::join(consumer_unregister, root_unregister);
        self.core.record_teardown(unregister.clone());

        unregister
    }

    pub fn create_href(&self, location: &Location) -> String {
        self.core.create_href(location)
    }

    /// Tears down all subscriptions and removes this consumer from the
    /// root location via a replace.
    pub fn destroy(&self) {
        self.core.destroy();
    }
}

/// Replays an externally-originated root navigation for one consumer.
///
/// The private-stack entry created in lock-step with the popped root
/// transition is located by its stamped root key; the stack then steps to
/// it by exactly the resulting delta, firing this consumer's listeners
/// with [`Action::Pop`]. Any miss is a recoverable inconsistency: warn,
/// never guess a target index.
fn handle_pop(core: &ConsumerHistoryCore, root_location: &Location) {
    if core
        .transformer()
        .consumer_path_from_root_location(root_location, core.consumer_id())
        .is_none()
    {
        // This consumer has no presence at the popped location.
        return;
    }

    let stack = core.stack();

    let Some(target) = stack.find_index(|key| key.is_some() && *key == root_location.key) else {
        core.diagnostics().emit(Diagnostic::InconsistentHistory {
            consumer_id: core.consumer_id().clone(),
            location: root_location.clone(),
            entries: stack.entries(),
        });

        return;
    };

    let delta = target as isize - stack.index() as isize;

    if delta == 0 {
        // The POP concerned a sibling consumer or an unrelated root field.
        return;
    }

    if stack.go(delta).is_err() {
        core.diagnostics().emit(Diagnostic::CannotStep {
            consumer_id: core.consumer_id().clone(),
            delta,
        });
    }
}
