use std::rc::Rc;

/// Removes a previously registered listener or blocker when called.
///
/// Clones all refer to the same registration. Calling more than once is
/// harmless; the underlying removal is idempotent.
#[derive(Clone)]
pub struct Unregister(Rc<dyn Fn()>);

impl Unregister {
    pub fn new(unregister: impl Fn() + 'static) -> Self {
        Self(Rc::new(unregister))
    }

    /// Combines two unregister callbacks into one that tears down both.
    pub fn join(first: Unregister, second: Unregister) -> Unregister {
        Unregister::new(move || {
            first.call();
            second.call();
        })
    }

    pub fn call(&self) {
        (self.0)();
    }
}

impl std::fmt::Debug for Unregister {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Unregister")
    }
}
