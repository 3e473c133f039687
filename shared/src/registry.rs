use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use thiserror::Error;

use crate::location::ConsumerId;

/// Errors that can occur when binding a consumer to a history
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The consumer already owns a live history adapter
    #[error("consumer \"{0}\" is already bound to a history")]
    AlreadyBound(ConsumerId),
}

/// Tracks which consumers currently own a history adapter.
///
/// Attach and detach are explicit lifecycle calls: `bind` on creation,
/// `unbind` (driven by the adapter's destroy) on teardown. Unbinding is
/// idempotent.
#[derive(Clone, Debug, Default)]
pub struct ConsumerRegistry {
    bound: Rc<RefCell<HashSet<ConsumerId>>>,
}

impl ConsumerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&self, consumer_id: &ConsumerId) -> Result<(), RegistryError> {
        if self.bound.borrow_mut().insert(consumer_id.clone()) {
            Ok(())
        } else {
            Err(RegistryError::AlreadyBound(consumer_id.clone()))
        }
    }

    pub fn unbind(&self, consumer_id: &ConsumerId) {
        self.bound.borrow_mut().remove(consumer_id);
    }

    pub fn is_bound(&self, consumer_id: &ConsumerId) -> bool {
        self.bound.borrow().contains(consumer_id)
    }

    /// An unregister callback that unbinds the consumer, for recording in
    /// an adapter's teardown list.
    pub fn unbinder(&self, consumer_id: ConsumerId) -> crate::Unregister {
        let registry = self.clone();

        crate::Unregister::new(move || registry.unbind(&consumer_id))
    }
}
