use std::sync::Arc;

use atomic_refcell::AtomicRefCell;

use crate::parameters::ParameterValue;

// SAFETY: This might be called from any thread so implementations need to be thread-safe
pub trait Host: Send + Sync {
    fn change_parameter_value(&self, id: &str, normalized: ParameterValue);
}

pub(crate) struct HostHandle {
    host: AtomicRefCell<Option<Arc<dyn Host>>>,
}

impl HostHandle {
    pub fn new() -> Self {
        Self {
            host: AtomicRefCell::new(None),
        }
    }

    pub fn attach(&self, host: Arc<dyn Host>) {
        *self.host.borrow_mut() = Some(host);
    }

    pub fn detach(&self) {
        *self.host.borrow_mut() = None;
    }

    pub fn change_parameter_value(&self, id: &str, normalized: ParameterValue) {
        if let Some(host) = self.host.borrow().as_ref() {
            host.change_parameter_value(id, normalized);
        }
    }
}
