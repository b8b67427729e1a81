pub mod bool;
pub mod float;
pub mod info;
pub mod int;
pub mod map;
pub mod parameter;
pub mod range;

pub type ParameterId = String;
pub type ParameterValue = f64;

use std::sync::Arc;

use parameter::{Parameter, ParameterPlain};

use crate::Host;

pub trait Parameters {
    fn ids(&self) -> &[ParameterId];
    fn get(&self, id: &str) -> Option<&dyn Parameter>;

    fn typed<T: Parameter>(&self, id: &str) -> Option<&T> {
        self.get(id)
            .and_then(|parameter| {
                let any_parameter = parameter.as_any();
                any_parameter.downcast_ref::<T>()
            })
    }

    fn value<T: ParameterPlain>(&self, id: &str) -> T::Plain {
        self.typed::<T>(id).unwrap().plain()
    }

    fn attach_host(&self, host: &Arc<dyn Host>) {
        log::trace!("Attaching host to {} parameters", self.ids().len());

        for id in self.ids() {
            self.get(id).unwrap().attach_host(host.clone());
        }
    }

    fn detach_host(&self) {
        log::trace!("Detaching host from parameters");

        for id in self.ids() {
            self.get(id).unwrap().detach_host();
        }
    }
}
