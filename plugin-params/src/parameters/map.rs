use std::{collections::HashMap, sync::Arc};

use crate::{Parameter, ParameterId, Parameters};

#[derive(Clone)]
pub struct ParameterMap {
    ids: Vec<ParameterId>,
    map: HashMap<ParameterId, Arc<dyn Parameter>>,
}

impl ParameterMap {
    pub fn new() -> Self {
        Self {
            ids: Default::default(),
            map: Default::default(),
        }
    }

    pub fn add(&mut self, parameter: impl Parameter) {
        let id = parameter.info().id().to_string();
        assert!(!self.map.contains_key(&id),
            "Duplicate parameter id {id}. Old parameter was \"{}\", new parameter is \"{}\"",
            self.map.get(&id).unwrap().info().name(),
            parameter.info().name(),
        );

        log::trace!("Registering parameter \"{id}\"");

        self.ids.push(id.clone());
        self.map.insert(id, Arc::new(parameter));
    }
}

impl Parameters for ParameterMap {
    fn ids(&self) -> &[ParameterId] {
        &self.ids
    }

    fn get(&self, id: &str) -> Option<&dyn Parameter> {
        self.map.get(id)
            .map(|parameter| parameter.as_ref())
    }
}
