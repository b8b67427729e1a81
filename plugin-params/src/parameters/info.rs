use super::{ParameterId, ParameterValue};

#[derive(Clone)]
pub struct ParameterInfo {
    id: ParameterId,
    name: String,
    default_normalized_value: ParameterValue,
    steps: usize,
}

impl ParameterInfo {
    pub fn new(id: ParameterId, name: String) -> Self {
        Self {
            id,
            name,
            default_normalized_value: Default::default(),
            steps: 0,
        }
    }

    pub fn with_default_normalized_value(mut self, value: ParameterValue) -> Self {
        self.default_normalized_value = value;
        self
    }

    pub fn with_steps(mut self, steps: usize) -> Self {
        self.steps = steps;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn default_normalized_value(&self) -> ParameterValue {
        self.default_normalized_value
    }

    /// Number of discrete positions, or 0 for a continuous parameter
    pub fn steps(&self) -> usize {
        self.steps
    }
}
