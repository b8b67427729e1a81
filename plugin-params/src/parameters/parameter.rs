use std::{any::Any, sync::Arc};

use crate::Host;

use super::{info::ParameterInfo, ParameterValue};

pub trait Parameter : Any + Send + Sync {
    fn info(&self) -> &ParameterInfo;

    fn normalized_value(&self) -> ParameterValue;
    fn set_normalized_value(&self, normalized: ParameterValue);

    fn normalized_to_string(&self, normalized: ParameterValue, max_length: usize) -> String;
    fn string_to_normalized(&self, string: &str) -> ParameterValue;

    fn attach_host(&self, host: Arc<dyn Host>);
    fn detach_host(&self);

    fn as_any(&self) -> &dyn Any;

    fn default_normalized_value(&self) -> ParameterValue {
        self.info().default_normalized_value()
    }

    fn steps(&self) -> usize {
        self.info().steps()
    }
}

pub trait ParameterPlain : Parameter {
    type Plain;

    fn normalized_to_plain(&self, normalized: ParameterValue) -> Self::Plain;
    fn plain_to_normalized(&self, plain: Self::Plain) -> ParameterValue;

    fn plain(&self) -> Self::Plain {
        self.normalized_to_plain(self.normalized_value())
    }
}
