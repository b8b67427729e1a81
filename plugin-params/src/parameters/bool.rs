use std::{any::Any, fmt::Display, sync::Arc};

use portable_atomic::{AtomicF64, Ordering};

use crate::host::{Host, HostHandle};

use super::{info::ParameterInfo, parameter::{Parameter, ParameterPlain}, ParameterId, ParameterValue};

pub type ValueChangedCallback = Arc<dyn Fn(ParameterValue, &str) + Send + Sync>;

pub struct BoolParameter {
    info: ParameterInfo,
    value: AtomicF64,
    host_handle: HostHandle,
    value_changed: Option<ValueChangedCallback>,
}

impl BoolParameter {
    pub fn new(id: impl Into<ParameterId>, name: impl Into<String>) -> Self {
        let info = ParameterInfo::new(id.into(), name.into())
            .with_steps(2);

        Self {
            info,
            value: 0.0.into(),
            host_handle: HostHandle::new(),
            value_changed: None,
        }
    }

    pub fn with_default_value(mut self, default_value: bool) -> Self {
        let default_normalized_value = if default_value { 1.0 } else { 0.0 };

        self.info = self.info.with_default_normalized_value(default_normalized_value);
        self.value.store(default_normalized_value, Ordering::Release);
        self
    }

    pub fn on_value_changed(mut self, value_changed: ValueChangedCallback) -> Self {
        self.value_changed = Some(value_changed);
        self
    }

    pub fn set_value(&self, value: bool) {
        let normalized = self.plain_to_normalized(value);

        if normalized != self.normalized_value() {
            self.set_value_notifying_host(normalized);
        }
    }

    pub fn default_value(&self) -> bool {
        self.normalized_to_plain(self.info.default_normalized_value())
    }

    pub fn reset_to_default_value(&self) {
        self.set_value(self.default_value());
    }

    pub fn is_default_value(&self) -> bool {
        f64::abs(self.info.default_normalized_value() - self.normalized_value()) < f64::EPSILON
    }

    fn set_value_notifying_host(&self, normalized: ParameterValue) {
        self.set_normalized_value(normalized);
        self.host_handle.change_parameter_value(self.info.id(), normalized);
    }
}

impl Display for BoolParameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.normalized_to_string(self.normalized_value(), usize::MAX))
    }
}

impl Parameter for BoolParameter {
    fn info(&self) -> &ParameterInfo {
        &self.info
    }

    fn normalized_value(&self) -> ParameterValue {
        self.value.load(Ordering::Acquire)
    }

    fn set_normalized_value(&self, normalized: ParameterValue) {
        let normalized = f64::clamp(normalized, 0.0, 1.0);
        self.value.store(normalized, Ordering::Release);

        if let Some(on_value_changed) = self.value_changed.as_ref() {
            on_value_changed(normalized, self.info.id());
        }
    }

    fn normalized_to_string(&self, normalized: ParameterValue, _max_length: usize) -> String {
        if self.normalized_to_plain(normalized) {
            "1".to_string()
        } else {
            "0".to_string()
        }
    }

    fn string_to_normalized(&self, string: &str) -> ParameterValue {
        let on = string.trim().parse::<i64>().unwrap_or(0) != 0;
        self.plain_to_normalized(on)
    }

    fn attach_host(&self, host: Arc<dyn Host>) {
        self.host_handle.attach(host);
    }

    fn detach_host(&self) {
        self.host_handle.detach();
    }

    fn as_any(&self) -> &dyn Any {
        self as _
    }
}

impl ParameterPlain for BoolParameter {
    type Plain = bool;

    fn normalized_to_plain(&self, normalized: ParameterValue) -> bool {
        normalized >= 0.5
    }

    fn plain_to_normalized(&self, plain: bool) -> ParameterValue {
        if plain {
            1.0
        } else {
            0.0
        }
    }
}
