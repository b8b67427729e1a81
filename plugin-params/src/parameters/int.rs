use std::{any::Any, fmt::Display, sync::Arc};

use portable_atomic::{AtomicF64, Ordering};

use crate::host::{Host, HostHandle};

use super::{info::ParameterInfo, parameter::{Parameter, ParameterPlain}, range::ParameterRange, ParameterId, ParameterValue};

pub type ValueChangedCallback = Arc<dyn Fn(ParameterValue) + Send + Sync>;

pub struct IntParameter {
    info: ParameterInfo,
    value: AtomicF64,
    range: IntRange,
    host_handle: HostHandle,
    value_changed: Option<ValueChangedCallback>,
}

impl IntParameter {
    pub fn new(id: impl Into<ParameterId>, name: impl Into<String>, range: IntRange) -> Self {
        let info = ParameterInfo::new(id.into(), name.into())
            .with_steps(range.steps());

        Self {
            info,
            value: 0.0.into(),
            range,
            host_handle: HostHandle::new(),
            value_changed: None,
        }
    }

    pub fn with_default_value(mut self, value: i64) -> Self {
        let default_normalized_value = self.range.plain_to_normalized(value);
        self.info = self.info.with_default_normalized_value(default_normalized_value);
        self.value.store(default_normalized_value, Ordering::Release);
        self
    }

    pub fn on_value_changed(mut self, value_changed: ValueChangedCallback) -> Self {
        self.value_changed = Some(value_changed);
        self
    }

    pub fn set_value(&self, value: i64) {
        let normalized = self.range.plain_to_normalized(value);

        if normalized != self.normalized_value() {
            self.set_value_notifying_host(normalized);
        }
    }

    pub fn range(&self) -> &IntRange {
        &self.range
    }

    pub fn default_value(&self) -> i64 {
        self.range.normalized_to_plain(self.info.default_normalized_value())
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

impl Display for IntParameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.normalized_to_string(self.normalized_value(), usize::MAX))
    }
}

impl Parameter for IntParameter {
    fn info(&self) -> &ParameterInfo {
        &self.info
    }

    fn normalized_value(&self) -> ParameterValue {
        self.value.load(Ordering::Acquire)
    }

    // The stored value always sits on an exact step so conversions can't drift
    fn set_normalized_value(&self, normalized: ParameterValue) {
        let normalized = f64::clamp(normalized, 0.0, 1.0);
        let snapped = self.range.plain_to_normalized(self.range.normalized_to_plain(normalized));
        self.value.store(snapped, Ordering::Release);

        if let Some(on_value_changed) = self.value_changed.as_ref() {
            on_value_changed(normalized);
        }
    }

    fn normalized_to_string(&self, normalized: ParameterValue, _max_length: usize) -> String {
        self.range.normalized_to_plain(normalized).to_string()
    }

    fn string_to_normalized(&self, string: &str) -> ParameterValue {
        let plain = string.trim().parse().unwrap_or(0);
        self.range.plain_to_normalized(plain)
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

impl ParameterPlain for IntParameter {
    type Plain = i64;

    fn normalized_to_plain(&self, normalized: ParameterValue) -> i64 {
        let normalized = normalized.clamp(0.0, 1.0);
        self.range.normalized_to_plain(normalized)
    }

    fn plain_to_normalized(&self, plain: i64) -> ParameterValue {
        self.range.plain_to_normalized(plain)
    }
}

#[derive(Clone)]
pub struct IntRange {
    min: i64,
    max: i64,
}

impl IntRange {
    pub const fn new(min: i64, max: i64) -> Self {
        assert!(min < max);

        Self {
            min,
            max,
        }
    }

    pub const fn min(&self) -> i64 {
        self.min
    }

    pub const fn max(&self) -> i64 {
        self.max
    }
}

impl ParameterRange<i64> for IntRange {
    fn clamp(&self, value: i64) -> i64 {
        i64::clamp(value, self.min, self.max)
    }

    fn steps(&self) -> usize {
        (self.max - self.min) as usize + 1
    }

    fn plain_to_normalized(&self, plain: i64) -> ParameterValue {
        (self.clamp(plain) - self.min) as f64 / (self.max - self.min) as f64
    }

    fn normalized_to_plain(&self, normalized: ParameterValue) -> i64 {
        let plain = f64::round(normalized * (self.max - self.min) as f64 + self.min as f64) as i64;
        self.clamp(plain)
    }
}
