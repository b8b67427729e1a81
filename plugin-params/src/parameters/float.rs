use std::{any::Any, fmt::Display, sync::Arc};

use portable_atomic::{AtomicF64, Ordering};

use crate::host::{Host, HostHandle};

use super::{info::ParameterInfo, parameter::{Parameter, ParameterPlain}, range::ParameterRange, ParameterId, ParameterValue};

pub type ValueChangedCallback = Arc<dyn Fn(ParameterValue) + Send + Sync>;

pub struct FloatParameter {
    info: ParameterInfo,
    value: AtomicF64,
    range: Arc<dyn ParameterRange<f64>>,
    host_handle: HostHandle,
    value_changed: Option<ValueChangedCallback>,
}

impl FloatParameter {
    pub fn new(id: impl Into<ParameterId>, name: impl Into<String>, range: Arc<dyn ParameterRange<f64>>) -> Self {
        let value = range.normalized_to_plain(0.0);

        Self {
            info: ParameterInfo::new(id.into(), name.into()),
            value: value.into(),
            range,
            host_handle: HostHandle::new(),
            value_changed: None,
        }
    }

    pub fn with_default_value(mut self, value: f64) -> Self {
        let value = self.range.clamp(value);
        let default_normalized_value = self.range.plain_to_normalized(value);

        self.info = self.info.with_default_normalized_value(default_normalized_value);
        self.value.store(value, Ordering::Release);
        self
    }

    pub fn on_value_changed(mut self, value_changed: ValueChangedCallback) -> Self {
        self.value_changed = Some(value_changed);
        self
    }

    pub fn set_value(&self, value: f64) {
        let normalized = self.range.plain_to_normalized(value);

        if normalized != self.normalized_value() {
            self.set_value_notifying_host(normalized);
        }
    }

    pub fn default_value(&self) -> f64 {
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

impl Display for FloatParameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.normalized_to_string(self.normalized_value(), usize::MAX))
    }
}

impl Parameter for FloatParameter {
    fn info(&self) -> &ParameterInfo {
        &self.info
    }

    fn normalized_value(&self) -> ParameterValue {
        self.range.plain_to_normalized(self.value.load(Ordering::Acquire))
    }

    fn set_normalized_value(&self, normalized: ParameterValue) {
        let normalized = f64::clamp(normalized, 0.0, 1.0);
        self.value.store(self.range.normalized_to_plain(normalized), Ordering::Release);

        if let Some(on_value_changed) = self.value_changed.as_ref() {
            on_value_changed(normalized);
        }
    }

    // Truncation counts characters, not digits, so it can cut into the number itself
    fn normalized_to_string(&self, normalized: ParameterValue, max_length: usize) -> String {
        let mut string = format!("{:.2}", self.range.normalized_to_plain(normalized));
        string.truncate(max_length);
        string
    }

    fn string_to_normalized(&self, string: &str) -> ParameterValue {
        let plain = string.trim().parse().unwrap_or(0.0);
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

impl ParameterPlain for FloatParameter {
    type Plain = f64;

    fn normalized_to_plain(&self, normalized: ParameterValue) -> f64 {
        let normalized = normalized.clamp(0.0, 1.0);
        self.range.normalized_to_plain(normalized)
    }

    fn plain_to_normalized(&self, plain: f64) -> ParameterValue {
        self.range.plain_to_normalized(plain)
    }

    fn plain(&self) -> f64 {
        self.value.load(Ordering::Acquire)
    }
}

#[derive(Clone)]
pub struct LinearFloatRange {
    min: f64,
    max: f64,
}

impl LinearFloatRange {
    pub fn new(min: f64, max: f64) -> Self {
        assert!(min < max);

        Self {
            min,
            max,
        }
    }
}

impl ParameterRange<f64> for LinearFloatRange {
    fn clamp(&self, value: f64) -> f64 {
        f64::clamp(value, self.min, self.max)
    }

    fn steps(&self) -> usize {
        0
    }

    fn plain_to_normalized(&self, plain: f64) -> ParameterValue {
        (self.clamp(plain) - self.min) / (self.max - self.min)
    }

    fn normalized_to_plain(&self, normalized: ParameterValue) -> f64 {
        normalized * (self.max - self.min) + self.min
    }
}

/// Gives one end of the range more of the control travel.
/// Factors below 1 favor the low end, factors above 1 favor the high end.
#[derive(Clone)]
pub struct SkewedFloatRange {
    min: f64,
    max: f64,
    factor: f64,
}

impl SkewedFloatRange {
    pub fn new(min: f64, max: f64, factor: f64) -> Self {
        assert!(min < max);
        assert!(factor > 0.0);

        Self {
            min,
            max,
            factor,
        }
    }
}

impl ParameterRange<f64> for SkewedFloatRange {
    fn clamp(&self, value: f64) -> f64 {
        f64::clamp(value, self.min, self.max)
    }

    fn steps(&self) -> usize {
        0
    }

    fn plain_to_normalized(&self, plain: f64) -> ParameterValue {
        let x = (self.clamp(plain) - self.min) / (self.max - self.min);
        f64::powf(x, self.factor)
    }

    fn normalized_to_plain(&self, normalized: ParameterValue) -> f64 {
        f64::powf(normalized, 1.0 / self.factor) * (self.max - self.min) + self.min
    }
}

#[derive(Clone)]
pub struct LogFloatRange {
    min: f64,
    max: f64,
    k: f64,
}

impl LogFloatRange {
    pub fn new(min: f64, max: f64, k: f64) -> Self {
        assert!(min < max);
        assert!(k > 1.0);

        Self {
            min,
            max,
            k,
        }
    }
}

impl ParameterRange<f64> for LogFloatRange {
    fn clamp(&self, value: f64) -> f64 {
        f64::clamp(value, self.min, self.max)
    }

    fn steps(&self) -> usize {
        0
    }

    fn plain_to_normalized(&self, plain: f64) -> ParameterValue {
        let x = (self.clamp(plain) - self.min) / (self.max - self.min);
        f64::log(x * (self.k - 1.0) + 1.0, self.k)
    }

    fn normalized_to_plain(&self, normalized: ParameterValue) -> f64 {
        let x = (f64::powf(self.k, normalized) - 1.0) / (self.k - 1.0);
        x * (self.max - self.min) + self.min
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use approx::{assert_abs_diff_eq, assert_ulps_eq};

    use crate::host::tests::RecordingHost;
    use crate::parameters::range::ParameterRange;
    use crate::{Parameter, ParameterPlain};

    use super::{FloatParameter, LinearFloatRange, LogFloatRange, SkewedFloatRange};

    #[test]
    fn linear_float_converter() {
        let converter = LinearFloatRange::new(1.0, 3.0);
        assert_eq!(converter.plain_to_normalized(1.0), 0.0);
        assert_eq!(converter.plain_to_normalized(3.0), 1.0);
        assert_eq!(converter.plain_to_normalized(0.0), 0.0);
        assert_eq!(converter.plain_to_normalized(4.0), 1.0);
        assert_eq!(converter.normalized_to_plain(0.0), 1.0);
        assert_eq!(converter.normalized_to_plain(1.0), 3.0);
        assert_eq!(converter.plain_to_normalized(converter.normalized_to_plain(0.5)), 0.5);
    }

    #[test]
    fn skewed_float_converter() {
        let converter = SkewedFloatRange::new(0.0, 100.0, 0.5);
        assert_ulps_eq!(converter.plain_to_normalized(0.0), 0.0);
        assert_ulps_eq!(converter.plain_to_normalized(100.0), 1.0);
        assert_ulps_eq!(converter.plain_to_normalized(50.0), f64::sqrt(0.5));
        assert_ulps_eq!(converter.plain_to_normalized(200.0), 1.0);
        assert_ulps_eq!(converter.normalized_to_plain(0.0), 0.0);
        assert_ulps_eq!(converter.normalized_to_plain(0.5), 25.0);
        assert_ulps_eq!(converter.normalized_to_plain(1.0), 100.0);
        assert_ulps_eq!(converter.plain_to_normalized(converter.normalized_to_plain(0.25)), 0.25);
    }

    #[test]
    fn skew_factor_of_one_is_linear() {
        let converter = SkewedFloatRange::new(0.0, 100.0, 1.0);

        for i in 0..=10 {
            let normalized = i as f64 / 10.0;
            assert_ulps_eq!(converter.normalized_to_plain(normalized), normalized * 100.0);
        }
    }

    #[test]
    fn log_float_converter() {
        let converter = LogFloatRange::new(1.0, 3.0, 2.0);
        assert_ulps_eq!(converter.plain_to_normalized(1.0), 0.0);
        assert_ulps_eq!(converter.plain_to_normalized(3.0), 1.0);
        assert_ulps_eq!(converter.plain_to_normalized(0.0), 0.0);
        assert_ulps_eq!(converter.plain_to_normalized(4.0), 1.0);
        assert_ulps_eq!(converter.normalized_to_plain(0.0), 1.0);
        assert_ulps_eq!(converter.normalized_to_plain(1.0), 3.0);
        assert_ulps_eq!(converter.plain_to_normalized(converter.normalized_to_plain(0.5)), 0.5);
    }

    #[test]
    fn default_value_sets_current_value() {
        let parameter = FloatParameter::new("gain", "Gain", Arc::new(LinearFloatRange::new(0.0, 100.0)))
            .with_default_value(42.5);

        assert_eq!(parameter.plain(), 42.5);
        assert_eq!(parameter.default_normalized_value(), 0.425);
        assert_eq!(parameter.steps(), 0);
        assert!(parameter.is_default_value());
    }

    #[test]
    fn out_of_range_default_value_is_clamped() {
        let parameter = FloatParameter::new("gain", "Gain", Arc::new(LinearFloatRange::new(0.0, 100.0)))
            .with_default_value(150.0);

        assert_eq!(parameter.plain(), 100.0);
        assert_eq!(parameter.default_normalized_value(), 1.0);
    }

    #[test]
    fn plain_value_is_stored_unconverted() {
        let parameter = FloatParameter::new("gain", "Gain", Arc::new(LinearFloatRange::new(0.0, 100.0)));

        parameter.set_value(42.5);
        assert_eq!(parameter.plain(), 42.5);

        parameter.set_normalized_value(1.5);
        assert_eq!(parameter.plain(), 100.0);
    }

    #[test]
    fn set_value_notifies_host_once() {
        let host = Arc::new(RecordingHost::default());
        let parameter = FloatParameter::new("gain", "Gain", Arc::new(LinearFloatRange::new(0.0, 100.0)));
        parameter.attach_host(host.clone());

        parameter.set_value(42.5);
        parameter.set_value(42.5);

        assert_eq!(*host.changes.lock().unwrap(), [("gain".to_string(), 0.425)]);
    }

    #[test]
    fn assigning_the_current_value_is_silent() {
        let host = Arc::new(RecordingHost::default());
        let parameter = FloatParameter::new("gain", "Gain", Arc::new(LinearFloatRange::new(0.0, 100.0)))
            .with_default_value(42.5);
        parameter.attach_host(host.clone());

        parameter.set_value(42.5);
        parameter.set_value(42.5);

        assert!(host.changes.lock().unwrap().is_empty());
    }

    #[test]
    fn callback_receives_incoming_normalized_value() {
        let received = Arc::new(Mutex::new(Vec::new()));

        let parameter = {
            let received = received.clone();

            FloatParameter::new("gain", "Gain", Arc::new(LinearFloatRange::new(0.0, 100.0)))
                .on_value_changed(Arc::new(move |normalized| {
                    received.lock().unwrap().push(normalized);
                }))
        };

        parameter.set_normalized_value(0.7);
        parameter.set_value(10.0);

        assert_eq!(*received.lock().unwrap(), [0.7, 0.1]);
    }

    #[test]
    fn reset_goes_through_notifying_path() {
        let host = Arc::new(RecordingHost::default());
        let parameter = FloatParameter::new("gain", "Gain", Arc::new(LinearFloatRange::new(0.0, 100.0)))
            .with_default_value(25.0);
        parameter.attach_host(host.clone());

        parameter.set_value(80.0);
        parameter.reset_to_default_value();

        assert_eq!(parameter.plain(), 25.0);
        assert!(parameter.is_default_value());
        assert_eq!(
            *host.changes.lock().unwrap(),
            [("gain".to_string(), 0.8), ("gain".to_string(), 0.25)],
        );
    }

    #[test]
    fn text_always_has_two_decimals() {
        let parameter = FloatParameter::new("gain", "Gain", Arc::new(LinearFloatRange::new(0.0, 100.0)))
            .with_default_value(0.0);

        assert_eq!(parameter.normalized_to_string(0.425, 6), "42.50");
        assert_eq!(parameter.normalized_to_string(0.0, 6), "0.00");
        assert_eq!(parameter.normalized_to_string(1.0, 6), "100.00");

        parameter.set_value(42.5);
        assert_eq!(parameter.normalized_to_string(parameter.normalized_value(), 6), "42.50");
    }

    #[test]
    fn text_truncation_can_cut_into_the_number() {
        let parameter = FloatParameter::new("gain", "Gain", Arc::new(LinearFloatRange::new(0.0, 200.0)));

        assert_eq!(parameter.normalized_to_string(0.61725, 6), "123.45");
        assert_eq!(parameter.normalized_to_string(0.61725, 4), "123.");
        assert_eq!(parameter.normalized_to_string(0.61725, 1), "1");
        assert_eq!(parameter.normalized_to_string(0.61725, 0), "");
    }

    #[test]
    fn text_keeps_the_sign_of_small_negative_values() {
        let parameter = FloatParameter::new("pan", "Pan", Arc::new(LinearFloatRange::new(-1.0, 1.0)));

        parameter.set_value(-0.001);
        assert_eq!(parameter.to_string(), "-0.00");
    }

    #[test]
    fn text_parsing() {
        let parameter = FloatParameter::new("gain", "Gain", Arc::new(LinearFloatRange::new(0.0, 100.0)));

        assert_eq!(parameter.string_to_normalized("50"), 0.5);
        assert_eq!(parameter.string_to_normalized(" 42.5 "), 0.425);
        assert_eq!(parameter.string_to_normalized("150"), 1.0);
        assert_eq!(parameter.string_to_normalized("-10"), 0.0);
        assert_eq!(parameter.string_to_normalized("garbage"), 0.0);
        assert_eq!(parameter.string_to_normalized(""), 0.0);
    }

    #[test]
    fn skewed_parameter_round_trips_through_its_range() {
        let parameter = FloatParameter::new("cutoff", "Cutoff", Arc::new(SkewedFloatRange::new(20.0, 20000.0, 0.3)))
            .with_default_value(1000.0);

        assert_eq!(parameter.plain(), 1000.0);
        assert!(parameter.is_default_value());

        parameter.set_normalized_value(parameter.plain_to_normalized(440.0));
        assert_abs_diff_eq!(parameter.plain(), 440.0, epsilon = 1e-9);
    }

    #[test]
    #[should_panic]
    fn inverted_range_is_rejected() {
        LinearFloatRange::new(3.0, 1.0);
    }

    #[test]
    #[should_panic]
    fn zero_skew_factor_is_rejected() {
        SkewedFloatRange::new(0.0, 1.0, 0.0);
    }

    #[test]
    #[should_panic]
    fn log_range_requires_k_above_one() {
        LogFloatRange::new(1.0, 3.0, 1.0);
    }
}
