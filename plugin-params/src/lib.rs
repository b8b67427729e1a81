pub use host::Host;
pub use parameters::{Parameters, ParameterId, ParameterValue};
pub use parameters::bool::BoolParameter;
pub use parameters::float::{FloatParameter, LinearFloatRange, LogFloatRange, SkewedFloatRange};
pub use parameters::info::ParameterInfo;
pub use parameters::int::{IntParameter, IntRange};
pub use parameters::map::ParameterMap;
pub use parameters::parameter::{Parameter, ParameterPlain};
pub use parameters::range::ParameterRange;

mod host;
pub mod parameters;
