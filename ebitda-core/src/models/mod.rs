mod inputs;
mod results;

pub use inputs::{InputField, Inputs, UnknownFieldError};
pub use results::{Metric, MetricFormat, Results};
