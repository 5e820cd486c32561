mod domain;
pub use domain::{Properties, Property, format_duration, parse_duration};

mod error;
pub use error::{ModelError, ModelResult};
