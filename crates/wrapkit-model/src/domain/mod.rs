mod property;
pub use property::Property;

mod properties;
pub use properties::Properties;

mod duration;
pub use duration::{format_duration, parse_duration};
