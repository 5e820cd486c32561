//! Standalone helpers for the build wrapper: a resettable delay timer,
//! a printer for nested values, and lexical path utilities.
pub mod alarm;
pub mod error;
pub mod path;
pub mod printer;

pub use error::{CoreError, CoreResult};

pub mod prelude {
    pub use crate::alarm::Alarm;
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::printer::{StructurePrinter, Value, render, render_lines};
}
