#![allow(clippy::new_without_default)]

mod context;
mod error;
mod exception;
mod fatal;
mod logging;
mod registry;

pub use context::*;
pub use error::*;
pub use exception::*;
pub use fatal::*;
pub use logging::*;
pub use registry::*;

pub type Result<T> = std::result::Result<T, Error>;
