mod engine;

#[cfg(target_os = "android")]
mod android;

pub use engine::*;
