#[cfg(target_os = "android")]
mod android;
#[cfg(target_os = "android")]
pub(crate) use android::*;

#[cfg(not(target_os = "android"))]
mod unsupported;
#[cfg(not(target_os = "android"))]
pub(crate) use unsupported::*;
