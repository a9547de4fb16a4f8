use std::{
    any::Any,
    fmt::Display,
    panic::{self, AssertUnwindSafe},
};

use jni::JNIEnv;
use log::error;

/// Message used when a panic payload carries no readable message.
pub const CATCH_ALL_MESSAGE: &str = "Catch-all";

/// Receiver for exceptions raised on the managed side of the boundary.
pub trait ExceptionSink {
    fn throw_runtime_exception(&mut self, message: &str);
}

impl<'local> ExceptionSink for JNIEnv<'local> {
    fn throw_runtime_exception(&mut self, message: &str) {
        if let Err(err) = self.throw_new("java/lang/RuntimeException", message) {
            error!("Unable to throw RuntimeException({}): {}", message, err);
        }
    }
}

/// Runs `f` and converts every failure into a `RuntimeException` on `sink`.
///
/// An `Err` is thrown with its `Display` message. A panic is caught so it
/// never unwinds into the VM; string payloads keep their message and any
/// other payload is reported as [`CATCH_ALL_MESSAGE`].
///
/// Returns the value produced by `f`, or `None` if an exception was thrown.
pub fn catch_and_rethrow<S, T, E, F>(sink: &mut S, f: F) -> Option<T>
where
    S: ExceptionSink + ?Sized,
    E: Display,
    F: FnOnce() -> Result<T, E>,
{
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(value)) => Some(value),
        Ok(Err(err)) => {
            sink.throw_runtime_exception(&err.to_string());
            None
        }
        Err(payload) => {
            sink.throw_runtime_exception(panic_message(payload.as_ref()));
            None
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        CATCH_ALL_MESSAGE
    }
}
