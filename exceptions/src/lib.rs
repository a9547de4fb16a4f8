use std::ffi::c_void;

use jni::{
    objects::JObject,
    sys::{jint, JavaVM},
    JNIEnv,
};
use ndk_samples_jni_context::{
    catch_and_rethrow, init_logging, native_method, on_load, ExceptionSink, NativeMethod,
};
use thiserror::Error;

const MAIN_ACTIVITY: &str = "com/example/exceptions/MainActivity";

#[derive(Debug, Error)]
pub enum SampleError {
    #[error("{0}")]
    Runtime(String),
}

pub fn might_throw() -> Result<(), SampleError> {
    Err(SampleError::Runtime("A Rust runtime error".into()))
}

/// Runs [`might_throw`] and reports its failure to `sink`. Nothing, not even
/// a panic, is allowed to cross the JNI boundary.
pub fn throws_exception<S: ExceptionSink + ?Sized>(sink: &mut S) {
    catch_and_rethrow(sink, might_throw);
}

extern "system" fn throws_exception_jni(mut env: JNIEnv, _this: JObject) {
    throws_exception(&mut env);
}

fn native_methods() -> [NativeMethod; 1] {
    [native_method!("throwsException", "()V", throws_exception_jni)]
}

#[no_mangle]
#[allow(non_snake_case)]
#[allow(clippy::missing_safety_doc)]
pub unsafe extern "C" fn JNI_OnLoad(vm: *mut JavaVM, _reserved: *mut c_void) -> jint {
    init_logging("exceptions");
    on_load(vm, MAIN_ACTIVITY, &native_methods())
}
