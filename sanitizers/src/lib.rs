use std::ffi::c_void;

use jni::{
    objects::JObject,
    sys::{jint, jstring, JavaVM},
    JNIEnv,
};
use log::error;
use ndk_samples_jni_context::{init_logging, native_method, on_load, NativeMethod};

mod faults;

const MAIN_ACTIVITY: &str = "com/example/sanitizers/MainActivity";

pub const GREETING: &str = "Hello from Rust";

/// Produces the greeting, running the deliberately broken code first when
/// the `fault-injection` feature is enabled.
pub fn greeting() -> &'static str {
    faults::trigger();
    GREETING
}

extern "system" fn string_from_jni(mut env: JNIEnv, _this: JObject) -> jstring {
    match env.new_string(greeting()) {
        Ok(string) => string.into_raw(),
        Err(err) => {
            error!("Unable to create Java string: {}", err);
            std::ptr::null_mut()
        }
    }
}

fn native_methods() -> [NativeMethod; 1] {
    [native_method!(
        "stringFromJNI",
        "()Ljava/lang/String;",
        string_from_jni
    )]
}

#[no_mangle]
#[allow(non_snake_case)]
#[allow(clippy::missing_safety_doc)]
pub unsafe extern "C" fn JNI_OnLoad(vm: *mut JavaVM, _reserved: *mut c_void) -> jint {
    init_logging("sanitizers");
    on_load(vm, MAIN_ACTIVITY, &native_methods())
}
