use std::ffi::c_void;

use jni::{
    objects::JObject,
    sys::{jint, JavaVM},
    JNIEnv,
};
use ndk_samples_jni_context::{init_logging, native_method, on_load, NativeMethod};

pub mod adder;

const MAIN_ACTIVITY: &str = "com/example/unittest/MainActivity";

extern "system" fn add(_env: JNIEnv, _this: JObject, a: jint, b: jint) -> jint {
    adder::add(a, b)
}

fn native_methods() -> [NativeMethod; 1] {
    [native_method!("add", "(II)I", add)]
}

#[no_mangle]
#[allow(non_snake_case)]
#[allow(clippy::missing_safety_doc)]
pub unsafe extern "C" fn JNI_OnLoad(vm: *mut JavaVM, _reserved: *mut c_void) -> jint {
    init_logging("unit-test");
    on_load(vm, MAIN_ACTIVITY, &native_methods())
}
