// Only the slice of <android/bitmap.h> the plasma needs.
#![allow(non_camel_case_types)]

use std::ffi::c_void;

use jni::sys::{jobject, JNIEnv};

pub const ANDROID_BITMAP_RESULT_SUCCESS: i32 = 0;

pub const ANDROID_BITMAP_FORMAT_RGB_565: i32 = 4;

#[repr(C)]
#[derive(Debug, Default, Copy, Clone)]
pub struct AndroidBitmapInfo {
    pub width: u32,
    pub height: u32,
    pub stride: u32,
    pub format: i32,
    pub flags: u32,
}

#[link(name = "jnigraphics")]
extern "C" {
    pub fn AndroidBitmap_getInfo(
        env: *mut JNIEnv,
        jbitmap: jobject,
        info: *mut AndroidBitmapInfo,
    ) -> i32;
    pub fn AndroidBitmap_lockPixels(
        env: *mut JNIEnv,
        jbitmap: jobject,
        addr_ptr: *mut *mut c_void,
    ) -> i32;
    pub fn AndroidBitmap_unlockPixels(env: *mut JNIEnv, jbitmap: jobject) -> i32;
}
