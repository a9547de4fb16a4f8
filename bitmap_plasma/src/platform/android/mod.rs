use std::{ffi::c_void, ptr::null_mut};

use jni::{objects::JObject, JNIEnv};
use log::warn;

use crate::{BitmapInfo, Error, Result};

mod sys;

/// Locks the pixels of an RGB_565 `android.graphics.Bitmap` for the
/// duration of `f`.
pub(crate) fn with_rgb565_pixels<F>(env: &mut JNIEnv, bitmap: &JObject, f: F) -> Result<()>
where
    F: FnOnce(&mut [u8], &BitmapInfo),
{
    let raw_env = env.get_raw();
    let raw_bitmap = bitmap.as_raw();

    let mut info = sys::AndroidBitmapInfo::default();
    let res = unsafe { sys::AndroidBitmap_getInfo(raw_env, raw_bitmap, &mut info) };
    if res != sys::ANDROID_BITMAP_RESULT_SUCCESS {
        return Err(Error::BitmapInfo(res));
    }
    if info.format != sys::ANDROID_BITMAP_FORMAT_RGB_565 {
        return Err(Error::UnsupportedFormat(info.format));
    }

    let mut pixels: *mut c_void = null_mut();
    let res = unsafe { sys::AndroidBitmap_lockPixels(raw_env, raw_bitmap, &mut pixels) };
    if res != sys::ANDROID_BITMAP_RESULT_SUCCESS {
        return Err(Error::LockPixels(res));
    }

    let info = BitmapInfo {
        width: info.width as usize,
        height: info.height as usize,
        stride: info.stride as usize,
    };
    if !pixels.is_null() {
        let len = info.stride * info.height;
        let data = unsafe { std::slice::from_raw_parts_mut(pixels as *mut u8, len) };
        f(data, &info);
    }

    let res = unsafe { sys::AndroidBitmap_unlockPixels(raw_env, raw_bitmap) };
    if res != sys::ANDROID_BITMAP_RESULT_SUCCESS {
        warn!("AndroidBitmap_unlockPixels failed ({})", res);
    }
    Ok(())
}
