use std::{ffi::c_void, sync::Mutex, time::Instant};

use jni::{
    objects::{JClass, JObject},
    sys::{jint, jlong, JavaVM},
    JNIEnv,
};
use log::{error, info};
use ndk_samples_jni_context::{init_logging, native_method, on_load, NativeMethod};
use once_cell::sync::Lazy;

mod error;
mod plasma;
mod platform;
mod stats;

pub use error::*;
pub use plasma::*;
pub use stats::*;

const PLASMA_VIEW: &str = "com/example/plasma/PlasmaView";

/// Geometry of a locked bitmap. `stride` is in bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BitmapInfo {
    pub width: usize,
    pub height: usize,
    pub stride: usize,
}

static STATS: Lazy<Mutex<FrameStats>> = Lazy::new(|| Mutex::new(FrameStats::new(Instant::now())));

pub fn render_plasma(env: &mut JNIEnv, bitmap: &JObject, time_ms: i64) -> Result<()> {
    let start = Instant::now();
    platform::with_rgb565_pixels(env, bitmap, |pixels, info| {
        fill_plasma(pixels, info.width, info.height, info.stride, time_ms as f64);
    })?;
    if let Some(report) = STATS.lock().unwrap().record(start.elapsed(), Instant::now()) {
        info!("{}", report);
    }
    Ok(())
}

extern "system" fn render_plasma_jni(
    mut env: JNIEnv,
    _class: JClass,
    bitmap: JObject,
    time_ms: jlong,
) {
    if let Err(err) = render_plasma(&mut env, &bitmap, time_ms) {
        error!("Unable to render plasma: {}", err);
    }
}

fn native_methods() -> [NativeMethod; 1] {
    [native_method!(
        "renderPlasma",
        "(Landroid/graphics/Bitmap;J)V",
        render_plasma_jni
    )]
}

#[no_mangle]
#[allow(non_snake_case)]
#[allow(clippy::missing_safety_doc)]
pub unsafe extern "C" fn JNI_OnLoad(vm: *mut JavaVM, _reserved: *mut c_void) -> jint {
    init_logging("bitmap-plasma");
    on_load(vm, PLASMA_VIEW, &native_methods())
}
