use std::{
    ffi::c_void,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    },
};

use jni::{
    objects::JObject,
    sys::{jboolean, jint, JavaVM, JNI_FALSE},
    JNIEnv,
};
use log::{error, info};
use ndk_samples_audio_stream::{
    AAudioBackend, AudioBackend, PerformanceMode, SampleFormat, SharingMode, Stream, StreamConfig,
};
use ndk_samples_jni_context::{init_logging, native_method, on_load, NativeMethod, OkLog};
use once_cell::sync::Lazy;

mod sine;

pub use sine::*;

const MAIN_ACTIVITY: &str = "com/google/example/hellooboe/MainActivity";

const CHANNEL_COUNT: i32 = 2;

/// Low latency output stream playing [`SineGenerator`].
pub struct SinePlayer {
    stream: Box<dyn Stream>,
    enabled: Arc<AtomicBool>,
}

impl SinePlayer {
    pub fn new<B: AudioBackend + ?Sized>(backend: &B) -> ndk_samples_audio_stream::Result<Self> {
        let enabled = Arc::new(AtomicBool::new(false));
        let config = StreamConfig::output(SampleFormat::F32, CHANNEL_COUNT)
            .with_sharing_mode(SharingMode::Exclusive)
            .with_performance_mode(PerformanceMode::LowLatency);
        let mut stream = backend.open_stream(&config, Box::new(SineGenerator::new(enabled.clone())))?;
        stream.start()?;
        info!("Sine stream started: {:?}", stream.format());
        Ok(Self { stream, enabled })
    }

    pub fn enable(&self, enable: bool) {
        self.enabled.store(enable, Ordering::Relaxed);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }
}

impl Drop for SinePlayer {
    fn drop(&mut self) {
        self.stream.stop().ok_log();
    }
}

static PLAYER: Lazy<Mutex<Option<SinePlayer>>> = Lazy::new(|| Mutex::new(None));

/// Creates the playback stream, replacing any previous one.
/// Returns 0 on success, -1 on failure.
pub fn create_stream<B: AudioBackend + ?Sized>(backend: &B) -> jint {
    let mut player = PLAYER.lock().unwrap();
    player.take();
    match SinePlayer::new(backend) {
        Ok(new_player) => {
            player.replace(new_player);
            0
        }
        Err(err) => {
            error!("Unable to create sine stream: {}", err);
            -1
        }
    }
}

pub fn destroy_stream() {
    PLAYER.lock().unwrap().take();
}

/// Turns the tone on or off. Returns 0 on success, -1 when no stream was
/// created.
pub fn play_sound(enable: bool) -> jint {
    match PLAYER.lock().unwrap().as_ref() {
        Some(player) => {
            player.enable(enable);
            0
        }
        None => -1,
    }
}

extern "system" fn create_stream_jni(_env: JNIEnv, _this: JObject) -> jint {
    create_stream(&AAudioBackend)
}

extern "system" fn destroy_stream_jni(_env: JNIEnv, _this: JObject) {
    destroy_stream();
}

extern "system" fn play_sound_jni(_env: JNIEnv, _this: JObject, enable: jboolean) -> jint {
    play_sound(enable != JNI_FALSE)
}

fn native_methods() -> [NativeMethod; 3] {
    [
        native_method!("createStream", "()I", create_stream_jni),
        native_method!("destroyStream", "()V", destroy_stream_jni),
        native_method!("playSound", "(Z)I", play_sound_jni),
    ]
}

#[no_mangle]
#[allow(non_snake_case)]
#[allow(clippy::missing_safety_doc)]
pub unsafe extern "C" fn JNI_OnLoad(vm: *mut JavaVM, _reserved: *mut c_void) -> jint {
    init_logging("hello-oboe");
    on_load(vm, MAIN_ACTIVITY, &native_methods())
}
