use std::{ffi::c_void, sync::Mutex};

use jni::{
    objects::JClass,
    sys::{jboolean, jfloat, jint, jlong, JavaVM, JNI_FALSE, JNI_TRUE},
    JNIEnv,
};
use log::{error, warn};
use ndk_samples_audio_stream::AAudioBackend;
use ndk_samples_jni_context::{init_logging, native_method, on_load, NativeMethod, OkLog};
use once_cell::sync::Lazy;

mod delay;
mod engine;
mod queue;

pub use delay::*;
pub use engine::*;
pub use queue::*;

const MAIN_ACTIVITY: &str = "com/google/sample/echo/MainActivity";

static ENGINE: Lazy<Mutex<Option<EchoEngine<AAudioBackend>>>> = Lazy::new(|| Mutex::new(None));

pub fn create_engine(config: EchoConfig) {
    let mut engine = ENGINE.lock().unwrap();
    // Streams of a previous engine go away first.
    engine.take();
    *engine = EchoEngine::new(AAudioBackend, config).ok_log();
}

pub fn delete_engine() {
    ENGINE.lock().unwrap().take();
}

fn with_engine<T>(
    operation: &str,
    f: impl FnOnce(&mut EchoEngine<AAudioBackend>) -> T,
) -> Option<T> {
    match ENGINE.lock().unwrap().as_mut() {
        Some(engine) => Some(f(engine)),
        None => {
            warn!("{}: echo engine not created", operation);
            None
        }
    }
}

pub fn create_player() -> bool {
    with_engine("createPlayer", |engine| engine.create_player().ok_log())
        .flatten()
        .is_some()
}

pub fn delete_player() {
    with_engine("deletePlayer", EchoEngine::delete_player);
}

pub fn create_recorder() -> bool {
    with_engine("createRecorder", |engine| engine.create_recorder().ok_log())
        .flatten()
        .is_some()
}

pub fn delete_recorder() {
    with_engine("deleteRecorder", EchoEngine::delete_recorder);
}

pub fn start_play() {
    with_engine("startPlay", |engine| {
        if let Err(err) = engine.start_play() {
            error!("Unable to start echo: {}", err);
        }
    });
}

pub fn stop_play() {
    with_engine("stopPlay", EchoEngine::stop_play);
}

pub fn configure_echo(delay_ms: i32, decay: f32) -> bool {
    with_engine("configureEcho", |engine| engine.configure_echo(delay_ms, decay)).unwrap_or(false)
}

fn to_jboolean(value: bool) -> jboolean {
    if value {
        JNI_TRUE
    } else {
        JNI_FALSE
    }
}

extern "system" fn create_sl_engine_jni(
    _env: JNIEnv,
    _class: JClass,
    sample_rate: jint,
    frames_per_buffer: jint,
    delay_ms: jlong,
    decay: jfloat,
) {
    create_engine(EchoConfig {
        sample_rate,
        frames_per_buffer,
        delay_ms,
        decay,
    });
}

extern "system" fn delete_sl_engine_jni(_env: JNIEnv, _class: JClass) {
    delete_engine();
}

extern "system" fn create_player_jni(_env: JNIEnv, _class: JClass) -> jboolean {
    to_jboolean(create_player())
}

extern "system" fn delete_player_jni(_env: JNIEnv, _class: JClass) {
    delete_player();
}

extern "system" fn create_recorder_jni(_env: JNIEnv, _class: JClass) -> jboolean {
    to_jboolean(create_recorder())
}

extern "system" fn delete_recorder_jni(_env: JNIEnv, _class: JClass) {
    delete_recorder();
}

extern "system" fn start_play_jni(_env: JNIEnv, _class: JClass) {
    start_play();
}

extern "system" fn stop_play_jni(_env: JNIEnv, _class: JClass) {
    stop_play();
}

extern "system" fn configure_echo_jni(
    _env: JNIEnv,
    _class: JClass,
    delay_ms: jint,
    decay: jfloat,
) -> jboolean {
    to_jboolean(configure_echo(delay_ms, decay))
}

// Method names are fixed by the Java side, which predates the move away
// from OpenSL ES.
fn native_methods() -> [NativeMethod; 9] {
    [
        native_method!("createSLEngine", "(IIJF)V", create_sl_engine_jni),
        native_method!("deleteSLEngine", "()V", delete_sl_engine_jni),
        native_method!("createSLBufferQueueAudioPlayer", "()Z", create_player_jni),
        native_method!("deleteSLBufferQueueAudioPlayer", "()V", delete_player_jni),
        native_method!("createAudioRecorder", "()Z", create_recorder_jni),
        native_method!("deleteAudioRecorder", "()V", delete_recorder_jni),
        native_method!("startPlay", "()V", start_play_jni),
        native_method!("stopPlay", "()V", stop_play_jni),
        native_method!("configureEcho", "(IF)Z", configure_echo_jni),
    ]
}

#[no_mangle]
#[allow(non_snake_case)]
#[allow(clippy::missing_safety_doc)]
pub unsafe extern "C" fn JNI_OnLoad(vm: *mut JavaVM, _reserved: *mut c_void) -> jint {
    init_logging("audio-echo");
    on_load(vm, MAIN_ACTIVITY, &native_methods())
}
