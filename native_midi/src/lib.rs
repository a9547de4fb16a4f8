use std::{ffi::c_void, sync::Mutex};

use jni::{
    objects::{GlobalRef, JMethodID, JObject, JValue},
    signature::{Primitive, ReturnType},
    sys::{jint, JavaVM},
    JNIEnv,
};
use log::{debug, error, info};
use ndk_samples_jni_context::{init_logging, native_method, on_load, JniContext, NativeMethod, OkLog};
use once_cell::sync::Lazy;

mod error;
mod framer;
mod platform;
mod reader;

pub use error::*;
pub use framer::*;
pub use reader::*;

const MAIN_ACTIVITY: &str = "com/example/nativemidi/MainActivity";
const RECEIVE_METHOD: &str = "onNativeMessageReceive";
const RECEIVE_SIGNATURE: &str = "([B)V";

/// Java object and method that received MIDI messages are delivered to.
#[derive(Clone)]
struct JavaCallback {
    target: GlobalRef,
    method: JMethodID,
}

static CALLBACK: Lazy<Mutex<Option<JavaCallback>>> = Lazy::new(|| Mutex::new(None));

static READER: Lazy<Mutex<Option<MidiReader>>> = Lazy::new(|| Mutex::new(None));

/// Makes `activity.onNativeMessageReceive(byte[])` the destination of
/// received messages, replacing any previous destination.
pub fn init_native(env: &mut JNIEnv, activity: &JObject) -> Result<()> {
    let class = env.find_class(MAIN_ACTIVITY)?;
    let method = env.get_method_id(&class, RECEIVE_METHOD, RECEIVE_SIGNATURE)?;
    let target = env.new_global_ref(activity)?;
    CALLBACK
        .lock()
        .unwrap()
        .replace(JavaCallback { target, method });
    Ok(())
}

/// Delivers messages to the callback registered through [`init_native`].
/// The calling thread is attached to the VM on first use.
pub struct JavaSink;

impl JavaSink {
    fn deliver(message: &[u8]) -> Result<()> {
        let callback = CALLBACK.lock().unwrap().clone();
        let Some(callback) = callback else {
            debug!("No MIDI callback registered, dropping {} bytes", message.len());
            return Ok(());
        };
        let vm = JniContext::get()?.java_vm();
        let mut env = vm.attach_current_thread_permanently()?;
        env.with_local_frame(4, |env| -> Result<()> {
            let array = env.byte_array_from_slice(message)?;
            let res = unsafe {
                env.call_method_unchecked(
                    callback.target.as_obj(),
                    callback.method,
                    ReturnType::Primitive(Primitive::Void),
                    &[JValue::Object(&array).as_jni()],
                )
            };
            if res.is_err() && env.exception_check()? {
                env.exception_describe()?;
                env.exception_clear()?;
            }
            res?;
            Ok(())
        })
    }
}

impl MidiSink for JavaSink {
    fn on_message(&mut self, message: &[u8]) {
        Self::deliver(message).ok_log();
    }
}

/// Starts reading `source` on a background thread, replacing the current
/// reader.
pub fn start_reading<S: MidiSource, K: MidiSink>(source: S, sink: K) -> Result<()> {
    let mut reader = READER.lock().unwrap();
    if let Some(previous) = reader.take() {
        previous.stop();
    }
    reader.replace(MidiReader::spawn(source, sink)?);
    info!("Reading MIDI");
    Ok(())
}

/// Stops and joins the reader thread. The port closes with it.
pub fn stop_reading() {
    if let Some(reader) = READER.lock().unwrap().take() {
        reader.stop();
        info!("Stopped reading MIDI");
    }
}

extern "system" fn init_native_jni(mut env: JNIEnv, this: JObject) {
    if let Err(err) = init_native(&mut env, &this) {
        error!("Unable to set up MIDI callback: {}", err);
    }
}

extern "system" fn start_reading_midi_jni(
    mut env: JNIEnv,
    _this: JObject,
    device: JObject,
    port_number: jint,
) {
    let res = platform::OutputPort::open(&mut env, &device, port_number)
        .and_then(|port| start_reading(port, JavaSink));
    if let Err(err) = res {
        error!("Unable to start reading MIDI: {}", err);
    }
}

extern "system" fn stop_reading_midi_jni(_env: JNIEnv, _this: JObject) {
    stop_reading();
}

fn native_methods() -> [NativeMethod; 3] {
    [
        native_method!("initNative", "()V", init_native_jni),
        native_method!(
            "startReadingMidi",
            "(Landroid/media/midi/MidiDevice;I)V",
            start_reading_midi_jni
        ),
        native_method!("stopReadingMidi", "()V", stop_reading_midi_jni),
    ]
}

#[no_mangle]
#[allow(non_snake_case)]
#[allow(clippy::missing_safety_doc)]
pub unsafe extern "C" fn JNI_OnLoad(vm: *mut JavaVM, _reserved: *mut c_void) -> jint {
    init_logging("native-midi");
    on_load(vm, MAIN_ACTIVITY, &native_methods())
}
