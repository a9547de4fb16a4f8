use std::{
    ffi::{c_long, c_void},
    ptr::{null_mut, NonNull},
    slice,
    time::Instant,
};

use android_activity::{AndroidApp, MainEvent, PollEvent};
use log::{error, info};
use ndk_samples_jni_context::{fatal, init_logging};
use ndk_sys::{
    AChoreographer_getInstance, AChoreographer_postFrameCallback, AHardwareBuffer_Format,
    ANativeWindow_Buffer, ANativeWindow_lock, ANativeWindow_setBuffersGeometry,
    ANativeWindow_unlockAndPost,
};

use crate::{fill_solid, Engine, Frame};

struct NativeActivity {
    app: AndroidApp,
    engine: Engine,
}

impl NativeActivity {
    fn attach_window(&mut self) {
        let geometry_set = match self.app.native_window() {
            Some(window) => {
                // Zero width and height keep the window's own size.
                let res = unsafe {
                    ANativeWindow_setBuffersGeometry(
                        window.ptr().as_ptr(),
                        0,
                        0,
                        AHardwareBuffer_Format::AHARDWAREBUFFER_FORMAT_R8G8B8X8_UNORM.0 as i32,
                    )
                };
                if res < 0 {
                    error!("Unable to set window buffer geometry ({})", res);
                }
                res >= 0
            }
            None => {
                error!("Window initialized but not available");
                false
            }
        };
        self.engine.attach_window(geometry_set, Instant::now());
    }

    fn resume(&mut self) {
        if self.engine.resume() {
            self.schedule_next_tick();
        }
    }

    // Frame callbacks are one-shot and have to be posted again every tick.
    fn schedule_next_tick(&mut self) {
        unsafe {
            let choreographer = AChoreographer_getInstance();
            if choreographer.is_null() {
                error!("No Choreographer for this thread");
                return;
            }
            AChoreographer_postFrameCallback(
                choreographer,
                Some(tick),
                self as *mut Self as *mut c_void,
            );
        }
    }

    fn do_tick(&mut self) {
        let Some(frame) = self.engine.tick(Instant::now()) else {
            return;
        };
        self.schedule_next_tick();
        self.draw_frame(frame);
    }

    fn draw_frame(&self, frame: Frame) {
        let Some(window) = self.app.native_window() else {
            error!("Attempted to draw frame but there is no window attached");
            return;
        };
        let window = window.ptr().as_ptr();
        let mut buffer: ANativeWindow_Buffer = unsafe { std::mem::zeroed() };
        if unsafe { ANativeWindow_lock(window, &mut buffer, null_mut()) } < 0 {
            error!("Unable to lock window buffer");
            return;
        }
        // Without our geometry the buffer format is unknown.
        if frame.fill && !buffer.bits.is_null() {
            let len = (buffer.stride.max(0) * buffer.height.max(0)) as usize;
            let pixels = unsafe { slice::from_raw_parts_mut(buffer.bits as *mut u32, len) };
            fill_solid(
                pixels,
                buffer.width.max(0) as usize,
                buffer.height.max(0) as usize,
                buffer.stride.max(0) as usize,
                frame.color,
            );
        }
        unsafe { ANativeWindow_unlockAndPost(window) };
    }

    fn handle_event(&mut self, event: MainEvent) -> bool {
        match event {
            MainEvent::InitWindow { .. } => self.attach_window(),
            MainEvent::TerminateWindow { .. } => self.engine.detach_window(),
            MainEvent::GainedFocus => self.resume(),
            MainEvent::LostFocus => self.engine.pause(),
            MainEvent::Destroy => return true,
            _ => {}
        }
        false
    }
}

/// Choreographer entry point. `data` is the `NativeActivity` that posted
/// the callback.
unsafe extern "C" fn tick(_frame_time_nanos: c_long, data: *mut c_void) {
    let Some(mut activity) = NonNull::new(data as *mut NativeActivity) else {
        fatal!("{}:{}: frame callback data must not be null", file!(), line!());
    };
    activity.as_mut().do_tick();
}

#[no_mangle]
fn android_main(app: AndroidApp) {
    init_logging("native-activity");
    info!("native-activity started");

    // Shared with Choreographer callbacks, which run on this thread from
    // inside `poll_events`. Accessed through the raw pointer only, one short
    // borrow at a time.
    let activity = Box::into_raw(Box::new(NativeActivity {
        app: app.clone(),
        engine: Engine::new(Instant::now()),
    }));

    let mut destroy_requested = false;
    while !destroy_requested {
        // Update and render are driven by Choreographer, so block until
        // something happens.
        app.poll_events(None, |event| {
            if let PollEvent::Main(event) = event {
                if unsafe { &mut *activity }.handle_event(event) {
                    destroy_requested = true;
                }
            }
        });
    }

    // The looper is not polled again, so no posted tick can still run.
    let mut activity = unsafe { Box::from_raw(activity) };
    activity.engine.pause();
    info!("native-activity destroyed");
}
