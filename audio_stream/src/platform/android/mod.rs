mod sys;

use std::{
    ffi::{c_void, CStr},
    panic::{self, AssertUnwindSafe},
    ptr, slice,
};

use log::{error, warn};

use crate::{
    AudioBuffer, AudioCallback, CallbackResult, Direction, Error, PerformanceMode, Result,
    SampleFormat, SharingMode, StreamConfig, StreamFormat,
};

use self::sys::*;

struct CallbackState {
    callback: Box<dyn AudioCallback>,
    format: StreamFormat,
}

pub(crate) struct PlatformStream {
    stream: *mut AAudioStream,
    state: *mut CallbackState,
    format: StreamFormat,
}

// The stream handle is only used through AAudio calls, which are thread safe;
// the callback state is only touched by the audio thread once started.
unsafe impl Send for PlatformStream {}

struct Builder(*mut AAudioStreamBuilder);

impl Drop for Builder {
    fn drop(&mut self) {
        unsafe { AAudioStreamBuilder_delete(self.0) };
    }
}

fn check(operation: &'static str, code: aaudio_result_t) -> Result<()> {
    if code == AAUDIO_OK {
        Ok(())
    } else {
        let message = unsafe { CStr::from_ptr(AAudio_convertResultToText(code)) };
        Err(Error::AAudio {
            operation,
            code,
            message: message.to_string_lossy().into_owned(),
        })
    }
}

fn raw_format(format: SampleFormat) -> aaudio_format_t {
    match format {
        SampleFormat::I16 => AAUDIO_FORMAT_PCM_I16,
        SampleFormat::F32 => AAUDIO_FORMAT_PCM_FLOAT,
    }
}

impl PlatformStream {
    pub fn open(config: &StreamConfig, callback: Box<dyn AudioCallback>) -> Result<Self> {
        let mut builder = ptr::null_mut();
        check("AAudio_createStreamBuilder", unsafe {
            AAudio_createStreamBuilder(&mut builder)
        })?;
        let builder = Builder(builder);

        unsafe {
            AAudioStreamBuilder_setDirection(
                builder.0,
                match config.direction {
                    Direction::Output => AAUDIO_DIRECTION_OUTPUT,
                    Direction::Input => AAUDIO_DIRECTION_INPUT,
                },
            );
            AAudioStreamBuilder_setFormat(builder.0, raw_format(config.format));
            AAudioStreamBuilder_setChannelCount(builder.0, config.channel_count);
            if let Some(sample_rate) = config.sample_rate {
                AAudioStreamBuilder_setSampleRate(builder.0, sample_rate);
            }
            if let Some(frames) = config.frames_per_callback {
                AAudioStreamBuilder_setFramesPerDataCallback(builder.0, frames);
            }
            AAudioStreamBuilder_setSharingMode(
                builder.0,
                match config.sharing_mode {
                    SharingMode::Exclusive => AAUDIO_SHARING_MODE_EXCLUSIVE,
                    SharingMode::Shared => AAUDIO_SHARING_MODE_SHARED,
                },
            );
            AAudioStreamBuilder_setPerformanceMode(
                builder.0,
                match config.performance_mode {
                    PerformanceMode::None => AAUDIO_PERFORMANCE_MODE_NONE,
                    PerformanceMode::PowerSaving => AAUDIO_PERFORMANCE_MODE_POWER_SAVING,
                    PerformanceMode::LowLatency => AAUDIO_PERFORMANCE_MODE_LOW_LATENCY,
                },
            );
        }

        let state = Box::into_raw(Box::new(CallbackState {
            callback,
            format: StreamFormat {
                sample_rate: config.sample_rate.unwrap_or(0),
                channel_count: config.channel_count,
                format: config.format,
            },
        }));
        unsafe {
            AAudioStreamBuilder_setDataCallback(builder.0, Some(data_callback), state as *mut _);
            AAudioStreamBuilder_setErrorCallback(builder.0, Some(error_callback), ptr::null_mut());
        }

        let mut stream = ptr::null_mut();
        let opened = check("AAudioStreamBuilder_openStream", unsafe {
            AAudioStreamBuilder_openStream(builder.0, &mut stream)
        });
        if let Err(err) = opened {
            drop(unsafe { Box::from_raw(state) });
            return Err(err);
        }

        let raw_format = unsafe { AAudioStream_getFormat(stream) };
        let format = match raw_format {
            AAUDIO_FORMAT_PCM_I16 => SampleFormat::I16,
            AAUDIO_FORMAT_PCM_FLOAT => SampleFormat::F32,
            other => {
                unsafe { AAudioStream_close(stream) };
                drop(unsafe { Box::from_raw(state) });
                return Err(Error::UnexpectedFormat(other));
            }
        };
        let format = StreamFormat {
            sample_rate: unsafe { AAudioStream_getSampleRate(stream) },
            channel_count: unsafe { AAudioStream_getChannelCount(stream) },
            format,
        };
        // Stream is not started yet, the audio thread can't observe state.
        unsafe {
            (*state).format = format;
            (*state).callback.prepare(&format);
        }

        Ok(Self {
            stream,
            state,
            format,
        })
    }

    pub fn format(&self) -> StreamFormat {
        self.format
    }

    pub fn start(&mut self) -> Result<()> {
        check("AAudioStream_requestStart", unsafe {
            AAudioStream_requestStart(self.stream)
        })
    }

    pub fn stop(&mut self) -> Result<()> {
        check("AAudioStream_requestStop", unsafe {
            AAudioStream_requestStop(self.stream)
        })
    }
}

impl Drop for PlatformStream {
    fn drop(&mut self) {
        unsafe {
            AAudioStream_requestStop(self.stream);
            // Blocks until the data callback has returned for the last time.
            AAudioStream_close(self.stream);
            drop(Box::from_raw(self.state));
        }
    }
}

unsafe extern "C" fn data_callback(
    _stream: *mut AAudioStream,
    user_data: *mut c_void,
    audio_data: *mut c_void,
    num_frames: i32,
) -> aaudio_data_callback_result_t {
    let state = &mut *(user_data as *mut CallbackState);
    let len = num_frames.max(0) as usize * state.format.channel_count.max(0) as usize;
    let buffer = match state.format.format {
        SampleFormat::I16 => AudioBuffer::I16(slice::from_raw_parts_mut(audio_data as *mut i16, len)),
        SampleFormat::F32 => AudioBuffer::F32(slice::from_raw_parts_mut(audio_data as *mut f32, len)),
    };
    // Unwinding into the audio service is undefined behavior.
    match panic::catch_unwind(AssertUnwindSafe(|| state.callback.on_audio_ready(buffer))) {
        Ok(CallbackResult::Continue) => AAUDIO_CALLBACK_RESULT_CONTINUE,
        Ok(CallbackResult::Stop) => AAUDIO_CALLBACK_RESULT_STOP,
        Err(_) => {
            error!("Audio callback panicked, stopping stream");
            AAUDIO_CALLBACK_RESULT_STOP
        }
    }
}

unsafe extern "C" fn error_callback(
    _stream: *mut AAudioStream,
    _user_data: *mut c_void,
    error: aaudio_result_t,
) {
    let message = CStr::from_ptr(AAudio_convertResultToText(error));
    warn!("AAudio stream error: {}", message.to_string_lossy());
}
