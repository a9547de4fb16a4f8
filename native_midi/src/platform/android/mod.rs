use std::ptr::null_mut;

use jni::{objects::JObject, JNIEnv};
use log::warn;

use crate::{Error, MidiSource, Result};

mod sys;

fn check(operation: &'static str, status: sys::media_status_t) -> Result<()> {
    if status == sys::AMEDIA_OK {
        Ok(())
    } else {
        Err(Error::AMidi { operation, status })
    }
}

/// Output port of a `android.media.midi.MidiDevice`, i.e. the port the
/// device sends its data through.
pub(crate) struct OutputPort {
    device: *mut sys::AMidiDevice,
    port: *mut sys::AMidiOutputPort,
}

// AMidi handles are not tied to the thread that opened them.
unsafe impl Send for OutputPort {}

impl OutputPort {
    pub fn open(env: &mut JNIEnv, device: &JObject, port_number: i32) -> Result<Self> {
        let mut native_device = null_mut();
        check("AMidiDevice_fromJava", unsafe {
            sys::AMidiDevice_fromJava(env.get_raw(), device.as_raw(), &mut native_device)
        })?;
        let mut port = null_mut();
        let res = check("AMidiOutputPort_open", unsafe {
            sys::AMidiOutputPort_open(native_device, port_number, &mut port)
        });
        if let Err(err) = res {
            unsafe { sys::AMidiDevice_release(native_device) };
            return Err(err);
        }
        Ok(Self {
            device: native_device,
            port,
        })
    }
}

impl MidiSource for OutputPort {
    fn receive(&mut self, buffer: &mut [u8]) -> Result<Option<usize>> {
        let mut opcode = 0;
        let mut received = 0;
        let mut timestamp = 0;
        let count = unsafe {
            sys::AMidiOutputPort_receive(
                self.port,
                &mut opcode,
                buffer.as_mut_ptr(),
                buffer.len(),
                &mut received,
                &mut timestamp,
            )
        };
        if count < 0 {
            return Err(Error::AMidi {
                operation: "AMidiOutputPort_receive",
                status: count as i32,
            });
        }
        // Flush notifications carry no data.
        if count == 0 || opcode != sys::AMIDI_OPCODE_DATA {
            return Ok(None);
        }
        Ok(Some(received))
    }
}

impl Drop for OutputPort {
    fn drop(&mut self) {
        unsafe {
            sys::AMidiOutputPort_close(self.port);
            let status = sys::AMidiDevice_release(self.device);
            if status != sys::AMEDIA_OK {
                warn!("AMidiDevice_release failed ({})", status);
            }
        }
    }
}
