// Only the slice of <amidi/AMidi.h> the reader needs.
#![allow(non_camel_case_types)]

use jni::sys::{jobject, JNIEnv};

#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct AMidiDevice {
    _unused: [u8; 0],
}

#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct AMidiOutputPort {
    _unused: [u8; 0],
}

pub type media_status_t = i32;

pub const AMEDIA_OK: media_status_t = 0;

pub const AMIDI_OPCODE_DATA: i32 = 1;

#[link(name = "amidi")]
extern "C" {
    pub fn AMidiDevice_fromJava(
        env: *mut JNIEnv,
        midi_device_obj: jobject,
        out_device_ptr_ptr: *mut *mut AMidiDevice,
    ) -> media_status_t;
    pub fn AMidiDevice_release(midi_device: *const AMidiDevice) -> media_status_t;
    pub fn AMidiOutputPort_open(
        midi_device: *const AMidiDevice,
        port_number: i32,
        out_output_port_ptr: *mut *mut AMidiOutputPort,
    ) -> media_status_t;
    pub fn AMidiOutputPort_close(output_port: *const AMidiOutputPort);
    pub fn AMidiOutputPort_receive(
        output_port: *const AMidiOutputPort,
        opcode_ptr: *mut i32,
        buffer: *mut u8,
        max_bytes: usize,
        num_bytes_received_ptr: *mut usize,
        out_timestamp_ptr: *mut i64,
    ) -> isize;
}
