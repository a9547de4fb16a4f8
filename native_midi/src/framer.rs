//! Splits a raw MIDI byte stream into complete messages.

const SYSEX_START: u8 = 0xf0;
const SYSEX_END: u8 = 0xf7;
const REALTIME_FIRST: u8 = 0xf8;

/// Number of data bytes that follow a status byte.
fn data_length(status: u8) -> usize {
    match status {
        0x80..=0xbf => 2,
        0xc0..=0xdf => 1,
        0xe0..=0xef => 2,
        0xf1 | 0xf3 => 1,
        0xf2 => 2,
        _ => 0,
    }
}

/// Reassembles MIDI messages that may arrive split across packets.
///
/// Running status is honoured for channel messages. System real-time bytes
/// are emitted on their own as soon as they are seen, even in the middle of
/// another message. SysEx is collected from `0xF0` up to and including
/// `0xF7`; any other status byte aborts an unterminated SysEx.
#[derive(Debug, Default)]
pub struct MidiFramer {
    running_status: Option<u8>,
    message: Vec<u8>,
    expected: usize,
    in_sysex: bool,
}

impl MidiFramer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed<F>(&mut self, bytes: &[u8], mut emit: F)
    where
        F: FnMut(&[u8]),
    {
        for &byte in bytes {
            if byte >= REALTIME_FIRST {
                emit(&[byte]);
            } else if byte & 0x80 != 0 {
                self.status(byte, &mut emit);
            } else {
                self.data(byte, &mut emit);
            }
        }
    }

    fn status<F: FnMut(&[u8])>(&mut self, status: u8, emit: &mut F) {
        if self.in_sysex {
            self.in_sysex = false;
            if status == SYSEX_END {
                self.message.push(status);
                emit(&self.message);
                self.message.clear();
                return;
            }
            log::debug!("Dropping unterminated SysEx of {} bytes", self.message.len());
        }
        self.message.clear();
        match status {
            SYSEX_START => {
                self.running_status = None;
                self.in_sysex = true;
                self.message.push(status);
            }
            // Stray end of SysEx.
            SYSEX_END => {}
            0xf1..=0xf6 => {
                self.running_status = None;
                self.begin(status, emit);
            }
            _ => {
                self.running_status = Some(status);
                self.begin(status, emit);
            }
        }
    }

    fn begin<F: FnMut(&[u8])>(&mut self, status: u8, emit: &mut F) {
        self.message.push(status);
        self.expected = data_length(status);
        if self.expected == 0 {
            emit(&self.message);
            self.message.clear();
        }
    }

    fn data<F: FnMut(&[u8])>(&mut self, byte: u8, emit: &mut F) {
        if self.in_sysex {
            self.message.push(byte);
            return;
        }
        if self.message.is_empty() {
            match self.running_status {
                Some(status) => {
                    self.message.push(status);
                    self.expected = data_length(status);
                }
                // Data without a status, nothing to attach it to.
                None => return,
            }
        }
        self.message.push(byte);
        if self.message.len() > self.expected {
            emit(&self.message);
            self.message.clear();
        }
    }
}
