use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread::{self, JoinHandle},
    time::Duration,
};

use log::{debug, error};

use crate::{MidiFramer, Result};

const POLL_INTERVAL: Duration = Duration::from_millis(1);
const PACKET_SIZE: usize = 1024;

/// Where raw MIDI bytes come from.
pub trait MidiSource: Send + 'static {
    /// Copies the next pending packet into `buffer`. Returns `None` when
    /// nothing is pending.
    fn receive(&mut self, buffer: &mut [u8]) -> Result<Option<usize>>;
}

/// Receives complete MIDI messages.
pub trait MidiSink: Send + 'static {
    fn on_message(&mut self, message: &[u8]);
}

/// Background thread pumping a [`MidiSource`] through a [`MidiFramer`] into
/// a [`MidiSink`]. Stopped and joined on [`MidiReader::stop`] or drop.
pub struct MidiReader {
    stop: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl MidiReader {
    pub fn spawn<S: MidiSource, K: MidiSink>(source: S, sink: K) -> std::io::Result<Self> {
        let stop = Arc::new(AtomicBool::new(false));
        let thread = thread::Builder::new().name("midi-reader".into()).spawn({
            let stop = stop.clone();
            move || read_loop(source, sink, &stop)
        })?;
        Ok(Self {
            stop,
            thread: Some(thread),
        })
    }

    pub fn is_running(&self) -> bool {
        self.thread.as_ref().map_or(false, |t| !t.is_finished())
    }

    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.stop.store(true, Ordering::Release);
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                error!("MIDI reader thread panicked");
            }
        }
    }
}

impl Drop for MidiReader {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn read_loop<S: MidiSource, K: MidiSink>(mut source: S, mut sink: K, stop: &AtomicBool) {
    debug!("MIDI reader started");
    let mut framer = MidiFramer::new();
    let mut buffer = [0u8; PACKET_SIZE];
    while !stop.load(Ordering::Acquire) {
        match source.receive(&mut buffer) {
            Ok(Some(len)) => {
                framer.feed(&buffer[..len.min(PACKET_SIZE)], |m| sink.on_message(m));
            }
            Ok(None) => thread::sleep(POLL_INTERVAL),
            Err(err) => {
                error!("MIDI receive failed: {}", err);
                break;
            }
        }
    }
    debug!("MIDI reader stopped");
}
