use std::sync::{Arc, Mutex};

use log::{debug, info};
use ndk_samples_audio_stream::{
    AudioBackend, AudioBuffer, AudioCallback, CallbackResult, SampleFormat, Stream, StreamConfig,
};
use ndk_samples_jni_context::OkLog;
use thiserror::Error;

use crate::{delay::AudioDelay, queue::SampleQueue};

/// How much recorded audio may wait for the player before the oldest is
/// dropped.
const QUEUE_CAPACITY_MS: i64 = 500;

#[derive(Debug, Error)]
pub enum EchoError {
    #[error("invalid stream parameters: {sample_rate} Hz, {frames_per_buffer} frames per buffer")]
    InvalidFormat {
        sample_rate: i32,
        frames_per_buffer: i32,
    },
    #[error("invalid echo settings: {delay_ms} ms, decay {decay}")]
    InvalidEcho { delay_ms: i64, decay: f32 },
    #[error("player and recorder must be created before playback")]
    NotCreated,
    #[error(transparent)]
    Stream(#[from] ndk_samples_audio_stream::Error),
}

/// Parameters passed from Java when the engine is created.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EchoConfig {
    pub sample_rate: i32,
    pub frames_per_buffer: i32,
    pub delay_ms: i64,
    pub decay: f32,
}

/// Recorder and player sharing a sample queue, with the echo applied on the
/// playback side.
pub struct EchoEngine<B: AudioBackend> {
    backend: B,
    sample_rate: i32,
    frames_per_buffer: i32,
    delay: Arc<Mutex<AudioDelay>>,
    queue: Arc<Mutex<SampleQueue>>,
    player: Option<Box<dyn Stream>>,
    recorder: Option<Box<dyn Stream>>,
}

impl<B: AudioBackend> EchoEngine<B> {
    pub fn new(backend: B, config: EchoConfig) -> Result<Self, EchoError> {
        if config.sample_rate <= 0 || config.frames_per_buffer <= 0 {
            return Err(EchoError::InvalidFormat {
                sample_rate: config.sample_rate,
                frames_per_buffer: config.frames_per_buffer,
            });
        }
        let invalid_echo = || EchoError::InvalidEcho {
            delay_ms: config.delay_ms,
            decay: config.decay,
        };
        let delay_ms = i32::try_from(config.delay_ms).map_err(|_| invalid_echo())?;
        let delay =
            AudioDelay::new(config.sample_rate, delay_ms, config.decay).ok_or_else(invalid_echo)?;
        let capacity = config.sample_rate as i64 * QUEUE_CAPACITY_MS / 1000;
        Ok(Self {
            backend,
            sample_rate: config.sample_rate,
            frames_per_buffer: config.frames_per_buffer,
            delay: Arc::new(Mutex::new(delay)),
            queue: Arc::new(Mutex::new(SampleQueue::new(capacity as usize))),
            player: None,
            recorder: None,
        })
    }

    /// Updates both echo settings. Returns true only if both were accepted.
    pub fn configure_echo(&self, delay_ms: i32, decay: f32) -> bool {
        let mut delay = self.delay.lock().unwrap();
        let delay_ok = delay.set_delay_ms(delay_ms);
        let decay_ok = delay.set_decay(decay);
        debug!(
            "Echo configured: {} ms ({}), decay {} ({})",
            delay_ms, delay_ok, decay, decay_ok
        );
        delay_ok && decay_ok
    }

    fn stream_config(&self, config: StreamConfig) -> StreamConfig {
        config
            .with_sample_rate(self.sample_rate)
            .with_frames_per_callback(self.frames_per_buffer)
    }

    pub fn create_player(&mut self) -> Result<(), EchoError> {
        let config = self.stream_config(StreamConfig::output(SampleFormat::I16, 1));
        let callback = PlayerCallback {
            queue: self.queue.clone(),
            delay: self.delay.clone(),
        };
        self.player = Some(self.backend.open_stream(&config, Box::new(callback))?);
        Ok(())
    }

    pub fn delete_player(&mut self) {
        self.player.take();
    }

    pub fn create_recorder(&mut self) -> Result<(), EchoError> {
        let config = self.stream_config(StreamConfig::input(SampleFormat::I16, 1));
        let callback = RecorderCallback {
            queue: self.queue.clone(),
        };
        self.recorder = Some(self.backend.open_stream(&config, Box::new(callback))?);
        Ok(())
    }

    pub fn delete_recorder(&mut self) {
        self.recorder.take();
    }

    /// Starts the recorder, then the player.
    pub fn start_play(&mut self) -> Result<(), EchoError> {
        let (Some(recorder), Some(player)) = (self.recorder.as_mut(), self.player.as_mut()) else {
            return Err(EchoError::NotCreated);
        };
        self.queue.lock().unwrap().clear();
        recorder.start()?;
        if let Err(err) = player.start() {
            recorder.stop().ok_log();
            return Err(err.into());
        }
        info!("Echo playback started");
        Ok(())
    }

    pub fn stop_play(&mut self) {
        if let Some(recorder) = self.recorder.as_mut() {
            recorder.stop().ok_log();
        }
        if let Some(player) = self.player.as_mut() {
            player.stop().ok_log();
        }
        self.queue.lock().unwrap().clear();
    }
}

struct RecorderCallback {
    queue: Arc<Mutex<SampleQueue>>,
}

impl AudioCallback for RecorderCallback {
    fn on_audio_ready(&mut self, buffer: AudioBuffer<'_>) -> CallbackResult {
        if let AudioBuffer::I16(samples) = buffer {
            // Never block the audio thread; losing a buffer is preferable.
            if let Ok(mut queue) = self.queue.try_lock() {
                queue.push(samples);
            }
        }
        CallbackResult::Continue
    }
}

struct PlayerCallback {
    queue: Arc<Mutex<SampleQueue>>,
    delay: Arc<Mutex<AudioDelay>>,
}

impl AudioCallback for PlayerCallback {
    fn on_audio_ready(&mut self, buffer: AudioBuffer<'_>) -> CallbackResult {
        match buffer {
            AudioBuffer::I16(samples) => {
                match self.queue.try_lock() {
                    Ok(mut queue) => {
                        queue.pop_into(samples);
                    }
                    Err(_) => samples.fill(0),
                }
                if let Ok(mut delay) = self.delay.try_lock() {
                    delay.process(samples);
                }
            }
            mut other => other.fill_silence(),
        }
        CallbackResult::Continue
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use ndk_samples_audio_stream::{
        AudioBackend, AudioBuffer, AudioCallback, Direction, Error, Result, Stream, StreamConfig,
        StreamFormat,
    };

    use super::{EchoConfig, EchoEngine, EchoError};

    #[derive(Default)]
    struct Shared {
        player: Option<Box<dyn AudioCallback>>,
        recorder: Option<Box<dyn AudioCallback>>,
        configs: Vec<StreamConfig>,
        events: Vec<&'static str>,
    }

    #[derive(Clone, Default)]
    struct FakeBackend {
        shared: Arc<Mutex<Shared>>,
        fail_input: bool,
    }

    struct FakeStream {
        direction: Direction,
        shared: Arc<Mutex<Shared>>,
    }

    impl FakeStream {
        fn event(&self, output: &'static str, input: &'static str) {
            let event = match self.direction {
                Direction::Output => output,
                Direction::Input => input,
            };
            self.shared.lock().unwrap().events.push(event);
        }
    }

    impl Stream for FakeStream {
        fn format(&self) -> StreamFormat {
            unimplemented!()
        }

        fn start(&mut self) -> Result<()> {
            self.event("player started", "recorder started");
            Ok(())
        }

        fn stop(&mut self) -> Result<()> {
            self.event("player stopped", "recorder stopped");
            Ok(())
        }
    }

    impl AudioBackend for FakeBackend {
        fn open_stream(
            &self,
            config: &StreamConfig,
            callback: Box<dyn AudioCallback>,
        ) -> Result<Box<dyn Stream>> {
            if self.fail_input && config.direction == Direction::Input {
                return Err(Error::Unsupported);
            }
            let mut shared = self.shared.lock().unwrap();
            shared.configs.push(config.clone());
            match config.direction {
                Direction::Output => shared.player = Some(callback),
                Direction::Input => shared.recorder = Some(callback),
            }
            Ok(Box::new(FakeStream {
                direction: config.direction,
                shared: self.shared.clone(),
            }))
        }
    }

    impl FakeBackend {
        fn record(&self, samples: &mut [i16]) {
            let mut shared = self.shared.lock().unwrap();
            shared
                .recorder
                .as_mut()
                .unwrap()
                .on_audio_ready(AudioBuffer::I16(samples));
        }

        fn play(&self, frames: usize) -> Vec<i16> {
            let mut samples = vec![0i16; frames];
            let mut shared = self.shared.lock().unwrap();
            shared
                .player
                .as_mut()
                .unwrap()
                .on_audio_ready(AudioBuffer::I16(&mut samples));
            samples
        }

        fn events(&self) -> Vec<&'static str> {
            self.shared.lock().unwrap().events.clone()
        }
    }

    fn config(delay_ms: i64, decay: f32) -> EchoConfig {
        EchoConfig {
            sample_rate: 1000,
            frames_per_buffer: 10,
            delay_ms,
            decay,
        }
    }

    #[test]
    fn test_invalid_config() {
        let backend = FakeBackend::default();
        assert!(matches!(
            EchoEngine::new(backend.clone(), config(0, 0.5)),
            Err(EchoError::InvalidEcho { .. })
        ));
        assert!(matches!(
            EchoEngine::new(backend.clone(), config(i64::MAX, 0.5)),
            Err(EchoError::InvalidEcho { .. })
        ));
        assert!(matches!(
            EchoEngine::new(
                backend,
                EchoConfig {
                    sample_rate: 0,
                    ..config(100, 0.5)
                }
            ),
            Err(EchoError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_streams_use_engine_format() {
        let backend = FakeBackend::default();
        let mut engine = EchoEngine::new(backend.clone(), config(100, 0.5)).unwrap();
        engine.create_player().unwrap();
        engine.create_recorder().unwrap();
        let shared = backend.shared.lock().unwrap();
        for config in &shared.configs {
            assert_eq!(config.sample_rate, Some(1000));
            assert_eq!(config.frames_per_callback, Some(10));
            assert_eq!(config.channel_count, 1);
        }
    }

    #[test]
    fn test_start_requires_streams() {
        let backend = FakeBackend {
            fail_input: true,
            ..Default::default()
        };
        let mut engine = EchoEngine::new(backend.clone(), config(100, 0.5)).unwrap();
        assert!(matches!(engine.start_play(), Err(EchoError::NotCreated)));
        engine.create_player().unwrap();
        assert!(matches!(engine.create_recorder(), Err(EchoError::Stream(_))));
        assert!(matches!(engine.start_play(), Err(EchoError::NotCreated)));
        assert!(backend.events().is_empty());
    }

    #[test]
    fn test_start_and_stop_order() {
        let backend = FakeBackend::default();
        let mut engine = EchoEngine::new(backend.clone(), config(100, 0.5)).unwrap();
        engine.create_player().unwrap();
        engine.create_recorder().unwrap();
        engine.start_play().unwrap();
        engine.stop_play();
        assert_eq!(
            backend.events(),
            vec![
                "recorder started",
                "player started",
                "recorder stopped",
                "player stopped"
            ]
        );
    }

    #[test]
    fn test_recorded_audio_is_echoed() {
        let backend = FakeBackend::default();
        let mut engine = EchoEngine::new(backend.clone(), config(10, 0.5)).unwrap();
        engine.create_player().unwrap();
        engine.create_recorder().unwrap();
        engine.start_play().unwrap();

        let mut recorded = [0i16; 10];
        recorded[0] = 1000;
        backend.record(&mut recorded);

        let first = backend.play(10);
        assert_eq!(first[0], 1000);
        // Nothing recorded since: the echo plays over silence.
        let second = backend.play(10);
        assert_eq!(second[0], 500);
        assert!(second[1..].iter().all(|s| *s == 0));
    }

    #[test]
    fn test_configure_echo() {
        let backend = FakeBackend::default();
        let engine = EchoEngine::new(backend.clone(), config(100, 0.5)).unwrap();
        assert!(engine.configure_echo(200, 0.25));
        assert!(!engine.configure_echo(0, 0.25));
        assert!(!engine.configure_echo(200, 1.5));
    }

    #[test]
    fn test_stop_discards_queued_audio() {
        let backend = FakeBackend::default();
        let mut engine = EchoEngine::new(backend.clone(), config(100, 0.0)).unwrap();
        engine.create_player().unwrap();
        engine.create_recorder().unwrap();
        engine.start_play().unwrap();
        backend.record(&mut [42i16; 10]);
        engine.stop_play();
        assert!(backend.play(10).iter().all(|s| *s == 0));
    }
}
