mod error;
mod platform;

pub use error::*;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Output,
    Input,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SampleFormat {
    I16,
    F32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SharingMode {
    Exclusive,
    Shared,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PerformanceMode {
    None,
    PowerSaving,
    LowLatency,
}

/// Requested stream parameters. Unset optional values are left for the
/// platform to choose.
#[derive(Clone, Debug, PartialEq)]
pub struct StreamConfig {
    pub direction: Direction,
    pub format: SampleFormat,
    pub channel_count: i32,
    pub sample_rate: Option<i32>,
    pub frames_per_callback: Option<i32>,
    pub sharing_mode: SharingMode,
    pub performance_mode: PerformanceMode,
}

impl StreamConfig {
    pub fn output(format: SampleFormat, channel_count: i32) -> Self {
        Self::new(Direction::Output, format, channel_count)
    }

    pub fn input(format: SampleFormat, channel_count: i32) -> Self {
        Self::new(Direction::Input, format, channel_count)
    }

    fn new(direction: Direction, format: SampleFormat, channel_count: i32) -> Self {
        Self {
            direction,
            format,
            channel_count,
            sample_rate: None,
            frames_per_callback: None,
            sharing_mode: SharingMode::Shared,
            performance_mode: PerformanceMode::LowLatency,
        }
    }

    pub fn with_sample_rate(mut self, sample_rate: i32) -> Self {
        self.sample_rate = (sample_rate > 0).then_some(sample_rate);
        self
    }

    pub fn with_frames_per_callback(mut self, frames: i32) -> Self {
        self.frames_per_callback = (frames > 0).then_some(frames);
        self
    }

    pub fn with_sharing_mode(mut self, sharing_mode: SharingMode) -> Self {
        self.sharing_mode = sharing_mode;
        self
    }

    pub fn with_performance_mode(mut self, performance_mode: PerformanceMode) -> Self {
        self.performance_mode = performance_mode;
        self
    }
}

/// Parameters the platform actually granted for an opened stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StreamFormat {
    pub sample_rate: i32,
    pub channel_count: i32,
    pub format: SampleFormat,
}

/// Interleaved samples handed to an [`AudioCallback`]. For output streams the
/// callback fills it, for input streams it holds captured audio.
#[derive(Debug)]
pub enum AudioBuffer<'a> {
    I16(&'a mut [i16]),
    F32(&'a mut [f32]),
}

impl<'a> AudioBuffer<'a> {
    /// Number of samples (frames times channels).
    pub fn len(&self) -> usize {
        match self {
            AudioBuffer::I16(samples) => samples.len(),
            AudioBuffer::F32(samples) => samples.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn fill_silence(&mut self) {
        match self {
            AudioBuffer::I16(samples) => samples.fill(0),
            AudioBuffer::F32(samples) => samples.fill(0.0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CallbackResult {
    Continue,
    Stop,
}

/// Realtime audio callback. Runs on a thread owned by the audio service, so
/// it must never block.
pub trait AudioCallback: Send {
    /// Called once after the stream was opened, before it starts.
    fn prepare(&mut self, _format: &StreamFormat) {}

    fn on_audio_ready(&mut self, buffer: AudioBuffer<'_>) -> CallbackResult;
}

/// Opened stream. Dropping it stops and closes the stream.
pub trait Stream: Send {
    fn format(&self) -> StreamFormat;
    fn start(&mut self) -> Result<()>;
    fn stop(&mut self) -> Result<()>;
}

/// Factory for streams. Lets samples run their engines against fake streams
/// in tests.
pub trait AudioBackend {
    fn open_stream(
        &self,
        config: &StreamConfig,
        callback: Box<dyn AudioCallback>,
    ) -> Result<Box<dyn Stream>>;
}

/// Backend using the platform AAudio service.
#[derive(Clone, Copy, Debug, Default)]
pub struct AAudioBackend;

impl AudioBackend for AAudioBackend {
    fn open_stream(
        &self,
        config: &StreamConfig,
        callback: Box<dyn AudioCallback>,
    ) -> Result<Box<dyn Stream>> {
        Ok(Box::new(AudioStream::open(config, callback)?))
    }
}

/// Callback driven AAudio stream.
pub struct AudioStream {
    platform_stream: platform::PlatformStream,
}

impl AudioStream {
    pub fn open(config: &StreamConfig, callback: Box<dyn AudioCallback>) -> Result<Self> {
        Ok(Self {
            platform_stream: platform::PlatformStream::open(config, callback)?,
        })
    }
}

impl Stream for AudioStream {
    fn format(&self) -> StreamFormat {
        self.platform_stream.format()
    }

    fn start(&mut self) -> Result<()> {
        self.platform_stream.start()
    }

    fn stop(&mut self) -> Result<()> {
        self.platform_stream.stop()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = StreamConfig::input(SampleFormat::I16, 1)
            .with_sample_rate(48000)
            .with_frames_per_callback(0)
            .with_sharing_mode(SharingMode::Exclusive);
        assert_eq!(config.direction, Direction::Input);
        assert_eq!(config.sample_rate, Some(48000));
        assert_eq!(config.frames_per_callback, None);
        assert_eq!(config.sharing_mode, SharingMode::Exclusive);
        assert_eq!(config.performance_mode, PerformanceMode::LowLatency);
    }

    #[test]
    fn test_fill_silence() {
        let mut samples = [1i16, -2, 3];
        let mut buffer = AudioBuffer::I16(&mut samples);
        assert_eq!(buffer.len(), 3);
        buffer.fill_silence();
        assert_eq!(samples, [0, 0, 0]);

        let mut samples = [0.5f32; 4];
        AudioBuffer::F32(&mut samples).fill_silence();
        assert_eq!(samples, [0.0; 4]);
    }

    #[cfg(not(target_os = "android"))]
    #[test]
    fn test_unsupported_platform() {
        struct Silence;
        impl AudioCallback for Silence {
            fn on_audio_ready(&mut self, mut buffer: AudioBuffer<'_>) -> CallbackResult {
                buffer.fill_silence();
                CallbackResult::Continue
            }
        }
        let res = AAudioBackend.open_stream(
            &StreamConfig::output(SampleFormat::F32, 2),
            Box::new(Silence),
        );
        assert!(matches!(res, Err(Error::Unsupported)));
    }
}
