use std::{
    f32::consts::TAU,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use ndk_samples_audio_stream::{AudioBuffer, AudioCallback, CallbackResult, StreamFormat};

pub const FREQUENCY: f32 = 440.0;
pub const AMPLITUDE: f32 = 0.5;

/// Phase continuous sine tone, written to every channel of each frame.
/// Outputs silence while disabled.
pub struct SineGenerator {
    enabled: Arc<AtomicBool>,
    phase: f32,
    phase_increment: f32,
    channel_count: usize,
}

impl SineGenerator {
    pub fn new(enabled: Arc<AtomicBool>) -> Self {
        Self {
            enabled,
            phase: 0.0,
            phase_increment: 0.0,
            channel_count: 1,
        }
    }

    fn next_sample(&mut self) -> f32 {
        let sample = self.phase.sin() * AMPLITUDE;
        self.phase += self.phase_increment;
        if self.phase >= TAU {
            self.phase -= TAU;
        }
        sample
    }
}

impl AudioCallback for SineGenerator {
    fn prepare(&mut self, format: &StreamFormat) {
        self.phase_increment = FREQUENCY * TAU / format.sample_rate as f32;
        self.channel_count = format.channel_count.max(1) as usize;
    }

    fn on_audio_ready(&mut self, mut buffer: AudioBuffer<'_>) -> CallbackResult {
        if !self.enabled.load(Ordering::Relaxed) {
            buffer.fill_silence();
            return CallbackResult::Continue;
        }
        let channels = self.channel_count;
        match buffer {
            AudioBuffer::F32(samples) => {
                for frame in samples.chunks_mut(channels) {
                    frame.fill(self.next_sample());
                }
            }
            AudioBuffer::I16(samples) => {
                for frame in samples.chunks_mut(channels) {
                    frame.fill((self.next_sample() * i16::MAX as f32) as i16);
                }
            }
        }
        CallbackResult::Continue
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    };

    use ndk_samples_audio_stream::{AudioBuffer, AudioCallback, SampleFormat, StreamFormat};

    use super::{SineGenerator, AMPLITUDE, FREQUENCY};

    fn generator(enabled: bool, sample_rate: i32, channel_count: i32) -> SineGenerator {
        let mut generator = SineGenerator::new(Arc::new(AtomicBool::new(enabled)));
        generator.prepare(&StreamFormat {
            sample_rate,
            channel_count,
            format: SampleFormat::F32,
        });
        generator
    }

    #[test]
    fn test_disabled_is_silent() {
        let mut generator = generator(false, 48000, 2);
        let mut samples = [1.0f32; 64];
        generator.on_audio_ready(AudioBuffer::F32(&mut samples));
        assert!(samples.iter().all(|s| *s == 0.0));
    }

    #[test]
    fn test_channels_share_sample() {
        let mut generator = generator(true, 48000, 2);
        let mut samples = [0.0f32; 32];
        generator.on_audio_ready(AudioBuffer::F32(&mut samples));
        for frame in samples.chunks(2) {
            assert_eq!(frame[0], frame[1]);
        }
        assert_eq!(samples[0], 0.0);
        assert!(samples[2] > 0.0);
    }

    #[test]
    fn test_amplitude_bound() {
        let mut generator = generator(true, 44100, 1);
        let mut samples = vec![0.0f32; 44100];
        generator.on_audio_ready(AudioBuffer::F32(&mut samples));
        let peak = samples.iter().fold(0.0f32, |acc, s| acc.max(s.abs()));
        assert!(peak <= AMPLITUDE + 1e-6);
        assert!(peak > AMPLITUDE * 0.99);
    }

    #[test]
    fn test_phase_continuous_across_callbacks() {
        let mut split = generator(true, 48000, 1);
        let mut whole = generator(true, 48000, 1);

        let mut first = [0.0f32; 100];
        let mut second = [0.0f32; 100];
        split.on_audio_ready(AudioBuffer::F32(&mut first));
        split.on_audio_ready(AudioBuffer::F32(&mut second));

        let mut all = [0.0f32; 200];
        whole.on_audio_ready(AudioBuffer::F32(&mut all));

        assert_eq!(&all[..100], &first[..]);
        assert_eq!(&all[100..], &second[..]);
    }

    #[test]
    fn test_frequency() {
        // 440 Hz at 44.1 kHz: one period is ~100.2 samples.
        let mut generator = generator(true, 44100, 1);
        let mut samples = vec![0.0f32; 44100];
        generator.on_audio_ready(AudioBuffer::F32(&mut samples));
        let rising_zero_crossings = samples
            .windows(2)
            .filter(|w| w[0] < 0.0 && w[1] >= 0.0)
            .count();
        assert!((rising_zero_crossings as f32 - FREQUENCY).abs() <= 1.0);
    }

    #[test]
    fn test_toggle() {
        let enabled = Arc::new(AtomicBool::new(false));
        let mut generator = SineGenerator::new(enabled.clone());
        generator.prepare(&StreamFormat {
            sample_rate: 48000,
            channel_count: 1,
            format: SampleFormat::I16,
        });
        let mut samples = [0i16; 16];
        generator.on_audio_ready(AudioBuffer::I16(&mut samples));
        assert!(samples.iter().all(|s| *s == 0));

        enabled.store(true, Ordering::Relaxed);
        generator.on_audio_ready(AudioBuffer::I16(&mut samples));
        assert!(samples.iter().any(|s| *s != 0));
    }
}
