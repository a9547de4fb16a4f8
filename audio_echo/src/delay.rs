/// Longest echo delay accepted by [`AudioDelay::set_delay_ms`].
pub const MAX_DELAY_MS: i32 = 5000;

/// Feedback echo over mono 16-bit PCM. Each output sample is the input plus
/// the output from `delay` earlier scaled by `decay`, so echoes repeat and
/// fade.
#[derive(Debug)]
pub struct AudioDelay {
    sample_rate: i32,
    delay_ms: i32,
    decay: f32,
    line: Vec<i16>,
    cursor: usize,
}

impl AudioDelay {
    /// Returns `None` when `delay_ms` or `decay` is out of range.
    pub fn new(sample_rate: i32, delay_ms: i32, decay: f32) -> Option<Self> {
        let mut delay = Self {
            sample_rate: sample_rate.max(1),
            delay_ms: 0,
            decay: 0.0,
            line: Vec::new(),
            cursor: 0,
        };
        (delay.set_delay_ms(delay_ms) && delay.set_decay(decay)).then_some(delay)
    }

    pub fn delay_ms(&self) -> i32 {
        self.delay_ms
    }

    pub fn decay(&self) -> f32 {
        self.decay
    }

    /// Length of the delay line in frames.
    pub fn delay_frames(&self) -> usize {
        self.line.len()
    }

    /// Changes the delay. Pending echoes are discarded when the length
    /// changes. Returns false, leaving the delay untouched, when `delay_ms`
    /// is not in `1..=MAX_DELAY_MS`.
    pub fn set_delay_ms(&mut self, delay_ms: i32) -> bool {
        if !(1..=MAX_DELAY_MS).contains(&delay_ms) {
            return false;
        }
        if delay_ms == self.delay_ms {
            return true;
        }
        let frames = (self.sample_rate as i64 * delay_ms as i64 / 1000).max(1) as usize;
        self.line = vec![0; frames];
        self.cursor = 0;
        self.delay_ms = delay_ms;
        true
    }

    /// Returns false, leaving the decay untouched, when `decay` is not in
    /// `0.0..=1.0`.
    pub fn set_decay(&mut self, decay: f32) -> bool {
        if !(0.0..=1.0).contains(&decay) {
            return false;
        }
        self.decay = decay;
        true
    }

    pub fn process(&mut self, samples: &mut [i16]) {
        for sample in samples {
            let delayed = self.line[self.cursor] as f32;
            let out = (*sample as f32 + self.decay * delayed)
                .clamp(i16::MIN as f32, i16::MAX as f32) as i16;
            self.line[self.cursor] = out;
            *sample = out;
            self.cursor = (self.cursor + 1) % self.line.len();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AudioDelay, MAX_DELAY_MS};

    #[test]
    fn test_rejects_invalid_settings() {
        assert!(AudioDelay::new(48000, 0, 0.5).is_none());
        assert!(AudioDelay::new(48000, MAX_DELAY_MS + 1, 0.5).is_none());
        assert!(AudioDelay::new(48000, 100, 1.5).is_none());
        assert!(AudioDelay::new(48000, 100, -0.1).is_none());
        assert!(AudioDelay::new(48000, 100, f32::NAN).is_none());

        let mut delay = AudioDelay::new(48000, 100, 0.5).unwrap();
        assert!(!delay.set_delay_ms(-5));
        assert!(!delay.set_decay(2.0));
        assert_eq!(delay.delay_ms(), 100);
        assert_eq!(delay.decay(), 0.5);
    }

    #[test]
    fn test_delay_frames() {
        let mut delay = AudioDelay::new(48000, 100, 0.5).unwrap();
        assert_eq!(delay.delay_frames(), 4800);
        assert!(delay.set_delay_ms(MAX_DELAY_MS));
        assert_eq!(delay.delay_frames(), 240000);
    }

    #[test]
    fn test_impulse_echoes() {
        // 10 ms at 1 kHz is 10 frames.
        let mut delay = AudioDelay::new(1000, 10, 0.5).unwrap();
        let mut samples = vec![0i16; 35];
        samples[0] = 10000;
        delay.process(&mut samples);

        assert_eq!(samples[0], 10000);
        assert_eq!(samples[10], 5000);
        assert_eq!(samples[20], 2500);
        assert_eq!(samples[30], 1250);
        let silent = samples
            .iter()
            .enumerate()
            .filter(|(i, _)| i % 10 != 0)
            .all(|(_, s)| *s == 0);
        assert!(silent);
    }

    #[test]
    fn test_echo_across_buffers() {
        let mut delay = AudioDelay::new(1000, 10, 1.0).unwrap();
        let mut first = [0i16; 6];
        first[3] = 100;
        delay.process(&mut first);
        let mut second = [0i16; 8];
        delay.process(&mut second);
        // Frame 3 comes back at frame 13, which is index 7 of the second
        // buffer.
        assert_eq!(second[7], 100);
    }

    #[test]
    fn test_zero_decay_is_dry() {
        let mut delay = AudioDelay::new(1000, 5, 0.0).unwrap();
        let mut samples = [7i16; 20];
        delay.process(&mut samples);
        assert_eq!(samples, [7i16; 20]);
    }

    #[test]
    fn test_output_saturates() {
        let mut delay = AudioDelay::new(1000, 1, 1.0).unwrap();
        let mut samples = [i16::MAX; 4];
        delay.process(&mut samples);
        assert_eq!(samples, [i16::MAX; 4]);
    }
}
