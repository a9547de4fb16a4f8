use std::collections::VecDeque;

/// Bounded FIFO of recorded samples waiting to be played. When full the
/// oldest samples are dropped, keeping latency bounded.
#[derive(Debug)]
pub struct SampleQueue {
    samples: VecDeque<i16>,
    capacity: usize,
}

impl SampleQueue {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Appends `samples`, returning how many old samples were dropped.
    pub fn push(&mut self, samples: &[i16]) -> usize {
        self.samples.extend(samples);
        let overflow = self.samples.len().saturating_sub(self.capacity);
        self.samples.drain(..overflow);
        overflow
    }

    /// Fills `out` from the front of the queue, padding with silence on
    /// underrun. Returns the number of queued samples used.
    pub fn pop_into(&mut self, out: &mut [i16]) -> usize {
        let available = self.samples.len().min(out.len());
        for (dst, src) in out.iter_mut().zip(self.samples.drain(..available)) {
            *dst = src;
        }
        out[available..].fill(0);
        available
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}
