use std::{
    fmt::Display,
    time::{Duration, Instant},
};

const REPORT_PERIOD: Duration = Duration::from_millis(1500);
const MAX_FRAMES: usize = 200;

/// Frame rate over one reporting period.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameReport {
    pub frames: usize,
    pub avg_fps: f64,
    pub min_fps: f64,
    pub max_fps: f64,
}

impl Display for FrameReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "frame/s (avg,min,max) = ({:.1},{:.1},{:.1}) over {} frames",
            self.avg_fps, self.min_fps, self.max_fps, self.frames
        )
    }
}

pub struct FrameStats {
    period_start: Instant,
    frame_times: Vec<Duration>,
}

fn fps(frame_time: Duration) -> f64 {
    1.0 / frame_time.as_secs_f64().max(1e-6)
}

impl FrameStats {
    pub fn new(now: Instant) -> Self {
        Self {
            period_start: now,
            frame_times: Vec::with_capacity(MAX_FRAMES),
        }
    }

    /// Records one rendered frame. Returns a report once the period has
    /// elapsed or the frame buffer is full, and starts a new period.
    pub fn record(&mut self, frame_time: Duration, now: Instant) -> Option<FrameReport> {
        self.frame_times.push(frame_time);
        let elapsed = now.saturating_duration_since(self.period_start);
        if elapsed < REPORT_PERIOD && self.frame_times.len() < MAX_FRAMES {
            return None;
        }
        let frames = self.frame_times.len();
        let total: Duration = self.frame_times.iter().sum();
        let shortest = self.frame_times.iter().min().copied().unwrap_or_default();
        let longest = self.frame_times.iter().max().copied().unwrap_or_default();
        self.frame_times.clear();
        self.period_start = now;
        Some(FrameReport {
            frames,
            avg_fps: fps(total / frames as u32),
            min_fps: fps(longest),
            max_fps: fps(shortest),
        })
    }
}
