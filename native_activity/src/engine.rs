use std::time::{Duration, Instant};

const COLOR_PERIOD: Duration = Duration::from_secs(1);

/// Fill colour as stored in an `R8G8B8X8` pixel. Little endian, so the byte
/// order reads ABGR rather than the usual RGBA hex code.
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    Red = 0x000000ff,
    Green = 0x0000ff00,
    Blue = 0x00ff0000,
}

impl Color {
    pub fn next(self) -> Self {
        match self {
            Color::Red => Color::Green,
            Color::Green => Color::Blue,
            Color::Blue => Color::Red,
        }
    }

    pub fn pixel(self) -> u32 {
        self as u32
    }
}

/// What a tick asks of the caller: schedule the next tick and draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame {
    pub color: Color,
    /// False when the window geometry could not be set; the buffer format
    /// is unknown and the frame must not be filled.
    pub fill: bool,
}

/// Frame-paced colour cycling state. Platform glue feeds it window and
/// focus events plus frame callbacks.
#[derive(Debug)]
pub struct Engine {
    window_initialized: bool,
    running: bool,
    tick_pending: bool,
    color: Color,
    last_update: Instant,
}

impl Engine {
    pub fn new(now: Instant) -> Self {
        Self {
            window_initialized: false,
            running: false,
            tick_pending: false,
            color: Color::Red,
            last_update: now,
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_window_initialized(&self) -> bool {
        self.window_initialized
    }

    /// `geometry_set` tells whether the window accepted the buffer
    /// geometry. Restarts the colour cycle on success.
    pub fn attach_window(&mut self, geometry_set: bool, now: Instant) {
        self.window_initialized = geometry_set;
        if geometry_set {
            self.color = Color::Red;
            self.last_update = now;
        }
    }

    pub fn detach_window(&mut self) {
        self.window_initialized = false;
    }

    /// Returns true when the caller has to schedule a tick. At most one
    /// tick is pending at any time, including one posted before a pause.
    #[must_use]
    pub fn resume(&mut self) -> bool {
        self.running = true;
        if self.tick_pending {
            return false;
        }
        self.tick_pending = true;
        true
    }

    /// A tick already scheduled still fires, but does nothing and does not
    /// re-arm.
    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn is_tick_pending(&self) -> bool {
        self.tick_pending
    }

    /// Frame callback. `None` means paused: do not reschedule, do not draw.
    /// `Some` means the caller must schedule exactly one next tick.
    pub fn tick(&mut self, now: Instant) -> Option<Frame> {
        self.tick_pending = false;
        if !self.running {
            return None;
        }
        self.tick_pending = true;
        self.update(now);
        Some(Frame {
            color: self.color,
            fill: self.window_initialized,
        })
    }

    fn update(&mut self, now: Instant) {
        if now.saturating_duration_since(self.last_update) >= COLOR_PERIOD {
            self.color = self.color.next();
            self.last_update = now;
        }
    }
}

/// Fills `height` rows of `width` pixels, rows `stride` pixels apart.
pub fn fill_solid(pixels: &mut [u32], width: usize, height: usize, stride: usize, color: Color) {
    if stride < width {
        return;
    }
    for row in pixels.chunks_mut(stride).take(height) {
        if let Some(row) = row.get_mut(..width) {
            row.fill(color.pixel());
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::{fill_solid, Color, Engine, Frame};

    #[test]
    fn test_color_cycle() {
        assert_eq!(Color::Red.next(), Color::Green);
        assert_eq!(Color::Green.next(), Color::Blue);
        assert_eq!(Color::Blue.next(), Color::Red);
        assert_eq!(Color::Red.pixel(), 0x000000ff);
        assert_eq!(Color::Green.pixel(), 0x0000ff00);
        assert_eq!(Color::Blue.pixel(), 0x00ff0000);
    }

    #[test]
    fn test_resume_never_double_schedules() {
        let now = Instant::now();
        let mut engine = Engine::new(now);
        assert!(engine.resume());
        assert!(!engine.resume());
        assert!(engine.is_running());
        engine.pause();
        assert!(!engine.is_running());
        assert!(engine.is_tick_pending());
        engine.pause();
        // The tick posted before the pause is still pending.
        assert!(!engine.resume());
        assert!(engine.tick(now).is_some());
    }

    #[test]
    fn test_quick_focus_toggle_keeps_single_tick_chain() {
        let now = Instant::now();
        let mut engine = Engine::new(now);
        engine.attach_window(true, now);
        let mut pending = 0;
        if engine.resume() {
            pending += 1;
        }
        // Focus lost and regained before the posted tick fires.
        for _ in 0..3 {
            engine.pause();
            if engine.resume() {
                pending += 1;
            }
        }
        assert_eq!(pending, 1);

        // The pending tick fires and re-arms exactly once.
        pending -= 1;
        if engine.tick(now).is_some() {
            pending += 1;
        }
        assert_eq!(pending, 1);
        assert!(engine.is_tick_pending());
    }

    #[test]
    fn test_resume_after_paused_tick_reschedules() {
        let now = Instant::now();
        let mut engine = Engine::new(now);
        assert!(engine.resume());
        engine.pause();
        // The pending tick fires while paused and ends the chain.
        assert_eq!(engine.tick(now), None);
        assert!(!engine.is_tick_pending());
        assert!(engine.resume());
        assert!(engine.is_tick_pending());
    }

    #[test]
    fn test_paused_tick_does_not_rearm() {
        let now = Instant::now();
        let mut engine = Engine::new(now);
        engine.attach_window(true, now);
        assert!(engine.resume());
        engine.pause();
        assert_eq!(engine.tick(now + Duration::from_secs(5)), None);
        assert_eq!(engine.color(), Color::Red);
    }

    #[test]
    fn test_color_advances_after_one_second() {
        let start = Instant::now();
        let mut engine = Engine::new(start);
        engine.attach_window(true, start);
        assert!(engine.resume());

        let frame = engine.tick(start + Duration::from_millis(999)).unwrap();
        assert_eq!(frame.color, Color::Red);

        let t1 = start + Duration::from_secs(1);
        assert_eq!(engine.tick(t1).unwrap().color, Color::Green);
        // Measured from the last change, not from the start.
        assert_eq!(
            engine.tick(t1 + Duration::from_millis(500)).unwrap().color,
            Color::Green
        );
        assert_eq!(engine.tick(t1 + Duration::from_secs(1)).unwrap().color, Color::Blue);
        assert_eq!(engine.tick(t1 + Duration::from_secs(2)).unwrap().color, Color::Red);
    }

    #[test]
    fn test_one_step_per_tick() {
        let start = Instant::now();
        let mut engine = Engine::new(start);
        engine.attach_window(true, start);
        assert!(engine.resume());
        // A long stall still advances a single colour.
        let frame = engine.tick(start + Duration::from_secs(10)).unwrap();
        assert_eq!(frame.color, Color::Green);
    }

    #[test]
    fn test_attach_resets_color() {
        let start = Instant::now();
        let mut engine = Engine::new(start);
        engine.attach_window(true, start);
        assert!(engine.resume());
        engine.tick(start + Duration::from_secs(1));
        assert_eq!(engine.color(), Color::Green);

        engine.detach_window();
        assert!(!engine.is_window_initialized());
        let later = start + Duration::from_secs(2);
        engine.attach_window(true, later);
        assert_eq!(engine.color(), Color::Red);
        assert_eq!(
            engine.tick(later + Duration::from_millis(10)),
            Some(Frame {
                color: Color::Red,
                fill: true
            })
        );
    }

    #[test]
    fn test_failed_geometry_skips_fill() {
        let now = Instant::now();
        let mut engine = Engine::new(now);
        engine.attach_window(false, now);
        assert!(!engine.is_window_initialized());
        assert!(engine.resume());
        assert!(!engine.tick(now).unwrap().fill);
    }

    #[test]
    fn test_fill_solid_respects_stride() {
        let (width, height, stride) = (3, 2, 5);
        let mut pixels = vec![0u32; stride * height];
        fill_solid(&mut pixels, width, height, stride, Color::Blue);
        assert_eq!(
            pixels,
            vec![
                0x00ff0000, 0x00ff0000, 0x00ff0000, 0, 0, //
                0x00ff0000, 0x00ff0000, 0x00ff0000, 0, 0,
            ]
        );
    }

    #[test]
    fn test_fill_solid_short_buffer() {
        let mut pixels = vec![0u32; 4];
        fill_solid(&mut pixels, 4, 3, 4, Color::Green);
        assert!(pixels.iter().all(|p| *p == 0x0000ff00));
        let mut pixels = vec![0u32; 4];
        fill_solid(&mut pixels, 8, 1, 4, Color::Green);
        assert!(pixels.iter().all(|p| *p == 0));
    }
}
