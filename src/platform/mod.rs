//! Platform timing helpers
//!
//! Browser animation frames arrive at the display's refresh rate; these gate
//! them down to the sandbox's fixed frame rate and measure what is achieved.
//! Times are milliseconds, as delivered by `requestAnimationFrame`.

/// Tolerance for callbacks that arrive a hair early
const EARLY_SLACK_MS: f64 = 1.0;

/// Caps how often the frame loop runs
#[derive(Debug, Clone)]
pub struct FrameLimiter {
    interval_ms: f64,
    last_ms: Option<f64>,
}

impl FrameLimiter {
    pub fn new(target_fps: f32) -> Self {
        Self {
            interval_ms: 1000.0 / target_fps.max(1.0) as f64,
            last_ms: None,
        }
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    /// Whether a frame is due at `now_ms`; records it if so
    ///
    /// Frames keep a steady cadence; after a long stall the schedule restarts
    /// from `now_ms` instead of bursting to catch up.
    pub fn ready(&mut self, now_ms: f64) -> bool {
        let Some(last) = self.last_ms else {
            self.last_ms = Some(now_ms);
            return true;
        };

        let elapsed = now_ms - last;
        if elapsed + EARLY_SLACK_MS < self.interval_ms {
            return false;
        }

        self.last_ms = Some(if elapsed > 2.0 * self.interval_ms {
            now_ms
        } else {
            last + self.interval_ms
        });
        true
    }
}

/// Rolling frames-per-second over the last `N` frames
#[derive(Debug, Clone)]
pub struct FpsCounter<const N: usize = 60> {
    frame_times: [f64; N],
    frame_index: usize,
    fps: u32,
}

impl<const N: usize> Default for FpsCounter<N> {
    fn default() -> Self {
        Self {
            frame_times: [0.0; N],
            frame_index: 0,
            fps: 0,
        }
    }
}

impl<const N: usize> FpsCounter<N> {
    /// Record a frame presented at `time_ms`
    pub fn record(&mut self, time_ms: f64) {
        self.frame_times[self.frame_index] = time_ms;
        self.frame_index = (self.frame_index + 1) % N;

        // Oldest sample sits at the slot about to be overwritten
        let oldest = self.frame_times[self.frame_index];
        if oldest > 0.0 {
            let elapsed = time_ms - oldest;
            if elapsed > 0.0 {
                self.fps = ((N as f64 - 1.0) * 1000.0 / elapsed).round() as u32;
            }
        }
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_always_runs() {
        let mut limiter = FrameLimiter::new(60.0);
        assert!(limiter.ready(1234.0));
    }

    #[test]
    fn test_120hz_callbacks_run_every_other() {
        let mut limiter = FrameLimiter::new(60.0);
        let period = 1000.0 / 120.0;
        let ran: Vec<bool> = (0..12)
            .map(|i| limiter.ready(100.0 + i as f64 * period))
            .collect();
        assert_eq!(ran.iter().filter(|r| **r).count(), 6);
        for pair in ran.chunks(2) {
            assert_eq!(pair, [true, false]);
        }
    }

    #[test]
    fn test_60hz_callbacks_all_run() {
        let mut limiter = FrameLimiter::new(60.0);
        let period = limiter.interval_ms();
        assert!((0..30).all(|i| limiter.ready(i as f64 * period + 5.0)));
    }

    #[test]
    fn test_stall_does_not_burst() {
        let mut limiter = FrameLimiter::new(60.0);
        assert!(limiter.ready(0.0));
        assert!(limiter.ready(500.0));
        // Next frame is scheduled from the stall, not from t=0
        assert!(!limiter.ready(505.0));
        assert!(limiter.ready(517.0));
    }

    #[test]
    fn test_fps_counter_steady_rate() {
        let mut counter = FpsCounter::<10>::default();
        for i in 1..=30 {
            counter.record(i as f64 * 1000.0 / 60.0);
        }
        assert_eq!(counter.fps(), 60);
    }

    #[test]
    fn test_fps_counter_needs_full_window() {
        let mut counter = FpsCounter::<10>::default();
        for i in 1..=5 {
            counter.record(i as f64 * 16.0);
        }
        assert_eq!(counter.fps(), 0);
    }
}
