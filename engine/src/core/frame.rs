use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread,
    time::{Duration, Instant},
};

use log::info;

use crate::core::{app::Config, time::SIXTY_FPS};

/// A frame source ticking at a fixed interval.
///
/// Each `next()` sleeps until the following frame deadline and yields the time elapsed since the
/// source was created. Iteration ends once the optional frame limit is reached or the stop handle
/// is raised. Deadlines advance by whole intervals, so a slow frame is followed by shorter sleeps
/// rather than accumulated drift.
#[derive(Debug)]
pub struct FixedRate {
    interval: Duration,
    start: Instant,
    next: Instant,
    remaining: Option<u64>,
    stop: Arc<AtomicBool>,
}

impl Default for FixedRate {
    fn default() -> Self {
        Self::new(Duration::from_nanos(SIXTY_FPS))
    }
}

impl FixedRate {
    /// An unbounded source ticking every `interval`.
    pub fn new(interval: Duration) -> Self {
        let start = Instant::now();
        Self {
            interval,
            start,
            next: start + interval,
            remaining: None,
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    /// A source yielding at most `frames` frames.
    pub fn with_limit(interval: Duration, frames: u64) -> Self {
        Self {
            remaining: Some(frames),
            ..Self::new(interval)
        }
    }

    pub fn from_config(config: &Config) -> Self {
        match config.max_frames {
            Some(frames) => Self::with_limit(config.frame_interval, frames),
            None => Self::new(config.frame_interval),
        }
    }

    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// A handle that ends iteration when set to `true`. Safe to raise from another thread.
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        self.stop.clone()
    }
}

impl Iterator for FixedRate {
    type Item = Duration;

    fn next(&mut self) -> Option<Duration> {
        if self.stop.load(Ordering::Relaxed) {
            info!("Ending frame source due to stop handle");
            return None;
        }
        if let Some(remaining) = self.remaining.as_mut() {
            if *remaining == 0 {
                return None;
            }
            *remaining -= 1;
        }

        let now = Instant::now();
        if self.next > now {
            thread::sleep(self.next - now);
        }
        self.next += self.interval;
        Some(self.start.elapsed())
    }
}
