use std::time::Duration;

use rusty_ecs_macros::Resource;

/// The frame interval of a 60 Hz loop, in nanoseconds.
pub const SIXTY_FPS: u64 = 16_666_666;
pub const ONE_FPS: u64 = 1_000_000_000;

/// Frame timing, inserted as a resource by every [`App`](crate::core::app::App) and advanced
/// before each tick.
#[derive(Resource, Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Time {
    /// The total elapsed time reported by the frame source
    pub elapsed: Duration,
    /// The time since the previous tick
    pub delta: Duration,
    /// The number of ticks run so far
    pub frame: u64,
}

impl Time {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move to the next tick at `elapsed`. A frame source reporting an earlier time than the
    /// previous tick yields a zero delta.
    pub fn advance(&mut self, elapsed: Duration) {
        self.delta = elapsed.saturating_sub(self.elapsed);
        self.elapsed = elapsed;
        self.frame += 1;
    }

    /// The delta in fractional seconds.
    #[inline]
    pub fn delta_secs(&self) -> f32 {
        self.delta.as_secs_f32()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_tracks_delta_and_frame() {
        let mut time = Time::new();
        time.advance(Duration::from_millis(16));
        time.advance(Duration::from_millis(40));

        assert_eq!(time.elapsed, Duration::from_millis(40));
        assert_eq!(time.delta, Duration::from_millis(24));
        assert_eq!(time.frame, 2);
    }

    #[test]
    fn going_backwards_clamps_delta() {
        let mut time = Time::new();
        time.advance(Duration::from_secs(2));
        time.advance(Duration::from_secs(1));
        assert_eq!(time.delta, Duration::ZERO);
        assert_eq!(time.elapsed, Duration::from_secs(1));
    }

    #[test]
    fn sixty_fps_is_a_sixtieth_of_a_second() {
        assert!(ONE_FPS - SIXTY_FPS * 60 < 60);
    }
}
