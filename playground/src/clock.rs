use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Seconds since the clock started.
    pub elapsed: f32,
    /// Seconds since the previous tick.
    pub delta: f32,
}

pub struct FrameClock {
    start: Instant,
    last_frame: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(start: Instant) -> Self {
        Self {
            start,
            last_frame: start,
        }
    }

    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> FrameTime {
        let time = FrameTime {
            elapsed: now.saturating_duration_since(self.start).as_secs_f32(),
            delta: now.saturating_duration_since(self.last_frame).as_secs_f32(),
        };

        self.last_frame = self.last_frame.max(now);

        time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn tick_test() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);

        let first = clock.tick_at(start + Duration::from_millis(500));
        assert_eq!(first.elapsed, 0.5);
        assert_eq!(first.delta, 0.5);

        let second = clock.tick_at(start + Duration::from_millis(750));
        assert_eq!(second.elapsed, 0.75);
        assert_eq!(second.delta, 0.25);
    }

    #[test]
    fn backwards_tick_test() {
        let start = Instant::now() + Duration::from_secs(1);
        let mut clock = FrameClock::starting_at(start);

        clock.tick_at(start + Duration::from_secs(2));
        let time = clock.tick_at(start + Duration::from_secs(1));

        assert_eq!(time.elapsed, 1.0);
        assert_eq!(time.delta, 0.0);
    }
}
