/// Frames that stall longer than this many ticks do not try to catch up.
pub const MAX_TICKS_PER_FRAME: u32 = 5;

/// Turns variable frame times into a count of fixed input ticks.
#[derive(Debug, Clone)]
pub struct InputClock {
    interval_seconds: f32,
    accumulator: f32,
}

impl InputClock {
    pub fn from_millis(interval_ms: u64) -> Self {
        Self {
            interval_seconds: (interval_ms.max(1) as f32) / 1000.0,
            accumulator: 0.0,
        }
    }

    pub fn interval_seconds(&self) -> f32 {
        self.interval_seconds
    }

    pub fn advance(&mut self, frame_seconds: f32) -> u32 {
        if frame_seconds.is_finite() && frame_seconds > 0.0 {
            self.accumulator += frame_seconds;
        }

        let mut ticks = 0;
        while self.accumulator >= self.interval_seconds {
            self.accumulator -= self.interval_seconds;
            ticks += 1;
            if ticks == MAX_TICKS_PER_FRAME {
                self.accumulator = self.accumulator.min(self.interval_seconds);
                break;
            }
        }
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_partial_frames() {
        let mut clock = InputClock::from_millis(50);
        assert_eq!(clock.advance(0.02), 0);
        assert_eq!(clock.advance(0.02), 0);
        assert_eq!(clock.advance(0.02), 1);
    }

    #[test]
    fn long_frames_emit_several_ticks_up_to_cap() {
        let mut clock = InputClock::from_millis(50);
        assert_eq!(clock.advance(0.125), 2);
        assert_eq!(clock.advance(10.0), MAX_TICKS_PER_FRAME);
        assert!(clock.advance(0.0) <= 1);
    }

    #[test]
    fn ignores_bogus_frame_times() {
        let mut clock = InputClock::from_millis(0);
        assert_eq!(clock.interval_seconds(), 0.001);
        assert_eq!(clock.advance(f32::NAN), 0);
        assert_eq!(clock.advance(-1.0), 0);
    }
}
