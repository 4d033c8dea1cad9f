use crate::config::SimulationConfig;

/// Frame deltas above this are treated as a stall and capped.
pub const MAX_FRAME_DELTA: f32 = 0.1;

/// Turns wall-clock frame time into simulation time: pause and speed
/// multiplier.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationClock {
    speed: f32,
    min_speed: f32,
    max_speed: f32,
    step: f32,
    paused: bool,
}

impl SimulationClock {
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            speed: config.speed.clamp(config.min_speed, config.max_speed),
            min_speed: config.min_speed,
            max_speed: config.max_speed,
            step: config.speed_step,
            paused: false,
        }
    }

    /// Simulation seconds for a frame that took `frame_dt` real seconds.
    pub fn advance(&self, frame_dt: f32) -> f32 {
        if self.paused {
            return 0.0;
        }
        frame_dt.clamp(0.0, MAX_FRAME_DELTA) * self.speed
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    pub fn speed_up(&mut self) -> f32 {
        self.speed = (self.speed + self.step).min(self.max_speed);
        self.speed
    }

    pub fn slow_down(&mut self) -> f32 {
        self.speed = (self.speed - self.step).max(self.min_speed);
        self.speed
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn max_speed(&self) -> f32 {
        self.max_speed
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new(&SimulationConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn pause_freezes_time() {
        let mut clock = SimulationClock::default();
        assert_abs_diff_eq!(clock.advance(0.016), 0.016, epsilon = 1e-6);
        assert!(clock.toggle_pause());
        assert_eq!(clock.advance(0.016), 0.0);
        assert!(!clock.toggle_pause());
    }

    #[test]
    fn long_or_negative_frames_are_clamped() {
        let clock = SimulationClock::default();
        assert_abs_diff_eq!(clock.advance(2.0), MAX_FRAME_DELTA, epsilon = 1e-6);
        assert_eq!(clock.advance(-1.0), 0.0);
    }

    #[test]
    fn speed_steps_stay_in_range() {
        let mut clock = SimulationClock::default();
        for _ in 0..50 {
            clock.speed_up();
        }
        assert_eq!(clock.speed(), 5.0);
        assert_abs_diff_eq!(clock.advance(0.05), 0.25, epsilon = 1e-6);
        for _ in 0..50 {
            clock.slow_down();
        }
        assert_eq!(clock.speed(), 0.1);
    }
}
