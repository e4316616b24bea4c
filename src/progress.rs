//! Level counter and per-level timer.

/// Source of the current time, in seconds.
pub trait Clock {
    fn now(&self) -> f64;
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameProgress {
    pub level: u32,
    levels: u32,
    started: bool,
    level_start_time: Option<f64>,
}

impl GameProgress {
    /// A fresh game on level 1. `levels` is how many levels must be cleared to win.
    pub fn new(levels: u32) -> Self {
        GameProgress {
            level: 1,
            levels,
            started: false,
            level_start_time: None,
        }
    }

    pub fn levels(&self) -> u32 {
        self.levels
    }

    #[cfg(test)]
    pub fn started(&self) -> bool {
        self.started
    }

    pub fn start_level(&mut self, clock: &dyn Clock) {
        self.started = true;
        self.level_start_time = Some(clock.now());
        crate::debug_progress!("Level {} started", self.level);
    }

    /// Whole seconds spent on the current level, 0 until the level is started.
    pub fn level_time(&self, clock: &dyn Clock) -> u64 {
        match (self.started, self.level_start_time) {
            (true, Some(start)) => (clock.now() - start).max(0.0).round() as u64,
            _ => 0,
        }
    }

    /// Moves to the next level. The timer stays stopped until `start_level`.
    pub fn next_level(&mut self) {
        self.level += 1;
        self.started = false;
        crate::debug_progress!("advanced to Level {}", self.level);
    }

    pub fn reset(&mut self) {
        self.level = 1;
        self.started = false;
        self.level_start_time = None;
    }

    pub fn is_game_finished(&self) -> bool {
        self.level > self.levels
    }
}
