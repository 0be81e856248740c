use std::time::{Duration, Instant};

/// Wall-clock and score tracking for the header line
pub struct SessionMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub apples_eaten: u32,
    /// Clock stops once the game is over
    pub finished: bool,
}

impl SessionMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            apples_eaten: 0,
            finished: false,
        }
    }

    pub fn update(&mut self) {
        if !self.finished {
            self.elapsed_time = self.start_time.elapsed();
        }
    }

    pub fn on_apple_eaten(&mut self) {
        self.apples_eaten += 1;
    }

    pub fn on_game_over(&mut self) {
        self.update();
        self.finished = true;
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for SessionMetrics {
    fn default() -> Self {
        Self::new()
    }
}
