use std::time::{Duration, Instant};

use crate::game::StepInfo;

/// Per-process play statistics, kept in memory only
pub struct GameMetrics {
    /// Time spent in the current game, excluding pauses
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub games_played: u32,
    pub foods_eaten: u32,
    last_update: Instant,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            elapsed_time: Duration::ZERO,
            high_score: 0,
            games_played: 0,
            foods_eaten: 0,
            last_update: Instant::now(),
        }
    }

    /// Advance the game clock; time only counts while `running`
    pub fn update(&mut self, running: bool) {
        let now = Instant::now();
        if running {
            self.elapsed_time += now.duration_since(self.last_update);
        }
        self.last_update = now;
    }

    pub fn on_game_start(&mut self) {
        self.elapsed_time = Duration::ZERO;
        self.foods_eaten = 0;
        self.last_update = Instant::now();
    }

    /// Fold the outcome of a tick into the statistics
    pub fn on_step(&mut self, info: &StepInfo, score: u32) {
        if info.ate_food {
            self.foods_eaten += 1;
        }
        if info.collision_type.is_some() {
            self.on_game_over(score);
        }
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.games_played += 1;
        if final_score > self.high_score {
            self.high_score = final_score;
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::CollisionType;

    #[test]
    fn test_time_formatting() {
        let mut metrics = GameMetrics::new();
        metrics.elapsed_time = Duration::from_secs(125);
        assert_eq!(metrics.format_time(), "02:05");

        metrics.elapsed_time = Duration::from_secs(0);
        assert_eq!(metrics.format_time(), "00:00");

        metrics.elapsed_time = Duration::from_secs(3661);
        assert_eq!(metrics.format_time(), "61:01");
    }

    #[test]
    fn test_high_score_tracking() {
        let mut metrics = GameMetrics::new();

        metrics.on_game_over(10);
        assert_eq!(metrics.high_score, 10);
        assert_eq!(metrics.games_played, 1);

        metrics.on_game_over(5);
        assert_eq!(metrics.high_score, 10); // Should not decrease
        assert_eq!(metrics.games_played, 2);

        metrics.on_game_over(15);
        assert_eq!(metrics.high_score, 15);
        assert_eq!(metrics.games_played, 3);
    }

    #[test]
    fn test_step_outcomes() {
        let mut metrics = GameMetrics::new();
        let eat = StepInfo {
            advanced: true,
            ate_food: true,
            collision_type: None,
        };
        metrics.on_step(&eat, 10);
        metrics.on_step(&StepInfo::default(), 10);
        assert_eq!(metrics.foods_eaten, 1);
        assert_eq!(metrics.games_played, 0);

        let crash = StepInfo {
            advanced: true,
            ate_food: false,
            collision_type: Some(CollisionType::Wall),
        };
        metrics.on_step(&crash, 10);
        assert_eq!(metrics.games_played, 1);
        assert_eq!(metrics.high_score, 10);
    }

    #[test]
    fn test_paused_time_not_counted() {
        let mut metrics = GameMetrics::new();
        std::thread::sleep(Duration::from_millis(30));
        metrics.update(false);
        assert_eq!(metrics.elapsed_time, Duration::ZERO);

        std::thread::sleep(Duration::from_millis(30));
        metrics.update(true);
        assert!(metrics.elapsed_time.as_millis() >= 30);

        metrics.on_game_start();
        metrics.update(true);
        assert!(metrics.elapsed_time.as_millis() < 30);
    }
}
