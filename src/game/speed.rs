use std::fmt;
use std::time::Duration;

/// Discrete game speed, 1 (slowest) to 6 (fastest)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SpeedLevel(u8);

impl SpeedLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 6;

    /// Milliseconds between ticks, indexed by level - 1
    const TICK_MILLIS: [u64; 6] = [150, 100, 80, 40, 20, 1];

    /// Create a speed level, `None` if outside [`Self::MIN`]..=[`Self::MAX`]
    pub fn new(level: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&level).then_some(Self(level))
    }

    pub fn get(&self) -> u8 {
        self.0
    }

    /// Time between two ticks at this level
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(Self::TICK_MILLIS[usize::from(self.0 - 1)])
    }

    /// One level faster, `None` at the top of the table
    pub fn faster(&self) -> Option<Self> {
        Self::new(self.0 + 1)
    }

    /// One level slower, `None` at the bottom of the table
    pub fn slower(&self) -> Option<Self> {
        self.0.checked_sub(1).and_then(Self::new)
    }
}

impl Default for SpeedLevel {
    fn default() -> Self {
        Self(4)
    }
}

impl fmt::Display for SpeedLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
