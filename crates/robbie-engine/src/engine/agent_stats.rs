use serde::{Deserialize, Serialize};

/// Reward and penalty magnitudes for each episode outcome.
///
/// All values are non-negative magnitudes. The sign is applied by the
/// [`AgentStats`] method that records the outcome, so a penalty of `5` always
/// lowers the score by 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Points gained for picking up rubbish.
    pub pick_up_reward: u32,
    /// Points lost for a pick-up attempt on a clean cell.
    pub pick_up_penalty: u32,
    /// Points lost for walking into the wall.
    pub bump_penalty: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            pick_up_reward: 10,
            pick_up_penalty: 5,
            bump_penalty: 1,
        }
    }
}

/// Cumulative performance counters of one agent.
///
/// Counters span every episode the agent plays in a generation; nothing is
/// reset between episodes.
///
/// # Example
///
/// ```
/// use robbie_engine::AgentStats;
///
/// let mut stats = AgentStats::new();
/// stats.reward(10);
/// stats.penalize_bump(1);
/// stats.penalize_false_pick_up(5);
///
/// assert_eq!(stats.score(), 4);
/// assert_eq!(stats.pick_ups(), 1);
/// assert_eq!(stats.bumps(), 1);
/// assert_eq!(stats.false_pick_ups(), 1);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentStats {
    score: i64,
    pick_ups: u64,
    false_pick_ups: u64,
    bumps: u64,
    rubbish_seen: u64,
    rubbish_missed: u64,
}

impl AgentStats {
    /// Creates a tracker with every counter at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            pick_ups: 0,
            false_pick_ups: 0,
            bumps: 0,
            rubbish_seen: 0,
            rubbish_missed: 0,
        }
    }

    #[must_use]
    pub const fn score(&self) -> i64 {
        self.score
    }

    #[must_use]
    pub const fn pick_ups(&self) -> u64 {
        self.pick_ups
    }

    #[must_use]
    pub const fn false_pick_ups(&self) -> u64 {
        self.false_pick_ups
    }

    #[must_use]
    pub const fn bumps(&self) -> u64 {
        self.bumps
    }

    /// Total rubbish present at the start of every episode played.
    #[must_use]
    pub const fn rubbish_seen(&self) -> u64 {
        self.rubbish_seen
    }

    /// Total rubbish left behind at the end of every episode played.
    #[must_use]
    pub const fn rubbish_missed(&self) -> u64 {
        self.rubbish_missed
    }

    /// Records a successful pick-up.
    pub const fn reward(&mut self, points: u32) {
        self.score += points as i64;
        self.pick_ups += 1;
    }

    /// Records a pick-up attempt on a clean cell.
    pub const fn penalize_false_pick_up(&mut self, points: u32) {
        self.score -= points as i64;
        self.false_pick_ups += 1;
    }

    /// Records a step into the wall.
    pub const fn penalize_bump(&mut self, points: u32) {
        self.score -= points as i64;
        self.bumps += 1;
    }

    pub const fn accumulate_seen(&mut self, count: usize) {
        self.rubbish_seen += count as u64;
    }

    pub const fn accumulate_missed(&mut self, count: usize) {
        self.rubbish_missed += count as u64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_zeroed() {
        assert_eq!(AgentStats::new(), AgentStats::default());
        assert_eq!(AgentStats::new().score(), 0);
    }

    #[test]
    fn test_penalties_subtract_magnitudes() {
        let scoring = ScoringConfig::default();
        let mut stats = AgentStats::new();
        stats.penalize_false_pick_up(scoring.pick_up_penalty);
        stats.penalize_bump(scoring.bump_penalty);
        stats.penalize_bump(scoring.bump_penalty);
        assert_eq!(stats.score(), -7);
        assert_eq!(stats.false_pick_ups(), 1);
        assert_eq!(stats.bumps(), 2);
        assert_eq!(stats.pick_ups(), 0);
    }

    #[test]
    fn test_rubbish_totals_accumulate() {
        let mut stats = AgentStats::new();
        stats.accumulate_seen(25);
        stats.accumulate_missed(3);
        stats.accumulate_seen(20);
        stats.accumulate_missed(0);
        assert_eq!(stats.rubbish_seen(), 45);
        assert_eq!(stats.rubbish_missed(), 3);
        assert_eq!(stats.score(), 0);
    }
}
