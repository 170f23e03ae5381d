//! Aggregation of episode statistics over many evaluation episodes.

use std::collections::HashMap;
use std::fmt;

use super::stats::{EpisodeStats, Outcome};

/// Aggregated metrics over a set of episodes.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationSummary {
    /// Number of episodes aggregated.
    pub n_episodes: usize,
    /// Mean over episodes of the summed per-agent returns.
    pub mean_total_reward: f64,
    /// Mean number of steps per episode.
    pub mean_steps: f64,
    /// Mean fraction of agents that collided.
    pub mean_pct_collisions: f64,
    /// Mean fraction of agents that reached their goal.
    pub mean_pct_at_goal: f64,
    /// Mean fraction of agents that neither collided nor arrived.
    pub mean_pct_stuck: f64,
    /// Mean extra time to goal over the agents of fully successful episodes.
    pub mean_extra_time_at_goal: Option<f64>,
    /// Number of episodes per outcome.
    pub outcomes: HashMap<Outcome, usize>,
}

impl EvaluationSummary {
    /// Aggregates the given episodes. An empty slice yields all-zero means.
    pub fn from_stats(episodes: &[EpisodeStats]) -> Self {
        let mut outcomes = HashMap::new();
        for stats in episodes {
            *outcomes.entry(stats.outcome).or_insert(0) += 1;
        }

        // Per-agent outcomes are not kept in the stats.
        let arrived: Vec<f64> = episodes
            .iter()
            .filter(|s| s.outcome == Outcome::AllAtGoal)
            .flat_map(|s| s.extra_time_to_goal.iter().copied())
            .collect();
        let mean_extra_time_at_goal = if arrived.is_empty() {
            None
        } else {
            Some(arrived.iter().sum::<f64>() / arrived.len() as f64)
        };

        Self {
            n_episodes: episodes.len(),
            mean_total_reward: mean_of(episodes, EpisodeStats::reward_sum),
            mean_steps: mean_of(episodes, |s| s.steps as f64),
            mean_pct_collisions: mean_of(episodes, |s| s.pct_collisions),
            mean_pct_at_goal: mean_of(episodes, |s| s.pct_at_goal),
            mean_pct_stuck: mean_of(episodes, |s| s.pct_stuck),
            mean_extra_time_at_goal,
            outcomes,
        }
    }

    /// Number of episodes that ended with `outcome`.
    pub fn count(&self, outcome: Outcome) -> usize {
        self.outcomes.get(&outcome).copied().unwrap_or(0)
    }
}

fn mean_of(episodes: &[EpisodeStats], f: impl Fn(&EpisodeStats) -> f64) -> f64 {
    if episodes.is_empty() {
        0.0
    } else {
        episodes.iter().map(f).sum::<f64>() / episodes.len() as f64
    }
}

impl fmt::Display for EvaluationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "=== Evaluation Summary ({} episodes) ===",
            self.n_episodes
        )?;
        writeln!(f, "  Mean total reward:   {:.3}", self.mean_total_reward)?;
        writeln!(f, "  Mean steps:          {:.1}", self.mean_steps)?;
        writeln!(
            f,
            "  Mean % collisions:   {:.1}%",
            self.mean_pct_collisions * 100.0
        )?;
        writeln!(f, "  Mean % at goal:      {:.1}%", self.mean_pct_at_goal * 100.0)?;
        writeln!(f, "  Mean % stuck:        {:.1}%", self.mean_pct_stuck * 100.0)?;
        match self.mean_extra_time_at_goal {
            Some(t) => writeln!(f, "  Mean extra time:     {:.2}", t)?,
            None => writeln!(f, "  Mean extra time:     n/a")?,
        }
        for outcome in Outcome::all() {
            writeln!(f, "  {:<20} {}", format!("{}:", outcome), self.count(outcome))?;
        }
        Ok(())
    }
}
