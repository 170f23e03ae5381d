//! Scripted environment used for tests and dry runs.
//!
//! Agents do not run any collision-avoidance dynamics: each one follows a
//! predetermined [`Fate`] (reach the goal at step `k`, collide at step `k`,
//! or never finish). This exercises the harness end to end without an
//! external simulator.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use super::agent::{observe, AgentView};
use super::traits::{AgentObservation, DictObservation, Environment, StepInfo, Transition};
use super::types::{AgentAction, Position, StateField};

/// Reward granted on the step an agent reaches its goal.
pub const REWARD_AT_GOAL: f64 = 1.0;
/// Reward granted on the step an agent collides.
pub const REWARD_COLLISION: f64 = -0.25;

const PAST_ACTIONS_LEN: usize = 3;

/// Predetermined outcome of a scripted agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fate {
    /// Travels in a straight line and arrives at its goal on `at_step`.
    ReachGoal { at_step: u32 },
    /// Travels toward its goal and collides on `at_step`, halfway there.
    Collide { at_step: u32 },
    /// Never moves and never finishes.
    Wander,
}

/// A scripted agent.
#[derive(Debug, Clone)]
pub struct ScriptedAgent {
    pub id: usize,
    pub start: Position,
    pub position: Position,
    pub heading: f64,
    pub goal: Position,
    pub radius: f64,
    pub pref_speed: f64,
    pub policy_id: String,
    /// Most recent action first.
    pub past_actions: Vec<AgentAction>,
    pub t: f64,
    pub in_collision: bool,
    pub is_at_goal: bool,
    pub fate: Fate,
}

impl ScriptedAgent {
    /// Creates an agent at `start`, facing `goal`, that never finishes.
    pub fn new(id: usize, start: Position, goal: Position) -> Self {
        Self {
            id,
            start,
            position: start,
            heading: start.bearing_to(&goal),
            goal,
            radius: 0.5,
            pref_speed: 1.0,
            policy_id: "scripted".to_string(),
            past_actions: vec![AgentAction::default(); PAST_ACTIONS_LEN],
            t: 0.0,
            in_collision: false,
            is_at_goal: false,
            fate: Fate::Wander,
        }
    }

    pub fn with_fate(mut self, fate: Fate) -> Self {
        self.fate = fate;
        self
    }

    pub fn with_policy(mut self, policy_id: impl Into<String>) -> Self {
        self.policy_id = policy_id.into();
        self
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_pref_speed(mut self, pref_speed: f64) -> Self {
        self.pref_speed = pref_speed;
        self
    }

    fn is_done(&self) -> bool {
        self.in_collision || self.is_at_goal
    }

    /// Advances this agent to `step` and returns its reward for the step.
    fn advance(&mut self, step: u32, dt: f64) -> f64 {
        if self.is_done() {
            return 0.0;
        }
        self.t += dt;

        let (target, reward) = match self.fate {
            Fate::ReachGoal { at_step } => {
                let frac = step as f64 / at_step.max(1) as f64;
                if step >= at_step {
                    self.is_at_goal = true;
                }
                let r = if self.is_at_goal { REWARD_AT_GOAL } else { 0.0 };
                (self.start.lerp(&self.goal, frac), r)
            }
            Fate::Collide { at_step } => {
                let frac = 0.5 * step as f64 / at_step.max(1) as f64;
                if step >= at_step {
                    self.in_collision = true;
                }
                let r = if self.in_collision { REWARD_COLLISION } else { 0.0 };
                (self.start.lerp(&self.goal, frac), r)
            }
            Fate::Wander => (self.position, 0.0),
        };

        let speed = self.position.distance_to(&target) / dt;
        let new_heading = if speed > 0.0 {
            self.position.bearing_to(&target)
        } else {
            self.heading
        };
        let action = AgentAction::new(speed, super::agent::wrap_angle(new_heading - self.heading));
        self.past_actions.insert(0, action);
        self.past_actions.truncate(PAST_ACTIONS_LEN);
        self.position = target;
        self.heading = new_heading;
        reward
    }

    fn observation(&self) -> AgentObservation {
        StateField::all()
            .into_iter()
            .map(|field| (field, observe(self, field)))
            .collect()
    }
}

impl AgentView for ScriptedAgent {
    fn radius(&self) -> f64 {
        self.radius
    }

    fn position(&self) -> Position {
        self.position
    }

    fn heading(&self) -> f64 {
        self.heading
    }

    fn goal(&self) -> Position {
        self.goal
    }

    fn pref_speed(&self) -> f64 {
        self.pref_speed
    }

    fn policy_id(&self) -> &str {
        &self.policy_id
    }

    fn latest_action(&self) -> AgentAction {
        self.past_actions.first().copied().unwrap_or_default()
    }

    fn elapsed_time(&self) -> f64 {
        self.t
    }

    fn straight_line_time_to_goal(&self) -> f64 {
        self.start.distance_to(&self.goal) / self.pref_speed
    }

    fn in_collision(&self) -> bool {
        self.in_collision
    }

    fn is_at_goal(&self) -> bool {
        self.is_at_goal
    }
}

/// Failure injected into a scripted environment.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScriptedEnvError {
    #[error("Scripted failure at step {0}")]
    Injected(u32),
}

/// Environment whose agents follow predetermined fates.
///
/// The episode terminates once every agent is at its goal or in collision.
#[derive(Debug, Clone)]
pub struct ScriptedEnv {
    agents: Vec<ScriptedAgent>,
    initial: Vec<ScriptedAgent>,
    dt: f64,
    step_count: u32,
    fail_at_step: Option<u32>,
}

impl ScriptedEnv {
    /// Creates an environment hosting `agents`, advancing `dt` seconds per step.
    pub fn new(agents: Vec<ScriptedAgent>, dt: f64) -> Self {
        Self {
            initial: agents.clone(),
            agents,
            dt,
            step_count: 0,
            fail_at_step: None,
        }
    }

    /// Creates `n_agents` agents on a circle, each heading to the opposite
    /// side, with fates drawn from `seed`.
    ///
    /// Roughly 60% of agents reach their goal, 20% collide and 20% never
    /// finish; finishing steps fall in `1..=horizon`.
    pub fn random(n_agents: usize, horizon: u32, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let horizon = horizon.max(1);
        let circle = 5.0;
        let agents = (0..n_agents)
            .map(|i| {
                let angle = std::f64::consts::TAU * i as f64 / n_agents as f64;
                let start = Position::new(circle * angle.cos(), circle * angle.sin());
                let goal = Position::new(-start.x, -start.y);
                let fate = match rng.gen_range(0..10) {
                    0..=5 => Fate::ReachGoal {
                        at_step: rng.gen_range(1..=horizon),
                    },
                    6 | 7 => Fate::Collide {
                        at_step: rng.gen_range(1..=horizon),
                    },
                    _ => Fate::Wander,
                };
                ScriptedAgent::new(i, start, goal)
                    .with_fate(fate)
                    .with_radius(rng.gen_range(0.2..0.8))
                    .with_pref_speed(rng.gen_range(0.5..1.5))
            })
            .collect();
        Self::new(agents, 0.1)
    }

    /// Assigns `policy_id` to every agent.
    pub fn with_policy(mut self, policy_id: &str) -> Self {
        for agent in self.agents.iter_mut().chain(self.initial.iter_mut()) {
            agent.policy_id = policy_id.to_string();
        }
        self
    }

    /// Makes the `step`-th call to [`Environment::step`] fail.
    pub fn fail_at(mut self, step: u32) -> Self {
        self.fail_at_step = Some(step);
        self
    }

    pub fn step_count(&self) -> u32 {
        self.step_count
    }

    fn observe_all(&self) -> DictObservation {
        self.agents.iter().map(ScriptedAgent::observation).collect()
    }
}

impl Environment for ScriptedEnv {
    type Observation = DictObservation;
    type Agent = ScriptedAgent;
    type Error = ScriptedEnvError;

    fn step(
        &mut self,
        _action: Option<&[AgentAction]>,
    ) -> Result<Transition<DictObservation>, ScriptedEnvError> {
        self.step_count += 1;
        if self.fail_at_step == Some(self.step_count) {
            return Err(ScriptedEnvError::Injected(self.step_count));
        }

        let step = self.step_count;
        let dt = self.dt;
        let rewards = self
            .agents
            .iter_mut()
            .map(|agent| agent.advance(step, dt))
            .collect();
        let terminated = self.agents.iter().all(ScriptedAgent::is_done);

        Ok(Transition {
            observation: self.observe_all(),
            rewards,
            terminated,
            truncated: false,
            info: StepInfo::new().with_extra("step", step as f64),
        })
    }

    fn reset(&mut self) -> Result<DictObservation, ScriptedEnvError> {
        self.agents = self.initial.clone();
        self.step_count = 0;
        Ok(self.observe_all())
    }

    fn agents(&self) -> &[ScriptedAgent] {
        &self.agents
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent(fate: Fate) -> ScriptedAgent {
        ScriptedAgent::new(0, Position::new(0.0, 0.0), Position::new(10.0, 0.0)).with_fate(fate)
    }

    #[test]
    fn reach_goal_arrives_on_schedule() {
        let mut env = ScriptedEnv::new(vec![agent(Fate::ReachGoal { at_step: 4 })], 0.5);
        for _ in 0..3 {
            let t = env.step(None).unwrap();
            assert!(!t.terminated);
        }
        let t = env.step(None).unwrap();
        assert!(t.terminated);
        assert_eq!(t.rewards, vec![REWARD_AT_GOAL]);
        let a = &env.agents()[0];
        assert!(a.is_at_goal);
        assert_eq!(a.position, Position::new(10.0, 0.0));
        assert!((a.t - 2.0).abs() < 1e-12);
        assert!((a.latest_action().speed - 5.0).abs() < 1e-9);
    }

    #[test]
    fn collide_stops_halfway() {
        let mut env = ScriptedEnv::new(vec![agent(Fate::Collide { at_step: 2 })], 1.0);
        env.step(None).unwrap();
        let t = env.step(None).unwrap();
        assert!(t.terminated);
        assert_eq!(t.rewards, vec![REWARD_COLLISION]);
        assert_eq!(env.agents()[0].position, Position::new(5.0, 0.0));
    }

    #[test]
    fn wander_never_terminates() {
        let mut env = ScriptedEnv::new(vec![agent(Fate::Wander)], 1.0);
        for _ in 0..50 {
            assert!(!env.step(None).unwrap().terminated);
        }
        assert_eq!(env.agents()[0].position, Position::origin());
    }

    #[test]
    fn finished_agents_stop_accumulating_time() {
        let mut env = ScriptedEnv::new(
            vec![
                agent(Fate::ReachGoal { at_step: 1 }),
                agent(Fate::ReachGoal { at_step: 3 }),
            ],
            1.0,
        );
        for _ in 0..3 {
            env.step(None).unwrap();
        }
        assert_eq!(env.agents()[0].t, 1.0);
        assert_eq!(env.agents()[1].t, 3.0);
    }

    #[test]
    fn reset_restores_initial_agents() {
        let mut env = ScriptedEnv::new(vec![agent(Fate::ReachGoal { at_step: 1 })], 1.0);
        env.step(None).unwrap();
        assert!(env.agents()[0].is_at_goal);
        env.reset().unwrap();
        assert!(!env.agents()[0].is_at_goal);
        assert_eq!(env.step_count(), 0);
    }

    #[test]
    fn injected_failure_surfaces() {
        let mut env = ScriptedEnv::new(vec![agent(Fate::Wander)], 1.0).fail_at(2);
        assert!(env.step(None).is_ok());
        assert_eq!(env.step(None).unwrap_err(), ScriptedEnvError::Injected(2));
    }

    #[test]
    fn random_is_reproducible() {
        let a = ScriptedEnv::random(8, 30, 11);
        let b = ScriptedEnv::random(8, 30, 11);
        let fates_a: Vec<_> = a.agents().iter().map(|x| x.fate).collect();
        let fates_b: Vec<_> = b.agents().iter().map(|x| x.fate).collect();
        assert_eq!(fates_a, fates_b);
        assert_eq!(a.num_agents(), 8);
    }

    #[test]
    fn observation_covers_every_field() {
        let mut env = ScriptedEnv::new(vec![agent(Fate::Wander)], 1.0);
        let obs = env.reset().unwrap();
        assert_eq!(obs.len(), 1);
        assert_eq!(obs[0].len(), StateField::all().len());
    }
}
