//! Scenario tests for the episode runner, end to end through the factory
//! and the results table.

use super::*;
use crate::env::{
    create_env, AgentView, EnvConfig, Environment, Fate, Pose, Position, ScriptedAgent,
    ScriptedEnv,
};
use crate::results::{store_stats, Cell, Record, ResultsTable};

fn line_env(fates: &[Fate], dt: f64) -> ScriptedEnv {
    let agents = fates
        .iter()
        .enumerate()
        .map(|(i, fate)| {
            let y = 2.0 * i as f64;
            ScriptedAgent::new(i, Position::new(0.0, y), Position::new(10.0, y)).with_fate(*fate)
        })
        .collect();
    ScriptedEnv::new(agents, dt)
}

fn dataset_config(max_episode_length: u32) -> RolloutConfig {
    RolloutConfig {
        max_episode_length,
        generate_dataset: true,
        record_offline_rl: false,
    }
}

mod outcomes {
    use super::*;

    #[test]
    fn goal_and_collision_on_same_step() {
        let mut env = line_env(
            &[Fate::ReachGoal { at_step: 5 }, Fate::Collide { at_step: 5 }],
            0.1,
        );
        let episode = EpisodeRunner::default().run(&mut env).unwrap();
        let stats = &episode.stats;
        assert_eq!(stats.steps, 5);
        assert_eq!(stats.outcome, Outcome::Collision);
        assert_eq!(stats.pct_collisions, 0.5);
        assert_eq!(stats.pct_at_goal, 0.5);
        assert_eq!(stats.pct_stuck, 0.0);
        assert_eq!(episode.termination, Termination::Terminated);
    }

    #[test]
    fn idle_agents_time_out_as_stuck() {
        let mut env = line_env(&[Fate::Wander, Fate::Wander, Fate::Wander], 0.1);
        let episode = EpisodeRunner::new(dataset_config(100))
            .run(&mut env)
            .unwrap();
        assert_eq!(episode.stats.steps, 100);
        assert!(episode.timed_out());
        assert_eq!(episode.stats.outcome, Outcome::Stuck);
        assert_eq!(episode.stats.pct_stuck, 1.0);

        let record = episode.record.unwrap();
        assert_eq!(record.terminals.last(), Some(&true));
        assert_eq!(record.timeouts.last(), Some(&true));
        assert!(record.timeouts[..99].iter().all(|t| !t));
        assert!(record.terminals[..99].iter().all(|t| !t));
    }

    #[test]
    fn natural_end_on_the_ceiling_still_flags_timeout() {
        let mut env = line_env(&[Fate::ReachGoal { at_step: 10 }], 0.1);
        let episode = EpisodeRunner::new(dataset_config(10)).run(&mut env).unwrap();
        assert_eq!(episode.stats.steps, 10);
        assert!(episode.timed_out());
        assert_eq!(episode.stats.outcome, Outcome::AllAtGoal);
    }

    #[test]
    fn partial_arrival_is_stuck_not_all_at_goal() {
        let mut env = line_env(&[Fate::ReachGoal { at_step: 2 }, Fate::Wander], 0.1);
        let episode = EpisodeRunner::new(RolloutConfig::with_max_episode_length(20))
            .run(&mut env)
            .unwrap();
        assert_eq!(episode.stats.outcome, Outcome::Stuck);
        assert_eq!(episode.stats.pct_at_goal, 0.5);
        assert_eq!(episode.stats.pct_stuck, 0.5);
    }

    #[test]
    fn reward_and_time_accounting() {
        let mut env = line_env(
            &[Fate::ReachGoal { at_step: 4 }, Fate::Collide { at_step: 2 }],
            0.5,
        );
        let episode = EpisodeRunner::default().run(&mut env).unwrap();
        let stats = &episode.stats;
        assert_eq!(stats.total_reward, vec![1.0, -0.25]);
        assert!((stats.reward_sum() - 0.75).abs() < 1e-12);
        assert_eq!(stats.time_to_goal, vec![2.0, 1.0]);
        assert!((stats.total_time_to_goal - 3.0).abs() < 1e-12);
        // straight-line time is 10.0 at pref_speed 1.0
        assert!((stats.extra_time_to_goal[0] + 8.0).abs() < 1e-12);
        assert_eq!(stats.policies, vec!["scripted".to_string(), "scripted".to_string()]);
    }

    #[test]
    fn invariants_hold_for_random_scenarios() {
        for seed in 0..25 {
            let mut env = ScriptedEnv::random(6, 60, seed);
            let runner = EpisodeRunner::new(RolloutConfig::with_max_episode_length(40));
            let episode = runner.run(&mut env).unwrap();
            let stats = &episode.stats;
            assert!(stats.steps <= 40);
            if stats.steps == 40 {
                assert!(episode.timed_out());
            }
            let sum = stats.pct_collisions + stats.pct_at_goal + stats.pct_stuck;
            assert!((sum - 1.0).abs() < 1e-9, "seed {}: {}", seed, sum);
            assert_eq!(episode.agents.len(), 6);
            assert_eq!(stats.time_to_goal.len(), 6);
            assert_eq!(stats.total_reward.len(), 6);
            if episode.agents.iter().any(|a| a.in_collision()) {
                assert_eq!(stats.outcome, Outcome::Collision);
            }
        }
    }
}

mod recording {
    use super::*;

    #[test]
    fn dataset_is_agent_major_in_step_order() {
        let mut env = line_env(
            &[Fate::ReachGoal { at_step: 4 }, Fate::Collide { at_step: 4 }],
            1.0,
        );
        let episode = EpisodeRunner::new(dataset_config(50)).run(&mut env).unwrap();
        let record = episode.record.unwrap();

        assert_eq!(record.steps, 4);
        assert_eq!(record.num_agents(), 2);
        assert_eq!(record.states[0].len(), 4);
        assert_eq!(record.states[1].len(), 4);
        for i in 0..4 {
            let x0 = 10.0 * (i + 1) as f64 / 4.0;
            let x1 = 5.0 * (i + 1) as f64 / 4.0;
            assert_eq!(record.states[0][i], Pose::new(Position::new(x0, 0.0), 0.0));
            assert_eq!(record.states[1][i], Pose::new(Position::new(x1, 2.0), 0.0));
            assert!((record.actions[0][i].speed - 2.5).abs() < 1e-12);
            assert!((record.actions[1][i].speed - 1.25).abs() < 1e-12);
        }
        assert_eq!(record.rewards[0], vec![0.0, 0.0, 0.0, 1.0]);
        assert_eq!(record.rewards[1], vec![0.0, 0.0, 0.0, -0.25]);
        assert_eq!(record.terminals, vec![false, false, false, true]);
        assert_eq!(record.timeouts, vec![false; 4]);
        assert_eq!(record.goals, vec![Position::new(10.0, 0.0), Position::new(10.0, 2.0)]);
        assert_eq!(record.radii, vec![0.5, 0.5]);
    }

    #[test]
    fn offline_record_through_single_agent_factory() {
        let raw = line_env(
            &[
                Fate::ReachGoal { at_step: 3 },
                Fate::ReachGoal { at_step: 3 },
                Fate::ReachGoal { at_step: 3 },
            ],
            0.1,
        );
        let config = EnvConfig {
            train_single_agent: true,
            states_in_obs: vec!["pos".into(), "heading".into()],
            max_num_agents_in_environment: 8,
        };
        let mut env = create_env(raw, &config).unwrap();
        let rollout = RolloutConfig {
            record_offline_rl: true,
            ..RolloutConfig::default()
        };
        let episode = EpisodeRunner::new(rollout).run(&mut env).unwrap();
        assert!(episode.record.is_none());
        let offline = episode.offline.unwrap();
        assert_eq!(offline.observations.shape(), &[3, 3]);
        assert_eq!(offline.actions.shape(), &[3, 3, 2]);
        assert_eq!(offline.rewards.shape(), &[3, 3]);
        assert_eq!(offline.observations[[2, 0]], 10.0);
    }

    #[test]
    fn offline_record_through_multi_agent_factory() {
        let raw = line_env(&[Fate::Collide { at_step: 2 }, Fate::Wander], 0.1);
        let config = EnvConfig {
            train_single_agent: false,
            states_in_obs: vec!["pos".into(), "radius".into()],
            max_num_agents_in_environment: 4,
        };
        let mut env = create_env(raw, &config).unwrap();
        let rollout = RolloutConfig {
            max_episode_length: 6,
            generate_dataset: true,
            record_offline_rl: true,
        };
        let episode = EpisodeRunner::new(rollout).run(&mut env).unwrap();
        let offline = episode.offline.unwrap();
        assert_eq!(offline.observations.shape(), &[6, 4, 3]);
        assert_eq!(offline.timeouts[[5]], 1.0);
        assert_eq!(episode.record.unwrap().steps, 6);
        assert_eq!(env.num_agents(), 2);
    }
}

mod accumulation {
    use super::*;

    #[test]
    fn one_row_per_episode() {
        let runner = EpisodeRunner::new(RolloutConfig::with_max_episode_length(30));
        let mut table = ResultsTable::new();
        for seed in 0..5u64 {
            let mut env = ScriptedEnv::random(4, 30, seed);
            let episode = runner.run(&mut env).unwrap();
            let mut hp = Record::new();
            hp.insert("seed", Cell::Int(seed as i64));
            hp.insert("num_agents", Cell::Int(4));
            table = store_stats(&table, &hp, &episode.stats);
        }
        assert_eq!(table.len(), 5);
        for row in table.rows() {
            assert!(row.get("seed").is_some());
            assert!(row.get("outcome").is_some());
            assert!(row.get("% stuck").is_some());
        }
        assert_eq!(table.columns()[0], "seed");
    }
}
