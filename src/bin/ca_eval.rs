//! ca-eval
//!
//! Runs evaluation episodes for a registered experiment and reports the
//! aggregated statistics. Episodes are played out by the scripted backend.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ca_experiments::env::{create_env, ScriptedEnv};
use ca_experiments::registry::{self, PolicyConfig};
use ca_experiments::rollout::{EpisodeRecord, EpisodeRunner, EvaluationSummary, OfflineRlRecord};
use ca_experiments::{generate_id, store_stats, Cell, ExperimentConfig, Record, ResultsTable};

#[derive(Parser)]
#[command(name = "ca-eval")]
#[command(version, about = "Collision-avoidance policy evaluation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a registered experiment
    Eval(EvalArgs),

    /// List registered experiments
    List,
}

#[derive(clap::Args)]
struct EvalArgs {
    /// Experiment name (see `list`)
    #[arg(long)]
    experiment: String,

    /// Number of episodes
    #[arg(long, default_value = "10")]
    episodes: u32,

    /// Number of agents per episode
    #[arg(long, default_value = "4")]
    agents: usize,

    /// Base random seed; episode `i` uses `seed + i`
    #[arg(long, default_value = "0")]
    seed: u64,

    /// JSON experiment config
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the step ceiling
    #[arg(long)]
    max_episode_length: Option<u32>,

    /// Flat single-agent observations
    #[arg(long)]
    single_agent: bool,

    /// Comma-separated observation fields
    #[arg(long, value_delimiter = ',')]
    states: Option<Vec<String>>,

    /// Record per-agent trajectories (written to `--records`)
    #[arg(long, requires = "records")]
    generate_dataset: bool,

    /// Record offline-RL arrays (written to `--records`)
    #[arg(long, requires = "records")]
    offline_rl: bool,

    /// Write recorded episodes to this path, one JSON object per line
    #[arg(long)]
    records: Option<PathBuf>,

    /// Write one CSV row per episode to this path
    #[arg(long)]
    output: Option<PathBuf>,
}

/// One line of the `--records` output.
#[derive(Serialize)]
struct RecordLine<'a> {
    run_id: &'a str,
    episode: u32,
    seed: u64,
    dataset: Option<&'a EpisodeRecord>,
    offline_rl: Option<&'a OfflineRlRecord>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Eval(args) => eval(args)?,
        Commands::List => list(),
    }

    Ok(())
}

fn list() {
    for (name, cfg) in registry::POLICIES {
        let checkpoint = cfg
            .policy
            .checkpoint()
            .map(|c| c.path().display().to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("{:<24} {:<12} {}", name, cfg.policy.id(), checkpoint);
    }
}

fn load_config(args: &EvalArgs) -> Result<ExperimentConfig> {
    let mut config = match &args.config {
        Some(path) => ExperimentConfig::from_path(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => ExperimentConfig::default(),
    };
    if let Some(max) = args.max_episode_length {
        config.rollout.max_episode_length = max;
    }
    if args.single_agent {
        config.env.train_single_agent = true;
    }
    if let Some(states) = &args.states {
        config.env.states_in_obs = states.clone();
    }
    config.rollout.generate_dataset |= args.generate_dataset;
    config.rollout.record_offline_rl |= args.offline_rl;
    config.validate()?;
    if config.rollout.records_steps() && args.records.is_none() {
        bail!("recording is enabled in the config but no --records path was given");
    }
    Ok(config)
}

fn hyperparameters(
    run_id: &str,
    experiment: &str,
    policy: &PolicyConfig,
    num_agents: usize,
    seed: u64,
    episode: u32,
) -> Record {
    let mut hp = Record::new();
    hp.insert("run_id", run_id);
    hp.insert("experiment", experiment);
    hp.insert("policy", policy.policy.id());
    if let Some(ckpt) = policy.policy.checkpoint() {
        hp.insert("checkpoint", ckpt.name);
    }
    hp.insert("num_agents", Cell::Int(num_agents as i64));
    hp.insert("seed", Cell::Int(seed as i64));
    hp.insert("episode", episode);
    hp
}

fn eval(args: EvalArgs) -> Result<()> {
    let policy = registry::lookup(&args.experiment)?;
    let config = load_config(&args)?;
    let runner = EpisodeRunner::new(config.rollout.clone());
    let run_id = generate_id();

    info!(
        run = %run_id,
        experiment = %args.experiment,
        policy = %policy.policy,
        episodes = args.episodes,
        agents = args.agents,
        "starting evaluation"
    );

    let mut records = match &args.records {
        Some(path) if config.rollout.records_steps() => {
            let file =
                File::create(path).with_context(|| format!("creating {}", path.display()))?;
            Some(BufWriter::new(file))
        }
        _ => None,
    };

    let mut table = ResultsTable::new();
    let mut all_stats = Vec::with_capacity(args.episodes as usize);

    for i in 0..args.episodes {
        let seed = args.seed.wrapping_add(u64::from(i));
        let scripted = ScriptedEnv::random(args.agents, config.rollout.max_episode_length, seed)
            .with_policy(policy.policy.id());
        let mut env = create_env(scripted, &config.env)?;

        let episode = runner
            .run(&mut env)
            .with_context(|| format!("episode {}", i))?;

        info!(
            episode = i,
            outcome = %episode.stats.outcome,
            steps = episode.stats.steps,
            reward = episode.stats.reward_sum(),
            "episode done"
        );
        if let Some(writer) = records.as_mut() {
            let line = RecordLine {
                run_id: &run_id,
                episode: i,
                seed,
                dataset: episode.record.as_ref(),
                offline_rl: episode.offline.as_ref(),
            };
            serde_json::to_writer(&mut *writer, &line)?;
            writeln!(writer)?;
        }

        let hp = hyperparameters(&run_id, &args.experiment, policy, args.agents, seed, i);
        table = store_stats(&table, &hp, &episode.stats);
        all_stats.push(episode.stats);
    }

    if let (Some(mut writer), Some(path)) = (records, &args.records) {
        writer.flush()?;
        info!(path = %path.display(), episodes = args.episodes, "episode records written");
    }

    println!("{}", EvaluationSummary::from_stats(&all_stats));

    if let Some(path) = &args.output {
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        table.write_csv(&mut writer)?;
        writer.flush()?;
        info!(path = %path.display(), rows = table.len(), "results written");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval_args(extra: &[&str]) -> Result<EvalArgs, clap::Error> {
        let argv = ["ca-eval", "eval", "--experiment", "RVO"]
            .into_iter()
            .chain(extra.iter().copied());
        match Cli::try_parse_from(argv)?.command {
            Commands::Eval(args) => Ok(args),
            Commands::List => unreachable!(),
        }
    }

    #[test]
    fn recording_flags_require_records_path() {
        assert!(eval_args(&["--generate-dataset"]).is_err());
        assert!(eval_args(&["--offline-rl"]).is_err());
        let args = eval_args(&["--offline-rl", "--records", "out.jsonl"]).unwrap();
        assert_eq!(args.records, Some(PathBuf::from("out.jsonl")));
        assert!(load_config(&args).unwrap().rollout.record_offline_rl);
    }

    #[test]
    fn config_recording_needs_records_path() {
        let path = std::env::temp_dir().join(format!("ca-eval-{}.json", generate_id()));
        std::fs::write(&path, r#"{"rollout": {"generate_dataset": true}}"#).unwrap();
        let config = path.to_string_lossy().into_owned();

        let args = eval_args(&["--config", &config]).unwrap();
        let err = load_config(&args).unwrap_err();
        assert!(err.to_string().contains("--records"));

        let args = eval_args(&["--config", &config, "--records", "out.jsonl"]).unwrap();
        assert!(load_config(&args).unwrap().rollout.generate_dataset);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn zero_step_ceiling_is_a_config_error() {
        let args = eval_args(&["--max-episode-length", "0"]).unwrap();
        assert!(load_config(&args).is_err());
    }
}
