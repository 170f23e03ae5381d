//! Catalog of pretrained policies evaluated in experiments.

use super::error::RegistryError;
use super::policy::{AgentSorting, Checkpoint, PolicyConfig, PolicyKind, Sensor, SensorArgs};

const fn ga3c(dir: &'static str, name: &'static str, max_observed: usize) -> PolicyConfig {
    PolicyConfig {
        policy: PolicyKind::Ga3cCadrl {
            checkpoint: Checkpoint::new(Some(dir), name),
        },
        sensors: &[Sensor::OtherAgentsStates],
        sensor_args: Some(SensorArgs {
            agent_sorting_method: AgentSorting::ClosestLast,
            max_num_other_agents_observed: max_observed,
        }),
    }
}

/// Every known experiment, by name.
///
/// `GA3C-CADRL-{4,10}-*` are seeds of networks trained with curricula of up
/// to 4 or 10 agents, with weight-sharing (`WS-n`, observing `n - 1` others)
/// or LSTM (`LSTM`) aggregation of the other agents.
pub static POLICIES: &[(&str, PolicyConfig)] = &[
    (
        "GA3C-CADRL-10-WS-4-1",
        ga3c(
            "/home/mfe/ijrr_cadrl_results/multiple_seeds/ws_order_ec2-184-72-212-132.compute-1.amazonaws.com/wandb/run-20200403_144424-3eoowzko/checkpoints/",
            "network_01900000",
            3,
        ),
    ),
    (
        "GA3C-CADRL-10-WS-4-2",
        ga3c(
            "/home/mfe/ijrr_cadrl_results/multiple_seeds/ws_order_ec2-34-228-142-219.compute-1.amazonaws.com/wandb/run-20200403_144424-eozu6syw/checkpoints/",
            "network_01900000",
            3,
        ),
    ),
    (
        "GA3C-CADRL-10-WS-4-3",
        ga3c(
            "/home/mfe/ijrr_cadrl_results/multiple_seeds/ws_order_ec2-54-146-99-195.compute-1.amazonaws.com/wandb/run-20200403_144424-22s6pbwt/checkpoints/",
            "network_01900000",
            3,
        ),
    ),
    (
        "GA3C-CADRL-10-WS-4-4",
        ga3c(
            "/home/mfe/ijrr_cadrl_results/multiple_seeds/ws_order_ec2-54-227-24-219.compute-1.amazonaws.com/wandb/run-20200403_144424-2f8r4ydk/checkpoints/",
            "network_01900000",
            3,
        ),
    ),
    (
        "GA3C-CADRL-10-WS-4-5",
        ga3c(
            "/home/mfe/ijrr_cadrl_results/multiple_seeds/ws_order_ec2-54-242-32-57.compute-1.amazonaws.com/wandb/run-20200403_144424-i41jmnda/checkpoints/",
            "network_01900000",
            3,
        ),
    ),
    (
        "GA3C-CADRL-4-WS-4-1",
        ga3c(
            "/home/mfe/ijrr_cadrl_results/multiple_seeds/ws_order_ec2-184-72-212-132.compute-1.amazonaws.com/wandb/run-20200402_210747-dt4uwai3/checkpoints/",
            "network_01490000",
            3,
        ),
    ),
    (
        "GA3C-CADRL-4-WS-4-2",
        ga3c(
            "/home/mfe/ijrr_cadrl_results/multiple_seeds/ws_order_ec2-34-228-142-219.compute-1.amazonaws.com/wandb/run-20200402_210747-cvcfrsqt/checkpoints/",
            "network_01490000",
            3,
        ),
    ),
    (
        "GA3C-CADRL-4-WS-4-3",
        ga3c(
            "/home/mfe/ijrr_cadrl_results/multiple_seeds/ws_order_ec2-54-146-99-195.compute-1.amazonaws.com/wandb/run-20200402_210747-1rmgsf1f/checkpoints/",
            "network_01490000",
            3,
        ),
    ),
    (
        "GA3C-CADRL-4-WS-4-4",
        ga3c(
            "/home/mfe/ijrr_cadrl_results/multiple_seeds/ws_order_ec2-54-227-24-219.compute-1.amazonaws.com/wandb/run-20200402_210747-2unxv49c/checkpoints/",
            "network_01490000",
            3,
        ),
    ),
    (
        "GA3C-CADRL-4-WS-4-5",
        ga3c(
            "/home/mfe/ijrr_cadrl_results/multiple_seeds/ws_order_ec2-54-242-32-57.compute-1.amazonaws.com/wandb/run-20200402_210747-2hjygfa8/checkpoints/",
            "network_01490000",
            3,
        ),
    ),
    (
        "GA3C-CADRL-10-LSTM-1",
        ga3c(
            "/home/mfe/ijrr_cadrl_results/multiple_seeds/rnn_order_ec2-107-21-169-18.compute-1.amazonaws.com/wandb/run-20200403_144352-24y2fdt1/checkpoints/",
            "network_01900000",
            19,
        ),
    ),
    (
        "GA3C-CADRL-10-LSTM-2",
        ga3c(
            "/home/mfe/ijrr_cadrl_results/multiple_seeds/rnn_order_ec2-107-22-158-27.compute-1.amazonaws.com/wandb/run-20200403_144352-degz8bdo/checkpoints/",
            "network_01900000",
            19,
        ),
    ),
    (
        "GA3C-CADRL-10-LSTM-3",
        ga3c(
            "/home/mfe/ijrr_cadrl_results/multiple_seeds/rnn_order_ec2-34-228-80-228.compute-1.amazonaws.com/wandb/run-20200403_144352-38r4hkya/checkpoints/",
            "network_01900000",
            19,
        ),
    ),
    (
        "GA3C-CADRL-10-LSTM-4",
        ga3c(
            "/home/mfe/ijrr_cadrl_results/multiple_seeds/rnn_order_ec2-54-226-118-56.compute-1.amazonaws.com/wandb/run-20200403_144352-2wxsxlws/checkpoints/",
            "network_01900000",
            19,
        ),
    ),
    (
        "GA3C-CADRL-10-LSTM-5",
        ga3c(
            "/home/mfe/ijrr_cadrl_results/multiple_seeds/rnn_order_ec2-54-226-192-14.compute-1.amazonaws.com/wandb/run-20200403_144352-13bui0x5/checkpoints/",
            "network_01900000",
            19,
        ),
    ),
    (
        "GA3C-CADRL-4-LSTM-1",
        ga3c(
            "/home/mfe/ijrr_cadrl_results/multiple_seeds/rnn_order_ec2-107-21-169-18.compute-1.amazonaws.com/wandb/run-20200402_205112-3dz5k5pp/checkpoints/",
            "network_01490000",
            3,
        ),
    ),
    (
        "GA3C-CADRL-4-LSTM-2",
        ga3c(
            "/home/mfe/ijrr_cadrl_results/multiple_seeds/rnn_order_ec2-107-22-158-27.compute-1.amazonaws.com/wandb/run-20200402_205111-1kglu4km/checkpoints/",
            "network_01490000",
            3,
        ),
    ),
    (
        "GA3C-CADRL-4-LSTM-3",
        ga3c(
            "/home/mfe/ijrr_cadrl_results/multiple_seeds/rnn_order_ec2-34-228-80-228.compute-1.amazonaws.com/wandb/run-20200402_205112-16352wzy/checkpoints/",
            "network_01490000",
            3,
        ),
    ),
    (
        "GA3C-CADRL-4-LSTM-4",
        ga3c(
            "/home/mfe/ijrr_cadrl_results/multiple_seeds/rnn_order_ec2-54-226-118-56.compute-1.amazonaws.com/wandb/run-20200402_205112-25eq7fer/checkpoints/",
            "network_01490000",
            3,
        ),
    ),
    (
        "GA3C-CADRL-4-LSTM-5",
        ga3c(
            "/home/mfe/ijrr_cadrl_results/multiple_seeds/rnn_order_ec2-54-226-192-14.compute-1.amazonaws.com/wandb/run-20200402_205111-2pka2zpr/checkpoints/",
            "network_01490000",
            3,
        ),
    ),
    (
        "GA3C-CADRL-4-WS-6-1",
        ga3c(
            "/home/mfe/ijrr_cadrl_results/multiple_seeds/ws_order_6_ec2-35-174-113-253.compute-1.amazonaws.com/wandb/run-20200412_151445-icfzrvij/checkpoints/",
            "network_01490000",
            5,
        ),
    ),
    (
        "GA3C-CADRL-4-WS-6-2",
        ga3c(
            "/home/mfe/ijrr_cadrl_results/multiple_seeds/ws_order_6_ec2-3-88-36-89.compute-1.amazonaws.com/wandb/run-20200412_151445-2iv4i4nj/checkpoints/",
            "network_01490000",
            5,
        ),
    ),
    (
        "GA3C-CADRL-4-WS-6-3",
        ga3c(
            "/home/mfe/ijrr_cadrl_results/multiple_seeds/ws_order_6_ec2-54-161-193-150.compute-1.amazonaws.com/wandb/run-20200412_151445-91kuvs98/checkpoints/",
            "network_01490001",
            5,
        ),
    ),
    (
        "GA3C-CADRL-4-WS-6-4",
        ga3c(
            "/home/mfe/ijrr_cadrl_results/multiple_seeds/ws_order_6_ec2-54-243-3-91.compute-1.amazonaws.com/wandb/run-20200412_051045-crf4k6on/checkpoints/",
            "network_01490001",
            5,
        ),
    ),
    (
        "GA3C-CADRL-10-WS-6-1",
        ga3c(
            "/home/mfe/ijrr_cadrl_results/multiple_seeds/ws_order_6_ec2-35-174-113-253.compute-1.amazonaws.com/wandb/run-20200413_023855-3mbmr1nc/checkpoints/",
            "network_01900000",
            5,
        ),
    ),
    (
        "GA3C-CADRL-10-WS-6-2",
        ga3c(
            "/home/mfe/ijrr_cadrl_results/multiple_seeds/ws_order_6_ec2-3-88-36-89.compute-1.amazonaws.com/wandb/run-20200413_023855-3pxw2ixl/checkpoints/",
            "network_01900000",
            5,
        ),
    ),
    (
        "GA3C-CADRL-10-WS-6-3",
        ga3c(
            "/home/mfe/ijrr_cadrl_results/multiple_seeds/ws_order_6_ec2-54-161-193-150.compute-1.amazonaws.com/wandb/run-20200413_023939-sgw8r5gx/checkpoints/",
            "network_01900000",
            5,
        ),
    ),
    (
        "GA3C-CADRL-10-WS-6-4",
        ga3c(
            "/home/mfe/ijrr_cadrl_results/multiple_seeds/ws_order_6_ec2-54-243-3-91.compute-1.amazonaws.com/wandb/run-20200412_163307-1yz34rae/checkpoints/",
            "network_01900000",
            5,
        ),
    ),
    (
        "GA3C-CADRL-4-WS-8-1",
        ga3c(
            "/home/mfe/ijrr_cadrl_results/multiple_seeds/ws_order_8_ec2-18-212-168-204.compute-1.amazonaws.com/wandb/run-20200412_151345-1luyhexf/checkpoints/",
            "network_01490000",
            7,
        ),
    ),
    (
        "GA3C-CADRL-4-WS-8-2",
        ga3c(
            "/home/mfe/ijrr_cadrl_results/multiple_seeds/ws_order_8_ec2-34-203-243-164.compute-1.amazonaws.com/wandb/run-20200412_151345-2j2jvgjv/checkpoints/",
            "network_01490001",
            7,
        ),
    ),
    (
        "GA3C-CADRL-4-WS-8-3",
        ga3c(
            "/home/mfe/ijrr_cadrl_results/multiple_seeds/ws_order_8_ec2-3-92-177-119.compute-1.amazonaws.com/wandb/run-20200412_051045-3oza4dxf/checkpoints/",
            "network_01490002",
            7,
        ),
    ),
    (
        "GA3C-CADRL-4-WS-8-4",
        ga3c(
            "/home/mfe/ijrr_cadrl_results/multiple_seeds/ws_order_8_ec2-54-211-142-133.compute-1.amazonaws.com/wandb/run-20200412_151345-3ql9fhpf/checkpoints/",
            "network_01490000",
            7,
        ),
    ),
    (
        "GA3C-CADRL-10-WS-8-1",
        ga3c(
            "/home/mfe/ijrr_cadrl_results/multiple_seeds/ws_order_8_ec2-18-212-168-204.compute-1.amazonaws.com/wandb/run-20200413_024321-3m0g6fei/checkpoints/",
            "network_01900000",
            7,
        ),
    ),
    (
        "GA3C-CADRL-10-WS-8-2",
        ga3c(
            "/home/mfe/ijrr_cadrl_results/multiple_seeds/ws_order_8_ec2-34-203-243-164.compute-1.amazonaws.com/wandb/run-20200413_024321-1qog6ten/checkpoints/",
            "network_01900000",
            7,
        ),
    ),
    (
        "GA3C-CADRL-10-WS-8-3",
        ga3c(
            "/home/mfe/ijrr_cadrl_results/multiple_seeds/ws_order_8_ec2-3-92-177-119.compute-1.amazonaws.com/wandb/run-20200412_163307-1yslbfru/checkpoints/",
            "network_01900000",
            7,
        ),
    ),
    (
        "GA3C-CADRL-10-WS-8-4",
        ga3c(
            "/home/mfe/ijrr_cadrl_results/multiple_seeds/ws_order_8_ec2-54-211-142-133.compute-1.amazonaws.com/wandb/run-20200413_024321-1i8errn0/checkpoints/",
            "network_01900000",
            7,
        ),
    ),
    (
        "GA3C-CADRL-10",
        ga3c(
            "IROS18",
            "network_01900000",
            19,
        ),
    ),
    ("CADRL", PolicyConfig::baseline(PolicyKind::Cadrl)),
    ("RVO", PolicyConfig::baseline(PolicyKind::Rvo)),
    (
        "DRL-Long",
        PolicyConfig {
            policy: PolicyKind::DrlLong {
                checkpoint: Checkpoint::new(None, "stage2.pth"),
            },
            sensors: &[Sensor::OtherAgentsStates, Sensor::LaserScan],
            sensor_args: None,
        },
    ),
];

/// Looks up the experiment `name`.
pub fn lookup(name: &str) -> Result<&'static PolicyConfig, RegistryError> {
    POLICIES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, cfg)| cfg)
        .ok_or_else(|| RegistryError::UnknownExperiment(name.to_string()))
}

/// Names of all experiments, in catalog order.
pub fn names() -> impl Iterator<Item = &'static str> {
    POLICIES.iter().map(|(n, _)| *n)
}
