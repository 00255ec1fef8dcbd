use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use blackjack_ev::{Error, SimulationConfig};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub rule: ConfigRule,
    pub simulator: ConfigSimulator,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigRule {
    pub number_of_decks: u8,
}

impl Default for ConfigRule {
    fn default() -> Self {
        Self {
            number_of_decks: SimulationConfig::default().number_of_decks,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigSimulator {
    pub trials_per_action: u64,
    pub number_of_threads: usize,
    pub seed: Option<u64>,
    pub time_limit_ms: Option<u64>,
}

impl Default for ConfigSimulator {
    fn default() -> Self {
        let config = SimulationConfig::default();
        Self {
            trials_per_action: config.trials_per_action,
            number_of_threads: config.number_of_threads,
            seed: config.seed,
            time_limit_ms: None,
        }
    }
}

impl TryFrom<Config> for SimulationConfig {
    type Error = Error;

    fn try_from(config: Config) -> Result<Self, Self::Error> {
        if config.simulator.time_limit_ms == Some(0) {
            return Err(Error::Config(String::from(
                "time_limit_ms must be a positive integer",
            )));
        }
        let simulation_config = SimulationConfig {
            number_of_decks: config.rule.number_of_decks,
            trials_per_action: config.simulator.trials_per_action,
            number_of_threads: config.simulator.number_of_threads,
            seed: config.simulator.seed,
            time_limit: config.simulator.time_limit_ms.map(Duration::from_millis),
        };
        simulation_config.validate()?;
        Ok(simulation_config)
    }
}

pub fn parse_config(content: &str) -> anyhow::Result<Config> {
    let config = serde_yaml::from_str(content)?;
    Ok(config)
}

/// Reads the content of a given config file and parses it to a Config.
pub fn parse_config_from_file<P: AsRef<Path>>(filename: P) -> anyhow::Result<Config> {
    let filename = filename.as_ref();
    let file_content = fs::read_to_string(filename)
        .with_context(|| format!("Cannot read config file {}", filename.display()))?;
    parse_config(&file_content)
        .with_context(|| format!("Cannot parse config file {}", filename.display()))
}
