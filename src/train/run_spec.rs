use std::path::Path;

use serde::{Serialize, Deserialize};

use crate::error::Result;
use crate::network::spec::NetworkSpec;
use crate::optim::optimizer::OptimizerKind;
use crate::schedule::ScheduleConfig;
use crate::train::train_config::{SeedPolicy, TrainConfig};

fn default_report_each() -> usize {
    10
}

/// Everything needed to reproduce a run from a JSON file.
///
/// ```json
/// {
///   "network": { "name": "xor", "loss": "binary_cross_entropy", "layers": [...] },
///   "schedule": { "kind": "cyclic", "initial_lr": 0.01, "cycle_len": 20, "decay_step": 5 },
///   "optimizer": { "type": "adam" },
///   "epochs": 60,
///   "batch_size": 4,
///   "seed": 42
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSpec {
    pub network: NetworkSpec,
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub optimizer: OptimizerKind,
    pub epochs: usize,
    pub batch_size: usize,
    #[serde(default = "default_report_each")]
    pub report_each: usize,
    /// Fixed seed for weight init, shuffling and dropout; omitted means a
    /// fresh random seed every epoch.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl RunSpec {
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<RunSpec> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_json_str(json: &str) -> Result<RunSpec> {
        Ok(serde_json::from_str(json)?)
    }

    /// Runtime configuration for `train`, with a fresh stop signal.
    pub fn train_config(&self) -> TrainConfig {
        let seed = match self.seed {
            Some(s) => SeedPolicy::Fixed(s),
            None => SeedPolicy::Entropy,
        };
        TrainConfig::new(self.epochs, self.batch_size, self.schedule)
            .with_report_each(self.report_each)
            .with_seed_policy(seed)
    }
}
