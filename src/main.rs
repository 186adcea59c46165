//! Command-line driver: trains a small network on a synthetic binary
//! classification task (or on a run described by a JSON `RunSpec`) with a
//! cyclic learning-rate schedule, then prints the validation-loss history.
//!
//! Run with:
//!   cargo run --release -- --epochs 60 --seed 7
//!   RUST_LOG=debug cargo run -- --config run.json
//!
//! Ctrl-C stops after the last completed epoch.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rand::{rngs::StdRng, Rng, SeedableRng};

use ferrite_cycle::{
    train, ActivationFunction, DataLoader, LayerSpec, LossType, Network, NetworkSpec,
    OptimizerKind, RunSpec, ScheduleConfig, StopReason, CyclicLr,
};
use ferrite_cycle::train::{BarSink, NullSink, ProgressSink};

#[derive(Parser, Debug)]
#[command(name = "ferrite-cycle", about = "Cyclic learning-rate training driver")]
struct Cli {
    /// JSON run description (network, schedule, optimizer, epochs, batch size, seed)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the number of epochs
    #[arg(long)]
    epochs: Option<usize>,

    /// Override the batch size
    #[arg(long)]
    batch_size: Option<usize>,

    /// Fixed seed; without it every epoch is reseeded from the OS
    #[arg(long)]
    seed: Option<u64>,

    /// Number of synthetic samples (80% train, 20% validation)
    #[arg(long, default_value_t = 512)]
    samples: usize,

    /// Disable the progress bar
    #[arg(long)]
    no_progress: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut spec = match &cli.config {
        Some(path) => RunSpec::load_json(path)
            .with_context(|| format!("failed to load run spec {}", path.display()))?,
        None => default_run(),
    };
    if let Some(epochs) = cli.epochs {
        spec.epochs = epochs;
    }
    if let Some(batch_size) = cli.batch_size {
        spec.batch_size = batch_size;
    }
    if cli.seed.is_some() {
        spec.seed = cli.seed;
    }

    let input_size = match spec.network.layers.first() {
        Some(LayerSpec::Dense { input_size, .. }) => *input_size,
        _ => anyhow::bail!("the first layer must be dense"),
    };
    anyhow::ensure!(input_size == 2, "the synthetic dataset has 2 features, network expects {input_size}");

    let mut network = Network::from_spec(&spec.network, spec.seed)
        .context("invalid network spec")?;
    log::info!(
        "network '{}': {} layers, {} parameters",
        spec.network.name,
        network.layers.len(),
        network.param_count()
    );

    let (train_set, val_set) = quadrant_dataset(cli.samples, spec.batch_size, spec.seed)?;
    log::info!(
        "{} training samples, {} validation samples, batch size {}",
        train_set.num_samples(),
        val_set.num_samples(),
        spec.batch_size
    );

    let config = spec.train_config();
    config.stop.install_ctrlc().context("installing Ctrl-C handler")?;

    let mut sink: Box<dyn ProgressSink> = if cli.no_progress {
        Box::new(NullSink)
    } else {
        Box::new(BarSink::new())
    };

    let optimizer = spec.optimizer;
    let outcome = train(
        &mut network,
        &spec.network.loss,
        &train_set,
        &val_set,
        |lr| optimizer.build(lr),
        &config,
        sink.as_mut(),
    )?;

    match outcome.stop {
        StopReason::Completed => println!("Completed {} epochs.", outcome.epochs_completed()),
        StopReason::Interrupted { epoch } => println!(
            "Interrupted during epoch {epoch}; {} epochs completed.",
            outcome.epochs_completed()
        ),
    }
    for (i, loss) in outcome.val_losses.iter().enumerate() {
        println!("epoch {:>4}: valid loss {:.5}", i + 1, loss);
    }

    Ok(())
}

/// 2 → 16 (tanh) → dropout → 1 (sigmoid), BCE, Adam, cyclic lr.
fn default_run() -> RunSpec {
    RunSpec {
        network: NetworkSpec {
            name: "quadrants".into(),
            layers: vec![
                LayerSpec::Dense { size: 16, input_size: 2, activation: ActivationFunction::Tanh },
                LayerSpec::Dropout { rate: 0.1 },
                LayerSpec::Dense { size: 1, input_size: 16, activation: ActivationFunction::Sigmoid },
            ],
            loss: LossType::BinaryCrossEntropy,
        },
        schedule: ScheduleConfig::Cyclic(CyclicLr {
            initial_lr: 1e-2,
            cycle_len: 20,
            decay_step: 5,
            decay_factor: 0.5,
        }),
        optimizer: OptimizerKind::Adam,
        epochs: 40,
        batch_size: 16,
        report_each: 10,
        seed: None,
    }
}

/// Points in [-1, 1]², labelled 1 when both coordinates share a sign.
fn quadrant_dataset(samples: usize, batch_size: usize, seed: Option<u64>) -> Result<(DataLoader, DataLoader)> {
    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    let (inputs, targets): (Vec<Vec<f64>>, Vec<Vec<f64>>) = (0..samples)
        .map(|_| {
            let x: f64 = rng.gen_range(-1.0..1.0);
            let y: f64 = rng.gen_range(-1.0..1.0);
            let label = if x * y > 0.0 { 1.0 } else { 0.0 };
            (vec![x, y], vec![label])
        })
        .unzip();

    let split = samples * 4 / 5;
    let train = DataLoader::new(inputs[..split].to_vec(), targets[..split].to_vec(), batch_size)?
        .shuffled(true);
    let val = DataLoader::new(inputs[split..].to_vec(), targets[split..].to_vec(), batch_size)?;
    Ok((train, val))
}
