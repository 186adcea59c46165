use std::time::Instant;

use rand::{rngs::StdRng, SeedableRng};

use crate::data::loader::BatchSource;
use crate::error::{Result, TrainError};
use crate::loss::criterion::Criterion;
use crate::optim::optimizer::Optimizer;
use crate::schedule::LrSchedule;
use crate::train::epoch_stats::EpochStats;
use crate::train::model::{Mode, Model};
use crate::train::progress::ProgressSink;
use crate::train::rolling::RollingMean;
use crate::train::train_config::TrainConfig;
use crate::train::validation::validate_until;

/// Why `train` returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// All `config.epochs` epochs ran.
    Completed,
    /// The stop signal was raised during `epoch`, which was discarded.
    Interrupted { epoch: usize },
}

/// What a training run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainOutcome {
    /// Validation loss of every fully completed epoch, in order.
    pub val_losses: Vec<f64>,
    pub stop: StopReason,
}

impl TrainOutcome {
    pub fn epochs_completed(&self) -> usize {
        self.val_losses.len()
    }

    pub fn was_interrupted(&self) -> bool {
        matches!(self.stop, StopReason::Interrupted { .. })
    }
}

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Trains `model` for `config.epochs` epochs and returns the per-epoch
/// validation losses.
///
/// Every epoch:
/// 1. `lr = schedule.lr(epoch)` (1-based epoch) and a fresh optimizer from
///    `make_optimizer(lr)`
/// 2. model to `Mode::Train`, seeds drawn from `config.seed`
/// 3. for each training batch: forward, loss, zero-grad, backward, step
/// 4. `validate` on `val_set`; its loss is appended to the history
///
/// # Early termination
/// `config.stop` is checked before and after every batch, between
/// validation batches and after validation. Once it is raised the current epoch is dropped and the losses
/// of the epochs completed so far are returned with
/// `StopReason::Interrupted`.
///
/// # Errors
/// Configuration problems are reported before the first epoch: an invalid
/// schedule, `batch_size` or `report_each` of zero, or an empty training or
/// validation set. Panics raised by the model, criterion or optimizer are not
/// caught.
pub fn train<M, C, T, V, O, F>(
    model: &mut M,
    criterion: &C,
    train_set: &T,
    val_set: &V,
    mut make_optimizer: F,
    config: &TrainConfig,
    sink: &mut dyn ProgressSink,
) -> Result<TrainOutcome>
where
    M: Model,
    C: Criterion + ?Sized,
    T: BatchSource + ?Sized,
    V: BatchSource + ?Sized,
    O: Optimizer,
    F: FnMut(f64) -> O,
{
    config.check()?;
    if train_set.num_batches() == 0 {
        return Err(TrainError::EmptyTrainingSet);
    }
    if val_set.num_batches() == 0 {
        return Err(TrainError::EmptyValidationSet);
    }
    let schedule = config.schedule.build()?;

    let mut val_losses = Vec::with_capacity(config.epochs);

    for epoch in 1..=config.epochs {
        if config.stop.is_raised() {
            return Ok(interrupted(val_losses, epoch, sink));
        }

        let t_start = Instant::now();
        let lr = schedule.lr(epoch);
        let mut optimizer = make_optimizer(lr);

        model.set_mode(Mode::Train);
        let seed = config.seed.seed_for(epoch);
        model.reseed(seed);
        let mut rng = StdRng::seed_from_u64(seed);

        sink.on_epoch_start(epoch, config.epochs, lr, train_set.num_batches() * config.batch_size);
        log::debug!("epoch {epoch}: lr {lr}, seed {seed}");

        // ── Batch loop ────────────────────────────────────────────────────
        let mut window = RollingMean::new(config.report_each);
        let mut loss_sum = 0.0;
        let mut batches = 0usize;

        for batch in train_set.batches(&mut rng) {
            if config.stop.is_raised() {
                return Ok(interrupted(val_losses, epoch, sink));
            }

            let outputs = model.forward(&batch.inputs);
            let loss = criterion.loss(&outputs, &batch.targets);

            optimizer.zero_grad(model);
            model.backward(&criterion.gradient(&outputs, &batch.targets));
            optimizer.step(model);

            window.push(loss);
            loss_sum += loss;
            batches += 1;
            let rolling = window.mean().unwrap_or(loss);
            sink.on_batch(batch.size(), rolling);
            log::debug!("epoch {epoch} batch {batches}: loss {loss:.5}, rolling {rolling:.5}");

            if config.stop.is_raised() {
                return Ok(interrupted(val_losses, epoch, sink));
            }
        }

        // ── Validation ────────────────────────────────────────────────────
        let metrics = match validate_until(model, criterion, val_set, &mut rng, &config.stop, sink) {
            Ok(metrics) => metrics,
            Err(TrainError::Interrupted) => return Ok(interrupted(val_losses, epoch, sink)),
            Err(e) => return Err(e),
        };
        if config.stop.is_raised() {
            return Ok(interrupted(val_losses, epoch, sink));
        }
        val_losses.push(metrics.valid_loss);

        let stats = EpochStats {
            epoch,
            total_epochs: config.epochs,
            lr,
            rolling_loss: window.mean().unwrap_or(f64::NAN),
            train_loss: if batches > 0 { loss_sum / batches as f64 } else { f64::NAN },
            val_loss: metrics.valid_loss,
            batches,
            elapsed_ms: t_start.elapsed().as_millis() as u64,
        };
        log::info!(
            "Epoch {}/{}: lr {:.3e}, train loss {:.5}, valid loss {:.5} ({} ms)",
            stats.epoch, stats.total_epochs, stats.lr, stats.train_loss, stats.val_loss, stats.elapsed_ms
        );
        sink.on_epoch_end(&stats);
    }

    Ok(TrainOutcome { val_losses, stop: StopReason::Completed })
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn interrupted(val_losses: Vec<f64>, epoch: usize, sink: &mut dyn ProgressSink) -> TrainOutcome {
    log::warn!(
        "training interrupted during epoch {epoch}; returning {} completed epoch(s)",
        val_losses.len()
    );
    sink.on_interrupt(epoch);
    TrainOutcome { val_losses, stop: StopReason::Interrupted { epoch } }
}
