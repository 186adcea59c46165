use rand::rngs::StdRng;
use serde::{Serialize, Deserialize};

use crate::data::loader::BatchSource;
use crate::error::{Result, TrainError};
use crate::loss::criterion::Criterion;
use crate::train::model::{Mode, Model};
use crate::train::progress::ProgressSink;
use crate::train::stop::StopSignal;

/// Result of one validation pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValidationMetrics {
    /// Arithmetic mean of the per-batch losses.
    pub valid_loss: f64,
    pub num_batches: usize,
}

/// Mean loss of `model` over `val` without gradient tracking.
///
/// Switches `model` to `Mode::Eval` and leaves it there; the caller switches
/// back before training again. Each batch contributes its criterion value
/// once, whatever its size. No `backward`, no parameter update.
///
/// # Errors
/// `TrainError::EmptyValidationSet` if `val` yields no batches, rather than
/// reporting the undefined mean of nothing.
pub fn validate<M, C, V>(
    model: &mut M,
    criterion: &C,
    val: &V,
    rng: &mut StdRng,
    sink: &mut dyn ProgressSink,
) -> Result<ValidationMetrics>
where
    M: Model + ?Sized,
    C: Criterion + ?Sized,
    V: BatchSource + ?Sized,
{
    validate_until(model, criterion, val, rng, &StopSignal::new(), sink)
}

/// `validate`, abandoned as soon as `stop` is raised.
///
/// `stop` is checked before every batch. Once raised, the pass returns
/// `TrainError::Interrupted` without a partial mean and without notifying
/// `sink`.
pub fn validate_until<M, C, V>(
    model: &mut M,
    criterion: &C,
    val: &V,
    rng: &mut StdRng,
    stop: &StopSignal,
    sink: &mut dyn ProgressSink,
) -> Result<ValidationMetrics>
where
    M: Model + ?Sized,
    C: Criterion + ?Sized,
    V: BatchSource + ?Sized,
{
    model.set_mode(Mode::Eval);

    let mut losses = Vec::with_capacity(val.num_batches());
    for batch in val.batches(rng) {
        if stop.is_raised() {
            return Err(TrainError::Interrupted);
        }
        let outputs = model.forward(&batch.inputs);
        losses.push(criterion.loss(&outputs, &batch.targets));
    }

    if losses.is_empty() {
        return Err(TrainError::EmptyValidationSet);
    }

    let metrics = ValidationMetrics {
        valid_loss: losses.iter().sum::<f64>() / losses.len() as f64,
        num_batches: losses.len(),
    };

    log::info!("Valid loss: {:.5}", metrics.valid_loss);
    sink.on_validation(&metrics);
    Ok(metrics)
}
