use serde::{Serialize, Deserialize};

/// Per-epoch summary emitted to a `ProgressSink` after every completed epoch.
///
/// Interrupted epochs produce no `EpochStats`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    /// Total epochs requested for this run.
    pub total_epochs: usize,
    /// Learning rate the epoch's optimizer was built with.
    pub lr: f64,
    /// Mean of the last `report_each` batch losses at the end of the epoch.
    pub rolling_loss: f64,
    /// Mean batch loss over the whole epoch.
    pub train_loss: f64,
    /// Mean validation loss.
    pub val_loss: f64,
    /// Number of training batches processed.
    pub batches: usize,
    /// Wall-clock duration of this epoch in milliseconds, validation included.
    pub elapsed_ms: u64,
}
