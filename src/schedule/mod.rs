//! Learning-rate schedules.
//!
//! A schedule is a pure function of the epoch counter. The training loop asks
//! it for a rate at the start of every epoch and builds a fresh optimizer bound
//! to that rate.
//!
//! - `CyclicLr`    — step decay that restarts every `cycle_len` epochs
//! - `StepDecayLr` — step decay without restarts
//! - `ConstantLr`  — fixed rate

mod cyclic;
mod step_decay;

#[cfg(test)]
mod tests;

pub use cyclic::CyclicLr;
pub use step_decay::{ConstantLr, StepDecayLr};

use serde::{Serialize, Deserialize};

use crate::error::Result;

/// Epoch → learning rate.
pub trait LrSchedule {
    fn lr(&self, epoch: usize) -> f64;
}

impl<S: LrSchedule + ?Sized> LrSchedule for Box<S> {
    fn lr(&self, epoch: usize) -> f64 {
        (**self).lr(epoch)
    }
}

impl<S: LrSchedule + ?Sized> LrSchedule for &S {
    fn lr(&self, epoch: usize) -> f64 {
        (**self).lr(epoch)
    }
}

/// Serializable schedule selection. Omitted fields fall back to each
/// schedule's defaults.
///
/// ```json
/// { "kind": "cyclic", "initial_lr": 0.0004, "cycle_len": 10, "decay_step": 5 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ScheduleConfig {
    Cyclic(CyclicLr),
    StepDecay(StepDecayLr),
    Constant(ConstantLr),
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        ScheduleConfig::Cyclic(CyclicLr::default())
    }
}

impl ScheduleConfig {
    /// Validates the parameters and returns the schedule.
    pub fn build(&self) -> Result<Box<dyn LrSchedule>> {
        Ok(match *self {
            ScheduleConfig::Cyclic(c) => Box::new(c.validated()?),
            ScheduleConfig::StepDecay(s) => Box::new(s.validated()?),
            ScheduleConfig::Constant(c) => Box::new(ConstantLr::new(c.lr)?),
        })
    }
}
