use serde::{Serialize, Deserialize};

use crate::error::{Result, TrainError};
use crate::schedule::LrSchedule;

/// Cyclic step-decay learning rate.
///
/// Within each cycle of `cycle_len` epochs the rate starts at `initial_lr` and
/// is multiplied by `decay_factor` every `decay_step` epochs. At the start of
/// the next cycle it resets:
///
/// ```text
/// position = epoch mod cycle_len
/// lr       = initial_lr * decay_factor ^ floor(position / decay_step)
/// ```
///
/// When `decay_step` does not divide `cycle_len` the last step of each cycle
/// is simply shorter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CyclicLr {
    pub initial_lr: f64,
    pub cycle_len: usize,
    pub decay_step: usize,
    pub decay_factor: f64,
}

impl Default for CyclicLr {
    fn default() -> Self {
        CyclicLr {
            initial_lr: 3e-4,
            cycle_len: 30,
            decay_step: 10,
            decay_factor: 0.5,
        }
    }
}

impl CyclicLr {
    pub fn new(initial_lr: f64, cycle_len: usize, decay_step: usize, decay_factor: f64) -> Result<Self> {
        CyclicLr { initial_lr, cycle_len, decay_step, decay_factor }.validated()
    }

    /// Rejects parameters for which `lr` would divide by zero or leave the
    /// non-negative reals.
    pub fn validated(self) -> Result<Self> {
        if self.cycle_len == 0 {
            return Err(TrainError::InvalidSchedule("cycle_len must be > 0".into()));
        }
        if self.decay_step == 0 {
            return Err(TrainError::InvalidSchedule("decay_step must be > 0".into()));
        }
        check_initial_lr(self.initial_lr)?;
        check_decay_factor(self.decay_factor)?;
        Ok(self)
    }

    /// Number of decays applied at `epoch`.
    pub fn decays_at(&self, epoch: usize) -> usize {
        (epoch % self.cycle_len) / self.decay_step
    }
}

impl LrSchedule for CyclicLr {
    fn lr(&self, epoch: usize) -> f64 {
        let decays = self.decays_at(epoch).min(i32::MAX as usize) as i32;
        self.initial_lr * self.decay_factor.powi(decays)
    }
}

pub(crate) fn check_initial_lr(lr: f64) -> Result<()> {
    if !lr.is_finite() || lr < 0.0 {
        return Err(TrainError::InvalidSchedule(format!("initial_lr must be finite and non-negative, got {lr}")));
    }
    Ok(())
}

pub(crate) fn check_decay_factor(factor: f64) -> Result<()> {
    if !(factor > 0.0 && factor <= 1.0) {
        return Err(TrainError::InvalidSchedule(format!("decay_factor must be in (0, 1], got {factor}")));
    }
    Ok(())
}
