use crate::error::{Result, TrainError};
use crate::schedule::ScheduleConfig;
use crate::train::stop::StopSignal;

/// How the per-epoch random seed is chosen.
///
/// Each epoch's seed drives batch shuffling and is handed to
/// `Model::reseed` for stochastic layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeedPolicy {
    /// Fresh OS-derived seed every epoch; runs are not reproducible.
    #[default]
    Entropy,
    /// Seed `base + epoch`; runs are reproducible.
    Fixed(u64),
}

impl SeedPolicy {
    pub fn seed_for(&self, epoch: usize) -> u64 {
        match *self {
            SeedPolicy::Entropy => rand::random::<u64>(),
            SeedPolicy::Fixed(base) => base.wrapping_add(epoch as u64),
        }
    }
}

/// Configuration for a `train` run.
///
/// # Fields
/// - `epochs`      — total number of full passes over the training data
/// - `batch_size`  — samples per batch; only sizes the progress display
/// - `report_each` — width of the rolling training-loss window (default 10)
/// - `schedule`    — learning-rate schedule, evaluated at the 1-based epoch
/// - `seed`        — per-epoch seed policy
/// - `stop`        — cancellation flag checked between units of work
#[derive(Debug, Clone)]
pub struct TrainConfig {
    pub epochs: usize,
    pub batch_size: usize,
    pub report_each: usize,
    pub schedule: ScheduleConfig,
    pub seed: SeedPolicy,
    pub stop: StopSignal,
}

impl TrainConfig {
    /// Creates a `TrainConfig` with a fresh stop signal and entropy seeding.
    pub fn new(epochs: usize, batch_size: usize, schedule: ScheduleConfig) -> Self {
        TrainConfig {
            epochs,
            batch_size,
            report_each: 10,
            schedule,
            seed: SeedPolicy::Entropy,
            stop: StopSignal::new(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = SeedPolicy::Fixed(seed);
        self
    }

    pub fn with_seed_policy(mut self, seed: SeedPolicy) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_stop(mut self, stop: StopSignal) -> Self {
        self.stop = stop;
        self
    }

    pub fn with_report_each(mut self, report_each: usize) -> Self {
        self.report_each = report_each;
        self
    }

    pub fn check(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(TrainError::InvalidConfig("batch_size must be at least 1".into()));
        }
        if self.report_each == 0 {
            return Err(TrainError::InvalidConfig("report_each must be at least 1".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_seed_is_offset_by_epoch() {
        let p = SeedPolicy::Fixed(100);
        assert_eq!(p.seed_for(1), 101);
        assert_eq!(p.seed_for(2), 102);
        assert_eq!(SeedPolicy::Fixed(u64::MAX).seed_for(1), 0);
    }

    #[test]
    fn builder_sets_fields() {
        let cfg = TrainConfig::new(5, 8, ScheduleConfig::default())
            .with_seed(3)
            .with_report_each(4);
        assert_eq!(cfg.seed, SeedPolicy::Fixed(3));
        assert_eq!(cfg.report_each, 4);
        assert!(cfg.check().is_ok());
    }

    #[test]
    fn check_rejects_zero_sizes() {
        assert!(TrainConfig::new(1, 0, ScheduleConfig::default()).check().is_err());
        assert!(TrainConfig::new(1, 1, ScheduleConfig::default()).with_report_each(0).check().is_err());
    }
}
