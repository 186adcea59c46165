pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod loss;
pub mod optim;
pub mod schedule;
pub mod data;
pub mod train;
pub mod error;

// Convenience re-exports
pub use math::matrix::Matrix;
pub use activation::activation::ActivationFunction;
pub use network::network::Network;
pub use network::spec::{LayerSpec, NetworkSpec};
pub use loss::{BceLoss, Criterion, LossType, MseLoss};
pub use optim::{Adam, Optimizer, OptimizerKind, Sgd};
pub use schedule::{ConstantLr, CyclicLr, LrSchedule, ScheduleConfig, StepDecayLr};
pub use data::{Batch, BatchSource, DataLoader};
pub use train::{
    train, validate, validate_until, EpochStats, Mode, Model, ProgressSink, RunSpec, SeedPolicy,
    StopReason, StopSignal, TrainConfig, TrainOutcome, ValidationMetrics,
};
pub use error::{Result, TrainError};
