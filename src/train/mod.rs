pub mod model;
pub mod epoch_stats;
pub mod train_config;
pub mod run_spec;
pub mod rolling;
pub mod stop;
pub mod progress;
pub mod validation;
pub mod loop_fn;

pub use model::{Mode, Model};
pub use epoch_stats::EpochStats;
pub use train_config::{SeedPolicy, TrainConfig};
pub use run_spec::RunSpec;
pub use rolling::RollingMean;
pub use stop::StopSignal;
pub use progress::{BarSink, ChannelSink, MultiSink, NullSink, ProgressSink};
pub use validation::{validate, validate_until, ValidationMetrics};
pub use loop_fn::{train, StopReason, TrainOutcome};
