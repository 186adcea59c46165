pub mod criterion;
pub mod mse;
pub mod bce;
pub mod loss_type;

pub use criterion::Criterion;
pub use mse::MseLoss;
pub use bce::BceLoss;
pub use loss_type::LossType;
