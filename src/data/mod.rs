pub mod batch;
pub mod loader;

pub use batch::Batch;
pub use loader::{BatchSource, DataLoader};
