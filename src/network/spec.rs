use std::path::Path;

use serde::{Serialize, Deserialize};

use crate::activation::activation::ActivationFunction;
use crate::error::{Result, TrainError};
use crate::loss::loss_type::LossType;

/// Describes one layer in a network specification.
///
/// `Dense` fields:
/// - `size`       — number of neurons in this layer
/// - `input_size` — width of the layer's input (previous layer's `size`, or
///                  the raw feature count for the first layer)
/// - `activation` — activation applied after the affine transform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum LayerSpec {
    Dense {
        size: usize,
        input_size: usize,
        activation: ActivationFunction,
    },
    Dropout {
        rate: f64,
    },
}

/// Serializable architecture plus the loss it is trained with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpec {
    /// Human-readable name, used in log lines only.
    pub name: String,
    /// Ordered list of layer descriptions (input → output).
    pub layers: Vec<LayerSpec>,
    /// Loss function to pair with this network during training.
    pub loss: LossType,
}

impl NetworkSpec {
    /// Checks that consecutive dense layers agree on their widths and that
    /// dropout rates are in range.
    pub fn check(&self) -> Result<()> {
        if self.layers.is_empty() {
            return Err(TrainError::InvalidConfig(format!("network '{}' has no layers", self.name)));
        }
        let mut width: Option<usize> = None;
        for (i, layer) in self.layers.iter().enumerate() {
            match *layer {
                LayerSpec::Dense { size, input_size, .. } => {
                    if size == 0 || input_size == 0 {
                        return Err(TrainError::InvalidConfig(format!("layer {i}: dense sizes must be non-zero")));
                    }
                    if let Some(w) = width {
                        if w != input_size {
                            return Err(TrainError::InvalidConfig(format!(
                                "layer {i}: input_size {input_size} does not match previous width {w}"
                            )));
                        }
                    }
                    width = Some(size);
                }
                LayerSpec::Dropout { rate } => {
                    if !(0.0..1.0).contains(&rate) {
                        return Err(TrainError::InvalidConfig(format!("layer {i}: dropout rate {rate} not in [0, 1)")));
                    }
                }
            }
        }
        if width.is_none() {
            return Err(TrainError::InvalidConfig(format!("network '{}' has no dense layer", self.name)));
        }
        Ok(())
    }

    /// Serializes the spec to a pretty-printed JSON file.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a `NetworkSpec` from a JSON file.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<NetworkSpec> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}
