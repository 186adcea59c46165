use rand::{rngs::StdRng, SeedableRng};

use crate::{
    activation::activation::ActivationFunction,
    layers::{Dense, Dropout, Layer},
    math::matrix::Matrix,
    network::spec::{LayerSpec, NetworkSpec},
    train::model::{Mode, Model},
};
use crate::error::Result;

/// Sequential feed-forward network.
#[derive(Debug, Clone)]
pub struct Network {
    pub layers: Vec<Layer>,
    mode: Mode,
}

impl Network {
    /// Builds a dense-only network from (size, input_size, activation) tuples.
    pub fn new(layer_specs: Vec<(usize, usize, ActivationFunction)>) -> Network {
        let mut rng = StdRng::from_entropy();
        let layers = layer_specs.into_iter()
            .map(|(size, input_size, activation)| Layer::Dense(Dense::new(size, input_size, activation, &mut rng)))
            .collect();
        Network { layers, mode: Mode::Train }
    }

    /// Builds a network from a checked `NetworkSpec`. With a `seed` the weight
    /// initialization is reproducible.
    pub fn from_spec(spec: &NetworkSpec, seed: Option<u64>) -> Result<Network> {
        spec.check()?;
        let mut rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        let layers = spec.layers.iter()
            .map(|layer| match *layer {
                LayerSpec::Dense { size, input_size, activation } => {
                    Layer::Dense(Dense::new(size, input_size, activation, &mut rng))
                }
                LayerSpec::Dropout { rate } => Layer::Dropout(Dropout::new(rate)),
            })
            .collect();
        Ok(Network { layers, mode: Mode::Train })
    }

    /// Number of trainable scalars.
    pub fn param_count(&self) -> usize {
        self.layers.iter()
            .map(|layer| match layer {
                Layer::Dense(d) => d.weights.len() + d.biases.len(),
                Layer::Dropout(_) => 0,
            })
            .sum()
    }

    /// Inference on a single sample without touching the mode.
    pub fn predict(&mut self, input: &[f64]) -> Vec<f64> {
        let mut current = Matrix::from_rows(&[input.to_vec()]);
        for layer in &mut self.layers {
            current = layer.forward(&current, false);
        }
        current.data
    }
}

impl Model for Network {
    fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    fn mode(&self) -> Mode {
        self.mode
    }

    fn forward(&mut self, inputs: &Matrix) -> Matrix {
        let training = self.mode == Mode::Train;
        let mut current = inputs.clone();
        for layer in &mut self.layers {
            current = layer.forward(&current, training);
        }
        current
    }

    fn backward(&mut self, grad_output: &Matrix) {
        let mut delta = grad_output.clone();
        for layer in self.layers.iter_mut().rev() {
            delta = layer.backward(&delta);
        }
    }

    fn zero_grad(&mut self) {
        for layer in &mut self.layers {
            if let Layer::Dense(dense) = layer {
                dense.zero_grad();
            }
        }
    }

    fn params_and_grads(&mut self, visit: &mut dyn FnMut(&mut Matrix, &Matrix)) {
        for layer in &mut self.layers {
            if let Layer::Dense(dense) = layer {
                dense.params_and_grads(visit);
            }
        }
    }

    fn reseed(&mut self, seed: u64) {
        for (i, layer) in self.layers.iter_mut().enumerate() {
            if let Layer::Dropout(dropout) = layer {
                dropout.reseed(seed.wrapping_add(i as u64));
            }
        }
    }
}
