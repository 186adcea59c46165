use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::math::matrix::Matrix;

/// Inverted dropout.
///
/// In training mode each activation is zeroed with probability `rate` and the
/// survivors are scaled by `1 / (1 - rate)`. In inference mode the layer is
/// the identity.
#[derive(Debug, Clone)]
pub struct Dropout {
    pub rate: f64,
    rng: StdRng,
    mask: Option<Matrix>,
}

impl Dropout {
    /// Panics unless `0 <= rate < 1`.
    pub fn new(rate: f64) -> Dropout {
        assert!((0.0..1.0).contains(&rate), "dropout rate must be in [0, 1), got {}", rate);
        Dropout { rate, rng: StdRng::from_entropy(), mask: None }
    }

    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    pub fn forward(&mut self, input: &Matrix, training: bool) -> Matrix {
        if !training || self.rate == 0.0 {
            self.mask = None;
            return input.clone();
        }
        let keep = 1.0 - self.rate;
        let scale = 1.0 / keep;
        let data = (0..input.len())
            .map(|_| if self.rng.gen::<f64>() < keep { scale } else { 0.0 })
            .collect();
        let mask = Matrix::from_vec(input.rows, input.cols, data);
        let out = input.hadamard(&mask);
        self.mask = Some(mask);
        out
    }

    pub fn backward(&self, grad_output: &Matrix) -> Matrix {
        match &self.mask {
            Some(mask) => grad_output.hadamard(mask),
            None => grad_output.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_in_inference_mode() {
        let mut d = Dropout::new(0.9);
        let x = Matrix::from_rows(&[vec![1.0, 2.0, 3.0]]);
        assert_eq!(d.forward(&x, false), x);
    }

    #[test]
    fn same_seed_gives_same_mask() {
        let x = Matrix::from_vec(4, 8, vec![1.0; 32]);
        let mut a = Dropout::new(0.5);
        let mut b = Dropout::new(0.5);
        a.reseed(11);
        b.reseed(11);
        assert_eq!(a.forward(&x, true), b.forward(&x, true));
    }

    #[test]
    fn backward_routes_through_mask() {
        let x = Matrix::from_vec(2, 16, vec![1.0; 32]);
        let mut d = Dropout::new(0.5);
        d.reseed(3);
        let out = d.forward(&x, true);
        let grad = d.backward(&x);
        assert_eq!(out, grad);
        assert!(out.data.iter().all(|&v| v == 0.0 || v == 2.0));
    }
}
