use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::data::batch::Batch;
use crate::error::{Result, TrainError};
use crate::math::matrix::Matrix;

/// Anything the training driver can draw batches from.
///
/// `batches` receives the loop's per-epoch RNG so that shuffling follows the
/// run's seed policy.
pub trait BatchSource {
    fn num_batches(&self) -> usize;

    fn batches<'a>(&'a self, rng: &mut StdRng) -> Box<dyn Iterator<Item = Batch> + 'a>;
}

/// A pre-built list of batches, yielded in order every epoch.
impl BatchSource for [Batch] {
    fn num_batches(&self) -> usize {
        self.len()
    }

    fn batches<'a>(&'a self, _rng: &mut StdRng) -> Box<dyn Iterator<Item = Batch> + 'a> {
        Box::new(self.iter().cloned())
    }
}

impl BatchSource for Vec<Batch> {
    fn num_batches(&self) -> usize {
        self.len()
    }

    fn batches<'a>(&'a self, rng: &mut StdRng) -> Box<dyn Iterator<Item = Batch> + 'a> {
        self.as_slice().batches(rng)
    }
}

/// In-memory samples cut into mini-batches, optionally reshuffled every epoch.
///
/// The last batch is smaller when `batch_size` does not divide the sample
/// count.
#[derive(Debug, Clone)]
pub struct DataLoader {
    inputs: Vec<Vec<f64>>,
    targets: Vec<Vec<f64>>,
    batch_size: usize,
    shuffle: bool,
}

impl DataLoader {
    pub fn new(inputs: Vec<Vec<f64>>, targets: Vec<Vec<f64>>, batch_size: usize) -> Result<DataLoader> {
        if inputs.len() != targets.len() {
            return Err(TrainError::InvalidConfig(format!(
                "{} inputs but {} targets",
                inputs.len(),
                targets.len()
            )));
        }
        if batch_size == 0 {
            return Err(TrainError::InvalidConfig("batch_size must be at least 1".into()));
        }
        Ok(DataLoader { inputs, targets, batch_size, shuffle: false })
    }

    pub fn shuffled(mut self, shuffle: bool) -> DataLoader {
        self.shuffle = shuffle;
        self
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn num_samples(&self) -> usize {
        self.inputs.len()
    }

    fn gather(&self, indices: &[usize]) -> Batch {
        let inputs: Vec<Vec<f64>> = indices.iter().map(|&i| self.inputs[i].clone()).collect();
        let targets: Vec<Vec<f64>> = indices.iter().map(|&i| self.targets[i].clone()).collect();
        Batch::new(Matrix::from_rows(&inputs), Matrix::from_rows(&targets))
    }
}

impl BatchSource for DataLoader {
    fn num_batches(&self) -> usize {
        self.inputs.len().div_ceil(self.batch_size)
    }

    fn batches<'a>(&'a self, rng: &mut StdRng) -> Box<dyn Iterator<Item = Batch> + 'a> {
        let mut order: Vec<usize> = (0..self.inputs.len()).collect();
        if self.shuffle {
            order.shuffle(rng);
        }
        let batch_size = self.batch_size;
        Box::new(
            (0..order.len())
                .step_by(batch_size)
                .map(move |start| {
                    let end = (start + batch_size).min(order.len());
                    self.gather(&order[start..end])
                }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn loader(n: usize, batch_size: usize) -> DataLoader {
        let inputs = (0..n).map(|i| vec![i as f64]).collect();
        let targets = (0..n).map(|i| vec![(i * 10) as f64]).collect();
        DataLoader::new(inputs, targets, batch_size).unwrap()
    }

    #[test]
    fn last_batch_is_partial() {
        let l = loader(5, 2);
        let mut rng = StdRng::seed_from_u64(0);
        let sizes: Vec<usize> = l.batches(&mut rng).map(|b| b.size()).collect();
        assert_eq!(l.num_batches(), 3);
        assert_eq!(sizes, vec![2, 2, 1]);
    }

    #[test]
    fn shuffle_keeps_pairs_together() {
        let l = loader(16, 4).shuffled(true);
        let mut rng = StdRng::seed_from_u64(9);
        let mut seen = Vec::new();
        for batch in l.batches(&mut rng) {
            for r in 0..batch.size() {
                assert_eq!(batch.targets.get(r, 0), batch.inputs.get(r, 0) * 10.0);
                seen.push(batch.inputs.get(r, 0) as usize);
            }
        }
        seen.sort_unstable();
        assert_eq!(seen, (0..16).collect::<Vec<_>>());
    }

    #[test]
    fn same_seed_same_order() {
        let l = loader(32, 8).shuffled(true);
        let a: Vec<Batch> = l.batches(&mut StdRng::seed_from_u64(4)).collect();
        let b: Vec<Batch> = l.batches(&mut StdRng::seed_from_u64(4)).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_mismatched_lengths() {
        let r = DataLoader::new(vec![vec![1.0]], vec![], 1);
        assert!(matches!(r, Err(TrainError::InvalidConfig(_))));
    }

    #[test]
    fn empty_loader_yields_nothing() {
        let l = DataLoader::new(vec![], vec![], 4).unwrap();
        assert_eq!(l.num_batches(), 0);
        assert_eq!(l.batches(&mut StdRng::seed_from_u64(0)).count(), 0);
    }
}
