use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, Ordering};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::traits::Sampler;

/// Shuffles dataset indices, visiting each exactly once per epoch.
///
/// With a seed the shuffle is reproducible across runs; successive epochs
/// still get distinct permutations because the seed is combined with an
/// epoch counter.
#[derive(Debug)]
pub struct RandomSampler {
    seed: Option<u64>,
    epoch: AtomicU64,
}

impl RandomSampler {
    /// Creates an unseeded sampler backed by thread-local entropy.
    pub fn new() -> Self {
        RandomSampler {
            seed: None,
            epoch: AtomicU64::new(0),
        }
    }

    /// Creates a sampler whose permutations are reproducible across runs.
    pub fn with_seed(seed: u64) -> Self {
        RandomSampler {
            seed: Some(seed),
            epoch: AtomicU64::new(0),
        }
    }
}

impl Default for RandomSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl Sampler for RandomSampler {
    fn iter(&self, dataset_len: usize) -> Box<dyn Iterator<Item = usize> + Send + Sync> {
        if dataset_len == 0 {
            return Box::new(std::iter::empty());
        }

        let mut indices: Vec<usize> = (0..dataset_len).collect();
        match self.seed {
            Some(seed) => {
                let epoch = self.epoch.fetch_add(1, Ordering::Relaxed);
                let mut rng = StdRng::seed_from_u64(seed.wrapping_add(epoch));
                indices.shuffle(&mut rng);
            }
            None => {
                indices.shuffle(&mut rand::thread_rng());
            }
        }
        Box::new(indices.into_iter())
    }

    fn len(&self, dataset_len: usize) -> usize {
        dataset_len
    }
}

#[cfg(test)]
#[path = "random_sampler_test.rs"]
mod tests;
