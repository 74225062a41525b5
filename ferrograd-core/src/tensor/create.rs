//! Tensor creation helpers.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

use crate::error::FerrogradError;
use crate::tensor::Tensor;

/// Creates a tensor filled with `value`.
pub fn full(shape: &[usize], value: f32) -> Result<Tensor, FerrogradError> {
    let numel: usize = shape.iter().product();
    Tensor::new(vec![value; numel], shape.to_vec())
}

/// Creates a tensor of zeros.
pub fn zeros(shape: &[usize]) -> Result<Tensor, FerrogradError> {
    full(shape, 0.0)
}

/// Creates a tensor of ones.
pub fn ones(shape: &[usize]) -> Result<Tensor, FerrogradError> {
    full(shape, 1.0)
}

/// Creates a zero tensor with the same shape as `other`.
pub fn zeros_like(other: &Tensor) -> Result<Tensor, FerrogradError> {
    zeros(&other.shape())
}

/// Creates a tensor of ones with the same shape as `other`.
pub fn ones_like(other: &Tensor) -> Result<Tensor, FerrogradError> {
    ones(&other.shape())
}

/// Creates a tensor filled with `value`, shaped like `other`.
pub fn full_like(other: &Tensor, value: f32) -> Result<Tensor, FerrogradError> {
    full(&other.shape(), value)
}

/// Creates a tensor with elements drawn from the standard normal distribution.
pub fn randn(shape: &[usize]) -> Result<Tensor, FerrogradError> {
    randn_with(shape, &mut rand::thread_rng())
}

/// Seeded variant of [`randn`], used by deterministic tests and examples.
pub fn randn_with<R: Rng + ?Sized>(shape: &[usize], rng: &mut R) -> Result<Tensor, FerrogradError> {
    let normal = Normal::new(0.0f32, 1.0).map_err(|e| {
        FerrogradError::InternalError(format!("failed to build normal distribution: {e}"))
    })?;
    let numel: usize = shape.iter().product();
    let data: Vec<f32> = (0..numel).map(|_| normal.sample(rng)).collect();
    Tensor::new(data, shape.to_vec())
}

/// Convenience for tests: a seeded RNG with a fixed stream.
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
