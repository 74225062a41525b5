//! Batching over a dataset, driven by a sampler.

use ferrograd_core::trainer::BatchSource;
use ferrograd_core::{FerrogradError, Tensor};

use crate::collate::stack_examples;
use crate::datasets::Dataset;
use crate::samplers::Sampler;

/// Groups dataset examples into stacked minibatches.
///
/// Each call to [`iter`](DataLoader::iter) asks the sampler for a fresh index
/// stream, so a loader can be replayed for as many epochs as needed. With
/// `drop_last` a trailing batch smaller than `batch_size` is discarded.
#[derive(Debug)]
pub struct DataLoader<D, S>
where
    D: Dataset<Item = (Vec<f32>, usize)>,
    S: Sampler,
{
    dataset: D,
    batch_size: usize,
    sampler: S,
    drop_last: bool,
}

impl<D, S> DataLoader<D, S>
where
    D: Dataset<Item = (Vec<f32>, usize)>,
    S: Sampler,
{
    /// # Errors
    /// `ConfigurationError` if `batch_size` is zero.
    pub fn new(
        dataset: D,
        batch_size: usize,
        sampler: S,
        drop_last: bool,
    ) -> Result<Self, FerrogradError> {
        if batch_size == 0 {
            return Err(FerrogradError::ConfigurationError(
                "DataLoader batch_size must be at least 1".to_string(),
            ));
        }
        Ok(DataLoader {
            dataset,
            batch_size,
            sampler,
            drop_last,
        })
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn dataset(&self) -> &D {
        &self.dataset
    }

    /// Number of batches one epoch will produce.
    pub fn num_batches(&self) -> usize {
        let samples = self.sampler.len(self.dataset.len());
        if self.drop_last {
            samples / self.batch_size
        } else {
            samples.div_ceil(self.batch_size)
        }
    }

    /// Starts a fresh pass over the dataset.
    pub fn iter(&self) -> DataLoaderIter<'_, D, S> {
        DataLoaderIter {
            loader: self,
            indices: self.sampler.iter(self.dataset.len()),
        }
    }
}

/// One epoch's worth of batches. Created by [`DataLoader::iter`].
pub struct DataLoaderIter<'a, D, S>
where
    D: Dataset<Item = (Vec<f32>, usize)>,
    S: Sampler,
{
    loader: &'a DataLoader<D, S>,
    indices: Box<dyn Iterator<Item = usize> + Send + Sync>,
}

impl<D, S> Iterator for DataLoaderIter<'_, D, S>
where
    D: Dataset<Item = (Vec<f32>, usize)>,
    S: Sampler,
{
    type Item = Result<(Tensor, Vec<usize>), FerrogradError>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut examples = Vec::with_capacity(self.loader.batch_size);
        for index in self.indices.by_ref() {
            match self.loader.dataset.get(index) {
                Ok(example) => examples.push(example),
                Err(e) => return Some(Err(e)),
            }
            if examples.len() == self.loader.batch_size {
                break;
            }
        }

        if examples.is_empty() {
            return None;
        }
        if self.loader.drop_last && examples.len() < self.loader.batch_size {
            return None;
        }
        Some(stack_examples(&examples))
    }
}

impl<D, S> BatchSource for DataLoader<D, S>
where
    D: Dataset<Item = (Vec<f32>, usize)>,
    S: Sampler,
{
    fn batches(
        &self,
    ) -> Box<dyn Iterator<Item = Result<(Tensor, Vec<usize>), FerrogradError>> + '_> {
        Box::new(self.iter())
    }
}

#[cfg(test)]
#[path = "dataloader_test.rs"]
mod tests;
