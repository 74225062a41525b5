use ferrograd_core::FerrogradError;

use super::traits::Dataset;

/// A simple dataset that wraps a `Vec` of items.
///
/// Each item in the `Vec` corresponds to one sample; `get` clones it.
#[derive(Debug, Clone)]
pub struct VecDataset<T: Clone + Send + 'static> {
    data: Vec<T>,
}

impl<T: Clone + Send + 'static> VecDataset<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self { data }
    }
}

impl<T: Clone + Send + 'static> Dataset for VecDataset<T> {
    type Item = T;

    fn get(&self, index: usize) -> Result<Self::Item, FerrogradError> {
        self.data
            .get(index)
            .cloned()
            .ok_or(FerrogradError::IndexOutOfBounds {
                index,
                len: self.data.len(),
            })
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}

#[cfg(test)]
#[path = "vec_dataset_test.rs"]
mod tests;
