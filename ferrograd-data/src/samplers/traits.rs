use std::fmt::Debug;

/// Defines the order in which a `DataLoader` visits dataset indices.
///
/// `iter` is called once per epoch, so a sampler must be able to produce a
/// fresh index stream every time.
pub trait Sampler: Debug + Send + Sync {
    /// Returns an iterator over dataset indices for one epoch.
    fn iter(&self, dataset_len: usize) -> Box<dyn Iterator<Item = usize> + Send + Sync>;

    /// Number of indices the iterator will yield for a dataset of the given
    /// length.
    fn len(&self, dataset_len: usize) -> usize;
}
