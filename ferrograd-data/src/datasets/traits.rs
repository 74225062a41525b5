use ferrograd_core::FerrogradError;

/// Represents a dataset that can be accessed by index.
///
/// An item can be any `Send + 'static` type; for classification work it is
/// typically a `(Vec<f32>, usize)` pair of features and label.
pub trait Dataset {
    /// The type of a single item returned by the dataset.
    type Item: Send + 'static;

    /// Returns the item at the given index.
    ///
    /// # Errors
    /// Returns `FerrogradError::IndexOutOfBounds` if the index is past the
    /// end of the dataset.
    fn get(&self, index: usize) -> Result<Self::Item, FerrogradError>;

    /// Returns the total number of items in the dataset.
    fn len(&self) -> usize;

    /// Checks if the dataset is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
