use thiserror::Error;

/// Custom error type for the ferrograd framework.
#[derive(Error, Debug, PartialEq, Clone)] // PartialEq for easier testing
pub enum FerrogradError {
    #[error("Shape mismatch: expected {expected:?}, got {actual:?} during operation {operation}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
        operation: String,
    },

    #[error("Incompatible shapes for operation {operation}: {shape1:?} and {shape2:?}")]
    IncompatibleShapes {
        shape1: Vec<usize>,
        shape2: Vec<usize>,
        operation: String,
    },

    #[error("Tensor creation error: data length {data_len} does not match shape {shape:?}")]
    TensorCreationError { data_len: usize, shape: Vec<usize> },

    #[error("Operation requires tensor to require grad, but it doesn't.")]
    RequiresGradNotMet,

    #[error("backward() called on a tensor with {numel} elements; only single-element tensors can start a backward pass")]
    BackwardNonScalar { numel: usize },

    #[error("Cannot set requires_grad on a non-leaf tensor.")]
    RequiresGradOnNonLeaf,

    #[error("Class label {label} at row {row} is out of range for {classes} classes")]
    LabelOutOfRange {
        label: usize,
        classes: usize,
        row: usize,
    },

    #[error("Optimizer step on parameter '{name}' which has no accumulated gradient")]
    MissingGradient { name: String },

    #[error("Index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}
