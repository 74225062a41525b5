// src/tensor_data.rs

use std::sync::Arc;

use crate::autograd::BackwardOp;
use crate::error::FerrogradError;
use crate::tensor::Tensor;

/// Internal storage and metadata for a [`Tensor`].
///
/// Holds the flat f32 buffer, the shape and the autograd bookkeeping.
/// It is always wrapped in `Arc<RwLock<TensorData>>` by the `Tensor` handle
/// to allow shared ownership and interior mutability.
#[derive(Debug)]
pub struct TensorData {
    /// Flattened row-major element buffer. Length is always `shape.iter().product()`.
    pub(crate) data: Vec<f32>,
    /// The shape (dimensions) of the tensor.
    pub(crate) shape: Vec<usize>,

    // --- Autograd metadata ---
    /// Flag indicating if the tensor participates in gradient tracking.
    /// Operations on tracked tensors record a `grad_fn` on their output.
    pub(crate) requires_grad: bool,
    /// Accumulated gradient, same shape as this tensor. Populated on leaf
    /// tensors by the backward pass, cleared by `zero_grad`.
    pub(crate) grad: Option<Tensor>,
    /// The operation node that produced this tensor. Leaf tensors
    /// (parameters and inputs) have `grad_fn = None`.
    pub(crate) grad_fn: Option<Arc<dyn BackwardOp + Send + Sync>>,
}

impl TensorData {
    /// Creates a new `TensorData` from a flat buffer and a shape.
    ///
    /// # Errors
    /// Returns [`FerrogradError::TensorCreationError`] if the buffer length
    /// does not match the number of elements implied by `shape`.
    pub fn new(data: Vec<f32>, shape: Vec<usize>) -> Result<Self, FerrogradError> {
        let numel: usize = shape.iter().product();
        if data.len() != numel {
            return Err(FerrogradError::TensorCreationError {
                data_len: data.len(),
                shape,
            });
        }
        Ok(TensorData {
            data,
            shape,
            requires_grad: false,
            grad: None,
            grad_fn: None,
        })
    }

    /// Number of elements in the tensor.
    pub fn numel(&self) -> usize {
        self.shape.iter().product()
    }
}
