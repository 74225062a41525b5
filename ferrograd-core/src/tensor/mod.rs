// src/tensor/mod.rs

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::FerrogradError;
use crate::tensor_data::TensorData;

mod autograd;
pub mod create;
mod debug;

pub use create::{full, full_like, ones, ones_like, randn, randn_with, zeros, zeros_like};

/// A multi-dimensional array of f32 values.
///
/// `Tensor` wraps `Arc<RwLock<TensorData>>` internally:
/// 1. **Shared ownership:** clones are cheap and point at the same storage,
///    which is how operation nodes keep their inputs alive for the backward
///    pass.
/// 2. **Interior mutability:** gradients and the `requires_grad` flag can be
///    updated through an immutable handle, guarded by the `RwLock`.
pub struct Tensor {
    pub(crate) data: Arc<RwLock<TensorData>>,
}

impl Tensor {
    /// Creates a new tensor from a flat row-major buffer and a shape.
    ///
    /// `requires_grad` defaults to `false`; use [`Tensor::requires_grad_`]
    /// to opt a leaf tensor into gradient tracking.
    pub fn new(data: Vec<f32>, shape: Vec<usize>) -> Result<Self, FerrogradError> {
        let tensor_data = TensorData::new(data, shape)?;
        Ok(Tensor {
            data: Arc::new(RwLock::new(tensor_data)),
        })
    }

    pub(crate) fn from_data(tensor_data: TensorData) -> Self {
        Tensor {
            data: Arc::new(RwLock::new(tensor_data)),
        }
    }

    /// Returns a clone of the tensor's shape.
    pub fn shape(&self) -> Vec<usize> {
        self.read_data().shape.clone()
    }

    /// Returns the number of elements in the tensor.
    pub fn numel(&self) -> usize {
        self.read_data().numel()
    }

    /// Returns a copy of the underlying buffer in row-major order.
    pub fn get_data(&self) -> Vec<f32> {
        self.read_data().data.clone()
    }

    /// Extracts the value of a single-element tensor.
    ///
    /// # Errors
    /// Returns [`FerrogradError::BackwardNonScalar`]-style shape information
    /// via `ShapeMismatch` if the tensor has more than one element.
    pub fn item(&self) -> Result<f32, FerrogradError> {
        let guard = self.read_data();
        if guard.numel() != 1 {
            return Err(FerrogradError::ShapeMismatch {
                expected: vec![1],
                actual: guard.shape.clone(),
                operation: "item".to_string(),
            });
        }
        Ok(guard.data[0])
    }

    /// Overwrites the element buffer in place, keeping the shape.
    ///
    /// Used by the persistence contract (`load_state_dict`) and the gradient
    /// checker. The new buffer must have the same length as the old one.
    pub fn set_data(&self, data: Vec<f32>) -> Result<(), FerrogradError> {
        let mut guard = self.write_data();
        if data.len() != guard.numel() {
            return Err(FerrogradError::TensorCreationError {
                data_len: data.len(),
                shape: guard.shape.clone(),
            });
        }
        guard.data = data;
        Ok(())
    }

    /// Acquires a read lock on the tensor's data.
    /// Panics if the `RwLock` is poisoned.
    pub fn read_data(&self) -> RwLockReadGuard<'_, TensorData> {
        self.data.read().expect("Tensor RwLock poisoned")
    }

    /// Acquires a write lock on the tensor's data.
    /// Panics if the `RwLock` is poisoned.
    pub fn write_data(&self) -> RwLockWriteGuard<'_, TensorData> {
        self.data.write().expect("Tensor RwLock poisoned")
    }

    /// Stable identity of this tensor's storage, used as the node key in the
    /// computation graph.
    pub(crate) fn node_id(&self) -> *const RwLock<TensorData> {
        Arc::as_ptr(&self.data)
    }
}

impl Clone for Tensor {
    /// Clones the handle, not the storage.
    fn clone(&self) -> Self {
        Tensor {
            data: Arc::clone(&self.data),
        }
    }
}
