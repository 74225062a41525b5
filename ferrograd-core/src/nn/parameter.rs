use std::fmt;
use std::ops::Deref;

use crate::error::FerrogradError;
use crate::tensor::Tensor;

/// A wrapper around a `Tensor` indicating it is a learnable parameter of a
/// `Module`. Parameters are always leaf tensors with `requires_grad` set.
pub struct Parameter {
    tensor: Tensor,
    name: Option<String>,
}

impl Parameter {
    /// Creates a named parameter from a tensor.
    ///
    /// The tensor is detached from any existing graph so the parameter is a
    /// leaf, then marked as requiring gradients.
    pub fn new(tensor: Tensor, name: Option<String>) -> Result<Self, FerrogradError> {
        let leaf = tensor.detach();
        leaf.requires_grad_(true)?;
        Ok(Parameter { tensor: leaf, name })
    }

    /// Creates a parameter without a name.
    pub fn new_unnamed(tensor: Tensor) -> Result<Self, FerrogradError> {
        Self::new(tensor, None)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns a handle to the underlying tensor.
    pub fn tensor(&self) -> &Tensor {
        &self.tensor
    }

    /// Overwrites the parameter values in place, keeping the current shape.
    pub fn set_data(&self, data: Vec<f32>) -> Result<(), FerrogradError> {
        self.tensor.set_data(data)
    }

    /// Clears the accumulated gradient.
    pub fn zero_grad(&self) {
        self.tensor.zero_grad();
    }
}

impl Deref for Parameter {
    type Target = Tensor;

    fn deref(&self) -> &Self::Target {
        &self.tensor
    }
}

impl fmt::Debug for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "Parameter(\"{}\", {:?})", name, self.tensor),
            None => write!(f, "Parameter({:?})", self.tensor),
        }
    }
}

impl Clone for Parameter {
    /// Cloning a Parameter clones the underlying tensor handle (shallow,
    /// via `Arc`), so both clones refer to the same storage.
    fn clone(&self) -> Self {
        Parameter {
            tensor: self.tensor.clone(),
            name: self.name.clone(),
        }
    }
}
