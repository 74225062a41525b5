// src/tensor/autograd.rs

use std::sync::Arc;

use crate::autograd::{graph, BackwardOp};
use crate::error::FerrogradError;
use crate::tensor::Tensor;
use crate::tensor_data::TensorData;

impl Tensor {
    /// Checks if the tensor requires gradient computation.
    pub fn requires_grad(&self) -> bool {
        self.read_data().requires_grad
    }

    /// Sets the `requires_grad` flag of this tensor **in place**.
    /// Only allowed on leaf tensors; non-leaf tensors inherit the flag from
    /// the operation that produced them.
    pub fn requires_grad_(&self, requires_grad: bool) -> Result<(), FerrogradError> {
        let mut guard = self.write_data();
        if guard.grad_fn.is_some() {
            return Err(FerrogradError::RequiresGradOnNonLeaf);
        }
        guard.requires_grad = requires_grad;
        Ok(())
    }

    /// Returns the operation node that produced this tensor, if any.
    pub fn grad_fn(&self) -> Option<Arc<dyn BackwardOp + Send + Sync>> {
        self.read_data().grad_fn.clone()
    }

    /// Marks this tensor as the tracked output of `op`.
    ///
    /// Invariant: called exactly once, on a freshly created output tensor,
    /// by the forward function of a differentiable primitive. The graph is
    /// therefore rebuilt from scratch on every forward pass and no node is
    /// ever reused across batches.
    pub(crate) fn set_grad_fn(&self, op: Arc<dyn BackwardOp + Send + Sync>) {
        let mut guard = self.write_data();
        guard.requires_grad = true;
        guard.grad_fn = Some(op);
    }

    /// Returns a clone of the accumulated gradient, if present.
    pub fn grad(&self) -> Option<Tensor> {
        self.read_data().grad.clone()
    }

    /// Accumulates `contribution` into this tensor's gradient buffer (sum,
    /// not overwrite). Creates the gradient on first use.
    pub fn acc_grad(&self, contribution: Tensor) -> Result<(), FerrogradError> {
        let mut guard = self.write_data();
        match &guard.grad {
            Some(existing) => {
                let mut existing_guard = existing.write_data();
                let incoming = contribution.read_data();
                if existing_guard.shape != incoming.shape {
                    return Err(FerrogradError::ShapeMismatch {
                        expected: existing_guard.shape.clone(),
                        actual: incoming.shape.clone(),
                        operation: "acc_grad".to_string(),
                    });
                }
                for (dst, src) in existing_guard.data.iter_mut().zip(incoming.data.iter()) {
                    *dst += *src;
                }
            }
            None => {
                if contribution.read_data().shape != guard.shape {
                    return Err(FerrogradError::ShapeMismatch {
                        expected: guard.shape.clone(),
                        actual: contribution.shape(),
                        operation: "acc_grad".to_string(),
                    });
                }
                // Detach so stored gradients never re-enter the graph.
                guard.grad = Some(contribution.detach());
            }
        }
        Ok(())
    }

    /// Resets the gradient of this tensor to `None`. Idempotent.
    pub fn zero_grad(&self) {
        self.write_data().grad = None;
    }

    /// Creates a tensor sharing this tensor's values but detached from the
    /// computation graph.
    pub fn detach(&self) -> Tensor {
        let guard = self.read_data();
        let detached = TensorData {
            data: guard.data.clone(),
            shape: guard.shape.clone(),
            requires_grad: false,
            grad: None,
            grad_fn: None,
        };
        Tensor::from_data(detached)
    }

    /// Computes gradients of this tensor w.r.t. all reachable leaf tensors.
    ///
    /// Valid only on a single-element tensor with `requires_grad = true`.
    /// Seeds the output gradient with 1.0 and walks the graph in reverse
    /// topological order, summing contributions into each leaf's `grad`.
    pub fn backward(&self) -> Result<(), FerrogradError> {
        {
            let guard = self.read_data();
            if !guard.requires_grad {
                return Err(FerrogradError::RequiresGradNotMet);
            }
            let numel = guard.numel();
            if numel != 1 {
                return Err(FerrogradError::BackwardNonScalar { numel });
            }
            if guard.grad_fn.is_none() {
                log::debug!("backward() called on a leaf tensor; accumulating seed gradient only");
            }
        }

        let seed = Tensor::new(vec![1.0], self.shape())?;
        graph::run_backward(self, seed)
    }
}
