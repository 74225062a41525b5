use std::fmt::Debug;

use crate::error::FerrogradError;
use crate::tensor::Tensor;

/// Interface for the backward pass of one differentiable primitive.
///
/// Any operation that produces a tracked tensor stores a `BackwardOp` in the
/// output's `grad_fn` field. The implementation captures whatever forward
/// state its gradient formula needs (input handles, saved outputs, shapes).
///
/// Invariant: `backward` must implement the Jacobian-transpose action of the
/// forward function, returning exactly one gradient per input, each with the
/// matching input shape. The order of `backward`'s result and of `inputs()`
/// must agree.
pub trait BackwardOp: Debug + Send + Sync {
    /// Given dL/dOutput, computes dL/dInput_i for every input i.
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, FerrogradError>;

    /// The input tensors of the forward operation, in forward-call order.
    ///
    /// Returns cheap handle clones; holding them keeps the upstream graph
    /// alive for the duration of the backward pass. Node identity is the
    /// underlying `Arc` pointer, so clones of the same tensor compare equal
    /// in the graph traversal.
    fn inputs(&self) -> Vec<Tensor>;
}
