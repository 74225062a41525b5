use std::fmt;

use crate::tensor::Tensor;

impl fmt::Debug for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let guard = self.read_data();
        f.debug_struct("Tensor")
            .field("shape", &guard.shape)
            .field("requires_grad", &guard.requires_grad)
            .field("has_grad_fn", &guard.grad_fn.is_some())
            .field("data", &guard.data)
            .finish()
    }
}
