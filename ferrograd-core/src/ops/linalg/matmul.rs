use std::sync::Arc;

use crate::autograd::BackwardOp;
use crate::error::FerrogradError;
use crate::ops::linalg::{matmul_raw, transpose_raw};
use crate::tensor::Tensor;

#[derive(Debug)]
struct MatmulBackward {
    a: Tensor,
    b: Tensor,
}

impl BackwardOp for MatmulBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, FerrogradError> {
        let g = grad_output.read_data();
        let a = self.a.read_data();
        let b = self.b.read_data();

        let m = a.shape[0];
        let k = a.shape[1];
        let n = b.shape[1];

        // dA = dY · Bᵀ  ([m,n] x [n,k])
        let b_t = transpose_raw(&b.data, k, n);
        let grad_a = matmul_raw(&g.data, &b_t, m, n, k);

        // dB = Aᵀ · dY  ([k,m] x [m,n])
        let a_t = transpose_raw(&a.data, m, k);
        let grad_b = matmul_raw(&a_t, &g.data, k, m, n);

        Ok(vec![
            Tensor::new(grad_a, vec![m, k])?,
            Tensor::new(grad_b, vec![k, n])?,
        ])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone(), self.b.clone()]
    }
}

/// Matrix product `C = A · B` for 2-D tensors only.
///
/// `A: [m, k]`, `B: [k, n]` -> `C: [m, n]`. Non-2-D operands or an inner
/// dimension mismatch fail with `IncompatibleShapes`; nothing is truncated
/// or broadcast.
pub fn matmul_op(a: &Tensor, b: &Tensor) -> Result<Tensor, FerrogradError> {
    let a_shape = a.shape();
    let b_shape = b.shape();

    if a_shape.len() != 2 || b_shape.len() != 2 || a_shape[1] != b_shape[0] {
        return Err(FerrogradError::IncompatibleShapes {
            shape1: a_shape,
            shape2: b_shape,
            operation: "matmul".to_string(),
        });
    }

    let m = a_shape[0];
    let k = a_shape[1];
    let n = b_shape[1];

    let data = {
        let a_guard = a.read_data();
        let b_guard = b.read_data();
        matmul_raw(&a_guard.data, &b_guard.data, m, k, n)
    };

    let output = Tensor::new(data, vec![m, n])?;
    if a.requires_grad() || b.requires_grad() {
        output.set_grad_fn(Arc::new(MatmulBackward {
            a: a.clone(),
            b: b.clone(),
        }));
    }
    Ok(output)
}
