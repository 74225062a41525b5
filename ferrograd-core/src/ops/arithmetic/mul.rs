use std::sync::Arc;

use crate::autograd::BackwardOp;
use crate::error::FerrogradError;
use crate::tensor::Tensor;

#[derive(Debug)]
struct MulBackward {
    a: Tensor,
    b: Tensor,
}

impl BackwardOp for MulBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, FerrogradError> {
        let g = grad_output.read_data();
        let a = self.a.read_data();
        let b = self.b.read_data();

        let grad_a: Vec<f32> = g
            .data
            .iter()
            .zip(b.data.iter())
            .map(|(gy, bv)| gy * bv)
            .collect();
        let grad_b: Vec<f32> = g
            .data
            .iter()
            .zip(a.data.iter())
            .map(|(gy, av)| gy * av)
            .collect();

        Ok(vec![
            Tensor::new(grad_a, a.shape.clone())?,
            Tensor::new(grad_b, b.shape.clone())?,
        ])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone(), self.b.clone()]
    }
}

/// Elementwise multiplication `a ⊙ b`. Shapes must match exactly.
pub fn mul_op(a: &Tensor, b: &Tensor) -> Result<Tensor, FerrogradError> {
    let a_shape = a.shape();
    let b_shape = b.shape();
    if a_shape != b_shape {
        return Err(FerrogradError::IncompatibleShapes {
            shape1: a_shape,
            shape2: b_shape,
            operation: "mul".to_string(),
        });
    }

    let data: Vec<f32> = {
        let a_guard = a.read_data();
        let b_guard = b.read_data();
        a_guard
            .data
            .iter()
            .zip(b_guard.data.iter())
            .map(|(x, y)| x * y)
            .collect()
    };

    let output = Tensor::new(data, a_shape)?;
    if a.requires_grad() || b.requires_grad() {
        output.set_grad_fn(Arc::new(MulBackward {
            a: a.clone(),
            b: b.clone(),
        }));
    }
    Ok(output)
}
