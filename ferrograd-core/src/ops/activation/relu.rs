use std::sync::Arc;

use crate::autograd::BackwardOp;
use crate::error::FerrogradError;
use crate::tensor::Tensor;

#[derive(Debug)]
struct ReluBackward {
    input: Tensor,
}

impl BackwardOp for ReluBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, FerrogradError> {
        let g = grad_output.read_data();
        let x = self.input.read_data();
        let grad: Vec<f32> = g
            .data
            .iter()
            .zip(x.data.iter())
            .map(|(gy, &xv)| if xv > 0.0 { *gy } else { 0.0 })
            .collect();
        Ok(vec![Tensor::new(grad, x.shape.clone())?])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.input.clone()]
    }
}

/// Rectified Linear Unit, elementwise `max(0, x)`.
///
/// Sub-gradient at `x == 0` is fixed to 0 so numeric tests are reproducible.
pub fn relu_op(input: &Tensor) -> Result<Tensor, FerrogradError> {
    let (data, shape) = {
        let guard = input.read_data();
        let data: Vec<f32> = guard.data.iter().map(|&x| x.max(0.0)).collect();
        (data, guard.shape.clone())
    };

    let output = Tensor::new(data, shape)?;
    if input.requires_grad() {
        output.set_grad_fn(Arc::new(ReluBackward {
            input: input.clone(),
        }));
    }
    Ok(output)
}
