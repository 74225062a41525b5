use std::sync::Arc;

use crate::autograd::BackwardOp;
use crate::error::FerrogradError;
use crate::tensor::Tensor;

#[derive(Debug)]
struct SumBackward {
    input: Tensor,
}

impl BackwardOp for SumBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, FerrogradError> {
        let g = grad_output.item()?;
        let shape = self.input.shape();
        let numel: usize = shape.iter().product();
        Ok(vec![Tensor::new(vec![g; numel], shape)?])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.input.clone()]
    }
}

/// Sums all elements into a single-element `[1]` tensor.
pub fn sum_op(input: &Tensor) -> Result<Tensor, FerrogradError> {
    let total: f32 = input.read_data().data.iter().sum();
    let output = Tensor::new(vec![total], vec![1])?;
    if input.requires_grad() {
        output.set_grad_fn(Arc::new(SumBackward {
            input: input.clone(),
        }));
    }
    Ok(output)
}
