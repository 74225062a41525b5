use std::sync::Arc;

use crate::autograd::BackwardOp;
use crate::error::FerrogradError;
use crate::tensor::Tensor;

#[derive(Debug)]
struct MeanBackward {
    input: Tensor,
}

impl BackwardOp for MeanBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, FerrogradError> {
        let g = grad_output.item()?;
        let shape = self.input.shape();
        let numel: usize = shape.iter().product();
        let fill = g / numel as f32;
        Ok(vec![Tensor::new(vec![fill; numel], shape)?])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.input.clone()]
    }
}

/// Mean of all elements as a single-element `[1]` tensor.
pub fn mean_op(input: &Tensor) -> Result<Tensor, FerrogradError> {
    let guard = input.read_data();
    let numel = guard.numel();
    if numel == 0 {
        return Err(FerrogradError::ShapeMismatch {
            expected: vec![1],
            actual: guard.shape.clone(),
            operation: "mean of empty tensor".to_string(),
        });
    }
    let total: f32 = guard.data.iter().sum();
    drop(guard);

    let output = Tensor::new(vec![total / numel as f32], vec![1])?;
    if input.requires_grad() {
        output.set_grad_fn(Arc::new(MeanBackward {
            input: input.clone(),
        }));
    }
    Ok(output)
}
