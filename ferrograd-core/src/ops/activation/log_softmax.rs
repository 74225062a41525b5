use std::sync::Arc;

use crate::autograd::BackwardOp;
use crate::error::FerrogradError;
use crate::tensor::Tensor;

/// Backward node for row-wise log-softmax.
///
/// Saves the forward *output* `y`: the gradient only needs `softmax = exp(y)`,
/// not the raw logits.
#[derive(Debug)]
struct LogSoftmaxBackward {
    input: Tensor,
    output: Tensor,
}

impl BackwardOp for LogSoftmaxBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, FerrogradError> {
        let g = grad_output.read_data();
        let y = self.output.read_data();
        let rows = y.shape[0];
        let cols = y.shape[1];

        // dx_i = dy_i − exp(y_i) · Σ_j dy_j  (per row)
        let mut grad = vec![0.0f32; rows * cols];
        for r in 0..rows {
            let row = r * cols;
            let row_sum: f32 = g.data[row..row + cols].iter().sum();
            for c in 0..cols {
                grad[row + c] = g.data[row + c] - y.data[row + c].exp() * row_sum;
            }
        }

        Ok(vec![Tensor::new(grad, y.shape.clone())?])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.input.clone()]
    }
}

/// Row-wise log-softmax over a 2-D `[batch, classes]` tensor.
///
/// Computed as `x_i − max(x) − log(Σ_j exp(x_j − max(x)))`; the max
/// subtraction keeps large logits (e.g. 1000.0) from overflowing `exp`.
pub fn log_softmax_op(input: &Tensor) -> Result<Tensor, FerrogradError> {
    let shape = input.shape();
    if shape.len() != 2 {
        return Err(FerrogradError::ShapeMismatch {
            expected: vec![0, 0],
            actual: shape,
            operation: "log_softmax (expects [batch, classes])".to_string(),
        });
    }
    let rows = shape[0];
    let cols = shape[1];

    let data = {
        let guard = input.read_data();
        let mut out = vec![0.0f32; rows * cols];
        for r in 0..rows {
            let row = &guard.data[r * cols..(r + 1) * cols];
            let max = row.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
            let log_sum: f32 = row.iter().map(|&x| (x - max).exp()).sum::<f32>().ln();
            for c in 0..cols {
                out[r * cols + c] = row[c] - max - log_sum;
            }
        }
        out
    };

    let output = Tensor::new(data, shape)?;
    if input.requires_grad() {
        output.set_grad_fn(Arc::new(LogSoftmaxBackward {
            input: input.clone(),
            output: output.clone(),
        }));
    }
    Ok(output)
}
