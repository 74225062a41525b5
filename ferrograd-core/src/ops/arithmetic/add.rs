use std::sync::Arc;

use crate::autograd::BackwardOp;
use crate::error::FerrogradError;
use crate::tensor::Tensor;

#[derive(Debug)]
struct AddBackward {
    a: Tensor,
    b: Tensor,
    /// True when `b` is a 1-D bias broadcast across the rows of a 2-D `a`.
    bias_broadcast: bool,
}

impl BackwardOp for AddBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, FerrogradError> {
        let g = grad_output.read_data();
        let grad_a = Tensor::new(g.data.clone(), g.shape.clone())?;

        let grad_b = if self.bias_broadcast {
            // db_c = sum over rows of dy[r, c]
            let rows = g.shape[0];
            let cols = g.shape[1];
            let mut bias_grad = vec![0.0f32; cols];
            for r in 0..rows {
                for c in 0..cols {
                    bias_grad[c] += g.data[r * cols + c];
                }
            }
            Tensor::new(bias_grad, vec![cols])?
        } else {
            Tensor::new(g.data.clone(), g.shape.clone())?
        };

        Ok(vec![grad_a, grad_b])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone(), self.b.clone()]
    }
}

/// Elementwise addition `a + b`.
///
/// Two shape forms are accepted: identical shapes, or a 2-D `a` of shape
/// `[rows, cols]` plus a 1-D `b` of shape `[cols]` added to every row (the
/// bias pattern). Anything else is an `IncompatibleShapes` error; there is
/// no general broadcasting.
pub fn add_op(a: &Tensor, b: &Tensor) -> Result<Tensor, FerrogradError> {
    let a_shape = a.shape();
    let b_shape = b.shape();

    let (data, shape, bias_broadcast) = if a_shape == b_shape {
        let a_guard = a.read_data();
        let b_guard = b.read_data();
        let data: Vec<f32> = a_guard
            .data
            .iter()
            .zip(b_guard.data.iter())
            .map(|(x, y)| x + y)
            .collect();
        (data, a_shape.clone(), false)
    } else if a_shape.len() == 2 && b_shape.len() == 1 && a_shape[1] == b_shape[0] {
        let rows = a_shape[0];
        let cols = a_shape[1];
        let a_guard = a.read_data();
        let b_guard = b.read_data();
        let mut data = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                data.push(a_guard.data[r * cols + c] + b_guard.data[c]);
            }
        }
        (data, a_shape.clone(), true)
    } else {
        return Err(FerrogradError::IncompatibleShapes {
            shape1: a_shape,
            shape2: b_shape,
            operation: "add".to_string(),
        });
    };

    let output = Tensor::new(data, shape)?;
    if a.requires_grad() || b.requires_grad() {
        output.set_grad_fn(Arc::new(AddBackward {
            a: a.clone(),
            b: b.clone(),
            bias_broadcast,
        }));
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::reduction::sum_op;

    #[test]
    fn test_add_forward() {
        let a = Tensor::new(vec![1.0, 2.0, 3.0], vec![3]).unwrap();
        let b = Tensor::new(vec![10.0, 20.0, 30.0], vec![3]).unwrap();
        let c = add_op(&a, &b).unwrap();
        assert_eq!(c.get_data(), vec![11.0, 22.0, 33.0]);
        assert!(!c.requires_grad());
    }

    #[test]
    fn test_add_bias_broadcast_forward_and_backward() {
        let a = Tensor::new(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]).unwrap();
        a.requires_grad_(true).unwrap();
        let bias = Tensor::new(vec![0.5, -0.5], vec![2]).unwrap();
        bias.requires_grad_(true).unwrap();

        let y = add_op(&a, &bias).unwrap();
        assert_eq!(y.get_data(), vec![1.5, 1.5, 3.5, 3.5]);

        let loss = sum_op(&y).unwrap();
        loss.backward().unwrap();

        assert_eq!(a.grad().unwrap().get_data(), vec![1.0; 4]);
        // Bias gradient sums over the batch dimension.
        assert_eq!(bias.grad().unwrap().get_data(), vec![2.0, 2.0]);
        assert_eq!(bias.grad().unwrap().shape(), vec![2]);
    }

    #[test]
    fn test_add_rejects_incompatible() {
        let a = Tensor::new(vec![1.0, 2.0, 3.0], vec![3]).unwrap();
        let b = Tensor::new(vec![1.0, 2.0], vec![2]).unwrap();
        let err = add_op(&a, &b).unwrap_err();
        assert!(matches!(err, FerrogradError::IncompatibleShapes { .. }));
    }
}
