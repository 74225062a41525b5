use std::sync::Arc;

use crate::autograd::BackwardOp;
use crate::error::FerrogradError;
use crate::tensor::Tensor;

/// How a batched loss is reduced to a scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reduction {
    Mean,
    Sum,
}

#[derive(Debug)]
struct NllLossBackward {
    log_probs: Tensor,
    targets: Vec<usize>,
    reduction: Reduction,
}

impl BackwardOp for NllLossBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, FerrogradError> {
        let g = grad_output.item()?;
        let shape = self.log_probs.shape();
        let batch = shape[0];
        let classes = shape[1];

        let scale = match self.reduction {
            Reduction::Mean => g / batch as f32,
            Reduction::Sum => g,
        };

        // −scale at (row, target), zero elsewhere.
        let mut grad = vec![0.0f32; batch * classes];
        for (row, &target) in self.targets.iter().enumerate() {
            grad[row * classes + target] = -scale;
        }
        Ok(vec![Tensor::new(grad, shape)?])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.log_probs.clone()]
    }
}

/// Negative log-likelihood over log-probabilities and integer class labels.
///
/// `log_probs: [batch, classes]` (typically the output of
/// [`log_softmax_op`](crate::ops::activation::log_softmax_op)), `targets`
/// one label per row. Mean reduction: `−(1/B) Σ log_probs[r, t_r]`.
///
/// # Errors
/// `LabelOutOfRange` if any label is `>= classes`; `ShapeMismatch` if the
/// target count differs from the batch size or `log_probs` is not 2-D.
pub fn nll_loss_op(
    log_probs: &Tensor,
    targets: &[usize],
    reduction: Reduction,
) -> Result<Tensor, FerrogradError> {
    let shape = log_probs.shape();
    if shape.len() != 2 {
        return Err(FerrogradError::ShapeMismatch {
            expected: vec![targets.len(), 0],
            actual: shape,
            operation: "nll_loss (expects [batch, classes])".to_string(),
        });
    }
    let batch = shape[0];
    let classes = shape[1];
    if targets.len() != batch {
        return Err(FerrogradError::ShapeMismatch {
            expected: vec![batch],
            actual: vec![targets.len()],
            operation: "nll_loss targets".to_string(),
        });
    }

    let mut total = 0.0f32;
    {
        let guard = log_probs.read_data();
        for (row, &target) in targets.iter().enumerate() {
            if target >= classes {
                return Err(FerrogradError::LabelOutOfRange {
                    label: target,
                    classes,
                    row,
                });
            }
            total -= guard.data[row * classes + target];
        }
    }
    let value = match reduction {
        Reduction::Mean => total / batch as f32,
        Reduction::Sum => total,
    };

    let output = Tensor::new(vec![value], vec![1])?;
    if log_probs.requires_grad() {
        output.set_grad_fn(Arc::new(NllLossBackward {
            log_probs: log_probs.clone(),
            targets: targets.to_vec(),
            reduction,
        }));
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_nll_forward_mean() {
        let lp = Tensor::new(vec![-0.5, -1.5, -2.0, -0.2], vec![2, 2]).unwrap();
        let loss = nll_loss_op(&lp, &[0, 1], Reduction::Mean).unwrap();
        assert_abs_diff_eq!(loss.item().unwrap(), (0.5 + 0.2) / 2.0, epsilon = 1e-6);
    }

    #[test]
    fn test_nll_backward_places_mass_at_targets() {
        let lp = Tensor::new(vec![-0.5, -1.5, -2.0, -0.2], vec![2, 2]).unwrap();
        lp.requires_grad_(true).unwrap();
        let loss = nll_loss_op(&lp, &[0, 1], Reduction::Mean).unwrap();
        loss.backward().unwrap();
        assert_eq!(lp.grad().unwrap().get_data(), vec![-0.5, 0.0, 0.0, -0.5]);
    }

    #[test]
    fn test_nll_label_out_of_range() {
        let lp = Tensor::new(vec![-0.5, -1.5], vec![1, 2]).unwrap();
        let err = nll_loss_op(&lp, &[2], Reduction::Mean).unwrap_err();
        assert_eq!(
            err,
            FerrogradError::LabelOutOfRange {
                label: 2,
                classes: 2,
                row: 0
            }
        );
    }

    #[test]
    fn test_nll_target_count_mismatch() {
        let lp = Tensor::new(vec![-0.5, -1.5], vec![1, 2]).unwrap();
        assert!(matches!(
            nll_loss_op(&lp, &[0, 1], Reduction::Mean),
            Err(FerrogradError::ShapeMismatch { .. })
        ));
    }
}
