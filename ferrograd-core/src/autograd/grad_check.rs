//! Numerical gradient checking via centered finite differences.

use thiserror::Error;

use crate::error::FerrogradError;
use crate::tensor::Tensor;

/// Error type specifically for gradient checking failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradCheckError {
    #[error("Gradient check failed for input {input_index}, element {element_index}: analytical {analytical:?} != numerical {numerical:?} (difference {difference:?})")]
    GradientMismatch {
        input_index: usize,
        element_index: usize,
        analytical: f64,
        numerical: f64,
        difference: f64,
    },

    #[error("Input tensor {input_index} requires grad but has no gradient after the backward pass.")]
    MissingAnalyticalGrad { input_index: usize },

    #[error("Numerical gradient is not finite for input {input_index}, element {element_index} (loss+ {loss_plus:?}, loss- {loss_minus:?})")]
    NumericalGradNotFinite {
        input_index: usize,
        element_index: usize,
        loss_plus: f64,
        loss_minus: f64,
    },

    #[error("Gradient check inputs must be leaf tensors (input {input_index} has a grad_fn).")]
    InputNotLeaf { input_index: usize },

    #[error("Forward function must produce a single-element tensor, got shape {shape:?}")]
    NonScalarOutput { shape: Vec<usize> },

    #[error("Tensor error during gradient check: {0}")]
    TensorError(#[from] FerrogradError),
}

/// Checks analytical gradients of `func` against centered finite differences.
///
/// `func` must map the given inputs to a single-element loss tensor. Every
/// input with `requires_grad = true` is perturbed element by element:
///
/// numerical ≈ (L(x + ε) − L(x − ε)) / 2ε
///
/// and compared to the gradient produced by one backward pass, using a
/// relative tolerance `|a − n| <= tolerance · (1 + max(|a|, |n|))`.
pub fn check_grad<F>(
    func: F,
    inputs: &[Tensor],
    epsilon: f32,
    tolerance: f32,
) -> Result<(), GradCheckError>
where
    F: Fn(&[Tensor]) -> Result<Tensor, FerrogradError>,
{
    for (i, input) in inputs.iter().enumerate() {
        if input.grad_fn().is_some() {
            return Err(GradCheckError::InputNotLeaf { input_index: i });
        }
        input.zero_grad();
    }

    // Analytical pass.
    let output = func(inputs)?;
    if output.numel() != 1 {
        return Err(GradCheckError::NonScalarOutput {
            shape: output.shape(),
        });
    }
    output.backward()?;

    let mut analytical: Vec<Option<Vec<f32>>> = Vec::with_capacity(inputs.len());
    for (i, input) in inputs.iter().enumerate() {
        if input.requires_grad() {
            let grad = input
                .grad()
                .ok_or(GradCheckError::MissingAnalyticalGrad { input_index: i })?;
            analytical.push(Some(grad.get_data()));
        } else {
            analytical.push(None);
        }
    }

    // Numerical pass, one perturbed element at a time.
    for (i, input) in inputs.iter().enumerate() {
        let Some(analytical_grad) = &analytical[i] else {
            continue;
        };
        let original = input.get_data();
        for j in 0..original.len() {
            let mut plus = original.clone();
            plus[j] += epsilon;
            input.set_data(plus)?;
            let loss_plus = func(inputs)?.item()? as f64;

            let mut minus = original.clone();
            minus[j] -= epsilon;
            input.set_data(minus)?;
            let loss_minus = func(inputs)?.item()? as f64;

            input.set_data(original.clone())?;

            let numerical = (loss_plus - loss_minus) / (2.0 * epsilon as f64);
            if !numerical.is_finite() {
                return Err(GradCheckError::NumericalGradNotFinite {
                    input_index: i,
                    element_index: j,
                    loss_plus,
                    loss_minus,
                });
            }

            let a = analytical_grad[j] as f64;
            let difference = (a - numerical).abs();
            let scale = 1.0 + a.abs().max(numerical.abs());
            if difference > tolerance as f64 * scale {
                return Err(GradCheckError::GradientMismatch {
                    input_index: i,
                    element_index: j,
                    analytical: a,
                    numerical,
                    difference,
                });
            }
        }
    }
    Ok(())
}
