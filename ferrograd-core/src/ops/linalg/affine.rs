use std::sync::Arc;

use crate::autograd::BackwardOp;
use crate::error::FerrogradError;
use crate::ops::linalg::{matmul_raw, transpose_raw};
use crate::tensor::Tensor;

/// Fused backward node for `Y = X · Wᵀ + b`.
///
/// Gradient rules:
///   dX = dY · W
///   dW = dYᵀ · X
///   db = Σ over batch rows of dY
#[derive(Debug)]
struct AffineBackward {
    input: Tensor,
    weight: Tensor,
    bias: Option<Tensor>,
}

impl BackwardOp for AffineBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, FerrogradError> {
        let g = grad_output.read_data();
        let x = self.input.read_data();
        let w = self.weight.read_data();

        let batch = x.shape[0];
        let in_features = x.shape[1];
        let out_features = w.shape[0];

        // dX = dY · W  ([B,O] x [O,I])
        let grad_input = matmul_raw(&g.data, &w.data, batch, out_features, in_features);

        // dW = dYᵀ · X  ([O,B] x [B,I])
        let g_t = transpose_raw(&g.data, batch, out_features);
        let grad_weight = matmul_raw(&g_t, &x.data, out_features, batch, in_features);

        let mut grads = vec![
            Tensor::new(grad_input, vec![batch, in_features])?,
            Tensor::new(grad_weight, vec![out_features, in_features])?,
        ];

        if self.bias.is_some() {
            let mut grad_bias = vec![0.0f32; out_features];
            for r in 0..batch {
                for o in 0..out_features {
                    grad_bias[o] += g.data[r * out_features + o];
                }
            }
            grads.push(Tensor::new(grad_bias, vec![out_features])?);
        }

        Ok(grads)
    }

    fn inputs(&self) -> Vec<Tensor> {
        let mut inputs = vec![self.input.clone(), self.weight.clone()];
        if let Some(bias) = &self.bias {
            inputs.push(bias.clone());
        }
        inputs
    }
}

/// Affine transform `Y = X · Wᵀ + b`.
///
/// `input: [batch, in]`, `weight: [out, in]`, optional `bias: [out]`.
/// This is the fused linear-layer primitive; the layer wrapper lives in
/// `nn::layers::Linear`.
pub fn affine_op(
    input: &Tensor,
    weight: &Tensor,
    bias: Option<&Tensor>,
) -> Result<Tensor, FerrogradError> {
    let x_shape = input.shape();
    let w_shape = weight.shape();

    if x_shape.len() != 2 || w_shape.len() != 2 || x_shape[1] != w_shape[1] {
        return Err(FerrogradError::IncompatibleShapes {
            shape1: x_shape,
            shape2: w_shape,
            operation: "affine".to_string(),
        });
    }
    let batch = x_shape[0];
    let in_features = x_shape[1];
    let out_features = w_shape[0];

    if let Some(b) = bias {
        let b_shape = b.shape();
        if b_shape != vec![out_features] {
            return Err(FerrogradError::ShapeMismatch {
                expected: vec![out_features],
                actual: b_shape,
                operation: "affine bias".to_string(),
            });
        }
    }

    let mut data = {
        let x = input.read_data();
        let w = weight.read_data();
        // X · Wᵀ: contract over in_features.
        let w_t = transpose_raw(&w.data, out_features, in_features);
        matmul_raw(&x.data, &w_t, batch, in_features, out_features)
    };

    if let Some(b) = bias {
        let b_guard = b.read_data();
        for r in 0..batch {
            for o in 0..out_features {
                data[r * out_features + o] += b_guard.data[o];
            }
        }
    }

    let output = Tensor::new(data, vec![batch, out_features])?;
    let tracked = input.requires_grad()
        || weight.requires_grad()
        || bias.map_or(false, |b| b.requires_grad());
    if tracked {
        output.set_grad_fn(Arc::new(AffineBackward {
            input: input.clone(),
            weight: weight.clone(),
            bias: bias.cloned(),
        }));
    }
    Ok(output)
}
