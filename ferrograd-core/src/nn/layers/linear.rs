use rand::rngs::StdRng;

use crate::error::FerrogradError;
use crate::nn::init::{kaiming_uniform_, zeros_};
use crate::nn::{Module, Parameter};
use crate::ops::linalg::affine_op;
use crate::tensor::create::{seeded_rng, zeros};
use crate::tensor::Tensor;

/// A fully connected layer: `y = x @ W^T + b`.
///
/// Weight shape is `[out_features, in_features]`, bias shape `[out_features]`.
/// Weights are initialized with Kaiming uniform, biases with zeros.
#[derive(Debug)]
pub struct Linear {
    weight: Parameter,
    bias: Option<Parameter>,
    in_features: usize,
    out_features: usize,
}

impl Linear {
    /// Creates a layer with freshly initialized weights from an entropy seed.
    pub fn new(
        in_features: usize,
        out_features: usize,
        use_bias: bool,
    ) -> Result<Self, FerrogradError> {
        let mut rng = seeded_rng(rand::random());
        Self::new_with_rng(in_features, out_features, use_bias, &mut rng)
    }

    /// Creates a layer using the caller's RNG, for deterministic runs.
    pub fn new_with_rng(
        in_features: usize,
        out_features: usize,
        use_bias: bool,
        rng: &mut StdRng,
    ) -> Result<Self, FerrogradError> {
        if in_features == 0 || out_features == 0 {
            return Err(FerrogradError::ConfigurationError(format!(
                "Linear requires non-zero dimensions, got {}x{}",
                in_features, out_features
            )));
        }

        let weight_tensor = zeros(&[out_features, in_features])?;
        kaiming_uniform_(&weight_tensor, in_features, rng)?;
        let weight = Parameter::new(weight_tensor, Some("weight".to_string()))?;

        let bias = if use_bias {
            let bias_tensor = zeros(&[out_features])?;
            zeros_(&bias_tensor)?;
            Some(Parameter::new(bias_tensor, Some("bias".to_string()))?)
        } else {
            None
        };

        Ok(Linear {
            weight,
            bias,
            in_features,
            out_features,
        })
    }

    pub fn in_features(&self) -> usize {
        self.in_features
    }

    pub fn out_features(&self) -> usize {
        self.out_features
    }

    pub fn weight(&self) -> &Parameter {
        &self.weight
    }

    pub fn bias(&self) -> Option<&Parameter> {
        self.bias.as_ref()
    }
}

impl Module for Linear {
    fn forward(&self, input: &Tensor) -> Result<Tensor, FerrogradError> {
        affine_op(
            input,
            self.weight.tensor(),
            self.bias.as_ref().map(|b| b.tensor()),
        )
    }

    fn parameters(&self) -> Vec<&Parameter> {
        let mut params = vec![&self.weight];
        if let Some(bias) = &self.bias {
            params.push(bias);
        }
        params
    }

    fn named_parameters(&self) -> Vec<(String, &Parameter)> {
        let mut params = vec![("weight".to_string(), &self.weight)];
        if let Some(bias) = &self.bias {
            params.push(("bias".to_string(), bias));
        }
        params
    }
}
