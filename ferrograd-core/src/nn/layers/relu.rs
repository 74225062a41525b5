use crate::error::FerrogradError;
use crate::nn::{Module, Parameter};
use crate::ops::activation::relu_op;
use crate::tensor::Tensor;

/// Applies the rectified linear unit element-wise. Stateless.
#[derive(Debug, Default)]
pub struct Relu;

impl Relu {
    pub fn new() -> Self {
        Relu
    }
}

impl Module for Relu {
    fn forward(&self, input: &Tensor) -> Result<Tensor, FerrogradError> {
        relu_op(input)
    }

    fn parameters(&self) -> Vec<&Parameter> {
        Vec::new()
    }

    fn named_parameters(&self) -> Vec<(String, &Parameter)> {
        Vec::new()
    }
}
