use crate::error::FerrogradError;
use crate::nn::{Module, Parameter};
use crate::ops::activation::log_softmax_op;
use crate::tensor::Tensor;

/// Applies log-softmax along the class dimension of a `[batch, classes]`
/// input. Stateless.
#[derive(Debug, Default)]
pub struct LogSoftmax;

impl LogSoftmax {
    pub fn new() -> Self {
        LogSoftmax
    }
}

impl Module for LogSoftmax {
    fn forward(&self, input: &Tensor) -> Result<Tensor, FerrogradError> {
        log_softmax_op(input)
    }

    fn parameters(&self) -> Vec<&Parameter> {
        Vec::new()
    }

    fn named_parameters(&self) -> Vec<(String, &Parameter)> {
        Vec::new()
    }
}
