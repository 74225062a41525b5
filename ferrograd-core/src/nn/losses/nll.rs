use crate::error::FerrogradError;
use crate::ops::loss::{nll_loss_op, Reduction};
use crate::tensor::Tensor;

/// Negative log-likelihood loss over log-probabilities.
///
/// Pairs with a final [`LogSoftmax`](crate::nn::LogSoftmax) layer to form a
/// cross-entropy classifier head.
#[derive(Debug, Clone, Copy)]
pub struct NllLoss {
    reduction: Reduction,
}

impl NllLoss {
    pub fn new(reduction: Reduction) -> Self {
        NllLoss { reduction }
    }

    pub fn reduction(&self) -> Reduction {
        self.reduction
    }

    /// Computes the loss for a batch of log-probabilities and labels.
    pub fn calculate(
        &self,
        log_probs: &Tensor,
        targets: &[usize],
    ) -> Result<Tensor, FerrogradError> {
        nll_loss_op(log_probs, targets, self.reduction)
    }
}

impl Default for NllLoss {
    fn default() -> Self {
        NllLoss::new(Reduction::Mean)
    }
}
