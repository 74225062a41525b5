use log::{debug, info};

use crate::error::FerrogradError;
use crate::nn::{Module, NllLoss};
use crate::optim::Optimizer;
use crate::tensor::Tensor;

/// Anything that can hand out minibatches of `(inputs, labels)` repeatedly.
///
/// `batches` is called once per epoch and must return a fresh pass over the
/// data each time. Implementors live in the data crate; tests often use a
/// small in-memory vector.
pub trait BatchSource {
    fn batches(
        &self,
    ) -> Box<dyn Iterator<Item = Result<(Tensor, Vec<usize>), FerrogradError>> + '_>;
}

/// Drives the train loop: zero gradients, forward, loss, backward, step.
#[derive(Debug)]
pub struct Trainer {
    epochs: usize,
}

impl Trainer {
    pub fn new(epochs: usize) -> Self {
        Trainer { epochs }
    }

    pub fn epochs(&self) -> usize {
        self.epochs
    }

    /// Trains `model` for the configured number of epochs and returns the
    /// mean loss of each epoch, in order.
    ///
    /// # Errors
    /// Propagates any failure from the forward pass, loss, backward pass, or
    /// optimizer step, and `ConfigurationError` if an epoch yields no
    /// batches.
    pub fn fit<B: BatchSource>(
        &self,
        model: &dyn Module,
        criterion: &NllLoss,
        optimizer: &mut dyn Optimizer,
        data: &B,
    ) -> Result<Vec<f32>, FerrogradError> {
        let mut history = Vec::with_capacity(self.epochs);

        for epoch in 0..self.epochs {
            let mut epoch_loss = 0.0f32;
            let mut batch_count = 0usize;

            for batch in data.batches() {
                let (inputs, labels) = batch?;

                optimizer.zero_grad();
                let log_probs = model.forward(&inputs)?;
                let loss = criterion.calculate(&log_probs, &labels)?;
                loss.backward()?;
                optimizer.step()?;

                let loss_value = loss.item()?;
                epoch_loss += loss_value;
                batch_count += 1;
                debug!(
                    "epoch {} batch {}: loss = {:.6}",
                    epoch, batch_count, loss_value
                );
            }

            if batch_count == 0 {
                return Err(FerrogradError::ConfigurationError(
                    "batch source produced no batches for an epoch".to_string(),
                ));
            }

            let mean_loss = epoch_loss / batch_count as f32;
            info!("epoch {}/{}: mean loss = {:.6}", epoch + 1, self.epochs, mean_loss);
            history.push(mean_loss);
        }

        Ok(history)
    }
}

/// Fraction of rows whose argmax prediction matches the label.
///
/// `log_probs` has shape `[batch, classes]`; ties resolve to the lowest
/// class index.
pub fn accuracy(log_probs: &Tensor, labels: &[usize]) -> Result<f32, FerrogradError> {
    let shape = log_probs.shape();
    if shape.len() != 2 || shape[0] != labels.len() {
        return Err(FerrogradError::ShapeMismatch {
            expected: vec![labels.len(), 0],
            actual: shape,
            operation: "accuracy".to_string(),
        });
    }
    let batch = shape[0];
    let classes = shape[1];
    if batch == 0 {
        return Err(FerrogradError::ConfigurationError(
            "accuracy of an empty batch is undefined".to_string(),
        ));
    }

    let data = log_probs.get_data();
    let mut correct = 0usize;
    for (row, &label) in labels.iter().enumerate() {
        let row_slice = &data[row * classes..(row + 1) * classes];
        let mut best = 0usize;
        for (col, &v) in row_slice.iter().enumerate() {
            if v > row_slice[best] {
                best = col;
            }
        }
        if best == label {
            correct += 1;
        }
    }
    Ok(correct as f32 / batch as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nn::{Linear, LogSoftmax, Relu, Sequential};
    use crate::ops::loss::Reduction;
    use crate::optim::SgdOptimizer;
    use crate::tensor::create::seeded_rng;

    // A batch source that replays the same full batch each epoch.
    struct FullBatch {
        inputs: Tensor,
        labels: Vec<usize>,
    }

    impl BatchSource for FullBatch {
        fn batches(
            &self,
        ) -> Box<dyn Iterator<Item = Result<(Tensor, Vec<usize>), FerrogradError>> + '_>
        {
            let pair = (self.inputs.clone(), self.labels.clone());
            Box::new(std::iter::once(Ok(pair)))
        }
    }

    fn two_blob_data() -> FullBatch {
        // Class 0 clusters at -1, class 1 at +1, in every feature.
        let mut rows = Vec::new();
        let mut labels = Vec::new();
        for i in 0..8 {
            let sign = if i % 2 == 0 { -1.0 } else { 1.0 };
            let jitter = 0.1 * (i as f32 / 8.0);
            rows.extend([sign + jitter, sign - jitter, sign, sign + jitter]);
            labels.push(if sign < 0.0 { 0 } else { 1 });
        }
        FullBatch {
            inputs: Tensor::new(rows, vec![8, 4]).unwrap(),
            labels,
        }
    }

    fn mlp(seed: u64) -> Sequential {
        let mut rng = seeded_rng(seed);
        let mut model = Sequential::new();
        model.add(Box::new(Linear::new_with_rng(4, 8, true, &mut rng).unwrap()));
        model.add(Box::new(Relu::new()));
        model.add(Box::new(Linear::new_with_rng(8, 2, true, &mut rng).unwrap()));
        model.add(Box::new(LogSoftmax::new()));
        model
    }

    #[test]
    fn test_fit_reduces_loss_and_reports_history() {
        let data = two_blob_data();
        let model = mlp(17);
        let criterion = NllLoss::new(Reduction::Mean);
        let mut optimizer =
            SgdOptimizer::new(model.parameters().into_iter().cloned().collect(), 0.5, 0.0)
                .unwrap();

        let trainer = Trainer::new(200);
        let history = trainer
            .fit(&model, &criterion, &mut optimizer, &data)
            .unwrap();

        assert_eq!(history.len(), 200);
        assert!(history[199] < history[0]);
        assert!(history[199] < 0.1, "final loss {}", history[199]);

        let log_probs = model.forward(&data.inputs).unwrap();
        let acc = accuracy(&log_probs, &data.labels).unwrap();
        assert_eq!(acc, 1.0);
    }

    #[test]
    fn test_fit_fails_on_empty_batch_source() {
        struct Empty;
        impl BatchSource for Empty {
            fn batches(
                &self,
            ) -> Box<dyn Iterator<Item = Result<(Tensor, Vec<usize>), FerrogradError>> + '_>
            {
                Box::new(std::iter::empty())
            }
        }

        let model = mlp(1);
        let criterion = NllLoss::default();
        let mut optimizer =
            SgdOptimizer::new(model.parameters().into_iter().cloned().collect(), 0.1, 0.0)
                .unwrap();
        let trainer = Trainer::new(1);
        assert!(trainer
            .fit(&model, &criterion, &mut optimizer, &Empty)
            .is_err());
    }

    #[test]
    fn test_accuracy_argmax() {
        let lp = Tensor::new(vec![-0.1, -2.0, -3.0, -0.2], vec![2, 2]).unwrap();
        assert_eq!(accuracy(&lp, &[0, 1]).unwrap(), 1.0);
        assert_eq!(accuracy(&lp, &[1, 0]).unwrap(), 0.0);
    }

    #[test]
    fn test_accuracy_shape_mismatch() {
        let lp = Tensor::new(vec![-0.1, -2.0], vec![1, 2]).unwrap();
        assert!(accuracy(&lp, &[0, 1]).is_err());
    }
}
