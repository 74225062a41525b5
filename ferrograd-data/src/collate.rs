//! Turns a batch of individual examples into stacked tensors.

use ferrograd_core::{FerrogradError, Tensor};

/// Stacks `(features, label)` examples into a `[batch, features]` tensor and
/// a label vector.
///
/// # Errors
/// `ConfigurationError` for an empty batch or a zero-width feature vector,
/// and `ShapeMismatch` if the rows disagree on feature count.
pub fn stack_examples(
    examples: &[(Vec<f32>, usize)],
) -> Result<(Tensor, Vec<usize>), FerrogradError> {
    let batch = examples.len();
    if batch == 0 {
        return Err(FerrogradError::ConfigurationError(
            "cannot collate an empty batch".to_string(),
        ));
    }
    let features = examples[0].0.len();
    if features == 0 {
        return Err(FerrogradError::ConfigurationError(
            "cannot collate examples with zero features".to_string(),
        ));
    }

    let mut data = Vec::with_capacity(batch * features);
    let mut labels = Vec::with_capacity(batch);
    for (row, (values, label)) in examples.iter().enumerate() {
        if values.len() != features {
            return Err(FerrogradError::ShapeMismatch {
                expected: vec![features],
                actual: vec![values.len()],
                operation: format!("collate row {}", row),
            });
        }
        data.extend_from_slice(values);
        labels.push(*label);
    }

    let inputs = Tensor::new(data, vec![batch, features])?;
    Ok((inputs, labels))
}
