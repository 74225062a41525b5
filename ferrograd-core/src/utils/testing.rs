//! Assertion helpers shared by unit tests.

use approx::abs_diff_eq;

use crate::tensor::Tensor;

/// Asserts that a tensor has the given shape and element-wise matches
/// `expected` within `epsilon`.
pub(crate) fn check_tensor_near(tensor: &Tensor, shape: &[usize], expected: &[f32], epsilon: f32) {
    assert_eq!(tensor.shape(), shape, "shape mismatch");
    let data = tensor.get_data();
    assert_eq!(data.len(), expected.len(), "element count mismatch");
    for (i, (a, e)) in data.iter().zip(expected).enumerate() {
        assert!(
            abs_diff_eq!(*a, *e, epsilon = epsilon),
            "element {} differs: got {}, expected {} (epsilon {})",
            i,
            a,
            e,
            epsilon
        );
    }
}
