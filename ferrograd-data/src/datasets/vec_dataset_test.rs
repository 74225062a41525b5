use super::*;
use ferrograd_core::FerrogradError;

#[test]
fn test_vec_dataset_get_and_len() {
    let ds = VecDataset::new(vec![10, 20, 30]);
    assert_eq!(ds.len(), 3);
    assert!(!ds.is_empty());
    assert_eq!(ds.get(1).unwrap(), 20);
}

#[test]
fn test_vec_dataset_out_of_bounds() {
    let ds = VecDataset::new(vec![1.0f32]);
    assert_eq!(
        ds.get(5).unwrap_err(),
        FerrogradError::IndexOutOfBounds { index: 5, len: 1 }
    );
}

#[test]
fn test_vec_dataset_of_examples() {
    let ds = VecDataset::new(vec![(vec![0.0f32, 1.0], 1usize), (vec![2.0, 3.0], 0)]);
    let (features, label) = ds.get(0).unwrap();
    assert_eq!(features, vec![0.0, 1.0]);
    assert_eq!(label, 1);
}

#[test]
fn test_empty_dataset() {
    let ds: VecDataset<u8> = VecDataset::new(vec![]);
    assert!(ds.is_empty());
    assert_eq!(ds.len(), 0);
}
