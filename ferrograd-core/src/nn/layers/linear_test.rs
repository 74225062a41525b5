use approx::assert_abs_diff_eq;

use crate::nn::{Linear, Module};
use crate::tensor::create::seeded_rng;
use crate::tensor::Tensor;

#[test]
fn test_linear_forward_shape() {
    let mut rng = seeded_rng(1);
    let layer = Linear::new_with_rng(3, 4, true, &mut rng).unwrap();
    let x = Tensor::new(vec![0.0; 6], vec![2, 3]).unwrap();
    let y = layer.forward(&x).unwrap();
    assert_eq!(y.shape(), vec![2, 4]);
}

#[test]
fn test_linear_forward_values() {
    let mut rng = seeded_rng(1);
    let layer = Linear::new_with_rng(2, 2, true, &mut rng).unwrap();
    layer.weight().set_data(vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    layer.bias().unwrap().set_data(vec![0.5, -0.5]).unwrap();

    let x = Tensor::new(vec![1.0, 1.0], vec![1, 2]).unwrap();
    let y = layer.forward(&x).unwrap();
    // row . [1,2] + 0.5 = 3.5, row . [3,4] - 0.5 = 6.5
    let out = y.get_data();
    assert_abs_diff_eq!(out[0], 3.5, epsilon = 1e-6);
    assert_abs_diff_eq!(out[1], 6.5, epsilon = 1e-6);
}

#[test]
fn test_linear_without_bias() {
    let mut rng = seeded_rng(2);
    let layer = Linear::new_with_rng(2, 3, false, &mut rng).unwrap();
    assert!(layer.bias().is_none());
    assert_eq!(layer.parameters().len(), 1);
}

#[test]
fn test_linear_backward_populates_param_grads() {
    let mut rng = seeded_rng(3);
    let layer = Linear::new_with_rng(2, 2, true, &mut rng).unwrap();
    let x = Tensor::new(vec![1.0, -1.0, 0.5, 2.0], vec![2, 2]).unwrap();
    let y = layer.forward(&x).unwrap();
    let loss = crate::ops::reduction::mean_op(&y).unwrap();
    loss.backward().unwrap();

    assert!(layer.weight().grad().is_some());
    assert!(layer.bias().unwrap().grad().is_some());
}

#[test]
fn test_linear_named_parameters() {
    let mut rng = seeded_rng(4);
    let layer = Linear::new_with_rng(2, 2, true, &mut rng).unwrap();
    let names: Vec<String> = layer
        .named_parameters()
        .into_iter()
        .map(|(n, _)| n)
        .collect();
    assert_eq!(names, vec!["weight".to_string(), "bias".to_string()]);
}

#[test]
fn test_linear_rejects_zero_dims() {
    let mut rng = seeded_rng(5);
    assert!(Linear::new_with_rng(0, 2, true, &mut rng).is_err());
    assert!(Linear::new_with_rng(2, 0, true, &mut rng).is_err());
}
