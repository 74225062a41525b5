use approx::assert_abs_diff_eq;

use crate::error::FerrogradError;
use crate::nn::Parameter;
use crate::optim::{AdamOptimizer, Optimizer};
use crate::tensor::Tensor;

fn param_with_grad(values: Vec<f32>, grad: Vec<f32>) -> Parameter {
    let shape = vec![values.len()];
    let p = Parameter::new_unnamed(Tensor::new(values, shape.clone()).unwrap()).unwrap();
    p.acc_grad(Tensor::new(grad, shape).unwrap()).unwrap();
    p
}

#[test]
fn test_adam_first_step_moves_by_almost_lr() {
    // After bias correction the first update is lr * g / (|g| + eps),
    // so with g = 1 the parameter moves by roughly lr.
    let p = param_with_grad(vec![0.0], vec![1.0]);
    let mut opt = AdamOptimizer::new(vec![p.clone()], 0.001).unwrap();
    opt.step().unwrap();
    assert_abs_diff_eq!(p.get_data()[0], -0.001, epsilon = 1e-6);
}

#[test]
fn test_adam_step_direction_follows_gradient_sign() {
    let p = param_with_grad(vec![1.0, 1.0], vec![0.3, -0.3]);
    let mut opt = AdamOptimizer::new(vec![p.clone()], 0.01).unwrap();
    opt.step().unwrap();
    let data = p.get_data();
    assert!(data[0] < 1.0);
    assert!(data[1] > 1.0);
}

#[test]
fn test_adam_shares_step_counter_across_params() {
    let a = param_with_grad(vec![0.0], vec![1.0]);
    let b = param_with_grad(vec![0.0], vec![1.0]);
    let mut opt = AdamOptimizer::new(vec![a.clone(), b.clone()], 0.001).unwrap();

    opt.step().unwrap();
    assert_eq!(opt.iterations(), 1);

    // Identical gradients and a shared counter give identical trajectories.
    opt.zero_grad();
    a.acc_grad(Tensor::new(vec![1.0], vec![1]).unwrap()).unwrap();
    b.acc_grad(Tensor::new(vec![1.0], vec![1]).unwrap()).unwrap();
    opt.step().unwrap();
    assert_eq!(opt.iterations(), 2);
    assert_eq!(a.get_data(), b.get_data());
}

#[test]
fn test_adam_missing_gradient_is_an_error() {
    let p = Parameter::new(Tensor::new(vec![1.0], vec![1]).unwrap(), Some("b".to_string()))
        .unwrap();
    let mut opt = AdamOptimizer::new(vec![p], 0.001).unwrap();
    let err = opt.step().unwrap_err();
    assert_eq!(
        err,
        FerrogradError::MissingGradient {
            name: "b".to_string()
        }
    );
}

#[test]
fn test_adam_rejects_bad_config() {
    assert!(AdamOptimizer::with_config(vec![], 0.0, 0.9, 0.999, 1e-8).is_err());
    assert!(AdamOptimizer::with_config(vec![], 0.001, 1.0, 0.999, 1e-8).is_err());
    assert!(AdamOptimizer::with_config(vec![], 0.001, 0.9, -0.1, 1e-8).is_err());
    assert!(AdamOptimizer::with_config(vec![], 0.001, 0.9, 0.999, 0.0).is_err());
}

#[test]
fn test_adam_converges_on_quadratic() {
    // Minimize f(p) = p^2 by feeding the analytic gradient 2p.
    let p = Parameter::new_unnamed(Tensor::new(vec![5.0], vec![1]).unwrap()).unwrap();
    let mut opt = AdamOptimizer::new(vec![p.clone()], 0.1).unwrap();
    for _ in 0..500 {
        opt.zero_grad();
        let g = 2.0 * p.get_data()[0];
        p.acc_grad(Tensor::new(vec![g], vec![1]).unwrap()).unwrap();
        opt.step().unwrap();
    }
    assert!(p.get_data()[0].abs() < 0.05);
}
