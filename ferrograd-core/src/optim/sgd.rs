use crate::error::FerrogradError;
use crate::nn::Parameter;
use crate::optim::optimizer_trait::Optimizer;

/// Stochastic gradient descent with optional momentum.
///
/// With momentum `mu > 0` the update keeps a velocity buffer per parameter:
/// `v = mu * v + g; p -= lr * v`. With `mu == 0` it is the plain rule
/// `p -= lr * g`.
#[derive(Debug)]
pub struct SgdOptimizer {
    params: Vec<Parameter>,
    lr: f32,
    momentum: f32,
    // One velocity buffer per parameter, allocated on first use.
    velocity: Vec<Option<Vec<f32>>>,
}

impl SgdOptimizer {
    /// # Errors
    /// `ConfigurationError` for a non-positive learning rate or a negative
    /// momentum factor.
    pub fn new(params: Vec<Parameter>, lr: f32, momentum: f32) -> Result<Self, FerrogradError> {
        if lr <= 0.0 || !lr.is_finite() {
            return Err(FerrogradError::ConfigurationError(format!(
                "SGD learning rate must be positive and finite, got {}",
                lr
            )));
        }
        if momentum < 0.0 || !momentum.is_finite() {
            return Err(FerrogradError::ConfigurationError(format!(
                "SGD momentum must be non-negative, got {}",
                momentum
            )));
        }
        let velocity = vec![None; params.len()];
        Ok(SgdOptimizer {
            params,
            lr,
            momentum,
            velocity,
        })
    }

    pub fn lr(&self) -> f32 {
        self.lr
    }
}

impl Optimizer for SgdOptimizer {
    fn step(&mut self) -> Result<(), FerrogradError> {
        for (index, param) in self.params.iter().enumerate() {
            let grad = param.grad().ok_or_else(|| FerrogradError::MissingGradient {
                name: param
                    .name()
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("parameter {}", index)),
            })?;
            let grad_data = grad.get_data();
            let mut data = param.get_data();

            if self.momentum > 0.0 {
                let velocity = self.velocity[index]
                    .get_or_insert_with(|| vec![0.0; grad_data.len()]);
                for ((p, v), g) in data.iter_mut().zip(velocity.iter_mut()).zip(&grad_data) {
                    *v = self.momentum * *v + g;
                    *p -= self.lr * *v;
                }
            } else {
                for (p, g) in data.iter_mut().zip(&grad_data) {
                    *p -= self.lr * g;
                }
            }

            param.set_data(data)?;
        }
        Ok(())
    }

    fn zero_grad(&mut self) {
        for param in &self.params {
            param.zero_grad();
        }
    }
}
