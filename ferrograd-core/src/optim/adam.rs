use crate::error::FerrogradError;
use crate::nn::Parameter;
use crate::optim::optimizer_trait::Optimizer;

/// The Adam optimizer (Kingma & Ba, 2015).
///
/// Keeps exponential moving averages of the gradient (`m`) and its square
/// (`v`) per parameter, with bias correction driven by a step counter shared
/// across all parameters.
#[derive(Debug)]
pub struct AdamOptimizer {
    params: Vec<Parameter>,
    lr: f32,
    beta1: f32,
    beta2: f32,
    epsilon: f32,
    iterations: u64,
    first_moment: Vec<Option<Vec<f32>>>,
    second_moment: Vec<Option<Vec<f32>>>,
}

impl AdamOptimizer {
    /// Creates an Adam optimizer with the canonical defaults
    /// `beta1 = 0.9`, `beta2 = 0.999`, `epsilon = 1e-8`.
    pub fn new(params: Vec<Parameter>, lr: f32) -> Result<Self, FerrogradError> {
        Self::with_config(params, lr, 0.9, 0.999, 1e-8)
    }

    /// # Errors
    /// `ConfigurationError` if `lr` or `epsilon` is not positive, or if a
    /// beta falls outside `[0, 1)`.
    pub fn with_config(
        params: Vec<Parameter>,
        lr: f32,
        beta1: f32,
        beta2: f32,
        epsilon: f32,
    ) -> Result<Self, FerrogradError> {
        if lr <= 0.0 || !lr.is_finite() {
            return Err(FerrogradError::ConfigurationError(format!(
                "Adam learning rate must be positive and finite, got {}",
                lr
            )));
        }
        if !(0.0..1.0).contains(&beta1) {
            return Err(FerrogradError::ConfigurationError(format!(
                "Adam beta1 must be in [0, 1), got {}",
                beta1
            )));
        }
        if !(0.0..1.0).contains(&beta2) {
            return Err(FerrogradError::ConfigurationError(format!(
                "Adam beta2 must be in [0, 1), got {}",
                beta2
            )));
        }
        if epsilon <= 0.0 || !epsilon.is_finite() {
            return Err(FerrogradError::ConfigurationError(format!(
                "Adam epsilon must be positive, got {}",
                epsilon
            )));
        }

        let count = params.len();
        Ok(AdamOptimizer {
            params,
            lr,
            beta1,
            beta2,
            epsilon,
            iterations: 0,
            first_moment: vec![None; count],
            second_moment: vec![None; count],
        })
    }

    pub fn lr(&self) -> f32 {
        self.lr
    }

    /// Number of completed steps, shared by all parameters.
    pub fn iterations(&self) -> u64 {
        self.iterations
    }
}

impl Optimizer for AdamOptimizer {
    fn step(&mut self) -> Result<(), FerrogradError> {
        self.iterations += 1;
        let t = self.iterations as i32;
        let bias1 = 1.0 - self.beta1.powi(t);
        let bias2 = 1.0 - self.beta2.powi(t);

        for (index, param) in self.params.iter().enumerate() {
            let grad = param.grad().ok_or_else(|| FerrogradError::MissingGradient {
                name: param
                    .name()
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("parameter {}", index)),
            })?;
            let grad_data = grad.get_data();
            let mut data = param.get_data();

            let m = self.first_moment[index].get_or_insert_with(|| vec![0.0; grad_data.len()]);
            let v = self.second_moment[index].get_or_insert_with(|| vec![0.0; grad_data.len()]);

            for (((p, g), m_i), v_i) in data
                .iter_mut()
                .zip(&grad_data)
                .zip(m.iter_mut())
                .zip(v.iter_mut())
            {
                *m_i = self.beta1 * *m_i + (1.0 - self.beta1) * g;
                *v_i = self.beta2 * *v_i + (1.0 - self.beta2) * g * g;
                let m_hat = *m_i / bias1;
                let v_hat = *v_i / bias2;
                *p -= self.lr * m_hat / (v_hat.sqrt() + self.epsilon);
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
