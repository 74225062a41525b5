use std::collections::HashMap;

use crate::error::FerrogradError;
use crate::nn::Parameter;
use crate::tensor::Tensor;

/// The base trait for all neural network modules (layers, containers, etc.).
///
/// A module owns its parameters and maps an input tensor to an output tensor.
/// Containers collect the parameters of their children under hierarchical
/// names such as `"0.weight"`.
pub trait Module: std::fmt::Debug + Send + Sync {
    /// Performs a forward pass of the module.
    fn forward(&self, input: &Tensor) -> Result<Tensor, FerrogradError>;

    /// Returns all learnable parameters of the module, including those of
    /// sub-modules.
    fn parameters(&self) -> Vec<&Parameter>;

    /// Returns all learnable parameters along with their names. Names are
    /// unique within the module and hierarchical for nested modules.
    fn named_parameters(&self) -> Vec<(String, &Parameter)>;

    /// Clears the gradients of every parameter.
    fn zero_grad(&self) {
        for param in self.parameters() {
            param.zero_grad();
        }
    }

    /// Snapshots every named parameter's values into a flat map.
    fn state_dict(&self) -> HashMap<String, Vec<f32>> {
        self.named_parameters()
            .into_iter()
            .map(|(name, param)| (name, param.get_data()))
            .collect()
    }

    /// Restores parameter values from a snapshot produced by `state_dict`.
    ///
    /// # Errors
    /// `ConfigurationError` if a parameter name is missing from the map, and
    /// `TensorCreationError` if a stored buffer has the wrong length.
    fn load_state_dict(&self, state: &HashMap<String, Vec<f32>>) -> Result<(), FerrogradError> {
        for (name, param) in self.named_parameters() {
            let data = state.get(&name).ok_or_else(|| {
                FerrogradError::ConfigurationError(format!(
                    "state dict is missing parameter '{}'",
                    name
                ))
            })?;
            param.set_data(data.clone())?;
        }
        Ok(())
    }
}
