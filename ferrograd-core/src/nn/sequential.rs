use crate::error::FerrogradError;
use crate::nn::{Module, Parameter};
use crate::tensor::Tensor;

/// A container that chains modules, feeding each output into the next.
///
/// Parameters of children are exposed under `"index.name"` (for example
/// `"0.weight"`), so state dicts survive a rebuild of the same architecture.
#[derive(Debug, Default)]
pub struct Sequential {
    modules: Vec<Box<dyn Module>>,
}

impl Sequential {
    pub fn new() -> Self {
        Sequential {
            modules: Vec::new(),
        }
    }

    /// Appends a module to the end of the chain.
    pub fn add(&mut self, module: Box<dyn Module>) {
        self.modules.push(module);
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl Module for Sequential {
    fn forward(&self, input: &Tensor) -> Result<Tensor, FerrogradError> {
        let mut current = input.clone();
        for module in &self.modules {
            current = module.forward(&current)?;
        }
        Ok(current)
    }

    fn parameters(&self) -> Vec<&Parameter> {
        self.modules
            .iter()
            .flat_map(|m| m.parameters())
            .collect()
    }

    fn named_parameters(&self) -> Vec<(String, &Parameter)> {
        let mut params = Vec::new();
        for (index, module) in self.modules.iter().enumerate() {
            for (name, param) in module.named_parameters() {
                params.push((format!("{}.{}", index, name), param));
            }
        }
        params
    }
}
