// Core modules of the crate
pub mod autograd;
pub mod nn;
pub mod ops;
pub mod optim;
pub mod tensor;
pub mod tensor_data;
pub mod trainer;
pub mod utils;

pub mod error;

// Re-export the main entry points so users can write `ferrograd_core::Tensor`
pub use error::FerrogradError;
pub use tensor::Tensor;
