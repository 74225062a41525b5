pub mod adam;
pub mod optimizer_trait;
pub mod sgd;

pub use adam::AdamOptimizer;
pub use optimizer_trait::Optimizer;
pub use sgd::SgdOptimizer;

#[cfg(test)]
mod adam_test;
