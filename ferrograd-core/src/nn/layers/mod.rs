pub mod linear;
pub mod log_softmax;
pub mod relu;

pub use linear::Linear;
pub use log_softmax::LogSoftmax;
pub use relu::Relu;

#[cfg(test)]
mod linear_test;
