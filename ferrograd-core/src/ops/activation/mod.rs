pub mod log_softmax;
pub mod relu;

pub use log_softmax::log_softmax_op;
pub use relu::relu_op;
