pub mod nll;

pub use nll::{nll_loss_op, Reduction};
