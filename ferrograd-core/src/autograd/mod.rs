// src/autograd/mod.rs

//! Reverse-mode automatic differentiation.
//!
//! Every differentiable primitive attaches a [`BackwardOp`] node to its
//! output tensor during the forward pass. `Tensor::backward()` then walks
//! the recorded graph in reverse topological order, applying each node's
//! backward rule and summing gradient contributions into the leaves.

pub mod backward_op;
pub mod grad_check;
pub(crate) mod graph;

pub use backward_op::BackwardOp;
pub use grad_check::{check_grad, GradCheckError};
