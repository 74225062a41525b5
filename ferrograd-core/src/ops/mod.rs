// src/ops/mod.rs

//! Differentiable primitives.
//!
//! Each operation is a free `*_op` function: validate shapes, compute the
//! forward result, and, if any input is tracked, attach the matching
//! `*Backward` node to the output. The operation set is closed (arithmetic,
//! matmul/affine, activations, reductions, loss); there is no plugin
//! mechanism.

pub mod activation;
pub mod arithmetic;
pub mod linalg;
pub mod loss;
pub mod reduction;
