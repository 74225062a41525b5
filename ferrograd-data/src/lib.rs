//! Datasets, samplers and batching for ferrograd training loops.
//!
//! A [`Dataset`](datasets::Dataset) hands out individual examples, a
//! [`Sampler`](samplers::Sampler) decides the visiting order, and a
//! [`DataLoader`](dataloader::DataLoader) groups examples into stacked
//! minibatch tensors. `DataLoader` implements the core crate's
//! `BatchSource` trait, so it plugs straight into `Trainer::fit`.

pub mod collate;
pub mod dataloader;
pub mod datasets;
pub mod samplers;

pub use collate::stack_examples;
pub use dataloader::DataLoader;
pub use datasets::{Dataset, VecDataset};
pub use samplers::{RandomSampler, Sampler, SequentialSampler};
