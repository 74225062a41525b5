//! Shows how a dataset, a sampler and a loader fit together.
//!
//! Run with `RUST_LOG=info cargo run --example data_loading`.

use ferrograd_core::FerrogradError;
use ferrograd_data::{DataLoader, RandomSampler, VecDataset};
use log::info;

fn main() -> Result<(), FerrogradError> {
    env_logger::init();

    let examples: Vec<(Vec<f32>, usize)> = (0..10)
        .map(|i| (vec![i as f32, (i * i) as f32], i % 3))
        .collect();
    let dataset = VecDataset::new(examples);

    let loader = DataLoader::new(dataset, 4, RandomSampler::with_seed(0), false)?;
    info!("one epoch is {} batches", loader.num_batches());

    for (i, batch) in loader.iter().enumerate() {
        let (inputs, labels) = batch?;
        info!("batch {}: inputs {:?}, labels {:?}", i, inputs.shape(), labels);
    }

    // A second pass reshuffles but still covers every sample once.
    let revisit: usize = loader
        .iter()
        .map(|batch| batch.map(|(_, labels)| labels.len()))
        .sum::<Result<usize, _>>()?;
    info!("second epoch visited {} samples", revisit);

    Ok(())
}
