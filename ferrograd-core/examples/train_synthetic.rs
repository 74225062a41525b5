//! Trains a small MLP classifier on a synthetic two-cluster dataset and
//! round-trips the learned weights through a state dict.
//!
//! Run with `RUST_LOG=info cargo run --example train_synthetic`.

use ferrograd_core::error::FerrogradError;
use ferrograd_core::nn::{Linear, LogSoftmax, Module, NllLoss, Relu, Sequential};
use ferrograd_core::ops::loss::Reduction;
use ferrograd_core::optim::AdamOptimizer;
use ferrograd_core::tensor::create::{randn_with, seeded_rng};
use ferrograd_core::trainer::{accuracy, BatchSource, Trainer};
use ferrograd_core::Tensor;
use log::info;

const FEATURES: usize = 4;
const CLASSES: usize = 2;
const SAMPLES: usize = 64;

struct InMemory {
    inputs: Tensor,
    labels: Vec<usize>,
}

impl BatchSource for InMemory {
    fn batches(
        &self,
    ) -> Box<dyn Iterator<Item = Result<(Tensor, Vec<usize>), FerrogradError>> + '_> {
        Box::new(std::iter::once(Ok((
            self.inputs.clone(),
            self.labels.clone(),
        ))))
    }
}

fn make_dataset(seed: u64) -> Result<InMemory, FerrogradError> {
    let mut rng = seeded_rng(seed);
    let noise = randn_with(&[SAMPLES, FEATURES], &mut rng)?;
    let noise_data = noise.get_data();

    let mut rows = Vec::with_capacity(SAMPLES * FEATURES);
    let mut labels = Vec::with_capacity(SAMPLES);
    for i in 0..SAMPLES {
        let class = i % CLASSES;
        let center = if class == 0 { -2.0f32 } else { 2.0 };
        for f in 0..FEATURES {
            rows.push(center + 0.5 * noise_data[i * FEATURES + f]);
        }
        labels.push(class);
    }
    Ok(InMemory {
        inputs: Tensor::new(rows, vec![SAMPLES, FEATURES])?,
        labels,
    })
}

fn main() -> Result<(), FerrogradError> {
    env_logger::init();

    let data = make_dataset(0)?;

    let mut rng = seeded_rng(1);
    let mut model = Sequential::new();
    model.add(Box::new(Linear::new_with_rng(FEATURES, 16, true, &mut rng)?));
    model.add(Box::new(Relu::new()));
    model.add(Box::new(Linear::new_with_rng(16, CLASSES, true, &mut rng)?));
    model.add(Box::new(LogSoftmax::new()));

    let criterion = NllLoss::new(Reduction::Mean);
    let mut optimizer = AdamOptimizer::new(
        model.parameters().into_iter().cloned().collect(),
        0.01,
    )?;

    let history = Trainer::new(100).fit(&model, &criterion, &mut optimizer, &data)?;
    info!(
        "training finished: first loss {:.4}, final loss {:.4}",
        history[0],
        history[history.len() - 1]
    );

    let log_probs = model.forward(&data.inputs)?;
    info!(
        "train accuracy: {:.1}%",
        100.0 * accuracy(&log_probs, &data.labels)?
    );

    // Snapshot the weights and restore them into a fresh model.
    let state = model.state_dict();
    let mut rng = seeded_rng(2);
    let mut restored = Sequential::new();
    restored.add(Box::new(Linear::new_with_rng(FEATURES, 16, true, &mut rng)?));
    restored.add(Box::new(Relu::new()));
    restored.add(Box::new(Linear::new_with_rng(16, CLASSES, true, &mut rng)?));
    restored.add(Box::new(LogSoftmax::new()));
    restored.load_state_dict(&state)?;

    let restored_probs = restored.forward(&data.inputs)?;
    info!(
        "restored model accuracy: {:.1}%",
        100.0 * accuracy(&restored_probs, &data.labels)?
    );

    Ok(())
}
