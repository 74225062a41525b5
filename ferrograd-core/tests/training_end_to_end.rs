//! Full train-loop scenarios exercised through the public API only.

use ferrograd_core::error::FerrogradError;
use ferrograd_core::nn::{Linear, LogSoftmax, Module, NllLoss, Relu, Sequential};
use ferrograd_core::ops::loss::Reduction;
use ferrograd_core::optim::{AdamOptimizer, Optimizer, SgdOptimizer};
use ferrograd_core::tensor::create::seeded_rng;
use ferrograd_core::trainer::{accuracy, BatchSource, Trainer};
use ferrograd_core::Tensor;

struct FullBatch {
    inputs: Tensor,
    labels: Vec<usize>,
}

impl BatchSource for FullBatch {
    fn batches(
        &self,
    ) -> Box<dyn Iterator<Item = Result<(Tensor, Vec<usize>), FerrogradError>> + '_> {
        Box::new(std::iter::once(Ok((
            self.inputs.clone(),
            self.labels.clone(),
        ))))
    }
}

// Two well-separated clusters: class 0 near -1 in every feature, class 1
// near +1.
fn blobs() -> FullBatch {
    let mut rows = Vec::new();
    let mut labels = Vec::new();
    for i in 0..12 {
        let sign = if i % 2 == 0 { -1.0f32 } else { 1.0 };
        let jitter = 0.15 * ((i / 2) as f32 / 6.0 - 0.5);
        rows.extend([sign + jitter, sign - jitter, sign + 2.0 * jitter, sign]);
        labels.push(if sign < 0.0 { 0 } else { 1 });
    }
    FullBatch {
        inputs: Tensor::new(rows, vec![12, 4]).unwrap(),
        labels,
    }
}

fn mlp(seed: u64) -> Sequential {
    let mut rng = seeded_rng(seed);
    let mut model = Sequential::new();
    model.add(Box::new(Linear::new_with_rng(4, 8, true, &mut rng).unwrap()));
    model.add(Box::new(Relu::new()));
    model.add(Box::new(Linear::new_with_rng(8, 2, true, &mut rng).unwrap()));
    model.add(Box::new(LogSoftmax::new()));
    model
}

fn owned_params(model: &Sequential) -> Vec<ferrograd_core::nn::Parameter> {
    model.parameters().into_iter().cloned().collect()
}

#[test]
fn sgd_converges_on_separable_blobs() {
    let data = blobs();
    let model = mlp(42);
    let criterion = NllLoss::new(Reduction::Mean);
    let mut optimizer = SgdOptimizer::new(owned_params(&model), 0.5, 0.0).unwrap();

    let history = Trainer::new(200)
        .fit(&model, &criterion, &mut optimizer, &data)
        .unwrap();

    assert!(history.last().unwrap() < &0.1, "loss = {:?}", history.last());

    let log_probs = model.forward(&data.inputs).unwrap();
    assert_eq!(accuracy(&log_probs, &data.labels).unwrap(), 1.0);
}

#[test]
fn adam_converges_on_separable_blobs() {
    let data = blobs();
    let model = mlp(7);
    let criterion = NllLoss::new(Reduction::Mean);
    let mut optimizer = AdamOptimizer::new(owned_params(&model), 0.05).unwrap();

    let history = Trainer::new(150)
        .fit(&model, &criterion, &mut optimizer, &data)
        .unwrap();

    assert!(history.last().unwrap() < &0.1, "loss = {:?}", history.last());

    let log_probs = model.forward(&data.inputs).unwrap();
    assert_eq!(accuracy(&log_probs, &data.labels).unwrap(), 1.0);
}

#[test]
fn momentum_sgd_trains_at_least_as_well_as_plain() {
    let data = blobs();
    let model = mlp(99);
    let criterion = NllLoss::new(Reduction::Mean);
    let mut optimizer = SgdOptimizer::new(owned_params(&model), 0.1, 0.9).unwrap();

    let history = Trainer::new(200)
        .fit(&model, &criterion, &mut optimizer, &data)
        .unwrap();
    assert!(history.last().unwrap() < &0.1, "loss = {:?}", history.last());
}

#[test]
fn trained_weights_survive_a_state_dict_round_trip() {
    let data = blobs();
    let model = mlp(42);
    let criterion = NllLoss::new(Reduction::Mean);
    let mut optimizer = SgdOptimizer::new(owned_params(&model), 0.5, 0.0).unwrap();
    Trainer::new(100)
        .fit(&model, &criterion, &mut optimizer, &data)
        .unwrap();

    let state = model.state_dict();
    let restored = mlp(1234);
    restored.load_state_dict(&state).unwrap();

    let original_out = model.forward(&data.inputs).unwrap();
    let restored_out = restored.forward(&data.inputs).unwrap();
    assert_eq!(original_out.get_data(), restored_out.get_data());
}

#[test]
fn fit_propagates_label_range_errors() {
    let model = mlp(5);
    let criterion = NllLoss::new(Reduction::Mean);
    let mut optimizer = SgdOptimizer::new(owned_params(&model), 0.1, 0.0).unwrap();

    // Label 5 does not exist in a 2-class head.
    let bad = FullBatch {
        inputs: Tensor::new(vec![0.0; 4], vec![1, 4]).unwrap(),
        labels: vec![5],
    };
    let err = Trainer::new(1)
        .fit(&model, &criterion, &mut optimizer, &bad)
        .unwrap_err();
    assert!(matches!(err, FerrogradError::LabelOutOfRange { .. }));
}
