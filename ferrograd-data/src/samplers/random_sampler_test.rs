use super::*;

#[test]
fn test_random_sampler_is_a_permutation() {
    let sampler = RandomSampler::new();
    let mut indices: Vec<usize> = sampler.iter(10).collect();
    indices.sort_unstable();
    assert_eq!(indices, (0..10).collect::<Vec<_>>());
}

#[test]
fn test_seeded_sampler_reproducible_across_instances() {
    let a: Vec<usize> = RandomSampler::with_seed(42).iter(20).collect();
    let b: Vec<usize> = RandomSampler::with_seed(42).iter(20).collect();
    assert_eq!(a, b);
}

#[test]
fn test_seeded_sampler_varies_per_epoch() {
    let sampler = RandomSampler::with_seed(42);
    let first: Vec<usize> = sampler.iter(20).collect();
    let second: Vec<usize> = sampler.iter(20).collect();
    assert_ne!(first, second);

    let mut sorted = second.clone();
    sorted.sort_unstable();
    assert_eq!(sorted, (0..20).collect::<Vec<_>>());
}

#[test]
fn test_random_sampler_empty_dataset() {
    assert_eq!(RandomSampler::new().iter(0).count(), 0);
    assert_eq!(RandomSampler::new().len(0), 0);
}
