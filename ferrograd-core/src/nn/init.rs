use rand::rngs::StdRng;
use rand::Rng;

use crate::error::FerrogradError;
use crate::tensor::Tensor;

/// Fills the tensor in place with values drawn from
/// `U(-bound, bound)` where `bound = sqrt(6 / fan_in)`.
///
/// This is the Kaiming uniform scheme for layers followed by a ReLU.
pub fn kaiming_uniform_(
    tensor: &Tensor,
    fan_in: usize,
    rng: &mut StdRng,
) -> Result<(), FerrogradError> {
    if fan_in == 0 {
        return Err(FerrogradError::ConfigurationError(
            "kaiming_uniform_ requires fan_in > 0".to_string(),
        ));
    }
    let bound = (6.0f32 / fan_in as f32).sqrt();
    let numel = tensor.numel();
    let data: Vec<f32> = (0..numel).map(|_| rng.gen_range(-bound..bound)).collect();
    tensor.set_data(data)
}

/// Fills the tensor in place with zeros.
pub fn zeros_(tensor: &Tensor) -> Result<(), FerrogradError> {
    tensor.set_data(vec![0.0; tensor.numel()])
}

#[cfg(test)]
mod init_test {
    use super::*;
    use crate::tensor::create::{seeded_rng, zeros};

    #[test]
    fn test_kaiming_uniform_stays_in_bound() {
        let t = zeros(&[16, 8]).unwrap();
        let mut rng = seeded_rng(7);
        kaiming_uniform_(&t, 8, &mut rng).unwrap();
        let bound = (6.0f32 / 8.0).sqrt();
        for v in t.get_data() {
            assert!(v.abs() < bound);
        }
    }

    #[test]
    fn test_kaiming_uniform_is_deterministic_per_seed() {
        let a = zeros(&[4, 4]).unwrap();
        let b = zeros(&[4, 4]).unwrap();
        kaiming_uniform_(&a, 4, &mut seeded_rng(42)).unwrap();
        kaiming_uniform_(&b, 4, &mut seeded_rng(42)).unwrap();
        assert_eq!(a.get_data(), b.get_data());
    }

    #[test]
    fn test_kaiming_uniform_rejects_zero_fan_in() {
        let t = zeros(&[2, 2]).unwrap();
        assert!(kaiming_uniform_(&t, 0, &mut seeded_rng(0)).is_err());
    }

    #[test]
    fn test_zeros_() {
        let t = crate::tensor::create::ones(&[3]).unwrap();
        zeros_(&t).unwrap();
        assert_eq!(t.get_data(), vec![0.0, 0.0, 0.0]);
    }
}
