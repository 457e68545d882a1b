use nalgebra::Vector3;
use rand::prelude::*;
use rand::rngs::StdRng;
use tracing::info;

/// Creates the run's random number generator.
///
/// The generator is seeded once per run, either from `seed` or from a fresh random seed.
/// The seed actually used is returned so that a run can be reproduced.
pub fn seeded_rng(seed: Option<u64>) -> (StdRng, u64) {
    let seed = seed.unwrap_or_else(rand::random);
    info!(seed, "Seeding random number generator.");
    (StdRng::seed_from_u64(seed), seed)
}

/// Derives an independent generator from a parent one, for plugins that own their RNG.
pub fn child_rng(parent: &mut impl Rng) -> StdRng {
    StdRng::seed_from_u64(parent.next_u64())
}

/// Draws a direction uniformly distributed on the unit sphere.
pub fn random_unit_vector(rng: &mut impl Rng) -> Vector3<f64> {
    random_unit_vector_with_attempts(rng).0
}

/// Rejection sampling inside the unit ball, returning the normalized vector together with
/// the number of draws it took.
///
/// A candidate is accepted with probability π/6, so the expected number of attempts is
/// about 1.91. The origin itself is rejected as it has no direction.
pub fn random_unit_vector_with_attempts(rng: &mut impl Rng) -> (Vector3<f64>, u32) {
    let mut attempts = 0;
    loop {
        attempts += 1;
        let candidate: Vector3<f64> = Vector3::new(
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
        );
        let norm_squared = candidate.norm_squared();
        if norm_squared <= 1.0 && norm_squared > 0.0 {
            return (candidate / norm_squared.sqrt(), attempts);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_vectors_have_unit_length() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let v = random_unit_vector(&mut rng);
            assert!((v.norm() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn mean_attempts_match_acceptance_probability() {
        let mut rng = StdRng::seed_from_u64(11);
        let draws = 20_000;
        let total: u32 = (0..draws)
            .map(|_| random_unit_vector_with_attempts(&mut rng).1)
            .sum();
        let mean = total as f64 / draws as f64;
        let expected = 6.0 / std::f64::consts::PI;
        assert!((mean - expected).abs() < 0.05, "mean attempts {}", mean);
    }

    #[test]
    fn directions_are_isotropic_on_average() {
        let mut rng = StdRng::seed_from_u64(3);
        let draws = 20_000;
        let mut sum = Vector3::zeros();
        let mut second_moments = Vector3::zeros();
        for _ in 0..draws {
            let v = random_unit_vector(&mut rng);
            sum += v;
            second_moments += v.component_mul(&v);
        }
        let mean = sum / draws as f64;
        let second = second_moments / draws as f64;

        assert!(mean.norm() < 0.03);
        for axis in 0..3 {
            assert!((second[axis] - 1.0 / 3.0).abs() < 0.02);
        }
    }

    #[test]
    fn attempts_are_counted_from_one() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..100 {
            let (v, attempts) = random_unit_vector_with_attempts(&mut rng);
            assert!(attempts >= 1);
            assert!(v.iter().all(|c| c.abs() <= 1.0));
        }
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let (mut a, seed) = seeded_rng(Some(42));
        let (mut b, _) = seeded_rng(Some(seed));
        assert_eq!(a.next_u64(), b.next_u64());
    }
}
