//! Numeric value generators.

use fixture_core::FixtureValue;
use rand::Rng;

/// Generate a random integer in the given range (inclusive).
pub fn generate_int_range<R: Rng>(rng: &mut R, min: i64, max: i64) -> FixtureValue {
    FixtureValue::Int(rng.gen_range(min..=max))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generate_int_range() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..100 {
            let value = generate_int_range(&mut rng, 50, 100);
            if let FixtureValue::Int(v) = value {
                assert!((50..=100).contains(&v));
            } else {
                panic!("Expected Int value");
            }
        }
    }

    #[test]
    fn test_binary_range_yields_only_zero_and_one() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = [false; 2];

        for _ in 0..200 {
            match generate_int_range(&mut rng, 0, 1) {
                FixtureValue::Int(0) => seen[0] = true,
                FixtureValue::Int(1) => seen[1] = true,
                other => panic!("Out of range value {other:?}"),
            }
        }
        assert_eq!(seen, [true, true]);
    }

    #[test]
    fn test_single_value_range() {
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(generate_int_range(&mut rng, 7, 7), FixtureValue::Int(7));
    }
}
