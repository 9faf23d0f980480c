//! Uniform choice generators: inline lists and referenced key pools.

use crate::generator::GeneratorError;
use fixture_core::FixtureValue;
use rand::seq::SliceRandom;
use rand::Rng;
use serde_yaml::Value as YamlValue;

/// Pick one value from an inline list.
pub fn generate_one_of<R: Rng>(
    rng: &mut R,
    values: &[YamlValue],
) -> Result<FixtureValue, GeneratorError> {
    let value = values.choose(rng).ok_or(GeneratorError::EmptyChoiceList)?;
    Ok(FixtureValue::try_from(value)?)
}

/// Pick one value from a key pool.
///
/// With `optional`, the absent sentinel is one extra candidate, so it is
/// drawn with probability `1 / (pool + 1)`.
pub fn generate_reference<R: Rng>(
    rng: &mut R,
    candidates: &[FixtureValue],
    optional: bool,
) -> FixtureValue {
    let upper = candidates.len() + usize::from(optional);
    if upper == 0 {
        return FixtureValue::Null;
    }
    let idx = rng.gen_range(0..upper);
    candidates.get(idx).cloned().unwrap_or(FixtureValue::Null)
}
